//! Response types and error handling for API endpoints
//!
//! Every body, success or failure, is an [`ApiResponse`] envelope.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bookstore_common::{AppError, ErrorResponse};
use bookstore_core::lifecycle::Written;
use bookstore_service::dto::ApiResponse;
use bookstore_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Route not found")]
    RouteNotFound,
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::App(e) => e.status_code(),
            Self::Service(e) => e.status_code(),
            Self::Validation(_)
            | Self::InvalidPath(_)
            | Self::InvalidQuery(_)
            | Self::InvalidBody(_) => 400,
            Self::MissingAuth => 401,
            Self::RouteNotFound => 404,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidPath(_) => "INVALID_PATH_PARAMETER",
            Self::InvalidQuery(_) => "INVALID_QUERY_PARAMETER",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::MissingAuth => "MISSING_AUTHORIZATION",
            Self::RouteNotFound => "NOT_FOUND",
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Create an invalid query error
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Create an invalid body error
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().to_string();

        // Server errors are logged in full and answered generically
        let message = if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
            "Internal server error".to_string()
        } else {
            match &self {
                Self::App(e) => ErrorResponse::from(e).message,
                _ => self.to_string(),
            }
        };

        (status, Json(ApiResponse::failure(message, code))).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// 200 envelope carrying data
pub struct Success<T> {
    message: String,
    data: T,
}

impl<T> Success<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        Json(ApiResponse::ok(self.message, self.data)).into_response()
    }
}

/// 200 envelope without data
pub struct Done(pub &'static str);

impl IntoResponse for Done {
    fn into_response(self) -> Response {
        Json(ApiResponse::message(self.0)).into_response()
    }
}

/// Created response (201)
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}

/// Result of a create that may have restored a deleted row: 201 when a row
/// was inserted, 200 when it was restored
pub struct Saved<T> {
    resource: &'static str,
    written: Written<T>,
}

impl<T> Saved<T> {
    pub fn new(resource: &'static str, written: Written<T>) -> Self {
        Self { resource, written }
    }
}

impl<T: Serialize> IntoResponse for Saved<T> {
    fn into_response(self) -> Response {
        if self.written.outcome.is_restored() {
            Success::new(
                format!("{} restored successfully", self.resource),
                self.written.value,
            )
            .into_response()
        } else {
            Created(Success::new(
                format!("{} created successfully", self.resource),
                self.written.value,
            ))
            .into_response()
        }
    }
}

/// Envelope for unmatched routes
pub async fn fallback() -> ApiError {
    ApiError::RouteNotFound
}

/// Turns a caught handler panic into the generic 500 envelope
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::failure("Internal server error", "INTERNAL_ERROR")),
    )
        .into_response()
}
