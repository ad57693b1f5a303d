//! Health check handlers
//!
//! Endpoints for liveness and readiness checks.

use axum::{extract::State, http::StatusCode, Json};
use bookstore_service::dto::{ApiResponse, HealthResponse, ReadinessResponse};

use crate::response::Success;
use crate::state::AppState;

/// Basic health check (liveness)
///
/// GET /health
pub async fn health_check() -> Success<HealthResponse> {
    Success::new("Service is healthy", HealthResponse::healthy())
}

/// Readiness check with dependency health
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<ReadinessResponse>>) {
    let db_healthy = match state.service_context().store().ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database readiness check failed");
            false
        }
    };

    let readiness = ReadinessResponse::new(db_healthy);
    if readiness.is_ready() {
        (
            StatusCode::OK,
            Json(ApiResponse::ok("Service is ready", readiness)),
        )
    } else {
        let mut body = ApiResponse::ok("Service is not ready", readiness);
        body.success = false;
        body.error = Some("SERVICE_UNAVAILABLE".to_string());
        (StatusCode::SERVICE_UNAVAILABLE, Json(body))
    }
}
