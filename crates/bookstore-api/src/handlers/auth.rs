//! Authentication handlers
//!
//! Endpoints for registration, login and the current user.

use axum::extract::State;
use bookstore_service::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use bookstore_service::AuthService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, Success};
use crate::state::AppState;

/// Register a new user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Success<UserResponse>>> {
    let service = AuthService::new(state.service_context());
    let user = service.register(request).await?;
    Ok(Created(Success::new("User registered successfully", user)))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Success<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Success::new("Login successful", response))
}

/// Current user
///
/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Success<UserResponse>> {
    let service = AuthService::new(state.service_context());
    let user = service.me(auth.user_id).await?;
    Ok(Success::new("User retrieved successfully", user))
}
