//! Authentication service
//!
//! Handles user registration, login, and caller lookup.

use bookstore_common::AppError;
use bookstore_core::entities::NewUser;
use bookstore_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<UserResponse> {
        // Hash outside the transaction; argon2 is slow on purpose
        let password_hash = self.ctx.password_service().hash_new(&request.password)?;
        let new_user = NewUser::new(request.username, &request.email);

        let mut tx = self.ctx.store().begin().await?;
        if tx.email_exists(&new_user.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        let user = tx.insert_user(&new_user, &password_hash).await?;
        tx.commit().await?;

        info!(user_id = user.id, "User registered successfully");
        Ok(UserResponse::from(user))
    }

    /// Login with email and password
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let email = request.email.trim().to_lowercase();

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                AppError::InvalidCredentials
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = user.id, "Login failed: no password hash");
                AppError::InvalidCredentials
            })?;

        self.ctx
            .password_service()
            .verify_or_error(&request.password, &password_hash)
            .inspect_err(|_| warn!(user_id = user.id, "Login failed: invalid password"))?;

        let token = self.ctx.jwt_service().issue(user.id)?;

        info!(user_id = user.id, "User logged in successfully");
        Ok(AuthResponse::new(token, &user))
    }

    /// Current user profile
    #[instrument(skip(self))]
    pub async fn me(&self, user_id: i64) -> ServiceResult<UserResponse> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }
}
