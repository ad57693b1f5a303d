//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table. The password hash is read separately.
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
