//! User entity - a registered bookstore customer

use chrono::{DateTime, Utc};

/// User account. Users are never soft deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to register a user; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

impl NewUser {
    /// Build a registration, normalizing the email to lowercase
    pub fn new(username: impl Into<String>, email: &str) -> Self {
        Self {
            username: username.into().trim().to_string(),
            email: email.trim().to_lowercase(),
        }
    }
}
