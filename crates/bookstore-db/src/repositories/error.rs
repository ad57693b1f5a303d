//! Error handling utilities for repositories

use bookstore_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Translate constraint violations raised by a write.
///
/// These are the backstop for races that slip past the in-transaction checks:
/// a unique violation becomes the caller's conflict, a foreign key violation an
/// invalid reference, and a check violation a validation error.
pub fn map_write_error<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
        if db_err.is_foreign_key_violation() {
            let constraint = db_err.constraint().unwrap_or("foreign key");
            return DomainError::InvalidReference(format!("violates {constraint}"));
        }
        if db_err.is_check_violation() {
            let constraint = db_err.constraint().unwrap_or("check constraint");
            return DomainError::ValidationError(format!("violates {constraint}"));
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Escape `%`, `_` and `\` so user input matches literally inside ILIKE
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
