//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Genre not found: {0}")]
    GenreNotFound(i64),

    #[error("Book not found: {0}")]
    BookNotFound(i64),

    #[error("Transaction not found: {0}")]
    OrderNotFound(i64),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid stock quantity: {0}")]
    InvalidStockQuantity(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("A transaction needs at least one item")]
    EmptyOrder,

    // =========================================================================
    // Reference Errors
    // =========================================================================
    #[error("Genre {0} does not exist")]
    InvalidGenreReference(i64),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    // =========================================================================
    // Authentication Errors
    // =========================================================================
    #[error("Invalid email or password")]
    InvalidCredentials,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Genre '{0}' already exists")]
    GenreNameTaken(String),

    #[error("Genre name '{0}' belongs to a deleted genre; create it to restore")]
    GenreNameArchived(String),

    #[error("Book '{0}' already exists")]
    BookTitleTaken(String),

    #[error("Book title '{0}' belongs to a deleted book; create it to restore")]
    BookTitleArchived(String),

    #[error("Genre {id} is still referenced by {count} book(s)")]
    GenreHasBooks { id: i64, count: i64 },

    #[error("Book {id} is still referenced by {count} transaction item(s)")]
    BookHasOrders { id: i64, count: i64 },

    #[error("Conflict: {0}")]
    Conflict(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::GenreNotFound(_) => "UNKNOWN_GENRE",
            Self::BookNotFound(_) => "UNKNOWN_BOOK",
            Self::OrderNotFound(_) => "UNKNOWN_TRANSACTION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::InvalidPrice(_) => "INVALID_PRICE",
            Self::InvalidStockQuantity(_) => "INVALID_STOCK_QUANTITY",
            Self::InvalidQuantity(_) => "INVALID_QUANTITY",
            Self::EmptyOrder => "EMPTY_TRANSACTION",

            // Reference
            Self::InvalidGenreReference(_) | Self::InvalidReference(_) => "INVALID_REFERENCE",

            // Authentication
            Self::InvalidCredentials => "INVALID_CREDENTIALS",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::GenreNameTaken(_)
            | Self::GenreNameArchived(_)
            | Self::BookTitleTaken(_)
            | Self::BookTitleArchived(_)
            | Self::GenreHasBooks { .. }
            | Self::BookHasOrders { .. }
            | Self::Conflict(_) => "CONFLICT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::GenreNotFound(_)
                | Self::BookNotFound(_)
                | Self::OrderNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::WeakPassword(_)
                | Self::InvalidPrice(_)
                | Self::InvalidStockQuantity(_)
                | Self::InvalidQuantity(_)
                | Self::EmptyOrder
        )
    }

    /// Check if this is a dangling reference
    pub fn is_invalid_reference(&self) -> bool {
        matches!(
            self,
            Self::InvalidGenreReference(_) | Self::InvalidReference(_)
        )
    }

    /// Check if this is an authentication error
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::InvalidCredentials)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::GenreNameTaken(_)
                | Self::GenreNameArchived(_)
                | Self::BookTitleTaken(_)
                | Self::BookTitleArchived(_)
                | Self::GenreHasBooks { .. }
                | Self::BookHasOrders { .. }
                | Self::Conflict(_)
        )
    }
}
