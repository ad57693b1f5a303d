//! Repository traits (ports) - read-side data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Reads never see soft-deleted rows unless
//! the method says otherwise; every write goes through [`crate::Store`].

use async_trait::async_trait;

use crate::entities::{Book, Genre, OrderDetails, User};
use crate::error::DomainError;
use crate::query::{BookQuery, Page, PageRequest};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Find user by (lowercased) email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>>;
}

// ============================================================================
// Genre Repository
// ============================================================================

#[async_trait]
pub trait GenreRepository: Send + Sync {
    /// Find an active genre by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Genre>>;

    /// List active genres, newest first
    async fn list(&self) -> RepoResult<Vec<Genre>>;
}

// ============================================================================
// Book Repository
// ============================================================================

#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find an active book by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Book>>;

    /// Filtered, sorted, paginated listing of active books
    async fn search(&self, query: &BookQuery) -> RepoResult<Page<Book>>;

    /// Active books of a genre, newest first
    async fn find_by_genre(&self, genre_id: i64) -> RepoResult<Vec<Book>>;
}

// ============================================================================
// Order Repository
// ============================================================================

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find an order with its lines
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<OrderDetails>>;

    /// All orders of a user with their lines, newest first
    async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<OrderDetails>>;

    /// Every order with its lines, newest first
    async fn find_all(&self) -> RepoResult<Vec<OrderDetails>>;

    /// Page of a user's orders, newest first. Used when no in-memory filter applies.
    async fn page_by_user(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> RepoResult<Page<OrderDetails>>;
}
