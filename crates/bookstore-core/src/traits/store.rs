//! Transactional write port
//!
//! Every mutation opens one [`StoreTransaction`], reads and locks what it needs,
//! runs the lifecycle and guard checks, writes, and commits. Dropping a
//! transaction without committing rolls it back.

use async_trait::async_trait;

use crate::entities::{Book, BookDraft, Genre, NewUser, Order, OrderItem, User};
use crate::traits::RepoResult;
use crate::value_objects::Quantity;

#[async_trait]
pub trait Store: Send + Sync {
    /// Open a transaction
    async fn begin(&self) -> RepoResult<Box<dyn StoreTransaction>>;

    /// Check connectivity
    async fn ping(&self) -> RepoResult<()>;
}

/// Unit of work. Lookups here see rows in any state and lock them until commit.
#[async_trait]
pub trait StoreTransaction: Send {
    // ------------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------------

    /// Check whether an email is registered
    async fn email_exists(&mut self, email: &str) -> RepoResult<bool>;

    /// Insert a user
    async fn insert_user(&mut self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// Lock a user row and report whether it exists
    async fn lock_user(&mut self, id: i64) -> RepoResult<bool>;

    // ------------------------------------------------------------------------
    // Genres
    // ------------------------------------------------------------------------

    /// Lock the genre holding `name` in any state, skipping `exclude_id`
    async fn find_genre_by_name(
        &mut self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> RepoResult<Option<Genre>>;

    /// Lock a genre by id in any state
    async fn lock_genre(&mut self, id: i64) -> RepoResult<Option<Genre>>;

    async fn insert_genre(&mut self, name: &str) -> RepoResult<Genre>;

    /// Persist name, timestamps, and deletion mark
    async fn save_genre(&mut self, genre: &Genre) -> RepoResult<Genre>;

    /// Active books pointing at a genre
    async fn count_books_in_genre(&mut self, genre_id: i64) -> RepoResult<i64>;

    // ------------------------------------------------------------------------
    // Books
    // ------------------------------------------------------------------------

    /// Lock the book holding `title` in any state, skipping `exclude_id`
    async fn find_book_by_title(
        &mut self,
        title: &str,
        exclude_id: Option<i64>,
    ) -> RepoResult<Option<Book>>;

    /// Lock a book by id in any state
    async fn lock_book(&mut self, id: i64) -> RepoResult<Option<Book>>;

    async fn insert_book(&mut self, draft: &BookDraft) -> RepoResult<Book>;

    /// Persist every column of a book
    async fn save_book(&mut self, book: &Book) -> RepoResult<Book>;

    /// Order items pointing at a book
    async fn count_order_items_for_book(&mut self, book_id: i64) -> RepoResult<i64>;

    // ------------------------------------------------------------------------
    // Orders
    // ------------------------------------------------------------------------

    async fn insert_order(&mut self, user_id: i64) -> RepoResult<Order>;

    async fn insert_order_item(
        &mut self,
        order_id: i64,
        book_id: i64,
        quantity: Quantity,
    ) -> RepoResult<OrderItem>;

    /// Make every write of this transaction durable
    async fn commit(self: Box<Self>) -> RepoResult<()>;
}
