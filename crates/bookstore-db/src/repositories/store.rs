//! PostgreSQL implementation of the transactional Store
//!
//! Every lookup inside a transaction takes a row lock (`FOR UPDATE`) so the
//! checks made by the service stay true until commit. Dropping an uncommitted
//! [`PgStoreTransaction`] rolls it back.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use bookstore_core::entities::{Book, BookDraft, Genre, NewUser, Order, OrderItem, User};
use bookstore_core::error::DomainError;
use bookstore_core::traits::{RepoResult, Store, StoreTransaction};
use bookstore_core::value_objects::Quantity;

use crate::models::book::BOOK_COLUMNS;
use crate::models::{BookModel, GenreModel, OrderItemModel, OrderModel, UserModel};

use super::error::{map_db_error, map_write_error};

/// Transaction factory over a connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Close the pool; waits for checked-out connections to return
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Store for PgStore {
    async fn begin(&self) -> RepoResult<Box<dyn StoreTransaction>> {
        let tx = self.pool.begin().await.map_err(map_db_error)?;
        Ok(Box::new(PgStoreTransaction { tx }))
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}

/// Open database transaction
pub struct PgStoreTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTransaction for PgStoreTransaction {
    // ------------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------------

    #[instrument(skip(self))]
    async fn email_exists(&mut self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, password_hash))]
    async fn insert_user(&mut self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let model = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, created_at, updated_at
            ",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(password_hash)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| map_write_error(e, || DomainError::EmailAlreadyExists))?;

        Ok(User::from(model))
    }

    #[instrument(skip(self))]
    async fn lock_user(&mut self, id: i64) -> RepoResult<bool> {
        let found = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE id = $1 FOR SHARE")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_db_error)?;
        Ok(found.is_some())
    }

    // ------------------------------------------------------------------------
    // Genres
    // ------------------------------------------------------------------------

    #[instrument(skip(self))]
    async fn find_genre_by_name(
        &mut self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> RepoResult<Option<Genre>> {
        let result = sqlx::query_as::<_, GenreModel>(
            r"
            SELECT id, name, created_at, updated_at, deleted_at
            FROM genres
            WHERE name = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            FOR UPDATE
            ",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Genre::from))
    }

    #[instrument(skip(self))]
    async fn lock_genre(&mut self, id: i64) -> RepoResult<Option<Genre>> {
        let result = sqlx::query_as::<_, GenreModel>(
            r"
            SELECT id, name, created_at, updated_at, deleted_at
            FROM genres
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Genre::from))
    }

    #[instrument(skip(self))]
    async fn insert_genre(&mut self, name: &str) -> RepoResult<Genre> {
        let model = sqlx::query_as::<_, GenreModel>(
            r"
            INSERT INTO genres (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at, deleted_at
            ",
        )
        .bind(name)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| map_write_error(e, || DomainError::GenreNameTaken(name.to_string())))?;

        debug!(genre_id = model.id, "Inserted genre");
        Ok(Genre::from(model))
    }

    #[instrument(skip(self, genre), fields(genre_id = genre.id))]
    async fn save_genre(&mut self, genre: &Genre) -> RepoResult<Genre> {
        let model = sqlx::query_as::<_, GenreModel>(
            r"
            UPDATE genres
            SET name = $2, updated_at = $3, deleted_at = $4
            WHERE id = $1
            RETURNING id, name, created_at, updated_at, deleted_at
            ",
        )
        .bind(genre.id)
        .bind(&genre.name)
        .bind(genre.updated_at)
        .bind(genre.deleted_at)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_write_error(e, || DomainError::GenreNameTaken(genre.name.clone())))?;

        model
            .map(Genre::from)
            .ok_or(DomainError::GenreNotFound(genre.id))
    }

    #[instrument(skip(self))]
    async fn count_books_in_genre(&mut self, genre_id: i64) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM books WHERE genre_id = $1 AND deleted_at IS NULL",
        )
        .bind(genre_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_error)
    }

    // ------------------------------------------------------------------------
    // Books
    // ------------------------------------------------------------------------

    #[instrument(skip(self))]
    async fn find_book_by_title(
        &mut self,
        title: &str,
        exclude_id: Option<i64>,
    ) -> RepoResult<Option<Book>> {
        let sql = format!(
            "SELECT {BOOK_COLUMNS} FROM books \
             WHERE title = $1 AND ($2::BIGINT IS NULL OR id <> $2) \
             FOR UPDATE"
        );
        let result = sqlx::query_as::<_, BookModel>(&sql)
            .bind(title)
            .bind(exclude_id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Book::from))
    }

    #[instrument(skip(self))]
    async fn lock_book(&mut self, id: i64) -> RepoResult<Option<Book>> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1 FOR UPDATE");
        let result = sqlx::query_as::<_, BookModel>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Book::from))
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    async fn insert_book(&mut self, draft: &BookDraft) -> RepoResult<Book> {
        let sql = format!(
            "INSERT INTO books \
             (title, writer, publisher, publication_year, price, stock_quantity, genre_id, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {BOOK_COLUMNS}"
        );
        let model = sqlx::query_as::<_, BookModel>(&sql)
            .bind(&draft.title)
            .bind(&draft.writer)
            .bind(&draft.publisher)
            .bind(draft.publication_year)
            .bind(draft.price.value())
            .bind(draft.stock_quantity.value())
            .bind(draft.genre_id)
            .bind(&draft.description)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| map_write_error(e, || DomainError::BookTitleTaken(draft.title.clone())))?;

        debug!(book_id = model.id, "Inserted book");
        Ok(Book::from(model))
    }

    #[instrument(skip(self, book), fields(book_id = book.id))]
    async fn save_book(&mut self, book: &Book) -> RepoResult<Book> {
        let sql = format!(
            "UPDATE books \
             SET title = $2, writer = $3, publisher = $4, publication_year = $5, price = $6, \
                 stock_quantity = $7, genre_id = $8, description = $9, updated_at = $10, \
                 deleted_at = $11 \
             WHERE id = $1 \
             RETURNING {BOOK_COLUMNS}"
        );
        let model = sqlx::query_as::<_, BookModel>(&sql)
            .bind(book.id)
            .bind(&book.title)
            .bind(&book.writer)
            .bind(&book.publisher)
            .bind(book.publication_year)
            .bind(book.price)
            .bind(book.stock_quantity)
            .bind(book.genre_id)
            .bind(&book.description)
            .bind(book.updated_at)
            .bind(book.deleted_at)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| map_write_error(e, || DomainError::BookTitleTaken(book.title.clone())))?;

        model
            .map(Book::from)
            .ok_or(DomainError::BookNotFound(book.id))
    }

    #[instrument(skip(self))]
    async fn count_order_items_for_book(&mut self, book_id: i64) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM order_items WHERE book_id = $1")
            .bind(book_id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_db_error)
    }

    // ------------------------------------------------------------------------
    // Orders
    // ------------------------------------------------------------------------

    #[instrument(skip(self))]
    async fn insert_order(&mut self, user_id: i64) -> RepoResult<Order> {
        let model = sqlx::query_as::<_, OrderModel>(
            r"
            INSERT INTO orders (user_id)
            VALUES ($1)
            RETURNING id, user_id, created_at, updated_at
            ",
        )
        .bind(user_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| map_write_error(e, || DomainError::Conflict("duplicate order".to_string())))?;

        Ok(Order::from(model))
    }

    #[instrument(skip(self))]
    async fn insert_order_item(
        &mut self,
        order_id: i64,
        book_id: i64,
        quantity: Quantity,
    ) -> RepoResult<OrderItem> {
        let model = sqlx::query_as::<_, OrderItemModel>(
            r"
            INSERT INTO order_items (order_id, book_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING id, order_id, book_id, quantity, created_at, updated_at
            ",
        )
        .bind(order_id)
        .bind(book_id)
        .bind(quantity.value())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            map_write_error(e, || DomainError::Conflict("duplicate order item".to_string()))
        })?;

        Ok(OrderItem::from(model))
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        self.tx.commit().await.map_err(map_db_error)
    }
}
