//! Book service
//!
//! Books follow the same restore-on-create lifecycle as genres, keyed by
//! title. Every write checks that the referenced genre exists.

use bookstore_core::entities::BookChanges;
use bookstore_core::guard;
use bookstore_core::lifecycle::{ensure_key_available, plan_create, require_active, CreatePlan, Written};
use bookstore_core::traits::StoreTransaction;
use bookstore_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{
    BookListQuery, BookResponse, CreateBookRequest, GenreBooksResponse, GenreResponse,
    PaginatedResponse, UpdateBookRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Book service
pub struct BookService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BookService<'a> {
    /// Create a new BookService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a book, or bring back the deleted book with this title
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_book(
        &self,
        request: CreateBookRequest,
    ) -> ServiceResult<Written<BookResponse>> {
        let draft = request.into_draft()?;

        // Book row before genre row, the same order update_book takes them
        let mut tx = self.ctx.store().begin().await?;
        let existing = tx.find_book_by_title(&draft.title, None).await?;
        check_genre(tx.as_mut(), draft.genre_id).await?;

        let written = match plan_create(existing, |b| DomainError::BookTitleTaken(b.title.clone()))? {
            CreatePlan::Insert => Written::created(tx.insert_book(&draft).await?),
            CreatePlan::Restore(mut book) => {
                book.restore(draft);
                Written::restored(tx.save_book(&book).await?)
            }
        };
        tx.commit().await?;

        info!(
            book_id = written.value.id,
            restored = written.outcome.is_restored(),
            "Book saved"
        );
        Ok(written.map(BookResponse::from))
    }

    /// Filtered, sorted, paginated listing of active books
    #[instrument(skip(self, query))]
    pub async fn list_books(
        &self,
        query: BookListQuery,
    ) -> ServiceResult<PaginatedResponse<BookResponse>> {
        let query = query.into_query()?;
        let page = self.ctx.book_repo().search(&query).await?;
        Ok(PaginatedResponse::from(page))
    }

    /// Get an active book
    #[instrument(skip(self))]
    pub async fn get_book(&self, book_id: i64) -> ServiceResult<BookResponse> {
        self.ctx
            .book_repo()
            .find_by_id(book_id)
            .await?
            .map(BookResponse::from)
            .ok_or_else(|| DomainError::BookNotFound(book_id).into())
    }

    /// An active genre with its active books
    #[instrument(skip(self))]
    pub async fn books_by_genre(&self, genre_id: i64) -> ServiceResult<GenreBooksResponse> {
        let genre = self
            .ctx
            .genre_repo()
            .find_by_id(genre_id)
            .await?
            .ok_or(DomainError::GenreNotFound(genre_id))?;
        let books = self.ctx.book_repo().find_by_genre(genre_id).await?;

        Ok(GenreBooksResponse {
            genre: GenreResponse::from(genre),
            books: books.into_iter().map(BookResponse::from).collect(),
        })
    }

    /// Partially update an active book
    #[instrument(skip(self, request))]
    pub async fn update_book(
        &self,
        book_id: i64,
        request: UpdateBookRequest,
    ) -> ServiceResult<BookResponse> {
        let changes: BookChanges = request.into_changes()?;

        let mut tx = self.ctx.store().begin().await?;
        let mut book = require_active(tx.lock_book(book_id).await?, || {
            DomainError::BookNotFound(book_id)
        })?;

        if changes.is_empty() {
            return Ok(BookResponse::from(book));
        }

        if let Some(title) = changes.title.as_deref().filter(|t| *t != book.title) {
            let clash = tx.find_book_by_title(title, Some(book_id)).await?;
            ensure_key_available(
                clash.as_ref(),
                book_id,
                || DomainError::BookTitleTaken(title.to_string()),
                || DomainError::BookTitleArchived(title.to_string()),
            )?;
        }

        if let Some(genre_id) = changes.genre_id.filter(|id| *id != book.genre_id) {
            check_genre(tx.as_mut(), genre_id).await?;
        }

        book.apply(changes);
        let book = tx.save_book(&book).await?;
        tx.commit().await?;

        info!(book_id, "Book updated");
        Ok(BookResponse::from(book))
    }

    /// Soft delete a book that no order references
    #[instrument(skip(self))]
    pub async fn delete_book(&self, book_id: i64) -> ServiceResult<()> {
        let mut tx = self.ctx.store().begin().await?;
        let mut book = require_active(tx.lock_book(book_id).await?, || {
            DomainError::BookNotFound(book_id)
        })?;

        let items = tx.count_order_items_for_book(book_id).await?;
        guard::ensure_book_unreferenced(book_id, items)?;

        book.mark_deleted();
        tx.save_book(&book).await?;
        tx.commit().await?;

        info!(book_id, "Book deleted");
        Ok(())
    }
}

/// Lock the referenced genre so it cannot be deleted under us
async fn check_genre(tx: &mut dyn StoreTransaction, genre_id: i64) -> ServiceResult<()> {
    let genre = tx.lock_genre(genre_id).await?;
    guard::require_genre(genre.as_ref(), genre_id)?;
    Ok(())
}
