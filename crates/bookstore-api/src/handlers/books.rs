//! Book handlers
//!
//! Endpoints for the book catalog.

use axum::extract::State;
use bookstore_service::dto::{
    BookListQuery, BookResponse, CreateBookRequest, GenreBooksResponse, PaginatedResponse,
    UpdateBookRequest,
};
use bookstore_service::BookService;

use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Done, Saved, Success};
use crate::state::AppState;

/// Create a book, restoring a deleted one with the same title
///
/// POST /books
pub async fn create_book(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateBookRequest>,
) -> ApiResult<Saved<BookResponse>> {
    let service = BookService::new(state.service_context());
    let written = service.create_book(request).await?;
    Ok(Saved::new("Book", written))
}

/// Search, filter and paginate active books
///
/// GET /books
pub async fn list_books(
    State(state): State<AppState>,
    _auth: AuthUser,
    QueryParams(query): QueryParams<BookListQuery>,
) -> ApiResult<Success<PaginatedResponse<BookResponse>>> {
    let service = BookService::new(state.service_context());
    let page = service.list_books(query).await?;
    Ok(Success::new("Books retrieved successfully", page))
}

/// GET /books/{id}
pub async fn get_book(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(book_id): IdPath,
) -> ApiResult<Success<BookResponse>> {
    let service = BookService::new(state.service_context());
    let book = service.get_book(book_id).await?;
    Ok(Success::new("Book retrieved successfully", book))
}

/// Active books of an active genre
///
/// GET /books/genre/{genre_id}
pub async fn books_by_genre(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(genre_id): IdPath,
) -> ApiResult<Success<GenreBooksResponse>> {
    let service = BookService::new(state.service_context());
    let response = service.books_by_genre(genre_id).await?;
    Ok(Success::new("Books retrieved successfully", response))
}

/// PATCH /books/{id}
pub async fn update_book(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(book_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateBookRequest>,
) -> ApiResult<Success<BookResponse>> {
    let service = BookService::new(state.service_context());
    let book = service.update_book(book_id, request).await?;
    Ok(Success::new("Book updated successfully", book))
}

/// Soft delete a book that no order references
///
/// DELETE /books/{id}
pub async fn delete_book(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(book_id): IdPath,
) -> ApiResult<Done> {
    let service = BookService::new(state.service_context());
    service.delete_book(book_id).await?;
    Ok(Done("Book deleted successfully"))
}
