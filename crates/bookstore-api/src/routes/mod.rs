//! Route definitions
//!
//! All API routes organized by resource and mounted at the root.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, books, genres, health, transactions};
use crate::response::fallback;
use crate::state::AppState;

/// Create the main router with every route
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(genre_routes())
        .merge(book_routes())
        .merge(transaction_routes())
        .fallback(fallback)
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
}

/// Genre routes
fn genre_routes() -> Router<AppState> {
    Router::new()
        .route("/genre", post(genres::create_genre).get(genres::list_genres))
        .route(
            "/genre/:id",
            get(genres::get_genre)
                .patch(genres::update_genre)
                .delete(genres::delete_genre),
        )
}

/// Book routes
fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/books", post(books::create_book).get(books::list_books))
        .route("/books/genre/:genre_id", get(books::books_by_genre))
        .route(
            "/books/:id",
            get(books::get_book)
                .patch(books::update_book)
                .delete(books::delete_book),
        )
}

/// Transaction routes
fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/transactions",
            post(transactions::create_transaction).get(transactions::list_transactions),
        )
        .route("/transactions/statistics", get(transactions::statistics))
        .route("/transactions/:id", get(transactions::get_transaction))
}
