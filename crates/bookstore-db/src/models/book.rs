//! Book database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for books table
#[derive(Debug, Clone, FromRow)]
pub struct BookModel {
    pub id: i64,
    pub title: String,
    pub writer: String,
    pub publisher: String,
    pub publication_year: i32,
    pub price: f64,
    pub stock_quantity: i32,
    pub genre_id: i64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Column list shared by every books query
pub(crate) const BOOK_COLUMNS: &str = "id, title, writer, publisher, publication_year, price, \
     stock_quantity, genre_id, description, created_at, updated_at, deleted_at";
