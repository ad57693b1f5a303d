//! Order database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for orders table
#[derive(Debug, Clone, FromRow)]
pub struct OrderModel {
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for order_items table
#[derive(Debug, Clone, FromRow)]
pub struct OrderItemModel {
    pub id: i64,
    pub order_id: i64,
    pub book_id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// order_items row joined with its book and the book's genre
#[derive(Debug, Clone, FromRow)]
pub struct OrderLineModel {
    pub id: i64,
    pub order_id: i64,
    pub book_id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub book_title: String,
    pub book_price: f64,
    pub genre_name: Option<String>,
}
