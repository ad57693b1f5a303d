//! Order entities - a customer's purchase and its line items
//!
//! Orders are immutable once created. Each line carries the book data needed by
//! the transaction aggregator so totals never require a second lookup.

use chrono::{DateTime, Utc};

use crate::value_objects::Quantity;

/// Order header ("transaction" at the HTTP boundary)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single item of an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub book_id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An order item joined with the book it references.
///
/// The book is read in any state, so orders keep resolving after the book or
/// its genre is soft deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub item: OrderItem,
    pub book_title: String,
    pub book_price: f64,
    pub genre_name: Option<String>,
}

impl OrderLine {
    /// quantity x price for this line
    pub fn subtotal(&self) -> f64 {
        f64::from(self.item.quantity) * self.book_price
    }
}

/// Order with its lines, ordered by item id
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

/// Requested item of a new order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub book_id: i64,
    pub quantity: Quantity,
}
