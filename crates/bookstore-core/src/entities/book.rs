//! Book entity - a soft-deletable catalog entry keyed by title

use chrono::{DateTime, Utc};

use crate::lifecycle::SoftDeletable;
use crate::value_objects::{Price, StockQuantity};

/// Book entity
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
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

/// Validated field set used to insert a book or overwrite a restored one.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub title: String,
    pub writer: String,
    pub publisher: String,
    pub publication_year: i32,
    pub price: Price,
    pub stock_quantity: StockQuantity,
    pub genre_id: i64,
    pub description: Option<String>,
}

/// Partial update. `None` leaves a field untouched; `description: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub writer: Option<String>,
    pub publisher: Option<String>,
    pub publication_year: Option<i32>,
    pub price: Option<Price>,
    pub stock_quantity: Option<StockQuantity>,
    pub genre_id: Option<i64>,
    pub description: Option<Option<String>>,
}

impl BookChanges {
    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Book {
    /// Check whether the book is visible to reads and orderable
    #[inline]
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Overwrite every mutable field from a draft and clear the deletion mark
    pub fn restore(&mut self, draft: BookDraft) {
        self.title = draft.title;
        self.writer = draft.writer;
        self.publisher = draft.publisher;
        self.publication_year = draft.publication_year;
        self.price = draft.price.value();
        self.stock_quantity = draft.stock_quantity.value();
        self.genre_id = draft.genre_id;
        self.description = draft.description;
        self.deleted_at = None;
        self.updated_at = Utc::now();
    }

    /// Apply a partial update
    pub fn apply(&mut self, changes: BookChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(writer) = changes.writer {
            self.writer = writer;
        }
        if let Some(publisher) = changes.publisher {
            self.publisher = publisher;
        }
        if let Some(year) = changes.publication_year {
            self.publication_year = year;
        }
        if let Some(price) = changes.price {
            self.price = price.value();
        }
        if let Some(stock) = changes.stock_quantity {
            self.stock_quantity = stock.value();
        }
        if let Some(genre_id) = changes.genre_id {
            self.genre_id = genre_id;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        self.updated_at = Utc::now();
    }

    /// Mark the book as deleted
    pub fn mark_deleted(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}

impl SoftDeletable for Book {
    fn id(&self) -> i64 {
        self.id
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}
