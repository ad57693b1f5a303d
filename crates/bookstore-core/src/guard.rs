//! Referential guard - existence and dependency checks run before any write
//!
//! Every check here is evaluated inside the mutation's store transaction with
//! the referenced rows already locked, and all checks finish before the first
//! write so a failure leaves nothing behind.

use crate::entities::{Book, Genre, NewOrderItem};
use crate::error::DomainError;

/// A book may point at a genre in any state, but the genre must exist
pub fn require_genre(genre: Option<&Genre>, genre_id: i64) -> Result<(), DomainError> {
    match genre {
        Some(_) => Ok(()),
        None => Err(DomainError::InvalidGenreReference(genre_id)),
    }
}

/// A genre with active books cannot be deleted
pub fn ensure_genre_unreferenced(genre_id: i64, book_count: i64) -> Result<(), DomainError> {
    if book_count > 0 {
        return Err(DomainError::GenreHasBooks {
            id: genre_id,
            count: book_count,
        });
    }
    Ok(())
}

/// A book that appears in any order item cannot be deleted
pub fn ensure_book_unreferenced(book_id: i64, item_count: i64) -> Result<(), DomainError> {
    if item_count > 0 {
        return Err(DomainError::BookHasOrders {
            id: book_id,
            count: item_count,
        });
    }
    Ok(())
}

/// The ordering user must exist
pub fn require_user(exists: bool, user_id: i64) -> Result<(), DomainError> {
    if exists {
        Ok(())
    } else {
        Err(DomainError::UserNotFound(user_id))
    }
}

/// An order needs at least one item. Quantities are already positive by type.
pub fn validate_order_items(items: &[NewOrderItem]) -> Result<(), DomainError> {
    if items.is_empty() {
        return Err(DomainError::EmptyOrder);
    }
    Ok(())
}

/// Only active books can be ordered
pub fn require_orderable_book(book: Option<Book>, book_id: i64) -> Result<Book, DomainError> {
    match book {
        Some(book) if book.is_active() => Ok(book),
        _ => Err(DomainError::BookNotFound(book_id)),
    }
}
