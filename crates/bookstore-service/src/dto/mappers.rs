//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use bookstore_common::AccessToken;
use bookstore_core::entities::{Book, Genre, OrderDetails, OrderLine, User};
use bookstore_core::statistics::{GenreFrequency, OrderSummary, TransactionStatistics};

use super::responses::{
    AuthResponse, BookResponse, GenreFrequencyResponse, GenreResponse, StatisticsResponse,
    TransactionItemResponse, TransactionResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl AuthResponse {
    pub fn new(token: AccessToken, user: &User) -> Self {
        Self {
            token: token.token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            user: UserResponse::from(user),
        }
    }
}

// ============================================================================
// Catalog Mappers
// ============================================================================

impl From<&Genre> for GenreResponse {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name.clone(),
            created_at: genre.created_at,
            updated_at: genre.updated_at,
        }
    }
}

impl From<Genre> for GenreResponse {
    fn from(genre: Genre) -> Self {
        Self::from(&genre)
    }
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            writer: book.writer,
            publisher: book.publisher,
            publication_year: book.publication_year,
            price: book.price,
            stock_quantity: book.stock_quantity,
            genre_id: book.genre_id,
            description: book.description,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

// ============================================================================
// Transaction Mappers
// ============================================================================

impl From<OrderLine> for TransactionItemResponse {
    fn from(line: OrderLine) -> Self {
        let subtotal = line.subtotal();
        Self {
            id: line.item.id,
            book_id: line.item.book_id,
            book_title: line.book_title,
            price: line.book_price,
            quantity: line.item.quantity,
            subtotal,
            genre: line.genre_name,
        }
    }
}

impl From<OrderSummary> for TransactionResponse {
    fn from(summary: OrderSummary) -> Self {
        let OrderSummary { details, totals } = summary;
        Self {
            id: details.order.id,
            user_id: details.order.user_id,
            items: details
                .lines
                .into_iter()
                .map(TransactionItemResponse::from)
                .collect(),
            total: totals.total,
            average_price: totals.average_price,
            item_count: totals.item_count,
            created_at: details.order.created_at,
            updated_at: details.order.updated_at,
        }
    }
}

impl From<OrderDetails> for TransactionResponse {
    fn from(details: OrderDetails) -> Self {
        Self::from(OrderSummary::from(details))
    }
}

impl From<GenreFrequency> for GenreFrequencyResponse {
    fn from(entry: GenreFrequency) -> Self {
        Self {
            genre: entry.genre,
            transactions: entry.orders,
        }
    }
}

impl From<TransactionStatistics> for StatisticsResponse {
    fn from(stats: TransactionStatistics) -> Self {
        Self {
            total_transactions: stats.total_transactions,
            average_transaction_value: stats.average_transaction_value,
            top_genre: stats.top_genre,
            least_genre: stats.least_genre,
            genre_frequency: stats
                .genre_frequency
                .into_iter()
                .map(GenreFrequencyResponse::from)
                .collect(),
        }
    }
}
