//! Test fixtures and data generators
//!
//! Provides reusable request bodies and response shapes for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Per-process prefix so names stay unique across runs against the same database
fn run_id() -> i64 {
    static RUN_ID: OnceLock<i64> = OnceLock::new();
    *RUN_ID.get_or_init(|| chrono::Utc::now().timestamp_micros())
}

/// Get a unique suffix for test data
pub fn unique_suffix() -> String {
    format!("{}-{}", run_id(), COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Response envelope
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("reader{suffix}"),
            email: format!("reader{suffix}@example.com"),
            password: "TestPass123".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Create genre request
#[derive(Debug, Serialize)]
pub struct CreateGenreRequest {
    pub name: String,
}

impl CreateGenreRequest {
    pub fn unique() -> Self {
        Self {
            name: format!("Genre {}", unique_suffix()),
        }
    }
}

/// Genre response
#[derive(Debug, Deserialize)]
pub struct GenreResponse {
    pub id: i64,
    pub name: String,
}

/// Create book request
#[derive(Debug, Clone, Serialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub writer: String,
    pub publisher: String,
    pub publication_year: i32,
    pub price: f64,
    pub stock_quantity: f64,
    pub genre_id: i64,
    pub description: Option<String>,
}

impl CreateBookRequest {
    pub fn unique(genre_id: i64, price: f64) -> Self {
        Self {
            title: format!("Book {}", unique_suffix()),
            writer: "Frank Herbert".to_string(),
            publisher: "Chilton".to_string(),
            publication_year: 1965,
            price,
            stock_quantity: 5.0,
            genre_id,
            description: None,
        }
    }
}

/// Book response
#[derive(Debug, Deserialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub writer: String,
    pub price: f64,
    pub stock_quantity: i32,
    pub genre_id: i64,
    pub description: Option<String>,
}

/// Genre with its books
#[derive(Debug, Deserialize)]
pub struct GenreBooksResponse {
    pub genre: GenreResponse,
    pub books: Vec<BookResponse>,
}

/// Paginated list
#[derive(Debug, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

/// One requested order item
#[derive(Debug, Serialize)]
pub struct TransactionItemRequest {
    pub book_id: i64,
    pub quantity: f64,
}

/// Create transaction request
#[derive(Debug, Serialize)]
pub struct CreateTransactionRequest {
    pub items: Vec<TransactionItemRequest>,
}

impl CreateTransactionRequest {
    pub fn of(items: &[(i64, f64)]) -> Self {
        Self {
            items: items
                .iter()
                .map(|&(book_id, quantity)| TransactionItemRequest { book_id, quantity })
                .collect(),
        }
    }
}

/// Order item response
#[derive(Debug, Deserialize)]
pub struct TransactionItemResponse {
    pub book_id: i64,
    pub book_title: String,
    pub price: f64,
    pub quantity: i32,
    pub subtotal: f64,
    pub genre: Option<String>,
}

/// Order response
#[derive(Debug, Deserialize)]
pub struct TransactionResponse {
    pub id: i64,
    pub user_id: i64,
    pub items: Vec<TransactionItemResponse>,
    pub total: f64,
    pub average_price: f64,
    pub item_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct GenreFrequency {
    pub genre: String,
    pub transactions: u64,
}

/// Statistics response
#[derive(Debug, Deserialize)]
pub struct StatisticsResponse {
    pub total_transactions: u64,
    pub average_transaction_value: f64,
    pub top_genre: Option<String>,
    pub least_genre: Option<String>,
    pub genre_frequency: Vec<GenreFrequency>,
}
