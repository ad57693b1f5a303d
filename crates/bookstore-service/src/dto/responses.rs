//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Every body is
//! wrapped in [`ApiResponse`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use bookstore_core::query::Page;

// ============================================================================
// Common Response Types
// ============================================================================

/// Envelope shared by every response
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
        }
    }

    /// Failure carrying a machine-readable code
    pub fn failure(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(code.into()),
        }
    }
}

/// Offset-paginated list
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl<T, E> From<Page<E>> for PaginatedResponse<T>
where
    T: From<E>,
{
    fn from(page: Page<E>) -> Self {
        let pagination = PaginationMeta {
            page: page.page,
            limit: page.limit,
            total: page.total,
            total_pages: page.total_pages(),
        };
        Self {
            items: page.items.into_iter().map(T::from).collect(),
            pagination,
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with an access token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Registered user (never carries the password hash)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Catalog Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct GenreResponse {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookResponse {
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
}

/// A genre with its active books
#[derive(Debug, Serialize)]
pub struct GenreBooksResponse {
    pub genre: GenreResponse,
    pub books: Vec<BookResponse>,
}

// ============================================================================
// Transaction Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TransactionItemResponse {
    pub id: i64,
    pub book_id: i64,
    pub book_title: String,
    pub price: f64,
    pub quantity: i32,
    pub subtotal: f64,
    pub genre: Option<String>,
}

/// Order with computed totals
#[derive(Debug, Clone, Serialize)]
pub struct TransactionResponse {
    pub id: i64,
    pub user_id: i64,
    pub items: Vec<TransactionItemResponse>,
    pub total: f64,
    pub average_price: f64,
    pub item_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenreFrequencyResponse {
    pub genre: String,
    pub transactions: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatisticsResponse {
    pub total_transactions: u64,
    pub average_transaction_value: f64,
    pub top_genre: Option<String>,
    pub least_genre: Option<String>,
    pub genre_frequency: Vec<GenreFrequencyResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness check
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: &'static str,
}

impl ReadinessResponse {
    pub fn new(database_ok: bool) -> Self {
        Self {
            status: if database_ok { "ready" } else { "not_ready" },
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_ok { "ok" } else { "unavailable" },
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.checks.database == "ok"
    }
}
