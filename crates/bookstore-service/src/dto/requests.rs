//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; bodies also implement `Validate`
//! for shape checks. Domain rules (non-negative price, integral stock,
//! positive quantity) are applied when a DTO is converted into its domain type.

use serde::{Deserialize, Deserializer};
use validator::Validate;

use bookstore_core::entities::{BookChanges, BookDraft, NewOrderItem};
use bookstore_core::error::DomainError;
use bookstore_core::lifecycle::normalize_key;
use bookstore_core::query::{BookQuery, PageRequest, SortOrder};
use bookstore_core::statistics::SummarySort;
use bookstore_core::value_objects::{Price, Quantity, StockQuantity};

const MAX_DESCRIPTION_LENGTH: usize = 5000;

/// Distinguish an explicit `null` (`Some(None)`) from an absent field (`None`)
fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn required_text(field: &str, raw: &str) -> Result<String, DomainError> {
    normalize_key(field, raw)
}

fn check_description(description: Option<&str>) -> Result<(), DomainError> {
    match description {
        Some(text) if text.chars().count() > MAX_DESCRIPTION_LENGTH => {
            Err(DomainError::ValidationError(format!(
                "description must be at most {MAX_DESCRIPTION_LENGTH} characters"
            )))
        }
        _ => Ok(()),
    }
}

fn parse_sort(raw: Option<&str>) -> Result<Option<SortOrder>, DomainError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .transpose()
}

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 50, message = "Username must be 2-50 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Genre Requests
// ============================================================================

/// Create (or restore) genre request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGenreRequest {
    #[validate(length(min = 1, max = 100, message = "Genre name must be 1-100 characters"))]
    pub name: String,
}

/// Partial genre update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGenreRequest {
    #[validate(length(min = 1, max = 100, message = "Genre name must be 1-100 characters"))]
    pub name: Option<String>,
}

// ============================================================================
// Book Requests
// ============================================================================

/// Create (or restore) book request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 255, message = "Writer must be 1-255 characters"))]
    pub writer: String,

    #[validate(length(min = 1, max = 255, message = "Publisher must be 1-255 characters"))]
    pub publisher: String,

    #[serde(alias = "publicationYear")]
    #[validate(range(min = 0, max = 9999, message = "Publication year must be 0-9999"))]
    pub publication_year: i32,

    pub price: f64,

    /// Validated as a non-negative integer on conversion
    #[serde(alias = "stockQuantity")]
    pub stock_quantity: f64,

    #[serde(alias = "genreId")]
    pub genre_id: i64,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,
}

impl CreateBookRequest {
    /// Apply domain validation
    pub fn into_draft(self) -> Result<BookDraft, DomainError> {
        Ok(BookDraft {
            title: required_text("title", &self.title)?,
            writer: required_text("writer", &self.writer)?,
            publisher: required_text("publisher", &self.publisher)?,
            publication_year: self.publication_year,
            price: Price::new(self.price)?,
            stock_quantity: StockQuantity::from_number(self.stock_quantity)?,
            genre_id: self.genre_id,
            description: self.description,
        })
    }
}

/// Partial book update. Absent fields are untouched; `"description": null` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBookRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Writer must be 1-255 characters"))]
    pub writer: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Publisher must be 1-255 characters"))]
    pub publisher: Option<String>,

    #[serde(alias = "publicationYear")]
    #[validate(range(min = 0, max = 9999, message = "Publication year must be 0-9999"))]
    pub publication_year: Option<i32>,

    pub price: Option<f64>,

    #[serde(alias = "stockQuantity")]
    pub stock_quantity: Option<f64>,

    #[serde(alias = "genreId")]
    pub genre_id: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
}

impl UpdateBookRequest {
    /// Validate every present field independently
    pub fn into_changes(self) -> Result<BookChanges, DomainError> {
        if let Some(description) = &self.description {
            check_description(description.as_deref())?;
        }
        Ok(BookChanges {
            title: self
                .title
                .map(|t| required_text("title", &t))
                .transpose()?,
            writer: self
                .writer
                .map(|w| required_text("writer", &w))
                .transpose()?,
            publisher: self
                .publisher
                .map(|p| required_text("publisher", &p))
                .transpose()?,
            publication_year: self.publication_year,
            price: self.price.map(Price::new).transpose()?,
            stock_quantity: self
                .stock_quantity
                .map(StockQuantity::from_number)
                .transpose()?,
            genre_id: self.genre_id,
            description: self.description,
        })
    }
}

/// Book listing query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookListQuery {
    pub search: Option<String>,
    #[serde(rename = "minPrice", alias = "min_price")]
    pub min_price: Option<f64>,
    #[serde(rename = "maxPrice", alias = "max_price")]
    pub max_price: Option<f64>,
    pub year: Option<i32>,
    #[serde(rename = "sortBy", alias = "sort_by")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder", alias = "sort_order")]
    pub sort_order: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl BookListQuery {
    pub fn into_query(self) -> Result<BookQuery, DomainError> {
        let sort_by = match self.sort_by.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.parse()?,
            _ => Default::default(),
        };
        BookQuery {
            search: self.search,
            min_price: self.min_price,
            max_price: self.max_price,
            year: self.year,
            sort_by,
            sort_order: parse_sort(self.sort_order.as_deref())?.unwrap_or_default(),
            page: PageRequest::new(self.page, self.limit)?,
        }
        .normalized()
    }
}

// ============================================================================
// Transaction Requests
// ============================================================================

/// One requested item
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionItemRequest {
    #[serde(alias = "bookId")]
    pub book_id: i64,
    /// Validated as a positive integer on conversion
    pub quantity: f64,
}

/// Create transaction request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTransactionRequest {
    pub items: Vec<TransactionItemRequest>,
}

impl CreateTransactionRequest {
    pub fn into_items(self) -> Result<Vec<NewOrderItem>, DomainError> {
        self.items
            .into_iter()
            .map(|item| {
                Ok(NewOrderItem {
                    book_id: item.book_id,
                    quantity: Quantity::from_number(item.quantity)?,
                })
            })
            .collect()
    }
}

/// Transaction listing query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    #[serde(rename = "orderByAmount", alias = "order_by_amount")]
    pub order_by_amount: Option<String>,
    #[serde(rename = "orderByPrice", alias = "order_by_price")]
    pub order_by_price: Option<String>,
}

impl TransactionListQuery {
    pub fn page_request(&self) -> Result<PageRequest, DomainError> {
        PageRequest::new(self.page, self.limit)
    }

    /// `orderByAmount` wins over `orderByPrice`
    pub fn sort(&self) -> Result<Option<SummarySort>, DomainError> {
        Ok(SummarySort::from_params(
            parse_sort(self.order_by_amount.as_deref())?,
            parse_sort(self.order_by_price.as_deref())?,
        ))
    }

    /// Lowercased, trimmed search term; `None` when blank
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}
