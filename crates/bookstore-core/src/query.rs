//! Listing parameters: pagination, sorting, and the book search filter

use std::str::FromStr;

use crate::error::DomainError;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(DomainError::ValidationError(format!(
                "sort order must be 'asc' or 'desc', got '{other}'"
            ))),
        }
    }
}

/// Whitelisted book sort columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookSortField {
    Title,
    Writer,
    Price,
    PublicationYear,
    StockQuantity,
    #[default]
    CreatedAt,
}

impl BookSortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Writer => "writer",
            Self::Price => "price",
            Self::PublicationYear => "publication_year",
            Self::StockQuantity => "stock_quantity",
            Self::CreatedAt => "created_at",
        }
    }
}

impl FromStr for BookSortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "writer" => Ok(Self::Writer),
            "price" => Ok(Self::Price),
            "publication_year" | "publicationYear" => Ok(Self::PublicationYear),
            "stock_quantity" | "stockQuantity" => Ok(Self::StockQuantity),
            "created_at" | "createdAt" => Ok(Self::CreatedAt),
            other => Err(DomainError::ValidationError(format!(
                "cannot sort books by '{other}'"
            ))),
        }
    }
}

/// 1-based page and a clamped page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Page must be at least 1; limit is clamped to `1..=MAX_PAGE_SIZE`
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Result<Self, DomainError> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(DomainError::ValidationError(
                "page must be at least 1".to_string(),
            ));
        }
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        Ok(Self { page, limit })
    }

    #[inline]
    pub fn offset(self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }
}

/// Filters for the book listing. Deleted books are always excluded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookQuery {
    /// Case-insensitive partial match on title, writer, or publisher
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub year: Option<i32>,
    pub sort_by: BookSortField,
    pub sort_order: SortOrder,
    pub page: PageRequest,
}

impl BookQuery {
    /// Reject inverted or negative price bounds and drop a blank search
    pub fn normalized(mut self) -> Result<Self, DomainError> {
        for bound in [self.min_price, self.max_price].into_iter().flatten() {
            if !bound.is_finite() || bound < 0.0 {
                return Err(DomainError::ValidationError(
                    "price bounds must be non-negative numbers".to_string(),
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(DomainError::ValidationError(
                    "minPrice must not exceed maxPrice".to_string(),
                ));
            }
        }
        self.search = self
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(self)
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page,
            limit: request.limit,
            total,
        }
    }

    /// Slice an already materialised, already ordered list
    pub fn from_vec(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit as usize)
            .collect();
        Self::new(items, request, total)
    }

    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.limit))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
        }
    }
}
