//! Integral counts: book stock and order item quantity
//!
//! Both arrive from JSON as plain numbers, so they are validated from `f64`
//! to reject fractional input such as `2.5` with a domain error rather than a
//! generic decode failure.

use crate::error::DomainError;

fn integral(value: f64) -> Option<i32> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    Some(value as i32)
}

/// Stock on hand: a non-negative integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct StockQuantity(i32);

impl StockQuantity {
    pub fn new(value: i32) -> Result<Self, DomainError> {
        if value < 0 {
            return Err(DomainError::InvalidStockQuantity(
                "stock_quantity must not be negative".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Validate a JSON number
    pub fn from_number(value: f64) -> Result<Self, DomainError> {
        let value = integral(value).ok_or_else(|| {
            DomainError::InvalidStockQuantity("stock_quantity must be an integer".to_string())
        })?;
        Self::new(value)
    }

    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }
}

/// Quantity of a book in an order: a positive integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(i32);

impl Quantity {
    pub fn new(value: i32) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::InvalidQuantity(
                "quantity must be a positive integer".to_string(),
            ));
        }
        Ok(Self(value))
    }

    pub fn from_number(value: f64) -> Result<Self, DomainError> {
        let value = integral(value).ok_or_else(|| {
            DomainError::InvalidQuantity("quantity must be a positive integer".to_string())
        })?;
        Self::new(value)
    }

    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }
}
