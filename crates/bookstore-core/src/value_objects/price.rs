//! Book price

use std::fmt;

use crate::error::DomainError;

/// Non-negative, finite price
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Price(f64);

impl Price {
    /// Validate a raw price
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::InvalidPrice(
                "price must be a finite number".to_string(),
            ));
        }
        if value < 0.0 {
            return Err(DomainError::InvalidPrice(
                "price must not be negative".to_string(),
            ));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Price {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
