//! Value objects - validated numeric types used by books and orders

mod price;
mod quantity;

pub use price::Price;
pub use quantity::{Quantity, StockQuantity};
