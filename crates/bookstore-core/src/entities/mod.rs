//! Domain entities - core business objects

mod book;
mod genre;
mod order;
mod user;

pub use book::{Book, BookChanges, BookDraft};
pub use genre::Genre;
pub use order::{NewOrderItem, Order, OrderDetails, OrderItem, OrderLine};
pub use user::{NewUser, User};
