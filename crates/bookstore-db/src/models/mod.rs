//! Database models - SQLx-compatible structs for PostgreSQL tables

pub(crate) mod book;
mod genre;
mod order;
mod user;

pub use book::BookModel;
pub use genre::GenreModel;
pub use order::{OrderItemModel, OrderLineModel, OrderModel};
pub use user::UserModel;
