//! Repository implementations
//!
//! PostgreSQL implementations of the read repositories and the transactional
//! store defined in bookstore-core.

mod book;
mod error;
mod genre;
mod order;
mod store;
mod user;

pub use book::PgBookRepository;
pub use genre::PgGenreRepository;
pub use order::PgOrderRepository;
pub use store::{PgStore, PgStoreTransaction};
pub use user::PgUserRepository;
