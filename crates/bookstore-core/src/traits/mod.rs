//! Ports implemented by the infrastructure layer

mod repositories;
mod store;

pub use repositories::{
    BookRepository, GenreRepository, OrderRepository, RepoResult, UserRepository,
};
pub use store::{Store, StoreTransaction};
