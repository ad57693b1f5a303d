//! Service layer
//!
//! Each service borrows the shared [`ServiceContext`]. Mutations open one store
//! transaction, run the lifecycle and guard checks, write, and commit.

pub mod auth;
pub mod book;
pub mod context;
pub mod error;
pub mod genre;
pub mod transaction;

pub use auth::AuthService;
pub use book::BookService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use genre::GenreService;
pub use transaction::TransactionService;
