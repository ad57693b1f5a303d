//! # bookstore-db
//!
//! Database layer implementing the repository and store traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and embedded migrations
//! - Database models with SQLx `FromRow` derives
//! - Model to entity mappers
//! - Read repositories and the transactional [`PgStore`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bookstore_db::{create_pool, run_migrations, PgBookRepository, PoolConfig};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::from_url("postgres://localhost/bookstore")).await?;
//!     run_migrations(&pool).await?;
//!     let books = PgBookRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgBookRepository, PgGenreRepository, PgOrderRepository, PgStore, PgStoreTransaction,
    PgUserRepository,
};
