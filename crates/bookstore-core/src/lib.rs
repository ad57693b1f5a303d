//! # bookstore-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! rules that govern them: the soft-delete lifecycle, the referential guard, and
//! the transaction aggregator.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod guard;
pub mod lifecycle;
pub mod query;
pub mod statistics;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Book, BookChanges, BookDraft, Genre, NewOrderItem, NewUser, Order, OrderDetails, OrderItem,
    OrderLine, User,
};
pub use error::DomainError;
pub use lifecycle::{CreatePlan, SoftDeletable, WriteOutcome, Written};
pub use query::{BookQuery, BookSortField, Page, PageRequest, SortOrder};
pub use statistics::{
    GenreFrequency, OrderSummary, OrderTotals, SummarySort, TransactionStatistics,
};
pub use traits::{
    BookRepository, GenreRepository, OrderRepository, RepoResult, Store, StoreTransaction,
    UserRepository,
};
pub use value_objects::{Price, Quantity, StockQuantity};
