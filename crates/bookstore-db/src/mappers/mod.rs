//! Model to entity mappers
//!
//! `From<Model> for Entity` converts database rows to domain objects.
//! Orders are assembled from a header query and a lines query.

mod book;
mod genre;
mod order;
mod user;

pub use order::assemble_orders;
