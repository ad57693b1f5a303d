//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod auth;
pub mod books;
pub mod genres;
pub mod health;
pub mod transactions;
