//! Integration test utilities for the bookstore API
//!
//! Spawns the real router on a local port against the database named by
//! `DATABASE_URL` and drives it over HTTP.

pub mod fixtures;

pub use fixtures::*;
pub use helpers::*;
