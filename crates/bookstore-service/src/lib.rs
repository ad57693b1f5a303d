//! # bookstore-service
//!
//! Application layer: one service per resource, each mutation run inside a
//! single store transaction, plus the request/response DTOs of the HTTP API.

pub mod dto;
pub mod services;

#[cfg(test)]
mod testing;

pub use services::{
    AuthService, BookService, GenreService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, TransactionService,
};
