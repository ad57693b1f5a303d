//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    BookListQuery, CreateBookRequest, CreateGenreRequest, CreateTransactionRequest, LoginRequest,
    RegisterRequest, TransactionItemRequest, TransactionListQuery, UpdateBookRequest,
    UpdateGenreRequest,
};

pub use responses::{
    ApiResponse, AuthResponse, BookResponse, GenreBooksResponse, GenreFrequencyResponse,
    GenreResponse, HealthChecks, HealthResponse, PaginatedResponse, PaginationMeta,
    ReadinessResponse, StatisticsResponse, TransactionItemResponse, TransactionResponse,
    UserResponse,
};
