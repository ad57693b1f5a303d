//! Service context - dependency container for services
//!
//! Holds the transactional store, the read repositories, and the auth helpers.

use std::sync::Arc;

use bookstore_common::auth::{JwtService, PasswordService};
use bookstore_core::traits::{
    BookRepository, GenreRepository, OrderRepository, Store, UserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Reads go through the repositories; every write goes through a
/// transaction opened on `store`. Both are trait objects so tests can swap in
/// an in-memory backend.
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn Store>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    genre_repo: Arc<dyn GenreRepository>,
    book_repo: Arc<dyn BookRepository>,
    order_repo: Arc<dyn OrderRepository>,

    // Auth
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
}

impl ServiceContext {
    pub fn new(
        store: Arc<dyn Store>,
        user_repo: Arc<dyn UserRepository>,
        genre_repo: Arc<dyn GenreRepository>,
        book_repo: Arc<dyn BookRepository>,
        order_repo: Arc<dyn OrderRepository>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            store,
            user_repo,
            genre_repo,
            book_repo,
            order_repo,
            jwt_service,
            password_service: PasswordService::new(),
        }
    }

    /// Get the transactional store
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn genre_repo(&self) -> &dyn GenreRepository {
        self.genre_repo.as_ref()
    }

    pub fn book_repo(&self) -> &dyn BookRepository {
        self.book_repo.as_ref()
    }

    pub fn order_repo(&self) -> &dyn OrderRepository {
        self.order_repo.as_ref()
    }

    // === Auth ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("store", &"dyn Store")
            .field("repositories", &"...")
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn Store>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    genre_repo: Option<Arc<dyn GenreRepository>>,
    book_repo: Option<Arc<dyn BookRepository>>,
    order_repo: Option<Arc<dyn OrderRepository>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Arc<dyn Store>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn genre_repo(mut self, repo: Arc<dyn GenreRepository>) -> Self {
        self.genre_repo = Some(repo);
        self
    }

    pub fn book_repo(mut self, repo: Arc<dyn BookRepository>) -> Self {
        self.book_repo = Some(repo);
        self
    }

    pub fn order_repo(mut self, repo: Arc<dyn OrderRepository>) -> Self {
        self.order_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.store
                .ok_or_else(|| ServiceError::internal("store is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::internal("user_repo is required"))?,
            self.genre_repo
                .ok_or_else(|| ServiceError::internal("genre_repo is required"))?,
            self.book_repo
                .ok_or_else(|| ServiceError::internal("book_repo is required"))?,
            self.order_repo
                .ok_or_else(|| ServiceError::internal("order_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::internal("jwt_service is required"))?,
        ))
    }
}
