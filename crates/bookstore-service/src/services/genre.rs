//! Genre service
//!
//! Create restores a soft-deleted genre holding the same name; delete is
//! refused while any active book still points at the genre. Soft-deleted
//! books do not hold it.

use bookstore_core::guard;
use bookstore_core::lifecycle::{
    ensure_key_available, normalize_key, plan_create, require_active, CreatePlan, Written,
};
use bookstore_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{CreateGenreRequest, GenreResponse, UpdateGenreRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Genre service
pub struct GenreService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GenreService<'a> {
    /// Create a new GenreService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a genre, or bring back the deleted genre with this name
    #[instrument(skip(self, request))]
    pub async fn create_genre(
        &self,
        request: CreateGenreRequest,
    ) -> ServiceResult<Written<GenreResponse>> {
        let name = normalize_key("name", &request.name)?;

        let mut tx = self.ctx.store().begin().await?;
        let existing = tx.find_genre_by_name(&name, None).await?;
        let written = match plan_create(existing, |g| DomainError::GenreNameTaken(g.name.clone()))? {
            CreatePlan::Insert => Written::created(tx.insert_genre(&name).await?),
            CreatePlan::Restore(mut genre) => {
                genre.restore(name);
                Written::restored(tx.save_genre(&genre).await?)
            }
        };
        tx.commit().await?;

        info!(
            genre_id = written.value.id,
            restored = written.outcome.is_restored(),
            "Genre saved"
        );
        Ok(written.map(GenreResponse::from))
    }

    /// Active genres, newest first
    #[instrument(skip(self))]
    pub async fn list_genres(&self) -> ServiceResult<Vec<GenreResponse>> {
        let genres = self.ctx.genre_repo().list().await?;
        Ok(genres.into_iter().map(GenreResponse::from).collect())
    }

    /// Get an active genre
    #[instrument(skip(self))]
    pub async fn get_genre(&self, genre_id: i64) -> ServiceResult<GenreResponse> {
        self.ctx
            .genre_repo()
            .find_by_id(genre_id)
            .await?
            .map(GenreResponse::from)
            .ok_or_else(|| DomainError::GenreNotFound(genre_id).into())
    }

    /// Rename an active genre
    #[instrument(skip(self, request))]
    pub async fn update_genre(
        &self,
        genre_id: i64,
        request: UpdateGenreRequest,
    ) -> ServiceResult<GenreResponse> {
        let name = request
            .name
            .map(|raw| normalize_key("name", &raw))
            .transpose()?;

        let mut tx = self.ctx.store().begin().await?;
        let mut genre = require_active(tx.lock_genre(genre_id).await?, || {
            DomainError::GenreNotFound(genre_id)
        })?;

        let Some(name) = name.filter(|n| *n != genre.name) else {
            return Ok(GenreResponse::from(genre));
        };

        let clash = tx.find_genre_by_name(&name, Some(genre_id)).await?;
        ensure_key_available(
            clash.as_ref(),
            genre_id,
            || DomainError::GenreNameTaken(name.clone()),
            || DomainError::GenreNameArchived(name.clone()),
        )?;

        genre.rename(name);
        let genre = tx.save_genre(&genre).await?;
        tx.commit().await?;

        info!(genre_id, "Genre updated");
        Ok(GenreResponse::from(genre))
    }

    /// Soft delete a genre nothing references
    #[instrument(skip(self))]
    pub async fn delete_genre(&self, genre_id: i64) -> ServiceResult<()> {
        let mut tx = self.ctx.store().begin().await?;
        let mut genre = require_active(tx.lock_genre(genre_id).await?, || {
            DomainError::GenreNotFound(genre_id)
        })?;

        let books = tx.count_books_in_genre(genre_id).await?;
        guard::ensure_genre_unreferenced(genre_id, books)?;

        genre.mark_deleted();
        tx.save_genre(&genre).await?;
        tx.commit().await?;

        info!(genre_id, "Genre deleted");
        Ok(())
    }
}
