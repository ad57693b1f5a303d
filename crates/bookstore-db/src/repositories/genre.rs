//! PostgreSQL implementation of GenreRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use bookstore_core::entities::Genre;
use bookstore_core::traits::{GenreRepository, RepoResult};

use crate::models::GenreModel;

use super::error::map_db_error;

/// PostgreSQL implementation of GenreRepository
#[derive(Clone)]
pub struct PgGenreRepository {
    pool: PgPool,
}

impl PgGenreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenreRepository for PgGenreRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Genre>> {
        let result = sqlx::query_as::<_, GenreModel>(
            r"
            SELECT id, name, created_at, updated_at, deleted_at
            FROM genres
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Genre::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Genre>> {
        let results = sqlx::query_as::<_, GenreModel>(
            r"
            SELECT id, name, created_at, updated_at, deleted_at
            FROM genres
            WHERE deleted_at IS NULL
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Genre::from).collect())
    }
}
