//! Genre handlers

use axum::extract::State;
use bookstore_service::dto::{CreateGenreRequest, GenreResponse, UpdateGenreRequest};
use bookstore_service::GenreService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Done, Saved, Success};
use crate::state::AppState;

/// Create a genre, restoring a deleted one with the same name
///
/// POST /genre
pub async fn create_genre(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateGenreRequest>,
) -> ApiResult<Saved<GenreResponse>> {
    let service = GenreService::new(state.service_context());
    let written = service.create_genre(request).await?;
    Ok(Saved::new("Genre", written))
}

/// List active genres
///
/// GET /genre
pub async fn list_genres(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Success<Vec<GenreResponse>>> {
    let service = GenreService::new(state.service_context());
    let genres = service.list_genres().await?;
    Ok(Success::new("Genres retrieved successfully", genres))
}

/// GET /genre/{id}
pub async fn get_genre(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(genre_id): IdPath,
) -> ApiResult<Success<GenreResponse>> {
    let service = GenreService::new(state.service_context());
    let genre = service.get_genre(genre_id).await?;
    Ok(Success::new("Genre retrieved successfully", genre))
}

/// PATCH /genre/{id}
pub async fn update_genre(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(genre_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateGenreRequest>,
) -> ApiResult<Success<GenreResponse>> {
    let service = GenreService::new(state.service_context());
    let genre = service.update_genre(genre_id, request).await?;
    Ok(Success::new("Genre updated successfully", genre))
}

/// Soft delete a genre that no active book points at
///
/// DELETE /genre/{id}
pub async fn delete_genre(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(genre_id): IdPath,
) -> ApiResult<Done> {
    let service = GenreService::new(state.service_context());
    service.delete_genre(genre_id).await?;
    Ok(Done("Genre deleted successfully"))
}
