//! Genre model -> entity

use bookstore_core::entities::Genre;

use crate::models::GenreModel;

impl From<GenreModel> for Genre {
    fn from(model: GenreModel) -> Self {
        Genre {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
