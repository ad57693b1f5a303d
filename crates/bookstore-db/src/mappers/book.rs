//! Book model -> entity

use bookstore_core::entities::Book;

use crate::models::BookModel;

impl From<BookModel> for Book {
    fn from(model: BookModel) -> Self {
        Book {
            id: model.id,
            title: model.title,
            writer: model.writer,
            publisher: model.publisher,
            publication_year: model.publication_year,
            price: model.price,
            stock_quantity: model.stock_quantity,
            genre_id: model.genre_id,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
