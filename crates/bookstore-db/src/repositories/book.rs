//! PostgreSQL implementation of BookRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use bookstore_core::entities::Book;
use bookstore_core::query::{BookQuery, Page};
use bookstore_core::traits::{BookRepository, RepoResult};

use crate::models::book::BOOK_COLUMNS;
use crate::models::BookModel;

use super::error::{escape_like, map_db_error};

/// PostgreSQL implementation of BookRepository
#[derive(Clone)]
pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the WHERE conditions of a listing after `WHERE deleted_at IS NULL`
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &BookQuery) {
    if let Some(search) = &query.search {
        let pattern = format!("%{}%", escape_like(search));
        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR writer ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR publisher ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(min) = query.min_price {
        builder.push(" AND price >= ").push_bind(min);
    }
    if let Some(max) = query.max_price {
        builder.push(" AND price <= ").push_bind(max);
    }
    if let Some(year) = query.year {
        builder.push(" AND publication_year = ").push_bind(year);
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Book>> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1 AND deleted_at IS NULL");
        let result = sqlx::query_as::<_, BookModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Book::from))
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &BookQuery) -> RepoResult<Page<Book>> {
        let mut count = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM books WHERE deleted_at IS NULL",
        );
        push_filters(&mut count, query);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let mut select = QueryBuilder::<Postgres>::new(format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE deleted_at IS NULL"
        ));
        push_filters(&mut select, query);
        // Column and direction come from closed enums, never from raw input.
        let direction = query.sort_order.as_sql();
        select
            .push(format!(
                " ORDER BY {} {direction}, id {direction}",
                query.sort_by.column()
            ))
            .push(" LIMIT ")
            .push_bind(i64::from(query.page.limit))
            .push(" OFFSET ")
            .push_bind(query.page.offset());

        let rows = select
            .build_query_as::<BookModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(
            rows.into_iter().map(Book::from).collect(),
            query.page,
            total.max(0) as u64,
        ))
    }

    #[instrument(skip(self))]
    async fn find_by_genre(&self, genre_id: i64) -> RepoResult<Vec<Book>> {
        let sql = format!(
            "SELECT {BOOK_COLUMNS} FROM books \
             WHERE genre_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at DESC, id DESC"
        );
        let results = sqlx::query_as::<_, BookModel>(&sql)
            .bind(genre_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Book::from).collect())
    }
}
