//! PostgreSQL implementation of OrderRepository
//!
//! Orders are read in two queries: the headers, then every line of those
//! headers joined with its book and genre. Books and genres are joined in any
//! state so historical orders keep their data after a soft delete.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use bookstore_core::entities::OrderDetails;
use bookstore_core::query::{Page, PageRequest};
use bookstore_core::traits::{OrderRepository, RepoResult};

use crate::mappers::assemble_orders;
use crate::models::{OrderLineModel, OrderModel};

use super::error::map_db_error;

/// PostgreSQL implementation of OrderRepository
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn with_lines(&self, orders: Vec<OrderModel>) -> RepoResult<Vec<OrderDetails>> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = orders.iter().map(|order| order.id).collect();

        let lines = sqlx::query_as::<_, OrderLineModel>(
            r"
            SELECT oi.id, oi.order_id, oi.book_id, oi.quantity, oi.created_at, oi.updated_at,
                   b.title AS book_title, b.price AS book_price, g.name AS genre_name
            FROM order_items oi
            JOIN books b ON b.id = oi.book_id
            LEFT JOIN genres g ON g.id = b.genre_id
            WHERE oi.order_id = ANY($1)
            ORDER BY oi.order_id, oi.id
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(assemble_orders(orders, lines))
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<OrderDetails>> {
        let order = sqlx::query_as::<_, OrderModel>(
            "SELECT id, user_id, created_at, updated_at FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match order {
            Some(order) => Ok(self.with_lines(vec![order]).await?.pop()),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<OrderDetails>> {
        let orders = sqlx::query_as::<_, OrderModel>(
            r"
            SELECT id, user_id, created_at, updated_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.with_lines(orders).await
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<OrderDetails>> {
        let orders = sqlx::query_as::<_, OrderModel>(
            r"
            SELECT id, user_id, created_at, updated_at
            FROM orders
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.with_lines(orders).await
    }

    #[instrument(skip(self))]
    async fn page_by_user(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> RepoResult<Page<OrderDetails>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let orders = sqlx::query_as::<_, OrderModel>(
            r"
            SELECT id, user_id, created_at, updated_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user_id)
        .bind(i64::from(page.limit))
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let items = self.with_lines(orders).await?;
        Ok(Page::new(items, page, total.max(0) as u64))
    }
}
