//! Transaction service
//!
//! A "transaction" is a customer order with its items. Orders are written in
//! one store transaction after every reference check has passed, and are
//! immutable afterwards.

use std::collections::BTreeSet;

use bookstore_core::guard;
use bookstore_core::query::Page;
use bookstore_core::statistics::{compute_statistics, sort_summaries, OrderSummary};
use bookstore_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{
    CreateTransactionRequest, PaginatedResponse, StatisticsResponse, TransactionListQuery,
    TransactionResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Transaction service
pub struct TransactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TransactionService<'a> {
    /// Create a new TransactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Place an order for the caller
    #[instrument(skip(self, request), fields(items = request.items.len()))]
    pub async fn create_transaction(
        &self,
        user_id: i64,
        request: CreateTransactionRequest,
    ) -> ServiceResult<TransactionResponse> {
        let items = request.into_items()?;
        guard::validate_order_items(&items)?;

        let mut tx = self.ctx.store().begin().await?;
        guard::require_user(tx.lock_user(user_id).await?, user_id)?;

        // Lock in id order so concurrent orders never wait on each other in a cycle
        let book_ids: BTreeSet<i64> = items.iter().map(|item| item.book_id).collect();
        let mut locked = Vec::with_capacity(book_ids.len());
        for book_id in book_ids {
            locked.push((book_id, tx.lock_book(book_id).await?));
        }
        for item in &items {
            let book = locked
                .iter()
                .find(|(id, _)| *id == item.book_id)
                .and_then(|(_, book)| book.clone());
            guard::require_orderable_book(book, item.book_id)?;
        }

        let order = tx.insert_order(user_id).await?;
        for item in &items {
            tx.insert_order_item(order.id, item.book_id, item.quantity)
                .await?;
        }
        tx.commit().await?;

        info!(order_id = order.id, user_id, "Transaction created");

        let details = self
            .ctx
            .order_repo()
            .find_by_id(order.id)
            .await?
            .ok_or_else(|| ServiceError::internal(format!("order {} vanished after commit", order.id)))?;
        Ok(TransactionResponse::from(details))
    }

    /// The caller's orders, optionally searched by book title and sorted by a computed figure
    #[instrument(skip(self, query))]
    pub async fn list_transactions(
        &self,
        user_id: i64,
        query: TransactionListQuery,
    ) -> ServiceResult<PaginatedResponse<TransactionResponse>> {
        let page_request = query.page_request()?;
        let sort = query.sort()?;
        let search = query.search_term();

        if sort.is_none() && search.is_none() {
            let page = self
                .ctx
                .order_repo()
                .page_by_user(user_id, page_request)
                .await?;
            return Ok(PaginatedResponse::from(page));
        }

        // Totals are computed, so filtering and sorting happen after loading
        let mut summaries: Vec<OrderSummary> = self
            .ctx
            .order_repo()
            .find_by_user(user_id)
            .await?
            .into_iter()
            .map(OrderSummary::from)
            .collect();
        if let Some(needle) = &search {
            summaries.retain(|summary| summary.mentions_title(needle));
        }
        if let Some(sort) = sort {
            sort_summaries(&mut summaries, sort);
        }

        Ok(PaginatedResponse::from(Page::from_vec(summaries, page_request)))
    }

    /// One of the caller's orders. Another user's order reads as not found.
    #[instrument(skip(self))]
    pub async fn get_transaction(
        &self,
        user_id: i64,
        order_id: i64,
    ) -> ServiceResult<TransactionResponse> {
        self.ctx
            .order_repo()
            .find_by_id(order_id)
            .await?
            .filter(|details| details.order.user_id == user_id)
            .map(TransactionResponse::from)
            .ok_or_else(|| DomainError::OrderNotFound(order_id).into())
    }

    /// Statistics over every order in the store
    #[instrument(skip(self))]
    pub async fn statistics(&self) -> ServiceResult<StatisticsResponse> {
        let orders = self.ctx.order_repo().find_all().await?;
        Ok(StatisticsResponse::from(compute_statistics(&orders)))
    }
}
