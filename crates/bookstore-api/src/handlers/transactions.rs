//! Transaction handlers
//!
//! Orders are always read and written on behalf of the authenticated caller,
//! except statistics which cover every order.

use axum::extract::State;
use bookstore_service::dto::{
    CreateTransactionRequest, PaginatedResponse, StatisticsResponse, TransactionListQuery,
    TransactionResponse,
};
use bookstore_service::TransactionService;

use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created, Success};
use crate::state::AppState;

/// Place an order
///
/// POST /transactions
pub async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateTransactionRequest>,
) -> ApiResult<Created<Success<TransactionResponse>>> {
    let service = TransactionService::new(state.service_context());
    let order = service.create_transaction(auth.user_id, request).await?;
    Ok(Created(Success::new("Transaction created successfully", order)))
}

/// GET /transactions
pub async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<TransactionListQuery>,
) -> ApiResult<Success<PaginatedResponse<TransactionResponse>>> {
    let service = TransactionService::new(state.service_context());
    let page = service.list_transactions(auth.user_id, query).await?;
    Ok(Success::new("Transactions retrieved successfully", page))
}

/// GET /transactions/{id}
pub async fn get_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(order_id): IdPath,
) -> ApiResult<Success<TransactionResponse>> {
    let service = TransactionService::new(state.service_context());
    let order = service.get_transaction(auth.user_id, order_id).await?;
    Ok(Success::new("Transaction retrieved successfully", order))
}

/// GET /transactions/statistics
pub async fn statistics(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Success<StatisticsResponse>> {
    let service = TransactionService::new(state.service_context());
    let stats = service.statistics().await?;
    Ok(Success::new("Statistics retrieved successfully", stats))
}
