// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction history, pending pool and overview endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    blockchain::{PendingEntry, PendingOverview, TransactionDetails},
    error::ApiError,
    models::{ApiResponse, HistoryParams},
    state::AppState,
    wallet::{HistoryFilter, HistoryPage, Outcome},
};

/// One page of an address's transaction history with page totals.
#[utoipa::path(
    get,
    path = "/v1/accounts/{address}/history",
    tag = "History",
    params(
        ("address" = String, Path, description = "BOA address"),
        HistoryParams
    ),
    responses(
        (status = 200, description = "History page", body = ApiResponse<HistoryPage>),
        (status = 400, description = "Invalid address"),
        (status = 503, description = "Chain API unavailable or too many pages")
    )
)]
pub async fn get_history(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<ApiResponse<HistoryPage>>, ApiError> {
    let filter = HistoryFilter::from(params);
    let page = state.wallet.transaction_history(&address, &filter).await?;
    let message = page.outcome.message();
    Ok(Json(ApiResponse::new(page, message)))
}

/// Transactions of an address still waiting in the pool.
#[utoipa::path(
    get,
    path = "/v1/accounts/{address}/pending",
    tag = "History",
    params(
        ("address" = String, Path, description = "BOA address")
    ),
    responses(
        (status = 200, description = "Pending transactions", body = ApiResponse<Vec<PendingEntry>>),
        (status = 400, description = "Invalid address"),
        (status = 503, description = "Chain API unavailable")
    )
)]
pub async fn get_pending(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<Vec<PendingEntry>>>, ApiError> {
    let pending = state.wallet.pending_transactions(&address).await?;
    let outcome = if pending.is_empty() {
        Outcome::NotFound
    } else {
        Outcome::Success
    };
    Ok(Json(ApiResponse::new(pending, outcome.message())))
}

#[utoipa::path(
    get,
    path = "/v1/transactions/{hash}/overview",
    tag = "History",
    params(
        ("hash" = String, Path, description = "Transaction hash")
    ),
    responses(
        (status = 200, description = "Transaction overview; `data` is null when the hash is unknown", body = ApiResponse<TransactionDetails>),
        (status = 503, description = "Chain API unavailable")
    )
)]
pub async fn get_transaction_overview(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<ApiResponse<Option<TransactionDetails>>>, ApiError> {
    let details = state.wallet.transaction_overview(&hash).await?;
    Ok(Json(found_or_empty(details)))
}

#[utoipa::path(
    get,
    path = "/v1/transactions/pending/{hash}",
    tag = "History",
    params(
        ("hash" = String, Path, description = "Pending transaction hash")
    ),
    responses(
        (status = 200, description = "Pending transaction overview; `data` is null when not in the pool", body = ApiResponse<PendingOverview>),
        (status = 503, description = "Chain API unavailable")
    )
)]
pub async fn get_pending_overview(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<ApiResponse<Option<PendingOverview>>>, ApiError> {
    let overview = state.wallet.pending_transaction_overview(&hash).await?;
    Ok(Json(found_or_empty(overview)))
}

/// A lookup that found nothing is still a successful call.
fn found_or_empty<T>(data: Option<T>) -> ApiResponse<Option<T>> {
    let outcome = if data.is_some() {
        Outcome::Success
    } else {
        Outcome::NotFound
    };
    ApiResponse::new(data, outcome.message())
}
