// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account balance and UTXO endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    blockchain::{Balance, Utxo},
    error::ApiError,
    models::{parse_requested_amount, AddressListRequest, AmountQuery, ApiResponse},
    state::AppState,
    wallet::{BalanceReport, BalanceSummary, Outcome},
};

/// Balance of a single address.
///
/// `message` is "Record not found" when the address holds no UTXOs.
#[utoipa::path(
    get,
    path = "/v1/accounts/{address}/balance",
    tag = "Accounts",
    params(
        ("address" = String, Path, description = "BOA address")
    ),
    responses(
        (status = 200, description = "Balance of the address", body = ApiResponse<BalanceReport>),
        (status = 400, description = "Invalid address"),
        (status = 503, description = "Chain API unavailable")
    )
)]
pub async fn get_balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<BalanceReport>>, ApiError> {
    let report = state.wallet.self_balance(&address).await?;
    let message = report.outcome.message();
    Ok(Json(ApiResponse::new(report, message)))
}

/// Summed balance of several addresses.
#[utoipa::path(
    post,
    path = "/v1/accounts/balance",
    tag = "Accounts",
    request_body = AddressListRequest,
    responses(
        (status = 200, description = "Aggregated balance", body = ApiResponse<Balance>),
        (status = 400, description = "Empty list or invalid address"),
        (status = 503, description = "Chain API unavailable")
    )
)]
pub async fn get_total_balance(
    State(state): State<AppState>,
    Json(request): Json<AddressListRequest>,
) -> Result<Json<ApiResponse<Balance>>, ApiError> {
    let balance = state.wallet.total_balance(&request.addresses).await?;
    Ok(Json(ApiResponse::new(balance, Outcome::Success.message())))
}

/// Spendable balance left after withdrawing `amount`.
#[utoipa::path(
    get,
    path = "/v1/accounts/{address}/balance/summary",
    tag = "Accounts",
    params(
        ("address" = String, Path, description = "BOA address"),
        AmountQuery
    ),
    responses(
        (status = 200, description = "Balance after withdrawal", body = ApiResponse<BalanceSummary>),
        (status = 400, description = "Invalid address or amount"),
        (status = 422, description = "Insufficient balance"),
        (status = 503, description = "Chain API unavailable")
    )
)]
pub async fn get_balance_summary(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(query): Query<AmountQuery>,
) -> Result<Json<ApiResponse<BalanceSummary>>, ApiError> {
    let amount = parse_requested_amount(&query.amount)?;
    let summary = state
        .wallet
        .account_balance_summary(&address, &amount)
        .await?;
    Ok(Json(ApiResponse::new(summary, Outcome::Success.message())))
}

/// Raw UTXOs of an address as reported by the chain API.
#[utoipa::path(
    get,
    path = "/v1/accounts/{address}/utxos",
    tag = "Accounts",
    params(
        ("address" = String, Path, description = "BOA address")
    ),
    responses(
        (status = 200, description = "UTXO list", body = ApiResponse<Vec<Utxo>>),
        (status = 400, description = "Invalid address"),
        (status = 503, description = "Chain API unavailable")
    )
)]
pub async fn get_utxos(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<Vec<Utxo>>>, ApiError> {
    let utxos = state.wallet.get_utxos(&address).await?;
    let outcome = if utxos.is_empty() {
        Outcome::NotFound
    } else {
        Outcome::Success
    };
    Ok(Json(ApiResponse::new(utxos, outcome.message())))
}
