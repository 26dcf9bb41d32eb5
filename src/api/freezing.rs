// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Freeze discovery and unfreeze endpoints.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    blockchain::{Amount, FrozenEntry, SenderEntry, TxHashRef, Utxo},
    error::ApiError,
    models::{
        parse_fee, parse_requested_amount, AddressListRequest, ApiResponse, CorrelationRequest,
        FreezeHashesRequest, FreezeUnitsQuery, SelectFreezeRequest, UnfreezeRequest,
    },
    state::AppState,
    wallet::{
        freezing::calculate_freeze_tx_amount, BuiltTransaction, Outcome, UnfreezeSelection,
        WalletError,
    },
};

fn listing_message<T>(items: &[T]) -> &'static str {
    if items.is_empty() {
        Outcome::NotFound.message()
    } else {
        Outcome::Success.message()
    }
}

/// Frozen UTXOs held by the given addresses.
#[utoipa::path(
    post,
    path = "/v1/freeze/utxos",
    tag = "Freezing",
    request_body = AddressListRequest,
    responses(
        (status = 200, description = "Frozen UTXOs", body = ApiResponse<Vec<Utxo>>),
        (status = 400, description = "Invalid address"),
        (status = 503, description = "Chain API unavailable")
    )
)]
pub async fn freeze_utxos(
    State(state): State<AppState>,
    Json(request): Json<AddressListRequest>,
) -> Result<Json<ApiResponse<Vec<Utxo>>>, ApiError> {
    let utxos = state.wallet.freeze_utxos(&request.addresses).await?;
    let message = listing_message(&utxos);
    Ok(Json(ApiResponse::new(utxos, message)))
}

/// Hashes of freeze transactions in the history of the given addresses.
#[utoipa::path(
    post,
    path = "/v1/freeze/hashes",
    tag = "Freezing",
    request_body = FreezeHashesRequest,
    responses(
        (status = 200, description = "Freeze transaction hashes", body = ApiResponse<Vec<TxHashRef>>),
        (status = 400, description = "Empty list or invalid address"),
        (status = 503, description = "Chain API unavailable or too many pages")
    )
)]
pub async fn freeze_hashes(
    State(state): State<AppState>,
    Json(request): Json<FreezeHashesRequest>,
) -> Result<Json<ApiResponse<Vec<TxHashRef>>>, ApiError> {
    let hashes = state
        .wallet
        .freeze_transaction_hashes(&request.addresses, &request.filter)
        .await?;
    let message = listing_message(&hashes);
    Ok(Json(ApiResponse::new(hashes, message)))
}

/// Frozen outputs created by the given transactions.
#[utoipa::path(
    post,
    path = "/v1/freeze/unfreeze-list",
    tag = "Freezing",
    request_body = CorrelationRequest,
    responses(
        (status = 200, description = "Matched frozen outputs", body = ApiResponse<Vec<FrozenEntry>>),
        (status = 503, description = "Chain API unavailable")
    )
)]
pub async fn unfreeze_list(
    State(state): State<AppState>,
    Json(request): Json<CorrelationRequest>,
) -> Result<Json<ApiResponse<Vec<FrozenEntry>>>, ApiError> {
    let entries = state
        .wallet
        .unfreeze_list(&request.hashes, &request.utxos)
        .await?;
    let message = listing_message(&entries);
    Ok(Json(ApiResponse::new(entries, message)))
}

/// Frozen outputs paired with the address that will receive them back.
#[utoipa::path(
    post,
    path = "/v1/freeze/senders",
    tag = "Freezing",
    request_body = CorrelationRequest,
    responses(
        (status = 200, description = "Matched outputs with sender", body = ApiResponse<Vec<SenderEntry>>),
        (status = 503, description = "Chain API unavailable")
    )
)]
pub async fn unfreeze_senders(
    State(state): State<AppState>,
    Json(request): Json<CorrelationRequest>,
) -> Result<Json<ApiResponse<Vec<SenderEntry>>>, ApiError> {
    let entries = state
        .wallet
        .sender_addresses_to_unfreeze(&request.hashes, &request.utxos)
        .await?;
    let message = listing_message(&entries);
    Ok(Json(ApiResponse::new(entries, message)))
}

/// Check requested unfreeze amounts against the frozen balance.
#[utoipa::path(
    post,
    path = "/v1/freeze/select",
    tag = "Freezing",
    request_body = SelectFreezeRequest,
    responses(
        (status = 200, description = "Amounts fit the frozen balance", body = ApiResponse<UnfreezeSelection>),
        (status = 400, description = "Invalid address or amount"),
        (status = 422, description = "Requested more than is frozen"),
        (status = 503, description = "Chain API unavailable")
    )
)]
pub async fn select_freeze(
    State(state): State<AppState>,
    Json(request): Json<SelectFreezeRequest>,
) -> Result<Json<ApiResponse<UnfreezeSelection>>, ApiError> {
    let amounts = request
        .amounts
        .iter()
        .map(|raw| parse_requested_amount(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let selection = state
        .wallet
        .select_freeze_utxos(&amounts, &request.address)
        .await?;
    Ok(Json(ApiResponse::new(selection, Outcome::Success.message())))
}

/// Amount a freeze of `units` costs, in base units.
#[utoipa::path(
    get,
    path = "/v1/freeze/amount",
    tag = "Freezing",
    params(FreezeUnitsQuery),
    responses(
        (status = 200, description = "Freeze amount", body = ApiResponse<Amount>),
        (status = 400, description = "Invalid unit count")
    )
)]
pub async fn freeze_amount(
    Query(query): Query<FreezeUnitsQuery>,
) -> Result<Json<ApiResponse<Amount>>, ApiError> {
    let units: Amount = query
        .units
        .trim()
        .parse()
        .map_err(WalletError::from_amount)?;
    Ok(Json(ApiResponse::new(
        calculate_freeze_tx_amount(&units),
        Outcome::Success.message(),
    )))
}

/// Build and sign a transaction returning frozen outputs to their sender.
#[utoipa::path(
    post,
    path = "/v1/freeze/unfreeze",
    tag = "Freezing",
    request_body = UnfreezeRequest,
    responses(
        (status = 200, description = "Unfreeze transaction created", body = ApiResponse<BuiltTransaction>),
        (status = 400, description = "Invalid key, fee or empty selection"),
        (status = 422, description = "No sender found or fee not covered"),
        (status = 503, description = "Chain API unavailable")
    )
)]
pub async fn create_unfreeze(
    State(state): State<AppState>,
    Json(request): Json<UnfreezeRequest>,
) -> Result<Json<ApiResponse<BuiltTransaction>>, ApiError> {
    let fee = parse_fee(request.fee.as_deref())?;
    let built = state
        .wallet
        .create_unfreeze_transaction(&request.utxos, &request.signer, &fee)
        .await?;
    Ok(Json(ApiResponse::new(built, "Transaction created Successfully")))
}
