// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction building and relay submission endpoints.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    blockchain::Amount,
    error::ApiError,
    models::{
        parse_fee, parse_requested_amount, ApiResponse, CreateDataRequest,
        CreateTransactionRequest, DataFeeQuery, SendTransactionRequest,
    },
    state::AppState,
    wallet::{BuiltTransaction, Outcome, SendReceipt, WalletService},
};

const CREATED: &str = "Transaction created Successfully";
const SENT: &str = "Transaction sent Successfully";

/// Build and sign a payment or freeze transaction.
///
/// Inputs are drawn from the signer's spendable UTXOs; change returns to
/// the signer. Nothing is submitted.
#[utoipa::path(
    post,
    path = "/v1/transactions",
    tag = "Transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 200, description = "Transaction created", body = ApiResponse<BuiltTransaction>),
        (status = 400, description = "Invalid receiver, amount, fee or key"),
        (status = 422, description = "Insufficient balance"),
        (status = 503, description = "Chain API unavailable")
    )
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<Json<ApiResponse<BuiltTransaction>>, ApiError> {
    let amount = parse_requested_amount(&request.amount)?;
    let fee = parse_fee(request.fee.as_deref())?;
    let built = state
        .wallet
        .create_transaction(&request.receiver, &amount, &request.signer, &fee, request.kind)
        .await?;
    Ok(Json(ApiResponse::new(built, CREATED)))
}

/// Build and sign a payment carrying a data payload.
#[utoipa::path(
    post,
    path = "/v1/transactions/data",
    tag = "Transactions",
    request_body = CreateDataRequest,
    responses(
        (status = 200, description = "Transaction created", body = ApiResponse<BuiltTransaction>),
        (status = 400, description = "Invalid input or payload too large"),
        (status = 422, description = "Insufficient balance"),
        (status = 503, description = "Chain API unavailable")
    )
)]
pub async fn create_data_transaction(
    State(state): State<AppState>,
    Json(request): Json<CreateDataRequest>,
) -> Result<Json<ApiResponse<BuiltTransaction>>, ApiError> {
    let amount = parse_requested_amount(&request.amount)?;
    let fee = parse_fee(request.fee.as_deref())?;
    let payload_fee = match request.payload_fee.as_deref() {
        Some(raw) => parse_fee(Some(raw))?,
        None => WalletService::calculate_data_fee(&request.data)?,
    };
    let built = state
        .wallet
        .create_data(
            &request.receiver,
            &amount,
            &request.signer,
            &request.data,
            &payload_fee,
            &fee,
        )
        .await?;
    Ok(Json(ApiResponse::new(built, CREATED)))
}

/// Fee for attaching `data` as a transaction payload.
#[utoipa::path(
    get,
    path = "/v1/transactions/data-fee",
    tag = "Transactions",
    params(DataFeeQuery),
    responses(
        (status = 200, description = "Payload fee", body = ApiResponse<Amount>),
        (status = 400, description = "Payload too large")
    )
)]
pub async fn get_data_fee(
    Query(query): Query<DataFeeQuery>,
) -> Result<Json<ApiResponse<Amount>>, ApiError> {
    let fee = WalletService::calculate_data_fee(&query.data)?;
    Ok(Json(ApiResponse::new(fee, Outcome::Success.message())))
}

/// Submit a signed transaction to the relay network.
#[utoipa::path(
    post,
    path = "/v1/transactions/send",
    tag = "Transactions",
    request_body = SendTransactionRequest,
    responses(
        (status = 200, description = "Transaction accepted by the relay", body = ApiResponse<SendReceipt>),
        (status = 400, description = "Hash does not match the transaction"),
        (status = 503, description = "Relay unavailable or rejected the transaction")
    )
)]
pub async fn send_transaction(
    State(state): State<AppState>,
    Json(request): Json<SendTransactionRequest>,
) -> Result<Json<ApiResponse<SendReceipt>>, ApiError> {
    let receipt = state
        .wallet
        .send_to_relay(&request.transaction, &request.tx_hash)
        .await?;
    Ok(Json(ApiResponse::new(receipt, SENT)))
}
