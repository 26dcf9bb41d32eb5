// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the REST API. Successful responses are
//! wrapped in [`ApiResponse`] (`{"data": ..., "message": ...}`).
//!
//! Amounts in requests are base-unit decimal strings. They are parsed here
//! so that a negative fee can be told apart from a malformed amount.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::blockchain::{Amount, FreezeUtxoRef, SignerSecret, TxHashRef};
use crate::wallet::{HistoryFilter, TransactionKind, TxEnvelope, WalletError};

// =============================================================================
// Envelope
// =============================================================================

/// Success envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
        }
    }
}

// =============================================================================
// Amount parsing
// =============================================================================

/// Requested amount: must be a positive base-unit integer.
pub fn parse_requested_amount(raw: &str) -> Result<Amount, WalletError> {
    let amount: Amount = raw.parse().map_err(WalletError::from_amount)?;
    if amount.is_zero() {
        return Err(WalletError::InvalidAmount);
    }
    Ok(amount)
}

/// Optional fee, zero when absent. Negative fees are `InvalidFee`.
pub fn parse_fee(raw: Option<&str>) -> Result<Amount, WalletError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(Amount::zero()),
        Some(raw) => raw.parse().map_err(WalletError::from_fee),
    }
}

// =============================================================================
// Balance
// =============================================================================

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddressListRequest {
    pub addresses: Vec<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AmountQuery {
    /// Requested withdrawal in base units
    pub amount: String,
}

// =============================================================================
// History
// =============================================================================

/// History query string. `peers` is a comma-separated address list.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct HistoryParams {
    /// `payment`, `freeze` or `both`
    #[serde(rename = "type")]
    pub tx_type: Option<String>,
    pub begin_date: Option<i64>,
    pub end_date: Option<i64>,
    pub peers: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl From<HistoryParams> for HistoryFilter {
    fn from(params: HistoryParams) -> Self {
        let peers = params
            .peers
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        HistoryFilter {
            tx_type: params.tx_type,
            begin_date: params.begin_date,
            end_date: params.end_date,
            peers,
            page: params.page,
            page_size: params.page_size,
        }
    }
}

// =============================================================================
// Freezing
// =============================================================================

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FreezeHashesRequest {
    pub addresses: Vec<String>,
    #[serde(default)]
    pub filter: HistoryFilter,
}

/// Freeze transaction hashes and the UTXOs to look for among their receivers.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CorrelationRequest {
    #[serde(default)]
    pub hashes: Vec<TxHashRef>,
    #[serde(default)]
    pub utxos: Vec<FreezeUtxoRef>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SelectFreezeRequest {
    pub address: String,
    /// Base-unit amounts to unfreeze
    pub amounts: Vec<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FreezeUnitsQuery {
    pub units: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UnfreezeRequest {
    pub utxos: Vec<FreezeUtxoRef>,
    pub signer: SignerSecret,
    #[serde(default)]
    pub fee: Option<String>,
}

// =============================================================================
// Transactions
// =============================================================================

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    pub receiver: String,
    pub amount: String,
    pub signer: SignerSecret,
    #[serde(default)]
    pub fee: Option<String>,
    #[serde(default)]
    pub kind: TransactionKind,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateDataRequest {
    pub receiver: String,
    pub amount: String,
    pub signer: SignerSecret,
    pub data: String,
    /// Defaults to the computed payload fee
    #[serde(default)]
    pub payload_fee: Option<String>,
    #[serde(default)]
    pub fee: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DataFeeQuery {
    pub data: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SendTransactionRequest {
    pub transaction: TxEnvelope,
    pub tx_hash: String,
}
