// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use crate::blockchain::{AmountParseError, ChainClientError, KeyError, TxError};

/// Failure of a wallet operation. An empty result is not an error; see
/// [`super::Outcome`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    #[error("{0}")]
    InvalidKey(String),
    #[error("Requested amount must be greater than zero")]
    InvalidAmount,
    #[error("Transaction fee must be equal or greater than 0")]
    InvalidFee,
    #[error("Insufficient balance{}", .address.as_ref().map(|a| format!(" in account: {a}")).unwrap_or_default())]
    InsufficientBalance { address: Option<String> },
    #[error("Address list is empty")]
    EmptyAddressList,
    #[error("Unknown secret key type")]
    UnknownKeyType,
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("Amount to unfreeze is greater than the total frozen amount of the account")]
    FrozenAmountExceeded,
    #[error("No freeze transaction found for the given UTXOs")]
    UnfreezeSenderNotFound,
    #[error("History pagination stopped after {pages} pages")]
    PaginationLimitExceeded { pages: u32 },
    #[error("Data payload of {size} bytes exceeds the {max} byte limit")]
    PayloadTooLarge { size: usize, max: usize },
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),
    #[error("Transaction build failed: {0}")]
    Transaction(String),
}

impl WalletError {
    pub fn insufficient(address: impl ToString) -> Self {
        Self::InsufficientBalance {
            address: Some(address.to_string()),
        }
    }

    /// Amount strings: a negative or malformed value is `InvalidAmount`.
    pub fn from_amount(_: AmountParseError) -> Self {
        Self::InvalidAmount
    }

    /// Fee strings: a negative value is `InvalidFee`, anything else
    /// malformed is `InvalidAmount`.
    pub fn from_fee(err: AmountParseError) -> Self {
        match err {
            AmountParseError::Negative => Self::InvalidFee,
            _ => Self::InvalidAmount,
        }
    }
}

impl From<ChainClientError> for WalletError {
    fn from(err: ChainClientError) -> Self {
        Self::UpstreamUnavailable(err.to_string())
    }
}

impl From<KeyError> for WalletError {
    fn from(err: KeyError) -> Self {
        Self::InvalidKey(err.to_string())
    }
}

impl From<TxError> for WalletError {
    fn from(err: TxError) -> Self {
        match err {
            TxError::PayloadTooLarge { size, max } => Self::PayloadTooLarge { size, max },
            other => Self::Transaction(other.to_string()),
        }
    }
}
