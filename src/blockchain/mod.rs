// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ledger primitives and remote clients for the BOA chain.
//!
//! This module provides:
//! - Arbitrary-precision amounts
//! - Chain API wire types
//! - Address validation and key pairs
//! - Transaction building, signing and hashing
//! - Chain API / relay HTTP clients

pub mod amount;
pub mod client;
pub mod keys;
pub mod transactions;
pub mod types;

pub use amount::{Amount, AmountParseError};
pub use client::{ChainClient, ChainClientError, HistoryQuery, RelayClient};
pub use keys::{Address, EncryptedSecret, KeyError, KeyPair, SecretCipher, SecretSeed, SignerSecret};
pub use transactions::{
    hash_full, payload_fee, select_inputs_for_amount, Transaction, TxBuilder, TxError, TxInput,
    TxOutput,
};
pub use types::*;
