// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! BOA Wallet Server - Wallet Orchestration over the BOA Chain
//!
//! This crate aggregates balances, paginates transaction history,
//! correlates frozen outputs with the transactions that froze them, and
//! builds signed payment, data and unfreeze transactions. Reads go to the
//! chain API; signed transactions are submitted to the relay network.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `blockchain` - Amounts, keys, transactions and the chain/relay clients
//! - `wallet` - Balance, history, freezing and transaction orchestration
//! - `config` - Environment configuration

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod wallet;

#[cfg(test)]
mod test_support;
