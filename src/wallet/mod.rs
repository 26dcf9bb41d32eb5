// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet orchestration over the chain API and relay network.
//!
//! [`WalletService`] holds only the remote clients and paginator settings.
//! It keeps no key or session state: every operation that signs receives
//! its [`SignerSecret`] explicitly, so concurrent callers share nothing
//! mutable. Every read goes to the chain API; nothing is cached.

pub mod account;
pub mod builder;
pub mod error;
pub mod freezing;
pub mod history;
pub mod pagination;

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::blockchain::{
    Address, ChainClient, KeyPair, RelayClient, SecretCipher, SecretSeed, SignerSecret,
};
use crate::config::WalletConfig;

pub use account::{BalanceReport, BalanceSummary};
pub use builder::{BuiltTransaction, SendReceipt, TransactionKind, TxEnvelope};
pub use error::WalletError;
pub use freezing::UnfreezeSelection;
pub use history::{HistoryFilter, HistoryPage};
pub use pagination::{HistoryPaginator, PageCount};

/// Whether a successful read found anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    NotFound,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::NotFound => "Record not found",
        }
    }
}

#[derive(Clone)]
pub struct WalletService {
    chain: ChainClient,
    relay: RelayClient,
    cipher: Option<Arc<dyn SecretCipher>>,
    paginator: HistoryPaginator,
}

impl WalletService {
    pub fn new(chain: ChainClient, relay: RelayClient) -> Self {
        Self {
            chain,
            relay,
            cipher: None,
            paginator: HistoryPaginator::default(),
        }
    }

    pub fn from_config(config: &WalletConfig) -> Result<Self, WalletError> {
        let chain = ChainClient::new(config.network.chain_api_url.as_deref(), config.http_timeout)?;
        let relay = RelayClient::new(config.network.relay_url.as_deref(), config.http_timeout)?;
        Ok(Self::new(chain, relay).with_paginator(HistoryPaginator::new(
            config.history_page_size,
            config.history_max_pages,
        )))
    }

    pub fn with_cipher(mut self, cipher: Arc<dyn SecretCipher>) -> Self {
        self.cipher = Some(cipher);
        self
    }

    pub fn with_paginator(mut self, paginator: HistoryPaginator) -> Self {
        self.paginator = paginator;
        self
    }

    pub fn chain(&self) -> &ChainClient {
        &self.chain
    }

    pub fn relay(&self) -> &RelayClient {
        &self.relay
    }

    /// Key pair for a raw seed, or for an encrypted seed opened by the
    /// configured cipher. An encrypted seed without a cipher is an
    /// unsupported key type.
    pub fn resolve_signer(&self, secret: &SignerSecret) -> Result<KeyPair, WalletError> {
        let seed = match secret {
            SignerSecret::Raw(raw) => SecretSeed::parse(raw)?,
            SignerSecret::Encrypted(sealed) => {
                let cipher = self.cipher.as_ref().ok_or(WalletError::UnknownKeyType)?;
                SecretSeed::parse(&cipher.decrypt(sealed)?)?
            }
        };
        Ok(KeyPair::from_seed(&seed))
    }
}

pub(crate) fn validate_address(raw: &str) -> Result<Address, WalletError> {
    Ok(Address::parse(raw)?)
}
