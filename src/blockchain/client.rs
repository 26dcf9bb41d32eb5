// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP clients for the chain API (reads) and the relay network (writes).
//!
//! Status handling is shared by every read endpoint:
//! - `200` → body parsed as JSON
//! - `204` → `None` (valid empty result)
//! - anything else, or a transport failure → [`ChainClientError`]
//!
//! Nothing is retried; callers treat an error as fatal to their operation.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::keys::Address;
use super::transactions::Transaction;
use super::types::*;

#[derive(Debug, thiserror::Error)]
pub enum ChainClientError {
    #[error("{0} URL is not configured")]
    NotConfigured(&'static str),
    #[error("Invalid {service} URL: {reason}")]
    InvalidUrl {
        service: &'static str,
        reason: String,
    },
    #[error("Request failed: {0}")]
    Request(String),
    #[error("{0}")]
    Status(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Transaction rejected: {0}")]
    Rejected(String),
}

fn build_http(timeout: Duration) -> Result<Client, ChainClientError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ChainClientError::Request(format!("Failed to build HTTP client: {e}")))
}

fn parse_base(service: &'static str, raw: Option<&str>) -> Result<Option<Url>, ChainClientError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e: url::ParseError| ChainClientError::InvalidUrl {
                service,
                reason: e.to_string(),
            }),
    }
}

fn join(
    service: &'static str,
    base: Option<&Url>,
    segments: &[&str],
) -> Result<Url, ChainClientError> {
    let mut url = base.cloned().ok_or(ChainClientError::NotConfigured(service))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| ChainClientError::InvalidUrl {
                service,
                reason: "cannot be a base URL".to_string(),
            })?;
        path.pop_if_empty().extend(segments);
    }
    Ok(url)
}

/// Query parameters of the history endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    pub tx_type: Option<String>,
    pub begin_date: Option<i64>,
    pub end_date: Option<i64>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl HistoryQuery {
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: Some(page),
            page_size: None,
            ..self.clone()
        }
    }

    fn apply(&self, url: &mut Url) {
        let mut pairs = url.query_pairs_mut();
        if let Some(tx_type) = &self.tx_type {
            pairs.append_pair("type", tx_type);
        }
        if let Some(begin) = self.begin_date {
            pairs.append_pair("beginDate", &begin.to_string());
        }
        if let Some(end) = self.end_date {
            pairs.append_pair("endDate", &end.to_string());
        }
        if let Some(page) = self.page {
            pairs.append_pair("page", &page.to_string());
        }
        if let Some(size) = self.page_size {
            pairs.append_pair("pageSize", &size.to_string());
        }
        drop(pairs);
        if url.query() == Some("") {
            url.set_query(None);
        }
    }
}

/// Chain API client.
#[derive(Debug, Clone)]
pub struct ChainClient {
    base_url: Option<Url>,
    http: Client,
}

impl ChainClient {
    const SERVICE: &'static str = "Chain API";

    /// `base_url = None` (or blank) builds a client whose every call fails
    /// with [`ChainClientError::NotConfigured`].
    pub fn new(base_url: Option<&str>, timeout: Duration) -> Result<Self, ChainClientError> {
        Ok(Self {
            base_url: parse_base(Self::SERVICE, base_url)?,
            http: build_http(timeout)?,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ChainClientError> {
        join(Self::SERVICE, self.base_url.as_ref(), segments)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, ChainClientError> {
        let path = url.path().to_string();
        tracing::debug!(path = %path, "chain api request");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ChainClientError::Request(format!("GET {path} failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ChainClientError::Status(format!(
                "GET {path} returned {status}: {body}"
            )));
        }

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|e| ChainClientError::InvalidResponse(format!("GET {path}: {e}")))
    }

    pub async fn get_utxos(&self, address: &Address) -> Result<Vec<Utxo>, ChainClientError> {
        let url = self.endpoint(&["utxo", address.as_str()])?;
        Ok(self.get_json(url).await?.unwrap_or_default())
    }

    pub async fn get_block_height(&self) -> Result<u64, ChainClientError> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Height {
            Num(u64),
            Str(String),
        }

        let url = self.endpoint(&["block_height"])?;
        match self.get_json::<Height>(url).await? {
            Some(Height::Num(height)) => Ok(height),
            Some(Height::Str(raw)) => raw
                .trim()
                .parse()
                .map_err(|_| ChainClientError::InvalidResponse(format!("block height {raw:?}"))),
            None => Err(ChainClientError::InvalidResponse(
                "empty block height".to_string(),
            )),
        }
    }

    pub async fn get_block_header(&self) -> Result<BlockHeader, ChainClientError> {
        let url = self.endpoint(&["wallet", "blocks", "header"])?;
        self.get_json(url)
            .await?
            .ok_or_else(|| ChainClientError::InvalidResponse("empty block header".to_string()))
    }

    pub fn history_url(
        &self,
        address: &Address,
        query: &HistoryQuery,
    ) -> Result<Url, ChainClientError> {
        let mut url = self.endpoint(&["wallet", "transactions", "history", address.as_str()])?;
        query.apply(&mut url);
        Ok(url)
    }

    pub async fn get_history_page(
        &self,
        address: &Address,
        query: &HistoryQuery,
    ) -> Result<Vec<HistoryRecord>, ChainClientError> {
        let url = self.history_url(address, query)?;
        Ok(self.get_json(url).await?.unwrap_or_default())
    }

    pub async fn get_transaction_overview(
        &self,
        hash: &str,
    ) -> Result<Option<TransactionOverview>, ChainClientError> {
        let url = self.endpoint(&["wallet", "transaction", "overview", hash])?;
        self.get_json(url).await
    }

    pub async fn get_pending_transactions(
        &self,
        address: &Address,
    ) -> Result<Vec<PendingTransaction>, ChainClientError> {
        let url = self.endpoint(&["wallet", "transactions", "pending", address.as_str()])?;
        Ok(self.get_json(url).await?.unwrap_or_default())
    }

    pub async fn get_pending_overview(
        &self,
        hash: &str,
    ) -> Result<Option<PendingOverview>, ChainClientError> {
        let url = self.endpoint(&["transaction", "pending", hash])?;
        self.get_json(url).await
    }

    /// Size-based fee estimate for a transaction of `size` bytes.
    pub async fn get_transaction_fee(&self, size: usize) -> Result<FeeEstimate, ChainClientError> {
        let url = self.endpoint(&["transaction", "fees", &size.to_string()])?;
        self.get_json(url)
            .await?
            .ok_or_else(|| ChainClientError::InvalidResponse("empty fee estimate".to_string()))
    }
}

/// Relay body: `{ "tx": <signed transaction> }`.
#[derive(Debug, Serialize)]
struct RelayBody<'a> {
    tx: &'a Transaction,
}

/// Relay network client.
#[derive(Debug, Clone)]
pub struct RelayClient {
    base_url: Option<Url>,
    http: Client,
}

impl RelayClient {
    const SERVICE: &'static str = "Relay";

    pub fn new(base_url: Option<&str>, timeout: Duration) -> Result<Self, ChainClientError> {
        Ok(Self {
            base_url: parse_base(Self::SERVICE, base_url)?,
            http: build_http(timeout)?,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// PUT `/transaction`; only `200` counts as accepted.
    pub async fn send_transaction(&self, tx: &Transaction) -> Result<(), ChainClientError> {
        let url = join(Self::SERVICE, self.base_url.as_ref(), &["transaction"])?;

        let response = self
            .http
            .put(url)
            .json(&RelayBody { tx })
            .send()
            .await
            .map_err(|e| ChainClientError::Request(format!("PUT /transaction failed: {e}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ChainClientError::Rejected(format!("{status}: {body}")));
        }
        Ok(())
    }
}
