// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-process mock of the chain API and relay network for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;

use crate::blockchain::{
    Address, Amount, BlockHeader, FeeEstimate, HistoryRecord, OverviewParty, PendingOverview,
    PendingTransaction, TransactionOverview, TxType, Utxo,
};

/// Per-test chain state served by [`MockChain`].
#[derive(Debug, Default)]
pub struct MockChainState {
    pub utxos: HashMap<String, Vec<Utxo>>,
    pub block_height: u64,
    pub header_time: i64,
    /// Full history per address, served 10 per page (or `pageSize`).
    pub history: HashMap<String, Vec<HistoryRecord>>,
    pub overviews: HashMap<String, TransactionOverview>,
    pub pending: HashMap<String, Vec<PendingTransaction>>,
    pub pending_overviews: HashMap<String, PendingOverview>,
    /// Every read answers 500 when set.
    pub failing: bool,
    /// Relay answer; 0 means 200.
    pub relay_status: u16,
    pub submitted: Vec<Value>,
    pub history_requests: Vec<HashMap<String, String>>,
}

type Shared = Arc<Mutex<MockChainState>>;

pub struct MockChain {
    pub base_url: String,
    state: Shared,
}

impl MockChain {
    pub async fn start(state: MockChainState) -> Self {
        let state: Shared = Arc::new(Mutex::new(state));
        let app = Router::new()
            .route("/utxo/{address}", get(utxos))
            .route("/block_height", get(block_height))
            .route("/wallet/blocks/header", get(block_header))
            .route("/wallet/transactions/history/{address}", get(history))
            .route("/wallet/transaction/overview/{hash}", get(overview_handler))
            .route("/wallet/transactions/pending/{address}", get(pending))
            .route("/transaction/pending/{hash}", get(pending_overview))
            .route("/transaction/fees/{size}", get(fees))
            .route("/transaction", put(relay))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock chain");
        let addr = listener.local_addr().expect("mock chain address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn state(&self) -> MutexGuard<'_, MockChainState> {
        self.state.lock().expect("mock chain state")
    }
}

fn lock(state: &Shared) -> MutexGuard<'_, MockChainState> {
    state.lock().expect("mock chain state")
}

fn json_or_no_content<T: serde::Serialize>(failing: bool, value: Option<T>) -> Response {
    if failing {
        return (StatusCode::INTERNAL_SERVER_ERROR, "chain api down").into_response();
    }
    match value {
        Some(value) => Json(value).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn utxos(State(state): State<Shared>, Path(address): Path<String>) -> Response {
    let state = lock(&state);
    json_or_no_content(state.failing, state.utxos.get(&address).cloned())
}

async fn block_height(State(state): State<Shared>) -> Response {
    let state = lock(&state);
    json_or_no_content(state.failing, Some(state.block_height.to_string()))
}

async fn block_header(State(state): State<Shared>) -> Response {
    let state = lock(&state);
    let header = BlockHeader {
        height: state.block_height,
        hash: "0xheader".to_string(),
        merkle_root: "0xroot".to_string(),
        time_stamp: state.header_time,
    };
    json_or_no_content(state.failing, Some(header))
}

async fn history(
    State(state): State<Shared>,
    Path(address): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut state = lock(&state);
    state.history_requests.push(params.clone());

    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let size: usize = params
        .get("pageSize")
        .and_then(|p| p.parse().ok())
        .unwrap_or(10);
    let records: Vec<HistoryRecord> = state
        .history
        .get(&address)
        .map(|all| {
            all.iter()
                .filter(|r| params.get("type").is_none_or(|t| &r.tx_type == t))
                .skip((page.max(1) - 1) * size)
                .take(size)
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    let body = (!records.is_empty()).then_some(records);
    json_or_no_content(state.failing, body)
}

async fn overview_handler(State(state): State<Shared>, Path(hash): Path<String>) -> Response {
    let state = lock(&state);
    json_or_no_content(state.failing, state.overviews.get(&hash).cloned())
}

async fn pending(State(state): State<Shared>, Path(address): Path<String>) -> Response {
    let state = lock(&state);
    json_or_no_content(state.failing, state.pending.get(&address).cloned())
}

async fn pending_overview(State(state): State<Shared>, Path(hash): Path<String>) -> Response {
    let state = lock(&state);
    json_or_no_content(state.failing, state.pending_overviews.get(&hash).cloned())
}

async fn fees(State(state): State<Shared>, Path(size): Path<u64>) -> Response {
    let state = lock(&state);
    let estimate = FeeEstimate {
        tx_size: size,
        high: Amount::from(size * 300),
        medium: Amount::from(size * 200),
        low: Amount::from(size * 100),
    };
    json_or_no_content(state.failing, Some(estimate))
}

async fn relay(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = lock(&state);
    state.submitted.push(body);
    match state.relay_status {
        0 | 200 => StatusCode::OK.into_response(),
        code => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
            (status, "rejected by relay").into_response()
        }
    }
}

/// Deterministic valid address, one per `n`.
pub fn address(n: u8) -> Address {
    let c = (b'a' + n % 26) as char;
    Address::parse(&format!("boa1{}", c.to_string().repeat(59))).expect("test address")
}

pub fn payment_utxo(id: &str, unlock_height: u64, amount: u64) -> Utxo {
    Utxo {
        utxo: id.to_string(),
        tx_type: TxType::Payment,
        height: 1,
        time: 1_601_553_600,
        unlock_height,
        amount: Amount::from(amount),
    }
}

pub fn freeze_utxo(id: &str, amount: u64) -> Utxo {
    Utxo {
        tx_type: TxType::Freeze,
        ..payment_utxo(id, 2, amount)
    }
}

pub fn history_record(hash: &str, tx_type: &str, owner: &Address, peer: &Address) -> HistoryRecord {
    HistoryRecord {
        display_tx_type: if tx_type == "freeze" { "freeze" } else { "inbound" }.to_string(),
        address: owner.to_string(),
        peer: peer.to_string(),
        peer_count: 1,
        height: 9,
        tx_hash: hash.to_string(),
        tx_type: tx_type.to_string(),
        amount: "610000".to_string(),
        unlock_height: 10,
        time: 1_601_553_600,
        unlock_time: 1_601_554_200,
    }
}

pub fn party(address: &Address, amount: u64, utxo: &str) -> OverviewParty {
    OverviewParty {
        address: address.to_string(),
        amount: Amount::from(amount),
        utxo: utxo.to_string(),
    }
}

pub fn overview(senders: Vec<OverviewParty>, receivers: Vec<OverviewParty>) -> TransactionOverview {
    TransactionOverview {
        height: 9,
        time: 1_601_553_600,
        tx_hash: "0xoverview".to_string(),
        tx_type: "freeze".to_string(),
        unlock_height: 10,
        unlock_time: 1_601_554_200,
        payload: String::new(),
        senders,
        receivers,
        fee: Amount::zero(),
    }
}
