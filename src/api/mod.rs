// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::{HeaderValue, Request},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use crate::{
    blockchain::{
        Amount, Balance, EncryptedSecret, FeeEstimate, FreezeUtxoRef, FrozenEntry, HistoryEntry,
        Lock, PendingEntry, PendingInput, PendingOutput, PendingOverview, SenderEntry,
        SignerSecret, Transaction, TransactionDetails, TxHashRef, TxInput, TxOutput, TxType,
        Unlock, Utxo,
    },
    models::{
        AddressListRequest, CorrelationRequest, CreateDataRequest, CreateTransactionRequest,
        FreezeHashesRequest, SelectFreezeRequest, SendTransactionRequest, UnfreezeRequest,
    },
    state::AppState,
    wallet::{
        BalanceReport, BalanceSummary, BuiltTransaction, HistoryFilter, HistoryPage, Outcome,
        SendReceipt, TransactionKind, TxEnvelope, UnfreezeSelection,
    },
};

pub mod balance;
pub mod freezing;
pub mod health;
pub mod history;
pub mod transactions;

/// Tags every request with a fresh v4 UUID unless the caller sent one.
#[derive(Debug, Clone, Copy, Default)]
struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        // Accounts
        .route("/accounts/balance", post(balance::get_total_balance))
        .route("/accounts/{address}/balance", get(balance::get_balance))
        .route(
            "/accounts/{address}/balance/summary",
            get(balance::get_balance_summary),
        )
        .route("/accounts/{address}/utxos", get(balance::get_utxos))
        // History
        .route("/accounts/{address}/history", get(history::get_history))
        .route("/accounts/{address}/pending", get(history::get_pending))
        .route(
            "/transactions/{hash}/overview",
            get(history::get_transaction_overview),
        )
        .route(
            "/transactions/pending/{hash}",
            get(history::get_pending_overview),
        )
        // Transactions
        .route("/transactions", post(transactions::create_transaction))
        .route(
            "/transactions/data",
            post(transactions::create_data_transaction),
        )
        .route("/transactions/data-fee", get(transactions::get_data_fee))
        .route("/transactions/send", post(transactions::send_transaction))
        // Freezing
        .route("/freeze/utxos", post(freezing::freeze_utxos))
        .route("/freeze/hashes", post(freezing::freeze_hashes))
        .route("/freeze/unfreeze-list", post(freezing::unfreeze_list))
        .route("/freeze/senders", post(freezing::unfreeze_senders))
        .route("/freeze/select", post(freezing::select_freeze))
        .route("/freeze/amount", get(freezing::freeze_amount))
        .route("/freeze/unfreeze", post(freezing::create_unfreeze))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::health))
        .with_state(state);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        balance::get_balance,
        balance::get_total_balance,
        balance::get_balance_summary,
        balance::get_utxos,
        history::get_history,
        history::get_pending,
        history::get_transaction_overview,
        history::get_pending_overview,
        transactions::create_transaction,
        transactions::create_data_transaction,
        transactions::get_data_fee,
        transactions::send_transaction,
        freezing::freeze_utxos,
        freezing::freeze_hashes,
        freezing::unfreeze_list,
        freezing::unfreeze_senders,
        freezing::select_freeze,
        freezing::freeze_amount,
        freezing::create_unfreeze
    ),
    components(
        schemas(
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse,
            Amount,
            TxType,
            Utxo,
            Balance,
            Outcome,
            BalanceReport,
            BalanceSummary,
            HistoryEntry,
            HistoryFilter,
            HistoryPage,
            TransactionDetails,
            PendingEntry,
            PendingOverview,
            PendingInput,
            PendingOutput,
            Lock,
            Unlock,
            FeeEstimate,
            FreezeUtxoRef,
            TxHashRef,
            FrozenEntry,
            SenderEntry,
            UnfreezeSelection,
            EncryptedSecret,
            SignerSecret,
            Transaction,
            TxInput,
            TxOutput,
            TxEnvelope,
            TransactionKind,
            BuiltTransaction,
            SendReceipt,
            AddressListRequest,
            FreezeHashesRequest,
            CorrelationRequest,
            SelectFreezeRequest,
            UnfreezeRequest,
            CreateTransactionRequest,
            CreateDataRequest,
            SendTransactionRequest
        )
    ),
    tags(
        (name = "Health", description = "Liveness and upstream readiness"),
        (name = "Accounts", description = "Balances and UTXOs"),
        (name = "History", description = "Transaction history and the pending pool"),
        (name = "Transactions", description = "Transaction building and relay submission"),
        (name = "Freezing", description = "Frozen funds discovery and unfreezing")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::StatusCode,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::test_support::{address, overview, party, payment_utxo, MockChain, MockChainState};
    use crate::wallet::tests::{service, signer, signer_address};
    use crate::wallet::WalletService;

    async fn app(state: MockChainState) -> (Router, MockChain) {
        let chain = MockChain::start(state).await;
        let app = router(AppState::new(service(&chain.base_url)));
        (app, chain)
    }

    async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::new(service("http://localhost")));
        let _ = app.into_make_service();
    }

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/health",
            "/v1/accounts/{address}/balance",
            "/v1/accounts/{address}/history",
            "/v1/transactions/send",
            "/v1/freeze/unfreeze",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected}"
            );
        }
    }

    #[tokio::test]
    async fn health_reports_chain_height() {
        let (app, _chain) = app(MockChainState {
            block_height: 42,
            ..Default::default()
        })
        .await;
        let (status, body) = call(app, get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["checks"]["block_height"], 42);
        assert_eq!(body["checks"]["relay"], "configured");
    }

    #[tokio::test]
    async fn health_degrades_when_chain_fails() {
        let (app, _chain) = app(MockChainState {
            failing: true,
            ..Default::default()
        })
        .await;
        let (status, body) = call(app, get_request("/health")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["checks"]["chain_api"], "unavailable");
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let app = router(AppState::new(service("http://localhost")));
        let response = app.oneshot(get_request("/health/live")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let id = response.headers().get("x-request-id").unwrap();
        assert!(Uuid::parse_str(id.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn balance_is_wrapped_in_envelope() {
        let owner = address(0);
        let mut state = MockChainState {
            block_height: 10,
            ..Default::default()
        };
        state
            .utxos
            .insert(owner.to_string(), vec![payment_utxo("0x01", 1, 500)]);
        let (app, _chain) = app(state).await;

        let (status, body) = call(app, get_request(&format!("/v1/accounts/{owner}/balance"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Success");
        assert_eq!(body["data"]["balance"]["spendable"], "500");
        assert_eq!(body["data"]["balance"]["total"], "500");
    }

    #[tokio::test]
    async fn unknown_address_balance_is_not_found_message() {
        let (app, _chain) = app(MockChainState::default()).await;
        let owner = address(1);
        let (status, body) = call(app, get_request(&format!("/v1/accounts/{owner}/balance"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Record not found");
    }

    #[tokio::test]
    async fn invalid_address_is_bad_request() {
        let (app, _chain) = app(MockChainState::default()).await;
        let (status, body) = call(app, get_request("/v1/accounts/boa1short/balance")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid Key length");
    }

    #[tokio::test]
    async fn empty_address_list_is_rejected() {
        let (app, _chain) = app(MockChainState::default()).await;
        let (status, _) = call(
            app,
            post_json("/v1/accounts/balance", json!({ "addresses": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn summary_rejects_overdraw() {
        let owner = address(2);
        let mut state = MockChainState {
            block_height: 10,
            ..Default::default()
        };
        state
            .utxos
            .insert(owner.to_string(), vec![payment_utxo("0x01", 1, 100)]);
        let (app, _chain) = app(state).await;

        let uri = format!("/v1/accounts/{owner}/balance/summary?amount=150");
        let (status, body) = call(app, get_request(&uri)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["error"],
            format!("Insufficient balance in account: {owner}")
        );
    }

    #[tokio::test]
    async fn missing_overviews_are_empty_successes() {
        let (app, _chain) = app(MockChainState::default()).await;
        for uri in ["/v1/transactions/0xabc/overview", "/v1/transactions/pending/0xabc"] {
            let (status, body) = call(app.clone(), get_request(uri)).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body["data"], Value::Null, "{uri}");
            assert_eq!(body["message"], "Record not found", "{uri}");
        }
    }

    #[tokio::test]
    async fn known_overview_is_returned() {
        let mut state = MockChainState::default();
        state.overviews.insert(
            "0xabc".into(),
            overview(vec![party(&address(1), 10, "0xa")], vec![party(&address(2), 10, "0xb")]),
        );
        let (app, _chain) = app(state).await;
        let (status, body) = call(app, get_request("/v1/transactions/0xabc/overview")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Success");
        assert!(body["data"].is_object());
    }

    #[tokio::test]
    async fn send_with_wrong_hash_is_bad_request() {
        let mut state = MockChainState {
            block_height: 10,
            ..Default::default()
        };
        state.utxos.insert(
            signer_address().to_string(),
            vec![payment_utxo("0x01", 1, 1_000)],
        );
        let (app, chain) = app(state).await;
        let built = service(&chain.base_url)
            .create_transaction(
                address(3).as_str(),
                &Amount::from(100),
                &signer(),
                &Amount::zero(),
                TransactionKind::Payment,
            )
            .await
            .unwrap();

        let request = post_json(
            "/v1/transactions/send",
            json!({ "transaction": built.transaction, "tx_hash": "0xforged" }),
        );
        let (status, body) = call(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Invalid transaction: hash does not match transaction content"
        );
        assert!(chain.state().submitted.is_empty());
    }

    #[tokio::test]
    async fn freeze_amount_scales_units() {
        let (app, _chain) = app(MockChainState::default()).await;
        let (status, body) = call(app, get_request("/v1/freeze/amount?units=1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], "500000000000");
    }

    #[tokio::test]
    async fn data_fee_is_computed_locally() {
        let app = router(AppState::new(service("http://localhost")));
        let (status, body) = call(app, get_request("/v1/transactions/data-fee?data=hello")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"],
            WalletService::calculate_data_fee("hello").unwrap().to_string()
        );
    }

    #[tokio::test]
    async fn negative_fee_is_rejected() {
        let (app, _chain) = app(MockChainState::default()).await;
        let request = post_json(
            "/v1/transactions",
            json!({
                "receiver": address(3).to_string(),
                "amount": "10",
                "signer": crate::blockchain::keys::tests::SIGNER_SEED,
                "fee": "-1"
            }),
        );
        let (status, body) = call(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Transaction fee must be equal or greater than 0");
    }
}
