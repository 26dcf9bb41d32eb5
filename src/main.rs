// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use boa_wallet_server::{
    api::router,
    config::{LogFormat, WalletConfig, DEFAULT_LOG_FILTER},
    state::AppState,
    wallet::WalletService,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = WalletConfig::from_env();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    if config.network.chain_api_url.is_none() {
        tracing::warn!("CHAIN_API_URL is not set; chain reads will fail");
    }
    if config.network.relay_url.is_none() {
        tracing::warn!("RELAY_URL is not set; transaction submission will fail");
    }

    let wallet = WalletService::from_config(&config).expect("Failed to build wallet service");
    let app = router(AppState::new(wallet));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listen address");

    tracing::info!(%addr, "BOA wallet server listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
