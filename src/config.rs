// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults, and the [`WalletConfig`] loaded
//! from them once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `CHAIN_API_URL` | Chain API base URL | unset (chain reads fail) |
//! | `RELAY_URL` | Relay network base URL | unset (submission fails) |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `HTTP_TIMEOUT_SECS` | Outbound request timeout | `15` |
//! | `HISTORY_PAGE_SIZE` | History page size used to detect the last page | `10` |
//! | `HISTORY_MAX_PAGES` | Maximum history pages walked per request | `1000` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::time::Duration;

use crate::blockchain::NetworkConfig;
use crate::wallet::HistoryPaginator;

/// Chain API base URL (Stoa). Every chain read fails while unset.
pub const CHAIN_API_URL_ENV: &str = "CHAIN_API_URL";

/// Relay network base URL (Agora). Transaction submission fails while unset.
pub const RELAY_URL_ENV: &str = "RELAY_URL";

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const HTTP_TIMEOUT_SECS_ENV: &str = "HTTP_TIMEOUT_SECS";
pub const HISTORY_PAGE_SIZE_ENV: &str = "HISTORY_PAGE_SIZE";
pub const HISTORY_MAX_PAGES_ENV: &str = "HISTORY_MAX_PAGES";

/// `json` switches the subscriber to JSON lines.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    pub network: NetworkConfig,
    pub host: String,
    pub port: u16,
    pub http_timeout: Duration,
    pub history_page_size: usize,
    pub history_max_pages: u32,
    pub log_format: LogFormat,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            history_page_size: HistoryPaginator::DEFAULT_PAGE_SIZE,
            history_max_pages: HistoryPaginator::DEFAULT_MAX_PAGES,
            log_format: LogFormat::Pretty,
        }
    }
}

impl WalletConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable numbers fall back to their
    /// defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let optional = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            network: NetworkConfig {
                chain_api_url: optional(CHAIN_API_URL_ENV),
                relay_url: optional(RELAY_URL_ENV),
            },
            host: optional(HOST_ENV).unwrap_or(defaults.host),
            port: parse_or(optional(PORT_ENV), PORT_ENV, defaults.port),
            http_timeout: Duration::from_secs(parse_or(
                optional(HTTP_TIMEOUT_SECS_ENV),
                HTTP_TIMEOUT_SECS_ENV,
                DEFAULT_HTTP_TIMEOUT_SECS,
            )),
            history_page_size: parse_or(
                optional(HISTORY_PAGE_SIZE_ENV),
                HISTORY_PAGE_SIZE_ENV,
                defaults.history_page_size,
            ),
            history_max_pages: parse_or(
                optional(HISTORY_MAX_PAGES_ENV),
                HISTORY_MAX_PAGES_ENV,
                defaults.history_max_pages,
            ),
            log_format: match optional(LOG_FORMAT_ENV).as_deref() {
                Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, key: &str, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "invalid numeric setting, using default");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> WalletConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        WalletConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config(&[]);
        assert_eq!(cfg, WalletConfig::default());
        assert_eq!(cfg.network.chain_api_url, None);
        assert_eq!(cfg.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn reads_every_setting() {
        let cfg = config(&[
            (CHAIN_API_URL_ENV, "http://localhost:3836"),
            (RELAY_URL_ENV, " http://localhost:2826 "),
            (PORT_ENV, "9000"),
            (HTTP_TIMEOUT_SECS_ENV, "3"),
            (HISTORY_PAGE_SIZE_ENV, "25"),
            (HISTORY_MAX_PAGES_ENV, "50"),
            (LOG_FORMAT_ENV, "JSON"),
        ]);
        assert_eq!(cfg.network.chain_api_url.as_deref(), Some("http://localhost:3836"));
        assert_eq!(cfg.network.relay_url.as_deref(), Some("http://localhost:2826"));
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.http_timeout, Duration::from_secs(3));
        assert_eq!(cfg.history_page_size, 25);
        assert_eq!(cfg.history_max_pages, 50);
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn blank_and_invalid_values_fall_back() {
        let cfg = config(&[(CHAIN_API_URL_ENV, "  "), (PORT_ENV, "eighty")]);
        assert_eq!(cfg.network.chain_api_url, None);
        assert_eq!(cfg.port, DEFAULT_PORT);
    }
}
