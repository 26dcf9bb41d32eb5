// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::wallet::WalletService;

#[derive(Clone)]
pub struct AppState {
    pub wallet: Arc<WalletService>,
}

impl AppState {
    pub fn new(wallet: WalletService) -> Self {
        Self {
            wallet: Arc::new(wallet),
        }
    }
}
