// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Balance aggregation and UTXO reads.

use serde::Serialize;
use utoipa::ToSchema;

use crate::blockchain::{Address, Amount, Balance, Utxo};

use super::{validate_address, Outcome, WalletError, WalletService};

/// Balance of one address, tagged `NotFound` when it holds no UTXOs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BalanceReport {
    pub address: String,
    pub balance: Balance,
    pub outcome: Outcome,
}

/// Spendable balance after a requested withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BalanceSummary {
    pub address: String,
    pub drawn: Amount,
    pub remaining: Amount,
    pub spendable: Amount,
    pub total: Amount,
}

impl WalletService {
    pub async fn get_utxos(&self, address: &str) -> Result<Vec<Utxo>, WalletError> {
        let address = validate_address(address)?;
        self.fetch_utxos(&address).await
    }

    pub(crate) async fn fetch_utxos(&self, address: &Address) -> Result<Vec<Utxo>, WalletError> {
        self.chain.get_utxos(address).await.map_err(|e| {
            tracing::warn!(address = %address, error = %e, "failed to fetch utxos");
            WalletError::from(e)
        })
    }

    pub async fn self_balance(&self, address: &str) -> Result<BalanceReport, WalletError> {
        let address = validate_address(address)?;
        self.balance_of(&address).await
    }

    async fn balance_of(&self, address: &Address) -> Result<BalanceReport, WalletError> {
        let utxos = self.fetch_utxos(address).await?;
        if utxos.is_empty() {
            tracing::debug!(address = %address, "no utxos for address");
            return Ok(BalanceReport {
                address: address.to_string(),
                balance: Balance::default(),
                outcome: Outcome::NotFound,
            });
        }

        let height = self.chain.get_block_height().await?;
        let balance = Balance::from_utxos(&utxos, height);
        tracing::debug!(
            address = %address,
            utxos = utxos.len(),
            height,
            total = %balance.total,
            "computed balance"
        );
        Ok(BalanceReport {
            address: address.to_string(),
            balance,
            outcome: Outcome::Success,
        })
    }

    /// Sum of [`Self::self_balance`] over `addresses`, one address at a
    /// time. The first invalid address or upstream failure aborts the sum.
    pub async fn total_balance(&self, addresses: &[String]) -> Result<Balance, WalletError> {
        if addresses.is_empty() {
            return Err(WalletError::EmptyAddressList);
        }

        let mut total = Balance::default();
        for raw in addresses {
            let address = Address::parse(raw)
                .map_err(|e| WalletError::InvalidKey(format!("{e} of key : {raw}")))?;
            let report = self.balance_of(&address).await.map_err(|e| match e {
                WalletError::UpstreamUnavailable(msg) => {
                    WalletError::UpstreamUnavailable(format!("{msg} of key : {raw}"))
                }
                other => other,
            })?;
            total.accumulate(&report.balance);
        }
        Ok(total)
    }

    pub async fn account_balance_summary(
        &self,
        address: &str,
        amount: &Amount,
    ) -> Result<BalanceSummary, WalletError> {
        let address = validate_address(address)?;
        if amount.is_zero() {
            return Err(WalletError::InvalidAmount);
        }

        let report = self.balance_of(&address).await?;
        let remaining = report
            .balance
            .spendable
            .checked_sub(amount)
            .ok_or_else(|| WalletError::insufficient(&address))?;

        Ok(BalanceSummary {
            address: address.to_string(),
            drawn: amount.clone(),
            remaining,
            spendable: report.balance.spendable,
            total: report.balance.total,
        })
    }
}
