// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Freeze correlation and unfreeze transactions.
//!
//! Nothing on chain records where unfrozen funds should go. The wallet
//! convention is that the first sender of the freezing transaction is the
//! owner of record, so unfreezing pays that address back.

use serde::Serialize;
use utoipa::ToSchema;

use crate::blockchain::{
    unix_to_utc, Address, Amount, FreezeUtxoRef, FrozenEntry, HistoryRecord, SenderEntry,
    SignerSecret, TransactionOverview, TxBuilder, TxHashRef, TxType, Utxo,
};

use super::history::{select_by_peers, HistoryFilter};
use super::{validate_address, BuiltTransaction, WalletError, WalletService};

const FREEZE_TX_TYPE: &str = "freeze";

/// Result of checking requested unfreeze amounts against frozen funds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UnfreezeSelection {
    pub address: String,
    pub amount_to_be_unfrozen: Amount,
    pub frozen_amount: Amount,
    pub remaining: Amount,
}

/// Cost of freezing `units`: `(units * 10000 + 40000) * 10^7`.
pub fn calculate_freeze_tx_amount(units: &Amount) -> Amount {
    let scaled = &(units * 10_000) + &Amount::from(40_000);
    &scaled * 10_000_000
}

/// Every (receiver, utxo) match between an overview and the given UTXOs,
/// duplicates included.
fn matched_utxos<'a>(
    overview: &'a TransactionOverview,
    utxos: &'a [FreezeUtxoRef],
) -> impl Iterator<Item = &'a FreezeUtxoRef> + 'a {
    utxos.iter().flat_map(move |utxo| {
        overview
            .receivers
            .iter()
            .filter(move |receiver| receiver.utxo == utxo.utxo)
            .map(move |_| utxo)
    })
}

/// Amount owed to each sender, in order of first appearance. Each UTXO id
/// is paid once, to the first sender it was correlated with.
fn payouts(senders: &[SenderEntry]) -> Vec<(String, Amount)> {
    let mut seen: Vec<&str> = Vec::new();
    let mut payouts: Vec<(String, Amount)> = Vec::new();
    for entry in senders {
        if seen.contains(&entry.utxo.as_str()) {
            continue;
        }
        seen.push(&entry.utxo);
        match payouts
            .iter_mut()
            .find(|(address, _)| *address == entry.sender_address)
        {
            Some((_, total)) => *total += &entry.amount,
            None => payouts.push((entry.sender_address.clone(), entry.amount.clone())),
        }
    }
    payouts
}

impl WalletService {
    /// Freeze-type UTXOs of every address, in address order.
    pub async fn freeze_utxos(&self, addresses: &[String]) -> Result<Vec<Utxo>, WalletError> {
        let mut frozen = Vec::new();
        for raw in addresses {
            let utxos = self.get_utxos(raw).await?;
            frozen.extend(utxos.into_iter().filter(|u| u.tx_type == TxType::Freeze));
        }
        Ok(frozen)
    }

    /// Distinct hashes of freeze transactions in the history of
    /// `addresses`; the first occurrence of a hash wins.
    pub async fn freeze_transaction_hashes(
        &self,
        addresses: &[String],
        filter: &HistoryFilter,
    ) -> Result<Vec<TxHashRef>, WalletError> {
        if addresses.is_empty() {
            return Err(WalletError::EmptyAddressList);
        }

        let mut hashes: Vec<TxHashRef> = Vec::new();
        for raw in addresses {
            let address = validate_address(raw)?;
            let records = self.history_records(&address, filter).await?;
            for record in select_by_peers(&records, &filter.peers) {
                if record.tx_type == FREEZE_TX_TYPE
                    && !hashes.iter().any(|h| h.hash == record.tx_hash)
                {
                    hashes.push(TxHashRef {
                        hash: record.tx_hash.clone(),
                    });
                }
            }
        }
        tracing::debug!(addresses = addresses.len(), hashes = hashes.len(), "collected freeze hashes");
        Ok(hashes)
    }

    /// The requested page, or every page when the filter names none.
    async fn history_records(
        &self,
        address: &Address,
        filter: &HistoryFilter,
    ) -> Result<Vec<HistoryRecord>, WalletError> {
        let query = filter.query();
        if query.page.is_some() {
            return Ok(self.chain.get_history_page(address, &query).await?);
        }

        let chain = &self.chain;
        let query = &query;
        self.paginator
            .collect(move |page| {
                let paged = query.with_page(page);
                async move {
                    let records = chain.get_history_page(address, &paged).await?;
                    Ok::<_, WalletError>(records)
                }
            })
            .await
    }

    async fn overview_of(&self, hash: &str) -> Result<Option<TransactionOverview>, WalletError> {
        let overview = self.chain.get_transaction_overview(hash).await?;
        if overview.is_none() {
            tracing::debug!(hash, "no overview for freeze transaction");
        }
        Ok(overview)
    }

    /// Freeze outputs found among the receivers of the given transactions.
    pub async fn unfreeze_list(
        &self,
        hashes: &[TxHashRef],
        utxos: &[FreezeUtxoRef],
    ) -> Result<Vec<FrozenEntry>, WalletError> {
        let mut frozen = Vec::new();
        for tx in hashes {
            let Some(overview) = self.overview_of(&tx.hash).await? else {
                continue;
            };
            frozen.extend(matched_utxos(&overview, utxos).map(|utxo| FrozenEntry {
                utxo: utxo.utxo.clone(),
                block_height: overview.height,
                time: unix_to_utc(overview.time),
                amount: utxo.amount.clone(),
            }));
        }
        Ok(frozen)
    }

    /// Same matching as [`Self::unfreeze_list`], paired with the first
    /// sender of each freezing transaction.
    pub async fn sender_addresses_to_unfreeze(
        &self,
        hashes: &[TxHashRef],
        utxos: &[FreezeUtxoRef],
    ) -> Result<Vec<SenderEntry>, WalletError> {
        let mut senders = Vec::new();
        for tx in hashes {
            let Some(overview) = self.overview_of(&tx.hash).await? else {
                continue;
            };
            let Some(first) = overview.senders.first() else {
                tracing::warn!(hash = %tx.hash, "freeze transaction lists no sender");
                continue;
            };
            senders.extend(matched_utxos(&overview, utxos).map(|utxo| SenderEntry {
                utxo: utxo.utxo.clone(),
                sender_address: first.address.clone(),
                amount: utxo.amount.clone(),
            }));
        }
        Ok(senders)
    }

    /// Check that `amounts` fit inside the frozen balance of `address`.
    pub async fn select_freeze_utxos(
        &self,
        amounts: &[Amount],
        address: &str,
    ) -> Result<UnfreezeSelection, WalletError> {
        let report = self.self_balance(address).await?;
        let requested: Amount = amounts.iter().sum();
        let frozen = report.balance.frozen;
        let remaining = frozen
            .checked_sub(&requested)
            .ok_or(WalletError::FrozenAmountExceeded)?;

        Ok(UnfreezeSelection {
            address: report.address,
            amount_to_be_unfrozen: requested,
            frozen_amount: frozen,
            remaining,
        })
    }

    /// Spend the given freeze outputs back to the first sender of the
    /// transaction that froze them, one output per sender. A nonzero `fee`
    /// is funded from the signer's own spendable outputs.
    pub async fn create_unfreeze_transaction(
        &self,
        utxos: &[FreezeUtxoRef],
        signer: &SignerSecret,
        fee: &Amount,
    ) -> Result<BuiltTransaction, WalletError> {
        let key_pair = self.resolve_signer(signer)?;
        if utxos.is_empty() {
            return Err(WalletError::InvalidAmount);
        }
        let owner = key_pair.address().clone();

        let mut builder = TxBuilder::new(key_pair);
        for utxo in utxos {
            builder.add_input(utxo.utxo.clone(), utxo.amount.clone());
        }

        let freeze_only = HistoryFilter {
            tx_type: Some(FREEZE_TX_TYPE.to_string()),
            ..Default::default()
        };
        let hashes = self
            .freeze_transaction_hashes(&[owner.to_string()], &freeze_only)
            .await?;
        let senders = self.sender_addresses_to_unfreeze(&hashes, utxos).await?;
        let payouts = payouts(&senders);
        if payouts.is_empty() {
            return Err(WalletError::UnfreezeSenderNotFound);
        }
        let destinations = payouts
            .into_iter()
            .map(|(address, amount)| Ok((validate_address(&address)?, amount)))
            .collect::<Result<Vec<_>, WalletError>>()?;

        let fee_inputs = if fee.is_zero() {
            0
        } else {
            self.fund_transaction(&mut builder, fee).await?
        };
        tracing::debug!(
            signer = %owner,
            destinations = destinations.len(),
            fee_inputs,
            "assembling unfreeze transaction"
        );

        for (destination, amount) in destinations {
            builder.add_output(&destination, amount);
        }
        let tx = builder.sign(TxType::Payment, fee, &Amount::zero())?;
        self.finalize(tx).await
    }
}
