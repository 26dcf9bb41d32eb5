// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Payment, freeze and data transaction building, plus relay submission.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::blockchain::{
    hash_full, payload_fee, select_inputs_for_amount, Amount, Balance, FeeEstimate, SignerSecret,
    Transaction, TxBuilder, TxType,
};

use super::{validate_address, WalletError, WalletService};

/// Kinds a caller may build. Coinbase outputs are never user-built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Payment,
    Freeze,
}

impl From<TransactionKind> for TxType {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Payment => TxType::Payment,
            TransactionKind::Freeze => TxType::Freeze,
        }
    }
}

/// Relay envelope: `{ "tx": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TxEnvelope {
    pub tx: Transaction,
}

/// Signed transaction, its content hash and the size-based fee estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BuiltTransaction {
    pub tx_hash: String,
    pub transaction: TxEnvelope,
    pub tx_fee: FeeEstimate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SendReceipt {
    pub tx_hash: String,
}

impl WalletService {
    pub async fn create_transaction(
        &self,
        receiver: &str,
        amount: &Amount,
        signer: &SignerSecret,
        fee: &Amount,
        kind: TransactionKind,
    ) -> Result<BuiltTransaction, WalletError> {
        let receiver = validate_address(receiver)?;
        if amount.is_zero() {
            return Err(WalletError::InvalidAmount);
        }

        let key_pair = self.resolve_signer(signer)?;
        let mut builder = TxBuilder::new(key_pair);
        self.fund_transaction(&mut builder, &(amount + fee)).await?;
        builder.add_output(&receiver, amount.clone());

        let tx = builder.sign(kind.into(), fee, &Amount::zero())?;
        self.finalize(tx).await
    }

    /// Payment carrying `data` as payload. The drawn amount covers
    /// `amount + payload_fee + fee`.
    pub async fn create_data(
        &self,
        receiver: &str,
        amount: &Amount,
        signer: &SignerSecret,
        data: &str,
        payload_fee: &Amount,
        fee: &Amount,
    ) -> Result<BuiltTransaction, WalletError> {
        let receiver = validate_address(receiver)?;
        if amount.is_zero() {
            return Err(WalletError::InvalidAmount);
        }
        let payload = data.trim().as_bytes().to_vec();
        Self::calculate_data_fee(data)?;

        let key_pair = self.resolve_signer(signer)?;
        let mut builder = TxBuilder::new(key_pair);
        let draw = &(amount + payload_fee) + fee;
        self.fund_transaction(&mut builder, &draw).await?;
        builder
            .add_output(&receiver, amount.clone())
            .assign_payload(payload);

        let tx = builder.sign(TxType::Payment, fee, payload_fee)?;
        self.finalize(tx).await
    }

    /// Fee for attaching `data` (trimmed) as payload.
    pub fn calculate_data_fee(data: &str) -> Result<Amount, WalletError> {
        Ok(payload_fee(data.trim().len())?)
    }

    /// Add inputs from the builder owner's spendable UTXOs until `draw` is
    /// covered. Returns the number of inputs added.
    pub(crate) async fn fund_transaction(
        &self,
        builder: &mut TxBuilder,
        draw: &Amount,
    ) -> Result<usize, WalletError> {
        let owner = builder.owner().address().clone();
        let utxos = self.fetch_utxos(&owner).await?;
        if utxos.is_empty() {
            return Err(WalletError::insufficient(&owner));
        }

        let height = self.chain.get_block_height().await?;
        let spendable = Balance::from_utxos(&utxos, height).spendable;
        if &spendable < draw {
            tracing::debug!(address = %owner, spendable = %spendable, draw = %draw, "insufficient spendable balance");
            return Err(WalletError::insufficient(&owner));
        }

        let selected = select_inputs_for_amount(&utxos, draw, height);
        if selected.is_empty() {
            return Err(WalletError::insufficient(&owner));
        }
        for utxo in &selected {
            builder.add_input(utxo.utxo.clone(), utxo.amount.clone());
        }
        Ok(selected.len())
    }

    /// Size-based fee estimate and content hash for a signed transaction.
    pub(crate) async fn finalize(&self, tx: Transaction) -> Result<BuiltTransaction, WalletError> {
        let tx_fee = self.chain.get_transaction_fee(tx.number_of_bytes()).await?;
        let tx_hash = hash_full(&tx);
        tracing::info!(
            tx_hash = %tx_hash,
            inputs = tx.inputs.len(),
            outputs = tx.outputs.len(),
            "Transaction created Successfully"
        );
        Ok(BuiltTransaction {
            tx_hash,
            transaction: TxEnvelope { tx },
            tx_fee,
        })
    }

    /// Submit a signed transaction to the relay. `tx_hash` must be the
    /// content hash of `envelope.tx`.
    pub async fn send_to_relay(
        &self,
        envelope: &TxEnvelope,
        tx_hash: &str,
    ) -> Result<SendReceipt, WalletError> {
        let computed = hash_full(&envelope.tx);
        if computed != tx_hash.trim() {
            return Err(WalletError::InvalidTransaction(
                "hash does not match transaction content".to_string(),
            ));
        }

        self.relay.send_transaction(&envelope.tx).await.map_err(|e| {
            tracing::warn!(tx_hash = %computed, error = %e, "relay rejected transaction");
            WalletError::from(e)
        })?;
        tracing::info!(tx_hash = %computed, "Transaction sent Successfully");
        Ok(SendReceipt { tx_hash: computed })
    }
}
