// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction assembly, signing and hashing.
//!
//! A [`TxBuilder`] collects inputs, outputs and an optional data payload for
//! one owner key, then signs every input over the hash of the unsigned
//! transaction. Anything the inputs hold beyond outputs and fees is returned
//! to the owner as a change output.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use utoipa::ToSchema;

use super::amount::Amount;
use super::keys::{Address, KeyPair};
use super::types::{TxType, Utxo};

/// Base units charged per payload byte.
pub const PAYLOAD_FEE_FACTOR: u64 = 200;
/// Largest data payload accepted, in bytes.
pub const PAYLOAD_MAX_SIZE: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TxError {
    #[error("Transaction has no inputs")]
    NoInputs,
    #[error("Inputs of {available} do not cover {needed}")]
    InsufficientInputs { needed: Amount, available: Amount },
    #[error("Payload of {size} bytes exceeds the {max} byte limit")]
    PayloadTooLarge { size: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TxInput {
    pub utxo: String,
    /// Hex signature, empty while unsigned
    pub unlock: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TxOutput {
    pub value: Amount,
    pub address: String,
}

/// Signed ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub tx_type: TxType,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    /// Hex payload
    #[serde(default)]
    pub payload: String,
    #[serde(default)]
    pub lock_height: u64,
}

impl Transaction {
    fn canonical_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }

    /// Serialized size, used for fee estimation.
    pub fn number_of_bytes(&self) -> usize {
        self.canonical_bytes().len()
    }

    /// Digest the inputs sign: the transaction with every unlock cleared.
    fn signing_digest(&self) -> Vec<u8> {
        let mut unsigned = self.clone();
        for input in &mut unsigned.inputs {
            input.unlock.clear();
        }
        Sha512::digest(unsigned.canonical_bytes()).to_vec()
    }
}

/// Content hash of a signed transaction, `0x`-prefixed hex SHA-512.
pub fn hash_full(tx: &Transaction) -> String {
    format!("0x{}", hex::encode(Sha512::digest(tx.canonical_bytes())))
}

/// Fee charged for attaching `size` payload bytes.
pub fn payload_fee(size: usize) -> Result<Amount, TxError> {
    if size > PAYLOAD_MAX_SIZE {
        return Err(TxError::PayloadTooLarge {
            size,
            max: PAYLOAD_MAX_SIZE,
        });
    }
    Ok(&Amount::from(size as u64) * PAYLOAD_FEE_FACTOR)
}

/// Greedy input selection in list order over outputs spendable at
/// `height`. Returns an empty list when the spendable set cannot cover
/// `target`.
pub fn select_inputs_for_amount(utxos: &[Utxo], target: &Amount, height: u64) -> Vec<Utxo> {
    let mut selected = Vec::new();
    let mut gathered = Amount::zero();
    for utxo in utxos.iter().filter(|u| u.is_spendable_at(height)) {
        if &gathered >= target {
            break;
        }
        gathered += &utxo.amount;
        selected.push(utxo.clone());
    }
    if &gathered >= target {
        selected
    } else {
        Vec::new()
    }
}

/// Transaction builder bound to one owner key.
pub struct TxBuilder {
    owner: KeyPair,
    inputs: Vec<(String, Amount)>,
    outputs: Vec<TxOutput>,
    payload: Vec<u8>,
}

impl TxBuilder {
    pub fn new(owner: KeyPair) -> Self {
        Self {
            owner,
            inputs: Vec::new(),
            outputs: Vec::new(),
            payload: Vec::new(),
        }
    }

    pub fn owner(&self) -> &KeyPair {
        &self.owner
    }

    pub fn add_input(&mut self, utxo: impl Into<String>, amount: Amount) -> &mut Self {
        self.inputs.push((utxo.into(), amount));
        self
    }

    pub fn add_output(&mut self, address: &Address, value: Amount) -> &mut Self {
        self.outputs.push(TxOutput {
            value,
            address: address.to_string(),
        });
        self
    }

    pub fn assign_payload(&mut self, payload: Vec<u8>) -> &mut Self {
        self.payload = payload;
        self
    }

    /// Balance the transaction against `fee + payload_fee`, append change,
    /// and sign every input with the owner key.
    pub fn sign(
        self,
        tx_type: TxType,
        fee: &Amount,
        payload_fee: &Amount,
    ) -> Result<Transaction, TxError> {
        if self.inputs.is_empty() {
            return Err(TxError::NoInputs);
        }

        let available: Amount = self.inputs.iter().map(|(_, amount)| amount).sum();
        let spent: Amount = self.outputs.iter().map(|o| &o.value).sum();
        let needed = &(&spent + fee) + payload_fee;
        let change = available
            .checked_sub(&needed)
            .ok_or_else(|| TxError::InsufficientInputs {
                needed: needed.clone(),
                available: available.clone(),
            })?;

        let mut outputs = self.outputs;
        if !change.is_zero() {
            outputs.push(TxOutput {
                value: change,
                address: self.owner.address().to_string(),
            });
        }

        let mut tx = Transaction {
            tx_type,
            inputs: self
                .inputs
                .into_iter()
                .map(|(utxo, _)| TxInput {
                    utxo,
                    unlock: String::new(),
                })
                .collect(),
            outputs,
            payload: hex::encode(&self.payload),
            lock_height: 0,
        };

        let digest = tx.signing_digest();
        let signature = self.owner.sign(&digest);
        for input in &mut tx.inputs {
            input.unlock = signature.clone();
        }
        Ok(tx)
    }
}
