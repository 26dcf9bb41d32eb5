// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Chain API wire types and the wallet-facing shapes derived from them.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::openapi::schema::{ObjectBuilder, Schema, Type};
use utoipa::openapi::RefOr;
use utoipa::ToSchema;

use super::amount::Amount;

/// Endpoints of the two remote services the wallet talks to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Chain API (read side), e.g. `http://localhost:3836`
    pub chain_api_url: Option<String>,
    /// Relay network (write side), e.g. `http://localhost:2826`
    pub relay_url: Option<String>,
}

/// Ledger output / transaction type, encoded as its numeric tag on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TxType {
    Payment,
    Freeze,
    Coinbase,
}

impl TryFrom<u8> for TxType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TxType::Payment),
            1 => Ok(TxType::Freeze),
            2 => Ok(TxType::Coinbase),
            other => Err(format!("unknown transaction type {other}")),
        }
    }
}

impl From<TxType> for u8 {
    fn from(value: TxType) -> Self {
        match value {
            TxType::Payment => 0,
            TxType::Freeze => 1,
            TxType::Coinbase => 2,
        }
    }
}

impl utoipa::PartialSchema for TxType {
    fn schema() -> RefOr<Schema> {
        ObjectBuilder::new()
            .schema_type(Type::Integer)
            .description(Some("0 = payment, 1 = freeze, 2 = coinbase"))
            .into()
    }
}

impl ToSchema for TxType {}

/// Heights and timestamps arrive either as JSON numbers or decimal strings.
fn u64_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

fn i64_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

/// Signed amounts in history records (outbound entries are negative).
fn string_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Uint(n) => n.to_string(),
    })
}

/// Unspent output as returned by `/utxo/{address}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Utxo {
    /// UTXO hash
    pub utxo: String,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    /// Height of the block that created the output
    #[serde(deserialize_with = "u64_lenient")]
    pub height: u64,
    #[serde(default, deserialize_with = "i64_lenient")]
    pub time: i64,
    #[serde(deserialize_with = "u64_lenient")]
    pub unlock_height: u64,
    pub amount: Amount,
}

impl Utxo {
    /// Payment and coinbase outputs can be spent once `unlock_height` is
    /// reached by the next block.
    pub fn is_spendable_at(&self, height: u64) -> bool {
        self.tx_type != TxType::Freeze && self.unlock_height <= height.saturating_add(1)
    }
}

/// Per-address or wallet-wide balance.
///
/// `total = spendable + frozen + unspendable` holds for every value built
/// through [`Balance::from_utxos`] and [`Balance::accumulate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Balance {
    pub total: Amount,
    pub spendable: Amount,
    pub frozen: Amount,
    pub unspendable: Amount,
}

impl Balance {
    pub fn from_utxos(utxos: &[Utxo], height: u64) -> Self {
        let mut balance = Balance::default();
        for utxo in utxos {
            if utxo.tx_type == TxType::Freeze {
                balance.frozen += &utxo.amount;
            } else if utxo.is_spendable_at(height) {
                balance.spendable += &utxo.amount;
            } else {
                balance.unspendable += &utxo.amount;
            }
        }
        balance.total = &(&balance.spendable + &balance.frozen) + &balance.unspendable;
        balance
    }

    pub fn accumulate(&mut self, other: &Balance) {
        self.total += &other.total;
        self.spendable += &other.spendable;
        self.frozen += &other.frozen;
        self.unspendable += &other.unspendable;
    }
}

/// `/wallet/blocks/header`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlockHeader {
    #[serde(deserialize_with = "u64_lenient")]
    pub height: u64,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub merkle_root: String,
    #[serde(deserialize_with = "i64_lenient")]
    pub time_stamp: i64,
}

/// Raw entry of `/wallet/transactions/history/{address}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HistoryRecord {
    pub display_tx_type: String,
    pub address: String,
    #[serde(default)]
    pub peer: String,
    #[serde(default)]
    pub peer_count: u64,
    #[serde(deserialize_with = "u64_lenient")]
    pub height: u64,
    pub tx_hash: String,
    /// "payment" or "freeze"
    pub tx_type: String,
    #[serde(deserialize_with = "string_lenient")]
    pub amount: String,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub unlock_height: u64,
    #[serde(default, deserialize_with = "i64_lenient")]
    pub time: i64,
    #[serde(default, deserialize_with = "i64_lenient")]
    pub unlock_time: i64,
}

/// Caller-facing history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    pub tx_hash: String,
    pub tx_type: String,
    pub transaction_type: String,
    pub block_height: u64,
    /// `hh:mm:ss` (UTC, 12-hour clock)
    pub time: String,
    pub amount: String,
    pub peer: String,
    pub peer_count: u64,
    pub account: String,
    pub unlock_height: u64,
    /// `DD-MM-YYYY hh:mm:ss` (UTC, 12-hour clock)
    pub lock_period: String,
}

impl From<&HistoryRecord> for HistoryEntry {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            tx_hash: record.tx_hash.clone(),
            tx_type: record.tx_type.clone(),
            transaction_type: record.display_tx_type.clone(),
            block_height: record.height,
            time: format_unix(record.time, "%I:%M:%S"),
            amount: record.amount.clone(),
            peer: record.peer.clone(),
            peer_count: record.peer_count,
            account: record.address.clone(),
            unlock_height: record.unlock_height,
            lock_period: format_unix(record.unlock_time, "%d-%m-%Y %I:%M:%S"),
        }
    }
}

/// Sender or receiver line of a transaction overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OverviewParty {
    pub address: String,
    pub amount: Amount,
    pub utxo: String,
}

/// `/wallet/transaction/overview/{hash}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TransactionOverview {
    #[serde(deserialize_with = "u64_lenient")]
    pub height: u64,
    #[serde(deserialize_with = "i64_lenient")]
    pub time: i64,
    #[serde(default)]
    pub tx_hash: String,
    #[serde(default)]
    pub tx_type: String,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub unlock_height: u64,
    #[serde(default, deserialize_with = "i64_lenient")]
    pub unlock_time: i64,
    /// Hex-encoded payload, empty when none is attached
    #[serde(default)]
    pub payload: String,
    pub senders: Vec<OverviewParty>,
    pub receivers: Vec<OverviewParty>,
    #[serde(default)]
    pub fee: Amount,
}

/// Transaction overview with the time resolved and the payload decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TransactionDetails {
    pub height: u64,
    pub time: DateTime<Utc>,
    pub tx_hash: String,
    pub tx_type: String,
    pub unlock_height: u64,
    pub unlock_time: DateTime<Utc>,
    pub payload: Option<String>,
    pub senders: Vec<OverviewParty>,
    pub receivers: Vec<OverviewParty>,
    pub fee: Amount,
}

impl From<TransactionOverview> for TransactionDetails {
    fn from(overview: TransactionOverview) -> Self {
        let payload = hex::decode(overview.payload.trim_start_matches("0x"))
            .ok()
            .filter(|bytes| !bytes.is_empty())
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned());

        Self {
            height: overview.height,
            time: unix_to_utc(overview.time),
            tx_hash: overview.tx_hash,
            tx_type: overview.tx_type,
            unlock_height: overview.unlock_height,
            unlock_time: unix_to_utc(overview.unlock_time),
            payload,
            senders: overview.senders,
            receivers: overview.receivers,
            fee: overview.fee,
        }
    }
}

/// Raw entry of `/wallet/transactions/pending/{address}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PendingTransaction {
    pub tx_hash: String,
    pub address: String,
    pub amount: Amount,
    #[serde(default)]
    pub fee: Amount,
    #[serde(deserialize_with = "i64_lenient")]
    pub submission_time: i64,
}

/// Pending transaction annotated for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PendingEntry {
    pub tx_hash: String,
    pub target: String,
    pub amount: Amount,
    pub fee: Amount,
    /// `h:mm:ss AM UTC`
    pub submission_time: String,
    pub block_delay: i64,
}

impl PendingEntry {
    pub fn annotate(record: PendingTransaction, header_time: i64) -> Self {
        Self {
            block_delay: (header_time - record.submission_time) / 6000,
            submission_time: format_unix(record.submission_time, "%-I:%M:%S %p UTC"),
            tx_hash: record.tx_hash,
            target: record.address,
            amount: record.amount,
            fee: record.fee,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Unlock {
    pub bytes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Lock {
    #[serde(rename = "type")]
    pub lock_type: u8,
    pub bytes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PendingInput {
    pub utxo: String,
    pub unlock: Unlock,
    #[serde(default)]
    pub unlock_age: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PendingOutput {
    pub value: Amount,
    pub lock: Lock,
}

/// `/transaction/pending/{hash}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PendingOverview {
    #[serde(rename = "type")]
    pub tx_type: TxType,
    pub inputs: Vec<PendingInput>,
    pub outputs: Vec<PendingOutput>,
    #[serde(default)]
    pub payload: String,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub lock_height: u64,
}

/// `/transaction/fees/{size}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeeEstimate {
    #[serde(deserialize_with = "u64_lenient")]
    pub tx_size: u64,
    pub high: Amount,
    pub medium: Amount,
    pub low: Amount,
}

/// Freeze UTXO reference handed in by callers (`{utxo, amount}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FreezeUtxoRef {
    pub utxo: String,
    pub amount: Amount,
}

impl From<&Utxo> for FreezeUtxoRef {
    fn from(utxo: &Utxo) -> Self {
        Self {
            utxo: utxo.utxo.clone(),
            amount: utxo.amount.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TxHashRef {
    pub hash: String,
}

/// Freeze output matched against the receivers of its freezing transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FrozenEntry {
    pub utxo: String,
    pub block_height: u64,
    pub time: DateTime<Utc>,
    pub amount: Amount,
}

/// Freeze output paired with the first sender of its freezing transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SenderEntry {
    pub utxo: String,
    pub sender_address: String,
    pub amount: Amount,
}

pub fn unix_to_utc(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

fn format_unix(secs: i64, pattern: &str) -> String {
    unix_to_utc(secs).format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utxo(tx_type: TxType, unlock_height: u64, amount: u64) -> Utxo {
        Utxo {
            utxo: format!("0x{amount:x}"),
            tx_type,
            height: 1,
            time: 0,
            unlock_height,
            amount: Amount::from(amount),
        }
    }

    #[test]
    fn parses_chain_api_utxo() {
        let raw = r#"{
            "utxo": "0x6d85d61fd9d7bb663349ca028bd023ad1bd8fa65c68b4b1363a9c7406b4d663fd73fd386195ba2389100b5cd5fc06b440f053fe513f739844e2d72df302e8ad0",
            "type": 1,
            "height": "0",
            "time": 1577836800000,
            "unlock_height": "1",
            "amount": "200000000000"
        }"#;
        let parsed: Utxo = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.tx_type, TxType::Freeze);
        assert_eq!(parsed.unlock_height, 1);
        assert_eq!(parsed.amount, Amount::from(200_000_000_000));
    }

    #[test]
    fn rejects_unknown_type_tag() {
        let raw = r#"{"utxo":"0x1","type":7,"height":1,"unlock_height":1,"amount":"1"}"#;
        assert!(serde_json::from_str::<Utxo>(raw).is_err());
    }

    #[test]
    fn balance_partitions_by_type_and_maturity() {
        let utxos = vec![
            utxo(TxType::Payment, 10, 100),
            utxo(TxType::Coinbase, 11, 50),
            utxo(TxType::Payment, 12, 7),
            utxo(TxType::Freeze, 0, 1_000),
        ];
        let balance = Balance::from_utxos(&utxos, 10);
        assert_eq!(balance.spendable, Amount::from(150));
        assert_eq!(balance.unspendable, Amount::from(7));
        assert_eq!(balance.frozen, Amount::from(1_000));
        assert_eq!(balance.total, Amount::from(1_157));
    }

    #[test]
    fn history_entry_formats_times() {
        let record = HistoryRecord {
            display_tx_type: "inbound".into(),
            address: "boa1own".into(),
            peer: "boa1peer".into(),
            peer_count: 1,
            height: 9,
            tx_hash: "0xabc".into(),
            tx_type: "payment".into(),
            amount: "-610000".into(),
            unlock_height: 10,
            time: 1_601_553_600,
            unlock_time: 1_601_554_200,
        };
        let entry = HistoryEntry::from(&record);
        assert_eq!(entry.time, "12:00:00");
        assert_eq!(entry.lock_period, "01-10-2020 12:10:00");
        assert_eq!(entry.amount, "-610000");
        assert_eq!(entry.account, "boa1own");
        assert_eq!(entry.transaction_type, "inbound");

        let afternoon = HistoryRecord {
            time: 1_601_557_200,
            unlock_time: 1_601_600_400,
            ..record
        };
        let entry = HistoryEntry::from(&afternoon);
        assert_eq!(entry.time, "01:00:00");
        assert_eq!(entry.lock_period, "02-10-2020 01:00:00");
    }

    #[test]
    fn pending_entry_computes_block_delay() {
        let record = PendingTransaction {
            tx_hash: "0x1".into(),
            address: "boa1target".into(),
            amount: Amount::from(5),
            fee: Amount::zero(),
            submission_time: 1_601_553_600,
        };
        let entry = PendingEntry::annotate(record, 1_601_553_600 + 12_500);
        assert_eq!(entry.block_delay, 2);
        assert_eq!(entry.target, "boa1target");
        assert_eq!(entry.submission_time, "12:00:00 PM UTC");
    }

    #[test]
    fn pending_submission_time_uses_twelve_hour_clock() {
        let record = PendingTransaction {
            tx_hash: "0x2".into(),
            address: "boa1target".into(),
            amount: Amount::from(5),
            fee: Amount::zero(),
            submission_time: 1_601_557_200,
        };
        let entry = PendingEntry::annotate(record, 1_601_557_200);
        assert_eq!(entry.submission_time, "1:00:00 PM UTC");
        assert_eq!(entry.block_delay, 0);
    }

    #[test]
    fn overview_payload_is_decoded() {
        let raw = r#"{
            "height": "9", "time": 1601553600, "tx_hash": "0x1", "tx_type": "payment",
            "unlock_height": "10", "unlock_time": 1601554200, "payload": "68656c6c6f",
            "senders": [{"address": "boa1s", "amount": 610000000000000, "utxo": "0xa"}],
            "receivers": [{"address": "boa1r", "amount": 610000000000000, "utxo": "0xb"}],
            "fee": "0"
        }"#;
        let overview: TransactionOverview = serde_json::from_str(raw).unwrap();
        let details = TransactionDetails::from(overview);
        assert_eq!(details.payload.as_deref(), Some("hello"));
        assert_eq!(details.height, 9);
        assert_eq!(details.time.timestamp(), 1_601_553_600);
    }
}
