// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction history, overviews and pending transactions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::blockchain::{
    Address, HistoryEntry, HistoryQuery, HistoryRecord, PendingEntry, PendingOverview,
    TransactionDetails,
};

use super::{validate_address, Outcome, PageCount, WalletError, WalletService};

/// History filter. `tx_type = "both"` (or empty) disables type filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct HistoryFilter {
    #[serde(default, rename = "type")]
    pub tx_type: Option<String>,
    #[serde(default)]
    pub begin_date: Option<i64>,
    #[serde(default)]
    pub end_date: Option<i64>,
    /// Keep only records whose peer is one of these, in this order
    #[serde(default)]
    pub peers: Vec<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl HistoryFilter {
    pub fn query(&self) -> HistoryQuery {
        let tx_type = self
            .tx_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty() && *t != "both")
            .map(str::to_string);
        HistoryQuery {
            tx_type,
            begin_date: self.begin_date,
            end_date: self.end_date,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HistoryPage {
    pub records: Vec<HistoryEntry>,
    pub total_pages: u32,
    pub total_records: u64,
    pub outcome: Outcome,
}

impl HistoryPage {
    fn not_found() -> Self {
        Self {
            records: Vec::new(),
            total_pages: 0,
            total_records: 0,
            outcome: Outcome::NotFound,
        }
    }
}

/// Records whose peer appears in `peers`, grouped in `peers` order. An
/// empty peer list keeps everything.
pub(crate) fn select_by_peers<'a>(
    records: &'a [HistoryRecord],
    peers: &[String],
) -> Vec<&'a HistoryRecord> {
    if peers.is_empty() {
        return records.iter().collect();
    }
    peers
        .iter()
        .flat_map(|peer| records.iter().filter(move |r| &r.peer == peer))
        .collect()
}

impl WalletService {
    pub async fn transaction_history(
        &self,
        address: &str,
        filter: &HistoryFilter,
    ) -> Result<HistoryPage, WalletError> {
        let address = validate_address(address)?;
        let query = filter.query();

        let records = self.chain.get_history_page(&address, &query).await?;
        if records.is_empty() {
            tracing::debug!(address = %address, "no history records");
            return Ok(HistoryPage::not_found());
        }

        let selected = select_by_peers(&records, &filter.peers);
        if selected.is_empty() {
            tracing::debug!(address = %address, peers = filter.peers.len(), "no record matches peers");
            return Ok(HistoryPage::not_found());
        }

        let counts = self.count_history(&address, &query).await?;
        Ok(HistoryPage {
            records: selected.into_iter().map(HistoryEntry::from).collect(),
            total_pages: counts.total_pages,
            total_records: counts.total_records,
            outcome: Outcome::Success,
        })
    }

    /// Page and record totals for the filtered history of `address`.
    pub async fn count_history(
        &self,
        address: &Address,
        query: &HistoryQuery,
    ) -> Result<PageCount, WalletError> {
        let chain = &self.chain;
        self.paginator
            .paginate(move |page| {
                let paged = query.with_page(page);
                async move {
                    let records = chain.get_history_page(address, &paged).await?;
                    Ok::<_, WalletError>(records.len())
                }
            })
            .await
    }

    pub async fn transaction_overview(
        &self,
        hash: &str,
    ) -> Result<Option<TransactionDetails>, WalletError> {
        let overview = self.chain.get_transaction_overview(hash.trim()).await?;
        Ok(overview.map(TransactionDetails::from))
    }

    /// Pending transactions of `address`, each annotated with its delay
    /// relative to the latest block header.
    pub async fn pending_transactions(&self, address: &str) -> Result<Vec<PendingEntry>, WalletError> {
        let address = validate_address(address)?;
        let pending = self.chain.get_pending_transactions(&address).await?;
        if pending.is_empty() {
            return Ok(Vec::new());
        }

        let header = self.chain.get_block_header().await?;
        Ok(pending
            .into_iter()
            .map(|record| PendingEntry::annotate(record, header.time_stamp))
            .collect())
    }

    pub async fn pending_transaction_overview(
        &self,
        hash: &str,
    ) -> Result<Option<PendingOverview>, WalletError> {
        Ok(self.chain.get_pending_overview(hash.trim()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{Amount, PendingTransaction};
    use crate::test_support::{address, history_record, overview, party, MockChain, MockChainState};
    use crate::wallet::tests::service;

    fn records(owner: &Address, count: usize) -> Vec<HistoryRecord> {
        (0..count)
            .map(|i| {
                let peer = address(2 + (i % 2) as u8);
                let tx_type = if i % 3 == 0 { "freeze" } else { "payment" };
                history_record(&format!("0x{i:02}"), tx_type, owner, &peer)
            })
            .collect()
    }

    #[test]
    fn both_disables_the_type_filter() {
        let filter = HistoryFilter {
            tx_type: Some("both".into()),
            ..Default::default()
        };
        assert_eq!(filter.query().tx_type, None);

        let filter = HistoryFilter {
            tx_type: Some("freeze".into()),
            ..Default::default()
        };
        assert_eq!(filter.query().tx_type.as_deref(), Some("freeze"));
    }

    #[test]
    fn peer_selection_follows_peer_order() {
        let owner = address(1);
        let all = records(&owner, 4);
        let peers = vec![address(3).to_string(), address(2).to_string()];
        let hashes: Vec<&str> = select_by_peers(&all, &peers)
            .into_iter()
            .map(|r| r.tx_hash.as_str())
            .collect();
        assert_eq!(hashes, vec!["0x01", "0x03", "0x00", "0x02"]);
    }

    #[tokio::test]
    async fn history_reports_page_totals() {
        let owner = address(1);
        let mut state = MockChainState::default();
        state.history.insert(owner.to_string(), records(&owner, 27));
        let chain = MockChain::start(state).await;

        let page = service(&chain.base_url)
            .transaction_history(owner.as_str(), &HistoryFilter::default())
            .await
            .unwrap();
        assert_eq!(page.outcome, Outcome::Success);
        assert_eq!(page.records.len(), 10);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_records, 27);
    }

    #[tokio::test]
    async fn page_totals_walk_the_filtered_history_at_default_size() {
        let owner = address(1);
        let mut state = MockChainState::default();
        state.history.insert(owner.to_string(), records(&owner, 27));
        let chain = MockChain::start(state).await;

        let filter = HistoryFilter {
            tx_type: Some("payment".into()),
            page: Some(2),
            page_size: Some(5),
            ..Default::default()
        };
        let page = service(&chain.base_url)
            .transaction_history(owner.as_str(), &filter)
            .await
            .unwrap();
        assert_eq!(page.records.len(), 5);
        assert_eq!(page.total_records, 18);
        assert_eq!(page.total_pages, 2);

        let requests = chain.state().history_requests.clone();
        assert_eq!(requests.len(), 3);
        let param = |i: usize, key: &str| requests[i].get(key).map(String::as_str);
        assert_eq!(param(0, "page"), Some("2"));
        assert_eq!(param(0, "pageSize"), Some("5"));
        for (i, expected_page) in [(1, "1"), (2, "2")] {
            assert_eq!(param(i, "type"), Some("payment"));
            assert_eq!(param(i, "page"), Some(expected_page));
            assert_eq!(param(i, "pageSize"), None);
        }
    }

    #[tokio::test]
    async fn unmatched_peers_yield_not_found() {
        let owner = address(1);
        let mut state = MockChainState::default();
        state.history.insert(owner.to_string(), records(&owner, 3));
        let chain = MockChain::start(state).await;

        let filter = HistoryFilter {
            peers: vec![address(20).to_string()],
            ..Default::default()
        };
        let page = service(&chain.base_url)
            .transaction_history(owner.as_str(), &filter)
            .await
            .unwrap();
        assert_eq!(page.outcome, Outcome::NotFound);
        assert!(page.records.is_empty());
    }

    #[tokio::test]
    async fn overview_and_pending_reads() {
        let owner = address(1);
        let mut state = MockChainState {
            header_time: 1_601_553_600 + 6_000,
            ..Default::default()
        };
        state.overviews.insert(
            "0xabc".into(),
            overview(vec![party(&owner, 5, "0x1")], vec![party(&address(2), 5, "0x2")]),
        );
        state.pending.insert(
            owner.to_string(),
            vec![PendingTransaction {
                tx_hash: "0xdef".into(),
                address: address(2).to_string(),
                amount: Amount::from(5),
                fee: Amount::zero(),
                submission_time: 1_601_553_600,
            }],
        );
        let chain = MockChain::start(state).await;
        let wallet = service(&chain.base_url);

        let details = wallet.transaction_overview("0xabc").await.unwrap().unwrap();
        assert_eq!(details.senders[0].address, owner.as_str());
        assert!(wallet.transaction_overview("0xnone").await.unwrap().is_none());

        let pending = wallet.pending_transactions(owner.as_str()).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].block_delay, 1);
        assert_eq!(pending[0].target, address(2).as_str());

        assert!(wallet
            .pending_transaction_overview("0xnone")
            .await
            .unwrap()
            .is_none());
    }
}
