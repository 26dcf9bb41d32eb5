// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! History page counting.
//!
//! The history endpoint pages implicitly. Walking it from page 1 and
//! stopping at the first page shorter than the sentinel size gives the
//! total page and record counts. The walk is sequential and bounded by
//! `max_pages`.

use std::future::Future;

use serde::Serialize;
use utoipa::ToSchema;

use super::WalletError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageCount {
    pub total_pages: u32,
    pub total_records: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPaginator {
    page_size: usize,
    max_pages: u32,
}

impl Default for HistoryPaginator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE_SIZE, Self::DEFAULT_MAX_PAGES)
    }
}

impl HistoryPaginator {
    pub const DEFAULT_PAGE_SIZE: usize = 10;
    pub const DEFAULT_MAX_PAGES: u32 = 1000;

    pub fn new(page_size: usize, max_pages: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            max_pages: max_pages.max(1),
        }
    }

    /// Walk pages `1..` through `fetch_page`, which returns the number of
    /// records on the page (0 for a "no content" answer).
    pub async fn paginate<F, Fut>(&self, mut fetch_page: F) -> Result<PageCount, WalletError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<usize, WalletError>>,
    {
        let mut count = PageCount::default();
        let mut page = 1u32;
        loop {
            if page > self.max_pages {
                tracing::warn!(pages = self.max_pages, "history pagination hit its page cap");
                return Err(WalletError::PaginationLimitExceeded {
                    pages: self.max_pages,
                });
            }

            let records = fetch_page(page).await?;
            if records > 0 {
                count.total_pages += 1;
                count.total_records += records as u64;
            }
            if records != self.page_size {
                break;
            }
            page += 1;
        }

        tracing::debug!(
            pages = count.total_pages,
            records = count.total_records,
            "history pagination complete"
        );
        Ok(count)
    }

    /// Same walk as [`Self::paginate`], keeping the records.
    pub async fn collect<T, F, Fut>(&self, mut fetch_page: F) -> Result<Vec<T>, WalletError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Vec<T>, WalletError>>,
    {
        let mut all = Vec::new();
        for page in 1..=self.max_pages {
            let records = fetch_page(page).await?;
            let full = records.len() == self.page_size;
            all.extend(records);
            if !full {
                return Ok(all);
            }
        }
        tracing::warn!(pages = self.max_pages, "history collection hit its page cap");
        Err(WalletError::PaginationLimitExceeded {
            pages: self.max_pages,
        })
    }
}
