use std::sync::Arc;

use gallery_core::{RecordField, SharedSelection};
use gallery_logging::{gallery_debug, gallery_info, gallery_warn};
use tokio_util::sync::CancellationToken;

use crate::{DataFetcher, FetchError, PageRequest, PageResponse};

/// Why a bulk scan ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Target was zero or negative; nothing was fetched.
    NonPositiveTarget,
    /// The selection already held at least the target count.
    AlreadySatisfied,
    TargetReached,
    /// The dataset ran out before the target was reached.
    Exhausted,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkOutcome {
    pub added: u64,
    pub pages_scanned: u32,
    pub stop: StopReason,
}

/// A page fetch failed mid-scan. Ids added before the failure stay selected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("bulk select stopped at page {failed_page} after adding {added} record(s): {source}")]
pub struct BulkSelectError {
    pub added: u64,
    pub pages_scanned: u32,
    pub failed_page: u32,
    pub source: FetchError,
}

/// Selects the first N distinct records in dataset order by scanning pages from 1.
#[derive(Clone)]
pub struct BulkSelector {
    fetcher: Arc<dyn DataFetcher>,
    scan_page_size: u32,
}

impl BulkSelector {
    pub fn new(fetcher: Arc<dyn DataFetcher>, scan_page_size: u32) -> Self {
        Self {
            fetcher,
            scan_page_size: scan_page_size.max(1),
        }
    }

    pub fn scan_page_size(&self) -> u32 {
        self.scan_page_size
    }

    /// Grow `selection` to `target` ids.
    ///
    /// Ids already selected count toward the target. Pages are fetched one at
    /// a time starting at page 1; within a page records are taken in the
    /// order returned, and the scan stops the moment the target is met, the
    /// metadata reports no further pages, or `cancel` fires. Cancellation is
    /// checked between pages and before a fetched page is committed.
    pub async fn select(
        &self,
        target: i64,
        selection: &SharedSelection,
        cancel: &CancellationToken,
    ) -> Result<BulkOutcome, BulkSelectError> {
        let mut outcome = BulkOutcome {
            added: 0,
            pages_scanned: 0,
            stop: StopReason::NonPositiveTarget,
        };
        if target <= 0 {
            return Ok(outcome);
        }

        let mut needed = target.unsigned_abs().saturating_sub(selection.size() as u64);
        if needed == 0 {
            outcome.stop = StopReason::AlreadySatisfied;
            return Ok(outcome);
        }
        gallery_info!(
            "Bulk select target={} needed={} scan_page_size={}",
            target,
            needed,
            self.scan_page_size
        );

        let mut page_number: u32 = 1;
        loop {
            if cancel.is_cancelled() {
                outcome.stop = StopReason::Cancelled;
                break;
            }

            let request = PageRequest::new(page_number, self.scan_page_size, RecordField::ID_AND_TITLE);
            let response = match self.fetcher.fetch_page(&request).await {
                Ok(response) => response,
                Err(source) => {
                    gallery_warn!(
                        "Bulk select aborted on page {} after adding {}: {}",
                        page_number,
                        outcome.added,
                        source
                    );
                    return Err(BulkSelectError {
                        added: outcome.added,
                        pages_scanned: outcome.pages_scanned,
                        failed_page: page_number,
                        source,
                    });
                }
            };
            if cancel.is_cancelled() {
                outcome.stop = StopReason::Cancelled;
                break;
            }

            let added = commit_page(&response, selection, &mut needed);
            outcome.added += added;
            outcome.pages_scanned += 1;
            gallery_debug!(
                "Bulk select page {} added {} (still needed {})",
                page_number,
                added,
                needed
            );

            if needed == 0 {
                outcome.stop = StopReason::TargetReached;
                break;
            }
            if response.records.is_empty() || !response.has_more_pages(page_number) {
                outcome.stop = StopReason::Exhausted;
                break;
            }
            page_number += 1;
        }

        gallery_info!(
            "Bulk select finished: {:?}, added {} over {} page(s)",
            outcome.stop,
            outcome.added,
            outcome.pages_scanned
        );
        Ok(outcome)
    }
}

/// Adds unseen ids from `response` in order until `needed` hits zero.
fn commit_page(response: &PageResponse, selection: &SharedSelection, needed: &mut u64) -> u64 {
    selection.with(|store| {
        let mut added = 0;
        for record in &response.records {
            if *needed == 0 {
                break;
            }
            if store.add(record.id) {
                *needed -= 1;
                added += 1;
            }
        }
        added
    })
}
