#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex, Once};

use gallery_core::Record;
use gallery_engine::{
    CancellationToken, DataFetcher, FailureKind, FetchError, PageRequest, PageResponse,
    PaginationMeta,
};
use tokio::sync::Notify;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(gallery_logging::initialize_for_tests);
}

/// Serves `ids` in order, paged by whatever size the request asks for.
#[derive(Default)]
pub struct InMemoryFetcher {
    ids: Vec<u64>,
    with_metadata: bool,
    reported_total: Option<u64>,
    reported_total_pages: Option<u64>,
    failing_pages: Mutex<HashSet<u32>>,
    cancel_on: Option<(u32, CancellationToken)>,
    gate: Option<Gate>,
    calls: Mutex<Vec<PageRequest>>,
}

/// Blocks a single page until released, announcing when the page is reached.
#[derive(Clone, Default)]
pub struct Gate {
    pub page: u32,
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl InMemoryFetcher {
    pub fn with_ids(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            with_metadata: true,
            ..Self::default()
        }
    }

    /// Dataset of ids `1..=count`.
    pub fn sequential(count: u64) -> Self {
        Self::with_ids(1..=count)
    }

    pub fn without_metadata(mut self) -> Self {
        self.with_metadata = false;
        self
    }

    /// Report `total` in the metadata instead of the real dataset size.
    pub fn reporting_total(mut self, total: u64) -> Self {
        self.reported_total = Some(total);
        self
    }

    /// Report `total_pages` in the metadata instead of the real page count.
    pub fn reporting_total_pages(mut self, total_pages: u64) -> Self {
        self.reported_total_pages = Some(total_pages);
        self
    }

    pub fn failing_on(self, page: u32) -> Self {
        self.set_failing(page, true);
        self
    }

    pub fn set_failing(&self, page: u32, failing: bool) {
        let mut pages = self.failing_pages.lock().unwrap();
        if failing {
            pages.insert(page);
        } else {
            pages.remove(&page);
        }
    }

    /// Cancel `token` as soon as `page` is requested.
    pub fn cancelling_on(mut self, page: u32, token: CancellationToken) -> Self {
        self.cancel_on = Some((page, token));
        self
    }

    pub fn gated(mut self, gate: Gate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<PageRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.calls().iter().map(|call| call.page_number).collect()
    }
}

#[async_trait::async_trait]
impl DataFetcher for InMemoryFetcher {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse, FetchError> {
        self.calls.lock().unwrap().push(request.clone());

        if let Some((page, token)) = &self.cancel_on {
            if *page == request.page_number {
                token.cancel();
            }
        }
        if let Some(gate) = &self.gate {
            if gate.page == request.page_number {
                gate.entered.notify_one();
                gate.release.notified().await;
            }
        }
        if self.failing_pages.lock().unwrap().contains(&request.page_number) {
            return Err(FetchError::new(FailureKind::HttpStatus(500), "boom"));
        }

        let size = request.page_size as usize;
        let start = (request.page_number as usize - 1) * size;
        let records = self
            .ids
            .iter()
            .skip(start)
            .take(size)
            .map(|id| Record {
                title: format!("Artwork {id}"),
                ..Record::with_defaults(*id)
            })
            .collect();

        let total = self.ids.len() as u64;
        let pagination = if self.with_metadata {
            PaginationMeta {
                total: Some(self.reported_total.unwrap_or(total)),
                total_pages: Some(
                    self.reported_total_pages
                        .unwrap_or_else(|| total.div_ceil(size as u64)),
                ),
            }
        } else {
            PaginationMeta::default()
        };
        Ok(PageResponse {
            records,
            pagination,
        })
    }
}
