use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gallery_core::{Page, RecordField};
use gallery_logging::{gallery_debug, gallery_info, gallery_warn};

use crate::{DataFetcher, FetchError, PageRequest};

/// Tracks the page on display and turns navigation into page fetches.
///
/// Navigation takes `&mut self`, so at most one navigation fetch is in
/// flight per controller. Each call issues exactly one fetch.
pub struct PaginationController {
    fetcher: Arc<dyn DataFetcher>,
    page: Page,
    loading: LoadingIndicator,
}

/// Observable view of whether a navigation fetch is outstanding.
///
/// Clones share the flag, so the presentation layer can poll it while
/// `go_to_page` holds the controller.
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    flag: Arc<AtomicBool>,
}

impl LoadingIndicator {
    pub fn is_loading(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    fn start(&self) -> LoadingGuard {
        self.flag.store(true, Ordering::Release);
        LoadingGuard {
            flag: self.flag.clone(),
        }
    }
}

/// Clears the loading flag when the fetch settles or its future is dropped.
struct LoadingGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl PaginationController {
    pub fn new(fetcher: Arc<dyn DataFetcher>, page_size: u32) -> Self {
        Self {
            fetcher,
            page: Page::empty(1, page_size.max(1)),
            loading: LoadingIndicator::default(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_number(&self) -> u32 {
        self.page.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page.page_size
    }

    pub fn total_records(&self) -> u64 {
        self.page.total_records
    }

    /// True while a navigation fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn loading_indicator(&self) -> LoadingIndicator {
        self.loading.clone()
    }

    /// Load `page_number` at `page_size`, replacing the current page.
    ///
    /// A `page_size` different from the current one restarts at page 1 of
    /// the new size. On failure the page is cleared to empty with a zero
    /// total and the error is returned.
    pub async fn go_to_page(&mut self, page_number: u32, page_size: u32) -> Result<&Page, FetchError> {
        let page_size = page_size.max(1);
        let page_number = if page_size != self.page.page_size {
            gallery_debug!(
                "Page size changed {} -> {}; requested page {} becomes page 1",
                self.page.page_size,
                page_size,
                page_number
            );
            1
        } else {
            page_number.max(1)
        };

        let request = PageRequest::new(page_number, page_size, RecordField::ALL);
        let guard = self.loading.start();
        let result = self.fetcher.fetch_page(&request).await;
        drop(guard);

        match result {
            Ok(response) => {
                let mut total = response.total_records(page_size);
                if total == 0 {
                    total = response.records.len() as u64;
                }
                self.page = Page::new(response.records, page_number, page_size, total);
                gallery_info!(
                    "Loaded page {} ({} records, {} total)",
                    page_number,
                    self.page.records.len(),
                    total
                );
                Ok(&self.page)
            }
            Err(err) => {
                gallery_warn!("Failed to load page {}: {}", page_number, err);
                self.page = Page::empty(page_number, page_size);
                Err(err)
            }
        }
    }

    /// Switch to a new page size, which always lands on page 1.
    pub async fn change_page_size(&mut self, page_size: u32) -> Result<&Page, FetchError> {
        self.go_to_page(1, page_size).await
    }

    /// Fetch the current page again.
    pub async fn reload(&mut self) -> Result<&Page, FetchError> {
        let (page_number, page_size) = (self.page.page_number, self.page.page_size);
        self.go_to_page(page_number, page_size).await
    }
}
