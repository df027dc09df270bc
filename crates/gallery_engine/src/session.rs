use std::sync::Arc;

use gallery_core::{
    current_page_selection, on_user_toggle, Page, PageView, Record, RecordId, SharedSelection,
    ToggleSummary,
};
use gallery_logging::gallery_info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{
    BulkOutcome, BulkSelectError, BulkSelector, DataFetcher, FetchError, LoadingIndicator,
    PaginationController,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Rows per displayed page.
    pub page_size: u32,
    /// Rows per page fetched by bulk selection.
    pub scan_page_size: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            page_size: 12,
            scan_page_size: 12,
        }
    }
}

/// One browsing session: the selection plus everything that reads or mutates it.
///
/// The selection lives exactly as long as the session. Dropping the session
/// cancels any bulk scan still running; ids that scan already added stay in
/// any [`SharedSelection`] handle obtained from [`GallerySession::selection`].
pub struct GallerySession {
    selection: SharedSelection,
    pagination: PaginationController,
    bulk: BulkSelector,
    shutdown: CancellationToken,
    bulk_cancel: Option<CancellationToken>,
}

impl GallerySession {
    pub fn new(fetcher: Arc<dyn DataFetcher>, settings: SessionSettings) -> Self {
        Self {
            selection: SharedSelection::new(),
            pagination: PaginationController::new(fetcher.clone(), settings.page_size),
            bulk: BulkSelector::new(fetcher, settings.scan_page_size),
            shutdown: CancellationToken::new(),
            bulk_cancel: None,
        }
    }

    pub fn selection(&self) -> &SharedSelection {
        &self.selection
    }

    pub fn page(&self) -> &Page {
        self.pagination.page()
    }

    pub fn is_loading(&self) -> bool {
        self.pagination.is_loading()
    }

    pub fn loading_indicator(&self) -> LoadingIndicator {
        self.pagination.loading_indicator()
    }

    pub fn view(&self) -> PageView {
        let store = self.selection.snapshot();
        PageView::build(self.pagination.page(), &store, self.pagination.is_loading())
    }

    pub async fn go_to_page(&mut self, page_number: u32, page_size: u32) -> Result<&Page, FetchError> {
        self.pagination.go_to_page(page_number, page_size).await
    }

    pub async fn change_page_size(&mut self, page_size: u32) -> Result<&Page, FetchError> {
        self.pagination.change_page_size(page_size).await
    }

    pub async fn reload(&mut self) -> Result<&Page, FetchError> {
        self.pagination.reload().await
    }

    /// Selected rows of the loaded page, in page order.
    pub fn current_page_selection(&self) -> Vec<Record> {
        let page = self.pagination.page();
        self.selection.with(|store| {
            current_page_selection(page, store)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// Apply the complete selection state of the loaded page.
    pub fn toggle_page_selection<I>(&self, selected_on_page: I) -> ToggleSummary
    where
        I: IntoIterator<Item = RecordId>,
    {
        let page = self.pagination.page();
        self.selection
            .with(|store| on_user_toggle(page, selected_on_page, store))
    }

    /// Run a bulk select to completion, superseding any scan already running.
    pub async fn bulk_select(&mut self, target: i64) -> Result<BulkOutcome, BulkSelectError> {
        let cancel = self.begin_bulk_scan();
        let _finished = cancel.clone().drop_guard();
        self.bulk.select(target, &self.selection, &cancel).await
    }

    /// Start a bulk select in the background, superseding any scan already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_bulk_select(&mut self, target: i64) -> JoinHandle<Result<BulkOutcome, BulkSelectError>> {
        let cancel = self.begin_bulk_scan();
        let bulk = self.bulk.clone();
        let selection = self.selection.clone();
        tokio::spawn(async move {
            let _finished = cancel.clone().drop_guard();
            bulk.select(target, &selection, &cancel).await
        })
    }

    /// Whether a bulk scan started by this session is still in progress.
    pub fn is_bulk_select_running(&self) -> bool {
        self.bulk_cancel
            .as_ref()
            .is_some_and(|cancel| !cancel.is_cancelled())
    }

    /// Stop a running bulk scan. Already added ids remain selected.
    pub fn cancel_bulk_select(&mut self) {
        // A finished scan has already fired its token, so only live scans are reported.
        if let Some(cancel) = self.bulk_cancel.take() {
            if !cancel.is_cancelled() {
                gallery_info!("Cancelling bulk select");
                cancel.cancel();
            }
        }
    }

    fn begin_bulk_scan(&mut self) -> CancellationToken {
        self.cancel_bulk_select();
        let cancel = self.shutdown.child_token();
        self.bulk_cancel = Some(cancel.clone());
        cancel
    }
}

impl Drop for GallerySession {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
