//! Gallery engine: remote page fetching, pagination and bulk selection.
mod bulk;
mod decode;
mod fetch;
mod pagination;
mod session;
mod types;

pub use bulk::{BulkOutcome, BulkSelectError, BulkSelector, StopReason};
pub use decode::decode_page_payload;
pub use fetch::{DataFetcher, FetchSettings, ReqwestFetcher, DEFAULT_API_BASE};
pub use pagination::{LoadingIndicator, PaginationController};
pub use session::{GallerySession, SessionSettings};
pub use types::{FailureKind, FetchError, PageRequest, PageResponse, PaginationMeta};

pub use tokio_util::sync::CancellationToken;
