use std::fmt;

use gallery_core::{Record, RecordField};

/// One remote page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-indexed.
    pub page_number: u32,
    pub page_size: u32,
    pub fields: Vec<RecordField>,
}

impl PageRequest {
    pub fn new(page_number: u32, page_size: u32, fields: &[RecordField]) -> Self {
        Self {
            page_number,
            page_size,
            fields: fields.to_vec(),
        }
    }

    /// Comma separated API field names, in request order.
    pub fn fields_csv(&self) -> String {
        self.fields
            .iter()
            .map(|field| field.api_name())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Pagination metadata as reported by the remote collection. Both values are optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationMeta {
    pub total: Option<u64>,
    pub total_pages: Option<u64>,
}

/// Records of one page with sentinel defaults already applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageResponse {
    pub records: Vec<Record>,
    pub pagination: PaginationMeta,
}

impl PageResponse {
    /// Total record count: `total`, else `total_pages * page_size`, else the page length.
    pub fn total_records(&self, page_size: u32) -> u64 {
        self.pagination
            .total
            .or_else(|| {
                self.pagination
                    .total_pages
                    .map(|pages| pages.saturating_mul(u64::from(page_size)))
            })
            .unwrap_or(self.records.len() as u64)
    }

    /// Whether pages after `page_number` exist. Absent metadata means no.
    pub fn has_more_pages(&self, page_number: u32) -> bool {
        matches!(self.pagination.total_pages, Some(pages) if u64::from(page_number) < pages)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed payload"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
