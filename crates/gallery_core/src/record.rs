use std::fmt;

pub type RecordId = u64;

/// Title used when the source omits one.
pub const UNTITLED: &str = "Untitled";
/// Placeholder for absent free-text fields.
pub const MISSING_TEXT: &str = "-";

/// One artwork row as delivered by the remote collection.
///
/// Records are immutable once fetched; identity is carried by `id` alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub place_of_origin: String,
    pub artist_display: String,
    pub inscriptions: String,
    pub date_start: Option<i32>,
    pub date_end: Option<i32>,
}

impl Record {
    /// A record carrying only its identifier, every other field at its sentinel.
    pub fn with_defaults(id: RecordId) -> Self {
        Self {
            id,
            title: UNTITLED.to_string(),
            place_of_origin: MISSING_TEXT.to_string(),
            artist_display: MISSING_TEXT.to_string(),
            inscriptions: MISSING_TEXT.to_string(),
            date_start: None,
            date_end: None,
        }
    }
}

/// Fields that can be projected by a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Id,
    Title,
    PlaceOfOrigin,
    ArtistDisplay,
    Inscriptions,
    DateStart,
    DateEnd,
}

impl RecordField {
    /// Everything a table row displays.
    pub const ALL: &'static [RecordField] = &[
        RecordField::Id,
        RecordField::Title,
        RecordField::PlaceOfOrigin,
        RecordField::ArtistDisplay,
        RecordField::Inscriptions,
        RecordField::DateStart,
        RecordField::DateEnd,
    ];

    /// Minimal projection used when only identifiers matter.
    pub const ID_AND_TITLE: &'static [RecordField] = &[RecordField::Id, RecordField::Title];

    /// Name of the field in the remote API.
    pub fn api_name(self) -> &'static str {
        match self {
            RecordField::Id => "id",
            RecordField::Title => "title",
            RecordField::PlaceOfOrigin => "place_of_origin",
            RecordField::ArtistDisplay => "artist_display",
            RecordField::Inscriptions => "inscriptions",
            RecordField::DateStart => "date_start",
            RecordField::DateEnd => "date_end",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// One server-delivered window of records.
///
/// A page is replaced wholesale on navigation and never merged with another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub records: Vec<Record>,
    /// 1-indexed.
    pub page_number: u32,
    pub page_size: u32,
    pub total_records: u64,
}

impl Page {
    pub fn new(records: Vec<Record>, page_number: u32, page_size: u32, total_records: u64) -> Self {
        Self {
            records,
            page_number,
            page_size,
            total_records,
        }
    }

    /// The state shown after a failed fetch: no rows and no known total.
    pub fn empty(page_number: u32, page_size: u32) -> Self {
        Self::new(Vec::new(), page_number, page_size, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.records.iter().map(|record| record.id)
    }

    /// Number of pages implied by `total_records` at this page size.
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_records.div_ceil(u64::from(self.page_size))
    }
}
