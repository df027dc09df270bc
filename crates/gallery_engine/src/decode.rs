use gallery_core::{Record, MISSING_TEXT, UNTITLED};
use gallery_logging::gallery_warn;
use serde::Deserialize;

use crate::{FailureKind, FetchError, PageResponse, PaginationMeta};

#[derive(Debug, Deserialize)]
struct ArtworksPayload {
    #[serde(default)]
    data: Option<Vec<RawArtwork>>,
    #[serde(default)]
    pagination: Option<RawPagination>,
}

#[derive(Debug, Deserialize)]
struct RawArtwork {
    id: Option<u64>,
    title: Option<String>,
    place_of_origin: Option<String>,
    artist_display: Option<String>,
    inscriptions: Option<String>,
    date_start: Option<i32>,
    date_end: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct RawPagination {
    total: Option<u64>,
    total_pages: Option<u64>,
}

/// Decode an artworks JSON payload, defaulting absent fields to their sentinels.
///
/// Entries without an `id` cannot take part in selection and are dropped.
pub fn decode_page_payload(bytes: &[u8]) -> Result<PageResponse, FetchError> {
    let payload: ArtworksPayload = serde_json::from_slice(bytes)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;

    let raw = payload.data.unwrap_or_default();
    let raw_len = raw.len();
    let records: Vec<Record> = raw.into_iter().filter_map(into_record).collect();
    if records.len() < raw_len {
        gallery_warn!(
            "Dropped {} record(s) without an id from page payload",
            raw_len - records.len()
        );
    }

    let pagination = payload
        .pagination
        .map(|raw| PaginationMeta {
            total: raw.total,
            total_pages: raw.total_pages,
        })
        .unwrap_or_default();

    Ok(PageResponse {
        records,
        pagination,
    })
}

fn into_record(raw: RawArtwork) -> Option<Record> {
    let id = raw.id?;
    Some(Record {
        id,
        title: raw.title.unwrap_or_else(|| UNTITLED.to_string()),
        place_of_origin: raw.place_of_origin.unwrap_or_else(|| MISSING_TEXT.to_string()),
        artist_display: raw.artist_display.unwrap_or_else(|| MISSING_TEXT.to_string()),
        inscriptions: raw.inscriptions.unwrap_or_else(|| MISSING_TEXT.to_string()),
        date_start: raw.date_start,
        date_end: raw.date_end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_null_fields_get_sentinels() {
        let body = br#"{
            "data": [
                {"id": 1, "title": "Nighthawks", "inscriptions": null, "date_start": 1942},
                {"id": 2}
            ],
            "pagination": {"total": 2, "total_pages": 1}
        }"#;

        let page = decode_page_payload(body).unwrap();

        assert_eq!(page.records[0].title, "Nighthawks");
        assert_eq!(page.records[0].inscriptions, "-");
        assert_eq!(page.records[0].date_start, Some(1942));
        assert_eq!(page.records[1], Record::with_defaults(2));
        assert_eq!(page.pagination.total, Some(2));
    }

    #[test]
    fn missing_data_and_pagination_decode_empty() {
        let page = decode_page_payload(br#"{"data": null}"#).unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.pagination, PaginationMeta::default());
    }

    #[test]
    fn entries_without_id_are_dropped() {
        let page = decode_page_payload(br#"{"data": [{"title": "orphan"}, {"id": 5}]}"#).unwrap();
        let ids: Vec<_> = page.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5]);
    }

    #[test]
    fn malformed_payload_is_decode_error() {
        let err = decode_page_payload(b"<html>").unwrap_err();
        assert_eq!(err.kind, FailureKind::Decode);
    }
}
