use crate::{Page, RecordId, SelectionStore};

/// Everything the presentation layer needs to draw one page of the table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageView {
    pub page_number: u32,
    pub page_size: u32,
    pub total_records: u64,
    pub total_pages: u64,
    pub loading: bool,
    pub rows: Vec<RowView>,
    pub selected_on_page: usize,
    pub selection_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: RecordId,
    pub title: String,
    pub place_of_origin: String,
    pub artist_display: String,
    pub inscriptions: String,
    pub date_start: Option<i32>,
    pub date_end: Option<i32>,
    pub selected: bool,
}

impl PageView {
    pub fn build(page: &Page, store: &SelectionStore, loading: bool) -> Self {
        let rows: Vec<RowView> = page
            .records
            .iter()
            .map(|record| RowView {
                id: record.id,
                title: record.title.clone(),
                place_of_origin: record.place_of_origin.clone(),
                artist_display: record.artist_display.clone(),
                inscriptions: record.inscriptions.clone(),
                date_start: record.date_start,
                date_end: record.date_end,
                selected: store.contains(record.id),
            })
            .collect();
        let selected_on_page = rows.iter().filter(|row| row.selected).count();

        Self {
            page_number: page.page_number,
            page_size: page.page_size,
            total_records: page.total_records,
            total_pages: page.total_pages(),
            loading,
            rows,
            selected_on_page,
            selection_size: store.size(),
        }
    }

    /// Table header line, e.g. `Page 2 of 3 (30 total)`.
    pub fn header(&self) -> String {
        if self.loading {
            return format!("Page {} (loading...)", self.page_number);
        }
        if self.total_pages == 0 {
            return format!("Page {} (no records)", self.page_number);
        }
        format!(
            "Page {} of {} ({} total)",
            self.page_number, self.total_pages, self.total_records
        )
    }
}
