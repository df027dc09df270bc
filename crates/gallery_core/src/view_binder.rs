use std::collections::HashSet;

use crate::{Page, Record, RecordId, SelectionStore};

/// Result of applying a per-page toggle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleSummary {
    pub added: usize,
    pub removed: usize,
}

/// Rows of `page` that are selected, in page order.
pub fn current_page_selection<'a>(page: &'a Page, store: &SelectionStore) -> Vec<&'a Record> {
    page.records
        .iter()
        .filter(|record| store.contains(record.id))
        .collect()
}

/// Applies a toggle event as the complete selection state of `page`.
///
/// Every record on the page is added when listed in `selected_on_page` and
/// removed otherwise, including records selected by an earlier bulk scan.
/// Listed ids that are not on the page are ignored.
pub fn on_user_toggle<I>(page: &Page, selected_on_page: I, store: &mut SelectionStore) -> ToggleSummary
where
    I: IntoIterator<Item = RecordId>,
{
    let wanted: HashSet<RecordId> = selected_on_page.into_iter().collect();
    let mut summary = ToggleSummary::default();
    for id in page.ids() {
        if wanted.contains(&id) {
            if store.add(id) {
                summary.added += 1;
            }
        } else if store.remove(id) {
            summary.removed += 1;
        }
    }
    summary
}
