//! Gallery core: pure selection state and view-model helpers.
mod record;
mod selection;
mod view_binder;
mod view_model;

pub use record::{Page, Record, RecordField, RecordId, MISSING_TEXT, UNTITLED};
pub use selection::{SelectionStore, SharedSelection};
pub use view_binder::{current_page_selection, on_user_toggle, ToggleSummary};
pub use view_model::{PageView, RowView};
