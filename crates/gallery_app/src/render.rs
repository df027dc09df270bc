use gallery_core::{PageView, RowView};
use gallery_engine::{BulkOutcome, BulkSelectError, StopReason};

const TITLE_WIDTH: usize = 40;

pub fn render_page(view: &PageView) -> String {
    let mut out = format!(
        "{} | selected here: {} | selected overall: {}\n",
        view.header(),
        view.selected_on_page,
        view.selection_size
    );
    for row in &view.rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out
}

fn render_row(row: &RowView) -> String {
    format!(
        " [{}] {:>7}  {:<width$} | {} | {} | {} | {}",
        if row.selected { 'x' } else { ' ' },
        row.id,
        truncate(&row.title, TITLE_WIDTH),
        row.place_of_origin,
        single_line(&row.artist_display),
        single_line(&row.inscriptions),
        format_dates(row.date_start, row.date_end),
        width = TITLE_WIDTH,
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn format_dates(start: Option<i32>, end: Option<i32>) -> String {
    match (start, end) {
        (Some(start), Some(end)) if start == end => start.to_string(),
        (Some(start), Some(end)) => format!("{start}-{end}"),
        (Some(year), None) | (None, Some(year)) => year.to_string(),
        (None, None) => "-".to_string(),
    }
}

pub fn render_bulk_result(result: &Result<BulkOutcome, BulkSelectError>) -> String {
    match result {
        Ok(outcome) => match outcome.stop {
            StopReason::NonPositiveTarget => "Nothing to select.".to_string(),
            StopReason::AlreadySatisfied => "Selection already holds that many records.".to_string(),
            StopReason::TargetReached => format!(
                "Selected {} more record(s) from {} page(s).",
                outcome.added, outcome.pages_scanned
            ),
            StopReason::Exhausted => format!(
                "Reached the end of the collection after adding {} record(s).",
                outcome.added
            ),
            StopReason::Cancelled => format!(
                "Bulk select cancelled; kept {} record(s) already added.",
                outcome.added
            ),
        },
        Err(err) => format!(
            "Bulk select failed on page {} ({}); kept {} record(s) already added.",
            err.failed_page, err.source, err.added
        ),
    }
}

/// Result of a background bulk select followed by the page it changed.
pub fn render_bulk_completion(
    result: &Result<BulkOutcome, BulkSelectError>,
    view: &PageView,
) -> String {
    format!("{}\n{}", render_bulk_result(result), render_page(view))
}
