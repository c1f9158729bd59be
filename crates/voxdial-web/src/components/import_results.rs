//! Contacts import summary

use voxdial_core::{BulkImportResult, ImportRowError, utils::escape_html};

/// Counters of an import, plus a table of rejected rows when there are any
#[must_use]
pub fn render(result: &BulkImportResult) -> String {
    let counters = [
        ("Total rows", result.total_rows, "stat"),
        ("Imported", result.imported, "stat stat-success"),
        ("Duplicates skipped", result.duplicates_skipped, "stat stat-warning"),
        ("Failed", result.failed, "stat stat-danger"),
    ]
    .iter()
    .map(|(label, value, class)| {
        format!(
            r#"<div class="{class}"><span class="stat-value">{value}</span><span class="stat-label">{label}</span></div>"#
        )
    })
    .collect::<String>();

    let errors = if result.has_row_errors() {
        let rows: String = result.errors.iter().map(error_row).collect();
        format!(
            r#"<h3>Rows with errors</h3>
<table class="table import-errors">
<thead><tr><th>Row</th><th>Phone</th><th>Error</th></tr></thead>
<tbody>{rows}</tbody>
</table>"#
        )
    } else {
        String::new()
    };

    format!(
        r#"<section class="import-results"><h2>Import complete</h2><div class="stats-grid">{counters}</div>{errors}</section>"#
    )
}

fn error_row(error: &ImportRowError) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
        error.row,
        escape_html(&error.phone),
        escape_html(&error.error)
    )
}
