//! Call list component for displaying calls

use super::status_badge;
use voxdial_core::{
    Call,
    utils::{MISSING, escape_html, format_duration},
};

/// Shown instead of the table when there are no calls
pub const EMPTY_STATE: &str = r#"<div class="empty-state"><h3>No calls yet</h3><p>Calls placed by your campaigns will appear here.</p></div>"#;

/// Table of calls, or the empty state when `calls` is empty
#[must_use]
pub fn render(calls: &[Call]) -> String {
    if calls.is_empty() {
        return EMPTY_STATE.to_string();
    }

    let rows: String = calls.iter().map(row).collect();
    format!(
        r#"<table class="table call-list">
<thead><tr><th>Phone</th><th>Status</th><th>Outcome</th><th>Duration</th><th>Date</th><th></th></tr></thead>
<tbody>{rows}</tbody>
</table>"#
    )
}

/// Individual call row
fn row(call: &Call) -> String {
    format!(
        r#"<tr><td>{phone}</td><td>{status}</td><td>{outcome}</td><td>{duration}</td><td>{date}</td><td><a href="/dashboard/calls/{id}">View</a></td></tr>"#,
        phone = escape_html(&call.phone_number),
        status = status_badge::call_status(call.status),
        outcome = escape_html(call.outcome.as_deref().unwrap_or(MISSING)),
        duration = format_duration(call.duration_seconds),
        date = call.created_at.format("%Y-%m-%d %H:%M"),
        id = urlencoding::encode(&call.id),
    )
}
