//! Dashboard home: usage counters and recent calls

use crate::{
    api_client::ApiClient,
    components::{call_list, error_banner, loading},
    view::ViewState,
};
use voxdial_core::{
    Call, DashboardSummary, Result,
    utils::{escape_html, format_minutes},
};

/// Data behind the dashboard home
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    /// Usage counters
    pub summary: DashboardSummary,
    /// Most recent calls
    pub recent_calls: Vec<Call>,
}

/// Fetch the summary and the most recent calls concurrently
///
/// # Errors
///
/// Returns the first error of either request.
pub async fn load(api: &ApiClient, recent_limit: u32) -> Result<DashboardData> {
    let (summary, recent) = tokio::try_join!(
        api.get_dashboard_summary(),
        api.list_calls(1, recent_limit)
    )?;

    Ok(DashboardData {
        summary,
        recent_calls: recent.calls,
    })
}

/// Render the dashboard body
#[must_use]
pub fn render(view: &ViewState<DashboardData>) -> String {
    match view {
        ViewState::Loading => loading::spinner("Loading dashboard..."),
        ViewState::Failed(message) => error_banner::render(message, Some(("/dashboard", "Retry"))),
        ViewState::Ready(data) => ready(data),
    }
}

fn ready(data: &DashboardData) -> String {
    let summary = &data.summary;
    let cards = [
        ("Total calls", summary.total_calls.to_string()),
        ("Answered", summary.answered_calls.to_string()),
        ("Failed", summary.failed_calls.to_string()),
        ("Answer rate", format!("{:.0}%", summary.answer_rate())),
        ("Active campaigns", summary.active_campaigns.to_string()),
        ("Minutes used", format_minutes(summary.minutes_used)),
        ("Minutes remaining", format_minutes(summary.minutes_remaining)),
    ]
    .iter()
    .map(|(label, value)| {
        format!(
            r#"<div class="stat-card"><span class="stat-value">{}</span><span class="stat-label">{label}</span></div>"#,
            escape_html(value)
        )
    })
    .collect::<String>();

    format!(
        r#"<div class="stats-grid">{cards}</div>
<section class="card">
<div class="card-header"><h2>Recent calls</h2><a href="/dashboard/calls">View all</a></div>
{calls}
</section>"#,
        calls = call_list::render(&data.recent_calls)
    )
}
