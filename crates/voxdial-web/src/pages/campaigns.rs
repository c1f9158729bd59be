//! Campaign list and creation form

use super::heading;
use crate::{
    api_client::ApiClient,
    components::{error_banner, loading, status_badge},
    view::ViewState,
};
use voxdial_core::{
    Campaign, NewCampaign, Result, VOICE_OPTIONS,
    utils::{MISSING, escape_html},
};

/// Path of the campaign list
pub const CAMPAIGNS_PATH: &str = "/dashboard/campaigns";

/// Path of the creation form
pub const NEW_CAMPAIGN_PATH: &str = "/dashboard/campaigns/new";

const EMPTY_STATE: &str = r#"<div class="empty-state"><h3>No campaigns yet</h3><p>Create a campaign to start calling your contacts.</p><a class="btn btn-primary" href="/dashboard/campaigns/new">Create Campaign</a></div>"#;

/// Fetch all campaigns
///
/// # Errors
///
/// Returns an error if the backend request fails.
pub async fn load(api: &ApiClient) -> Result<Vec<Campaign>> {
    api.list_campaigns().await
}

/// Validate and submit the creation form
///
/// # Errors
///
/// Returns a validation error before any request when a required field is
/// blank, otherwise whatever the backend reports.
pub async fn submit(api: &ApiClient, form: NewCampaign) -> Result<Campaign> {
    let campaign = form.normalized();
    campaign.check()?;
    api.create_campaign(&campaign).await
}

/// Render the campaign list body
#[must_use]
pub fn render(view: &ViewState<Vec<Campaign>>) -> String {
    match view {
        ViewState::Loading => loading::spinner("Loading campaigns..."),
        ViewState::Failed(message) => error_banner::render(message, Some((CAMPAIGNS_PATH, "Retry"))),
        ViewState::Ready(campaigns) if campaigns.is_empty() => EMPTY_STATE.to_string(),
        ViewState::Ready(campaigns) => table(campaigns),
    }
}

/// Page heading of the campaign list
#[must_use]
pub fn header() -> String {
    heading("Campaigns", Some((NEW_CAMPAIGN_PATH, "New Campaign")))
}

fn table(campaigns: &[Campaign]) -> String {
    let rows: String = campaigns
        .iter()
        .map(|campaign| {
            format!(
                "<tr><td><strong>{}</strong><br><span class=\"muted\">{}</span></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&campaign.name),
                escape_html(campaign.description.as_deref().unwrap_or("")),
                status_badge::campaign_status(campaign.status),
                escape_html(campaign.voice.as_deref().unwrap_or(MISSING)),
                campaign.total_leads,
                campaign.calls_made,
            )
        })
        .collect();

    format!(
        r#"<table class="table campaigns">
<thead><tr><th>Name</th><th>Status</th><th>Voice</th><th>Leads</th><th>Calls made</th></tr></thead>
<tbody>{rows}</tbody>
</table>"#
    )
}

/// Creation form, prefilled with `form` and showing `error` above the fields
#[must_use]
pub fn render_form(form: &NewCampaign, error: Option<&str>) -> String {
    let error = error.map_or_else(String::new, |message| error_banner::render(message, None));
    let selected_voice = form.voice.as_deref().unwrap_or("alloy");
    let voices: String = VOICE_OPTIONS
        .iter()
        .map(|(value, label)| {
            let selected = if *value == selected_voice { " selected" } else { "" };
            format!(r#"<option value="{value}"{selected}>{label}</option>"#)
        })
        .collect();

    format!(
        r#"{heading}
{error}
<form class="card form" method="post" action="{NEW_CAMPAIGN_PATH}">
<label for="name">Campaign name</label>
<input id="name" name="name" type="text" required value="{name}">
<label for="description">Description</label>
<input id="description" name="description" type="text" value="{description}">
<label for="goal">Goal</label>
<input id="goal" name="goal" type="text" placeholder="Book a product demo" value="{goal}">
<label for="voice">Voice</label>
<select id="voice" name="voice">{voices}</select>
<label for="system_prompt">System prompt</label>
<textarea id="system_prompt" name="system_prompt" rows="8" required>{system_prompt}</textarea>
<div class="form-actions">
<a class="btn btn-secondary" href="{CAMPAIGNS_PATH}">Cancel</a>
<button class="btn btn-primary" type="submit">Create Campaign</button>
</div>
</form>"#,
        heading = heading("New Campaign", None),
        name = escape_html(&form.name),
        description = escape_html(form.description.as_deref().unwrap_or("")),
        goal = escape_html(form.goal.as_deref().unwrap_or("")),
        system_prompt = escape_html(&form.system_prompt),
    )
}
