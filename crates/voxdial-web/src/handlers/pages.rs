//! Page handlers
//!
//! Listing pages answer with a shell whose body is fetched from a fragment
//! route; form submissions render their result inline.

use super::PageQuery;
use crate::{
    components::{
        layout::{self, NavItem, Shell},
        loading,
    },
    pages::{
        call_detail, calls,
        campaigns::{self, CAMPAIGNS_PATH},
        contacts::{self, UploadState},
        dashboard, heading, landing, not_found,
    },
    session::{Session, SignedIn},
    state::AppState,
    view::ViewState,
};
use axum::{
    Form,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{info, warn};
use voxdial_core::{Error, NewCampaign};

fn dashboard_page(state: &AppState, title: &str, nav: NavItem, body: &str) -> Html<String> {
    Html(layout::render(
        &Shell::dashboard(title, nav, &state.config.assistant),
        body,
    ))
}

/// Landing page
pub async fn landing(State(state): State<Arc<AppState>>, session: Session) -> Html<String> {
    Html(layout::render(
        &Shell::public("AI voice calling", &state.config.assistant),
        &landing::render(session.is_signed_in()),
    ))
}

/// Dashboard home
pub async fn dashboard(State(state): State<Arc<AppState>>, _user: SignedIn) -> Html<String> {
    let body = format!(
        "{}{}",
        heading("Overview", None),
        loading::deferred("/fragments/dashboard", &dashboard::render(&ViewState::Loading))
    );
    dashboard_page(&state, "Dashboard", NavItem::Overview, &body)
}

/// Campaign list
pub async fn campaigns(State(state): State<Arc<AppState>>, _user: SignedIn) -> Html<String> {
    let body = format!(
        "{}{}",
        campaigns::header(),
        loading::deferred("/fragments/campaigns", &campaigns::render(&ViewState::Loading))
    );
    dashboard_page(&state, "Campaigns", NavItem::Campaigns, &body)
}

/// Empty campaign form
pub async fn new_campaign(State(state): State<Arc<AppState>>, _user: SignedIn) -> Html<String> {
    let body = campaigns::render_form(&NewCampaign::default(), None);
    dashboard_page(&state, "New Campaign", NavItem::Campaigns, &body)
}

/// Create a campaign, then go back to the list
pub async fn create_campaign(
    State(state): State<Arc<AppState>>,
    user: SignedIn,
    Form(form): Form<NewCampaign>,
) -> Response {
    let api = state.api_for(&user.access_token);

    match campaigns::submit(&api, form.clone()).await {
        Ok(campaign) => {
            info!(campaign_id = %campaign.id, "Campaign created");
            Redirect::to(CAMPAIGNS_PATH).into_response()
        }
        Err(e) => {
            let status = if matches!(e, Error::Validation { .. }) {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                warn!(error = %e, "Campaign creation failed");
                StatusCode::OK
            };
            let body = campaigns::render_form(&form, Some(&e.user_message()));
            (status, dashboard_page(&state, "New Campaign", NavItem::Campaigns, &body)).into_response()
        }
    }
}

/// Paged call history
pub async fn calls(
    State(state): State<Arc<AppState>>,
    _user: SignedIn,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let fragment = format!("/fragments/calls?page={}", query.page());
    let body = format!(
        "{}{}",
        heading("Calls", None),
        loading::deferred(&fragment, &calls::render(&ViewState::Loading))
    );
    dashboard_page(&state, "Calls", NavItem::Calls, &body)
}

/// Single call
pub async fn call_detail(
    State(state): State<Arc<AppState>>,
    _user: SignedIn,
    Path(call_id): Path<String>,
) -> Html<String> {
    let fragment = format!("/fragments/calls/{}", urlencoding::encode(&call_id));
    let body = loading::deferred(&fragment, &call_detail::render(&ViewState::Loading));
    dashboard_page(&state, "Call", NavItem::Calls, &body)
}

/// Contacts import form
pub async fn contacts(State(state): State<Arc<AppState>>, _user: SignedIn) -> Html<String> {
    dashboard_page(
        &state,
        "Contacts",
        NavItem::Contacts,
        &contacts::render(&UploadState::Idle),
    )
}

/// Import an uploaded contacts file
pub async fn upload_contacts(
    State(state): State<Arc<AppState>>,
    user: SignedIn,
    mut multipart: Multipart,
) -> Html<String> {
    let upload = match read_file_field(&mut multipart).await {
        Ok(Some((file_name, contents))) => {
            let api = state.api_for(&user.access_token);
            contacts::upload(&api, file_name.as_deref(), contents).await
        }
        Ok(None) => contacts::upload(&state.api_client, None, Vec::new()).await,
        Err(e) => {
            warn!(error = %e, "Failed to read contacts upload");
            UploadState::Failed("Failed to read the uploaded file".to_string())
        }
    };

    dashboard_page(&state, "Contacts", NavItem::Contacts, &contacts::render(&upload))
}

/// File name and contents of the `file` form field
async fn read_file_field(
    multipart: &mut Multipart,
) -> Result<Option<(Option<String>, Vec<u8>)>, axum::extract::multipart::MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let file_name = field.file_name().map(str::to_string);
            let contents = field.bytes().await?;
            return Ok(Some((file_name, contents.to_vec())));
        }
    }
    Ok(None)
}

/// Telephony integrations live in a separate app
pub async fn integrations(State(state): State<Arc<AppState>>, _user: SignedIn) -> Redirect {
    Redirect::to(&state.config.dashboard.integrations_url)
}

/// Fallback for unknown routes
pub async fn not_found(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html(layout::render(
            &Shell::public("Not found", &state.config.assistant),
            &not_found::render(),
        )),
    )
}
