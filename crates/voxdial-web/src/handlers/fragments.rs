//! Data fragments swapped into the page shells
//!
//! Fragments always answer `200 OK` with HTML for the failed or ready
//! state, so the shell script can swap them in unconditionally. A token the
//! backend rejects renders a sign-in prompt instead of a retry link.

use super::PageQuery;
use crate::{
    auth::LOGIN_PATH,
    components::error_banner,
    pages::{call_detail, calls, campaigns, dashboard},
    session::SignedIn,
    state::AppState,
    view::ViewState,
};
use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use std::sync::Arc;
use tracing::warn;
use voxdial_core::Result;

fn respond<T>(
    result: Result<T>,
    section: &str,
    render: impl FnOnce(&ViewState<T>) -> String,
) -> Html<String> {
    match result {
        Err(err) if err.is_unauthorized() => {
            warn!(section, error = %err, "Backend rejected session token");
            Html(error_banner::render(
                &err.user_message(),
                Some((LOGIN_PATH, "Sign In")),
            ))
        }
        result => Html(render(&ViewState::from_result(result, section))),
    }
}

/// Summary counters and recent calls
pub async fn dashboard(State(state): State<Arc<AppState>>, user: SignedIn) -> Html<String> {
    let api = state.api_for(&user.access_token);
    let result = dashboard::load(&api, state.config.dashboard.recent_calls_limit).await;

    respond(result, "dashboard", dashboard::render)
}

/// Campaign table
pub async fn campaigns(State(state): State<Arc<AppState>>, user: SignedIn) -> Html<String> {
    let api = state.api_for(&user.access_token);
    let result = campaigns::load(&api).await;

    respond(result, "campaigns", campaigns::render)
}

/// One page of calls
pub async fn calls(
    State(state): State<Arc<AppState>>,
    user: SignedIn,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let api = state.api_for(&user.access_token);
    let result = calls::load(&api, query.page(), state.config.dashboard.calls_page_size).await;

    respond(result, "calls", calls::render)
}

/// Call metadata and transcript
pub async fn call_detail(
    State(state): State<Arc<AppState>>,
    user: SignedIn,
    Path(call_id): Path<String>,
) -> Html<String> {
    let api = state.api_for(&user.access_token);
    let result = call_detail::load(&api, &call_id).await;

    respond(result, "call detail", call_detail::render)
}
