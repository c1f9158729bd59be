//! Sign-in, sign-out and identity provider callback

use crate::{
    auth::CallbackParams,
    components::layout::{self, Shell},
    pages::auth_callback,
    session::{
        ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, expired_cookie, token_cookies, with_cookies,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Body posted by the callback page
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    /// `location.href` of the callback page, fragment included
    pub url: String,
}

/// What the callback page does next
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Replacement body
    pub html: String,
    /// Navigation target, if any
    pub redirect: Option<String>,
    /// Milliseconds to wait before navigating
    pub delay_ms: u64,
}

/// Send the browser to the identity provider
pub async fn login(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::to(&state.config.auth.login_url)
}

/// Drop the session cookies
pub async fn logout() -> Response {
    info!("Signing out");
    with_cookies(
        Redirect::to("/").into_response(),
        &[
            expired_cookie(ACCESS_TOKEN_COOKIE),
            expired_cookie(REFRESH_TOKEN_COOKIE),
        ],
    )
}

/// Callback page served before its URL is resolved
pub async fn callback(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(layout::render(
        &Shell::public("Signing in", &state.config.assistant),
        &auth_callback::render_shell(),
    ))
}

/// Resolve the callback URL, persist tokens and tell the page where to go
pub async fn session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SessionRequest>,
) -> Response {
    let params = CallbackParams::parse(&request.url).unwrap_or_else(|e| {
        warn!(error = %e, "Callback posted an invalid URL");
        CallbackParams::default()
    });

    let resolution = state.callback_handler().handle(&params).await;
    let cookies = resolution
        .tokens
        .as_ref()
        .map(|tokens| token_cookies(tokens, state.config.auth.secure_cookies))
        .unwrap_or_default();

    let delay = resolution.navigation.delay();
    let body = SessionResponse {
        html: auth_callback::render(&resolution.view),
        redirect: resolution.navigation.target().map(str::to_string),
        delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
    };

    with_cookies(Json(body).into_response(), &cookies)
}
