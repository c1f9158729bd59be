//! Route definitions for the web interface

use crate::{
    handlers::{api, auth, fragments, pages},
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;

/// Largest contacts file accepted
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Build the complete web application router
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Public pages
        .route("/", get(pages::landing))
        .route("/login", get(auth::login))
        .route("/logout", get(auth::logout))
        .route("/auth/callback", get(auth::callback))
        .route("/auth/session", post(auth::session))
        // Dashboard shells and forms
        .route("/dashboard", get(pages::dashboard))
        .route("/dashboard/campaigns", get(pages::campaigns))
        .route(
            "/dashboard/campaigns/new",
            get(pages::new_campaign).post(pages::create_campaign),
        )
        .route("/dashboard/calls", get(pages::calls))
        .route("/dashboard/calls/:id", get(pages::call_detail))
        .route(
            "/dashboard/contacts",
            get(pages::contacts)
                .post(pages::upload_contacts)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/dashboard/integrations", get(pages::integrations))
        // Data fragments
        .route("/fragments/dashboard", get(fragments::dashboard))
        .route("/fragments/campaigns", get(fragments::campaigns))
        .route("/fragments/calls", get(fragments::calls))
        .route("/fragments/calls/:id", get(fragments::call_detail))
        // Assets and health
        .route("/static/app.css", get(api::stylesheet))
        .route("/static/app.js", get(api::script))
        .route("/health", get(api::health_check))
        .fallback(pages::not_found)
}
