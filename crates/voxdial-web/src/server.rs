//! Web server setup and configuration

use crate::{middleware::logging::request_logging, routes::build_routes, state::AppState};
use axum::{Router, middleware};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use voxdial_core::{Config, Result};

/// Build the complete web application with all routes and state
///
/// # Errors
///
/// Returns an error if the backend HTTP client cannot be built.
pub fn build_app(config: Config) -> Result<Router> {
    let state = Arc::new(AppState::new(config)?);
    Ok(build_app_with_state(state))
}

/// Build the application around existing state
pub fn build_app_with_state(state: Arc<AppState>) -> Router {
    build_routes()
        .with_state(state)
        .layer(middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
}
