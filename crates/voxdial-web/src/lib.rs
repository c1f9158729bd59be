//! Voxdial customer dashboard
//!
//! Server-rendered pages for campaigns, calls, transcripts and contact
//! imports, backed by the Voxdial REST API.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api_client;
pub mod auth;
pub mod components;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;
pub mod view;

// Re-export the main functions
pub use api_client::{ApiClient, ClientContext};
pub use server::{build_app, build_app_with_state};
pub use state::AppState;
