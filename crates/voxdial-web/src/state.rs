//! Application state management

use crate::{
    api_client::{ApiClient, ClientContext},
    auth::AuthCallbackHandler,
};
use voxdial_core::{Config, Result};

/// Application state holding configuration and clients
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Unauthenticated API client; bind it to a session before use
    pub api_client: ApiClient,
}

impl AppState {
    /// Create new application state
    ///
    /// # Errors
    ///
    /// Returns an error if the backend HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let api_client = ApiClient::new(&config.backend)?;
        Ok(Self { config, api_client })
    }

    /// API client sending `token` as its bearer token
    #[must_use]
    pub fn api_for(&self, token: &str) -> ApiClient {
        self.api_client.with_context(ClientContext::bearer(token))
    }

    /// Handler for identity provider redirects
    #[must_use]
    pub fn callback_handler(&self) -> AuthCallbackHandler {
        AuthCallbackHandler::new(self.api_client.clone(), &self.config.auth)
    }
}
