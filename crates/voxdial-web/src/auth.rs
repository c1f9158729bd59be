//! Identity provider redirect handling
//!
//! After sign-in, sign-up confirmation, password recovery or an invite, the
//! identity provider sends the browser back to `/auth/callback` with its
//! parameters in the URL fragment (and sometimes the query string). The
//! fragment never reaches the server, so the callback page posts its own
//! `location.href` to `/auth/session`, which resolves it here.

use crate::api_client::{ApiClient, ClientContext};
use reqwest::Url;
use std::{collections::HashMap, future::Future, time::Duration};
use tracing::{debug, info, warn};
use voxdial_core::{AuthTokens, Result, config::AuthConfig};

/// Where a successful sign-in lands
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Where confirmations and failures send the user next
pub const LOGIN_PATH: &str = "/login";

const NO_TOKEN_MESSAGE: &str = "No authentication token found";

/// Parameters carried by a callback URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    values: HashMap<String, String>,
}

impl CallbackParams {
    /// Collect query and fragment parameters; the fragment wins on conflicts
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        let mut values: HashMap<String, String> = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        if let Some(fragment) = url.fragment() {
            match serde_urlencoded::from_str::<Vec<(String, String)>>(fragment) {
                Ok(pairs) => values.extend(pairs),
                Err(e) => debug!(error = %e, "Ignoring unparseable callback fragment"),
            }
        }

        Self { values }
    }

    /// Parse an absolute callback URL
    ///
    /// # Errors
    ///
    /// Returns a validation error if `href` is not an absolute URL.
    pub fn parse(href: &str) -> Result<Self> {
        let url = Url::parse(href)
            .map_err(|e| voxdial_core::Error::validation("url", format!("Invalid callback URL: {e}")))?;
        Ok(Self::from_url(&url))
    }

    /// Non-blank value of `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

/// Account flows that end on the callback page without a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationKind {
    /// Email address confirmed after sign-up
    Signup,
    /// Password recovery link opened
    Recovery,
    /// Team invitation accepted
    Invite,
}

impl ConfirmationKind {
    fn from_param(value: &str) -> Option<Self> {
        match value {
            "signup" => Some(Self::Signup),
            "recovery" => Some(Self::Recovery),
            "invite" => Some(Self::Invite),
            _ => None,
        }
    }

    /// Message shown while waiting to go to the sign-in page
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Signup => "Your email has been confirmed. You can now sign in.",
            Self::Recovery => "Your recovery link has been verified. Please sign in to continue.",
            Self::Invite => "Your invitation has been accepted. Please sign in to continue.",
        }
    }
}

/// What a callback URL means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// The provider issued tokens
    Authenticated(AuthTokens),
    /// An account flow completed without signing in
    Confirmed(ConfirmationKind),
    /// The provider reported an error, or nothing usable was found
    Failed {
        /// Message shown to the user
        message: String,
    },
}

/// Classify callback parameters
///
/// Provider errors take precedence over tokens, and tokens over confirmations.
#[must_use]
pub fn resolve_callback(params: &CallbackParams) -> CallbackOutcome {
    if let Some(message) = params
        .get("error_description")
        .or_else(|| params.get("error"))
    {
        return CallbackOutcome::Failed {
            message: message.to_string(),
        };
    }

    if let Some(access_token) = params.get("access_token") {
        return CallbackOutcome::Authenticated(AuthTokens {
            access_token: access_token.to_string(),
            refresh_token: params.get("refresh_token").map(str::to_string),
        });
    }

    if let Some(kind) = params.get("type").and_then(ConfirmationKind::from_param) {
        return CallbackOutcome::Confirmed(kind);
    }

    CallbackOutcome::Failed {
        message: NO_TOKEN_MESSAGE.to_string(),
    }
}

/// What the callback page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackView {
    /// Signed in, about to leave for the dashboard
    Redirecting,
    /// Account flow completed
    Confirmed {
        /// Confirmation text
        message: String,
    },
    /// Sign-in failed; the page offers a retry
    Failed {
        /// Error text
        message: String,
    },
}

/// Where the browser goes after the callback page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Leave right away
    Immediate(String),
    /// Leave after showing the page for a while
    Delayed {
        /// Target path
        to: String,
        /// How long the page stays up
        after: Duration,
    },
    /// Stay on the page
    Stay,
}

impl Navigation {
    /// Target path, if the page navigates at all
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Immediate(to) | Self::Delayed { to, .. } => Some(to),
            Self::Stay => None,
        }
    }

    /// Delay before navigating
    #[must_use]
    pub const fn delay(&self) -> Duration {
        match self {
            Self::Delayed { after, .. } => *after,
            Self::Immediate(_) | Self::Stay => Duration::ZERO,
        }
    }
}

/// Result of handling a callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackResolution {
    /// Page content
    pub view: CallbackView,
    /// Follow-up navigation
    pub navigation: Navigation,
    /// Tokens to persist in the session
    pub tokens: Option<AuthTokens>,
}

/// Drives the callback flow against the backend
#[derive(Debug, Clone)]
pub struct AuthCallbackHandler {
    api: ApiClient,
    profile_path: String,
    confirmation_delay: Duration,
}

impl AuthCallbackHandler {
    /// Create a handler using `api` for profile creation
    #[must_use]
    pub fn new(api: ApiClient, config: &AuthConfig) -> Self {
        Self {
            api,
            profile_path: config.profile_path.clone(),
            confirmation_delay: Duration::from_millis(config.confirmation_redirect_delay_ms),
        }
    }

    /// Resolve a callback URL into a view, a navigation and tokens to keep
    ///
    /// A sign-in always ends on the dashboard; profile creation is attempted
    /// with the new token and its failure does not stop the redirect.
    pub async fn handle(&self, params: &CallbackParams) -> CallbackResolution {
        match resolve_callback(params) {
            CallbackOutcome::Authenticated(tokens) => {
                info!("Sign-in callback carried an access token");

                let api = self
                    .api
                    .with_context(ClientContext::bearer(tokens.access_token.clone()));
                best_effort("create profile", api.create_profile(&self.profile_path)).await;

                CallbackResolution {
                    view: CallbackView::Redirecting,
                    navigation: Navigation::Immediate(DASHBOARD_PATH.to_string()),
                    tokens: Some(tokens),
                }
            }
            CallbackOutcome::Confirmed(kind) => {
                info!(?kind, "Account confirmation callback");
                CallbackResolution {
                    view: CallbackView::Confirmed {
                        message: kind.message().to_string(),
                    },
                    navigation: Navigation::Delayed {
                        to: LOGIN_PATH.to_string(),
                        after: self.confirmation_delay,
                    },
                    tokens: None,
                }
            }
            CallbackOutcome::Failed { message } => {
                warn!(message = %message, "Sign-in callback failed");
                CallbackResolution {
                    view: CallbackView::Failed { message },
                    navigation: Navigation::Stay,
                    tokens: None,
                }
            }
        }
    }
}

/// Run a call whose failure must not affect the caller
///
/// Errors are logged at `warn` and dropped.
pub async fn best_effort<T, F>(operation: &str, call: F) -> Option<T>
where
    F: Future<Output = Result<T>>,
{
    match call.await {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(operation, error = %e, "Best-effort call failed, continuing");
            None
        }
    }
}
