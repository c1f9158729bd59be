//! Sign-in callback page

use crate::{
    auth::{CallbackView, LOGIN_PATH},
    components::{error_banner, loading},
};
use voxdial_core::utils::escape_html;

/// Endpoint the callback page posts its URL to
pub const SESSION_ENDPOINT: &str = "/auth/session";

/// Body served before the URL has been resolved
#[must_use]
pub fn render_shell() -> String {
    format!(
        r#"<div class="auth-callback" data-auth-session="{SESSION_ENDPOINT}">{}</div>"#,
        loading::spinner("Signing you in...")
    )
}

/// Body once the URL has been resolved
#[must_use]
pub fn render(view: &CallbackView) -> String {
    match view {
        CallbackView::Redirecting => loading::spinner("Signed in. Redirecting to your dashboard..."),
        CallbackView::Confirmed { message } => format!(
            r#"<div class="alert alert-success" role="status"><p>{}</p><p class="muted">Redirecting to sign in...</p></div>"#,
            escape_html(message)
        ),
        CallbackView::Failed { message } => format!(
            r#"<h2>Authentication failed</h2>{}"#,
            error_banner::render(message, Some((LOGIN_PATH, "Try Again")))
        ),
    }
}
