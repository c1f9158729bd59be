//! Loading component for displaying loading states

use voxdial_core::utils::escape_html;

/// Loading spinner
#[must_use]
pub fn spinner(label: &str) -> String {
    format!(
        r#"<div class="loading" role="status"><div class="spinner"></div><p>{}</p></div>"#,
        escape_html(label)
    )
}

/// Placeholder that the page script replaces with the HTML served at `fragment_url`
#[must_use]
pub fn deferred(fragment_url: &str, placeholder: &str) -> String {
    format!(
        r#"<div class="deferred" data-fragment="{}">{placeholder}</div>"#,
        escape_html(fragment_url)
    )
}
