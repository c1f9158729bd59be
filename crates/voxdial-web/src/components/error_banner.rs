//! Inline error panel

use voxdial_core::utils::escape_html;

/// Error banner with an optional `(href, label)` retry link
#[must_use]
pub fn render(message: &str, retry: Option<(&str, &str)>) -> String {
    let action = retry.map_or_else(String::new, |(href, label)| {
        format!(
            r#"<a class="btn btn-secondary" href="{}">{}</a>"#,
            escape_html(href),
            escape_html(label)
        )
    });

    format!(
        r#"<div class="alert alert-error" role="alert"><p>{}</p>{action}</div>"#,
        escape_html(message)
    )
}
