//! Pagination component for navigating through data

use voxdial_core::utils::{Pager, escape_html};

/// Previous/next controls linking to `base_path?page=N`
#[must_use]
pub fn render(pager: &Pager, base_path: &str) -> String {
    let base = escape_html(base_path);
    let control = |label: &str, target: Option<u32>| match target {
        Some(page) => format!(r#"<a class="pagination-btn" href="{base}?page={page}">{label}</a>"#),
        None => format!(r#"<button class="pagination-btn" disabled>{label}</button>"#),
    };

    format!(
        r#"<nav class="pagination" aria-label="Pagination">{}<span class="pagination-info">Page {} of {}</span>{}</nav>"#,
        control("Previous", pager.prev()),
        pager.page,
        pager.page_count(),
        control("Next", pager.next()),
    )
}
