//! 404 page

/// Body of the not found page
#[must_use]
pub fn render() -> String {
    r#"<div class="empty-state"><h1>Page not found</h1><p>The page you are looking for does not exist.</p><a class="btn btn-primary" href="/dashboard">Go to dashboard</a></div>"#
        .to_string()
}
