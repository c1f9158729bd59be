//! Page bodies
//!
//! Each page exposes a `load` step that talks to the backend and a `render`
//! step that turns a [`ViewState`](crate::view::ViewState) into HTML. The
//! handlers decide whether a page is rendered inline or deferred to a
//! fragment route.

pub mod auth_callback;
pub mod call_detail;
pub mod calls;
pub mod campaigns;
pub mod contacts;
pub mod dashboard;
pub mod landing;
pub mod not_found;

/// Page heading with an optional action link `(href, label)`
pub(crate) fn heading(title: &str, action: Option<(&str, &str)>) -> String {
    let action = action.map_or_else(String::new, |(href, label)| {
        format!(r#"<a class="btn btn-primary" href="{href}">{label}</a>"#)
    });
    format!(r#"<div class="page-header"><h1>{title}</h1>{action}</div>"#)
}
