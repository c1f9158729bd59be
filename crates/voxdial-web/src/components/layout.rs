//! Page shell: document head, navigation and the assistant widget

use voxdial_core::{config::AssistantConfig, utils::escape_html};

/// Dashboard sections shown in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    /// Dashboard home
    Overview,
    /// Campaign list and creation
    Campaigns,
    /// Call history
    Calls,
    /// Contacts import
    Contacts,
    /// Telephony integrations
    Integrations,
}

impl NavItem {
    const ALL: [Self; 5] = [
        Self::Overview,
        Self::Campaigns,
        Self::Calls,
        Self::Contacts,
        Self::Integrations,
    ];

    const fn href(self) -> &'static str {
        match self {
            Self::Overview => "/dashboard",
            Self::Campaigns => "/dashboard/campaigns",
            Self::Calls => "/dashboard/calls",
            Self::Contacts => "/dashboard/contacts",
            Self::Integrations => "/dashboard/integrations",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Campaigns => "Campaigns",
            Self::Calls => "Calls",
            Self::Contacts => "Contacts",
            Self::Integrations => "Integrations",
        }
    }
}

/// What surrounds a page body
#[derive(Debug, Clone, Copy)]
pub struct Shell<'a> {
    /// Document title, before the product name
    pub title: &'a str,
    /// Active dashboard section; `None` for public pages
    pub nav: Option<NavItem>,
    /// Floating assistant settings
    pub assistant: &'a AssistantConfig,
}

impl<'a> Shell<'a> {
    /// Shell for a public page
    #[must_use]
    pub const fn public(title: &'a str, assistant: &'a AssistantConfig) -> Self {
        Self {
            title,
            nav: None,
            assistant,
        }
    }

    /// Shell for a signed-in dashboard page
    #[must_use]
    pub const fn dashboard(title: &'a str, nav: NavItem, assistant: &'a AssistantConfig) -> Self {
        Self {
            title,
            nav: Some(nav),
            assistant,
        }
    }
}

/// Full HTML document around `body`
#[must_use]
pub fn render(shell: &Shell<'_>, body: &str) -> String {
    let header = shell.nav.map_or_else(public_header, sidebar);
    let main_class = if shell.nav.is_some() {
        "dashboard-main"
    } else {
        "public-main"
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Voxdial</title>
<link rel="stylesheet" href="/static/app.css">
<script src="/static/app.js" defer></script>
</head>
<body>
{header}
<main class="{main_class}">
{body}
</main>
{assistant}
</body>
</html>"#,
        title = escape_html(shell.title),
        assistant = assistant_widget(shell.assistant),
    )
}

fn public_header() -> String {
    r#"<header class="topbar"><a class="brand" href="/">Voxdial</a><a class="btn btn-primary" href="/login">Sign In</a></header>"#
        .to_string()
}

fn sidebar(active: NavItem) -> String {
    let links: String = NavItem::ALL
        .iter()
        .map(|item| {
            let class = if *item == active { "nav-link active" } else { "nav-link" };
            format!(r#"<a class="{class}" href="{}">{}</a>"#, item.href(), item.label())
        })
        .collect();

    format!(
        r#"<nav class="sidebar"><a class="brand" href="/dashboard">Voxdial</a>{links}<a class="nav-link sign-out" href="/logout">Sign Out</a></nav>"#
    )
}

fn assistant_widget(assistant: &AssistantConfig) -> String {
    match (&assistant.url, assistant.enabled) {
        (Some(url), true) => format!(
            r#"<a class="assistant-widget" href="{}" target="_blank" rel="noopener" aria-label="Open assistant">?</a>"#,
            escape_html(url)
        ),
        _ => String::new(),
    }
}
