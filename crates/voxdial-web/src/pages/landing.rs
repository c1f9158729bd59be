//! Public landing page

const FEATURES: &[(&str, &str)] = &[
    (
        "AI voice agents",
        "Natural sounding agents call your leads, follow your script and handle objections.",
    ),
    (
        "Campaigns",
        "Group contacts, choose a voice and describe the goal. Launch when you are ready.",
    ),
    (
        "Transcripts and recordings",
        "Every call is recorded, transcribed and summarized so nothing gets lost.",
    ),
    (
        "Bulk import",
        "Upload a CSV of contacts and start calling within minutes.",
    ),
];

/// Body of the landing page
#[must_use]
pub fn render(signed_in: bool) -> String {
    let (href, label) = if signed_in {
        ("/dashboard", "Go to Dashboard")
    } else {
        ("/login", "Get Started")
    };
    let features: String = FEATURES
        .iter()
        .map(|(title, text)| format!(r#"<div class="feature"><h3>{title}</h3><p>{text}</p></div>"#))
        .collect();

    format!(
        r#"<section class="hero">
<h1>Outbound calling, handled by AI</h1>
<p>Voxdial runs your calling campaigns with voice agents that sound human and report every conversation.</p>
<a class="btn btn-primary btn-lg" href="{href}">{label}</a>
</section>
<section class="features">{features}</section>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_to_action_follows_session() {
        assert!(render(false).contains(r#"href="/login">Get Started"#));
        assert!(render(true).contains(r#"href="/dashboard">Go to Dashboard"#));
    }
}
