//! Single call: metadata, summary, recording and transcript

use crate::{
    api_client::ApiClient,
    components::{audio_player, error_banner, loading, status_badge, transcript},
    view::ViewState,
};
use voxdial_core::{
    Call, Result, TranscriptTurn,
    utils::{MISSING, escape_html, format_duration},
};

/// A call with its transcript
///
/// The transcript has its own state so that a transcript failure leaves the
/// rest of the page usable.
#[derive(Debug, Clone, PartialEq)]
pub struct CallDetail {
    /// The call
    pub call: Call,
    /// Transcript turns
    pub transcript: ViewState<Vec<TranscriptTurn>>,
}

/// Fetch a call, then its transcript unless the call already embeds it
///
/// # Errors
///
/// Returns an error if the call itself cannot be fetched.
pub async fn load(api: &ApiClient, call_id: &str) -> Result<CallDetail> {
    let mut call = api.get_call(call_id).await?;

    let transcript = match call.transcript.take() {
        Some(turns) => ViewState::Ready(turns),
        None => ViewState::from_result(
            api.get_transcript(call_id).await.map(|t| t.turns),
            "transcript",
        ),
    };

    Ok(CallDetail { call, transcript })
}

/// Render the call detail body
#[must_use]
pub fn render(view: &ViewState<CallDetail>) -> String {
    match view {
        ViewState::Loading => loading::spinner("Loading call..."),
        ViewState::Failed(message) => {
            error_banner::render(message, Some(("/dashboard/calls", "Back to calls")))
        }
        ViewState::Ready(detail) => ready(detail),
    }
}

fn ready(detail: &CallDetail) -> String {
    let call = &detail.call;

    let summary = call.summary.as_deref().map_or_else(String::new, |summary| {
        format!(
            r#"<section class="card"><h2>Summary</h2><p>{}</p></section>"#,
            escape_html(summary)
        )
    });
    let recording = call.recording_url.as_deref().map_or_else(String::new, |url| {
        format!(
            r#"<section class="card"><h2>Recording</h2>{}</section>"#,
            audio_player::render(url)
        )
    });
    let transcript = match &detail.transcript {
        ViewState::Loading => loading::spinner("Loading transcript..."),
        ViewState::Failed(message) => error_banner::render(message, None),
        ViewState::Ready(turns) => transcript::render(turns),
    };

    format!(
        r#"<a class="back-link" href="/dashboard/calls">&larr; All calls</a>
<section class="card">
<h2>{phone}</h2>
<dl class="call-meta">
<dt>Status</dt><dd>{status}</dd>
<dt>Outcome</dt><dd>{outcome}</dd>
<dt>Duration</dt><dd>{duration}</dd>
<dt>Date</dt><dd>{date}</dd>
</dl>
</section>
{summary}{recording}
<section class="card"><h2>Transcript</h2>{transcript}</section>"#,
        phone = escape_html(&call.phone_number),
        status = status_badge::call_status(call.status),
        outcome = escape_html(call.outcome.as_deref().unwrap_or(MISSING)),
        duration = format_duration(call.duration_seconds),
        date = call.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqwest::Client;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn call_json(transcript: Option<serde_json::Value>) -> serde_json::Value {
        let mut call = serde_json::json!({
            "id": "c1",
            "phone_number": "+15550100",
            "status": "completed",
            "outcome": "Interested",
            "duration_seconds": 61,
            "created_at": "2024-05-01T12:00:00Z",
            "summary": "Asked for a callback",
            "recording_url": "https://cdn.example.com/c1.mp3"
        });
        if let Some(turns) = transcript {
            call["transcript"] = turns;
        }
        call
    }

    async fn mount_call(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/calls/c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_embedded_transcript_skips_second_request() {
        let server = MockServer::start().await;
        mount_call(
            &server,
            call_json(Some(serde_json::json!([{"role": "assistant", "content": "Hello there"}]))),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/calls/c1/transcript"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let api = ApiClient::with_client(Client::new(), &server.uri());
        let detail = load(&api, "c1").await.unwrap();

        assert!(detail.transcript.is_ready());
        let html = render(&ViewState::Ready(detail));
        assert!(html.contains("1:01"));
        assert!(html.contains("Asked for a callback"));
        assert!(html.contains(r#"src="https://cdn.example.com/c1.mp3""#));
        assert!(html.contains("Hello there"));
    }

    #[tokio::test]
    async fn test_transcript_fetched_after_call() {
        let server = MockServer::start().await;
        mount_call(&server, call_json(None)).await;
        Mock::given(method("GET"))
            .and(path("/calls/c1/transcript"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "call_id": "c1",
                "turns": [{"role": "user", "content": "Who is this?"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::with_client(Client::new(), &server.uri());
        let detail = load(&api, "c1").await.unwrap();

        assert_eq!(
            detail.transcript,
            ViewState::Ready(vec![TranscriptTurn {
                role: voxdial_core::TranscriptRole::User,
                content: "Who is this?".to_string(),
                timestamp: None,
            }])
        );
    }

    #[tokio::test]
    async fn test_transcript_failure_keeps_page() {
        let server = MockServer::start().await;
        mount_call(&server, call_json(None)).await;
        Mock::given(method("GET"))
            .and(path("/calls/c1/transcript"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"detail": "Transcript not ready"})),
            )
            .mount(&server)
            .await;

        let api = ApiClient::with_client(Client::new(), &server.uri());
        let detail = load(&api, "c1").await.unwrap();
        let html = render(&ViewState::Ready(detail));

        assert!(html.contains("+15550100"));
        assert!(html.contains("Transcript not ready"));
    }

    #[tokio::test]
    async fn test_missing_call_fails_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calls/nope"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let api = ApiClient::with_client(Client::new(), &server.uri());
        let err = load(&api, "nope").await.unwrap_err();
        assert_eq!(err.user_message(), "Not Found");
    }
}
