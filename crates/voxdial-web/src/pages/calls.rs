//! Paged call history

use crate::{
    api_client::ApiClient,
    components::{call_list, error_banner, loading, pagination},
    view::ViewState,
};
use tracing::debug;
use voxdial_core::{Call, Result, utils::Pager};

/// Path of the calls page, used by the pagination links
pub const CALLS_PATH: &str = "/dashboard/calls";

/// One page of calls and where it sits in the listing
#[derive(Debug, Clone, PartialEq)]
pub struct CallsData {
    /// Calls on this page
    pub calls: Vec<Call>,
    /// Position within the listing
    pub pager: Pager,
}

/// Fetch page `page` of the call history
///
/// A page past the end of a non-empty listing falls back to the last page.
///
/// # Errors
///
/// Returns an error if the backend request fails.
pub async fn load(api: &ApiClient, page: u32, page_size: u32) -> Result<CallsData> {
    let mut listing = api.list_calls(page.max(1), page_size).await?;
    let mut pager = Pager::new(page, listing.page_size, listing.total);

    let clamped = pager.clamped();
    if listing.total > 0 && clamped.page != pager.page {
        debug!(requested = pager.page, page = clamped.page, "Calls page out of range");
        listing = api.list_calls(clamped.page, page_size).await?;
        pager = Pager::new(clamped.page, listing.page_size, listing.total).clamped();
    }

    Ok(CallsData {
        pager,
        calls: listing.calls,
    })
}

/// Render the calls page body
#[must_use]
pub fn render(view: &ViewState<CallsData>) -> String {
    match view {
        ViewState::Loading => loading::spinner("Loading calls..."),
        ViewState::Failed(message) => error_banner::render(message, Some((CALLS_PATH, "Retry"))),
        ViewState::Ready(data) if data.calls.is_empty() => call_list::EMPTY_STATE.to_string(),
        ViewState::Ready(data) => format!(
            r#"<p class="muted">Showing {}-{} of {}</p>{}{}"#,
            data.pager.first_item(),
            data.pager.last_item(),
            data.pager.total,
            call_list::render(&data.calls),
            pagination::render(&data.pager, CALLS_PATH)
        ),
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqwest::Client;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn call_json(id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "phone_number": "+15550100",
            "status": "answered",
            "duration_seconds": 125,
            "created_at": "2024-05-01T12:00:00Z"
        })
    }

    #[test]
    fn test_empty_listing_never_renders_table() {
        let view = ViewState::Ready(CallsData {
            calls: Vec::new(),
            pager: Pager::new(1, 20, 0),
        });
        let html = render(&view);

        assert!(html.contains("No calls yet"));
        assert!(!html.contains("<table"));
        assert!(!html.contains("pagination"));
    }

    #[tokio::test]
    async fn test_last_page_of_three() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calls"))
            .and(query_param("page", "3"))
            .and(query_param("page_size", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "calls": (0..5).map(|i| call_json(&format!("c{i}"))).collect::<Vec<_>>(),
                "total": 45,
                "page": 3,
                "page_size": 20
            })))
            .mount(&server)
            .await;

        let api = ApiClient::with_client(Client::new(), &server.uri());
        let data = load(&api, 3, 20).await.unwrap();

        assert_eq!(data.pager.page_count(), 3);
        assert_eq!(data.pager.next(), None);

        let html = render(&ViewState::Ready(data));
        assert!(html.contains("Showing 41-45 of 45"));
        assert!(html.contains("Page 3 of 3"));
        assert!(html.contains(r#"<button class="pagination-btn" disabled>Next</button>"#));
        assert!(html.contains(r#"href="/dashboard/calls?page=2">Previous"#));
    }

    #[tokio::test]
    async fn test_page_past_the_end_shows_last_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calls"))
            .and(query_param("page", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "calls": [],
                "total": 45,
                "page": 4,
                "page_size": 20
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/calls"))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "calls": (0..5).map(|i| call_json(&format!("c{i}"))).collect::<Vec<_>>(),
                "total": 45,
                "page": 3,
                "page_size": 20
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::with_client(Client::new(), &server.uri());
        let data = load(&api, 4, 20).await.unwrap();

        assert_eq!(data.pager, Pager::new(3, 20, 45));
        assert_eq!(data.calls.len(), 5);

        let html = render(&ViewState::Ready(data));
        assert!(!html.contains("No calls yet"));
        assert!(html.contains("Showing 41-45 of 45"));
        assert!(html.contains("Page 3 of 3"));
    }

    #[tokio::test]
    async fn test_page_zero_requests_first_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calls"))
            .and(query_param("page", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"calls": [], "total": 0})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::with_client(Client::new(), &server.uri());
        let data = load(&api, 0, 20).await.unwrap();
        assert_eq!(data.pager.page, 1);
    }
}
