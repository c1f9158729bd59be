//! HTTP client for the Voxdial backend REST API

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, multipart};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{sync::Arc, time::Duration};
use tracing::{debug, warn};
use voxdial_core::{
    BulkImportResult, Call, CallsPage, Campaign, DashboardSummary, Error, NewCampaign, Result,
    Transcript, config::BackendConfig,
};

/// Per-request credentials
///
/// Every request built by an [`ApiClient`] carries the context it was bound
/// to; there is no process-wide token.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ClientContext {
    token: Option<String>,
}

impl ClientContext {
    /// Context without credentials
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { token: None }
    }

    /// Context sending `token` as a bearer token
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// The bearer token, if any
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl std::fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientContext")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// API client for the backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Arc<str>,
    context: ClientContext,
}

/// Campaign listings come either bare or wrapped
#[derive(Deserialize)]
#[serde(untagged)]
enum CampaignList {
    Wrapped { campaigns: Vec<Campaign> },
    Bare(Vec<Campaign>),
}

#[derive(Serialize)]
struct ListCallsQuery {
    page: u32,
    page_size: u32,
}

impl ApiClient {
    /// Create a new API client without credentials
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self::with_client(client, &config.base_url))
    }

    /// Create a client around an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            context: ClientContext::anonymous(),
        }
    }

    /// A client sharing this one's connection pool, bound to `context`
    #[must_use]
    pub fn with_context(&self, context: ClientContext) -> Self {
        Self {
            client: self.client.clone(),
            base_url: Arc::clone(&self.base_url),
            context,
        }
    }

    /// Credentials this client sends
    #[must_use]
    pub const fn context(&self) -> &ClientContext {
        &self.context
    }

    /// Backend base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let request = self.client.request(method, url);

        match self.context.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Get one page of calls
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn list_calls(&self, page: u32, page_size: u32) -> Result<CallsPage> {
        let request = self
            .request(Method::GET, "/calls")
            .query(&ListCallsQuery { page, page_size });
        let mut listing: CallsPage = send_json(request, "list calls").await?;

        // Older backends omit the echo of the paging parameters
        if listing.page_size == 0 {
            listing.page_size = page_size;
        }
        Ok(listing)
    }

    /// Get details for a specific call
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn get_call(&self, call_id: &str) -> Result<Call> {
        let path = format!("/calls/{}", urlencoding::encode(call_id));
        send_json(self.request(Method::GET, &path), "get call").await
    }

    /// Get the transcript of a call
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn get_transcript(&self, call_id: &str) -> Result<Transcript> {
        let path = format!("/calls/{}/transcript", urlencoding::encode(call_id));
        let mut transcript: Transcript =
            send_json(self.request(Method::GET, &path), "get transcript").await?;

        if transcript.call_id.is_empty() {
            transcript.call_id = call_id.to_string();
        }
        Ok(transcript)
    }

    /// List campaigns
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        let list: CampaignList =
            send_json(self.request(Method::GET, "/campaigns"), "list campaigns").await?;

        Ok(match list {
            CampaignList::Wrapped { campaigns } | CampaignList::Bare(campaigns) => campaigns,
        })
    }

    /// Create a campaign
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn create_campaign(&self, campaign: &NewCampaign) -> Result<Campaign> {
        let request = self.request(Method::POST, "/campaigns").json(campaign);
        send_json(request, "create campaign").await
    }

    /// Get the dashboard counters
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn get_dashboard_summary(&self) -> Result<DashboardSummary> {
        send_json(
            self.request(Method::GET, "/dashboard/summary"),
            "get dashboard summary",
        )
        .await
    }

    /// Upload a contacts CSV for bulk import
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn upload_contacts_csv(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<BulkImportResult> {
        let part = multipart::Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(|e| Error::Other(format!("Invalid upload content type: {e}")))?;
        let form = multipart::Form::new().part("file", part);

        let request = self
            .request(Method::POST, "/contacts/import")
            .multipart(form);
        send_json(request, "upload contacts").await
    }

    /// Ask the backend to create the signed-in user's profile
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the backend rejects it.
    pub async fn create_profile(&self, profile_path: &str) -> Result<()> {
        let request = self
            .request(Method::POST, profile_path)
            .json(&serde_json::json!({}));
        send(request, "create profile").await?;
        Ok(())
    }
}

/// Send a request and map transport failures and non-success statuses
async fn send(request: RequestBuilder, operation: &str) -> Result<Response> {
    let response = request.send().await.map_err(|e| {
        warn!(operation, error = %e, "Backend request failed");
        Error::Transport(format!("Failed to {operation}: {e}"))
    })?;

    let status = response.status();
    debug!(operation, status = %status, "Backend responded");
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = server_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    });
    warn!(operation, status = %status, message = %message, "Backend returned error");

    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::Authentication(message));
    }
    Err(Error::Http {
        status: status.as_u16(),
        message,
    })
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder, operation: &str) -> Result<T> {
    let response = send(request, operation).await?;
    let body = response
        .bytes()
        .await
        .map_err(|e| Error::Transport(format!("Failed to read {operation} response: {e}")))?;

    serde_json::from_slice(&body).map_err(|e| {
        warn!(operation, error = %e, "Failed to parse backend response");
        Error::from(e)
    })
}

/// Pull a human-readable message out of an error body
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    ["detail", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use voxdial_core::CallStatus;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_string_contains, header, header_exists, method, path, query_param},
    };

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::with_client(Client::new(), &format!("{}/api/v1/", server.uri()))
    }

    fn call_body(id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "phone_number": "+15550100",
            "status": "completed",
            "outcome": "Booked a demo",
            "duration_seconds": 125,
            "created_at": "2024-05-01T12:00:00Z"
        })
    }

    #[test]
    fn test_server_message_keys() {
        assert_eq!(
            server_message(r#"{"detail":"Not allowed"}"#).as_deref(),
            Some("Not allowed")
        );
        assert_eq!(
            server_message(r#"{"message":"Bad file"}"#).as_deref(),
            Some("Bad file")
        );
        assert_eq!(
            server_message(r#"{"error":"Boom"}"#).as_deref(),
            Some("Boom")
        );
        assert_eq!(server_message(r#"{"detail":[{"loc":"x"}]}"#), None);
        assert_eq!(server_message("<html>502</html>"), None);
    }

    #[test]
    fn test_context_debug_redacts_token() {
        let debug = format!("{:?}", ClientContext::bearer("secret-token"));
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("redacted"));
    }

    #[tokio::test]
    async fn test_list_calls_sends_bearer_and_paging() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/calls"))
            .and(header("authorization", "Bearer abc123"))
            .and(query_param("page", "2"))
            .and(query_param("page_size", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "calls": [call_body("c1")],
                "total": 45,
                "page": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server).with_context(ClientContext::bearer("abc123"));
        let page = api.list_calls(2, 20).await.unwrap();

        assert_eq!(page.total, 45);
        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 20);
        assert_eq!(page.calls[0].status, CallStatus::Completed);
    }

    #[tokio::test]
    async fn test_anonymous_client_sends_no_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/dashboard/summary"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/dashboard/summary"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"total_calls": 3})),
            )
            .mount(&server)
            .await;

        let summary = client_for(&server).get_dashboard_summary().await.unwrap();
        assert_eq!(summary.total_calls, 3);
    }

    #[tokio::test]
    async fn test_bound_contexts_do_not_leak() {
        let base = ApiClient::with_client(Client::new(), "http://localhost:1");
        let alice = base.with_context(ClientContext::bearer("alice"));
        let bob = base.with_context(ClientContext::bearer("bob"));

        assert_eq!(alice.context().token(), Some("alice"));
        assert_eq!(bob.context().token(), Some("bob"));
        assert_eq!(base.context().token(), None);
        assert_eq!(base.base_url(), "http://localhost:1");
    }

    #[tokio::test]
    async fn test_error_status_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/calls/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"detail": "Call not found"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).get_call("missing").await.unwrap_err();

        assert!(matches!(err, Error::Http { status: 404, .. }));
        assert_eq!(err.user_message(), "Call not found");
    }

    #[tokio::test]
    async fn test_rejected_token_is_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/dashboard/summary"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(serde_json::json!({"detail": "Invalid token"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .with_context(ClientContext::bearer("stale"))
            .get_dashboard_summary()
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), "Invalid token");
    }

    #[tokio::test]
    async fn test_error_without_body_uses_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/campaigns"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).list_campaigns().await.unwrap_err();
        assert_eq!(err.user_message(), "Service Unavailable");
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let api = ApiClient::with_client(Client::new(), "http://127.0.0.1:9");
        let err = api.get_dashboard_summary().await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_serialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/dashboard/summary"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).get_dashboard_summary().await.unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[tokio::test]
    async fn test_list_campaigns_accepts_both_shapes() {
        let campaign = serde_json::json!({"id": "k1", "name": "Renewals", "status": "draft"});

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/campaigns"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"campaigns": [campaign.clone()]})),
            )
            .mount(&server)
            .await;
        assert_eq!(client_for(&server).list_campaigns().await.unwrap().len(), 1);

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/campaigns"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([campaign])))
            .mount(&server)
            .await;
        assert_eq!(client_for(&server).list_campaigns().await.unwrap()[0].id, "k1");
    }

    #[tokio::test]
    async fn test_create_campaign_posts_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/campaigns"))
            .and(body_string_contains("\"name\":\"Renewals\""))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "k9", "name": "Renewals", "status": "draft",
                "system_prompt": "Be kind"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let campaign = NewCampaign {
            name: "Renewals".to_string(),
            system_prompt: "Be kind".to_string(),
            ..NewCampaign::default()
        };
        let created = client_for(&server).create_campaign(&campaign).await.unwrap();
        assert_eq!(created.id, "k9");
    }

    #[tokio::test]
    async fn test_get_transcript_fills_call_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/calls/c1/transcript"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "turns": [{"role": "assistant", "content": "Hello"}]
            })))
            .mount(&server)
            .await;

        let transcript = client_for(&server).get_transcript("c1").await.unwrap();
        assert_eq!(transcript.call_id, "c1");
        assert_eq!(transcript.turns.len(), 1);
    }

    #[tokio::test]
    async fn test_upload_contacts_sends_multipart_file() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/contacts/import"))
            .and(body_string_contains("filename=\"contacts.csv\""))
            .and(body_string_contains("phone_number,first_name"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_rows": 1, "imported": 1, "duplicates_skipped": 0, "failed": 0, "errors": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .upload_contacts_csv("contacts.csv", b"phone_number,first_name\n+15550100,Ada\n".to_vec())
            .await
            .unwrap();
        assert_eq!(result.imported, 1);
    }

    #[tokio::test]
    async fn test_create_profile_ignores_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/create-profile"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .with_context(ClientContext::bearer("abc123"))
            .create_profile("/auth/create-profile")
            .await
            .unwrap();
    }
}
