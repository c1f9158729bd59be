//! Shared helpers for router tests

#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use tower::ServiceExt;
use voxdial_core::Config;
use voxdial_web::build_app;
use wiremock::MockServer;

/// Multipart boundary used by [`multipart_body`]
pub const BOUNDARY: &str = "voxdial-test-boundary";

/// Router talking to `backend`
pub fn test_app(backend: &MockServer) -> Router {
    let mut config = Config::default();
    config.backend.base_url = backend.uri();
    config.auth.login_url = "https://id.example.com/authorize".to_string();
    config.dashboard.integrations_url = "https://integrations.example.com".to_string();

    build_app(config).expect("app builds")
}

/// `GET uri`, sending `token` as the session cookie when given
pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let mut request = Request::get(uri);
    if let Some(token) = token {
        request = request.header(header::COOKIE, format!("vd_access_token={token}"));
    }
    app.oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Send a prepared request
pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

/// Response body as text
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// `Set-Cookie` values of a response
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// Multipart body with a single `file` field
pub fn multipart_body(file_name: &str, contents: &str) -> String {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n{contents}\r\n--{BOUNDARY}--\r\n"
    )
}
