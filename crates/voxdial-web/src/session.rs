//! Cookie-backed sign-in session

use crate::{auth::LOGIN_PATH, components::error_banner, state::AppState};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, StatusCode, header, request::Parts},
    response::{Html, IntoResponse, Redirect, Response},
};
use std::{convert::Infallible, sync::Arc};
use voxdial_core::AuthTokens;

/// Cookie holding the backend bearer token
pub const ACCESS_TOKEN_COOKIE: &str = "vd_access_token";

/// Cookie holding the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "vd_refresh_token";

const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";

/// Value of cookie `name` from the request headers
#[must_use]
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(std::borrow::Cow::into_owned)
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value storing `value` for the whole site
#[must_use]
pub fn session_cookie(name: &str, value: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{name}={}; Path=/; HttpOnly; SameSite=Lax",
        urlencoding::encode(value)
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value deleting cookie `name`
#[must_use]
pub fn expired_cookie(name: &str) -> String {
    format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// `Set-Cookie` values persisting freshly issued tokens
#[must_use]
pub fn token_cookies(tokens: &AuthTokens, secure: bool) -> Vec<String> {
    let mut cookies = vec![session_cookie(
        ACCESS_TOKEN_COOKIE,
        &tokens.access_token,
        secure,
    )];
    if let Some(refresh_token) = &tokens.refresh_token {
        cookies.push(session_cookie(REFRESH_TOKEN_COOKIE, refresh_token, secure));
    }
    cookies
}

/// Append `Set-Cookie` headers to a response
pub fn with_cookies(mut response: Response, cookies: &[String]) -> Response {
    for cookie in cookies {
        if let Ok(value) = HeaderValue::from_str(cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

/// Session of the current request, signed in or not
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Bearer token, when signed in
    pub access_token: Option<String>,
}

impl Session {
    /// Whether a token is present
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.access_token.is_some()
    }
}

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            access_token: read_cookie(&parts.headers, ACCESS_TOKEN_COOKIE),
        })
    }
}

/// Session that must be signed in
///
/// Page requests without a token are redirected to the sign-in page;
/// fragment requests get an inline error instead, since they are swapped
/// into an already rendered page.
#[derive(Debug, Clone)]
pub struct SignedIn {
    /// Bearer token
    pub access_token: String,
}

/// Rejection for requests without a session
#[derive(Debug)]
pub enum SignInRequired {
    /// Send the browser to the sign-in page
    Redirect,
    /// Render an inline error
    Fragment,
}

impl IntoResponse for SignInRequired {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect => Redirect::to(LOGIN_PATH).into_response(),
            Self::Fragment => (
                StatusCode::UNAUTHORIZED,
                Html(error_banner::render(
                    SESSION_EXPIRED,
                    Some((LOGIN_PATH, "Sign In")),
                )),
            )
                .into_response(),
        }
    }
}

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for SignedIn {
    type Rejection = SignInRequired;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        match read_cookie(&parts.headers, ACCESS_TOKEN_COOKIE) {
            Some(access_token) => Ok(Self { access_token }),
            None if parts.uri.path().starts_with("/fragments/") => {
                Err(SignInRequired::Fragment)
            }
            None => Err(SignInRequired::Redirect),
        }
    }
}
