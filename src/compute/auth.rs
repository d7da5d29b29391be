//! Oracle Compute Authentication
//!
//! The provider hands out a session cookie from `POST /authenticate/`. The
//! cookie expires after 30 minutes; every request must carry it in the
//! `Cookie` header and requests with an expired cookie are answered with
//! 401 Unauthorized.

use super::client::Client;
use super::error::{ApiError, Result};
use super::http::{request, RawResponse, RequestParams};
use chrono::{DateTime, Duration, Utc};
use reqwest::{Method, StatusCode};
use serde_json::json;
use std::fmt;
use std::time::SystemTime;

/// Validity window the provider applies to session cookies
pub const SESSION_TTL: std::time::Duration = std::time::Duration::from_secs(30 * 60);

/// Session cookie issued by the provider
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub name: String,
    pub value: String,
    /// From `Expires` or `Max-Age`, else [`SESSION_TTL`] after receipt;
    /// `None` only for tokens built by hand
    pub expires: Option<DateTime<Utc>>,
}

impl SessionToken {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires: None,
        }
    }

    /// Value for the `Cookie` request header
    pub fn header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }

    /// Whether the advertised expiry has passed
    ///
    /// Only a hint for callers: the client never refuses to send a token,
    /// the provider is the authority and answers 401 once it has lapsed.
    pub fn is_expired(&self) -> bool {
        self.expires.is_some_and(|at| at <= Utc::now())
    }
}

// Security: never print the cookie value
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .field("expires", &self.expires)
            .finish()
    }
}

impl From<reqwest::cookie::Cookie<'_>> for SessionToken {
    fn from(cookie: reqwest::cookie::Cookie<'_>) -> Self {
        let expires = cookie_expiry(cookie.expires(), cookie.max_age(), Utc::now());

        Self {
            name: cookie.name().to_string(),
            value: cookie.value().to_string(),
            expires: Some(expires),
        }
    }
}

/// `Expires` wins over `Max-Age`; without either the provider's own
/// 30-minute window applies
fn cookie_expiry(
    expires: Option<SystemTime>,
    max_age: Option<std::time::Duration>,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    if let Some(at) = expires {
        return DateTime::from(at);
    }

    Duration::from_std(max_age.unwrap_or(SESSION_TTL))
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Take the single session cookie out of a successful auth response
fn session_from_response(resp: &RawResponse) -> Result<SessionToken> {
    resp.ensure_status(StatusCode::NO_CONTENT)?;

    match resp.cookies.as_slice() {
        [cookie] => Ok(cookie.clone()),
        cookies => Err(ApiError::SessionCookies(cookies.len())),
    }
}

impl Client {
    /// Log in and keep the session cookie for all later requests
    ///
    /// Fails with [`ApiError::AlreadyAuthenticated`] without touching the
    /// network when a session is already held. On any failure the client
    /// stays unauthenticated.
    pub async fn authenticate(&mut self) -> Result<()> {
        if self.is_authenticated() {
            return Err(ApiError::AlreadyAuthenticated);
        }

        let body = json!({
            "user": self.qualified_user(),
            "password": self.password,
        });

        let params = RequestParams::new(Method::POST, self.auth_url()).body(body);
        let token = request(&self.http, params, session_from_response).await?;

        tracing::debug!("Authenticated as {}", self.qualified_user());
        self.cookie = Some(token);
        Ok(())
    }

    /// True iff a session token is held; no network activity
    pub fn is_authenticated(&self) -> bool {
        self.cookie.is_some()
    }

    /// The current session token, if any
    pub fn session(&self) -> Option<&SessionToken> {
        self.cookie.as_ref()
    }

    /// Drop the session token, typically after a 401
    pub fn clear_session(&mut self) {
        self.cookie = None;
    }

    /// Fail fast unless a session token is held
    pub(crate) fn require_auth(&self) -> Result<&SessionToken> {
        self.cookie.as_ref().ok_or(ApiError::NotAuthenticated)
    }
}
