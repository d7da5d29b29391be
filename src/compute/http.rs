//! HTTP utilities for Oracle Compute REST API calls
//!
//! Every resource operation funnels through [`request`]: it encodes the body,
//! sets the provider media type, attaches the session cookie and buffers the
//! response. What counts as success is decided by the treatment closure the
//! caller passes in, since the provider answers 201, 200 or 204 depending on
//! the verb and only the authentication endpoint hands out a cookie.

use super::auth::SessionToken;
use super::error::{ApiError, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Media type for every JSON request and response
pub const JSON_MEDIA_TYPE: &str = "application/oracle-compute-v3+json";

/// Media type for directory (name listing) responses
pub const DIRECTORY_MEDIA_TYPE: &str = "application/oracle-compute-v3+directory+json";

/// Maximum length of response body to embed in errors
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Which representation the provider should answer with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaType {
    #[default]
    Json,
    Directory,
}

impl MediaType {
    fn as_str(self) -> &'static str {
        match self {
            MediaType::Json => JSON_MEDIA_TYPE,
            MediaType::Directory => DIRECTORY_MEDIA_TYPE,
        }
    }
}

/// One HTTP exchange
#[derive(Debug)]
pub struct RequestParams<'a> {
    pub verb: Method,
    pub url: String,
    pub body: Option<Value>,
    pub cookie: Option<&'a SessionToken>,
    pub accept: MediaType,
}

impl<'a> RequestParams<'a> {
    pub fn new(verb: Method, url: impl Into<String>) -> Self {
        Self {
            verb,
            url: url.into(),
            body: None,
            cookie: None,
            accept: MediaType::Json,
        }
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn cookie(mut self, cookie: Option<&'a SessionToken>) -> Self {
        self.cookie = cookie;
        self
    }

    pub fn accept(mut self, accept: MediaType) -> Self {
        self.accept = accept;
        self
    }
}

/// Buffered provider response handed to treatment closures
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub cookies: Vec<SessionToken>,
    pub body: String,
}

impl RawResponse {
    /// Fail with a status error unless the provider answered `expected`
    pub fn ensure_status(&self, expected: StatusCode) -> Result<()> {
        if self.status == expected {
            return Ok(());
        }
        Err(ApiError::Status {
            status: self.status.as_u16(),
            message: dump_api_error(&self.body),
        })
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|source| ApiError::Decode {
            status: self.status.as_u16(),
            source,
        })
    }
}

/// Issue one request and let `treat` interpret the response
pub async fn request<T, F>(http: &Client, params: RequestParams<'_>, treat: F) -> Result<T>
where
    F: FnOnce(&RawResponse) -> Result<T>,
{
    tracing::debug!("{} {}", params.verb, params.url);

    let media = params.accept.as_str();
    let mut builder = http
        .request(params.verb.clone(), &params.url)
        .header(ACCEPT, media)
        .header(CONTENT_TYPE, media);

    if let Some(cookie) = params.cookie {
        builder = builder.header(COOKIE, cookie.header_value());
    }

    if let Some(body) = &params.body {
        builder = builder.body(serde_json::to_vec(body)?);
    }

    let response = builder.send().await?;

    let status = response.status();
    let cookies = response.cookies().map(SessionToken::from).collect();
    let body = response.text().await?;

    tracing::debug!("{} {} -> {}", params.verb, params.url, status);

    treat(&RawResponse {
        status,
        cookies,
        body,
    })
}

/// Treatment accepting only `expected` and discarding the body
pub fn expect_status(expected: StatusCode) -> impl FnOnce(&RawResponse) -> Result<()> {
    move |resp| resp.ensure_status(expected)
}

/// Treatment accepting only `expected` and decoding the body into `T`
pub fn decode_json<T: DeserializeOwned>(
    expected: StatusCode,
) -> impl FnOnce(&RawResponse) -> Result<T> {
    move |resp| {
        resp.ensure_status(expected)?;
        resp.json()
    }
}

/// Extract a provider error message from a response body
///
/// The provider answers errors as `{"message": "..."}`; anything else is
/// sanitized and truncated so raw payloads never end up verbatim in errors.
pub fn dump_api_error(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("message").and_then(|v| v.as_str()) {
            return message.to_string();
        }
    }
    sanitize_for_log(body)
}

/// Truncate long bodies and drop control characters
///
/// The limit counts characters, so multi-byte text is never cut mid-char.
fn sanitize_for_log(body: &str) -> String {
    let mut cleaned = body.chars().filter(|c| !c.is_control());
    let kept: String = cleaned.by_ref().take(MAX_LOG_BODY_LENGTH).collect();

    if cleaned.next().is_some() {
        format!("{}... [truncated, {} bytes total]", kept, body.len())
    } else {
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status: StatusCode::from_u16(status).unwrap(),
            cookies: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_dump_api_error_prefers_message_field() {
        let body = r#"{"message": "Authorization failed"}"#;
        assert_eq!(dump_api_error(body), "Authorization failed");
    }

    #[test]
    fn test_dump_api_error_falls_back_to_body() {
        assert_eq!(dump_api_error("Service\nUnavailable"), "ServiceUnavailable");
        assert_eq!(dump_api_error(""), "");
    }

    #[test]
    fn test_dump_api_error_truncates() {
        let body = "x".repeat(500);
        let dumped = dump_api_error(&body);
        assert!(dumped.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(dumped.ends_with("[truncated, 500 bytes total]"));
    }

    #[test]
    fn test_dump_api_error_keeps_non_ascii() {
        assert_eq!(
            dump_api_error("Requête refusée: quota dépassé\r\n"),
            "Requête refusée: quota dépassé"
        );
        assert_eq!(dump_api_error("配额已用尽\t"), "配额已用尽");
    }

    #[test]
    fn test_dump_api_error_truncates_on_char_boundary() {
        let body = "é".repeat(300);
        let dumped = dump_api_error(&body);
        assert!(dumped.starts_with(&"é".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(dumped.ends_with("[truncated, 600 bytes total]"));

        let exact = "é".repeat(MAX_LOG_BODY_LENGTH);
        assert_eq!(dump_api_error(&exact), exact);
    }

    #[test]
    fn test_ensure_status() {
        assert!(raw(204, "").ensure_status(StatusCode::NO_CONTENT).is_ok());

        let err = raw(409, r#"{"message": "Conflict"}"#)
            .ensure_status(StatusCode::CREATED)
            .unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.to_string(), "Error api response 409 Conflict");
    }

    #[test]
    fn test_decode_json_checks_status_first() {
        let treat = decode_json::<Value>(StatusCode::OK);
        let err = treat(&raw(500, "not json")).unwrap_err();
        assert_eq!(err.status(), Some(500));

        let treat = decode_json::<Value>(StatusCode::OK);
        let err = treat(&raw(200, "{")).unwrap_err();
        assert!(matches!(err, ApiError::Decode { status: 200, .. }));
        assert_eq!(err.status(), Some(200));

        let treat = decode_json::<Value>(StatusCode::OK);
        assert_eq!(treat(&raw(200, r#"{"a": 1}"#)).unwrap()["a"], 1);
    }

    #[test]
    fn test_media_types() {
        assert_eq!(MediaType::default().as_str(), JSON_MEDIA_TYPE);
        assert_eq!(MediaType::Directory.as_str(), DIRECTORY_MEDIA_TYPE);
    }
}
