//! Oracle Compute Client
//!
//! Holds the validated account configuration, the shared HTTP client and the
//! session cookie. Resource operations live in their own modules as
//! `impl Client` blocks.

use super::auth::SessionToken;
use super::error::{ApiError, ConfigError, Result};
use crate::config::Config;
use std::fmt;
use url::Url;

/// User agent for API requests
const USER_AGENT: &str = concat!("oracle-compute/", env!("CARGO_PKG_VERSION"));

/// Main Oracle Compute client
pub struct Client {
    pub(crate) identify: String,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) endpoint: String,
    pub(crate) http: reqwest::Client,
    pub(crate) cookie: Option<SessionToken>,
}

impl Client {
    /// Validate `config` and build an unauthenticated client
    pub fn new(config: Config) -> Result<Self> {
        let endpoint = validate(&config)?;

        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            identify: config.identify,
            username: config.username,
            password: config.password,
            endpoint,
            http,
            cookie: None,
        })
    }

    pub fn identify(&self) -> &str {
        &self.identify
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    // =========================================================================
    // Name decoration
    // =========================================================================

    /// `/Compute-<identity>`
    fn container(&self) -> String {
        format!("/Compute-{}", self.identify)
    }

    /// `/Compute-<identity>/<username>`, the login identity
    pub fn qualified_user(&self) -> String {
        format!("{}/{}", self.container(), self.username)
    }

    /// `/Compute-<identity>/<username>/<name>`, the form the provider expects
    pub fn qualified_name(&self, name: &str) -> String {
        format!("{}/{}", self.qualified_user(), name)
    }

    /// Recover the caller-facing name from a provider-decorated one
    ///
    /// `/Compute-<identity>/<username>/<name>` becomes `<name>` and
    /// `/Compute-<identity>/<account>` becomes `<account>`. Values without
    /// the container prefix are returned unchanged.
    pub fn strip_name(&self, decorated: &str) -> String {
        let container = format!("{}/", self.container());
        let Some(rest) = decorated.strip_prefix(&container) else {
            return decorated.to_string();
        };

        rest.strip_prefix(&self.username)
            .and_then(|r| r.strip_prefix('/'))
            .unwrap_or(rest)
            .to_string()
    }

    /// In-place variant of [`Client::strip_name`]
    pub(crate) fn strip(&self, field: &mut String) {
        *field = self.strip_name(field);
    }

    // =========================================================================
    // URL helpers
    // =========================================================================

    pub(crate) fn auth_url(&self) -> String {
        format!("{}/authenticate/", self.endpoint)
    }

    /// `{endpoint}/<resource>/`, target of create calls
    pub(crate) fn resource_url(&self, resource: &str) -> String {
        format!("{}/{}/", self.endpoint, resource)
    }

    /// `{endpoint}/<resource>/Compute-<identity>/<username>/`, target of list calls
    pub(crate) fn container_url(&self, resource: &str) -> String {
        format!(
            "{}/{}/Compute-{}/{}/",
            self.endpoint, resource, self.identify, self.username
        )
    }

    /// `{endpoint}/<resource>/Compute-<identity>/<username>/<name>`
    ///
    /// Each `/`-separated segment of `name` is percent-encoded so `#`, `?`
    /// and spaces stay part of the name; `.` and `..` segments are refused
    /// since URL parsing would collapse them into another resource's path.
    pub(crate) fn object_url(&self, resource: &str, name: &str) -> Result<String> {
        let mut encoded = Vec::new();
        for segment in name.split('/') {
            if segment == "." || segment == ".." {
                return Err(ApiError::InvalidName(name.to_string()));
            }
            encoded.push(urlencoding::encode(segment));
        }

        Ok(format!("{}{}", self.container_url(resource), encoded.join("/")))
    }
}

// Security: never print the password or the session cookie value
impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("identify", &self.identify)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("cookie", &self.cookie)
            .finish()
    }
}

/// Check every required field and return the endpoint without trailing slash
fn validate(config: &Config) -> std::result::Result<String, ConfigError> {
    if config.identify.is_empty() {
        return Err(ConfigError::EmptyIdentify);
    }
    if config.username.is_empty() {
        return Err(ConfigError::EmptyUsername);
    }
    if config.password.is_empty() {
        return Err(ConfigError::EmptyPassword);
    }
    if config.endpoint.is_empty() {
        return Err(ConfigError::EmptyEndpoint);
    }

    Url::parse(&config.endpoint).map_err(ConfigError::InvalidEndpoint)?;

    Ok(config.endpoint.trim_end_matches('/').to_string())
}
