//! Error types for the Oracle Compute client.

use thiserror::Error;

// ============================================================================
// Configuration Error
// ============================================================================

/// A required configuration field is missing or malformed.
///
/// Detected by [`Client::new`](super::client::Client::new) before any
/// network activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Empty identify endpoint name")]
    EmptyIdentify,

    #[error("Empty client username")]
    EmptyUsername,

    #[error("Empty client password")]
    EmptyPassword,

    #[error("Empty endpoint url basepath")]
    EmptyEndpoint,

    #[error("The endpoint provided is invalid")]
    InvalidEndpoint(#[source] url::ParseError),
}

// ============================================================================
// API Error
// ============================================================================

/// Error type for every client operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client construction failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// `authenticate` was called while a session token is held.
    #[error("Client is already authenticated")]
    AlreadyAuthenticated,

    /// A resource operation was called without a session token.
    #[error("Client is not authenticated")]
    NotAuthenticated,

    /// A required argument was empty.
    #[error("Empty {0}")]
    Empty(&'static str),

    /// A resource name has a `.` or `..` path segment.
    #[error("Invalid resource name: {0}")]
    InvalidName(String),

    /// The provider answered with a status the operation does not accept.
    #[error("Error api response {status} {message}")]
    Status {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Provider error message, best effort.
        message: String,
    },

    /// The authentication response did not carry exactly one session cookie.
    #[error("Invalid number of session cookies: {0}")]
    SessionCookies(usize),

    /// The provider answered the expected status with a body that does not
    /// decode into the response type.
    #[error("Error decoding api response {status}: {source}")]
    Decode {
        /// HTTP status code returned by the provider.
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Request body could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Connection-level failure.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// HTTP status carried by the error, if the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } | ApiError::Decode { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the provider rejected the session cookie.
    ///
    /// Callers should clear the session and authenticate again; the client
    /// never retries on its own.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Result alias used across the client.
pub type Result<T, E = ApiError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_is_transparent() {
        let err = ApiError::from(ConfigError::EmptyUsername);
        assert_eq!(err.to_string(), "Empty client username");
    }

    #[test]
    fn test_status_helpers() {
        let err = ApiError::Status {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert_eq!(err.status(), Some(401));
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Error api response 401 Unauthorized");

        assert_eq!(ApiError::NotAuthenticated.status(), None);
        assert!(!ApiError::SessionCookies(2).is_unauthorized());
    }

    #[test]
    fn test_decode_error_keeps_status() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::Decode {
            status: 200,
            source,
        };
        assert_eq!(err.status(), Some(200));
        assert!(!err.is_unauthorized());
        assert!(err.to_string().starts_with("Error decoding api response 200: "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_empty_argument_message() {
        assert_eq!(
            ApiError::Empty("secure list").to_string(),
            "Empty secure list"
        );
    }
}
