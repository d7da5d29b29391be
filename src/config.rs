//! Configuration Management
//!
//! Account settings come from three layers, highest precedence first:
//! command-line flags, `ORACLE_COMPUTE_*` environment variables, and the
//! config file at `<config dir>/oracle-compute/config.json`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const ENV_USERNAME: &str = "ORACLE_COMPUTE_USERNAME";
pub const ENV_PASSWORD: &str = "ORACLE_COMPUTE_PASSWORD";
pub const ENV_IDENTITY: &str = "ORACLE_COMPUTE_IDENTITY";
pub const ENV_ENDPOINT: &str = "ORACLE_COMPUTE_ENDPOINT";

/// Account configuration consumed by [`Client::new`](crate::Client::new)
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Account username
    #[serde(default)]
    pub username: String,
    /// Account password, never written to disk
    #[serde(default, skip_serializing)]
    pub password: String,
    /// Identity domain name
    #[serde(default)]
    pub identify: String,
    /// REST endpoint base URL
    #[serde(default)]
    pub endpoint: String,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("oracle-compute").join("config.json"))
    }

    /// Load configuration from disk, then apply the environment
    pub fn load() -> Self {
        let mut config = Self::load_file();
        config.merge(Self::from_env());
        config
    }

    fn load_file() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config file {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Settings taken from `ORACLE_COMPUTE_*` variables
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).unwrap_or_default();
        Self {
            username: var(ENV_USERNAME),
            password: var(ENV_PASSWORD),
            identify: var(ENV_IDENTITY),
            endpoint: var(ENV_ENDPOINT),
        }
    }

    /// Overwrite fields with every non-empty field of `other`
    pub fn merge(&mut self, other: Config) {
        fn take(field: &mut String, value: String) {
            if !value.is_empty() {
                *field = value;
            }
        }

        take(&mut self.username, other.username);
        take(&mut self.password, other.password);
        take(&mut self.identify, other.identify);
        take(&mut self.endpoint, other.endpoint);
    }
}

// Security: the password must not reach logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("identify", &self.identify)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
