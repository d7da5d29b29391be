//! Types shared by instance and orchestration payloads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Network interfaces keyed by interface name (`eth0`, `eth1`, ...)
pub type Networking = BTreeMap<String, Nic>;

/// One network interface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nic {
    pub model: String,
    pub seclists: Vec<String>,
    pub dns: Vec<String>,
    pub vethernet: String,
    pub nat: Option<String>,
}

/// Lifecycle state of an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceState {
    Queued,
    Initializing,
    Preparing,
    Starting,
    Running,
    Suspending,
    Suspended,
    Stopping,
    Stopped,
    Error,
    #[default]
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_state_falls_back() {
        let state: InstanceState = serde_json::from_str(r#""running""#).unwrap();
        assert_eq!(state, InstanceState::Running);

        let state: InstanceState = serde_json::from_str(r#""migrating""#).unwrap();
        assert_eq!(state, InstanceState::Unknown);
    }
}
