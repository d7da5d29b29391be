//! Security list payloads.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Packet policy of a security list
///
/// The provider only accepts upper-case values; parsing is case-insensitive
/// and serialization always upper-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Packets are dropped, no response is sent
    Deny,
    /// Packets are dropped, a response is sent
    Reject,
    /// Packets are allowed
    Permit,
}

impl Policy {
    pub fn as_str(self) -> &'static str {
        match self {
            Policy::Deny => "DENY",
            Policy::Reject => "REJECT",
            Policy::Permit => "PERMIT",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DENY" => Ok(Policy::Deny),
            "REJECT" => Ok(Policy::Reject),
            "PERMIT" => Ok(Policy::Permit),
            _ => Err(format!("unknown policy '{}', expected deny, reject or permit", s)),
        }
    }
}

impl Serialize for Policy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A security list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecList {
    pub account: String,
    pub description: Option<String>,
    pub name: String,
    pub outbound_cidr_policy: Option<Policy>,
    pub policy: Option<Policy>,
    pub uri: String,
    pub group_id: Option<String>,
    pub id: Option<String>,
}

/// Every security list in the account container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllSecLists {
    #[serde(default)]
    pub result: Vec<SecList>,
}
