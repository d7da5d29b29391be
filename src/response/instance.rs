//! Compute instance payloads.

use super::common::{InstanceState, Networking};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Every instance in the account container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllInstances {
    #[serde(default, alias = "list")]
    pub result: Vec<Instance>,
}

/// Instance names, as returned by the directory media type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllInstanceNames {
    #[serde(default)]
    pub result: Vec<String>,
}

/// A compute instance
///
/// Identity fields are always present; most of the rest is `null` until the
/// instance has been placed and booted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instance {
    pub domain: Option<String>,
    pub placement_requirements: Vec<String>,
    pub ip: Option<String>,
    pub site: Option<String>,
    pub shape: String,
    pub imagelist: Option<String>,
    pub image_format: Option<String>,
    pub relationships: Vec<Value>,
    pub availability_domain: Option<String>,
    pub networking: Networking,
    pub storage_attachments: Vec<StorageAttachment>,
    pub hostname: Option<String>,
    pub quota_reservation: Option<String>,
    pub disk_attach: Option<String>,
    pub label: Option<String>,
    pub priority: Option<String>,
    pub platform: Option<String>,
    pub state: InstanceState,
    pub virtio: Option<bool>,
    pub vnc: Option<String>,
    pub desired_state: Option<String>,
    pub tags: Vec<String>,
    pub start_time: Option<String>,
    pub quota: Option<String>,
    pub entry: Option<u32>,
    pub error_reason: Option<String>,
    pub sshkeys: Vec<String>,
    pub resolvers: Option<Vec<String>>,
    pub account: String,
    pub name: String,
    pub vcable_id: Option<String>,
    pub hypervisor: Hypervisor,
    pub uri: String,
    pub reverse_dns: bool,
    pub attributes: Attributes,
    pub boot_order: Vec<u32>,
}

/// Storage volume attached to an instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageAttachment {
    pub index: u32,
    pub storage_volume_name: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hypervisor {
    pub mode: String,
}

/// Launch attributes reported back by the provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    pub sshkeys: Vec<String>,
    pub network: Value,
    pub dns: Dns,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dns {
    pub domain: String,
    pub hostname: String,
    #[serde(rename = "nimbula_vcable-eth0")]
    pub vcable_eth0: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_tolerates_nulls_and_missing_fields() {
        let body = r#"{
            "name": "/Compute-acme/jack@example.com/web/7c1d",
            "account": "/Compute-acme/default",
            "shape": "oc3",
            "state": "running",
            "imagelist": null,
            "quota_reservation": null,
            "networking": {
                "eth0": {"model": "", "seclists": ["/Compute-acme/default/default"], "dns": [], "vethernet": "/oracle/public/default", "nat": null}
            },
            "storage_attachments": [{"index": 1, "storage_volume_name": "web_storage", "name": "web/7c1d/0"}],
            "attributes": {"dns": {"domain": "acme.oraclecloud.internal.", "hostname": "web", "nimbula_vcable-eth0": "vcable"}},
            "boot_order": [1]
        }"#;

        let instance: Instance = serde_json::from_str(body).unwrap();
        assert_eq!(instance.state, InstanceState::Running);
        assert_eq!(instance.networking["eth0"].seclists.len(), 1);
        assert_eq!(instance.storage_attachments[0].storage_volume_name, "web_storage");
        assert_eq!(instance.attributes.dns.vcable_eth0, "vcable");
        assert!(instance.imagelist.is_none());
    }

    #[test]
    fn test_instance_accepts_null_runtime_fields() {
        let body = r#"{
            "name": "/Compute-acme/jack@example.com/web/7c1d",
            "account": "/Compute-acme/default",
            "shape": "oc3",
            "state": "queued",
            "domain": null,
            "ip": null,
            "image_format": null,
            "hostname": null,
            "label": null,
            "priority": null,
            "platform": null,
            "vnc": null,
            "desired_state": null,
            "start_time": null,
            "quota": null,
            "error_reason": null,
            "vcable_id": null
        }"#;

        let instance: Instance = serde_json::from_str(body).unwrap();
        assert_eq!(instance.shape, "oc3");
        assert!(instance.vnc.is_none());
        assert!(instance.ip.is_none());
        assert!(instance.start_time.is_none());
        assert!(instance.error_reason.is_none());
        assert!(instance.vcable_id.is_none());

        let running = r#"{"name": "web/7c1d", "ip": "10.0.0.2", "vnc": "10.0.0.2:5900"}"#;
        let instance: Instance = serde_json::from_str(running).unwrap();
        assert_eq!(instance.ip.as_deref(), Some("10.0.0.2"));
        assert_eq!(instance.vnc.as_deref(), Some("10.0.0.2:5900"));
    }
}
