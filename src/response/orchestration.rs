//! Orchestration payloads
//!
//! An orchestration bundles the compute, networking and storage objects of
//! a topology into object plans (oplans) that are started and stopped as a
//! unit. The payload does not say which kind of orchestration it is; the
//! kind is inferred from which object fields are populated, see
//! [`Orchestration::orchestration_type`].

use super::common::{InstanceState, Networking};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Every orchestration in the account container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllOrchestrations {
    #[serde(default)]
    pub result: Vec<Orchestration>,
}

/// An orchestration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Orchestration {
    /// Ordering constraints between oplans
    pub relationships: Vec<Relationship>,
    pub status: String,
    /// Default account of the identity domain
    pub account: String,
    pub description: Option<String>,
    pub schedule: Schedule,
    pub uri: Option<String>,
    pub oplans: Vec<Oplan>,
    /// Per-object errors, empty when nothing failed
    pub info: Info,
    pub user: String,
    /// When this view was generated; only present while running
    pub status_timestamp: Option<String>,
    pub name: String,
}

/// Dependency between two oplans
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relationship {
    pub to_oplan: Option<String>,
    pub oplan: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    pub start_time: Option<String>,
    pub stop_time: Option<String>,
}

/// An object plan, the top-level unit of an orchestration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Oplan {
    pub status: String,
    pub info: Info,
    pub obj_type: String,
    pub ha_policy: Option<String>,
    pub label: String,
    pub objects: Vec<Object>,
    pub status_timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    pub errors: BTreeMap<String, String>,
}

/// One object of an oplan
///
/// `instances` is populated for instance orchestrations; the storage
/// fields (`properties`, `size`, `bootable`, ...) for storage ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Object {
    pub info: Info,
    pub instances: Vec<OrchestrationInstance>,
    pub status: Option<String>,
    pub name: Option<String>,
    pub status_timestamp: Option<String>,
    pub uri: Option<String>,

    pub managed: bool,
    pub snapshot_account: Option<String>,
    pub machineimage_name: Option<String>,
    pub snapshot_id: Option<String>,
    pub imagelist: Option<String>,
    pub writecache: bool,
    pub size: Option<String>,
    pub platform: Option<String>,
    pub readonly: bool,
    pub storage_pool: Option<String>,
    pub shared: bool,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub quota: Option<String>,
    pub properties: Vec<String>,
    pub account: Option<String>,
    pub bootable: bool,
    pub hypervisor: Option<String>,
    pub imagelist_entry: Option<i32>,
    pub snapshot: Option<String>,
}

/// Instance launched by an instance orchestration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestrationInstance {
    pub hostname: Option<String>,
    pub networking: Networking,
    pub name: String,
    pub boot_order: Vec<u32>,
    pub ip: Option<String>,
    pub start_time: Option<String>,
    pub storage_attachments: Vec<OrchestrationStorage>,
    pub uri: Option<String>,
    pub label: Option<String>,
    pub shape: String,
    pub state: Option<InstanceState>,
    pub attributes: OrchestrationAttributes,
    pub imagelist: Option<String>,
    pub sshkeys: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestrationStorage {
    pub volume: String,
    pub index: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestrationAttributes {
    pub userdata: BTreeMap<String, String>,
    pub nimbula_orchestration: Option<String>,
}

/// Kind of orchestration, inferred from its objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrchestrationType {
    Instance,
    Storage,
    Master,
}

impl fmt::Display for OrchestrationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrchestrationType::Instance => "Instance",
            OrchestrationType::Storage => "Storage",
            OrchestrationType::Master => "Master",
        };
        f.write_str(s)
    }
}

impl Orchestration {
    /// Infer the orchestration kind
    ///
    /// Objects are scanned in oplan order, then object order. The first
    /// object with instances makes it an instance orchestration, the first
    /// with properties a storage orchestration. Nothing found means master.
    pub fn orchestration_type(&self) -> OrchestrationType {
        self.oplans
            .iter()
            .flat_map(|oplan| oplan.objects.iter())
            .find_map(|object| {
                if !object.instances.is_empty() {
                    Some(OrchestrationType::Instance)
                } else if !object.properties.is_empty() {
                    Some(OrchestrationType::Storage)
                } else {
                    None
                }
            })
            .unwrap_or(OrchestrationType::Master)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance_object() -> Object {
        Object {
            instances: vec![OrchestrationInstance {
                name: "web".to_string(),
                shape: "oc3".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn storage_object() -> Object {
        Object {
            properties: vec!["/oracle/public/storage/default".to_string()],
            size: Some("10G".to_string()),
            ..Default::default()
        }
    }

    fn orchestration(plans: Vec<Vec<Object>>) -> Orchestration {
        Orchestration {
            oplans: plans
                .into_iter()
                .map(|objects| Oplan {
                    objects,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_is_master() {
        assert_eq!(
            Orchestration::default().orchestration_type(),
            OrchestrationType::Master
        );
        assert_eq!(
            orchestration(vec![vec![], vec![Object::default()]]).orchestration_type(),
            OrchestrationType::Master
        );
    }

    #[test]
    fn test_instances_make_instance_type() {
        let o = orchestration(vec![vec![Object::default()], vec![instance_object()]]);
        assert_eq!(o.orchestration_type(), OrchestrationType::Instance);
    }

    #[test]
    fn test_properties_make_storage_type() {
        let o = orchestration(vec![vec![storage_object()]]);
        assert_eq!(o.orchestration_type(), OrchestrationType::Storage);
    }

    #[test]
    fn test_first_match_wins() {
        let o = orchestration(vec![vec![storage_object()], vec![instance_object()]]);
        assert_eq!(o.orchestration_type(), OrchestrationType::Storage);

        let o = orchestration(vec![vec![instance_object(), storage_object()]]);
        assert_eq!(o.orchestration_type(), OrchestrationType::Instance);
    }

    #[test]
    fn test_decoded_payload() {
        let body = r#"{
            "name": "/Compute-acme/jack@example.com/web_orch",
            "account": "/Compute-acme/default",
            "status": "ready",
            "user": "/Compute-acme/jack@example.com",
            "schedule": {"start_time": "2017-03-01T10:00:00Z", "stop_time": null},
            "relationships": [{"oplan": "web", "to_oplan": "storage", "type": "depends"}],
            "oplans": [{
                "label": "web",
                "obj_type": "launchplan",
                "status": "ready",
                "info": {"errors": {}},
                "objects": [{"instances": [{"name": "web", "shape": "oc3", "state": "running"}]}]
            }]
        }"#;

        let o: Orchestration = serde_json::from_str(body).unwrap();
        assert_eq!(o.orchestration_type(), OrchestrationType::Instance);
        assert_eq!(o.relationships[0].kind.as_deref(), Some("depends"));
        assert!(o.schedule.stop_time.is_none());
        assert_eq!(
            o.oplans[0].objects[0].instances[0].state,
            Some(InstanceState::Running)
        );
    }
}
