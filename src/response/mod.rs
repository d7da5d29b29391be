//! Response model
//!
//! Passive serde structures for the JSON the provider returns. Name and
//! account fields reach callers undecorated; the operations in
//! [`crate::compute`] strip them before returning.
//!
//! - [`seclist`] - security lists
//! - [`instance`] - compute instances
//! - [`orchestration`] - orchestrations and their inferred type
//! - [`common`] - networking and state types shared by several resources

pub mod common;
pub mod instance;
pub mod orchestration;
pub mod seclist;

pub use common::{InstanceState, Networking, Nic};
pub use instance::{AllInstanceNames, AllInstances, Instance};
pub use orchestration::{
    AllOrchestrations, Object, Oplan, Orchestration, OrchestrationInstance, OrchestrationType,
};
pub use seclist::{AllSecLists, Policy, SecList};
