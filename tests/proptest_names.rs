//! Property-based tests using proptest
//!
//! These tests verify name normalization and orchestration type inference
//! over randomized inputs.

use oracle_compute::response::{
    Object, Oplan, Orchestration, OrchestrationInstance, OrchestrationType,
};
use oracle_compute::{Client, Config};
use proptest::prelude::*;

fn client(identify: &str, username: &str) -> Client {
    Client::new(Config {
        username: username.to_string(),
        password: "secret".to_string(),
        identify: identify.to_string(),
        endpoint: "https://api.example.com".to_string(),
    })
    .expect("valid config")
}

/// Object with or without instances and properties
fn arb_object() -> impl Strategy<Value = Object> {
    (any::<bool>(), any::<bool>()).prop_map(|(with_instances, with_properties)| Object {
        instances: if with_instances {
            vec![OrchestrationInstance {
                name: "web".to_string(),
                ..Default::default()
            }]
        } else {
            Vec::new()
        },
        properties: if with_properties {
            vec!["/oracle/public/storage/default".to_string()]
        } else {
            Vec::new()
        },
        ..Default::default()
    })
}

fn arb_orchestration() -> impl Strategy<Value = Orchestration> {
    prop::collection::vec(prop::collection::vec(arb_object(), 0..5), 0..5).prop_map(|plans| {
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
    })
}

proptest! {
    /// Decorating then stripping returns the caller's name
    #[test]
    fn name_round_trips(
        identify in "[a-z][a-z0-9]{2,12}",
        username in "[a-z][a-z0-9.]{0,10}@[a-z]{2,8}\\.com",
        name in "[A-Za-z0-9_.-]{1,20}(/[a-z0-9-]{1,12})?",
    ) {
        let client = client(&identify, &username);
        let decorated = client.qualified_name(&name);
        prop_assert_eq!(client.strip_name(&decorated), name);
    }

    /// Undecorated names pass through unchanged
    #[test]
    fn undecorated_names_are_untouched(name in "[A-Za-z0-9_.-]{1,20}") {
        let client = client("acme", "jack@example.com");
        prop_assert_eq!(client.strip_name(&name), name);
    }

    /// Account paths reduce to the account name
    #[test]
    fn account_is_stripped(account in "[a-z][a-z0-9_]{0,15}") {
        let client = client("acme", "jack@example.com");
        let decorated = format!("/Compute-acme/{}", account);
        prop_assert_eq!(client.strip_name(&decorated), account);
    }

    /// The inferred type matches the first object carrying data
    #[test]
    fn orchestration_type_follows_first_match(orchestration in arb_orchestration()) {
        let first = orchestration
            .oplans
            .iter()
            .flat_map(|p| p.objects.iter())
            .find(|o| !o.instances.is_empty() || !o.properties.is_empty());

        let expected = match first {
            Some(o) if !o.instances.is_empty() => OrchestrationType::Instance,
            Some(_) => OrchestrationType::Storage,
            None => OrchestrationType::Master,
        };
        prop_assert_eq!(orchestration.orchestration_type(), expected);
    }

    /// Any instance anywhere with no earlier storage object gives the instance type
    #[test]
    fn instances_without_properties_are_instance_type(orchestration in arb_orchestration()) {
        let has_instances = orchestration
            .oplans
            .iter()
            .flat_map(|p| p.objects.iter())
            .any(|o| !o.instances.is_empty());
        let has_properties = orchestration
            .oplans
            .iter()
            .flat_map(|p| p.objects.iter())
            .any(|o| !o.properties.is_empty());

        if has_instances && !has_properties {
            prop_assert_eq!(orchestration.orchestration_type(), OrchestrationType::Instance);
        }
        if !has_instances && !has_properties {
            prop_assert_eq!(orchestration.orchestration_type(), OrchestrationType::Master);
        }
    }
}
