//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::{PolicyRef, StoragePolicy, StoragePolicyAssignment, TargetRef};

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// The data set a default-fixture server starts with.
pub struct DefaultScenario {
    pub policies: Vec<StoragePolicy>,
    pub assignments: Vec<StoragePolicyAssignment>,
}

impl Fixtures {
    /// Create a storage policy.
    pub fn policy(id: &str, name: &str) -> StoragePolicy {
        StoragePolicy {
            id: id.to_string(),
            name: Some(name.to_string()),
        }
    }

    /// Create a user-level assignment.
    pub fn user_assignment(id: &str, policy_id: &str, user_id: &str) -> StoragePolicyAssignment {
        StoragePolicyAssignment {
            id: id.to_string(),
            assigned_to: TargetRef::user(user_id),
            storage_policy: PolicyRef::new(policy_id),
        }
    }

    /// Create an enterprise-level assignment.
    pub fn enterprise_assignment(
        id: &str,
        policy_id: &str,
        enterprise_id: &str,
    ) -> StoragePolicyAssignment {
        StoragePolicyAssignment {
            id: id.to_string(),
            assigned_to: TargetRef::enterprise(enterprise_id),
            storage_policy: PolicyRef::new(policy_id),
        }
    }

    /// The default scenario: two policies and an enterprise default
    /// assignment pointing users at the standard policy.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            policies: vec![
                Self::policy("1234", "Standard Storage"),
                Self::policy("5555", "Archive Storage"),
            ],
            assignments: vec![Self::enterprise_assignment("enterprise_9999", "1234", "9999")],
        }
    }
}
