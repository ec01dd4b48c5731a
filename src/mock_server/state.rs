//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Stash API server.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{PolicyRef, StoragePolicy, StoragePolicyAssignment, TargetKind, TargetRef};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug)]
pub struct MockState {
    /// Storage policies indexed by ID.
    pub policies: HashMap<String, StoragePolicy>,

    /// Assignments indexed by ID.
    pub assignments: HashMap<String, StoragePolicyAssignment>,

    /// Counter for IDs handed out by the create handler.
    next_id: u64,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            policies: HashMap::new(),
            assignments: HashMap::new(),
            next_id: 1111,
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a storage policy to the state.
    pub fn with_policy(mut self, policy: StoragePolicy) -> Self {
        self.policies.insert(policy.id.clone(), policy);
        self
    }

    /// Add an assignment to the state.
    pub fn with_assignment(mut self, assignment: StoragePolicyAssignment) -> Self {
        self.assignments.insert(assignment.id.clone(), assignment);
        self
    }

    /// Get a policy by ID.
    pub fn get_policy(&self, id: &str) -> Option<&StoragePolicy> {
        self.policies.get(id)
    }

    /// Get an assignment by ID.
    pub fn get_assignment(&self, id: &str) -> Option<&StoragePolicyAssignment> {
        self.assignments.get(id)
    }

    /// List all policies sorted by ID (the marker order).
    pub fn list_policies(&self) -> Vec<&StoragePolicy> {
        let mut policies: Vec<&StoragePolicy> = self.policies.values().collect();
        policies.sort_by(|a, b| a.id.cmp(&b.id));
        policies
    }

    /// Resolve the effective assignment for a target.
    ///
    /// An exact target match wins; a user target without its own
    /// assignment falls back to the enterprise default.
    pub fn resolve_assignment(
        &self,
        kind: TargetKind,
        target_id: &str,
    ) -> Option<&StoragePolicyAssignment> {
        let mut assignments: Vec<&StoragePolicyAssignment> = self.assignments.values().collect();
        assignments.sort_by(|a, b| a.id.cmp(&b.id));

        if let Some(exact) = assignments
            .iter()
            .find(|a| a.target_kind() == kind && a.target_id() == target_id)
        {
            return Some(*exact);
        }

        if kind == TargetKind::User {
            return assignments
                .into_iter()
                .find(|a| a.target_kind() == TargetKind::Enterprise);
        }

        None
    }

    /// Insert a new assignment, handing out the next ID.
    pub fn create_assignment(
        &mut self,
        kind: TargetKind,
        target_id: &str,
        policy: PolicyRef,
    ) -> &StoragePolicyAssignment {
        let id = format!("{}_{}", kind, self.next_id);
        self.next_id += 1;

        let assignment = StoragePolicyAssignment {
            id: id.clone(),
            assigned_to: TargetRef {
                kind,
                id: target_id.to_string(),
            },
            storage_policy: policy,
        };
        self.assignments.insert(id.clone(), assignment);
        self.assignments.get(&id).expect("just inserted")
    }

    /// Apply a policy change to the store's sole assignment.
    ///
    /// The update endpoint is collection-scoped, so the store must contain
    /// exactly one assignment for the request to be unambiguous.
    pub fn update_sole_assignment(
        &mut self,
        policy: Option<PolicyRef>,
    ) -> Option<&StoragePolicyAssignment> {
        if self.assignments.len() != 1 {
            return None;
        }
        let assignment = self.assignments.values_mut().next().expect("len checked");
        if let Some(policy) = policy {
            assignment.storage_policy = policy;
        }
        Some(assignment)
    }

    /// Remove an assignment; returns true if it existed.
    pub fn delete_assignment(&mut self, id: &str) -> bool {
        self.assignments.remove(id).is_some()
    }
}
