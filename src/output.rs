//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{StoragePolicy, StoragePolicyAssignment};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for StoragePolicy {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.id.len().max(30));

        let mut lines = vec![format!("Storage Policy: {}", self.id), divider];

        if let Some(ref name) = self.name {
            lines.push(format!("Name:           {name}"));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for StoragePolicyAssignment {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.id.len().max(30));

        vec![
            format!("Assignment: {}", self.id),
            divider,
            format!("Policy:         {}", self.policy_id()),
            format!(
                "Assigned To:    {} {}",
                self.target_kind(),
                self.target_id()
            ),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PolicyRef, TargetRef};

    #[test]
    fn test_assignment_pretty_print() {
        let assignment = StoragePolicyAssignment {
            id: "user_1111".to_string(),
            assigned_to: TargetRef::user("5678"),
            storage_policy: PolicyRef::new("1234"),
        };

        let output = assignment.pretty_print();
        assert!(output.contains("Assignment: user_1111"));
        assert!(output.contains("Policy:         1234"));
        assert!(output.contains("user 5678"));
    }

    #[test]
    fn test_policy_pretty_print_without_name() {
        let policy = StoragePolicy {
            id: "1234".to_string(),
            name: None,
        };

        let output = policy.pretty_print();
        assert!(output.contains("Storage Policy: 1234"));
        assert!(!output.contains("Name:"));
    }
}
