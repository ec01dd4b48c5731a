//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the stashapi binary.

use clap::{Parser, Subcommand, ValueEnum};

use crate::TargetKind;

/// Stash API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "stashapi", about = "Stash API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The entity ID.
        id: String,
    },

    /// List entities with marker pagination.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Number of entries per page.
        #[arg(long)]
        limit: Option<u32>,

        /// Opaque marker from a previous page.
        #[arg(long)]
        marker: Option<String>,
    },

    /// Resolve the effective policy assignment for a target.
    Resolve {
        /// Target kind to resolve for.
        #[arg(long, value_enum, default_value = "user")]
        target_type: TargetArg,

        /// Target ID to resolve for.
        #[arg(long)]
        target_id: String,
    },

    /// Create a new policy assignment for a user.
    Create {
        /// Storage policy ID to assign.
        #[arg(long)]
        policy: String,

        /// Target user ID.
        #[arg(long)]
        target: String,
    },

    /// Update an assignment's storage policy.
    Update {
        /// The assignment ID.
        id: String,

        /// Replacement storage policy ID.
        #[arg(long)]
        policy: String,
    },

    /// Delete an assignment by ID.
    Delete {
        /// The assignment ID.
        id: String,
    },

    /// Ensure a user is covered by a policy (create or update).
    Assign {
        /// Storage policy ID to assign.
        #[arg(long)]
        policy: String,

        /// Target user ID.
        #[arg(long)]
        target: String,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A storage policy.
    #[value(alias = "policies")]
    Policy,
    /// A storage policy assignment.
    #[value(alias = "assignments")]
    Assignment,
}

/// Assignment target kinds accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetArg {
    /// An individual user.
    User,
    /// The whole enterprise.
    Enterprise,
}

impl From<TargetArg> for TargetKind {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::User => TargetKind::User,
            TargetArg::Enterprise => TargetKind::Enterprise,
        }
    }
}
