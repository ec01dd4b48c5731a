//! Stash API client library.
//!
//! A Rust library for interacting with the Stash content-management REST
//! API using a trait-based architecture where each operation (Create, Get,
//! List, Update, Delete) is defined as a trait that entity types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use stashapi::{List, StashClient, StoragePolicy, StoragePolicyAssignment, TargetKind};
//!
//! #[tokio::main]
//! async fn main() -> stashapi::Result<()> {
//!     // Create client from environment variables
//!     let client = StashClient::from_env()?;
//!
//!     // List available storage policies
//!     let policies = StoragePolicy::list_all(&client, &Default::default()).await?;
//!     println!("Found {} policies", policies.len());
//!
//!     // Resolve the effective assignment for a user
//!     let assignment =
//!         StoragePolicyAssignment::for_target(&client, TargetKind::User, "5678").await?;
//!     println!("User 5678 is on policy {}", assignment.policy_id());
//!
//!     // Upsert: move the user onto another policy
//!     let moved = StoragePolicyAssignment::assign(&client, "1234", "5678").await?;
//!     println!("Now on policy {}", moved.policy_id());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around five core traits:
//!
//! - [`Create`] - Post a new entity to a collection endpoint
//! - [`Get`] - Fetch a single entity by ID
//! - [`List`] - Fetch marker-paginated collections of entities
//! - [`Update`] - Modify an existing entity with a sparse patch
//! - [`Delete`] - Remove an entity by ID
//!
//! Each entity type (like [`StoragePolicy`] or [`StoragePolicyAssignment`])
//! implements the traits that are supported by its API endpoints. Listing
//! endpoints share the `{limit, next_marker, entries}` envelope, exposed as
//! [`MarkerPage`] and iterated lazily with [`MarkerCursor`].
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `STASH_API_TOKEN` (required) - Your Stash API token
//! - `STASH_API_URL` (optional) - Base URL (defaults to `https://api.stashcloud.com/2.0`)

mod client;
mod error;
mod models;
mod pagination;
mod traits;

pub mod cli;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::StashClient;
pub use error::{Result, StashError};
pub use pagination::{MarkerCursor, MarkerPage};

// Re-export traits
pub use traits::{Create, Delete, Get, List, Update, DEFAULT_PAGE_SIZE};

// Re-export models
pub use models::{
    // Assignment types
    AssignmentListQuery,
    AssignmentUpdateParams,
    NewAssignment,
    PolicyRef,
    StoragePolicyAssignment,
    TargetKind,
    TargetRef,
    // Policy types
    PolicyListQuery,
    StoragePolicy,
};
