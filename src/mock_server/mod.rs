//! Mock Stash API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Stash
//! API for integration and end-to-end testing. Unlike wiremock which mocks
//! at the HTTP level per-test, this server maintains state across requests,
//! enabling realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use stashapi::mock_server::MockServer;
//! use stashapi::{Get, StashClient, StoragePolicy};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = StashClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let policy = StoragePolicy::get(&client, "1234".to_string()).await.unwrap();
//!     assert_eq!(policy.name.as_deref(), Some("Standard Storage"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
