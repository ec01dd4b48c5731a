//! Update trait for modifying entities.

use async_trait::async_trait;

use crate::client::StashClient;
use crate::error::Result;

/// Update an existing entity.
///
/// Implement this trait for entity types that can be modified after
/// creation. `Params` is a sparse patch: only the fields the caller set are
/// serialized, so untouched server-side fields are never transmitted.
///
/// # Example
///
/// ```ignore
/// use stashapi::{StashClient, StoragePolicyAssignment, AssignmentUpdateParams, Update};
///
/// let client = StashClient::from_env()?;
/// let updated = StoragePolicyAssignment::update(
///     &client,
///     "user_1111".to_string(),
///     AssignmentUpdateParams::policy("5555"),
/// ).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// The ID type for this entity.
    type Id;

    /// Parameters for the update.
    type Params;

    /// Update the entity and return the server's authoritative snapshot.
    ///
    /// # Arguments
    ///
    /// * `client` - The Stash API client
    /// * `id` - The entity identifier
    /// * `params` - Update parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn update(client: &StashClient, id: Self::Id, params: Self::Params) -> Result<Self>;
}
