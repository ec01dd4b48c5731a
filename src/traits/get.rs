//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::StashClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually
/// by a unique identifier.
///
/// # Example
///
/// ```ignore
/// use stashapi::{StashClient, StoragePolicy, Get};
///
/// let client = StashClient::from_env()?;
/// let policy = StoragePolicy::get(&client, "1234".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Arguments
    ///
    /// * `client` - The Stash API client
    /// * `id` - The entity identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &StashClient, id: Self::Id) -> Result<Self>;
}
