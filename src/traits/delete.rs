//! Delete trait for removing entities.

use async_trait::async_trait;

use crate::client::StashClient;
use crate::error::Result;

/// Delete an entity by ID.
///
/// Success is an empty 2xx response from the server; nothing is returned
/// to the caller.
#[async_trait]
pub trait Delete {
    /// The ID type for this entity.
    type Id: Send;

    /// Delete the entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn delete(client: &StashClient, id: Self::Id) -> Result<()>;
}
