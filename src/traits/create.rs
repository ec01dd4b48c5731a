//! Create trait for posting new entities.

use async_trait::async_trait;

use crate::client::StashClient;
use crate::error::Result;

/// Create a new entity on the server.
///
/// Implement this trait for entity types whose collection endpoint
/// accepts POST.
///
/// # Example
///
/// ```ignore
/// use stashapi::{StashClient, StoragePolicyAssignment, NewAssignment, Create};
///
/// let client = StashClient::from_env()?;
/// let assignment =
///     StoragePolicyAssignment::create(&client, NewAssignment::user("1234", "5678")).await?;
/// ```
#[async_trait]
pub trait Create: Sized {
    /// Parameters for the create call.
    type Params: Send;

    /// Create the entity and return the server's snapshot of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the body.
    async fn create(client: &StashClient, params: Self::Params) -> Result<Self>;
}
