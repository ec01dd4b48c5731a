//! List trait for marker-paginated collections.

use async_trait::async_trait;

use crate::client::StashClient;
use crate::error::Result;
use crate::pagination::{MarkerCursor, MarkerPage};

/// Default page size for list operations.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// List entities with marker-based pagination.
///
/// Implement this trait for entity types whose collection endpoint returns
/// the `{limit, next_marker, entries}` envelope.
///
/// # Example
///
/// ```ignore
/// use stashapi::{StashClient, StoragePolicy, List};
///
/// let client = StashClient::from_env()?;
///
/// // Fetch a single page
/// let page = StoragePolicy::list_page(&client, &Default::default(), None, 50).await?;
///
/// // Fetch all pages
/// let all = StoragePolicy::list_all(&client, &Default::default()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Query parameters for filtering.
    type Query: Default + Send + Sync;

    /// List entities matching the query (single page).
    ///
    /// # Arguments
    ///
    /// * `client` - The Stash API client
    /// * `query` - Query parameters for filtering
    /// * `marker` - Opaque cursor from a previous page, passed back verbatim
    /// * `limit` - Number of entries per page
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(
        client: &StashClient,
        query: &Self::Query,
        marker: Option<&str>,
        limit: u32,
    ) -> Result<MarkerPage<Self>>;

    /// List all entities matching the query (fetches all pages).
    ///
    /// Follows `next_marker` until the server returns a null marker or an
    /// empty entries array.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &StashClient, query: &Self::Query) -> Result<Vec<Self>> {
        let mut all_entries = Vec::new();
        let mut marker: Option<String> = None;
        let mut pages = 0u32;

        loop {
            let page = Self::list_page(client, query, marker.as_deref(), DEFAULT_PAGE_SIZE).await?;
            let has_more = page.has_more();
            marker = page.next_marker.clone();
            all_entries.extend(page.entries);

            if !has_more {
                break;
            }
            pages += 1;

            // Safety limit to prevent infinite loops
            if pages >= MAX_PAGES {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(all_entries)
    }

    /// Lazy cursor over the listing.
    ///
    /// No request is issued until the cursor's first `next` call.
    fn cursor<'a>(
        client: &'a StashClient,
        query: &'a Self::Query,
        limit: u32,
    ) -> MarkerCursor<'a, Self> {
        MarkerCursor::new(client, query, limit)
    }
}
