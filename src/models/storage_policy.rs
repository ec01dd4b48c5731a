//! Storage policy model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::StashClient;
use crate::error::{Result, StashError};
use crate::models::storage_policy_assignment::StoragePolicyAssignment;
use crate::pagination::MarkerPage;
use crate::traits::{Get, List};

const COLLECTION_PATH: &str = "storage_policies";

/// A storage policy: a named class of storage the service can place
/// content on.
///
/// Policies are defined by administrators; clients only read them and bind
/// them to targets through [`StoragePolicyAssignment`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoragePolicy {
    /// Opaque policy ID.
    pub id: String,

    /// Human-readable policy name.
    #[serde(default)]
    pub name: Option<String>,
}

impl StoragePolicy {
    /// Assign this policy to a user target, creating or updating the
    /// user-level assignment.
    pub async fn assign(
        &self,
        client: &StashClient,
        target_id: &str,
    ) -> Result<StoragePolicyAssignment> {
        StoragePolicyAssignment::assign(client, &self.id, target_id).await
    }
}

/// Query parameters for listing storage policies.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PolicyListQuery {
    /// Comma-separated attribute names to include in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

#[async_trait]
impl Get for StoragePolicy {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &StashClient, id: String) -> Result<Self> {
        let path = format!("{}/{}", COLLECTION_PATH, urlencoding::encode(&id));

        let response = client.get(&path).await.map_err(|e| match e {
            StashError::Api {
                status_code: Some(404),
                ..
            } => StashError::NotFound {
                entity_type: "storage_policy",
                id: id.clone(),
            },
            other => other,
        })?;
        StashClient::json(response).await
    }
}

#[async_trait]
impl List for StoragePolicy {
    type Query = PolicyListQuery;

    #[tracing::instrument(skip(client, query))]
    async fn list_page(
        client: &StashClient,
        query: &Self::Query,
        marker: Option<&str>,
        limit: u32,
    ) -> Result<MarkerPage<Self>> {
        #[derive(Serialize)]
        struct RequestParams<'a> {
            #[serde(flatten)]
            query: &'a PolicyListQuery,
            #[serde(skip_serializing_if = "Option::is_none")]
            marker: Option<&'a str>,
            limit: u32,
        }

        let params = RequestParams {
            query,
            marker,
            limit,
        };

        let response = client.get_with_query(COLLECTION_PATH, &params).await?;
        StashClient::json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_deserialize() {
        let json = r#"{"type": "storage_policy", "id": "1234", "name": "Standard Storage"}"#;
        let policy: StoragePolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.id, "1234");
        assert_eq!(policy.name.as_deref(), Some("Standard Storage"));
    }

    #[test]
    fn test_policy_deserialize_without_name() {
        let json = r#"{"id": "1234"}"#;
        let policy: StoragePolicy = serde_json::from_str(json).unwrap();
        assert!(policy.name.is_none());
    }

    #[test]
    fn test_policy_listing_envelope() {
        let json = r#"{
            "limit": 100,
            "next_marker": null,
            "entries": [
                {"type": "storage_policy", "id": "1234", "name": "Standard Storage"},
                {"type": "storage_policy", "id": "5555", "name": "Archive Storage"}
            ]
        }"#;

        let page: MarkerPage<StoragePolicy> = serde_json::from_str(json).unwrap();
        assert_eq!(page.len(), 2);
        assert!(!page.has_more());
        assert_eq!(page.entries[1].id, "5555");
    }
}
