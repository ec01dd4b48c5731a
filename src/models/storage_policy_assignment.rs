//! Storage policy assignment model and trait implementations.
//!
//! An assignment binds a storage policy to a user or to the enterprise.
//! The service resolves a user's effective policy through the assignment
//! collection: a user-level assignment wins, otherwise the enterprise
//! default applies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::StashClient;
use crate::error::{Result, StashError};
use crate::pagination::MarkerPage;
use crate::traits::{Create, Delete, Get, List, Update, DEFAULT_PAGE_SIZE};

const COLLECTION_PATH: &str = "storage_policy_assignments";

/// Kind of entity a storage policy can be assigned to.
///
/// Decoding any other `type` tag off the wire is a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    User,
    Enterprise,
}

impl TargetKind {
    /// Wire name of the kind (`"user"` / `"enterprise"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::User => "user",
            TargetKind::Enterprise => "enterprise",
        }
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed `{type, id}` pair naming an assignment target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRef {
    /// Target kind tag.
    #[serde(rename = "type")]
    pub kind: TargetKind,
    /// Opaque target ID.
    pub id: String,
}

impl TargetRef {
    /// Reference a user target.
    pub fn user(id: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::User,
            id: id.into(),
        }
    }

    /// Reference an enterprise target.
    pub fn enterprise(id: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Enterprise,
            id: id.into(),
        }
    }
}

/// Typed `{type, id}` pair naming a storage policy.
///
/// The `type` tag is always `storage_policy`; anything else fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRef {
    #[serde(rename = "type")]
    kind: PolicyRefKind,
    /// Opaque storage policy ID.
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum PolicyRefKind {
    StoragePolicy,
}

impl PolicyRef {
    /// Reference the storage policy with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            kind: PolicyRefKind::StoragePolicy,
            id: id.into(),
        }
    }
}

/// A storage policy assignment.
///
/// This is an immutable snapshot of the server-side resource. Stage changes
/// in an [`AssignmentUpdateParams`] patch and apply them with
/// [`Update::update`]; the server's response replaces the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoragePolicyAssignment {
    /// Opaque assignment ID (e.g. `user_1111`).
    pub id: String,

    /// Target the policy is assigned to.
    pub assigned_to: TargetRef,

    /// The assigned storage policy.
    pub storage_policy: PolicyRef,
}

impl StoragePolicyAssignment {
    /// ID of the assigned storage policy.
    #[must_use]
    pub fn policy_id(&self) -> &str {
        &self.storage_policy.id
    }

    /// Kind of the assignment target.
    #[must_use]
    pub fn target_kind(&self) -> TargetKind {
        self.assigned_to.kind
    }

    /// ID of the assignment target.
    #[must_use]
    pub fn target_id(&self) -> &str {
        &self.assigned_to.id
    }

    /// Resolve the effective assignment for a target.
    ///
    /// Queries the collection with `resolved_for_type` / `resolved_for_id`
    /// and returns the first entry of the listing. For a user target this
    /// may be the enterprise default assignment rather than a user-level
    /// one; check [`target_kind`](Self::target_kind) on the result.
    ///
    /// # Errors
    ///
    /// An empty listing and a 404 from the listing endpoint both surface as
    /// [`StashError::NotFound`], so callers can fall back to
    /// [`create`](Create::create).
    #[tracing::instrument(skip(client))]
    pub async fn for_target(
        client: &StashClient,
        kind: TargetKind,
        target_id: &str,
    ) -> Result<Self> {
        let query = AssignmentListQuery::resolved_for(kind, target_id);
        let page = Self::list_page(client, &query, None, DEFAULT_PAGE_SIZE)
            .await
            .map_err(|e| not_found_on_404(e, target_id))?;

        page.entries
            .into_iter()
            .next()
            .ok_or_else(|| not_found(target_id))
    }

    /// Ensure `target_id` is covered by `policy_id`, creating or updating
    /// the user-level assignment as needed.
    ///
    /// The target is resolved as a user; exactly one lookup precedes the
    /// write. Branches:
    ///
    /// - the resolved assignment already carries `policy_id`: returned
    ///   as-is, no write;
    /// - the resolved assignment is enterprise-typed: the target only
    ///   inherits the enterprise default, so a user-level assignment is
    ///   created;
    /// - the resolved assignment is user-typed with another policy: its
    ///   policy is replaced via update;
    /// - nothing resolves: a user-level assignment is created.
    ///
    /// To resolve an enterprise target instead, call
    /// [`for_target`](Self::for_target) with [`TargetKind::Enterprise`] and
    /// update the result directly.
    #[tracing::instrument(skip(client))]
    pub async fn assign(
        client: &StashClient,
        policy_id: &str,
        target_id: &str,
    ) -> Result<Self> {
        let existing = match Self::for_target(client, TargetKind::User, target_id).await {
            Ok(existing) => existing,
            Err(StashError::NotFound { .. }) => {
                return Self::create(client, NewAssignment::user(policy_id, target_id)).await;
            }
            Err(e) => return Err(e),
        };

        if existing.policy_id() == policy_id {
            return Ok(existing);
        }

        if existing.target_kind() == TargetKind::Enterprise {
            return Self::create(client, NewAssignment::user(policy_id, target_id)).await;
        }

        Self::update(
            client,
            existing.id.clone(),
            AssignmentUpdateParams::policy(policy_id),
        )
        .await
    }
}

/// Parameters for creating an assignment.
#[derive(Debug, Clone, Serialize)]
pub struct NewAssignment {
    /// Target to assign the policy to.
    pub assigned_to: TargetRef,
    /// Policy to assign.
    pub storage_policy: PolicyRef,
}

impl NewAssignment {
    /// Assign `policy_id` to a user.
    #[must_use]
    pub fn user(policy_id: &str, target_id: &str) -> Self {
        Self {
            assigned_to: TargetRef::user(target_id),
            storage_policy: PolicyRef::new(policy_id),
        }
    }

    /// Assign `policy_id` to an enterprise.
    #[must_use]
    pub fn enterprise(policy_id: &str, target_id: &str) -> Self {
        Self {
            assigned_to: TargetRef::enterprise(target_id),
            storage_policy: PolicyRef::new(policy_id),
        }
    }
}

/// Sparse update patch for an assignment.
///
/// Unset fields stay out of the request body, so only intentionally
/// changed data reaches the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssignmentUpdateParams {
    /// Replacement storage policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_policy: Option<PolicyRef>,
}

impl AssignmentUpdateParams {
    /// Stage a policy change.
    #[must_use]
    pub fn policy(id: &str) -> Self {
        Self {
            storage_policy: Some(PolicyRef::new(id)),
        }
    }
}

/// Query parameters for listing assignments.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssignmentListQuery {
    /// Resolve the effective assignment for this target kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_for_type: Option<TargetKind>,

    /// Resolve the effective assignment for this target ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_for_id: Option<String>,
}

impl AssignmentListQuery {
    /// Query resolving the effective assignment for a target.
    #[must_use]
    pub fn resolved_for(kind: TargetKind, target_id: &str) -> Self {
        Self {
            resolved_for_type: Some(kind),
            resolved_for_id: Some(target_id.to_string()),
        }
    }
}

fn not_found(id: &str) -> StashError {
    StashError::NotFound {
        entity_type: "storage_policy_assignment",
        id: id.to_string(),
    }
}

fn not_found_on_404(err: StashError, id: &str) -> StashError {
    match err {
        StashError::Api {
            status_code: Some(404),
            ..
        } => not_found(id),
        other => other,
    }
}

#[async_trait]
impl Create for StoragePolicyAssignment {
    type Params = NewAssignment;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &StashClient, params: NewAssignment) -> Result<Self> {
        let response = client.post(COLLECTION_PATH, &params).await?;
        StashClient::json(response).await
    }
}

#[async_trait]
impl Get for StoragePolicyAssignment {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &StashClient, id: String) -> Result<Self> {
        let path = format!("{}/{}", COLLECTION_PATH, urlencoding::encode(&id));

        let response = client
            .get(&path)
            .await
            .map_err(|e| not_found_on_404(e, &id))?;
        StashClient::json(response).await
    }
}

#[async_trait]
impl List for StoragePolicyAssignment {
    type Query = AssignmentListQuery;

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
            query: &'a AssignmentListQuery,
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

#[async_trait]
impl Update for StoragePolicyAssignment {
    type Id = String;
    type Params = AssignmentUpdateParams;

    #[tracing::instrument(skip(client, params))]
    async fn update(
        client: &StashClient,
        id: String,
        params: AssignmentUpdateParams,
    ) -> Result<Self> {
        // The update endpoint is collection-scoped; the id only names the
        // assignment in errors.
        let response = client
            .put(COLLECTION_PATH, &params)
            .await
            .map_err(|e| not_found_on_404(e, &id))?;
        StashClient::json(response).await
    }
}

#[async_trait]
impl Delete for StoragePolicyAssignment {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &StashClient, id: String) -> Result<()> {
        let path = format!("{}/{}", COLLECTION_PATH, urlencoding::encode(&id));

        client
            .delete(&path)
            .await
            .map_err(|e| not_found_on_404(e, &id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_deserialize() {
        let json = r#"{
            "type": "storage_policy_assignment",
            "id": "user_1111",
            "storage_policy": {
                "type": "storage_policy",
                "id": "1234"
            },
            "assigned_to": {
                "type": "user",
                "id": "5678"
            }
        }"#;

        let assignment: StoragePolicyAssignment = serde_json::from_str(json).unwrap();
        assert_eq!(assignment.id, "user_1111");
        assert_eq!(assignment.policy_id(), "1234");
        assert_eq!(assignment.target_kind(), TargetKind::User);
        assert_eq!(assignment.target_id(), "5678");
    }

    #[test]
    fn test_assignment_deserialize_enterprise_target() {
        let json = r#"{
            "id": "enterprise_2222",
            "assigned_to": {"type": "enterprise", "id": "9999"},
            "storage_policy": {"type": "storage_policy", "id": "5555"}
        }"#;

        let assignment: StoragePolicyAssignment = serde_json::from_str(json).unwrap();
        assert_eq!(assignment.target_kind(), TargetKind::Enterprise);
    }

    #[test]
    fn test_unknown_target_kind_is_parse_error() {
        let json = r#"{
            "id": "x",
            "assigned_to": {"type": "group", "id": "1"},
            "storage_policy": {"type": "storage_policy", "id": "2"}
        }"#;

        assert!(serde_json::from_str::<StoragePolicyAssignment>(json).is_err());
    }

    #[test]
    fn test_unknown_policy_ref_kind_is_parse_error() {
        let json = r#"{"type": "folder", "id": "1234"}"#;
        assert!(serde_json::from_str::<PolicyRef>(json).is_err());
    }

    #[test]
    fn test_new_assignment_body_shape() {
        let params = NewAssignment::user("1234", "5678");
        let body = serde_json::to_value(&params).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "assigned_to": {"type": "user", "id": "5678"},
                "storage_policy": {"type": "storage_policy", "id": "1234"}
            })
        );
    }

    #[test]
    fn test_update_params_serialize_dirty_only() {
        let params = AssignmentUpdateParams::policy("5555");
        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"storage_policy": {"type": "storage_policy", "id": "5555"}})
        );

        // An empty patch serializes to an empty object
        let empty = AssignmentUpdateParams::default();
        assert_eq!(serde_json::to_value(&empty).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_resolved_for_query_string() {
        let query = AssignmentListQuery::resolved_for(TargetKind::User, "5678");
        let qs = serde_qs::to_string(&query).unwrap();
        assert_eq!(qs, "resolved_for_type=user&resolved_for_id=5678");
    }

    #[test]
    fn test_target_kind_wire_names() {
        assert_eq!(TargetKind::User.as_str(), "user");
        assert_eq!(TargetKind::Enterprise.as_str(), "enterprise");
        assert_eq!(
            serde_json::to_value(TargetKind::Enterprise).unwrap(),
            serde_json::json!("enterprise")
        );
    }
}
