//! Storage policy assignment endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;
use crate::{MarkerPage, PolicyRef, StoragePolicyAssignment, TargetKind, TargetRef};

/// Query parameters for the assignment collection.
#[derive(Debug, Default, Deserialize)]
pub struct ListAssignmentsQuery {
    pub resolved_for_type: Option<TargetKind>,
    pub resolved_for_id: Option<String>,
    pub limit: Option<u32>,
}

/// Body for creating an assignment.
#[derive(Debug, Deserialize)]
pub struct CreateAssignmentBody {
    pub assigned_to: TargetRef,
    pub storage_policy: PolicyRef,
}

/// Body for the collection-scoped update.
#[derive(Debug, Deserialize)]
pub struct UpdateAssignmentBody {
    pub storage_policy: Option<PolicyRef>,
}

fn not_found(id: &str) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "code": "not_found",
            "message": format!("No storage policy assignment with ID: {}", id)
        })),
    )
}

/// GET /storage_policy_assignments
///
/// The collection can only be read through target resolution; a request
/// without both `resolved_for` parameters is rejected.
pub async fn list_assignments(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<ListAssignmentsQuery>,
) -> impl IntoResponse {
    let (Some(kind), Some(target_id)) = (query.resolved_for_type, query.resolved_for_id.clone())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "code": "bad_request",
                "message": "resolved_for_type and resolved_for_id are required"
            })),
        )
            .into_response();
    };

    let state = state.read().await;
    let entries: Vec<StoragePolicyAssignment> = state
        .resolve_assignment(kind, &target_id)
        .into_iter()
        .cloned()
        .collect();

    (
        StatusCode::OK,
        Json(MarkerPage {
            limit: query.limit.unwrap_or(1000),
            next_marker: None,
            entries,
        }),
    )
        .into_response()
}

/// GET /storage_policy_assignments/{id}
pub async fn get_assignment(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let decoded_id = urlencoding::decode(&id).map(|s| s.into_owned()).unwrap_or(id);

    let state = state.read().await;

    match state.get_assignment(&decoded_id) {
        Some(assignment) => (StatusCode::OK, Json(assignment.clone())).into_response(),
        None => not_found(&decoded_id).into_response(),
    }
}

/// POST /storage_policy_assignments
pub async fn create_assignment(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(body): Json<CreateAssignmentBody>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    let already_assigned = state
        .assignments
        .values()
        .any(|a| a.assigned_to == body.assigned_to);
    if already_assigned {
        return (
            StatusCode::CONFLICT,
            Json(serde_json::json!({
                "code": "conflict",
                "message": format!("Target {} already has an assignment", body.assigned_to.id)
            })),
        )
            .into_response();
    }

    let assignment = state
        .create_assignment(body.assigned_to.kind, &body.assigned_to.id, body.storage_policy)
        .clone();

    (StatusCode::CREATED, Json(assignment)).into_response()
}

/// PUT /storage_policy_assignments
///
/// The endpoint is collection-scoped, so the mock requires the store to
/// hold exactly one assignment for the request to be unambiguous.
pub async fn update_assignment(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(body): Json<UpdateAssignmentBody>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    match state.update_sole_assignment(body.storage_policy) {
        Some(assignment) => (StatusCode::OK, Json(assignment.clone())).into_response(),
        None => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({
                "code": "conflict",
                "message": "Update requires exactly one assignment in the store"
            })),
        )
            .into_response(),
    }
}

/// DELETE /storage_policy_assignments/{id}
pub async fn delete_assignment(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let decoded_id = urlencoding::decode(&id).map(|s| s.into_owned()).unwrap_or(id);

    let mut state = state.write().await;

    if state.delete_assignment(&decoded_id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found(&decoded_id).into_response()
    }
}
