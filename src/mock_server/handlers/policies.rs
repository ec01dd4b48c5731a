//! Storage policy endpoint handlers.

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
use crate::{MarkerPage, StoragePolicy};

/// Query parameters for listing policies.
#[derive(Debug, Default, Deserialize)]
pub struct ListPoliciesQuery {
    pub marker: Option<String>,
    pub limit: Option<u32>,
    #[allow(dead_code)] // Accepted by the Stash API but not used by the mock
    pub fields: Option<String>,
}

/// GET /storage_policies/{id}
pub async fn get_policy(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let decoded_id = urlencoding::decode(&id).map(|s| s.into_owned()).unwrap_or(id);

    let state = state.read().await;

    match state.get_policy(&decoded_id) {
        Some(policy) => (StatusCode::OK, Json(policy.clone())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "code": "not_found",
                "message": format!("No storage policy with ID: {}", decoded_id)
            })),
        )
            .into_response(),
    }
}

/// GET /storage_policies
pub async fn list_policies(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<ListPoliciesQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    let limit = query.limit.unwrap_or(100);

    let all = state.list_policies();

    // The marker is the ID of the last entry on the previous page
    let start = match query.marker.as_deref() {
        Some(marker) => match all.iter().position(|p| p.id == marker) {
            Some(pos) => pos + 1,
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({
                        "code": "invalid_marker",
                        "message": "Marker does not name a known entry"
                    })),
                )
                    .into_response();
            }
        },
        None => 0,
    };

    let end = (start + limit as usize).min(all.len());
    let entries: Vec<StoragePolicy> = all[start..end].iter().map(|p| (*p).clone()).collect();

    let next_marker = if end < all.len() {
        entries.last().map(|p| p.id.clone())
    } else {
        None
    };

    (
        StatusCode::OK,
        Json(MarkerPage {
            limit,
            next_marker,
            entries,
        }),
    )
        .into_response()
}
