//! Endpoint-level tests for storage policy assignment operations.
//!
//! Uses wiremock to mock the Stash API and verify the exact requests each
//! operation issues.

use stashapi::{
    AssignmentUpdateParams, Create, Delete, Get, NewAssignment, StashClient, StashError,
    StoragePolicyAssignment, TargetKind, Update,
};
use wiremock::matchers::{body_json, body_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn assignment_json() -> serde_json::Value {
    serde_json::json!({
        "type": "storage_policy_assignment",
        "id": "user_1111",
        "assigned_to": {"type": "user", "id": "5678"},
        "storage_policy": {"type": "storage_policy", "id": "1234"}
    })
}

#[tokio::test]
async fn test_create_parses_all_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage_policy_assignments"))
        .and(body_json(serde_json::json!({
            "assigned_to": {"type": "user", "id": "5678"},
            "storage_policy": {"type": "storage_policy", "id": "1234"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(assignment_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = StashClient::new("test-token", &mock_server.uri()).unwrap();
    let assignment =
        StoragePolicyAssignment::create(&client, NewAssignment::user("1234", "5678"))
            .await
            .unwrap();

    assert_eq!(assignment.id, "user_1111");
    assert_eq!(assignment.policy_id(), "1234");
    assert_eq!(assignment.target_kind(), TargetKind::User);
}

#[tokio::test]
async fn test_get_by_id_parses_all_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/storage_policy_assignments/user_1111"))
        .respond_with(ResponseTemplate::new(200).set_body_json(assignment_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = StashClient::new("test-token", &mock_server.uri()).unwrap();
    let assignment = StoragePolicyAssignment::get(&client, "user_1111".to_string())
        .await
        .unwrap();

    assert_eq!(assignment.id, "user_1111");
    assert_eq!(assignment.policy_id(), "1234");
    assert_eq!(assignment.target_id(), "5678");
}

#[tokio::test]
async fn test_get_by_id_maps_404_to_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/storage_policy_assignments/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "code": "not_found",
            "message": "Not Found"
        })))
        .mount(&mock_server)
        .await;

    let client = StashClient::new("test-token", &mock_server.uri()).unwrap();
    let err = StoragePolicyAssignment::get(&client, "missing".to_string())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_for_target_sends_resolution_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/storage_policy_assignments"))
        .and(query_param("resolved_for_type", "user"))
        .and(query_param("resolved_for_id", "5678"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "limit": 1000,
            "next_marker": null,
            "entries": [assignment_json()]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = StashClient::new("test-token", &mock_server.uri()).unwrap();
    let assignment =
        StoragePolicyAssignment::for_target(&client, TargetKind::User, "5678")
            .await
            .unwrap();

    assert_eq!(assignment.id, "user_1111");
    assert_eq!(assignment.policy_id(), "1234");
    assert_eq!(assignment.target_kind(), TargetKind::User);
}

#[tokio::test]
async fn test_for_target_empty_listing_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/storage_policy_assignments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "limit": 1000,
            "next_marker": null,
            "entries": []
        })))
        .mount(&mock_server)
        .await;

    let client = StashClient::new("test-token", &mock_server.uri()).unwrap();
    let err = StoragePolicyAssignment::for_target(&client, TargetKind::User, "5678")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_for_target_404_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/storage_policy_assignments"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "code": "not_found",
            "message": "Not Found"
        })))
        .mount(&mock_server)
        .await;

    let client = StashClient::new("test-token", &mock_server.uri()).unwrap();
    let err = StoragePolicyAssignment::for_target(&client, TargetKind::Enterprise, "9999")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_update_sends_only_dirty_fields() {
    let mock_server = MockServer::start().await;

    let updated = serde_json::json!({
        "type": "storage_policy_assignment",
        "id": "user_1111",
        "assigned_to": {"type": "user", "id": "5678"},
        "storage_policy": {"type": "storage_policy", "id": "12345"}
    });

    // The body must contain the staged policy change and nothing else
    Mock::given(method("PUT"))
        .and(path("/storage_policy_assignments"))
        .and(body_json(serde_json::json!({
            "storage_policy": {"type": "storage_policy", "id": "12345"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = StashClient::new("test-token", &mock_server.uri()).unwrap();
    let assignment = StoragePolicyAssignment::update(
        &client,
        "user_1111".to_string(),
        AssignmentUpdateParams::policy("12345"),
    )
    .await
    .unwrap();

    assert_eq!(assignment.id, "user_1111");
    assert_eq!(assignment.policy_id(), "12345");
}

#[tokio::test]
async fn test_delete_sends_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/storage_policy_assignments/user_1111"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = StashClient::new("test-token", &mock_server.uri()).unwrap();
    StoragePolicyAssignment::delete(&client, "user_1111".to_string())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_non_2xx_surfaces_status_and_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage_policy_assignments"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "code": "internal_error",
            "message": "something went sideways"
        })))
        .mount(&mock_server)
        .await;

    let client = StashClient::new("test-token", &mock_server.uri()).unwrap();
    let err = StoragePolicyAssignment::create(&client, NewAssignment::user("1234", "5678"))
        .await
        .unwrap_err();

    match err {
        StashError::Api {
            message,
            status_code,
        } => {
            assert_eq!(status_code, Some(500));
            assert_eq!(message, "something went sideways");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_response_is_parse_error() {
    let mock_server = MockServer::start().await;

    // A shape the assignment model cannot accept
    Mock::given(method("GET"))
        .and(path("/storage_policy_assignments/user_1111"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "user_1111"})),
        )
        .mount(&mock_server)
        .await;

    let client = StashClient::new("test-token", &mock_server.uri()).unwrap();
    let err = StoragePolicyAssignment::get(&client, "user_1111".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, StashError::Parse(_)));
}
