//! Integration tests for access rule administration.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use crate::common::{TestHarness, delete, get, post_json};

#[tokio::test]
async fn test_list_empty() {
    let harness = TestHarness::new();
    let (status, body) = harness.send(get("/api/access")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "data": []}));
}

#[tokio::test]
async fn test_create_rule_defaults() {
    let harness = TestHarness::new();
    let (status, body) = harness
        .send(post_json("/api/access", json!({"username": "alice", "documentId": 1})))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let rule = &body["data"];
    assert_eq!(rule["id"], "1");
    assert_eq!(rule["username"], "alice");
    assert_eq!(rule["documentId"], 1);
    assert_eq!(rule["expiresAt"], serde_json::Value::Null);
    assert_eq!(rule["createdBy"], "admin");
    assert!(rule["createdAt"].is_string());
    assert!(harness.store.is_allowed("alice", 1));
}

#[tokio::test]
async fn test_create_rule_all_fields() {
    let harness = TestHarness::new();
    let (status, body) = harness
        .send(post_json(
            "/api/access",
            json!({
                "username": "bob",
                "documentId": "7",
                "expiresAt": "2099-12-31T23:59",
                "createdBy": "carol"
            }),
        ))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let rule = &body["data"];
    assert_eq!(rule["documentId"], 7);
    assert_eq!(rule["expiresAt"], "2099-12-31T23:59:00Z");
    assert_eq!(rule["createdBy"], "carol");
    assert!(harness.store.is_allowed("bob", 7));
}

#[tokio::test]
async fn test_create_rule_missing_fields() {
    let harness = TestHarness::new();
    for payload in [
        json!({"documentId": 1}),
        json!({"username": "alice"}),
        json!({"username": "", "documentId": 1}),
    ] {
        let (status, body) = harness.send(post_json("/api/access", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"success": false, "message": "username and documentId are required"})
        );
    }
    assert!(harness.store.is_empty());
}

#[tokio::test]
async fn test_create_rule_invalid_document_id() {
    let harness = TestHarness::new();
    let (status, body) = harness
        .send(post_json("/api/access", json!({"username": "alice", "documentId": "abc"})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "documentId must be an integer");
}

#[tokio::test]
async fn test_create_rule_invalid_expiry() {
    let harness = TestHarness::new();
    let (status, body) = harness
        .send(post_json(
            "/api/access",
            json!({"username": "alice", "documentId": 1, "expiresAt": "next week"}),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(harness.store.is_empty());
}

#[tokio::test]
async fn test_create_rule_malformed_json() {
    let harness = TestHarness::new();
    let req = Request::builder()
        .method("POST")
        .uri("/api/access")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = harness.send(req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_list_in_creation_order_including_expired() {
    let harness = TestHarness::new();
    harness
        .send(post_json("/api/access", json!({"username": "alice", "documentId": 1})))
        .await;
    harness
        .send(post_json(
            "/api/access",
            json!({"username": "alice", "documentId": 1, "expiresAt": "2000-01-01T00:00:00Z"}),
        ))
        .await;

    let (status, body) = harness.send(get("/api/access")).await;
    assert_eq!(status, StatusCode::OK);
    let rules = body["data"].as_array().unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0]["id"], "1");
    assert_eq!(rules[1]["id"], "2");
    assert_eq!(rules[1]["expiresAt"], "2000-01-01T00:00:00Z");

    // The expired duplicate does not revoke the open-ended grant.
    assert!(harness.store.is_allowed("alice", 1));
}

#[tokio::test]
async fn test_delete_rule() {
    let harness = TestHarness::new();
    harness.grant("alice", 1);
    harness.grant("bob", 2);

    let (status, body) = harness.send(delete("/api/access/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (_, body) = harness.send(get("/api/access")).await;
    let rules = body["data"].as_array().unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0]["username"], "bob");
    assert!(!harness.store.is_allowed("alice", 1));
}

#[tokio::test]
async fn test_delete_missing_rule() {
    let harness = TestHarness::new();
    harness.grant("alice", 1);

    let (status, body) = harness.send(delete("/api/access/42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "message": "Rule not found"}));
    assert_eq!(harness.store.len(), 1);

    harness.send(delete("/api/access/1")).await;
    let (status, _) = harness.send(delete("/api/access/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rule_routes_work_without_documents() {
    let harness = TestHarness::without_documents();
    let (status, _) = harness
        .send(post_json("/api/access", json!({"username": "alice", "documentId": 1})))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}
