//! Integration tests for the gated document routes.

use axum::http::{StatusCode, header};
use chrono::{Duration, Utc};
use mayanconnect_access::NewRule;
use serde_json::json;

use crate::common::{FakeDocuments, ListMode, TestHarness, delete, get, get_as, post_json};

#[tokio::test]
async fn test_unconfigured_document_api() {
    let harness = TestHarness::without_documents();
    harness.grant("alice", 1);

    for req in [
        get("/api/documents"),
        get_as("/api/documents/1", "alice"),
        get_as("/api/documents/1/download", "alice"),
    ] {
        let (status, body) = harness.send(req).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"success": false, "message": "Mayan API config missing."})
        );
    }
}

#[tokio::test]
async fn test_list_documents() {
    let harness = TestHarness::new();
    let (status, body) = harness.send(get("/api/documents")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["count"], 2);
}

#[tokio::test]
async fn test_list_documents_upstream_rejects() {
    let harness = TestHarness::with_documents(FakeDocuments::new(ListMode::Rejecting));
    let (status, body) = harness.send(get("/api/documents")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "Failed to fetch documents from Mayan.",
            "status": 503
        })
    );
}

#[tokio::test]
async fn test_list_documents_upstream_unreachable() {
    let harness = TestHarness::with_documents(FakeDocuments::new(ListMode::Unreachable));
    let (status, body) = harness.send(get("/api/documents")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Unexpected error calling Mayan API.");
}

#[tokio::test]
async fn test_get_document_invalid_id() {
    let harness = TestHarness::new();
    let (status, body) = harness.send(get_as("/api/documents/abc", "alice")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid document id.");
}

#[tokio::test]
async fn test_get_document_anonymous_forbidden() {
    let harness = TestHarness::new();
    harness.grant("alice", 1);

    let (status, body) = harness.send(get("/api/documents/1")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "User anonymous is not allowed to view document 1"
        })
    );
}

#[tokio::test]
async fn test_empty_username_header_is_anonymous() {
    let harness = TestHarness::new();
    harness.grant("anonymous", 1);

    let (status, _) = harness.send(get_as("/api/documents/1", "")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_get_document_allowed() {
    let harness = TestHarness::new();
    harness.grant("alice", 1);

    let (status, body) = harness.send(get_as("/api/documents/1", "alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], 1);
}

#[tokio::test]
async fn test_get_document_other_user_or_document_forbidden() {
    let harness = TestHarness::new();
    harness.grant("alice", 1);

    let (status, body) = harness.send(get_as("/api/documents/1", "bob")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "User bob is not allowed to view document 1");

    let (status, _) = harness.send(get_as("/api/documents/2", "alice")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_expired_rule_forbidden_unless_another_matches() {
    let harness = TestHarness::new();
    harness
        .store
        .add(NewRule::new("alice", 1).with_expiry(Some(Utc::now() - Duration::minutes(1))));

    let (status, _) = harness.send(get_as("/api/documents/1", "alice")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    harness
        .store
        .add(NewRule::new("alice", 1).with_expiry(Some(Utc::now() + Duration::hours(1))));
    let (status, _) = harness.send(get_as("/api/documents/1", "alice")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_get_document_upstream_errors() {
    let harness = TestHarness::new();
    harness.grant("alice", 4);
    harness.grant("alice", 9);

    let (status, body) = harness.send(get_as("/api/documents/4", "alice")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Mayan error 404: Not found.");

    let (status, body) = harness.send(get_as("/api/documents/9", "alice")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Network error contacting Mayan.");
}

#[tokio::test]
async fn test_download_invalid_id() {
    let harness = TestHarness::new();
    let (status, body) = harness
        .send(get_as("/api/documents/abc/download", "alice"))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid document id: abc");
}

#[tokio::test]
async fn test_download_forbidden() {
    let harness = TestHarness::new();
    let (status, body) = harness
        .send(get_as("/api/documents/1/download", "alice"))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "User alice is not allowed to download document 1"
    );
}

#[tokio::test]
async fn test_download_allowed_streams_file() {
    let harness = TestHarness::new();
    harness.grant("alice", 1);

    let resp = harness
        .send_raw(get_as("/api/documents/1/download", "alice"))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        resp.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"contract.pdf\""
    );

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"%PDF-1.7");
}

#[tokio::test]
async fn test_download_upstream_errors() {
    let harness = TestHarness::new();
    for id in [2, 3, 4, 9] {
        harness.grant("alice", id);
    }

    let (status, body) = harness
        .send(get_as("/api/documents/2/download", "alice"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "Could not find latest file download URL in Mayan response."
    );

    let (status, body) = harness
        .send(get_as("/api/documents/3/download", "alice"))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["message"],
        "Mayan error 502 while downloading file: bad gateway"
    );

    let (status, body) = harness
        .send(get_as("/api/documents/4/download", "alice"))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["message"],
        "Mayan error 404 while fetching document details: Not found."
    );

    let (status, body) = harness
        .send(get_as("/api/documents/9/download", "alice"))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Network error while downloading from Mayan.");
}

#[tokio::test]
async fn test_grant_and_revoke_through_api() {
    let harness = TestHarness::new();

    let (status, _) = harness.send(get_as("/api/documents/1", "dave")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = harness
        .send(post_json("/api/access", json!({"username": "dave", "documentId": 1})))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = harness.send(get_as("/api/documents/1", "dave")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = harness.send(delete(&format!("/api/access/{id}"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = harness.send(get_as("/api/documents/1", "dave")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
