mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{session_payload, TestApp};
use serde_json::{json, Value};
use std::collections::HashSet;
use tokio::task::JoinSet;
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_sequential_joins_stop_exactly_at_capacity() {
    let app = TestApp::new().await;
    let created = app.create_session(session_payload("public", 2)).await;
    let id = created["id"].as_str().unwrap();

    app.join_session(id, Some("One")).await;
    app.join_session(id, Some("Two")).await;

    let response = app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/api/sessions/{}/attendees", id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "display_name": "Three" }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "Session is full");

    let response = app.router.clone().oneshot(
        Request::builder().uri(format!("/api/sessions/{}/attendees/count", id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let counts = parse_body(response).await;
    assert_eq!(counts["count"], 2);
    assert_eq!(counts["max"], 2);
}

#[tokio::test]
async fn test_lowering_capacity_blocks_joins_but_evicts_nobody() {
    let app = TestApp::new().await;
    let created = app.create_session(session_payload("public", 3)).await;
    let id = created["id"].as_str().unwrap();
    let manage = created["managementCode"].as_str().unwrap();

    app.join_session(id, Some("One")).await;
    app.join_session(id, Some("Two")).await;

    let response = app.router.clone().oneshot(
        Request::builder().method("PATCH")
            .uri(format!("/api/sessions/{}?manage={}", id, manage))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "max_participants": 1 }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // occupancy may now sit above capacity; nobody gets evicted
    let response = app.router.clone().oneshot(
        Request::builder().uri(format!("/api/sessions/{}/attendees/count", id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let counts = parse_body(response).await;
    assert_eq!(counts["count"], 2);
    assert_eq!(counts["max"], 1);

    // but new joins are blocked
    let response = app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/api/sessions/{}/attendees", id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_two_concurrent_joins_for_a_single_slot() {
    let app = TestApp::new().await;
    let created = app.create_session(session_payload("public", 1)).await;
    let id = created["id"].as_str().unwrap().to_string();

    let mut set = JoinSet::new();
    for i in 0..2 {
        let router = app.router.clone();
        let uri = format!("/api/sessions/{}/attendees", id);
        set.spawn(async move {
            let response = router.oneshot(
                Request::builder().method("POST").uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({ "display_name": format!("Racer {}", i) }).to_string())).unwrap()
            ).await.unwrap();
            response.status().as_u16()
        });
    }

    let mut statuses = Vec::new();
    while let Some(res) = set.join_next().await {
        statuses.push(res.unwrap());
    }
    statuses.sort();
    assert_eq!(statuses, vec![201, 409]);
}

#[tokio::test]
async fn test_concurrent_joins_admit_exactly_capacity() {
    let app = TestApp::new().await;
    let capacity = 3;
    let contenders = 8;

    let created = app.create_session(session_payload("public", capacity)).await;
    let id = created["id"].as_str().unwrap().to_string();

    let mut set = JoinSet::new();
    for i in 0..contenders {
        let router = app.router.clone();
        let uri = format!("/api/sessions/{}/attendees", id);
        set.spawn(async move {
            let response = router.oneshot(
                Request::builder().method("POST").uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({ "display_name": format!("Racer {}", i) }).to_string())).unwrap()
            ).await.unwrap();
            let status = response.status().as_u16();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            (status, body)
        });
    }

    let mut admitted = Vec::new();
    let mut rejected = 0;
    while let Some(res) = set.join_next().await {
        let (status, body) = res.unwrap();
        match status {
            201 => admitted.push(body["attendeeId"].as_str().unwrap().to_string()),
            409 => rejected += 1,
            other => panic!("unexpected status under contention: {}", other),
        }
    }

    assert_eq!(admitted.len(), capacity as usize);
    assert_eq!(rejected, contenders - capacity);

    let unique: HashSet<&String> = admitted.iter().collect();
    assert_eq!(unique.len(), admitted.len(), "duplicate attendee ids admitted");

    // the committed state agrees with the responses
    let response = app.router.clone().oneshot(
        Request::builder().uri(format!("/api/sessions/{}/attendees/count", id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let counts = parse_body(response).await;
    assert_eq!(counts["count"], capacity);
}
