// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-FigmaMcpRelay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of figma-mcp-relay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use axum::body::{self, Body};
use axum::http::Request;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use super::*;
use crate::model::{ConnectionStatus, TextProps, UpdateBatch, UpdateOperation};

fn file(id: &str) -> FileId {
    FileId::new(id).expect("file id")
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

fn healthcheck_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/plugin/healthcheck")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn poll_request(file_id: &str, plugin_id: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(format!("/plugin/poll/{file_id}/{plugin_id}"))
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn healthcheck_registers_connection() {
    let relay = Arc::new(Relay::new());
    let router = build_router(relay.clone());

    let (status, body) =
        send(&router, healthcheck_request(json!({ "pluginId": "plugin-1", "fileId": "F1" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let connection = relay.connection(&file("F1")).expect("connection").expect("record");
    assert_eq!(connection.status(), ConnectionStatus::Connected);
    assert_eq!(connection.plugin_id().as_str(), "plugin-1");
}

#[tokio::test]
async fn healthcheck_without_plugin_id_is_rejected_and_changes_nothing() {
    let relay = Arc::new(Relay::new());
    let router = build_router(relay.clone());

    let (status, body) = send(&router, healthcheck_request(json!({ "fileId": "F1" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "pluginId and fileId are required" }));
    assert!(relay.connection(&file("F1")).expect("connection").is_none());
}

#[tokio::test]
async fn healthcheck_with_empty_field_is_rejected() {
    let relay = Arc::new(Relay::new());
    let router = build_router(relay.clone());

    let (status, _) =
        send(&router, healthcheck_request(json!({ "pluginId": "", "fileId": "F1" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        send(&router, healthcheck_request(json!({ "pluginId": "p", "fileId": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(relay.connection(&file("F1")).expect("connection").is_none());
}

#[tokio::test]
async fn healthcheck_with_non_string_id_is_a_json_400() {
    let relay = Arc::new(Relay::new());
    let router = build_router(relay.clone());

    let (status, body) =
        send(&router, healthcheck_request(json!({ "pluginId": 123, "fileId": "F1" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "pluginId and fileId are required" }));
    assert!(relay.connection(&file("F1")).expect("connection").is_none());
}

#[tokio::test]
async fn healthcheck_without_json_content_type_is_a_json_400() {
    let router = build_router(Arc::new(Relay::new()));
    let request = Request::builder()
        .method("POST")
        .uri("/plugin/healthcheck")
        .body(Body::from(json!({ "pluginId": "p", "fileId": "F1" }).to_string()))
        .expect("request");

    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "pluginId and fileId are required" }));

    let malformed = Request::builder()
        .method("POST")
        .uri("/plugin/healthcheck")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .expect("request");
    let (status, _) = send(&router, malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn healthcheck_does_not_overwrite_pending_buffer() {
    let relay = Arc::new(Relay::new());
    let router = build_router(relay.clone());
    relay
        .enqueue(
            &file("F1"),
            UpdateBatch::new(vec![UpdateOperation::CreateText(TextProps::new("hi"))]),
        )
        .expect("enqueue");

    let (status, _) =
        send(&router, healthcheck_request(json!({ "pluginId": "real", "fileId": "F1" }))).await;
    assert_eq!(status, StatusCode::OK);

    let connection = relay.connection(&file("F1")).expect("connection").expect("record");
    assert_eq!(connection.status(), ConnectionStatus::Connected);
    assert_eq!(connection.plugin_id().as_str(), "real");
    assert_eq!(relay.pending_len(&file("F1")).expect("len"), 1);
}

#[tokio::test]
async fn poll_of_unknown_file_returns_empty_array() {
    let relay = Arc::new(Relay::new());
    let router = build_router(relay.clone());

    let (status, body) = send(&router, poll_request("fresh", "plugin-1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "messages": [] }));

    let connection = relay.connection(&file("fresh")).expect("connection").expect("record");
    assert_eq!(connection.status(), ConnectionStatus::Connected);
}

#[tokio::test]
async fn poll_delivers_queued_messages_once() {
    let relay = Arc::new(Relay::new());
    let router = build_router(relay.clone());
    for text in ["first", "second"] {
        relay
            .enqueue(
                &file("F1"),
                UpdateBatch::new(vec![UpdateOperation::CreateText(TextProps::new(text))]),
            )
            .expect("enqueue");
    }

    let (status, body) = send(&router, poll_request("F1", "plugin-1")).await;
    assert_eq!(status, StatusCode::OK);
    let messages = body["messages"].as_array().expect("messages array");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["type"], json!("update"));
    assert_eq!(
        messages[0]["updates"]["updates"][0],
        json!({ "type": "createText", "data": { "characters": "first" } })
    );
    assert_eq!(messages[1]["updates"]["updates"][0]["data"]["characters"], json!("second"));

    let parsed: PollResponse = serde_json::from_value(body).expect("poll response");
    assert!(parsed.messages[0].id < parsed.messages[1].id);

    let (_, body) = send(&router, poll_request("F1", "plugin-1")).await;
    assert_eq!(body, json!({ "messages": [] }));
}

#[tokio::test]
async fn poll_rejects_encoded_slash_in_ids() {
    let relay = Arc::new(Relay::new());
    let router = build_router(relay.clone());

    let (status, body) = send(&router, poll_request("a%2Fb", "plugin-1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "invalid fileId: id must not contain '/'" }));
}

#[tokio::test]
async fn cors_preflight_allows_private_network_access() {
    let router = build_router(Arc::new(Relay::new()));

    let response = router
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/plugin/healthcheck")
                .header("origin", "null")
                .header("access-control-request-method", "POST")
                .header("access-control-request-private-network", "true")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-private-network")
            .and_then(|value| value.to_str().ok()),
        Some("true")
    );
}
