// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-FigmaMcpRelay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of figma-mcp-relay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use figma_mcp_relay::http::build_router;
use figma_mcp_relay::mcp::apply_updates;
use figma_mcp_relay::relay::Relay;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::util::ServiceExt;

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

fn healthcheck(plugin_id: &str, file_id: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/plugin/healthcheck")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "pluginId": plugin_id, "fileId": file_id }).to_string()))
        .expect("request")
}

fn poll(file_id: &str, plugin_id: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/plugin/poll/{file_id}/{plugin_id}"))
        .body(Body::empty())
        .expect("request")
}

fn text_update(characters: &str) -> Value {
    json!([{ "type": "createText", "data": { "name": "Label", "characters": characters } }])
}

#[tokio::test]
async fn agent_update_reaches_registered_plugin_once() {
    let relay = Arc::new(Relay::new());
    let router = build_router(relay.clone());

    let (status, _) = send(&router, healthcheck("plugin-1", "FILE1")).await;
    assert_eq!(status, StatusCode::OK);

    let result = apply_updates(&relay, "FILE1", Some(text_update("Hello")));
    assert_ne!(result.is_error, Some(true));

    let (status, body) = send(&router, poll("FILE1", "plugin-1")).await;
    assert_eq!(status, StatusCode::OK);
    let messages = body["messages"].as_array().expect("messages");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["type"], "update");
    assert!(messages[0]["id"].is_u64());
    assert!(messages[0]["timestamp"].is_string());
    assert_eq!(messages[0]["updates"], json!({ "updates": text_update("Hello") }));

    let (_, body) = send(&router, poll("FILE1", "plugin-1")).await;
    assert_eq!(body, json!({ "messages": [] }));
}

#[tokio::test]
async fn updates_sent_before_the_plugin_starts_are_buffered_in_order() {
    let relay = Arc::new(Relay::new());
    let router = build_router(relay.clone());

    for text in ["first", "second"] {
        let result = apply_updates(&relay, "LATE", Some(text_update(text)));
        assert_ne!(result.is_error, Some(true));
    }

    let (status, _) = send(&router, healthcheck("plugin-late", "LATE")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&router, poll("LATE", "plugin-late")).await;
    let texts: Vec<&str> = body["messages"]
        .as_array()
        .expect("messages")
        .iter()
        .map(|message| message["updates"]["updates"][0]["data"]["characters"].as_str().expect("text"))
        .collect();
    assert_eq!(texts, ["first", "second"]);
}

#[tokio::test]
async fn rejected_update_is_never_delivered() {
    let relay = Arc::new(Relay::new());
    let router = build_router(relay.clone());

    let result = apply_updates(
        &relay,
        "FILE1",
        Some(json!([
            { "type": "createFrame", "data": { "name": "Card" } },
            { "type": "createText", "data": { "name": "Empty" } }
        ])),
    );
    assert_eq!(result.is_error, Some(true));

    let (_, body) = send(&router, poll("FILE1", "plugin-1")).await;
    assert_eq!(body, json!({ "messages": [] }));
}

#[tokio::test]
async fn plugin_endpoints_answer_over_a_real_socket() {
    let relay = Arc::new(Relay::new());
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let router = build_router(relay.clone());
    let server = tokio::spawn(async move { axum::serve(listener, router).await });

    let result = apply_updates(&relay, "SOCK", Some(text_update("over tcp")));
    assert_ne!(result.is_error, Some(true));

    let mut stream = tokio::net::TcpStream::connect(addr).await.expect("connect");
    stream
        .write_all(
            b"GET /plugin/poll/SOCK/plugin-1 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await
        .expect("write request");
    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.expect("read response");
    server.abort();

    let raw = String::from_utf8(raw).expect("utf8 response");
    let (head, body) = raw.split_once("\r\n\r\n").expect("http response");
    assert!(head.starts_with("HTTP/1.1 200"), "unexpected status line: {head}");
    let body: Value = serde_json::from_str(body).expect("json body");
    assert_eq!(body["messages"][0]["updates"]["updates"][0]["data"]["characters"], "over tcp");
}
