// ABOUTME: Integration tests for the health and chat HTTP routes
// ABOUTME: Drives the full router in-process with a scripted model behind the gateway
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use coach_core::constants::messages;
use helpers::axum_test::AxumTestRequest;
use helpers::scripted_model::{quota_error, upstream_error, ScriptedModel};
use pt_coach_server::llm::{ContentRole, Part};
use pt_coach_server::routes::chat::ChatResponse;
use serde_json::{json, Value};

fn chat_body(messages: &[(&str, &str)]) -> Value {
    json!({
        "messages": messages
            .iter()
            .map(|(role, content)| json!({ "role": role, "content": content }))
            .collect::<Vec<_>>()
    })
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_reports_ok() {
    let model = ScriptedModel::replying("unused");
    let body: Value = AxumTestRequest::get("/health")
        .send(common::scripted_router(&model, false))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_health_does_not_need_the_gateway() {
    AxumTestRequest::get("/health")
        .send(common::unconfigured_router())
        .await
        .assert_status(StatusCode::OK);
}

// ============================================================================
// Chat
// ============================================================================

#[tokio::test]
async fn test_chat_returns_model_reply() {
    let model = ScriptedModel::replying("Chào bạn! Mình là PT ảo.");
    let response: ChatResponse = AxumTestRequest::post("/api/chat")
        .json(&chat_body(&[("user", "  xin chào  ")]))
        .send(common::scripted_router(&model, false))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(response.reply, "Chào bạn! Mình là PT ảo.");
    assert!(!response.guardrail_triggered);

    let calls = model.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].request.contents[0].role, ContentRole::User);
    assert_eq!(
        calls[0].request.contents[0].parts,
        vec![Part::Text("xin chào".to_owned())]
    );
}

#[tokio::test]
async fn test_chat_quota_becomes_apology() {
    let model = ScriptedModel::new(vec![Err(quota_error()), Err(quota_error())]);
    let response: ChatResponse = AxumTestRequest::post("/api/chat")
        .json(&chat_body(&[("user", "xin chào")]))
        .send(common::scripted_router(&model, false))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(response.reply, messages::CHAT_QUOTA_APOLOGY);
    assert!(response.guardrail_triggered);
}

#[tokio::test]
async fn test_chat_upstream_failure_is_server_error() {
    let model = ScriptedModel::new(vec![
        Err(upstream_error("503 unavailable")),
        Err(upstream_error("503 unavailable")),
    ]);
    let body: Value = AxumTestRequest::post("/api/chat")
        .json(&chat_body(&[("user", "xin chào")]))
        .send(common::scripted_router(&model, false))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .json();

    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with(messages::CHAT_FAILED_PREFIX));
    assert!(detail.ends_with("503 unavailable"));
    assert_eq!(body["code"], "EXTERNAL_SERVICE_ERROR");
}

#[tokio::test]
async fn test_chat_without_credentials_is_server_error() {
    let body: Value = AxumTestRequest::post("/api/chat")
        .json(&chat_body(&[("user", "xin chào")]))
        .send(common::unconfigured_router())
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .json();

    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with(messages::GATEWAY_NOT_CONFIGURED_PREFIX));
    assert!(detail.contains("GEMINI_API_KEY"));
    assert_eq!(body["code"], "CONFIG_MISSING");
}

#[tokio::test]
async fn test_chat_rejects_empty_conversation() {
    let model = ScriptedModel::replying("unused");
    let body: Value = AxumTestRequest::post("/api/chat")
        .json(&json!({ "messages": [] }))
        .send(common::scripted_router(&model, false))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert_eq!(body["detail"], messages::EMPTY_CONVERSATION);
    assert!(model.calls().is_empty());
}

#[tokio::test]
async fn test_chat_rejects_blank_message() {
    let model = ScriptedModel::replying("unused");
    let body: Value = AxumTestRequest::post("/api/chat")
        .json(&chat_body(&[("user", "xin chào"), ("assistant", "   ")]))
        .send(common::scripted_router(&model, false))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert_eq!(body["detail"], messages::EMPTY_MESSAGE_CONTENT);
    assert!(model.calls().is_empty());
}

#[tokio::test]
async fn test_chat_rejects_unknown_role() {
    let model = ScriptedModel::replying("unused");
    let body: Value = AxumTestRequest::post("/api/chat")
        .json(&chat_body(&[("system", "xin chào")]))
        .send(common::scripted_router(&model, false))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with(messages::MALFORMED_REQUEST));
    assert!(model.calls().is_empty());
}

#[tokio::test]
async fn test_chat_rejects_malformed_json() {
    let model = ScriptedModel::replying("unused");
    AxumTestRequest::post("/api/chat")
        .raw("application/json", "{\"messages\": ")
        .send(common::scripted_router(&model, false))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// Guard toggle
// ============================================================================

#[tokio::test]
async fn test_enabled_guard_asks_for_missing_details() {
    let model = ScriptedModel::replying("unused");
    let response: ChatResponse = AxumTestRequest::post("/api/chat")
        .json(&chat_body(&[("user", "Cho mình lịch tập tăng cơ")]))
        .send(common::scripted_router(&model, true))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert!(response.guardrail_triggered);
    assert!(response.reply.lines().any(|line| line.starts_with("- ")));
    assert!(model.calls().is_empty());
}

#[tokio::test]
async fn test_enabled_guard_lets_small_talk_through() {
    let model = ScriptedModel::replying("Chào bạn!");
    let response: ChatResponse = AxumTestRequest::post("/api/chat")
        .json(&chat_body(&[("user", "xin chào")]))
        .send(common::scripted_router(&model, true))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(response.reply, "Chào bạn!");
    assert!(!response.guardrail_triggered);
}

#[tokio::test]
async fn test_disabled_guard_forwards_plan_requests() {
    let model = ScriptedModel::replying("Bạn tập được mấy buổi mỗi tuần?");
    let response: ChatResponse = AxumTestRequest::post("/api/chat")
        .json(&chat_body(&[("user", "Cho mình lịch tập tăng cơ")]))
        .send(common::scripted_router(&model, false))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert!(!response.guardrail_triggered);
    assert_eq!(model.calls().len(), 1);
}

// ============================================================================
// CORS
// ============================================================================

#[tokio::test]
async fn test_preflight_allows_any_origin_by_default() {
    let model = ScriptedModel::replying("unused");
    let response = AxumTestRequest::options("/api/chat")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send(common::scripted_router(&model, false))
        .await;

    assert!(response.status_code().is_success());
    assert_eq!(
        response.header("access-control-allow-origin").as_deref(),
        Some("*")
    );
    assert!(response
        .header("access-control-allow-methods")
        .unwrap()
        .contains("POST"));
}
