// ABOUTME: Coaching chat route forwarding the caller's conversation to the model gateway
// ABOUTME: Optionally gates plan requests behind the completeness guard and softens quota failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Chat route
//!
//! Stateless: the client sends the whole conversation on every call.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{json_rejection, upstream_failure};
use crate::models::ChatMessage;
use crate::resources::ServerResources;
use coach_core::constants::messages;
use coach_core::errors::{AppError, AppResult};

/// Chat request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Full conversation, oldest first
    pub messages: Vec<ChatMessage>,
}

/// Chat reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Text shown to the user
    pub reply: String,
    /// True when the reply did not come from a normal model answer
    pub guardrail_triggered: bool,
}

/// Chat routes handler
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create the chat route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/chat", post(Self::chat))
            .with_state(resources)
    }

    /// Trim every message and reject empty conversations or blank messages
    fn normalize_conversation(messages: Vec<ChatMessage>) -> AppResult<Vec<ChatMessage>> {
        if messages.is_empty() {
            return Err(AppError::invalid_input(messages::EMPTY_CONVERSATION));
        }

        messages
            .into_iter()
            .map(|message| {
                let content = message.content.trim();
                if content.is_empty() {
                    return Err(AppError::invalid_input(messages::EMPTY_MESSAGE_CONTENT));
                }
                Ok(ChatMessage::new(message.role, content))
            })
            .collect()
    }

    async fn chat(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<ChatRequest>, JsonRejection>,
    ) -> Result<Json<ChatResponse>, AppError> {
        let Json(request) = payload.map_err(json_rejection)?;
        let conversation = Self::normalize_conversation(request.messages)?;

        if resources.config.chat.guard_enabled {
            if let Some(clarification) = resources.guard.check(&conversation) {
                info!(
                    turns = conversation.len(),
                    "Plan request is missing details, asking for clarification"
                );
                return Ok(Json(ChatResponse {
                    reply: clarification,
                    guardrail_triggered: true,
                }));
            }
        }

        let gateway = resources.gateway.acquire().await?;

        match gateway.generate_chat_response(&conversation).await {
            Ok(reply) => Ok(Json(ChatResponse {
                reply,
                guardrail_triggered: false,
            })),
            Err(err) if err.is_quota_exhausted() => {
                warn!(error = %err, "Chat answered with quota apology");
                Ok(Json(ChatResponse {
                    reply: messages::CHAT_QUOTA_APOLOGY.to_owned(),
                    guardrail_triggered: true,
                }))
            }
            Err(err) => Err(upstream_failure(err, messages::CHAT_FAILED_PREFIX)),
        }
    }
}
