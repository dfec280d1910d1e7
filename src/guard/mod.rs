// ABOUTME: Guard Orchestrator deciding whether a chat must ask for missing facts before the model
// ABOUTME: Composes plan detection, field extraction, and clarification into one pure decision
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Information-Completeness Guard
//!
//! Before a plan is generated the coach needs seven facts about the user
//! (see [`Field`]). The guard inspects the full conversation supplied by the
//! caller and either lets it through to the model (`None`) or returns a
//! single clarification message listing every fact still missing.
//!
//! Conversations that are not asking for a plan are never gated.
//!
//! All functions here are pure: same conversation, same answer.

mod clarification;
mod fields;
mod plan;

pub use clarification::{build_clarification_prompt, BULLET_PREFIX};
pub use fields::{
    evaluate_missing_fields, BodyMetricsDetector, Field, FieldDetector, FieldExtractor,
    KeywordDetector,
};
pub use plan::detect_plan_request;

use std::sync::LazyLock;

use crate::models::ChatMessage;

/// Guard with a configurable field extractor
#[derive(Debug, Default)]
pub struct ChatGuard {
    extractor: FieldExtractor,
}

impl ChatGuard {
    /// Guard using the default detectors
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Guard using a custom field extractor
    #[must_use]
    pub const fn with_extractor(extractor: FieldExtractor) -> Self {
        Self { extractor }
    }

    /// Clarification text to send instead of calling the model, if any
    #[must_use]
    pub fn check(&self, conversation: &[ChatMessage]) -> Option<String> {
        if !detect_plan_request(conversation) {
            return None;
        }

        let missing = self.extractor.missing_fields(conversation);
        if missing.is_empty() {
            return None;
        }

        Some(build_clarification_prompt(&missing))
    }
}

static DEFAULT_GUARD: LazyLock<ChatGuard> = LazyLock::new(ChatGuard::new);

/// Guard decision using the default detectors
#[must_use]
pub fn guard_chat_request(conversation: &[ChatMessage]) -> Option<String> {
    DEFAULT_GUARD.check(conversation)
}
