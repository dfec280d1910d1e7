// ABOUTME: Plan-Request Detector flagging conversations that ask for a workout or nutrition plan
// ABOUTME: Case-insensitive substring match of plan keywords over user-authored turns only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{user_texts, ChatMessage};

/// Phrases (Vietnamese and English) that signal a plan request
const PLAN_KEYWORDS: &[&str] = &[
    "kế hoạch",
    "lịch tập",
    "workout",
    "tập luyện",
    "chương trình tập",
    "plan",
    "routine",
    "thực đơn",
    "meal plan",
    "chế độ ăn",
    "nutrition plan",
];

/// Whether any user message asks for a structured plan
///
/// Existential over the conversation: message order does not matter.
#[must_use]
pub fn detect_plan_request(conversation: &[ChatMessage]) -> bool {
    user_texts(conversation).any(|text| PLAN_KEYWORDS.iter().any(|keyword| text.contains(keyword)))
}
