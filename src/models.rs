// ABOUTME: Conversation data model shared by the guard, the model gateway, and the chat route
// ABOUTME: A conversation is an ordered list of user/assistant messages supplied by the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Conversation models
//!
//! No conversation state is stored server-side: every request carries the
//! full history and all decisions are recomputed from it.

use serde::{Deserialize, Serialize};

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// End user
    User,
    /// Coaching assistant (model output echoed back by the client)
    Assistant,
}

impl MessageRole {
    /// Convert to string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message author
    pub role: MessageRole,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Whether the end user authored this message
    #[must_use]
    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

/// Lowercased contents of the user-authored turns, in order
///
/// Assistant turns are never scanned by the guard: model output routinely
/// repeats the very keywords the guard looks for.
pub fn user_texts(conversation: &[ChatMessage]) -> impl Iterator<Item = String> + '_ {
    conversation
        .iter()
        .filter(|message| message.is_user())
        .map(|message| message.content.to_lowercase())
}
