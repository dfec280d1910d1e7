// ABOUTME: Model gateway abstraction for the hosted generative model behind the coach
// ABOUTME: Defines the GenerativeModel contract, request types, and re-exports gateway and client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Generative Model Gateway
//!
//! The coach never talks to a model SDK directly. Requests are expressed as
//! a [`GenerationRequest`] and sent through a [`GenerativeModel`]
//! implementation (in production the Gemini REST client). The
//! [`ModelGateway`] adds ordered fallback across model identifiers and the
//! quota-exhaustion signal; the [`GatewaySlot`] memoises one gateway per
//! process.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pt_coach_server::llm::{GeminiClient, ModelGateway};
//! use pt_coach_server::models::ChatMessage;
//! use coach_core::errors::AppError;
//!
//! # async fn example() -> Result<(), AppError> {
//! let client = GeminiClient::new("api-key")?;
//! let gateway = ModelGateway::new(
//!     Arc::new(client),
//!     vec!["gemini-2.5-flash".to_owned(), "gemini-2.0-flash-exp".to_owned()],
//! )?;
//! let reply = gateway
//!     .generate_chat_response(&[ChatMessage::user("Cho mình lịch tập 3 buổi/tuần")])
//!     .await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

mod gateway;
mod gemini;
pub mod prompts;
mod slot;

pub use gateway::ModelGateway;
pub use gemini::GeminiClient;
pub use slot::{GatewayFactory, GatewaySlot};

use async_trait::async_trait;
use bytes::Bytes;

use coach_core::errors::AppResult;

/// Author of a content block as the hosted model sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRole {
    /// End-user input
    User,
    /// Prior model output
    Model,
}

impl ContentRole {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// One piece of a content block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// Plain text
    Text(String),
    /// Raw image bytes with their MIME type
    Image {
        /// MIME type, e.g. `image/png`
        mime_type: String,
        /// Image payload
        data: Bytes,
    },
}

/// A single turn sent to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    /// Author of the turn
    pub role: ContentRole,
    /// Ordered parts
    pub parts: Vec<Part>,
}

impl Content {
    /// A user turn made of one text part
    #[must_use]
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: ContentRole::User,
            parts: vec![Part::Text(text.into())],
        }
    }
}

/// Fully prepared generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Conversation or single-turn payload
    pub contents: Vec<Content>,
    /// System instruction steering the model
    pub system_instruction: String,
    /// Sampling temperature
    pub temperature: f32,
}

/// Hosted generative model reachable by model identifier
///
/// Implementations must report quota exhaustion with
/// `ErrorCode::QuotaExceeded` and every other upstream failure with
/// `ErrorCode::ExternalServiceError`.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Provider identifier used in logs
    fn name(&self) -> &'static str;

    /// Generate text with the given model identifier
    async fn generate(&self, model: &str, request: &GenerationRequest) -> AppResult<String>;
}
