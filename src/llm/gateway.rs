// ABOUTME: Model gateway with ordered fallback across model ids and a distinct quota signal
// ABOUTME: Exposes the chat, meal photo analysis, and meal finalisation generation operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, instrument, warn};

use super::prompts::{COACH_SYSTEM_PROMPT, MEAL_FINAL_PROMPT, MEAL_IMAGE_PROMPT};
use super::{Content, ContentRole, GeminiClient, GenerationRequest, GenerativeModel, Part};
use crate::config::GatewayConfig;
use crate::models::ChatMessage;
use coach_core::constants::{messages, models};
use coach_core::errors::{AppError, AppResult};

/// Generation gateway walking model ids in order until one answers
pub struct ModelGateway {
    model: Arc<dyn GenerativeModel>,
    model_names: Vec<String>,
    system_instruction: String,
}

impl ModelGateway {
    /// Create a gateway over `model` trying `model_names` in order
    ///
    /// Blank and duplicate ids are dropped; the first occurrence keeps its
    /// position.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when no usable id remains.
    pub fn new(model: Arc<dyn GenerativeModel>, model_names: Vec<String>) -> AppResult<Self> {
        let mut unique: Vec<String> = Vec::with_capacity(model_names.len());
        for name in model_names {
            let name = name.trim();
            if !name.is_empty() && !unique.iter().any(|existing| existing == name) {
                unique.push(name.to_owned());
            }
        }

        if unique.is_empty() {
            return Err(AppError::config_invalid(
                "Không tìm thấy model Gemini hợp lệ.",
            ));
        }

        Ok(Self {
            model,
            model_names: unique,
            system_instruction: COACH_SYSTEM_PROMPT.trim().to_owned(),
        })
    }

    /// Build the production gateway from configuration and `GEMINI_API_KEY`
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when the API key is absent, or a
    /// configuration error for an unusable model list.
    pub fn from_config(config: &GatewayConfig) -> AppResult<Self> {
        let client = GeminiClient::from_env(
            config.api_base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Self::new(Arc::new(client), config.model_names())
    }

    /// Replace the base system instruction
    #[must_use]
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    /// Model ids in the order they are tried
    #[must_use]
    pub fn model_names(&self) -> &[String] {
        &self.model_names
    }

    /// Run one generation, falling back across model ids
    ///
    /// Quota exhaustion on any attempt wins over other failures once every
    /// id has been tried.
    ///
    /// # Errors
    ///
    /// Returns `QuotaExceeded` if any attempt hit a quota limit, otherwise an
    /// upstream error prefixed with "Lỗi Gemini: " carrying the last failure.
    pub async fn generate_with_fallback(
        &self,
        contents: Vec<Content>,
        extra_instruction: Option<&str>,
        temperature: f32,
    ) -> AppResult<String> {
        let system_instruction = match extra_instruction {
            Some(extra) => format!("{}\n\n{}", self.system_instruction, extra.trim()),
            None => self.system_instruction.clone(),
        };
        let request = GenerationRequest {
            contents,
            system_instruction,
            temperature,
        };

        let mut quota_error: Option<AppError> = None;
        let mut last_error: Option<AppError> = None;

        for model_name in &self.model_names {
            match self.model.generate(model_name, &request).await {
                Ok(text) => {
                    debug!(provider = self.model.name(), model = %model_name, "Generation succeeded");
                    return Ok(text);
                }
                Err(err) if err.is_quota_exhausted() => {
                    warn!(model = %model_name, error = %err, "Model quota exhausted, trying next model");
                    quota_error = Some(err);
                }
                Err(err) => {
                    warn!(model = %model_name, error = %err, "Model call failed, trying next model");
                    last_error = Some(err);
                }
            }
        }

        if let Some(err) = quota_error {
            return Err(err);
        }
        if let Some(err) = last_error {
            return Err(AppError::external_service(format!(
                "{}{}",
                messages::GATEWAY_FAILED_PREFIX,
                err.message
            ))
            .with_source(err));
        }
        Err(AppError::quota_exhausted("No model id was available to try"))
    }

    /// Coaching reply for a conversation
    ///
    /// # Errors
    ///
    /// Returns a validation error when no message has content, otherwise
    /// the errors of [`Self::generate_with_fallback`].
    #[instrument(skip(self, conversation), fields(turns = conversation.len()))]
    pub async fn generate_chat_response(&self, conversation: &[ChatMessage]) -> AppResult<String> {
        let contents: Vec<Content> = conversation
            .iter()
            .filter(|message| !message.content.trim().is_empty())
            .map(|message| Content {
                role: if message.is_user() {
                    ContentRole::User
                } else {
                    ContentRole::Model
                },
                parts: vec![Part::Text(message.content.clone())],
            })
            .collect();

        if contents.is_empty() {
            return Err(AppError::invalid_input("Conversation history is empty."));
        }

        self.generate_with_fallback(contents, None, models::CHAT_TEMPERATURE)
            .await
    }

    /// Nutrition estimate for a meal photo with an optional user note
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::generate_with_fallback`].
    #[instrument(skip(self, image, note), fields(bytes = image.len(), mime_type = %mime_type))]
    pub async fn analyze_meal(
        &self,
        image: Bytes,
        mime_type: &str,
        note: Option<&str>,
    ) -> AppResult<String> {
        let mut parts = Vec::with_capacity(2);
        if let Some(note) = note.map(str::trim).filter(|note| !note.is_empty()) {
            parts.push(Part::Text(note.to_owned()));
        }
        parts.push(Part::Image {
            mime_type: mime_type.to_owned(),
            data: image,
        });

        self.generate_with_fallback(
            vec![Content {
                role: ContentRole::User,
                parts,
            }],
            Some(MEAL_IMAGE_PROMPT),
            models::MEAL_ANALYSIS_TEMPERATURE,
        )
        .await
    }

    /// Final nutrition breakdown from the user's portion clarifications
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank input, otherwise the errors of
    /// [`Self::generate_with_fallback`].
    #[instrument(skip_all)]
    pub async fn finalize_meal(&self, clarifications: &str) -> AppResult<String> {
        let text = clarifications.trim();
        if text.is_empty() {
            return Err(AppError::invalid_input(messages::CLARIFICATION_MISSING));
        }

        self.generate_with_fallback(
            vec![Content::user_text(text)],
            Some(MEAL_FINAL_PROMPT),
            models::MEAL_FINALIZE_TEMPERATURE,
        )
        .await
    }
}

impl Debug for ModelGateway {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ModelGateway")
            .field("provider", &self.model.name())
            .field("model_names", &self.model_names)
            .finish_non_exhaustive()
    }
}
