// ABOUTME: Google Gemini REST client implementing the GenerativeModel contract
// ABOUTME: Calls generateContent per model id and classifies quota exhaustion separately from other failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Client
//!
//! Implementation of [`GenerativeModel`] for Google's Generative Language API.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio: <https://aistudio.google.com/app/apikey>
//!
//! The key travels in the `x-goog-api-key` header, never in the URL, so
//! transport errors (which print the URL) cannot leak it.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{Content, GenerationRequest, GenerativeModel, Part};
use coach_core::constants::{env_vars, models};
use coach_core::errors::{AppError, AppResult};

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Status string Google uses for exhausted quota
const RESOURCE_EXHAUSTED: &str = "RESOURCE_EXHAUSTED";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<WireContent<'a>>,
    system_instruction: SystemInstruction<'a>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    role: &'static str,
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WirePart<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    prompt_feedback: Option<PromptFeedback>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    status: Option<String>,
}

// ============================================================================
// Client Implementation
// ============================================================================

/// Google Gemini REST client
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    /// Create a client with the default endpoint and timeout
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the key is blank or the HTTP
    /// client cannot be built.
    pub fn new(api_key: impl Into<String>) -> AppResult<Self> {
        Self::with_endpoint(
            api_key,
            models::DEFAULT_API_BASE_URL,
            Duration::from_secs(models::DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a client against a specific base URL with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the key is blank or the HTTP
    /// client cannot be built.
    pub fn with_endpoint(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(missing_key_error());
        }

        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            AppError::config_invalid(format!("Failed to build HTTP client: {e}")).with_source(e)
        })?;

        Ok(Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            client,
        })
    }

    /// Create a client reading the key from `GEMINI_API_KEY`
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when the variable is unset or blank.
    pub fn from_env(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let api_key = env::var(env_vars::GEMINI_API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(missing_key_error)?;
        Self::with_endpoint(api_key, base_url, timeout)
    }

    fn build_url(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.base_url)
    }

    fn convert_content(content: &Content) -> WireContent<'_> {
        WireContent {
            role: content.role.as_str(),
            parts: content.parts.iter().map(Self::convert_part).collect(),
        }
    }

    fn convert_part(part: &Part) -> WirePart<'_> {
        match part {
            Part::Text(text) => WirePart::Text { text },
            Part::Image { mime_type, data } => WirePart::InlineData {
                inline_data: InlineData {
                    mime_type,
                    data: BASE64.encode(data),
                },
            },
        }
    }

    fn build_gemini_request(request: &GenerationRequest) -> GeminiRequest<'_> {
        GeminiRequest {
            contents: request.contents.iter().map(Self::convert_content).collect(),
            system_instruction: SystemInstruction {
                parts: vec![WirePart::Text {
                    text: &request.system_instruction,
                }],
            },
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        }
    }

    /// Concatenated text of the first candidate
    fn extract_text(response: &GeminiResponse) -> AppResult<String> {
        let candidate = response.candidates.as_ref().and_then(|c| c.first());

        let text: String = candidate
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if !text.trim().is_empty() {
            return Ok(text.trim().to_owned());
        }

        let reason = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
            .or_else(|| candidate.and_then(|c| c.finish_reason.as_deref()))
            .unwrap_or("unknown");
        Err(AppError::external_service(format!(
            "Gemini returned no text (reason: {reason})"
        )))
    }

    /// Map a failed API response to a quota or upstream error
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let api_error = serde_json::from_str::<ErrorEnvelope>(response_text)
            .ok()
            .and_then(|envelope| envelope.error);

        let exhausted = status == 429
            || api_error
                .as_ref()
                .and_then(|e| e.status.as_deref())
                .is_some_and(|s| s == RESOURCE_EXHAUSTED)
            || response_text.contains(RESOURCE_EXHAUSTED);

        let message = api_error.map_or_else(|| response_text.to_owned(), |e| e.message);

        if exhausted {
            AppError::quota_exhausted(format!("Gemini quota exhausted ({status}): {message}"))
        } else {
            AppError::external_service(format!("Gemini API error ({status}): {message}"))
        }
    }
}

fn missing_key_error() -> AppError {
    AppError::config_missing(format!(
        "Missing {}. Populate .env or environment variables.",
        env_vars::GEMINI_API_KEY
    ))
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, request), fields(model = %model))]
    async fn generate(&self, model: &str, request: &GenerationRequest) -> AppResult<String> {
        let url = self.build_url(model);
        let gemini_request = Self::build_gemini_request(request);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(format!("HTTP request failed: {e}")).with_source(e)
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            AppError::external_service(format!("Failed to read response: {e}")).with_source(e)
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response");
                AppError::external_service(format!("Failed to parse Gemini response: {e}"))
                    .with_source(e)
            })?;

        if gemini_response.error.is_some() {
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let text = Self::extract_text(&gemini_response)?;
        debug!("Received Gemini response");
        Ok(text)
    }
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
