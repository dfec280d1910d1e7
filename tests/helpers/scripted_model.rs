// ABOUTME: In-process GenerativeModel stub replaying scripted outcomes for gateway and route tests
// ABOUTME: Records every call (model id and request) so tests can assert fallback order and payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use coach_core::errors::{AppError, AppResult};
use pt_coach_server::llm::{GenerationRequest, GenerativeModel, ModelGateway};

/// One recorded call to the stub
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub request: GenerationRequest,
}

/// Model returning scripted results in order
pub struct ScriptedModel {
    outcomes: Mutex<VecDeque<AppResult<String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedModel {
    /// Stub that replays `outcomes`, then fails with an upstream error
    pub fn new(outcomes: Vec<AppResult<String>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Stub that always answers `text`
    pub fn replying(text: &str) -> Arc<Self> {
        Self::new((0..8).map(|_| Ok(text.to_owned())).collect())
    }

    /// Calls made so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Model ids tried so far, in order
    pub fn models_tried(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.model).collect()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate(&self, model: &str, request: &GenerationRequest) -> AppResult<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.to_owned(),
            request: request.clone(),
        });
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::external_service("script exhausted")))
    }
}

/// Gateway over `model` with the usual two model ids
pub fn gateway_over(model: &Arc<ScriptedModel>) -> ModelGateway {
    ModelGateway::new(
        Arc::clone(model) as Arc<dyn GenerativeModel>,
        vec!["primary-model".to_owned(), "fallback-model".to_owned()],
    )
    .unwrap()
}

/// Quota failure as the Gemini client reports it
pub fn quota_error() -> AppError {
    AppError::quota_exhausted("Gemini quota exhausted (429): Resource has been exhausted")
}

/// Non-quota upstream failure
pub fn upstream_error(message: &str) -> AppError {
    AppError::external_service(message)
}
