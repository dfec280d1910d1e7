// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Builds server resources and routers around a scripted or failing model gateway
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(dead_code, clippy::missing_panics_doc, clippy::must_use_candidate)]
//! Shared test utilities for `pt_coach_server`

use std::sync::Arc;

use axum::Router;
use coach_core::errors::AppError;
use pt_coach_server::{
    config::ServerConfig,
    llm::{GatewaySlot, ModelGateway},
    resources::ServerResources,
    server::build_router,
};

use crate::helpers::scripted_model::{gateway_over, ScriptedModel};

/// Configuration with the chat guard toggled as requested
pub fn test_config(guard_enabled: bool) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.chat.guard_enabled = guard_enabled;
    config
}

/// Resources backed by the scripted model
pub fn scripted_resources(model: &Arc<ScriptedModel>, guard_enabled: bool) -> Arc<ServerResources> {
    Arc::new(ServerResources::with_gateway(
        test_config(guard_enabled),
        GatewaySlot::ready(gateway_over(model)),
    ))
}

/// Full router backed by the scripted model
pub fn scripted_router(model: &Arc<ScriptedModel>, guard_enabled: bool) -> Router {
    build_router(scripted_resources(model, guard_enabled))
}

/// Router whose gateway can never be built (missing API key)
pub fn unconfigured_router() -> Router {
    let slot = GatewaySlot::lazy(|| -> Result<ModelGateway, AppError> {
        Err(AppError::config_missing(
            "Missing GEMINI_API_KEY. Populate .env or environment variables.",
        ))
    });
    build_router(Arc::new(ServerResources::with_gateway(
        test_config(false),
        slot,
    )))
}
