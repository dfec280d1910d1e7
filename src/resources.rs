// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Holds the parsed configuration, the lazily built model gateway, and the chat guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Server resources
//!
//! Created once at startup and shared read-only behind an `Arc`.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::guard::ChatGuard;
use crate::llm::{GatewaySlot, ModelGateway};

/// Everything a request handler needs
#[derive(Debug)]
pub struct ServerResources {
    /// Parsed configuration
    pub config: Arc<ServerConfig>,
    /// Model gateway, built on first use
    pub gateway: GatewaySlot,
    /// Information-completeness guard for chat
    pub guard: ChatGuard,
}

impl ServerResources {
    /// Resources whose gateway is built from `config` (and `GEMINI_API_KEY`) on first use
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let gateway_config = config.gateway.clone();
        Self::with_gateway(
            config,
            GatewaySlot::lazy(move || ModelGateway::from_config(&gateway_config)),
        )
    }

    /// Resources using a caller-supplied gateway slot
    #[must_use]
    pub fn with_gateway(config: ServerConfig, gateway: GatewaySlot) -> Self {
        Self {
            config: Arc::new(config),
            gateway,
            guard: ChatGuard::new(),
        }
    }
}
