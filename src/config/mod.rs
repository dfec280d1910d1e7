// ABOUTME: Configuration management module for the coach server
// ABOUTME: Re-exports the environment-driven server, CORS, gateway, and chat settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! All settings come from environment variables (optionally seeded from a
//! `.env` file) and are parsed once at startup.

/// Environment and server configuration
pub mod environment;

pub use environment::{ChatConfig, CorsConfig, Environment, GatewayConfig, ServerConfig};
