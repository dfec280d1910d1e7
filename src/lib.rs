// ABOUTME: Main library entry point for the Vietnamese PT and nutrition coach API
// ABOUTME: Chat coaching with a completeness guard, meal photo analysis, and meal finalisation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # PT Coach Server
//!
//! HTTP backend for a Vietnamese personal-trainer and nutrition assistant.
//! Every request carries its full context; the server keeps no conversation
//! state.
//!
//! ## Features
//!
//! - **Coaching chat**: forwards the conversation to a hosted generative model
//! - **Completeness guard**: asks for missing facts before a plan is generated
//! - **Meal photos**: nutrition estimate from an uploaded photo, then a final
//!   breakdown once the user answers the follow-up questions
//! - **Model fallback**: ordered model ids with a distinct quota signal that
//!   becomes a friendly apology instead of an error
//!
//! ## Architecture
//!
//! - **Guard**: field extraction, plan-request detection, clarification text
//! - **Meal**: upload validation and the follow-up classifier
//! - **LLM**: model trait, Gemini REST client, fallback gateway
//! - **Routes**: thin axum handlers over the above
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pt_coach_server::{config::ServerConfig, resources::ServerResources, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let (host, port) = (config.host.clone(), config.http_port);
//!     server::run(Arc::new(ServerResources::new(config)), &host, port).await
//! }
//! ```

/// Environment configuration
pub mod config;

/// Information-completeness guard for plan requests
pub mod guard;

/// Model gateway, Gemini client, and prompts
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Meal photo validation and follow-up classification
pub mod meal;

/// HTTP middleware (CORS, request tracing)
pub mod middleware;

/// Conversation data model
pub mod models;

/// Shared server resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and serve loop
pub mod server;
