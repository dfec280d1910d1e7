// ABOUTME: Environment configuration for the coach server: bind address, CORS, model gateway, chat guard
// ABOUTME: Parses environment variables (with optional .env) once at startup into typed settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use coach_core::constants::{env_vars, models};

/// Default bind address
const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port
const DEFAULT_HTTP_PORT: u16 = 8000;

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed service
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Cross-origin settings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CorsConfig {
    /// Explicit origins; empty means any origin
    pub allowed_origins: Vec<String>,
    /// Whether credentials were requested
    pub allow_credentials: bool,
}

impl CorsConfig {
    /// Build from the raw `ALLOWED_ORIGINS` value and the credentials flag
    #[must_use]
    pub fn from_values(origins: Option<&str>, allow_credentials: bool) -> Self {
        Self {
            allowed_origins: origins.map(parse_origins).unwrap_or_default(),
            allow_credentials,
        }
    }

    /// Any origin is allowed when the list is empty or contains `*`
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }

    /// Credentials actually sent; always off for wildcard origins
    #[must_use]
    pub fn effective_credentials(&self) -> bool {
        self.allow_credentials && !self.allows_any_origin()
    }
}

/// Settings for the hosted model gateway
///
/// The API key is not stored here; it is read from the environment the first
/// time the gateway is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Model tried first
    pub primary_model: String,
    /// Model tried after the primary fails
    pub fallback_model: String,
    /// REST base URL
    pub api_base_url: String,
    /// Per-attempt timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            primary_model: models::DEFAULT_PRIMARY_MODEL.to_owned(),
            fallback_model: models::DEFAULT_FALLBACK_MODEL.to_owned(),
            api_base_url: models::DEFAULT_API_BASE_URL.to_owned(),
            timeout_secs: models::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GatewayConfig {
    /// Resolve model ids: `GEMINI_MODEL`, then `GEMINI_MODEL_PRIMARY`, then the default
    #[must_use]
    pub fn resolve_models(
        model: Option<&str>,
        primary: Option<&str>,
        fallback: Option<&str>,
    ) -> (String, String) {
        let non_empty = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };

        let primary = non_empty(model)
            .or_else(|| non_empty(primary))
            .unwrap_or_else(|| models::DEFAULT_PRIMARY_MODEL.to_owned());
        let fallback =
            non_empty(fallback).unwrap_or_else(|| models::DEFAULT_FALLBACK_MODEL.to_owned());
        (primary, fallback)
    }

    /// Model ids in order, duplicates removed
    #[must_use]
    pub fn model_names(&self) -> Vec<String> {
        let mut names = vec![self.primary_model.clone()];
        if self.fallback_model != self.primary_model {
            names.push(self.fallback_model.clone());
        }
        names
    }
}

/// Chat endpoint behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChatConfig {
    /// Run the information-completeness guard before calling the model
    pub guard_enabled: bool,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Cross-origin settings
    pub cors: CorsConfig,
    /// Model gateway settings
    pub gateway: GatewayConfig,
    /// Chat endpoint behaviour
    pub chat: ChatConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            http_port: DEFAULT_HTTP_PORT,
            environment: Environment::default(),
            cors: CorsConfig::default(),
            gateway: GatewayConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        Self::from_current_env()
    }

    /// Parse the current process environment without touching `.env`
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable cannot be parsed.
    /// Unrecognised boolean values are rejected rather than read as `false`.
    pub fn from_current_env() -> Result<Self> {
        let port = optional_var(env_vars::HTTP_PORT).or_else(|| optional_var(env_vars::PORT));
        let http_port = match port {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("Invalid port value: {port}"))?,
            None => DEFAULT_HTTP_PORT,
        };

        let (primary_model, fallback_model) = GatewayConfig::resolve_models(
            optional_var(env_vars::GEMINI_MODEL).as_deref(),
            optional_var(env_vars::GEMINI_MODEL_PRIMARY).as_deref(),
            optional_var(env_vars::GEMINI_MODEL_FALLBACK).as_deref(),
        );

        let timeout_secs = env_var_or(
            env_vars::GEMINI_TIMEOUT_SECS,
            &models::DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .context("Invalid GEMINI_TIMEOUT_SECS value")?;

        let config = Self {
            host: env_var_or(env_vars::HOST, DEFAULT_HOST),
            http_port,
            environment: Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development")),
            cors: CorsConfig::from_values(
                optional_var(env_vars::ALLOWED_ORIGINS).as_deref(),
                parse_bool(&env_var_or(env_vars::ALLOW_CREDENTIALS, "false"))
                    .context("Invalid ALLOW_CREDENTIALS value")?,
            ),
            gateway: GatewayConfig {
                primary_model,
                fallback_model,
                api_base_url: env_var_or(env_vars::GEMINI_API_BASE_URL, models::DEFAULT_API_BASE_URL),
                timeout_secs,
            },
            chat: ChatConfig {
                guard_enabled: parse_bool(&env_var_or(env_vars::CHAT_GUARD_ENABLED, "false"))
                    .context("Invalid CHAT_GUARD_ENABLED value")?,
            },
        };

        Ok(config)
    }

    /// One-line description for startup logs; contains no secrets
    #[must_use]
    pub fn summary(&self) -> String {
        let origins = if self.cors.allows_any_origin() {
            "*".to_owned()
        } else {
            self.cors.allowed_origins.join(",")
        };
        let api_key = if optional_var(env_vars::GEMINI_API_KEY).is_some() {
            "set"
        } else {
            "missing"
        };

        format!(
            "listen={}:{} env={} origins={} credentials={} models={} api_key={} guard={}",
            self.host,
            self.http_port,
            self.environment,
            origins,
            self.cors.effective_credentials(),
            self.gateway.model_names().join(">"),
            api_key,
            self.chat.guard_enabled,
        )
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    optional_var(key).unwrap_or_else(|| default.to_owned())
}

/// Set and non-blank variable
fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Boolean flag values: `true`/`1`/`yes`/`on` and `false`/`0`/`no`/`off`
///
/// Anything else is an error, so a mistyped flag stops startup instead of
/// silently reading as `false`.
fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got {other:?}"),
    }
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    origins_str
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
