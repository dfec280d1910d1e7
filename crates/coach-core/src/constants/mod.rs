// ABOUTME: Application constants for the coach service organized by domain
// ABOUTME: Upload limits, model defaults, and the Vietnamese messages shown to end users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module

/// User-facing messages (Vietnamese)
pub mod messages;

/// Meal photo upload limits
pub mod uploads {
    /// Hard limit on a meal photo (8 MiB)
    pub const MAX_IMAGE_BYTES: usize = 8 * 1024 * 1024;

    /// Request body limit for the multipart upload route.
    ///
    /// Kept above `MAX_IMAGE_BYTES` so oversize photos reach the validator
    /// and get the friendly 400 instead of a bare 413.
    pub const MULTIPART_BODY_LIMIT: usize = 2 * MAX_IMAGE_BYTES;

    /// Content types accepted for meal photos
    pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/heic"];
}

/// Meal finalisation input rules
pub mod finalize {
    /// Minimum character count of the clarification text
    pub const MIN_CLARIFICATION_CHARS: usize = 10;

    /// Minimum whitespace-separated word count after trimming
    pub const MIN_CLARIFICATION_WORDS: usize = 5;
}

/// Hosted model defaults
pub mod models {
    /// Default primary model identifier
    pub const DEFAULT_PRIMARY_MODEL: &str = "gemini-2.5-flash";

    /// Default fallback model identifier
    pub const DEFAULT_FALLBACK_MODEL: &str = "gemini-2.0-flash-exp";

    /// Default REST base URL of the Generative Language API
    pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Default per-attempt HTTP timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Sampling temperature for coaching chat
    pub const CHAT_TEMPERATURE: f32 = 0.35;

    /// Sampling temperature for meal photo analysis
    pub const MEAL_ANALYSIS_TEMPERATURE: f32 = 0.3;

    /// Sampling temperature for meal finalisation
    pub const MEAL_FINALIZE_TEMPERATURE: f32 = 0.25;
}

/// Environment variable names
pub mod env_vars {
    /// API credential for the hosted model
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Primary model override (takes precedence over `GEMINI_MODEL_PRIMARY`)
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    /// Primary model override
    pub const GEMINI_MODEL_PRIMARY: &str = "GEMINI_MODEL_PRIMARY";
    /// Fallback model override
    pub const GEMINI_MODEL_FALLBACK: &str = "GEMINI_MODEL_FALLBACK";
    /// REST base URL override
    pub const GEMINI_API_BASE_URL: &str = "GEMINI_API_BASE_URL";
    /// Per-attempt timeout override
    pub const GEMINI_TIMEOUT_SECS: &str = "GEMINI_TIMEOUT_SECS";
    /// Comma-separated CORS origins
    pub const ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";
    /// CORS credentials toggle
    pub const ALLOW_CREDENTIALS: &str = "ALLOW_CREDENTIALS";
    /// Chat guard toggle
    pub const CHAT_GUARD_ENABLED: &str = "CHAT_GUARD_ENABLED";
    /// Bind address
    pub const HOST: &str = "HOST";
    /// Listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Listen port (platform convention, used when `HTTP_PORT` is unset)
    pub const PORT: &str = "PORT";
}

/// Service identity used in logs
pub mod service_names {
    /// Service name
    pub const PT_COACH_SERVER: &str = "pt-coach-server";
}
