// ABOUTME: Unified error type, error codes, and HTTP status mapping for the coach service
// ABOUTME: All fallible layers (validation, configuration, model gateway) report through AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every failure the service can surface is an [`AppError`] carrying an
//! [`ErrorCode`]. The code decides the HTTP status; the message is the
//! user-facing (Vietnamese) detail string returned to the browser client.
//!
//! The decision logic of the coach (field extraction, guard) is pure and
//! never produces an `AppError`; only request validation and the model
//! gateway do.

#[cfg(feature = "http-response")]
mod response;

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Request payload failed validation
    InvalidInput = 3000,
    /// A required field or upload part is missing
    MissingRequiredField = 3001,
    /// Payload has the wrong format (e.g. unsupported image type)
    InvalidFormat = 3002,
    /// A value is outside the accepted range (e.g. image too large)
    ValueOutOfRange = 3003,

    // Upstream quota (2000-2999)
    /// The hosted model rejected the call because the usage allowance is consumed
    QuotaExceeded = 2001,

    // External Services (5000-5999)
    /// The hosted model failed for a reason other than quota
    ExternalServiceError = 5000,

    // Configuration (6000-6999)
    /// Required configuration (e.g. the API credential) is missing
    ConfigMissing = 6001,
    /// Configuration is present but unusable
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    InternalError = 9000,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput
            | Self::MissingRequiredField
            | Self::InvalidFormat
            | Self::ValueOutOfRange => 400,

            Self::QuotaExceeded => 429,

            Self::ExternalServiceError
            | Self::ConfigMissing
            | Self::ConfigInvalid
            | Self::InternalError => 500,
        }
    }

    /// Whether this code belongs to the validation family
    #[must_use]
    pub const fn is_validation(self) -> bool {
        matches!(
            self,
            Self::InvalidInput
                | Self::MissingRequiredField
                | Self::InvalidFormat
                | Self::ValueOutOfRange
        )
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message, returned to clients as `detail`
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Prefix the message, keeping code and source
    ///
    /// Handlers use this to wrap an upstream cause in an endpoint-specific
    /// sentence ("Lỗi khi gọi Gemini: ...").
    #[must_use]
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.message = format!("{prefix}{}", self.message);
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Whether the upstream model signalled quota exhaustion
    #[must_use]
    pub fn is_quota_exhausted(&self) -> bool {
        self.code == ErrorCode::QuotaExceeded
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing required field or upload part
    #[must_use]
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingRequiredField, message)
    }

    /// Unsupported data format
    #[must_use]
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFormat, message)
    }

    /// Value outside the accepted range
    #[must_use]
    pub fn value_out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Upstream quota exhausted
    #[must_use]
    pub fn quota_exhausted(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::QuotaExceeded, message)
    }

    /// Upstream model failure other than quota
    #[must_use]
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalServiceError, message)
    }

    /// Missing configuration
    #[must_use]
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Invalid configuration
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
///
/// `detail` is the key the browser client reads on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// User-facing message
    pub detail: String,
    /// Machine-readable error code
    pub code: ErrorCode,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            detail: error.message.clone(),
            code: error.code,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            detail: error.message,
            code: error.code,
        }
    }
}
