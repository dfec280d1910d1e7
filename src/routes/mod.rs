// ABOUTME: Route module organization for the coach HTTP endpoints
// ABOUTME: Health, chat, and meal routes plus shared request-rejection and upstream-error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module
//!
//! Each domain module holds route definitions and thin handlers that
//! delegate to the guard, the meal helpers, and the model gateway.

/// Coaching chat route
pub mod chat;
/// Health check route
pub mod health;
/// Meal photo analysis and finalisation routes
pub mod meal;

pub use chat::ChatRoutes;
pub use health::HealthRoutes;
pub use meal::MealRoutes;

use axum::extract::rejection::JsonRejection;

use coach_core::constants::messages;
use coach_core::errors::AppError;

/// Turn a JSON body rejection into the standard 400 error body
pub(crate) fn json_rejection(rejection: JsonRejection) -> AppError {
    AppError::invalid_input(format!(
        "{}: {}",
        messages::MALFORMED_REQUEST,
        rejection.body_text()
    ))
}

/// Prefix an upstream failure for the client; validation errors pass through unchanged
pub(crate) fn upstream_failure(error: AppError, prefix: &str) -> AppError {
    if error.code.is_validation() {
        error
    } else {
        error.with_prefix(prefix)
    }
}
