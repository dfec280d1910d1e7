// ABOUTME: Meal photo helpers: upload validation and the follow-up classifier for model analyses
// ABOUTME: Decides whether a meal analysis asks the user something or can be treated as final
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Meal analysis support

use coach_core::constants::{messages, uploads};
use coach_core::errors::{AppError, AppResult};

/// Vietnamese politeness markers the model uses when asking the user for input
const FOLLOW_UP_MARKERS: &[&str] = &["vui lòng", "hãy"];

/// Whether a model-produced meal analysis asks the user a clarifying question
///
/// Missing or empty text counts as needing follow-up so an analysis is
/// never silently finalised.
#[must_use]
pub fn detect_follow_up_need(analysis: Option<&str>) -> bool {
    let Some(text) = analysis.filter(|text| !text.is_empty()) else {
        return true;
    };

    let normalized = text.to_lowercase();
    normalized.contains('?')
        || FOLLOW_UP_MARKERS
            .iter()
            .any(|marker| normalized.contains(marker))
}

/// Validate an uploaded meal photo
///
/// Checks run in a fixed order: content type, emptiness, size. Returns the
/// accepted content type, which is what gets forwarded to the model.
///
/// # Errors
///
/// Returns a 400-class `AppError` with the Vietnamese detail for the first
/// failing check.
pub fn validate_meal_image<'a>(content_type: Option<&'a str>, data: &[u8]) -> AppResult<&'a str> {
    let Some(mime) = content_type.filter(|mime| uploads::ALLOWED_IMAGE_TYPES.contains(mime)) else {
        return Err(AppError::invalid_format(messages::UNSUPPORTED_IMAGE_TYPE));
    };
    if data.is_empty() {
        return Err(AppError::invalid_input(messages::EMPTY_IMAGE));
    }
    if data.len() > uploads::MAX_IMAGE_BYTES {
        return Err(AppError::value_out_of_range(messages::IMAGE_TOO_LARGE));
    }
    Ok(mime)
}

/// Validate the clarification text sent to meal finalisation and return it trimmed
///
/// # Errors
///
/// Returns a validation error when the text is under the character or word minimum.
pub fn validate_clarifications(raw: &str) -> AppResult<String> {
    use coach_core::constants::finalize::{MIN_CLARIFICATION_CHARS, MIN_CLARIFICATION_WORDS};

    if raw.chars().count() < MIN_CLARIFICATION_CHARS {
        return Err(AppError::invalid_input(messages::CLARIFICATION_TOO_SHORT));
    }

    let trimmed = raw.trim();
    if trimmed.split_whitespace().count() < MIN_CLARIFICATION_WORDS {
        return Err(AppError::invalid_input(messages::CLARIFICATION_NOT_DETAILED));
    }

    Ok(trimmed.to_owned())
}
