// ABOUTME: Meal routes: photo analysis via multipart upload and nutrition finalisation from clarifications
// ABOUTME: Validates uploads before any model call and softens quota failures into apologies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Meal routes
//!
//! Two-step flow: the photo is analysed first (the model usually asks about
//! portions), then the user's answers are sent to finalisation.

use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{json_rejection, upstream_failure};
use crate::meal::{detect_follow_up_need, validate_clarifications, validate_meal_image};
use crate::resources::ServerResources;
use coach_core::constants::{messages, uploads};
use coach_core::errors::{AppError, AppResult};

/// Meal analysis reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealAnalysisResponse {
    /// Analysis text shown to the user
    pub reply: String,
    /// Whether the analysis asks the user for more details
    pub needs_follow_up: bool,
}

/// Meal finalisation request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealFinalizeRequest {
    /// User's answers about portions, sauces, and preparation
    pub clarifications: String,
}

/// Meal finalisation reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealFinalizeResponse {
    /// Final nutrition breakdown
    pub reply: String,
}

/// Parts read from the multipart upload
struct MealUpload {
    image: Bytes,
    content_type: Option<String>,
    note: Option<String>,
}

impl MealUpload {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut image = None;
        let mut content_type = None;
        let mut note = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some("image") => {
                    content_type = field.content_type().map(str::to_owned);
                    image = Some(field.bytes().await.map_err(multipart_error)?);
                }
                Some("note") => {
                    note = Some(field.text().await.map_err(multipart_error)?);
                }
                _ => debug!(field = ?name, "Ignoring unexpected multipart field"),
            }
        }

        let image = image.ok_or_else(|| AppError::missing_field(messages::MISSING_IMAGE))?;
        Ok(Self {
            image,
            content_type,
            note: note.filter(|text| !text.trim().is_empty()),
        })
    }
}

/// Body over the framework limit reads as an oversize image; anything else is malformed
fn multipart_error(error: MultipartError) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::value_out_of_range(messages::IMAGE_TOO_LARGE);
    }
    AppError::invalid_input(format!(
        "{}: {}",
        messages::MALFORMED_REQUEST,
        error.body_text()
    ))
}

fn multipart_rejection(rejection: MultipartRejection) -> AppError {
    AppError::invalid_input(format!(
        "{}: {}",
        messages::MALFORMED_REQUEST,
        rejection.body_text()
    ))
}

/// Meal routes handler
pub struct MealRoutes;

impl MealRoutes {
    /// Create the meal routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/analyze-meal",
                post(Self::analyze_meal)
                    .layer(DefaultBodyLimit::max(uploads::MULTIPART_BODY_LIMIT)),
            )
            .route("/api/meal-finalize", post(Self::finalize_meal))
            .with_state(resources)
    }

    async fn analyze_meal(
        State(resources): State<Arc<ServerResources>>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Json<MealAnalysisResponse>, AppError> {
        let MealUpload {
            image,
            content_type,
            note,
        } = MealUpload::read(multipart.map_err(multipart_rejection)?).await?;

        let mime_type = validate_meal_image(content_type.as_deref(), &image)?;
        let gateway = resources.gateway.acquire().await?;

        match gateway.analyze_meal(image, mime_type, note.as_deref()).await {
            Ok(reply) => {
                let needs_follow_up = detect_follow_up_need(Some(&reply));
                Ok(Json(MealAnalysisResponse {
                    reply,
                    needs_follow_up,
                }))
            }
            Err(err) if err.is_quota_exhausted() => {
                warn!(error = %err, "Meal analysis answered with quota apology");
                Ok(Json(MealAnalysisResponse {
                    reply: messages::MEAL_ANALYSIS_QUOTA_APOLOGY.to_owned(),
                    needs_follow_up: true,
                }))
            }
            Err(err) => Err(upstream_failure(err, messages::MEAL_ANALYSIS_FAILED_PREFIX)),
        }
    }

    async fn finalize_meal(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<MealFinalizeRequest>, JsonRejection>,
    ) -> Result<Json<MealFinalizeResponse>, AppError> {
        let Json(request) = payload.map_err(json_rejection)?;
        let clarifications = validate_clarifications(&request.clarifications)?;

        let gateway = resources.gateway.acquire().await?;

        match gateway.finalize_meal(&clarifications).await {
            Ok(reply) => Ok(Json(MealFinalizeResponse { reply })),
            Err(err) if err.is_quota_exhausted() => {
                warn!(error = %err, "Meal finalisation answered with quota apology");
                Ok(Json(MealFinalizeResponse {
                    reply: messages::MEAL_FINALIZE_QUOTA_APOLOGY.to_owned(),
                }))
            }
            Err(err) => Err(upstream_failure(err, messages::MEAL_FINALIZE_FAILED_PREFIX)),
        }
    }
}
