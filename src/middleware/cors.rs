// ABOUTME: CORS middleware configuration for the coach HTTP API
// ABOUTME: Allows configured origins (or any), every method and header, credentials only for explicit origins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::warn;

use crate::config::CorsConfig;

/// Configure CORS for the browser client
///
/// - Empty origin list or `*` anywhere in it: any origin, never credentials
/// - Otherwise exactly the listed origins, credentials per `ALLOW_CREDENTIALS`
///
/// Methods and headers are mirrored from the preflight request, which
/// allows everything and stays valid when credentials are on.
///
/// # Examples
///
/// ```bash
/// # Allow all origins (development)
/// export ALLOWED_ORIGINS="*"
///
/// # Allow specific origins with cookies
/// export ALLOWED_ORIGINS="https://coach.example.vn,https://admin.example.vn"
/// export ALLOW_CREDENTIALS=true
/// ```
#[must_use]
pub fn setup_cors(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    if config.allows_any_origin() {
        return layer.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|_| warn!(origin = %origin, "Ignoring unparsable CORS origin"))
                .ok()
        })
        .collect();

    if origins.is_empty() {
        return layer.allow_origin(AllowOrigin::any());
    }

    layer
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(config.effective_credentials())
}
