// ABOUTME: Request tracing for the HTTP layer
// ABOUTME: Creates one span per request carrying method, path, and the caller's request id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::http::Request;
use tower_http::trace::MakeSpan;
use tracing::Span;

/// Header a caller may set to correlate logs
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create a tracing span for HTTP requests
pub fn create_request_span(method: &str, path: &str) -> Span {
    tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = tracing::field::Empty,
    )
}

/// `MakeSpan` used by the router's `TraceLayer`
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let span = create_request_span(request.method().as_str(), request.uri().path());
        if let Some(request_id) = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            span.record("request_id", request_id);
        }
        span
    }
}
