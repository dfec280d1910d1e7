// ABOUTME: Core types and constants for the PT & nutrition coach service
// ABOUTME: Foundation crate with error handling and user-facing message constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Coach Core
//!
//! Foundation crate providing shared types and constants for the coach
//! service. It carries no HTTP framework dependency unless the
//! `http-response` feature is enabled.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Upload limits, model defaults, and Vietnamese user-facing messages

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;
