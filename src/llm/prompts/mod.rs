// ABOUTME: Prompts for the coaching model loaded at compile time
// ABOUTME: Coaching policy plus the meal photo analysis and meal finalisation instructions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy
//! maintenance. They steer the model; nothing in the service parses the
//! model output against them.

/// Base system instruction for every call: persona, required facts, anti-repetition rules
pub const COACH_SYSTEM_PROMPT: &str = include_str!("coach_system.md");

/// Appended to the system instruction when analysing a meal photo
pub const MEAL_IMAGE_PROMPT: &str = include_str!("meal_image.md");

/// Appended to the system instruction when finalising a meal's nutrition
pub const MEAL_FINAL_PROMPT: &str = include_str!("meal_final.md");
