// ABOUTME: Field Extractor: per-field detectors deciding which plan facts a conversation supplies
// ABOUTME: Keyword detectors for five fields, a regex detector for body metrics, missing-set computation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Field Extractor
//!
//! A personalised plan needs seven facts ([`Field`]). Each one is detected by
//! its own [`FieldDetector`] so that a stricter extractor can replace a single
//! heuristic without touching the guard.
//!
//! Detection is approximate: it runs substring and regex matches
//! over lowercased user text.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{user_texts, ChatMessage};

/// One fact category required before generating a personalised plan
///
/// Declaration order is the canonical order of missing-field lists and of
/// clarification bullets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Training goal (gain muscle, lose fat, maintain)
    Goal,
    /// Training experience level
    Experience,
    /// Available equipment
    Equipment,
    /// Sessions per week
    Schedule,
    /// Movement limitations or painful areas
    Limitations,
    /// Diet preference
    Diet,
    /// Weight, height, age
    BodyMetrics,
}

impl Field {
    /// Every field, in canonical order
    pub const ALL: [Self; 7] = [
        Self::Goal,
        Self::Experience,
        Self::Equipment,
        Self::Schedule,
        Self::Limitations,
        Self::Diet,
        Self::BodyMetrics,
    ];

    /// Stable identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Goal => "goal",
            Self::Experience => "experience",
            Self::Equipment => "equipment",
            Self::Schedule => "schedule",
            Self::Limitations => "limitations",
            Self::Diet => "diet",
            Self::BodyMetrics => "body_metrics",
        }
    }

    /// Vietnamese label used in clarification bullets
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Goal => "mục tiêu (tăng cơ/giảm mỡ/giữ form)",
            Self::Experience => "trình độ tập luyện",
            Self::Equipment => "dụng cụ sẵn có",
            Self::Schedule => "số buổi/tuần bạn có thể tập",
            Self::Limitations => "giới hạn vận động hoặc vùng bị đau (không nêu chi tiết bệnh lý)",
            Self::Diet => "khẩu vị hoặc chế độ ăn ưu tiên",
            Self::BodyMetrics => "cân nặng, chiều cao, độ tuổi",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const GOAL_KEYWORDS: &[&str] = &["tăng cơ", "giảm mỡ", "giữ form", "giữ dáng", "giảm cân", "lean"];

const EXPERIENCE_KEYWORDS: &[&str] = &[
    "mới tập",
    "newbie",
    "trung cấp",
    "nâng cao",
    "advanced",
    "beginner",
];

const EQUIPMENT_KEYWORDS: &[&str] = &[
    "không dụng cụ",
    "bodyweight",
    "dụng cụ",
    "tạ",
    "gym",
    "dumbbell",
    "resistance",
];

const SCHEDULE_KEYWORDS: &[&str] = &["ngày", "buổi", "lịch", "tuần"];

const LIMITATION_KEYWORDS: &[&str] = &["đau", "chấn thương", "hạn chế", "không thể", "tránh"];

const DIET_KEYWORDS: &[&str] = &[
    "ăn chay",
    "eat clean",
    "ít carb",
    "đạm cao",
    "thuần chay",
    "keto",
    "mediterranean",
];

/// Word that marks an age statement ("23 tuổi")
const AGE_WORD: &str = "tuổi";

/// Two or three digits followed by a weight unit ("65kg", "70 kg")
static WEIGHT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b\d{2,3}\s?(kg|kilô|kgm?)\b").ok());

/// Three digits followed by centimetres ("170cm", "150 cm")
static HEIGHT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b\d{3}\s?cm\b").ok());

/// Decides whether one lowercased message supplies a field
pub trait FieldDetector: Send + Sync {
    /// Field this detector answers for
    fn field(&self) -> Field;

    /// Whether `text` (already lowercased) supplies the field
    fn detect(&self, text: &str) -> bool;
}

/// Substring detector over a fixed keyword list
#[derive(Debug, Clone, Copy)]
pub struct KeywordDetector {
    field: Field,
    keywords: &'static [&'static str],
}

impl KeywordDetector {
    /// Create a detector that fires when any keyword occurs in the text
    #[must_use]
    pub const fn new(field: Field, keywords: &'static [&'static str]) -> Self {
        Self { field, keywords }
    }
}

impl FieldDetector for KeywordDetector {
    fn field(&self) -> Field {
        self.field
    }

    fn detect(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }
}

/// Detector for weight, height, or age mentions
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyMetricsDetector;

impl FieldDetector for BodyMetricsDetector {
    fn field(&self) -> Field {
        Field::BodyMetrics
    }

    fn detect(&self, text: &str) -> bool {
        let matches = |pattern: &LazyLock<Option<Regex>>| {
            pattern.as_ref().is_some_and(|regex| regex.is_match(text))
        };
        matches(&WEIGHT_PATTERN) || matches(&HEIGHT_PATTERN) || text.contains(AGE_WORD)
    }
}

/// Computes the missing-field set of a conversation
///
/// Holds exactly one detector per [`Field`].
pub struct FieldExtractor {
    detectors: Vec<Box<dyn FieldDetector>>,
}

impl FieldExtractor {
    /// Extractor with the default keyword and body-metric heuristics
    #[must_use]
    pub fn new() -> Self {
        Self {
            detectors: vec![
                Box::new(KeywordDetector::new(Field::Goal, GOAL_KEYWORDS)),
                Box::new(KeywordDetector::new(Field::Experience, EXPERIENCE_KEYWORDS)),
                Box::new(KeywordDetector::new(Field::Equipment, EQUIPMENT_KEYWORDS)),
                Box::new(KeywordDetector::new(Field::Schedule, SCHEDULE_KEYWORDS)),
                Box::new(KeywordDetector::new(Field::Limitations, LIMITATION_KEYWORDS)),
                Box::new(KeywordDetector::new(Field::Diet, DIET_KEYWORDS)),
                Box::new(BodyMetricsDetector),
            ],
        }
    }

    /// Replace the detector for `detector.field()`
    #[must_use]
    pub fn with_detector(mut self, detector: Box<dyn FieldDetector>) -> Self {
        let field = detector.field();
        self.detectors.retain(|existing| existing.field() != field);
        self.detectors.push(detector);
        self
    }

    /// Fields not supplied by any user message, in [`Field::ALL`] order
    ///
    /// A field stays present once any message supplies it; later messages
    /// cannot take information back.
    #[must_use]
    pub fn missing_fields(&self, conversation: &[ChatMessage]) -> Vec<Field> {
        let mut present = [false; Field::ALL.len()];

        for text in user_texts(conversation) {
            for detector in &self.detectors {
                let slot = &mut present[detector.field() as usize];
                if !*slot && detector.detect(&text) {
                    *slot = true;
                }
            }
        }

        Field::ALL
            .into_iter()
            .filter(|field| !present[*field as usize])
            .collect()
    }
}

impl fmt::Debug for FieldExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldExtractor")
            .field(
                "fields",
                &self.detectors.iter().map(|d| d.field()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_EXTRACTOR: LazyLock<FieldExtractor> = LazyLock::new(FieldExtractor::new);

/// Missing-field set using the default detectors
#[must_use]
pub fn evaluate_missing_fields(conversation: &[ChatMessage]) -> Vec<Field> {
    DEFAULT_EXTRACTOR.missing_fields(conversation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_metrics(text: &str) -> bool {
        BodyMetricsDetector.detect(&text.to_lowercase())
    }

    #[test]
    fn test_body_metrics_detection() {
        assert!(body_metrics("nặng 65kg"));
        assert!(body_metrics("23 tuổi"));
        assert!(body_metrics("150cm"));
        assert!(body_metrics("cao 172 cm"));
        assert!(body_metrics("70 kg"));
        assert!(!body_metrics("không có gì"));
        assert!(!body_metrics("1m70"));
        assert!(!body_metrics("5kg"));
    }

    #[test]
    fn test_field_order_matches_discriminants() {
        for (index, field) in Field::ALL.into_iter().enumerate() {
            assert_eq!(field as usize, index);
        }
    }

    #[test]
    fn test_empty_conversation_misses_everything() {
        assert_eq!(evaluate_missing_fields(&[]), Field::ALL.to_vec());
    }

    #[test]
    fn test_assistant_messages_are_ignored() {
        let conversation = vec![
            ChatMessage::assistant("Bạn muốn tăng cơ hay giảm mỡ? Bạn nặng bao nhiêu kg, 23 tuổi?"),
            ChatMessage::user("xin chào"),
        ];
        assert_eq!(evaluate_missing_fields(&conversation), Field::ALL.to_vec());
    }

    #[test]
    fn test_uppercase_text_is_matched() {
        let conversation = vec![ChatMessage::user("Mình muốn TĂNG CƠ, là BEGINNER")];
        let missing = evaluate_missing_fields(&conversation);
        assert!(!missing.contains(&Field::Goal));
        assert!(!missing.contains(&Field::Experience));
    }

    #[test]
    fn test_with_detector_replaces_single_field() {
        struct Never;
        impl FieldDetector for Never {
            fn field(&self) -> Field {
                Field::Goal
            }
            fn detect(&self, _text: &str) -> bool {
                false
            }
        }

        let extractor = FieldExtractor::new().with_detector(Box::new(Never));
        let missing = extractor.missing_fields(&[ChatMessage::user("tăng cơ, keto")]);
        assert!(missing.contains(&Field::Goal));
        assert!(!missing.contains(&Field::Diet));
    }
}
