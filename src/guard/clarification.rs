// ABOUTME: Clarification Composer turning missing plan fields into one user-facing request
// ABOUTME: Fixed lead-in, one bullet per missing field label, fixed closing sentence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::fields::Field;

const LEAD_IN: &str =
    "Để mình cá nhân hóa kế hoạch chuẩn xác và tránh đoán mò, mình cần bạn bổ sung:";

const CLOSING: &str =
    "Hãy trả lời từng mục, mình sẽ tiếp tục tư vấn ngay sau khi nhận đủ thông tin nhé!";

/// Prefix of each bullet line
pub const BULLET_PREFIX: &str = "- ";

/// Compose the clarification text for `missing`
///
/// Returns an empty string when nothing is missing. Output is a pure
/// function of the input sequence.
#[must_use]
pub fn build_clarification_prompt(missing: &[Field]) -> String {
    if missing.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(missing.len() + 2);
    lines.push(LEAD_IN.to_owned());
    lines.extend(
        missing
            .iter()
            .map(|field| format!("{BULLET_PREFIX}{}", field.label())),
    );
    lines.push(CLOSING.to_owned());
    lines.join("\n")
}
