// ABOUTME: Vietnamese user-facing messages for validation failures and upstream quota apologies
// ABOUTME: Kept in one place so handlers and tests agree on the exact wording
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Validation

/// Chat message with blank content
pub const EMPTY_MESSAGE_CONTENT: &str = "Nội dung tin nhắn không được để trống.";

/// Chat request with no messages at all
pub const EMPTY_CONVERSATION: &str = "Cuộc trò chuyện phải có ít nhất một tin nhắn.";

/// Request body that could not be decoded
pub const MALFORMED_REQUEST: &str = "Dữ liệu yêu cầu không hợp lệ";

/// Multipart upload without an `image` part
pub const MISSING_IMAGE: &str = "Thiếu ảnh bữa ăn.";

/// Image content type outside the allow-list
pub const UNSUPPORTED_IMAGE_TYPE: &str = "Định dạng ảnh không được hỗ trợ. Hãy dùng JPG, PNG hoặc WebP.";

/// Zero-byte image
pub const EMPTY_IMAGE: &str = "Không nhận được dữ liệu ảnh.";

/// Image above the size limit
pub const IMAGE_TOO_LARGE: &str = "Ảnh vượt quá giới hạn 8MB, vui lòng nén hoặc chụp lại.";

/// Clarification text under the character minimum
pub const CLARIFICATION_TOO_SHORT: &str = "Thông tin khẩu phần cần tối thiểu 10 ký tự.";

/// Clarification text under the word minimum
pub const CLARIFICATION_NOT_DETAILED: &str =
    "Vui lòng mô tả chi tiết khẩu phần trước khi tính dinh dưỡng.";

/// Blank clarification reaching the gateway
pub const CLARIFICATION_MISSING: &str = "Thiếu thông tin khẩu phần để hoàn tất.";

// Upstream

/// Prefix for a missing model credential
pub const GATEWAY_NOT_CONFIGURED_PREFIX: &str = "Gemini chưa được cấu hình: ";

/// Prefix for a failed chat call
pub const CHAT_FAILED_PREFIX: &str = "Lỗi khi gọi Gemini: ";

/// Prefix for a failed meal analysis
pub const MEAL_ANALYSIS_FAILED_PREFIX: &str = "Lỗi khi phân tích bữa ăn: ";

/// Prefix for a failed meal finalisation
pub const MEAL_FINALIZE_FAILED_PREFIX: &str = "Lỗi khi tính dinh dưỡng: ";

/// Prefix for the last non-quota failure after every model was tried
pub const GATEWAY_FAILED_PREFIX: &str = "Lỗi Gemini: ";

// Quota apologies (sent with HTTP 200)

/// Chat quota apology
pub const CHAT_QUOTA_APOLOGY: &str = "Máy chủ tạm thời hết hạn mức Gemini. Bạn vui lòng chờ ít phút hoặc cấu hình API key còn hạn để mình có thể tiếp tục hỗ trợ nhé!";

/// Meal analysis quota apology
pub const MEAL_ANALYSIS_QUOTA_APOLOGY: &str = "Hiện hệ thống hết hạn mức xử lý ảnh từ Gemini. Vui lòng thử lại sau ít phút hoặc thay khóa API khác để tiếp tục phân tích bữa ăn.";

/// Meal finalisation quota apology
pub const MEAL_FINALIZE_QUOTA_APOLOGY: &str = "Máy chủ hết hạn mức tính toán dinh dưỡng trên Gemini. Hãy chờ hệ thống làm mới quota hoặc dùng API key khác rồi yêu cầu lại giúp mình nhé.";
