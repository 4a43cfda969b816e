//! OpenAI error normalizer
//!
//! OpenAI reports errors as `{ "error": { "type", "code", "message" } }`.
//! Codes are the most precise signal, types come next, and the free-text
//! message is scanned only when neither is recognized.

use super::{match_keywords, KeywordRule, MatchStage, ProviderNormalizer};
use crate::core_types::ErrorCode;

/// Normalizer for OpenAI API errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiNormalizer;

const CONTENT_POLICY_CODES: [&str; 2] = ["content_policy_violation", "content_filter"];

const RETRYABLE_CODES: [&str; 5] = [
    "rate_limit_exceeded",
    "engine_overloaded",
    "server_error",
    "service_unavailable",
    "timeout",
];

const RETRYABLE_TYPES: [&str; 4] = [
    "rate_limit_error",
    "api_connection_error",
    "timeout_error",
    "server_error",
];

// Order matters: the content sub-classifier runs only after these miss.
const MESSAGE_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["rate limit"],
        code: ErrorCode::RateLimitExceeded,
    },
    KeywordRule {
        keywords: &["quota"],
        code: ErrorCode::RateQuotaExceeded,
    },
    KeywordRule {
        keywords: &["context", "token"],
        code: ErrorCode::AiContextLengthExceeded,
    },
];

const CONTENT_KEYWORDS: [&str; 2] = ["content", "policy"];

const VIOLATION_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["child", "minor"],
        code: ErrorCode::AiViolationChildSafety,
    },
    KeywordRule {
        keywords: &["violence", "violent"],
        code: ErrorCode::AiViolationViolence,
    },
    KeywordRule {
        keywords: &["sexual", "adult"],
        code: ErrorCode::AiViolationSexual,
    },
    KeywordRule {
        keywords: &["hate", "discriminat"],
        code: ErrorCode::AiViolationHateSpeech,
    },
    KeywordRule {
        keywords: &["self-harm", "dangerous"],
        code: ErrorCode::AiViolationDangerous,
    },
    KeywordRule {
        keywords: &["personal", "pii"],
        code: ErrorCode::AiViolationPersonalInfo,
    },
];

impl OpenAiNormalizer {
    pub fn new() -> Self {
        Self
    }

    fn map_code(code: &str) -> Option<ErrorCode> {
        let mapped = match code {
            "rate_limit_exceeded" => ErrorCode::RateLimitExceeded,
            "insufficient_quota" => ErrorCode::RateQuotaExceeded,
            "model_not_found" => ErrorCode::AiInvalidModel,
            "engine_overloaded" => ErrorCode::AiModelOverloaded,
            "invalid_request_error" => ErrorCode::ValInvalidRequest,
            "context_length_exceeded" | "max_tokens_exceeded" => {
                ErrorCode::AiContextLengthExceeded
            }
            "server_error" => ErrorCode::SysInternalError,
            "service_unavailable" => ErrorCode::SysServiceUnavailable,
            "timeout" => ErrorCode::SysTimeout,
            _ => return None,
        };
        Some(mapped)
    }

    fn map_type(error_type: &str) -> Option<ErrorCode> {
        let mapped = match error_type {
            "invalid_request_error" => ErrorCode::ValInvalidRequest,
            "authentication_error" => ErrorCode::AuthUnauthorized,
            "permission_error" => ErrorCode::AuthForbidden,
            "not_found_error" => ErrorCode::AiInvalidModel,
            "rate_limit_error" => ErrorCode::RateLimitExceeded,
            "api_connection_error" => ErrorCode::SysNetworkError,
            "timeout_error" => ErrorCode::SysTimeout,
            _ => return None,
        };
        Some(mapped)
    }

    /// Content-policy sub-classifier; unmatched messages map to `AI_VIOLATION_OTHER`.
    pub fn content_violation(message: &str) -> ErrorCode {
        match_keywords(&message.to_lowercase(), VIOLATION_RULES)
            .unwrap_or(ErrorCode::AiViolationOther)
    }

    fn map_message(message: &str) -> Option<ErrorCode> {
        let lowered = message.to_lowercase();
        if let Some(code) = match_keywords(&lowered, MESSAGE_RULES) {
            return Some(code);
        }
        if CONTENT_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            return Some(Self::content_violation(message));
        }
        None
    }
}

impl ProviderNormalizer for OpenAiNormalizer {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn normalize(
        &self,
        error_type: &str,
        error_code: &str,
        message: &str,
    ) -> (ErrorCode, MatchStage) {
        if CONTENT_POLICY_CODES.contains(&error_code) {
            return (Self::content_violation(message), MatchStage::Code);
        }
        if let Some(code) = Self::map_code(error_code) {
            return (code, MatchStage::Code);
        }
        if let Some(code) = Self::map_type(error_type) {
            return (code, MatchStage::Type);
        }
        if let Some(code) = Self::map_message(message) {
            return (code, MatchStage::Message);
        }
        (ErrorCode::AiGenerationFailed, MatchStage::Default)
    }

    fn is_retryable(&self, error_type: &str, error_code: &str) -> bool {
        RETRYABLE_CODES.contains(&error_code) || RETRYABLE_TYPES.contains(&error_type)
    }
}
