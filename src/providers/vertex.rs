//! Vertex AI error normalizer
//!
//! Vertex reports safety blocks as numeric support codes (`58061214` and
//! neighbours) and everything else as gRPC status names. Its message keywords
//! include a celebrity/public-figure rule that OpenAI has no equivalent for.

use super::{match_keywords, KeywordRule, MatchStage, ProviderNormalizer};
use crate::core_types::ErrorCode;

/// Normalizer for Vertex AI (Imagen, Veo, Gemini, Lyria) errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexNormalizer;

pub const CHILD_SAFETY: &str = "58061214";
pub const CELEBRITY: &str = "58061215";
pub const VIOLENCE: &str = "58061216";
pub const SEXUAL_CONTENT: &str = "58061217";
pub const HATE_SPEECH: &str = "58061218";
pub const DANGEROUS_CONTENT: &str = "58061219";

// Only codes decide retryability for Vertex; types never do.
const RETRYABLE_CODES: [&str; 6] = [
    "RESOURCE_EXHAUSTED",
    "RATE_LIMIT_EXCEEDED",
    "MODEL_OVERLOADED",
    "UNAVAILABLE",
    "DEADLINE_EXCEEDED",
    "INTERNAL",
];

const MESSAGE_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["child"],
        code: ErrorCode::AiViolationChildSafety,
    },
    KeywordRule {
        keywords: &["celebrity", "public figure"],
        code: ErrorCode::AiViolationCelebrity,
    },
    KeywordRule {
        keywords: &["violent", "violence"],
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
        keywords: &["quota", "limit"],
        code: ErrorCode::RateQuotaExceeded,
    },
    KeywordRule {
        keywords: &["overload", "capacity"],
        code: ErrorCode::AiModelOverloaded,
    },
];

impl VertexNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Two-argument form for callers that only see `{code, message}`.
    pub fn map_code(&self, error_code: &str, message: &str) -> ErrorCode {
        self.map_error("", error_code, message)
    }

    fn lookup_code(code: &str) -> Option<ErrorCode> {
        let mapped = match code {
            CHILD_SAFETY => ErrorCode::AiViolationChildSafety,
            CELEBRITY => ErrorCode::AiViolationCelebrity,
            VIOLENCE => ErrorCode::AiViolationViolence,
            SEXUAL_CONTENT => ErrorCode::AiViolationSexual,
            HATE_SPEECH => ErrorCode::AiViolationHateSpeech,
            DANGEROUS_CONTENT => ErrorCode::AiViolationDangerous,
            "RESOURCE_EXHAUSTED" | "RATE_LIMIT_EXCEEDED" => ErrorCode::RateQuotaExceeded,
            "MODEL_OVERLOADED" => ErrorCode::AiModelOverloaded,
            "INVALID_ARGUMENT" => ErrorCode::ValInvalidRequest,
            "REQUEST_TOO_LARGE" => ErrorCode::AiContextLengthExceeded,
            "INTERNAL" => ErrorCode::SysInternalError,
            "UNAVAILABLE" => ErrorCode::SysServiceUnavailable,
            "DEADLINE_EXCEEDED" => ErrorCode::SysTimeout,
            _ => return None,
        };
        Some(mapped)
    }

    /// gRPC status names as reported in `error.status`.
    fn lookup_type(status: &str) -> Option<ErrorCode> {
        let mapped = match status {
            "INVALID_ARGUMENT" => ErrorCode::ValInvalidRequest,
            "UNAUTHENTICATED" => ErrorCode::AuthUnauthorized,
            "PERMISSION_DENIED" => ErrorCode::AuthForbidden,
            "NOT_FOUND" => ErrorCode::AiInvalidModel,
            "RESOURCE_EXHAUSTED" => ErrorCode::RateQuotaExceeded,
            "UNAVAILABLE" => ErrorCode::SysServiceUnavailable,
            "DEADLINE_EXCEEDED" => ErrorCode::SysTimeout,
            "INTERNAL" => ErrorCode::SysInternalError,
            _ => return None,
        };
        Some(mapped)
    }
}

impl ProviderNormalizer for VertexNormalizer {
    fn name(&self) -> &'static str {
        "vertex"
    }

    fn normalize(
        &self,
        error_type: &str,
        error_code: &str,
        message: &str,
    ) -> (ErrorCode, MatchStage) {
        if let Some(code) = Self::lookup_code(error_code) {
            return (code, MatchStage::Code);
        }
        if let Some(code) = Self::lookup_type(error_type) {
            return (code, MatchStage::Type);
        }
        if let Some(code) = match_keywords(&message.to_lowercase(), MESSAGE_RULES) {
            return (code, MatchStage::Message);
        }
        (ErrorCode::AiGenerationFailed, MatchStage::Default)
    }

    fn is_retryable(&self, _error_type: &str, error_code: &str) -> bool {
        RETRYABLE_CODES.contains(&error_code)
    }
}
