//! Classification rules: code → category, severity, HTTP status, retryability.
//!
//! All rules are pure and total. Every code of the vocabulary has an explicit
//! HTTP status; category and severity fall back to family and `Medium`
//! respectively when a code has no explicit entry.

use super::codes::{ErrorCode, ErrorFamily};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Coarse grouping of an error for routing and dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    Validation,
    Auth,
    System,
    Ai,
    Media,
    Billing,
    RateLimit,
}

/// Operational urgency of an error or of a single content violation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// Everything the classification rules derive from a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub http_status: u16,
}

impl ErrorFamily {
    /// Category implied by the family, if the family has one of its own.
    ///
    /// Tool and conversation codes have no dedicated category.
    pub const fn category(self) -> Option<ErrorCategory> {
        match self {
            Self::Ai => Some(ErrorCategory::Ai),
            Self::Media => Some(ErrorCategory::Media),
            Self::Validation => Some(ErrorCategory::Validation),
            Self::System => Some(ErrorCategory::System),
            Self::RateLimit => Some(ErrorCategory::RateLimit),
            Self::Auth => Some(ErrorCategory::Auth),
            Self::Billing => Some(ErrorCategory::Billing),
            Self::Tool | Self::Conversation => None,
        }
    }

    /// HTTP status used for codes without an explicit status entry.
    pub const fn fallback_http_status(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::Auth => 401,
            Self::RateLimit => 429,
            _ => 500,
        }
    }
}

impl ErrorCode {
    /// Category implied by the family; Tool and Conversation codes are `System`.
    pub fn category(self) -> ErrorCategory {
        self.family().category().unwrap_or(ErrorCategory::System)
    }

    pub fn severity(self) -> ErrorSeverity {
        match self {
            Self::SysInternalError
            | Self::SysDatabaseError
            | Self::AuthUnauthorized
            | Self::AuthForbidden => ErrorSeverity::Critical,

            Self::AiViolationChildSafety
            | Self::AiViolationPersonalInfo
            | Self::BillInsufficientCredits
            | Self::SysServiceUnavailable => ErrorSeverity::High,

            Self::ValInvalidParameter | Self::ValMissingParameter | Self::RateLimitExceeded => {
                ErrorSeverity::Low
            }

            _ => ErrorSeverity::Medium,
        }
    }

    pub fn http_status(self) -> u16 {
        match self {
            // 400 Bad Request
            Self::ValInvalidRequest
            | Self::ValMissingParameter
            | Self::ValInvalidParameter
            | Self::ValInvalidFormat
            | Self::ValOutOfRange
            | Self::ValStringTooShort
            | Self::ValStringTooLong
            | Self::ValArrayTooLong
            | Self::ValInvalidEnum
            | Self::ValInvalidUrl
            | Self::ValDependencyMissing
            | Self::ValMutuallyExclusive
            | Self::MediaInvalidDimensions
            | Self::MediaInvalidAspectRatio
            | Self::MediaInvalidDuration
            | Self::MediaInvalidFrameRate
            | Self::AiContextLengthExceeded
            | Self::ToolInvalidParams => 400,

            // 401 Unauthorized
            Self::AuthUnauthorized | Self::AuthInvalidToken | Self::AuthTokenExpired => 401,

            // 402 Payment Required
            Self::BillInsufficientCredits
            | Self::BillPaymentRequired
            | Self::BillSubscriptionExpired => 402,

            // 403 Forbidden
            Self::AuthForbidden
            | Self::AiViolationChildSafety
            | Self::AiViolationCelebrity
            | Self::AiViolationViolence
            | Self::AiViolationSexual
            | Self::AiViolationHateSpeech
            | Self::AiViolationPersonalInfo
            | Self::AiViolationToxic
            | Self::AiViolationDangerous
            | Self::AiViolationProhibited
            | Self::AiViolationVulgar
            | Self::AiViolationOther => 403,

            // 404 Not Found
            Self::ToolNotFound | Self::ConvNotFound | Self::ConvMessageNotFound => 404,

            // 413 Payload Too Large
            Self::MediaSizeTooLarge | Self::ConvMessageTooLong => 413,

            // 422 Unprocessable Entity
            Self::MediaUnsupportedFormat | Self::MediaCorrupted | Self::AiInvalidModel => 422,

            // 429 Too Many Requests
            Self::RateLimitExceeded | Self::RateQuotaExceeded => 429,

            // 500 Internal Server Error
            Self::SysInternalError
            | Self::AiGenerationFailed
            | Self::AiOperationFailed
            | Self::MediaProcessingFailed
            | Self::ToolExecutionFailed
            | Self::SysDatabaseError
            | Self::SysStorageError => 500,

            // 502 Bad Gateway
            Self::SysNetworkError => 502,

            // 503 Service Unavailable
            Self::SysServiceUnavailable | Self::AiModelUnavailable | Self::AiModelOverloaded => 503,

            // 504 Gateway Timeout
            Self::SysTimeout | Self::ToolTimeout => 504,
        }
    }

    /// Whether failures of this class are transient by nature.
    ///
    /// Retryability belongs to the failure class, not to the HTTP status:
    /// `TOOL_TIMEOUT` (504) and `RATE_QUOTA_EXCEEDED` (429) are not retryable.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::SysServiceUnavailable
                | Self::SysTimeout
                | Self::SysNetworkError
                | Self::AiModelOverloaded
                | Self::AiModelUnavailable
                | Self::RateLimitExceeded
        )
    }

    pub fn classify(self) -> Classification {
        Classification {
            category: self.category(),
            severity: self.severity(),
            http_status: self.http_status(),
        }
    }
}

/// Classify a known code.
pub fn classify(code: ErrorCode) -> Classification {
    code.classify()
}

/// Classify a code received as text, possibly from a newer vocabulary.
///
/// Known codes classify exactly as [`classify`]. Unknown codes degrade to the
/// family inferred from their prefix (category and HTTP status), `Medium`
/// severity, and `System`/500 when no family matches.
pub fn classify_raw(code: &str) -> Classification {
    if let Ok(known) = code.parse::<ErrorCode>() {
        return known.classify();
    }

    let family = ErrorFamily::from_code_str(code);
    Classification {
        category: family
            .and_then(ErrorFamily::category)
            .unwrap_or(ErrorCategory::System),
        severity: ErrorSeverity::Medium,
        http_status: family.map_or(500, ErrorFamily::fallback_http_status),
    }
}

/// Whether a code is retryable by default. See [`ErrorCode::is_retryable`].
pub fn is_retryable_code(code: ErrorCode) -> bool {
    code.is_retryable()
}
