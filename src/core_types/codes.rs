//! The closed error-code vocabulary shared by every Latent service.
//!
//! Each [`ErrorCode`] is declared inside exactly one [`ErrorFamily`] block of the
//! `error_codes!` table below. The family is stored with the code at the point
//! of definition, so classification never has to parse the code's text.
//!
//! The wire form of a code is its `SCREAMING_SNAKE_CASE` name, e.g.
//! `AI_VIOLATION_CHILD_SAFETY`. The textual prefix of that name matches the
//! family prefix, which is what lets [`ErrorFamily::from_code_str`] place codes
//! coming from services built against a newer vocabulary.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Family (prefix group) an error code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum ErrorFamily {
    /// `AI_*`: content violations and model/generation failures.
    Ai,
    /// `MEDIA_*`: media input validation and processing.
    Media,
    /// `VAL_*`: request and parameter validation.
    Validation,
    /// `SYS_*`: infrastructure failures.
    System,
    /// `RATE_*`: rate limits and quotas.
    RateLimit,
    /// `AUTH_*`: authentication and authorization.
    Auth,
    /// `BILL_*`: credits and payments.
    Billing,
    /// `TOOL_*`: tool lookup and execution.
    Tool,
    /// `CONV_*`: conversations and messages.
    Conversation,
}

impl ErrorFamily {
    /// Wire prefix shared by every code of this family.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Ai => "AI_",
            Self::Media => "MEDIA_",
            Self::Validation => "VAL_",
            Self::System => "SYS_",
            Self::RateLimit => "RATE_",
            Self::Auth => "AUTH_",
            Self::Billing => "BILL_",
            Self::Tool => "TOOL_",
            Self::Conversation => "CONV_",
        }
    }

    /// Infer the family of a raw code string by its prefix.
    ///
    /// Only needed for codes that are not part of this build's vocabulary;
    /// known codes carry their family directly.
    pub fn from_code_str(code: &str) -> Option<Self> {
        use strum::IntoEnumIterator;
        Self::iter().find(|family| code.starts_with(family.prefix()))
    }
}

macro_rules! error_codes {
    ($(
        $family:ident => {
            $( $(#[$meta:meta])* $variant:ident ),+ $(,)?
        }
    )+) => {
        /// Canonical error code.
        ///
        /// Serializes (serde) and formats (`Display`, `FromStr`) as its wire
        /// string, e.g. `RATE_LIMIT_EXCEEDED`.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            Serialize, Deserialize, EnumIter, EnumString, IntoStaticStr, Display, AsRefStr,
        )]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        #[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
        pub enum ErrorCode {
            $($( $(#[$meta])* $variant, )+)+
        }

        impl ErrorCode {
            /// The family this code was declared in.
            pub const fn family(self) -> ErrorFamily {
                match self {
                    $($( Self::$variant => ErrorFamily::$family, )+)+
                }
            }
        }
    };
}

error_codes! {
    Ai => {
        /// Content depicts or relates to minors.
        AiViolationChildSafety,
        /// Photorealistic depiction of a public figure.
        AiViolationCelebrity,
        /// Violent or harmful content.
        AiViolationViolence,
        /// Sexual or adult content.
        AiViolationSexual,
        /// Hate speech or discriminatory content.
        AiViolationHateSpeech,
        /// Personally identifiable information.
        AiViolationPersonalInfo,
        /// Toxic language.
        AiViolationToxic,
        /// Potentially dangerous content (self-harm, weapons).
        AiViolationDangerous,
        /// Other prohibited content.
        AiViolationProhibited,
        /// Vulgar or inappropriate content.
        AiViolationVulgar,
        /// Content violation of an unrecognized kind.
        AiViolationOther,
        /// Requested model is not currently available.
        AiModelUnavailable,
        /// Model is at capacity.
        AiModelOverloaded,
        /// Input exceeds the model's context window.
        AiContextLengthExceeded,
        /// Generation failed for an unspecified reason.
        AiGenerationFailed,
        /// Long-running provider operation failed.
        AiOperationFailed,
        /// Model name or version is invalid.
        AiInvalidModel,
    }
    Media => {
        MediaInvalidDimensions,
        MediaInvalidAspectRatio,
        MediaInvalidDuration,
        MediaInvalidFrameRate,
        MediaUnsupportedFormat,
        MediaSizeTooLarge,
        MediaProcessingFailed,
        MediaCorrupted,
    }
    Validation => {
        /// Malformed request structure.
        ValInvalidRequest,
        /// A required parameter is absent.
        ValMissingParameter,
        /// A parameter value is invalid.
        ValInvalidParameter,
        /// A value could not be decoded into the expected type.
        ValInvalidFormat,
        /// A numeric value (or item count) is outside its bounds.
        ValOutOfRange,
        ValStringTooShort,
        ValStringTooLong,
        ValArrayTooLong,
        /// Value is not one of the allowed enumeration members.
        ValInvalidEnum,
        ValInvalidUrl,
        /// A parameter is required because another one is absent.
        ValDependencyMissing,
        /// Cross-field rule: fields conflict, or none of an either/or set is present.
        ValMutuallyExclusive,
    }
    System => {
        SysInternalError,
        SysServiceUnavailable,
        SysTimeout,
        SysNetworkError,
        SysDatabaseError,
        SysStorageError,
    }
    RateLimit => {
        RateLimitExceeded,
        RateQuotaExceeded,
    }
    Auth => {
        /// Missing or invalid authentication.
        AuthUnauthorized,
        /// Authenticated but not allowed.
        AuthForbidden,
        AuthTokenExpired,
        AuthInvalidToken,
    }
    Billing => {
        BillInsufficientCredits,
        BillPaymentRequired,
        BillSubscriptionExpired,
    }
    Tool => {
        ToolNotFound,
        ToolExecutionFailed,
        ToolTimeout,
        ToolInvalidParams,
    }
    Conversation => {
        ConvNotFound,
        ConvMessageNotFound,
        ConvMessageTooLong,
    }
}

impl ErrorCode {
    /// Wire string of this code.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Whether this code is one of the content-policy violation codes.
    pub fn is_content_violation(self) -> bool {
        matches!(
            self,
            Self::AiViolationChildSafety
                | Self::AiViolationCelebrity
                | Self::AiViolationViolence
                | Self::AiViolationSexual
                | Self::AiViolationHateSpeech
                | Self::AiViolationPersonalInfo
                | Self::AiViolationToxic
                | Self::AiViolationDangerous
                | Self::AiViolationProhibited
                | Self::AiViolationVulgar
                | Self::AiViolationOther
        )
    }

    /// Map a violation type label (`CHILD_SAFETY`, `VIOLENCE`, ...) to its code.
    ///
    /// Unrecognized labels map to [`ErrorCode::AiViolationOther`].
    pub fn from_violation_type(violation_type: &str) -> Self {
        match violation_type {
            "CHILD_SAFETY" => Self::AiViolationChildSafety,
            "CELEBRITY" => Self::AiViolationCelebrity,
            "VIOLENCE" => Self::AiViolationViolence,
            "SEXUAL" => Self::AiViolationSexual,
            "HATE_SPEECH" => Self::AiViolationHateSpeech,
            "PERSONAL_INFO" => Self::AiViolationPersonalInfo,
            "TOXIC" => Self::AiViolationToxic,
            "DANGEROUS" => Self::AiViolationDangerous,
            "PROHIBITED" => Self::AiViolationProhibited,
            "VULGAR" => Self::AiViolationVulgar,
            _ => Self::AiViolationOther,
        }
    }
}
