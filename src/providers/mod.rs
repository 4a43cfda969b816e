//! Upstream provider error normalizers
//!
//! Each normalizer translates one vendor's `{type, code, message}` error triple
//! into the canonical [`ErrorCode`] vocabulary:
//!
//! - **openai**: OpenAI API errors (`rate_limit_exceeded`, `invalid_request_error`, ...)
//! - **vertex**: Vertex AI errors (numeric safety codes and gRPC status names)
//!
//! ## Precedence
//!
//! Every normalizer walks the same four stages and stops at the first hit:
//!
//! ```text
//! vendor code table  ->  vendor type table  ->  message keywords  ->  AI_GENERATION_FAILED
//! ```
//!
//! Retryability is a separate, vendor-specific predicate. The two vendors'
//! lists differ and are not derived from the canonical code.

pub mod openai;
pub mod vertex;

pub use openai::OpenAiNormalizer;
pub use vertex::VertexNormalizer;

use crate::config::ContractsConfig;
use crate::core_types::ErrorCode;
use crate::error::ServiceError;
use crate::logging::log_debug;
use strum::{Display, IntoStaticStr};

/// Which precedence stage produced a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum MatchStage {
    Code,
    Type,
    Message,
    Default,
}

/// Keyword rule for the message stage: any keyword hit selects `code`.
pub(crate) struct KeywordRule {
    pub keywords: &'static [&'static str],
    pub code: ErrorCode,
}

/// First rule (in table order) with a keyword contained in `lowered`.
pub(crate) fn match_keywords(lowered: &str, rules: &[KeywordRule]) -> Option<ErrorCode> {
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|rule| rule.code)
}

/// Adapter from one upstream vendor's error shape to the canonical vocabulary.
///
/// Both operations are pure and total: any input, including empty strings,
/// yields a code and a boolean.
pub trait ProviderNormalizer: Send + Sync {
    /// Provider name recorded in error metadata (`openai`, `vertex`).
    fn name(&self) -> &'static str;

    /// Map a vendor error and report which stage matched.
    fn normalize(&self, error_type: &str, error_code: &str, message: &str)
        -> (ErrorCode, MatchStage);

    /// Vendor-specific retry predicate.
    fn is_retryable(&self, error_type: &str, error_code: &str) -> bool;

    /// Map a vendor error to a canonical code.
    fn map_error(&self, error_type: &str, error_code: &str, message: &str) -> ErrorCode {
        let (code, stage) = self.normalize(error_type, error_code, message);
        log_debug!(
            provider = self.name(),
            stage = %stage,
            vendor_type = error_type,
            vendor_code = error_code,
            error_code = %code,
            "Provider error normalized"
        );
        code
    }

    /// Build the canonical error for a vendor failure.
    ///
    /// Retryability follows [`is_retryable`](Self::is_retryable). The vendor's
    /// message becomes cause text only; the vendor payload itself is never
    /// carried as structured data.
    fn to_service_error(
        &self,
        service: &str,
        error_type: &str,
        error_code: &str,
        message: &str,
    ) -> ServiceError {
        let code = self.map_error(error_type, error_code, message);
        let retryable = self.is_retryable(error_type, error_code);
        let vendor_code = if error_code.is_empty() {
            error_type
        } else {
            error_code
        };

        let text = if message.is_empty() {
            format!("{} request failed", self.name())
        } else {
            format!("{} error: {}", self.name(), message)
        };

        let err = ServiceError::new(code, text, service, retryable)
            .with_provider(self.name(), vendor_code);
        if message.is_empty() {
            err
        } else {
            err.with_cause_message(message)
        }
    }
}

/// Normalize a vendor failure into an error stamped with `config.service_name`.
pub fn normalize_with(
    config: &ContractsConfig,
    normalizer: &dyn ProviderNormalizer,
    error_type: &str,
    error_code: &str,
    message: &str,
) -> ServiceError {
    normalizer.to_service_error(&config.service_name, error_type, error_code, message)
}
