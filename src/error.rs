//! The canonical cross-service error value.
//!
//! Every failure that leaves this crate is a [`ServiceError`]: a stable
//! machine-readable [`ErrorCode`], a human-readable message, and the
//! classification derived from the code (category, severity, HTTP status).
//!
//! # Construction
//!
//! [`ServiceError::new`] classifies the code once and stamps the current time.
//! Optional attributes are attached through consuming `with_*` builders, which
//! are the only way to touch metadata or override the derived classification:
//!
//! ```rust
//! use latent_contracts::{ErrorCode, ServiceError};
//! use std::time::Duration;
//!
//! let err = ServiceError::new(ErrorCode::RateLimitExceeded, "Slow down", "media-ai", true)
//!     .with_request_id("req-42")
//!     .with_retry_after(Duration::from_secs(30));
//!
//! assert_eq!(err.http_status(), 429);
//! assert!(err.is_retryable());
//! ```
//!
//! # Wire format
//!
//! Serializes as a flat JSON object with `code, message, service, http_status,
//! category, severity, retryable, occurred_at` and the optional
//! `request_id, job_id, user_id, cause, metadata`. The wrapped cause is never
//! serialized structurally; only its text survives as `cause`.
//!
//! # Result Type
//!
//! Use [`ServiceResult<T>`] as the alias for `Result<T, ServiceError>`:
//!
//! ```rust
//! use latent_contracts::{ServiceError, ServiceResult};
//!
//! fn require_prompt(prompt: &str) -> ServiceResult<&str> {
//!     if prompt.is_empty() {
//!         return Err(ServiceError::internal_error("svc", "empty prompt"));
//!     }
//!     Ok(prompt)
//! }
//! ```

use crate::core_types::{ErrorCategory, ErrorCode, ErrorSeverity};
use crate::logging::{log_debug, log_error, log_warn};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Convenient result type for contract operations.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

type SharedCause = Arc<dyn StdError + Send + Sync + 'static>;

// ============================================================================
// Metadata
// ============================================================================

/// Per-field description of a validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationDetail {
    /// Wire (snake_case) name of the field, or an indexed path for nested fields.
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provided: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
    pub reason: String,
}

impl ValidationDetail {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            provided: None,
            expected: None,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn with_provided(mut self, provided: impl Into<Value>) -> Self {
        self.provided = Some(provided.into());
        self
    }

    #[must_use]
    pub fn with_expected(mut self, expected: impl Into<Value>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

/// One content-policy violation instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolationDetail {
    /// Violation label, e.g. `CHILD_SAFETY`. See [`ErrorCode::from_violation_type`].
    #[serde(rename = "type")]
    pub violation_type: String,
    pub description: String,
    pub severity: ErrorSeverity,
    /// Provider confidence in `0.0..=1.0`, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_code: Option<String>,
}

impl ViolationDetail {
    pub fn new(
        violation_type: impl Into<String>,
        description: impl Into<String>,
        severity: ErrorSeverity,
    ) -> Self {
        Self {
            violation_type: violation_type.into(),
            description: description.into(),
            severity,
            confidence: None,
            provider_code: None,
        }
    }

    /// Attach a confidence score. Values outside `0.0..=1.0` are clamped.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }

    #[must_use]
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }
}

/// Optional structured context attached to a [`ServiceError`].
///
/// Allocated lazily by the first `with_*` builder that needs it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetadata {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_details: Vec<ValidationDetail>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violation_details: Vec<ViolationDetail>,
    /// Serialized as fractional seconds.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "duration_secs"
    )]
    pub retry_after: Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_used: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_code: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub provider_data: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, Value>,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, ser: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => ser.serialize_f64(duration.as_secs_f64()),
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Duration>, D::Error> {
        let secs = Option::<f64>::deserialize(de)?;
        Ok(secs
            .filter(|s| s.is_finite() && *s >= 0.0)
            .map(Duration::from_secs_f64))
    }
}

// ============================================================================
// ServiceError
// ============================================================================

/// Canonical cross-service error.
///
/// Category, severity and HTTP status are derived from the code when the
/// error is created. They change only through the explicit override builders
/// ([`with_category`](Self::with_category), [`with_severity`](Self::with_severity),
/// [`with_http_status`](Self::with_http_status)) and are never recomputed.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[error("{message}")]
pub struct ServiceError {
    code: ErrorCode,
    message: String,
    service: String,
    http_status: u16,
    category: ErrorCategory,
    severity: ErrorSeverity,
    retryable: bool,
    occurred_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    /// Flattened text of the wrapped failure.
    #[serde(rename = "cause", default, skip_serializing_if = "Option::is_none")]
    cause_message: Option<String>,
    #[serde(skip)]
    #[source]
    cause: Option<SharedCause>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<ErrorMetadata>,
}

impl ServiceError {
    /// Create an error, deriving its classification from `code`.
    ///
    /// `retryable` is supplied by the caller rather than taken from
    /// [`ErrorCode::is_retryable`], since call sites may know more (for
    /// example an explicit Retry-After from the provider).
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
        service: impl Into<String>,
        retryable: bool,
    ) -> Self {
        let classification = code.classify();
        let err = Self {
            code,
            message: message.into(),
            service: service.into(),
            http_status: classification.http_status,
            category: classification.category,
            severity: classification.severity,
            retryable,
            occurred_at: Utc::now(),
            request_id: None,
            job_id: None,
            user_id: None,
            cause_message: None,
            cause: None,
            metadata: None,
        };
        err.log_created();
        err
    }

    fn log_created(&self) {
        match self.severity {
            ErrorSeverity::Critical => log_error!(
                error_code = %self.code,
                category = %self.category,
                severity = %self.severity,
                http_status = self.http_status,
                service = %self.service,
                message = %self.message,
                "Service error created"
            ),
            ErrorSeverity::High => log_warn!(
                error_code = %self.code,
                category = %self.category,
                severity = %self.severity,
                http_status = self.http_status,
                service = %self.service,
                message = %self.message,
                "Service error created"
            ),
            ErrorSeverity::Medium | ErrorSeverity::Low => log_debug!(
                error_code = %self.code,
                category = %self.category,
                severity = %self.severity,
                http_status = self.http_status,
                service = %self.service,
                "Service error created"
            ),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn http_status(&self) -> u16 {
        self.http_status
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.severity
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Text of the wrapped cause. Survives serialization.
    pub fn cause_message(&self) -> Option<&str> {
        self.cause_message.as_deref()
    }

    /// The wrapped cause itself. Absent after a JSON round-trip.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn metadata(&self) -> Option<&ErrorMetadata> {
        self.metadata.as_ref()
    }

    pub fn has_violations(&self) -> bool {
        self.metadata
            .as_ref()
            .is_some_and(|m| !m.violation_details.is_empty())
    }

    pub fn has_validation_errors(&self) -> bool {
        self.metadata
            .as_ref()
            .is_some_and(|m| !m.validation_details.is_empty())
    }

    // =========================================================================
    // Builders
    // =========================================================================

    fn metadata_mut(&mut self) -> &mut ErrorMetadata {
        self.metadata.get_or_insert_with(ErrorMetadata::default)
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    #[must_use]
    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Replace the metadata wholesale.
    #[must_use]
    pub fn with_metadata(mut self, metadata: ErrorMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    #[must_use]
    pub fn with_validation_errors(mut self, details: Vec<ValidationDetail>) -> Self {
        self.metadata_mut().validation_details = details;
        self
    }

    #[must_use]
    pub fn with_violations(mut self, violations: Vec<ViolationDetail>) -> Self {
        self.metadata_mut().violation_details = violations;
        self
    }

    #[must_use]
    pub fn with_retry_after(mut self, retry_after: Duration) -> Self {
        self.metadata_mut().retry_after = Some(retry_after);
        self
    }

    #[must_use]
    pub fn with_quota(mut self, limit: u64, used: u64) -> Self {
        let metadata = self.metadata_mut();
        metadata.quota_limit = Some(limit);
        metadata.quota_used = Some(used);
        self
    }

    /// Attribute the error to an upstream provider. An empty `provider_code`
    /// is not recorded.
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>, provider_code: &str) -> Self {
        let metadata = self.metadata_mut();
        metadata.provider = Some(provider.into());
        metadata.provider_code = (!provider_code.is_empty()).then(|| provider_code.to_string());
        self
    }

    #[must_use]
    pub fn with_provider_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata_mut()
            .provider_data
            .insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata_mut().details.insert(key.into(), value.into());
        self
    }

    /// Wrap a lower-level failure, keeping both the value and its text.
    #[must_use]
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.cause_message = Some(cause.to_string());
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Record cause text when no error value is available (e.g. a vendor message).
    #[must_use]
    pub fn with_cause_message(mut self, text: impl Into<String>) -> Self {
        self.cause_message = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = status;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: ErrorCategory) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }

    // =========================================================================
    // Wire helpers
    // =========================================================================

    pub fn to_json(&self) -> ServiceResult<String> {
        serde_json::to_string(self).map_err(|e| {
            Self::internal_error(&self.service, "failed to serialize service error").with_cause(e)
        })
    }

    /// Parse a serialized error. The structured cause is never restored.
    pub fn from_json(json: &str) -> ServiceResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            Self::new(
                ErrorCode::ValInvalidFormat,
                "Malformed service error payload",
                "latent-contracts",
                false,
            )
            .with_cause(e)
        })
    }

    // =========================================================================
    // Convenience constructors
    // =========================================================================

    /// Content-policy violation error.
    ///
    /// The code comes from the *first* violation only; every violation is kept
    /// in metadata. With more than one violation the message gains a
    /// `(+N more violations)` suffix.
    pub fn content_violation_error(
        service: impl Into<String>,
        violations: Vec<ViolationDetail>,
    ) -> Self {
        let (code, message) = match violations.first() {
            Some(first) => {
                let mut message = first.description.clone();
                if violations.len() > 1 {
                    message.push_str(&format!(" (+{} more violations)", violations.len() - 1));
                }
                (ErrorCode::from_violation_type(&first.violation_type), message)
            }
            None => (
                ErrorCode::AiViolationOther,
                "Content violated platform policies".to_string(),
            ),
        };
        Self::new(code, message, service, false).with_violations(violations)
    }

    /// Generic request validation error naming the first failing field.
    pub fn validation_error(service: impl Into<String>, details: Vec<ValidationDetail>) -> Self {
        let message = match details.first() {
            Some(first) => format!(
                "Validation failed for field '{}': {}",
                first.field, first.reason
            ),
            None => "Validation failed".to_string(),
        };
        Self::new(ErrorCode::ValInvalidRequest, message, service, false)
            .with_validation_errors(details)
    }

    pub fn media_dimension_error(
        service: impl Into<String>,
        provided: impl Into<Value>,
        expected: impl Into<Value>,
    ) -> Self {
        let provided = provided.into();
        let message = format!("Invalid media dimensions: {}", display_value(&provided));
        let detail = ValidationDetail::new("dimensions", "Dimensions do not meet requirements")
            .with_provided(provided)
            .with_expected(expected);
        Self::new(ErrorCode::MediaInvalidDimensions, message, service, false)
            .with_validation_errors(vec![detail])
    }

    pub fn rate_limit_error(service: impl Into<String>, retry_after: Duration) -> Self {
        Self::new(
            ErrorCode::RateLimitExceeded,
            format!("Rate limit exceeded. Retry after {}s", retry_after.as_secs_f64()),
            service,
            true,
        )
        .with_retry_after(retry_after)
    }

    /// Model-at-capacity error. An empty `provider` is not recorded.
    pub fn model_overloaded_error(service: impl Into<String>, provider: &str) -> Self {
        let err = Self::new(
            ErrorCode::AiModelOverloaded,
            "The AI model is currently at capacity. Please try again later.",
            service,
            true,
        );
        if provider.is_empty() {
            err
        } else {
            err.with_provider(provider, "")
        }
    }

    pub fn timeout_error(service: impl Into<String>, operation: &str) -> Self {
        let message = if operation.is_empty() {
            "Operation timed out".to_string()
        } else {
            format!("Operation '{operation}' timed out")
        };
        Self::new(ErrorCode::SysTimeout, message, service, true)
    }

    pub fn internal_error(service: impl Into<String>, details: &str) -> Self {
        let mut message = "An internal error occurred".to_string();
        if !details.is_empty() {
            message.push_str(": ");
            message.push_str(details);
        }
        Self::new(ErrorCode::SysInternalError, message, service, true)
    }
}

/// Render a JSON value for a message without quoting plain strings.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
