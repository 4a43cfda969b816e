// Unit Tests for the Canonical Service Error
//
// UNIT UNDER TEST: ServiceError
//
// BUSINESS RESPONSIBILITY:
//   - Carries a canonical code with its derived classification
//   - Keeps overrides stable once applied
//   - Attaches structured metadata only through builders
//   - Preserves a wrapped cause as text across the wire
//   - Offers constructors for the most common failure shapes
//
// TEST COVERAGE:
//   - Classification derived at construction
//   - Override builders are never recomputed by later builders
//   - Lazy metadata allocation
//   - Content violation constructor, first-violation code semantics
//   - JSON shape and round trip, including cause flattening
//   - Convenience constructors (validation, media, rate limit, overload, timeout, internal)

use crate::core_types::{ErrorCategory, ErrorCode, ErrorSeverity};
use crate::error::{ErrorMetadata, ServiceError, ValidationDetail, ViolationDetail};
use serde_json::{json, Value};
use std::error::Error as StdError;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
#[error("connection reset by peer")]
struct ResetError;

#[cfg(test)]
mod construction_tests {
    use super::*;

    #[test]
    fn test_new_derives_classification_from_code() {
        // Arrange & Act
        let err = ServiceError::new(ErrorCode::AuthForbidden, "nope", "gateway", false);

        // Assert
        assert_eq!(err.code(), ErrorCode::AuthForbidden);
        assert_eq!(err.category(), ErrorCategory::Auth);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.http_status(), 403);
        assert_eq!(err.service(), "gateway");
        assert!(!err.is_retryable());
        assert!(err.metadata().is_none());
    }

    #[test]
    fn test_display_is_the_message() {
        let err = ServiceError::new(ErrorCode::SysTimeout, "upstream took too long", "svc", true);
        assert_eq!(err.to_string(), "upstream took too long");
    }

    #[test]
    fn test_retryable_is_caller_supplied() {
        // Quota exhaustion is not retryable by class, but a caller may know better
        let err = ServiceError::new(ErrorCode::RateQuotaExceeded, "quota", "svc", true);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_correlation_ids() {
        let err = ServiceError::new(ErrorCode::ToolExecutionFailed, "boom", "svc", false)
            .with_request_id("req-1")
            .with_job_id("job-2")
            .with_user_id("user-3");

        assert_eq!(err.request_id(), Some("req-1"));
        assert_eq!(err.job_id(), Some("job-2"));
        assert_eq!(err.user_id(), Some("user-3"));
    }
}

#[cfg(test)]
mod override_tests {
    use super::*;

    #[test]
    fn test_overrides_survive_later_builders() {
        // Arrange
        let err = ServiceError::new(ErrorCode::ToolExecutionFailed, "failed", "svc", false)
            .with_http_status(502)
            .with_category(ErrorCategory::Ai)
            .with_severity(ErrorSeverity::High);

        // Act
        let err = err
            .with_detail("attempt", 3)
            .with_retry_after(Duration::from_secs(1))
            .with_validation_errors(vec![ValidationDetail::new("x", "bad")]);

        // Assert
        assert_eq!(err.http_status(), 502);
        assert_eq!(err.category(), ErrorCategory::Ai);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.code(), ErrorCode::ToolExecutionFailed);
    }

    #[test]
    fn test_overrides_survive_serialization() {
        let err = ServiceError::new(ErrorCode::SysInternalError, "x", "svc", false)
            .with_http_status(503);

        let back = ServiceError::from_json(&err.to_json().unwrap()).unwrap();

        assert_eq!(back.http_status(), 503);
        assert_eq!(back.severity(), ErrorSeverity::Critical);
    }
}

#[cfg(test)]
mod metadata_tests {
    use super::*;

    #[test]
    fn test_metadata_allocated_on_first_builder() {
        let err = ServiceError::new(ErrorCode::RateQuotaExceeded, "quota", "svc", false)
            .with_quota(1000, 1000);

        let metadata = err.metadata().expect("metadata should be allocated");
        assert_eq!(metadata.quota_limit, Some(1000));
        assert_eq!(metadata.quota_used, Some(1000));
        assert!(metadata.validation_details.is_empty());
    }

    #[test]
    fn test_provider_attribution_skips_empty_code() {
        let err = ServiceError::new(ErrorCode::AiModelOverloaded, "busy", "svc", true)
            .with_provider("vertex", "");

        let metadata = err.metadata().unwrap();
        assert_eq!(metadata.provider.as_deref(), Some("vertex"));
        assert_eq!(metadata.provider_code, None);
    }

    #[test]
    fn test_provider_data_and_details_accumulate() {
        let err = ServiceError::new(ErrorCode::AiGenerationFailed, "x", "svc", false)
            .with_provider_data("finish_reason", "SAFETY")
            .with_provider_data("candidates", 0)
            .with_detail("tool", "nano-banana");

        let metadata = err.metadata().unwrap();
        assert_eq!(metadata.provider_data.len(), 2);
        assert_eq!(metadata.details["tool"], json!("nano-banana"));
    }

    #[test]
    fn test_with_metadata_replaces_wholesale() {
        let metadata = ErrorMetadata {
            provider: Some("openai".into()),
            ..ErrorMetadata::default()
        };

        let err = ServiceError::new(ErrorCode::AiGenerationFailed, "x", "svc", false)
            .with_detail("dropped", true)
            .with_metadata(metadata.clone());

        assert_eq!(err.metadata(), Some(&metadata));
    }

    #[test]
    fn test_predicates() {
        let plain = ServiceError::new(ErrorCode::SysTimeout, "x", "svc", true);
        assert!(!plain.has_violations());
        assert!(!plain.has_validation_errors());

        let with_details = plain
            .clone()
            .with_validation_errors(vec![ValidationDetail::new("prompt", "required")]);
        assert!(with_details.has_validation_errors());
        assert!(!with_details.has_violations());
    }

    #[test]
    fn test_violation_confidence_is_clamped() {
        let v = ViolationDetail::new("VIOLENCE", "graphic", ErrorSeverity::Medium)
            .with_confidence(1.7);
        assert_eq!(v.confidence, Some(1.0));
    }
}

#[cfg(test)]
mod content_violation_tests {
    use super::*;

    #[test]
    fn test_first_violation_decides_code() {
        // Arrange
        let violations = vec![
            ViolationDetail::new("CHILD_SAFETY", "Minor detected", ErrorSeverity::High),
            ViolationDetail::new("VIOLENCE", "Graphic content", ErrorSeverity::Medium),
        ];

        // Act
        let err = ServiceError::content_violation_error("media-ai", violations);

        // Assert
        assert_eq!(err.code(), ErrorCode::AiViolationChildSafety);
        assert!(err.message().contains("Minor detected"));
        assert!(err.message().contains("+1 more violations"));
        assert_eq!(err.metadata().unwrap().violation_details.len(), 2);
        assert!(!err.is_retryable());
        assert_eq!(err.http_status(), 403);
    }

    #[test]
    fn test_later_violation_kinds_do_not_change_code() {
        // Sharp edge: a child-safety finding in second place does not escalate the code
        let violations = vec![
            ViolationDetail::new("VIOLENCE", "Graphic content", ErrorSeverity::Medium),
            ViolationDetail::new("CHILD_SAFETY", "Minor detected", ErrorSeverity::High),
        ];

        let err = ServiceError::content_violation_error("media-ai", violations);

        assert_eq!(err.code(), ErrorCode::AiViolationViolence);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_single_violation_has_no_suffix() {
        let err = ServiceError::content_violation_error(
            "media-ai",
            vec![ViolationDetail::new("CELEBRITY", "Public figure", ErrorSeverity::Medium)],
        );

        assert_eq!(err.message(), "Public figure");
        assert_eq!(err.code(), ErrorCode::AiViolationCelebrity);
    }

    #[test]
    fn test_unknown_type_and_empty_list_fall_back_to_other() {
        let unknown = ServiceError::content_violation_error(
            "media-ai",
            vec![ViolationDetail::new("WEIRD", "?", ErrorSeverity::Low)],
        );
        let empty = ServiceError::content_violation_error("media-ai", vec![]);

        assert_eq!(unknown.code(), ErrorCode::AiViolationOther);
        assert_eq!(empty.code(), ErrorCode::AiViolationOther);
        assert!(!empty.has_violations());
    }
}

#[cfg(test)]
mod serialization_tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        // Arrange
        let err = ServiceError::new(ErrorCode::RateLimitExceeded, "slow down", "svc", true)
            .with_retry_after(Duration::from_millis(1500));

        // Act
        let value: Value = serde_json::from_str(&err.to_json().unwrap()).unwrap();

        // Assert
        assert_eq!(value["code"], "RATE_LIMIT_EXCEEDED");
        assert_eq!(value["category"], "rate_limit");
        assert_eq!(value["severity"], "low");
        assert_eq!(value["http_status"], 429);
        assert_eq!(value["retryable"], true);
        assert_eq!(value["metadata"]["retry_after"], 1.5);
        assert!(value["occurred_at"].is_string());
        assert!(value.get("request_id").is_none());
        assert!(value.get("cause").is_none());
    }

    #[test]
    fn test_cause_serializes_as_text_only() {
        // Arrange
        let err = ServiceError::new(ErrorCode::SysNetworkError, "network", "svc", true)
            .with_cause(ResetError);
        assert!(err.cause().is_some());
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("connection reset by peer")
        );

        // Act
        let json = err.to_json().unwrap();
        let back = ServiceError::from_json(&json).unwrap();

        // Assert
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["cause"], "connection reset by peer");
        assert_eq!(back.cause_message(), Some("connection reset by peer"));
        assert!(back.cause().is_none());
        assert_eq!(back.code(), ErrorCode::SysNetworkError);
        assert_eq!(back.occurred_at(), err.occurred_at());
    }

    #[test]
    fn test_malformed_payload_is_invalid_format() {
        let err = ServiceError::from_json("{not json").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValInvalidFormat);
        assert!(err.cause_message().is_some());
    }
}

#[cfg(test)]
mod constructor_tests {
    use super::*;

    #[test]
    fn test_validation_error_names_first_field() {
        let err = ServiceError::validation_error(
            "api",
            vec![
                ValidationDetail::new("prompt", "must not be empty"),
                ValidationDetail::new("seed", "negative"),
            ],
        );

        assert_eq!(err.code(), ErrorCode::ValInvalidRequest);
        assert_eq!(
            err.message(),
            "Validation failed for field 'prompt': must not be empty"
        );
        assert_eq!(err.metadata().unwrap().validation_details.len(), 2);
    }

    #[test]
    fn test_media_dimension_error() {
        let err = ServiceError::media_dimension_error("media-ai", "4000x4000", "<= 2048x2048");

        assert_eq!(err.code(), ErrorCode::MediaInvalidDimensions);
        assert_eq!(err.http_status(), 400);
        let detail = &err.metadata().unwrap().validation_details[0];
        assert_eq!(detail.field, "dimensions");
        assert_eq!(detail.provided, Some(json!("4000x4000")));
        assert_eq!(detail.expected, Some(json!("<= 2048x2048")));
    }

    #[test]
    fn test_rate_limit_error_carries_retry_after() {
        let err = ServiceError::rate_limit_error("svc", Duration::from_secs(30));

        assert!(err.is_retryable());
        assert_eq!(err.code(), ErrorCode::RateLimitExceeded);
        assert_eq!(
            err.metadata().unwrap().retry_after,
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn test_model_overloaded_error() {
        let err = ServiceError::model_overloaded_error("svc", "vertex");

        assert!(err.is_retryable());
        assert_eq!(err.http_status(), 503);
        assert_eq!(err.metadata().unwrap().provider.as_deref(), Some("vertex"));

        let anonymous = ServiceError::model_overloaded_error("svc", "");
        assert!(anonymous.metadata().is_none());
    }

    #[test]
    fn test_timeout_and_internal_errors() {
        let timeout = ServiceError::timeout_error("svc", "render");
        let internal = ServiceError::internal_error("svc", "db pool exhausted");

        assert_eq!(timeout.message(), "Operation 'render' timed out");
        assert!(timeout.is_retryable());
        assert_eq!(internal.message(), "An internal error occurred: db pool exhausted");
        assert_eq!(internal.severity(), ErrorSeverity::Critical);
    }
}
