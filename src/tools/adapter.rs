//! Validation failure → canonical `ServiceError`.
//!
//! The mapping depends only on the kind of failure, never on which tool or
//! field produced it. Field names are rendered in their wire spelling.

use super::constraints::{format_number, wire_name, ValidationFailure, Violation};
use crate::core_types::ErrorCode;
use crate::error::{ServiceError, ValidationDetail};

/// Canonical code for a failure kind.
pub fn failure_code(failure: &ValidationFailure) -> ErrorCode {
    match failure {
        ValidationFailure::UnknownTool { .. } => ErrorCode::ToolNotFound,
        ValidationFailure::Decode { .. } => ErrorCode::ValInvalidFormat,
        ValidationFailure::Invariant { .. } => ErrorCode::ValMutuallyExclusive,
        ValidationFailure::Constraint { violation, .. } => violation_code(violation),
    }
}

fn violation_code(violation: &Violation) -> ErrorCode {
    match violation {
        Violation::Missing => ErrorCode::ValMissingParameter,
        Violation::Below { .. } | Violation::Above { .. } | Violation::TooFewItems { .. } => {
            ErrorCode::ValOutOfRange
        }
        Violation::TooShort { .. } => ErrorCode::ValStringTooShort,
        Violation::TooLong { .. } => ErrorCode::ValStringTooLong,
        Violation::TooManyItems { .. } => ErrorCode::ValArrayTooLong,
        Violation::NotOneOf { .. } => ErrorCode::ValInvalidEnum,
        Violation::DependencyMissing { .. } => ErrorCode::ValDependencyMissing,
        Violation::Conflicts { .. } => ErrorCode::ValMutuallyExclusive,
        Violation::NotEqual { .. } | Violation::PatternMismatch { .. } => {
            ErrorCode::ValInvalidParameter
        }
    }
}

fn violation_message(field: &str, violation: &Violation, tool: &str) -> String {
    match violation {
        Violation::Missing => {
            format!("Required parameter '{field}' is missing for tool '{tool}'")
        }
        Violation::Below { min } => {
            format!("Parameter '{field}' must be at least {}", format_number(*min))
        }
        Violation::Above { max } => {
            format!("Parameter '{field}' must be at most {}", format_number(*max))
        }
        Violation::TooShort { min } => {
            format!("Parameter '{field}' must be at least {min} characters long")
        }
        Violation::TooLong { max } => {
            format!("Parameter '{field}' must be at most {max} characters long")
        }
        Violation::TooFewItems { min } => {
            format!("Parameter '{field}' must have at least {min} items")
        }
        Violation::TooManyItems { max } => {
            format!("Parameter '{field}' must have at most {max} items")
        }
        Violation::NotOneOf { allowed } => {
            format!("Parameter '{field}' must be one of: {}", allowed.join(" "))
        }
        Violation::NotEqual { expected } => {
            format!("Parameter '{field}' must be exactly {expected}")
        }
        Violation::PatternMismatch { .. } => {
            format!("Parameter '{field}' has an invalid format")
        }
        Violation::DependencyMissing { without } => {
            let others: Vec<String> = without.iter().map(|f| wire_name(f)).collect();
            format!(
                "Parameter '{field}' is required when '{}' is not provided",
                others.join("', '")
            )
        }
        Violation::Conflicts { other } => format!(
            "Parameters '{field}' and '{}' cannot be used together",
            wire_name(other)
        ),
    }
}

/// Convert a failure for `tool` into a `ServiceError` stamped with `service`.
///
/// Field-level failures carry one [`ValidationDetail`]; every error carries
/// the tool name as a `tool` detail. None of them are retryable.
pub fn to_service_error(failure: &ValidationFailure, tool: &str, service: &str) -> ServiceError {
    let code = failure_code(failure);

    let err = match failure {
        ValidationFailure::UnknownTool { name } => {
            ServiceError::new(code, format!("Unknown tool: '{name}'"), service, false)
        }
        ValidationFailure::Decode { message } => ServiceError::new(
            code,
            format!("Invalid parameter format for tool '{tool}': {message}"),
            service,
            false,
        ),
        ValidationFailure::Constraint {
            field,
            violation,
            provided,
        } => {
            let field = wire_name(field);
            let message = violation_message(&field, violation, tool);
            let mut detail =
                ValidationDetail::new(field, violation.to_string()).with_expected(violation.expected());
            detail.provided = provided.clone();
            ServiceError::new(code, message, service, false).with_validation_errors(vec![detail])
        }
        ValidationFailure::Invariant { field, message } => {
            let detail = ValidationDetail::new(wire_name(field), message.clone());
            ServiceError::new(code, message.clone(), service, false)
                .with_validation_errors(vec![detail])
        }
    };

    err.with_detail("tool", tool)
}
