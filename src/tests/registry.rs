// Unit Tests for the Tool Registry, Dispatcher and Failure Adapter
//
// UNIT UNDER TEST: registry::validate, validate_params, adapter::to_service_error
//
// BUSINESS RESPONSIBILITY:
//   - Registers every tool exactly once with its type and field table
//   - Dispatches untyped payloads to the right contract by tool name
//   - Orders checks: lookup, decode, field table, custom invariant
//   - Converts failures into canonical validation errors with wire field names
//
// TEST COVERAGE:
//   - Registry completeness and alias sharing
//   - Unknown tool and decode failures
//   - Per-tool constraint behavior (Imagen variants, Veo3, trim, extract, nano-banana)
//   - Custom invariants run only after the table passes
//   - Failure kind to error code mapping and message text
//   - Configured validation service name

use crate::config::ContractsConfig;
use crate::core_types::ErrorCode;
use crate::tools::adapter::{failure_code, to_service_error};
use crate::tools::constraints::{ValidationFailure, Violation};
use crate::tools::names::ToolName;
use crate::tools::params::ToolParams;
use crate::tools::registry::{contract, contracts, validate, validate_params, validate_params_with};
use serde_json::{json, Map, Value};
use strum::IntoEnumIterator;

fn payload(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

fn error_code(tool: &str, value: Value) -> ErrorCode {
    validate_params(tool, &payload(value))
        .expect_err("payload should be rejected")
        .code()
}

#[cfg(test)]
mod registry_table_tests {
    use super::*;

    #[test]
    fn test_every_tool_is_registered() {
        for tool in ToolName::iter() {
            let entry = contract(tool).unwrap_or_else(|| panic!("{tool} missing"));
            assert_eq!(entry.name, tool);
        }
        assert_eq!(contracts().count(), ToolName::iter().count());
    }

    #[test]
    fn test_aliases_share_field_tables() {
        let veo3 = contract(ToolName::GenerateVideoVeo3).unwrap();
        let veo3_silent = contract(ToolName::GenerateVideoVeo3NoAudio).unwrap();
        let fast = contract(ToolName::GenerateVideoVeo3Fast).unwrap();
        let fast_silent = contract(ToolName::GenerateVideoVeo3FastNoAudio).unwrap();

        assert_eq!(format!("{:?}", veo3.fields), format!("{:?}", veo3_silent.fields));
        assert_eq!(format!("{:?}", fast.fields), format!("{:?}", fast_silent.fields));
    }

    #[test]
    fn test_imagen_variants_have_distinct_tables() {
        let standard = contract(ToolName::GenerateImageImagen).unwrap();
        let fast = contract(ToolName::GenerateImageImagenFast).unwrap();

        assert_eq!(standard.fields.len(), fast.fields.len());
        assert_ne!(format!("{:?}", standard.fields), format!("{:?}", fast.fields));
    }
}

#[cfg(test)]
mod dispatch_tests {
    use super::*;

    #[test]
    fn test_unknown_tool() {
        // Act
        let failure = validate("paint-my-house", &Map::new()).unwrap_err();
        let err = validate_params("paint-my-house", &Map::new()).unwrap_err();

        // Assert
        assert_eq!(
            failure,
            ValidationFailure::UnknownTool {
                name: "paint-my-house".into()
            }
        );
        assert_eq!(err.code(), ErrorCode::ToolNotFound);
        assert_eq!(err.http_status(), 404);
        assert_eq!(err.message(), "Unknown tool: 'paint-my-house'");
    }

    #[test]
    fn test_wrong_type_is_invalid_format() {
        let err = validate_params(
            "generate-video-veo3",
            &payload(json!({"prompt": "A long enough prompt", "duration": "six"})),
        )
        .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValInvalidFormat);
        assert!(err
            .message()
            .starts_with("Invalid parameter format for tool 'generate-video-veo3':"));
    }

    #[test]
    fn test_null_members_decode_as_absent() {
        let result = validate(
            "trim-video",
            &payload(json!({"video_url": "gs://b/v.mp4", "duration": 5, "end_time": null})),
        );

        assert!(result.is_ok());
    }

    #[test]
    fn test_valid_payload_yields_typed_params() {
        // Arrange
        let input = payload(json!({
            "video_urls": ["gs://b/a.mp4", "gs://b/b.mp4"],
            "transition": "fade",
            "fade_duration": 0.5
        }));

        // Act
        let validated = validate_params("combine-videos", &input).unwrap();

        // Assert
        assert_eq!(validated.tool, ToolName::CombineVideos);
        match validated.params {
            ToolParams::CombineVideos(params) => {
                assert_eq!(params.video_urls.len(), 2);
                assert_eq!(params.transition.as_deref(), Some("fade"));
                assert_eq!(params.fade_duration, Some(0.5));
            }
            other => panic!("unexpected params {other:?}"),
        }
    }
}

#[cfg(test)]
mod tool_rule_tests {
    use super::*;

    #[test]
    fn test_imagen_fast_only_allows_1k() {
        let input = json!({"prompt": "a cat", "image_size": "2K"});

        assert!(validate_params("generate-image-imagen", &payload(input.clone())).is_ok());
        assert_eq!(
            error_code("generate-image-imagen-fast", input),
            ErrorCode::ValInvalidParameter
        );
    }

    #[test]
    fn test_imagen_ultra_exactly_one_image() {
        assert_eq!(
            error_code(
                "generate-image-imagen-ultra",
                json!({"prompt": "a cat", "number_of_images": 2})
            ),
            ErrorCode::ValInvalidParameter
        );
        assert!(validate_params(
            "generate-image-imagen-ultra",
            &payload(json!({"prompt": "a cat", "number_of_images": 1}))
        )
        .is_ok());
    }

    #[test]
    fn test_imagen_language_pattern() {
        assert_eq!(
            error_code(
                "generate-image-imagen",
                json!({"prompt": "a cat", "language": "english"})
            ),
            ErrorCode::ValInvalidParameter
        );
    }

    #[test]
    fn test_veo3_needs_prompt_or_image() {
        // Arrange
        let neither = json!({"duration": 6});

        // Act
        let err = validate_params("generate-video-veo3", &payload(neither)).unwrap_err();

        // Assert
        assert_eq!(err.code(), ErrorCode::ValMutuallyExclusive);
        assert_eq!(err.message(), "either prompt or image is required");
        let image_only = json!({"image": {"storage_url": "gs://b/i.png", "mime_type": "image/png"}});
        assert!(validate_params("generate-video-veo3-no-audio", &payload(image_only)).is_ok());
    }

    #[test]
    fn test_veo3_table_runs_before_invariant() {
        // Duration is out of range and the invariant would also fail; the table wins
        let err = validate_params("generate-video-veo3", &payload(json!({"duration": 9})))
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValOutOfRange);
    }

    #[test]
    fn test_veo3_fast_requires_prompt() {
        assert_eq!(
            error_code("generate-video-veo3-fast", json!({})),
            ErrorCode::ValMissingParameter
        );
        assert_eq!(
            error_code("generate-video-veo3-fast-no-audio", json!({"prompt": "short"})),
            ErrorCode::ValStringTooShort
        );
    }

    #[test]
    fn test_trim_video_needs_end_time_or_duration() {
        // Arrange
        let neither = json!({"video_url": "gs://b/v.mp4"});
        let blank_end = json!({"video_url": "gs://b/v.mp4", "end_time": ""});
        let with_duration = json!({"video_url": "gs://b/v.mp4", "duration": 12.5});
        let with_end = json!({"video_url": "gs://b/v.mp4", "end_time": "00:00:20"});

        // Act
        let err = validate_params("trim-video", &payload(neither)).unwrap_err();

        // Assert
        assert_eq!(err.code(), ErrorCode::ValMutuallyExclusive);
        assert_eq!(err.message(), "either end_time or duration is required");
        assert_eq!(err.metadata().unwrap().validation_details[0].field, "end_time");
        assert_eq!(
            error_code("trim-video", blank_end),
            ErrorCode::ValMutuallyExclusive
        );
        assert!(validate_params("trim-video", &payload(with_duration)).is_ok());
        assert!(validate_params("trim-video", &payload(with_end)).is_ok());
    }

    #[test]
    fn test_trim_video_bounds_checked_before_end_rule() {
        let short = json!({"video_url": "gs://b/v.mp4", "duration": 0.05});

        assert_eq!(error_code("trim-video", short), ErrorCode::ValOutOfRange);
    }

    #[test]
    fn test_extract_frame_position_rules() {
        // Arrange
        let both = json!({"video_url": "gs://b/v.mp4", "position": "first", "timestamp": "00:00:01"});
        let none = json!({"video_url": "gs://b/v.mp4"});
        let batch_only = json!({"video_url": "gs://b/v.mp4", "positions": ["first", "last"]});
        let batch = json!({
            "video_url": "gs://b/v.mp4",
            "position": "first",
            "positions": ["first", "last"]
        });

        // Act
        let err = validate_params("extract-frame", &payload(none)).unwrap_err();

        // Assert
        assert!(validate_params("extract-frame", &payload(both)).is_ok());
        assert_eq!(err.code(), ErrorCode::ValMutuallyExclusive);
        assert_eq!(err.message(), "either position or timestamp is required");
        assert_eq!(
            error_code("extract-frame", batch_only),
            ErrorCode::ValMutuallyExclusive
        );
        assert!(validate_params("extract-frame", &payload(batch)).is_ok());
    }

    #[test]
    fn test_nano_banana_too_many_images() {
        let input = json!({
            "prompt": "compose",
            "input_images": [{}, {}, {}, {}]
        });

        assert_eq!(error_code("nano-banana", input), ErrorCode::ValArrayTooLong);
    }

    #[test]
    fn test_nano_banana_empty_part_reports_indexed_path() {
        let input = json!({
            "prompt": "continue",
            "context": [
                {"role": "user", "parts": [{"text": "hi"}]},
                {"role": "model", "parts": [{"text": "hello"}, {}]}
            ]
        });

        let failure = validate("nano-banana", &payload(input)).unwrap_err();

        assert_eq!(failure.field(), Some("context[1].parts[1]"));
        assert_eq!(failure_code(&failure), ErrorCode::ValMutuallyExclusive);
    }

    #[test]
    fn test_nano_banana_bad_role() {
        let input = json!({
            "prompt": "continue",
            "context": [{"role": "assistant", "parts": [{"text": "hi"}]}]
        });

        let err = validate_params("nano-banana", &payload(input)).unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValInvalidEnum);
        assert_eq!(
            err.metadata().unwrap().validation_details[0].field,
            "context[0].role"
        );
    }

    #[test]
    fn test_google_search_bounds() {
        assert_eq!(
            error_code("google-search", json!({"query": "rust", "max_results": 0})),
            ErrorCode::ValOutOfRange
        );
        assert_eq!(
            error_code("google-search", json!({"query": "rust", "recency": "decade"})),
            ErrorCode::ValInvalidEnum
        );
    }

    #[test]
    fn test_zero_is_a_value_not_unset() {
        // Arrange
        let zero_quality = json!({"video_url": "gs://b/v.mp4", "position": "first", "quality": 0});
        let zero_seed = json!({"prompt": "a lighthouse", "seed": 0});
        let zero_spacing = json!({"images": ["a", "b"], "spacing": 0});

        // Act
        let err = validate_params("extract-frame", &payload(zero_quality)).unwrap_err();

        // Assert
        assert_eq!(err.code(), ErrorCode::ValOutOfRange);
        assert_eq!(err.metadata().unwrap().validation_details[0].provided, Some(json!(0)));
        assert!(validate_params("generate-image-imagen", &payload(zero_seed)).is_ok());
        assert!(validate_params("merge-images", &payload(zero_spacing)).is_ok());
    }
}

#[cfg(test)]
mod adapter_tests {
    use super::*;

    fn constraint(field: &str, violation: Violation) -> ValidationFailure {
        ValidationFailure::Constraint {
            field: field.into(),
            violation,
            provided: None,
        }
    }

    #[test]
    fn test_codes_per_failure_kind() {
        let cases = [
            (Violation::Missing, ErrorCode::ValMissingParameter),
            (Violation::Below { min: 1.0 }, ErrorCode::ValOutOfRange),
            (Violation::Above { max: 4.0 }, ErrorCode::ValOutOfRange),
            (Violation::TooFewItems { min: 2 }, ErrorCode::ValOutOfRange),
            (Violation::TooShort { min: 10 }, ErrorCode::ValStringTooShort),
            (Violation::TooLong { max: 2000 }, ErrorCode::ValStringTooLong),
            (Violation::TooManyItems { max: 3 }, ErrorCode::ValArrayTooLong),
            (Violation::NotOneOf { allowed: &["a"] }, ErrorCode::ValInvalidEnum),
            (Violation::NotEqual { expected: "1" }, ErrorCode::ValInvalidParameter),
            (Violation::PatternMismatch { pattern: "^x$" }, ErrorCode::ValInvalidParameter),
            (Violation::DependencyMissing { without: &["b"] }, ErrorCode::ValDependencyMissing),
            (Violation::Conflicts { other: "b" }, ErrorCode::ValMutuallyExclusive),
        ];

        for (violation, expected) in cases {
            assert_eq!(failure_code(&constraint("f", violation.clone())), expected, "{violation}");
        }
        assert_eq!(
            failure_code(&ValidationFailure::Decode { message: "x".into() }),
            ErrorCode::ValInvalidFormat
        );
    }

    #[test]
    fn test_messages_use_wire_field_names() {
        let err = to_service_error(
            &constraint("imageSize", Violation::NotOneOf { allowed: &["1K", "2K"] }),
            "generate-image-imagen",
            "tool-validation",
        );

        assert_eq!(err.message(), "Parameter 'image_size' must be one of: 1K 2K");
        let detail = &err.metadata().unwrap().validation_details[0];
        assert_eq!(detail.field, "image_size");
        assert_eq!(detail.expected, Some(json!(["1K", "2K"])));
    }

    #[test]
    fn test_missing_message_names_tool() {
        let err = to_service_error(&constraint("prompt", Violation::Missing), "nano-banana", "svc");

        assert_eq!(
            err.message(),
            "Required parameter 'prompt' is missing for tool 'nano-banana'"
        );
        assert_eq!(err.metadata().unwrap().details["tool"], json!("nano-banana"));
    }

    #[test]
    fn test_bound_messages() {
        let below = to_service_error(&constraint("seed", Violation::Below { min: 0.0 }), "t", "s");
        let long = to_service_error(
            &constraint("prompt", Violation::TooLong { max: 2000 }),
            "t",
            "s",
        );
        let many = to_service_error(
            &constraint("images", Violation::TooManyItems { max: 3 }),
            "t",
            "s",
        );

        assert_eq!(below.message(), "Parameter 'seed' must be at least 0");
        assert_eq!(long.message(), "Parameter 'prompt' must be at most 2000 characters long");
        assert_eq!(many.message(), "Parameter 'images' must have at most 3 items");
    }

    #[test]
    fn test_validation_errors_are_not_retryable() {
        let err = to_service_error(&constraint("x", Violation::Missing), "t", "s");
        assert!(!err.is_retryable());
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn test_configured_service_name() {
        let config = ContractsConfig {
            validation_service: "gateway".into(),
            ..ContractsConfig::default()
        };

        let err = validate_params_with(&config, "trim-video", &Map::new()).unwrap_err();

        assert_eq!(err.service(), "gateway");
        assert_eq!(err.code(), ErrorCode::ValMissingParameter);
    }
}
