//! # latent-contracts
//!
//! Canonical error contracts and tool parameter contracts for an AI media platform.
//!
//! ## Key Features
//!
//! - **Error taxonomy**: a closed [`ErrorCode`] vocabulary with derived category,
//!   severity and HTTP status
//! - **ServiceError**: one wire-serializable error value with builder-style metadata
//! - **Provider normalizers**: OpenAI and Vertex error triples mapped onto the vocabulary
//! - **Tool contracts**: typed, declaratively constrained parameters per tool,
//!   a validation dispatcher and JSON Schema export from the same constraint tables
//!
//! ## Example
//!
//! ```rust
//! use latent_contracts::{validate_params, ErrorCode};
//! use serde_json::json;
//!
//! let payload = json!({ "video_urls": ["https://cdn.example/a.mp4"] });
//! let err = validate_params("combine-videos", payload.as_object().unwrap()).unwrap_err();
//!
//! assert_eq!(err.code(), ErrorCode::ValOutOfRange);
//! assert_eq!(err.http_status(), 400);
//! ```

// Errors are self-describing through ServiceResult
#![allow(clippy::missing_errors_doc)]

pub mod core_types;

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod config;
pub mod error;
pub mod providers;
pub mod tools;

#[cfg(test)]
pub mod tests;

pub use config::{ContractsConfig, SchemaExportConfig};
pub use core_types::{
    classify, classify_raw, is_retryable_code, Classification, ErrorCategory, ErrorCode,
    ErrorFamily, ErrorSeverity,
};
pub use error::{ErrorMetadata, ServiceError, ServiceResult, ValidationDetail, ViolationDetail};
pub use providers::{
    normalize_with, MatchStage, OpenAiNormalizer, ProviderNormalizer, VertexNormalizer,
};
pub use tools::{
    export_all_schemas, export_schema, export_schema_by_name, function_declarations,
    tool_credits, tool_metadata, validate_params, validate_params_with, ToolName, ToolParams,
    ValidatedParams,
};
