//! Core types for the canonical error vocabulary
//!
//! ## Organization
//! - `codes` - Closed error-code enumeration and code families
//! - `errors` - Category, severity and the classification rules

pub mod codes;
pub mod errors;

// Re-export commonly used types
pub use codes::{ErrorCode, ErrorFamily};
pub use errors::{
    classify, classify_raw, is_retryable_code, Classification, ErrorCategory, ErrorSeverity,
};
