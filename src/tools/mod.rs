//! Tool parameter contracts
//!
//! - `names`: the closed [`ToolName`] set
//! - `constraints`: declarative field rules and the generic validator
//! - `params`: one typed record per tool family
//! - `registry`: static registration table and the validation dispatcher
//! - `adapter`: validation failure to `ServiceError`
//! - `schema`: JSON Schema export and function declarations
//! - `metadata`: cost, routing and examples per tool

pub mod adapter;
pub mod constraints;
pub mod metadata;
pub mod names;
pub mod params;
pub mod registry;
pub mod schema;

pub use adapter::{failure_code, to_service_error};
pub use constraints::{Constraint, FieldSpec, ValidationFailure, Violation};
pub use metadata::{
    all_tools, needs_signed_urls, signable_fields, tool_credits, tool_metadata,
    tool_metadata_by_name, tools_by_service, tools_by_type, OutputType, ServiceType, ToolMeta,
    ToolType,
};
pub use names::{is_valid_tool_name, ToolName};
pub use params::{ToolParameters, ToolParams};
pub use registry::{
    contract, contracts, validate, validate_params, validate_params_with, ToolContract,
    ValidatedParams,
};
pub use schema::{
    export_all_schemas, export_schema, export_schema_by_name, export_schema_with,
    function_declarations, FunctionDeclaration,
};
