use crate::core_types::ErrorCode;
use crate::error::{ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};

const CONFIG_SERVICE: &str = "contracts-config";

/// Crate-wide settings.
///
/// Every free function uses `ContractsConfig::default()`; the `*_with`
/// variants take an explicit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractsConfig {
    /// Service stamped on errors built from provider failures.
    pub service_name: String,
    /// Service stamped on tool validation errors.
    pub validation_service: String,
    pub schema: SchemaExportConfig,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            service_name: "latent-contracts".to_string(),
            validation_service: "tool-validation".to_string(),
            schema: SchemaExportConfig::default(),
        }
    }
}

impl ContractsConfig {
    /// Reject blank service names.
    pub fn validate(&self) -> ServiceResult<()> {
        for (field, value) in [
            ("service_name", &self.service_name),
            ("validation_service", &self.validation_service),
        ] {
            if value.trim().is_empty() {
                return Err(ServiceError::new(
                    ErrorCode::ValInvalidParameter,
                    format!("Configuration field '{field}' must not be empty"),
                    CONFIG_SERVICE,
                    false,
                )
                .with_detail("field", field));
            }
        }
        Ok(())
    }
}

/// JSON Schema export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaExportConfig {
    /// Inline nested types instead of emitting `definitions` and `$ref`.
    pub inline_subschemas: bool,
    /// When false, the root object gets `additionalProperties: false`.
    pub allow_additional_properties: bool,
}

impl Default for SchemaExportConfig {
    fn default() -> Self {
        Self {
            inline_subschemas: true,
            allow_additional_properties: false,
        }
    }
}
