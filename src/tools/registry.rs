//! Static tool registration table and the validation dispatcher.
//!
//! Every [`ToolName`] is registered exactly once with its parameter type,
//! its field table and the functions that validate and reflect it. Adding a
//! tool is one `register` line.
//!
//! Dispatch runs, in order and stopping at the first failure:
//!
//! 1. tool lookup (`TOOL_NOT_FOUND` when unknown)
//! 2. decode into the typed record (`VAL_INVALID_FORMAT` on type mismatch)
//! 3. the field table, field by field in declaration order
//! 4. the record's custom cross-field rule

use super::constraints::{check_fields, FieldSpec, ValidationFailure};
use super::names::ToolName;
use super::params::analysis::{CONTENT_ANALYZER_FIELDS, GOOGLE_SEARCH_FIELDS};
use super::params::media::{
    IMAGEN_FAST_FIELDS, IMAGEN_FIELDS, IMAGEN_ULTRA_FIELDS, IMAGE_FLASH_FIELDS, LYRIA_FIELDS,
    NANO_BANANA_FIELDS, VEO3_FAST_FIELDS, VEO3_FIELDS,
};
use super::params::video::{
    COMBINE_VIDEOS_FIELDS, EXTRACT_FRAME_FIELDS, IMAGE_AUDIO_MERGE_FIELDS, MERGE_IMAGES_FIELDS,
    TRIM_VIDEO_FIELDS,
};
use super::params::{
    CombineVideosParams, ContentAnalyzerParams, ExtractFrameParams, GoogleSearchParams,
    ImageAudioMergeParams, ImageFlashParams, ImagenParams, LyriaParams, MergeImagesParams,
    NanoBananaParams, ToolParameters, ToolParams, TrimVideoParams, Veo3FastParams, Veo3Params,
};
use super::{adapter, schema};
use crate::config::{ContractsConfig, SchemaExportConfig};
use crate::error::ServiceResult;
use crate::logging::{log_debug, log_warn};
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

type ValidateFn = fn(&'static [FieldSpec], &Map<String, Value>) -> Result<ToolParams, ValidationFailure>;
type SchemaFn = fn(&SchemaExportConfig) -> Value;

/// Registration entry for one tool.
#[derive(Clone, Copy)]
pub struct ToolContract {
    pub name: ToolName,
    /// Declarative constraints, shared by validation and schema export.
    pub fields: &'static [FieldSpec],
    validate: ValidateFn,
    reflect: SchemaFn,
}

impl std::fmt::Debug for ToolContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContract")
            .field("name", &self.name)
            .field("fields", &self.fields.len())
            .finish()
    }
}

impl ToolContract {
    /// Validate an untyped payload against this contract.
    pub fn validate(&self, payload: &Map<String, Value>) -> Result<ToolParams, ValidationFailure> {
        (self.validate)(self.fields, payload)
    }

    /// Raw reflected schema, before constraint overlay.
    pub(crate) fn reflect(&self, config: &SchemaExportConfig) -> Value {
        (self.reflect)(config)
    }
}

/// A payload that passed validation, ready for tool execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedParams {
    pub tool: ToolName,
    pub params: ToolParams,
}

fn register<P: ToolParameters>(
    table: &mut BTreeMap<ToolName, ToolContract>,
    name: ToolName,
    fields: &'static [FieldSpec],
) {
    table.insert(
        name,
        ToolContract {
            name,
            fields,
            validate: validate_typed::<P>,
            reflect: schema::reflect::<P>,
        },
    );
}

static REGISTRY: Lazy<BTreeMap<ToolName, ToolContract>> = Lazy::new(|| {
    use ToolName::*;

    let mut table = BTreeMap::new();
    register::<ImagenParams>(&mut table, GenerateImageImagen, IMAGEN_FIELDS);
    register::<ImagenParams>(&mut table, GenerateImageImagenFast, IMAGEN_FAST_FIELDS);
    register::<ImagenParams>(&mut table, GenerateImageImagenUltra, IMAGEN_ULTRA_FIELDS);
    register::<ImageFlashParams>(&mut table, GenerateImageFlash, IMAGE_FLASH_FIELDS);
    register::<NanoBananaParams>(&mut table, NanoBanana, NANO_BANANA_FIELDS);
    register::<Veo3Params>(&mut table, GenerateVideoVeo3, VEO3_FIELDS);
    register::<Veo3Params>(&mut table, GenerateVideoVeo3NoAudio, VEO3_FIELDS);
    register::<Veo3FastParams>(&mut table, GenerateVideoVeo3Fast, VEO3_FAST_FIELDS);
    register::<Veo3FastParams>(&mut table, GenerateVideoVeo3FastNoAudio, VEO3_FAST_FIELDS);
    register::<LyriaParams>(&mut table, GenerateMusicLyria, LYRIA_FIELDS);
    register::<CombineVideosParams>(&mut table, CombineVideos, COMBINE_VIDEOS_FIELDS);
    register::<TrimVideoParams>(&mut table, TrimVideo, TRIM_VIDEO_FIELDS);
    register::<ImageAudioMergeParams>(&mut table, ImageAudioMerge, IMAGE_AUDIO_MERGE_FIELDS);
    register::<ExtractFrameParams>(&mut table, ExtractFrame, EXTRACT_FRAME_FIELDS);
    register::<MergeImagesParams>(&mut table, MergeImages, MERGE_IMAGES_FIELDS);
    register::<ContentAnalyzerParams>(&mut table, ContentAnalyzer, CONTENT_ANALYZER_FIELDS);
    register::<GoogleSearchParams>(&mut table, GoogleSearch, GOOGLE_SEARCH_FIELDS);
    table
});

/// Contract registered for `tool`.
pub fn contract(tool: ToolName) -> Option<&'static ToolContract> {
    REGISTRY.get(&tool)
}

/// All registered contracts, ordered by tool.
pub fn contracts() -> impl Iterator<Item = &'static ToolContract> {
    REGISTRY.values()
}

/// Drop `null` members recursively so they decode as absent.
fn strip_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(strip_nulls).collect()),
        other => other.clone(),
    }
}

fn validate_typed<P: ToolParameters>(
    fields: &'static [FieldSpec],
    payload: &Map<String, Value>,
) -> Result<ToolParams, ValidationFailure> {
    let params: P = serde_json::from_value(strip_nulls(&Value::Object(payload.clone())))
        .map_err(|e| ValidationFailure::Decode {
            message: e.to_string(),
        })?;
    check_fields(fields, payload, "")?;
    params.check_invariants()?;
    Ok(params.into())
}

/// Validate `payload` for the tool named `tool`, returning the structured failure.
pub fn validate(
    tool: &str,
    payload: &Map<String, Value>,
) -> Result<ValidatedParams, ValidationFailure> {
    let Some(contract) = tool.parse::<ToolName>().ok().and_then(|name| REGISTRY.get(&name)) else {
        log_warn!(tool = tool, "Validation requested for unknown tool");
        return Err(ValidationFailure::UnknownTool {
            name: tool.to_string(),
        });
    };

    match contract.validate(payload) {
        Ok(params) => Ok(ValidatedParams {
            tool: contract.name,
            params,
        }),
        Err(failure) => {
            log_debug!(
                tool = tool,
                field = failure.field().unwrap_or(""),
                reason = %failure,
                "Tool parameter validation failed"
            );
            Err(failure)
        }
    }
}

/// Validate and convert any failure into a canonical `ServiceError`.
pub fn validate_params(tool: &str, payload: &Map<String, Value>) -> ServiceResult<ValidatedParams> {
    validate_params_with(&ContractsConfig::default(), tool, payload)
}

pub fn validate_params_with(
    config: &ContractsConfig,
    tool: &str,
    payload: &Map<String, Value>,
) -> ServiceResult<ValidatedParams> {
    validate(tool, payload)
        .map_err(|failure| adapter::to_service_error(&failure, tool, &config.validation_service))
}
