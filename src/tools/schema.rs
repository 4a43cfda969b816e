//! JSON Schema export for tool parameters.
//!
//! Schemas are reflected from the parameter types with `schemars`, then the
//! tool's field table is overlaid so that every declared constraint shows up
//! as a schema keyword. Identity pointers (`$schema`, `$id`) are stripped.
//! Output is deterministic: `serde_json` maps are ordered by key.

use super::constraints::{Constraint, FieldSpec};
use super::metadata;
use super::names::ToolName;
use super::registry;
use crate::config::{ContractsConfig, SchemaExportConfig};
use crate::core_types::ErrorCode;
use crate::error::{ServiceError, ServiceResult};
use crate::logging::{log_debug, log_warn};
use once_cell::sync::Lazy;
use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

const SCHEMA_SERVICE: &str = "tool-schema";

/// Reflect `P` without any constraint overlay.
pub(crate) fn reflect<P: JsonSchema>(config: &SchemaExportConfig) -> Value {
    let settings = SchemaSettings::draft07().with(|s| {
        s.option_nullable = false;
        s.option_add_null_type = false;
        s.inline_subschemas = config.inline_subschemas;
    });
    let root = settings.into_generator().into_root_schema_for::<P>();
    match serde_json::to_value(root) {
        Ok(schema) => schema,
        Err(e) => {
            log_warn!(
                type_name = std::any::type_name::<P>(),
                error = %e,
                "Failed to serialize reflected schema"
            );
            Value::Null
        }
    }
}

/// Export the schema for `tool` using `config.schema`.
pub fn export_schema_with(config: &ContractsConfig, tool: ToolName) -> Value {
    let Some(contract) = registry::contract(tool) else {
        return Value::Null;
    };
    let settings = &config.schema;

    let mut schema = contract.reflect(settings);
    let mut definitions = match schema.as_object_mut() {
        Some(root) => {
            root.remove("$schema");
            root.remove("$id");
            root.insert("title".into(), Value::from(tool.as_str()));
            match root.remove("definitions") {
                Some(Value::Object(defs)) => defs,
                _ => Map::new(),
            }
        }
        None => Map::new(),
    };

    overlay(&mut schema, contract.fields, &mut definitions);
    if !settings.allow_additional_properties {
        if let Some(root) = schema.as_object_mut() {
            root.insert("additionalProperties".into(), Value::Bool(false));
        }
    }

    if !definitions.is_empty() {
        if let Some(root) = schema.as_object_mut() {
            root.insert("definitions".into(), Value::Object(definitions));
        }
    }

    log_debug!(tool = tool.as_str(), "Exported tool schema");
    schema
}

static SCHEMAS: Lazy<BTreeMap<ToolName, Value>> = Lazy::new(|| {
    let config = ContractsConfig::default();
    ToolName::iter()
        .map(|tool| (tool, export_schema_with(&config, tool)))
        .collect()
});

/// Export the schema for `tool` with default settings.
pub fn export_schema(tool: ToolName) -> Value {
    SCHEMAS.get(&tool).cloned().unwrap_or(Value::Null)
}

/// Export by wire name; unknown names fail with `TOOL_NOT_FOUND`.
pub fn export_schema_by_name(name: &str) -> ServiceResult<Value> {
    name.parse::<ToolName>().map(export_schema).map_err(|_| {
        ServiceError::new(
            ErrorCode::ToolNotFound,
            format!("Unknown tool: '{name}'"),
            SCHEMA_SERVICE,
            false,
        )
        .with_detail("tool", name)
    })
}

/// Every tool's schema with default settings, computed once.
pub fn export_all_schemas() -> &'static BTreeMap<ToolName, Value> {
    &SCHEMAS
}

/// One entry of a function-calling tool list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Declarations for every tool, in tool order.
pub fn function_declarations() -> Vec<FunctionDeclaration> {
    SCHEMAS
        .iter()
        .map(|(tool, schema)| FunctionDeclaration {
            name: tool.as_str().to_string(),
            description: metadata::tool_metadata(*tool).description.to_string(),
            parameters: schema.clone(),
        })
        .collect()
}

fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}

/// Render an enumeration member with the JSON type of the property.
fn typed_literal(property: &Value, literal: &str) -> Value {
    let numeric = matches!(
        property.get("type").and_then(Value::as_str),
        Some("integer" | "number")
    );
    if numeric {
        if let Ok(n) = literal.parse::<f64>() {
            return number_value(n);
        }
    }
    Value::from(literal)
}

fn definition_name(property: &Value) -> Option<String> {
    let reference = property
        .get("$ref")
        .or_else(|| property.pointer("/allOf/0/$ref"))
        .and_then(Value::as_str)?;
    reference.rsplit('/').next().map(str::to_string)
}

/// Overlay `fields` onto `target`, following `$ref`s into `definitions`.
fn overlay_into(
    target: &mut Value,
    fields: &[FieldSpec],
    definitions: &mut Map<String, Value>,
) {
    match definition_name(target) {
        Some(name) => {
            if let Some(mut definition) = definitions.remove(&name) {
                overlay(&mut definition, fields, definitions);
                definitions.insert(name, definition);
            }
        }
        None => overlay(target, fields, definitions),
    }
}

pub(crate) fn overlay(
    schema: &mut Value,
    fields: &[FieldSpec],
    definitions: &mut Map<String, Value>,
) {
    let Some(object) = schema.as_object_mut() else {
        return;
    };

    let required: Vec<Value> = fields
        .iter()
        .filter(|f| f.is_required())
        .map(|f| Value::from(f.name))
        .collect();
    if required.is_empty() {
        object.remove("required");
    } else {
        object.insert("required".into(), Value::Array(required));
    }

    let Some(Value::Object(properties)) = object.get_mut("properties") else {
        return;
    };
    for property in properties.values_mut() {
        if let Some(p) = property.as_object_mut() {
            p.remove("default");
        }
    }

    for spec in fields {
        let Some(property) = properties.get_mut(spec.name) else {
            continue;
        };
        for constraint in spec.constraints {
            apply(property, constraint, definitions);
        }
    }
}

fn apply(
    property: &mut Value,
    constraint: &Constraint,
    definitions: &mut Map<String, Value>,
) {
    match constraint {
        Constraint::Nested(nested) => overlay_into(property, nested, definitions),
        Constraint::Each(nested) => {
            if let Some(items) = property.get_mut("items") {
                overlay_into(items, nested, definitions);
            }
        }
        Constraint::OneOf(allowed) => {
            let members = allowed.iter().map(|m| typed_literal(property, m)).collect();
            set(property, "enum", Value::Array(members));
        }
        Constraint::Equals(expected) => {
            let literal = typed_literal(property, expected);
            set(property, "const", literal);
        }
        Constraint::Range { min, max } => {
            if let Some(min) = min {
                set(property, "minimum", number_value(*min));
            }
            if let Some(max) = max {
                set(property, "maximum", number_value(*max));
            }
        }
        Constraint::Length { min, max } => {
            if let Some(min) = min {
                set(property, "minLength", Value::from(*min));
            }
            if let Some(max) = max {
                set(property, "maxLength", Value::from(*max));
            }
        }
        Constraint::Items { min, max } => {
            if let Some(min) = min {
                set(property, "minItems", Value::from(*min));
            }
            if let Some(max) = max {
                set(property, "maxItems", Value::from(*max));
            }
        }
        Constraint::Pattern(pattern) => set(property, "pattern", Value::from(*pattern)),
        Constraint::RequiredWithout(without) => {
            let note = format!("Required unless {} is given.", without.join(" or "));
            append_description(property, &note);
        }
        Constraint::ExclusiveWith(other) => {
            let note = format!("Cannot be combined with {other}.");
            append_description(property, &note);
        }
        Constraint::Required => {}
    }
}

fn set(property: &mut Value, key: &str, value: Value) {
    if let Some(p) = property.as_object_mut() {
        p.insert(key.to_string(), value);
    }
}

fn append_description(property: &mut Value, note: &str) {
    let Some(p) = property.as_object_mut() else {
        return;
    };
    let text = match p.get("description").and_then(Value::as_str) {
        Some(existing) if !existing.is_empty() => format!("{existing} {note}"),
        _ => note.to_string(),
    };
    p.insert("description".into(), Value::from(text));
}
