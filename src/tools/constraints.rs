//! Declarative field constraints and the generic validator that interprets them.
//!
//! A parameter contract is a static table of [`FieldSpec`]s. The same table
//! drives runtime validation here and constraint export in the schema module,
//! so the two can never drift apart.
//!
//! Validation is first-failure-wins: fields are checked in declaration order,
//! and the constraints of one field in the order they are listed.
//!
//! Blank values (`null`, `""`, `[]`) count as absent. [`Constraint::Required`]
//! reports them as missing; every other value constraint skips them.
//! Numeric zero and `false` are values: `{"max_results": 0}` is checked
//! against the field's bounds rather than treated as unset.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// `SS`, `SS.fff`, `MM:SS` or `HH:MM:SS(.fff)`.
pub const TIMESTAMP_PATTERN: &str = r"^(\d+(\.\d+)?|\d{1,2}:\d{2}(:\d{2})?(\.\d+)?)$";
/// Two-letter language code.
pub const LANGUAGE_PATTERN: &str = r"^[A-Za-z]{2}$";

static PATTERNS: Lazy<HashMap<&'static str, Regex>> = Lazy::new(|| {
    [TIMESTAMP_PATTERN, LANGUAGE_PATTERN]
        .into_iter()
        .filter_map(|p| Regex::new(p).ok().map(|re| (p, re)))
        .collect()
});

fn pattern_matches(pattern: &str, text: &str) -> bool {
    match PATTERNS.get(pattern) {
        Some(re) => re.is_match(text),
        None => Regex::new(pattern).is_ok_and(|re| re.is_match(text)),
    }
}

/// One declarative rule attached to a field.
#[derive(Debug, Clone, Copy)]
pub enum Constraint {
    /// Field must be present and not blank.
    Required,
    /// Numeric bounds, inclusive.
    Range { min: Option<f64>, max: Option<f64> },
    /// String length bounds in characters, inclusive.
    Length { min: Option<usize>, max: Option<usize> },
    /// Array length bounds, inclusive.
    Items { min: Option<usize>, max: Option<usize> },
    /// Scalar value must render as one of these.
    OneOf(&'static [&'static str]),
    /// Scalar value must render exactly as this.
    Equals(&'static str),
    /// String must match this regular expression.
    Pattern(&'static str),
    /// Field is required when every listed field is absent.
    RequiredWithout(&'static [&'static str]),
    /// Field must not be combined with the named field.
    ExclusiveWith(&'static str),
    /// Apply a nested field table to an object value.
    Nested(&'static [FieldSpec]),
    /// Apply a nested field table to every object in an array.
    Each(&'static [FieldSpec]),
}

impl Constraint {
    pub const fn range(min: f64, max: f64) -> Self {
        Self::Range {
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn min(min: f64) -> Self {
        Self::Range {
            min: Some(min),
            max: None,
        }
    }

    pub const fn length(min: usize, max: usize) -> Self {
        Self::Length {
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn max_length(max: usize) -> Self {
        Self::Length {
            min: None,
            max: Some(max),
        }
    }

    pub const fn items(min: usize, max: usize) -> Self {
        Self::Items {
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn min_items(min: usize) -> Self {
        Self::Items {
            min: Some(min),
            max: None,
        }
    }

    pub const fn max_items(max: usize) -> Self {
        Self::Items {
            min: None,
            max: Some(max),
        }
    }
}

/// A named field and its constraints, in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Wire name of the field.
    pub name: &'static str,
    pub constraints: &'static [Constraint],
}

impl FieldSpec {
    pub const fn new(name: &'static str, constraints: &'static [Constraint]) -> Self {
        Self { name, constraints }
    }

    pub fn is_required(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c, Constraint::Required))
    }
}

/// Which constraint a value broke, with the bound it broke.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    Missing,
    Below { min: f64 },
    Above { max: f64 },
    TooShort { min: usize },
    TooLong { max: usize },
    TooFewItems { min: usize },
    TooManyItems { max: usize },
    NotOneOf { allowed: &'static [&'static str] },
    NotEqual { expected: &'static str },
    PatternMismatch { pattern: &'static str },
    DependencyMissing { without: &'static [&'static str] },
    Conflicts { other: &'static str },
}

impl Violation {
    /// The expectation, as recorded in a validation detail.
    pub fn expected(&self) -> Value {
        match self {
            Self::Missing => Value::from("a non-empty value"),
            Self::Below { min } => Value::from(format!(">= {}", format_number(*min))),
            Self::Above { max } => Value::from(format!("<= {}", format_number(*max))),
            Self::TooShort { min } => Value::from(format!("at least {min} characters")),
            Self::TooLong { max } => Value::from(format!("at most {max} characters")),
            Self::TooFewItems { min } => Value::from(format!("at least {min} items")),
            Self::TooManyItems { max } => Value::from(format!("at most {max} items")),
            Self::NotOneOf { allowed } => Value::from(allowed.to_vec()),
            Self::NotEqual { expected } => Value::from(*expected),
            Self::PatternMismatch { pattern } => Value::from(*pattern),
            Self::DependencyMissing { without } => {
                Value::from(format!("required without {}", without.join(", ")))
            }
            Self::Conflicts { other } => Value::from(format!("not together with {other}")),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "required"),
            Self::Below { min } => write!(f, "below minimum {}", format_number(*min)),
            Self::Above { max } => write!(f, "above maximum {}", format_number(*max)),
            Self::TooShort { min } => write!(f, "shorter than {min} characters"),
            Self::TooLong { max } => write!(f, "longer than {max} characters"),
            Self::TooFewItems { min } => write!(f, "fewer than {min} items"),
            Self::TooManyItems { max } => write!(f, "more than {max} items"),
            Self::NotOneOf { allowed } => write!(f, "not one of [{}]", allowed.join(" ")),
            Self::NotEqual { expected } => write!(f, "not equal to {expected}"),
            Self::PatternMismatch { pattern } => write!(f, "does not match {pattern}"),
            Self::DependencyMissing { without } => {
                write!(f, "required when {} is absent", without.join(", "))
            }
            Self::Conflicts { other } => write!(f, "conflicts with {other}"),
        }
    }
}

/// Structured validation failure, before conversion to a `ServiceError`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationFailure {
    #[error("unknown tool: {name}")]
    UnknownTool { name: String },

    /// The payload could not be decoded into the tool's parameter type.
    #[error("invalid parameter format: {message}")]
    Decode { message: String },

    /// A declarative constraint failed.
    #[error("parameter '{field}' {violation}")]
    Constraint {
        field: String,
        violation: Violation,
        provided: Option<Value>,
    },

    /// A custom cross-field rule failed.
    #[error("{message}")]
    Invariant { field: String, message: String },
}

impl ValidationFailure {
    pub fn invariant(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invariant {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Offending field (or indexed path), when the failure has one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Constraint { field, .. } | Self::Invariant { field, .. } => Some(field),
            Self::UnknownTool { .. } | Self::Decode { .. } => None,
        }
    }
}

/// Blank means absent: missing, `null`, `""` or `[]`.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Render a scalar the way enumeration members are written.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Format a bound without a trailing `.0` for whole numbers.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Validate `object` against a field table. `path` prefixes reported field names.
pub fn check_fields(
    fields: &[FieldSpec],
    object: &Map<String, Value>,
    path: &str,
) -> Result<(), ValidationFailure> {
    for spec in fields {
        let field_path = if path.is_empty() {
            spec.name.to_string()
        } else {
            format!("{path}.{}", spec.name)
        };
        let value = object.get(spec.name);
        for constraint in spec.constraints {
            check_constraint(constraint, &field_path, value, object)?;
        }
    }
    Ok(())
}

fn fail(field: &str, violation: Violation, provided: Option<&Value>) -> ValidationFailure {
    ValidationFailure::Constraint {
        field: field.to_string(),
        violation,
        provided: provided.cloned(),
    }
}

fn check_constraint(
    constraint: &Constraint,
    field: &str,
    value: Option<&Value>,
    object: &Map<String, Value>,
) -> Result<(), ValidationFailure> {
    let blank = is_blank(value);

    match constraint {
        Constraint::Required if blank => Err(fail(field, Violation::Missing, None)),
        Constraint::RequiredWithout(without)
            if blank && without.iter().all(|other| is_blank(object.get(*other))) =>
        {
            Err(fail(
                field,
                Violation::DependencyMissing { without: *without },
                None,
            ))
        }
        Constraint::ExclusiveWith(other) if !blank && !is_blank(object.get(*other)) => {
            Err(fail(field, Violation::Conflicts { other: *other }, value))
        }
        _ if blank => Ok(()),
        Constraint::Range { min, max } => {
            let Some(n) = value.and_then(Value::as_f64) else {
                return Ok(());
            };
            if let Some(min) = min.filter(|m| n < *m) {
                return Err(fail(field, Violation::Below { min }, value));
            }
            if let Some(max) = max.filter(|m| n > *m) {
                return Err(fail(field, Violation::Above { max }, value));
            }
            Ok(())
        }
        Constraint::Length { min, max } => {
            let Some(len) = value.and_then(Value::as_str).map(|s| s.chars().count()) else {
                return Ok(());
            };
            if let Some(min) = min.filter(|m| len < *m) {
                return Err(fail(field, Violation::TooShort { min }, value));
            }
            if let Some(max) = max.filter(|m| len > *m) {
                return Err(fail(field, Violation::TooLong { max }, value));
            }
            Ok(())
        }
        Constraint::Items { min, max } => {
            let Some(len) = value.and_then(Value::as_array).map(Vec::len) else {
                return Ok(());
            };
            if let Some(min) = min.filter(|m| len < *m) {
                return Err(fail(field, Violation::TooFewItems { min }, value));
            }
            if let Some(max) = max.filter(|m| len > *m) {
                return Err(fail(field, Violation::TooManyItems { max }, value));
            }
            Ok(())
        }
        Constraint::OneOf(allowed) => match value.and_then(scalar_text) {
            Some(text) if !allowed.contains(&text.as_str()) => {
                Err(fail(field, Violation::NotOneOf { allowed: *allowed }, value))
            }
            _ => Ok(()),
        },
        Constraint::Equals(expected) => match value.and_then(scalar_text) {
            Some(text) if text != *expected => {
                Err(fail(field, Violation::NotEqual { expected: *expected }, value))
            }
            _ => Ok(()),
        },
        Constraint::Pattern(pattern) => match value.and_then(Value::as_str) {
            Some(text) if !pattern_matches(pattern, text) => {
                Err(fail(field, Violation::PatternMismatch { pattern: *pattern }, value))
            }
            _ => Ok(()),
        },
        Constraint::Nested(nested) => match value.and_then(Value::as_object) {
            Some(obj) => check_fields(nested, obj, field),
            None => Ok(()),
        },
        Constraint::Each(nested) => {
            let Some(items) = value.and_then(Value::as_array) else {
                return Ok(());
            };
            for (index, item) in items.iter().enumerate() {
                if let Some(obj) = item.as_object() {
                    check_fields(nested, obj, &format!("{field}[{index}]"))?;
                }
            }
            Ok(())
        }
        Constraint::Required | Constraint::RequiredWithout(_) | Constraint::ExclusiveWith(_) => {
            Ok(())
        }
    }
}

/// Normalize an internal identifier to its wire (snake_case) spelling.
///
/// `imageSize` and `ImageSize` become `image_size`; runs of capitals stay
/// together (`VideoURLs` becomes `video_urls`). Index and path punctuation is
/// kept as is.
pub fn wire_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let starts_word = match (prev, next) {
                (Some(p), _) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                // Last capital of an acronym opens the next word, unless
                // only a plural "s" follows.
                (Some(p), Some(n)) if p.is_ascii_uppercase() && n.is_ascii_lowercase() => {
                    !is_plural_tail(&chars[i + 1..])
                }
                _ => false,
            };
            if starts_word {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn is_plural_tail(rest: &[char]) -> bool {
    rest.first() == Some(&'s') && rest.get(1).map_or(true, |c| !c.is_ascii_lowercase())
}
