//! Content analysis and search parameters.

use super::ToolParameters;
use crate::tools::constraints::{Constraint, FieldSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContentAnalyzerParams {
    /// Page or video to analyze.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    pub analysis_type: Option<String>,
    pub output_format: Option<String>,
}

impl ToolParameters for ContentAnalyzerParams {}

pub const CONTENT_ANALYZER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("url", &[Constraint::Required]),
    FieldSpec::new(
        "analysis_type",
        &[Constraint::OneOf(&[
            "summary",
            "insights",
            "transcript",
            "sentiment",
            "key-points",
            "critique",
        ])],
    ),
    FieldSpec::new(
        "output_format",
        &[Constraint::OneOf(&[
            "detailed",
            "concise",
            "bullet-points",
            "narrative",
        ])],
    ),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GoogleSearchParams {
    #[serde(default)]
    pub query: String,
    /// Restrict results to one site.
    pub site: Option<String>,
    pub recency: Option<String>,
    pub max_results: Option<i64>,
}

impl ToolParameters for GoogleSearchParams {}

pub const GOOGLE_SEARCH_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("query", &[Constraint::Required]),
    FieldSpec::new(
        "recency",
        &[Constraint::OneOf(&[
            "hour", "day", "week", "month", "year", "all",
        ])],
    ),
    FieldSpec::new("max_results", &[Constraint::range(1.0, 10.0)]),
];
