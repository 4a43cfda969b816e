//! Video and image processing parameters.
//!
//! The `signed_*` fields are filled in by the platform after URL signing,
//! never by the caller. See `metadata::signable_fields`.

use super::{has_text, ToolParameters};
use crate::tools::constraints::{Constraint, FieldSpec, ValidationFailure, TIMESTAMP_PATTERN};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const CONTAINER_FORMATS: &[&str] = &["mp4", "webm"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CombineVideosParams {
    /// Videos to concatenate, in order.
    #[serde(default)]
    pub video_urls: Vec<String>,
    #[serde(default)]
    pub signed_urls: Vec<String>,
    /// Source video ids, for tracking only.
    #[serde(default)]
    pub video_ids: Vec<String>,
    pub transition: Option<String>,
    /// Transition length in seconds.
    pub fade_duration: Option<f64>,
    pub audio_strategy: Option<String>,
    pub format: Option<String>,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
}

impl ToolParameters for CombineVideosParams {}

pub const COMBINE_VIDEOS_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("video_urls", &[Constraint::Required, Constraint::items(2, 10)]),
    FieldSpec::new(
        "transition",
        &[Constraint::OneOf(&["none", "fade", "dissolve"])],
    ),
    FieldSpec::new("fade_duration", &[Constraint::range(0.0, 5.0)]),
    FieldSpec::new(
        "audio_strategy",
        &[Constraint::OneOf(&["crossfade", "concat", "none", "cut_continue"])],
    ),
    FieldSpec::new("format", &[Constraint::OneOf(CONTAINER_FORMATS)]),
];

/// Trim by start plus end time, or start plus duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrimVideoParams {
    #[serde(default)]
    pub video_url: String,
    pub signed_url: Option<String>,
    /// Seconds (`12.5`) or clock time (`00:00:12.5`).
    pub start_time: Option<String>,
    /// Required unless `duration` is given.
    pub end_time: Option<String>,
    /// Clip length in seconds. Required unless `end_time` is given.
    pub duration: Option<f64>,
    /// Stream copy without re-encoding.
    pub fast_mode: Option<bool>,
    pub format: Option<String>,
}

impl ToolParameters for TrimVideoParams {
    fn check_invariants(&self) -> Result<(), ValidationFailure> {
        if !has_text(&self.end_time) && self.duration.is_none() {
            return Err(ValidationFailure::invariant(
                "end_time",
                "either end_time or duration is required",
            ));
        }
        Ok(())
    }
}

pub const TRIM_VIDEO_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("video_url", &[Constraint::Required]),
    FieldSpec::new("start_time", &[Constraint::Pattern(TIMESTAMP_PATTERN)]),
    FieldSpec::new("end_time", &[Constraint::Pattern(TIMESTAMP_PATTERN)]),
    FieldSpec::new("duration", &[Constraint::range(0.1, 600.0)]),
    FieldSpec::new("format", &[Constraint::OneOf(CONTAINER_FORMATS)]),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ImageAudioMergeParams {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub audio_url: String,
    pub signed_image_url: Option<String>,
    pub signed_audio_url: Option<String>,
    pub format: Option<String>,
    pub resolution: Option<String>,
    pub video_bitrate: Option<String>,
    pub audio_bitrate: Option<String>,
}

impl ToolParameters for ImageAudioMergeParams {}

pub const IMAGE_AUDIO_MERGE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("image_url", &[Constraint::Required]),
    FieldSpec::new("audio_url", &[Constraint::Required]),
    FieldSpec::new("format", &[Constraint::OneOf(CONTAINER_FORMATS)]),
    FieldSpec::new(
        "resolution",
        &[Constraint::OneOf(&[
            "1920x1080",
            "1280x720",
            "854x480",
            "640x360",
        ])],
    ),
];

/// Extract a frame by position or timestamp. `positions` adds a batch on top
/// of the anchoring `position`; it does not stand in for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractFrameParams {
    #[serde(default)]
    pub video_url: String,
    pub signed_url: Option<String>,
    /// `first`, `last` or `middle`. Required unless `timestamp` is given.
    pub position: Option<String>,
    /// Batch extraction.
    #[serde(default)]
    pub positions: Vec<String>,
    /// Required unless `position` is given.
    pub timestamp: Option<String>,
    pub format: Option<String>,
    pub quality: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl ToolParameters for ExtractFrameParams {
    fn check_invariants(&self) -> Result<(), ValidationFailure> {
        if !has_text(&self.position) && !has_text(&self.timestamp) {
            return Err(ValidationFailure::invariant(
                "position",
                "either position or timestamp is required",
            ));
        }
        Ok(())
    }
}

pub const EXTRACT_FRAME_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("video_url", &[Constraint::Required]),
    FieldSpec::new("position", &[Constraint::OneOf(&["first", "last", "middle"])]),
    FieldSpec::new("timestamp", &[Constraint::Pattern(TIMESTAMP_PATTERN)]),
    FieldSpec::new("format", &[Constraint::OneOf(&["jpg", "png"])]),
    FieldSpec::new("quality", &[Constraint::range(1.0, 100.0)]),
    FieldSpec::new("width", &[Constraint::min(1.0)]),
    FieldSpec::new("height", &[Constraint::min(1.0)]),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MergeImagesParams {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub signed_urls: Vec<String>,
    pub layout: Option<String>,
    /// Gap between images in pixels.
    pub spacing: Option<i64>,
}

impl ToolParameters for MergeImagesParams {}

pub const MERGE_IMAGES_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("images", &[Constraint::Required, Constraint::min_items(2)]),
    FieldSpec::new(
        "layout",
        &[Constraint::OneOf(&["horizontal", "vertical", "grid"])],
    ),
    FieldSpec::new("spacing", &[Constraint::min(0.0)]),
];
