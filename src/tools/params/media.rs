//! Media generation parameters.

use super::{has_text, ToolParameters};
use crate::tools::constraints::{
    Constraint, FieldSpec, ValidationFailure, LANGUAGE_PATTERN,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const SEED: Constraint = Constraint::range(0.0, 4_294_967_295.0);
const SAMPLE_COUNT: Constraint = Constraint::range(1.0, 4.0);
const NEGATIVE_PROMPT: Constraint = Constraint::max_length(500);

const IMAGE_ASPECT_RATIOS: &[&str] = &["1:1", "16:9", "9:16", "4:3", "3:4"];
const VIDEO_ASPECT_RATIOS: &[&str] = &["16:9", "9:16"];
const FRAME_RATES: &[&str] = &["24", "30", "60"];
const VIDEO_PERSON_GENERATION: &[&str] = &["allow_adult", "dont_allow"];
const COMPRESSION_QUALITIES: &[&str] = &["low", "medium", "high"];

// ============================================================================
// Shared media types
// ============================================================================

/// Image or video input, by storage URL or inline base64.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MediaReference {
    /// Cloud storage URL (`gs://bucket/path`).
    pub storage_url: Option<String>,
    /// Inline base64-encoded content.
    pub base64: Option<String>,
    pub mime_type: Option<String>,
}

pub const MEDIA_REFERENCE_FIELDS: &[FieldSpec] = &[FieldSpec::new(
    "mime_type",
    &[Constraint::OneOf(&[
        "image/jpeg",
        "image/png",
        "image/webp",
        "video/mp4",
    ])],
)];

/// One turn of a multimodal conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContextMessage {
    /// `user` or `model`.
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

/// Text or image part of a context message. At least one must be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MessagePart {
    pub text: Option<String>,
    /// Cloud storage URL of an image.
    pub storage_url: Option<String>,
}

pub const CONTEXT_MESSAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "role",
        &[Constraint::Required, Constraint::OneOf(&["user", "model"])],
    ),
    FieldSpec::new("parts", &[Constraint::Required, Constraint::min_items(1)]),
];

impl MessagePart {
    pub fn is_empty(&self) -> bool {
        !has_text(&self.text) && !has_text(&self.storage_url)
    }
}

// ============================================================================
// Imagen
// ============================================================================

/// Parameters for the Imagen tools (standard, fast, ultra).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ImagenParams {
    /// Text description of the image to generate.
    #[serde(default)]
    pub prompt: String,
    /// Seed for reproducible output.
    pub seed: Option<i64>,
    pub style: Option<String>,
    /// Two-letter prompt language code.
    pub language: Option<String>,
    /// Output resolution class.
    pub image_size: Option<String>,
    pub aspect_ratio: Option<String>,
    pub add_watermark: Option<bool>,
    /// Let the model rewrite the prompt before generating.
    pub enhance_prompt: Option<bool>,
    pub guidance_scale: Option<f64>,
    /// What to keep out of the image.
    pub negative_prompt: Option<String>,
    pub number_of_images: Option<i64>,
    pub output_mime_type: Option<String>,
    pub person_generation: Option<String>,
    pub include_rai_reason: Option<bool>,
    pub safety_filter_level: Option<String>,
    pub include_safety_attributes: Option<bool>,
    /// JPEG quality, 1-100.
    pub output_compression_quality: Option<i64>,
}

impl ToolParameters for ImagenParams {}

/// Imagen field table; only image size and image count differ per variant.
macro_rules! imagen_fields {
    (image_size: $size:expr, number_of_images: $count:expr $(,)?) => {
        &[
            FieldSpec::new("prompt", &[Constraint::Required, Constraint::length(1, 2000)]),
            FieldSpec::new("seed", &[SEED]),
            FieldSpec::new("language", &[Constraint::Pattern(LANGUAGE_PATTERN)]),
            FieldSpec::new("image_size", &[$size]),
            FieldSpec::new("aspect_ratio", &[Constraint::OneOf(IMAGE_ASPECT_RATIOS)]),
            FieldSpec::new("guidance_scale", &[Constraint::range(1.0, 20.0)]),
            FieldSpec::new("negative_prompt", &[NEGATIVE_PROMPT]),
            FieldSpec::new("number_of_images", &[$count]),
            FieldSpec::new(
                "output_mime_type",
                &[Constraint::OneOf(&["image/png", "image/jpeg"])],
            ),
            FieldSpec::new(
                "person_generation",
                &[Constraint::OneOf(&["DONT_ALLOW", "ALLOW_ADULT", "ALLOW_ALL"])],
            ),
            FieldSpec::new(
                "safety_filter_level",
                &[Constraint::OneOf(&[
                    "BLOCK_MEDIUM_AND_ABOVE",
                    "BLOCK_MOST",
                    "BLOCK_SOME",
                    "BLOCK_FEW",
                ])],
            ),
            FieldSpec::new("output_compression_quality", &[Constraint::range(1.0, 100.0)]),
        ]
    };
}

pub const IMAGEN_FIELDS: &[FieldSpec] = imagen_fields!(
    image_size: Constraint::OneOf(&["1K", "2K"]),
    number_of_images: Constraint::range(1.0, 4.0),
);

pub const IMAGEN_FAST_FIELDS: &[FieldSpec] = imagen_fields!(
    image_size: Constraint::Equals("1K"),
    number_of_images: Constraint::range(1.0, 4.0),
);

pub const IMAGEN_ULTRA_FIELDS: &[FieldSpec] = imagen_fields!(
    image_size: Constraint::OneOf(&["1K", "2K"]),
    number_of_images: Constraint::Equals("1"),
);

// ============================================================================
// Flash
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ImageFlashParams {
    #[serde(default)]
    pub prompt: String,
    pub style: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl ToolParameters for ImageFlashParams {}

pub const IMAGE_FLASH_FIELDS: &[FieldSpec] = &[FieldSpec::new("prompt", &[Constraint::Required])];

// ============================================================================
// Nano Banana
// ============================================================================

/// Parameters for Gemini image generation and editing.
///
/// Supports text-to-image, editing of up to three input images and
/// multi-turn context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NanoBananaParams {
    /// Instruction for generation or editing.
    #[serde(default)]
    pub prompt: String,
    /// Images to edit or compose, at most three.
    #[serde(default)]
    pub input_images: Vec<MediaReference>,
    /// Earlier conversation turns.
    #[serde(default)]
    pub context: Vec<ContextMessage>,
    pub aspect_ratio: Option<String>,
}

impl ToolParameters for NanoBananaParams {
    fn check_invariants(&self) -> Result<(), ValidationFailure> {
        for (m, message) in self.context.iter().enumerate() {
            if let Some(p) = message.parts.iter().position(MessagePart::is_empty) {
                return Err(ValidationFailure::invariant(
                    format!("context[{m}].parts[{p}]"),
                    "message part must have either text or storage_url",
                ));
            }
        }
        Ok(())
    }
}

pub const NANO_BANANA_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("prompt", &[Constraint::Required, Constraint::length(1, 2000)]),
    FieldSpec::new(
        "input_images",
        &[
            Constraint::max_items(3),
            Constraint::Each(MEDIA_REFERENCE_FIELDS),
        ],
    ),
    FieldSpec::new("context", &[Constraint::Each(CONTEXT_MESSAGE_FIELDS)]),
    FieldSpec::new("aspect_ratio", &[Constraint::OneOf(IMAGE_ASPECT_RATIOS)]),
];

// ============================================================================
// Veo3
// ============================================================================

/// Parameters for Veo3 video generation, with or without audio.
///
/// Text-to-video needs a prompt, image-to-video needs an image; at least one
/// of the two is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Veo3Params {
    pub prompt: Option<String>,
    /// Starting frame for image-to-video.
    pub image: Option<MediaReference>,
    /// Optional ending frame.
    pub last_frame: Option<MediaReference>,
    pub seed: Option<i64>,
    pub fps: Option<i64>,
    /// Clip length in seconds.
    pub duration: Option<i64>,
    pub resolution: Option<String>,
    pub aspect_ratio: Option<String>,
    pub sample_count: Option<i64>,
    pub enhance_prompt: Option<bool>,
    pub generate_audio: Option<bool>,
    pub negative_prompt: Option<String>,
    pub person_generation: Option<String>,
    pub compression_quality: Option<String>,
}

impl ToolParameters for Veo3Params {
    fn check_invariants(&self) -> Result<(), ValidationFailure> {
        if !has_text(&self.prompt) && self.image.is_none() {
            return Err(ValidationFailure::invariant(
                "prompt",
                "either prompt or image is required",
            ));
        }
        Ok(())
    }
}

pub const VEO3_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("prompt", &[Constraint::length(10, 2000)]),
    FieldSpec::new("image", &[Constraint::Nested(MEDIA_REFERENCE_FIELDS)]),
    FieldSpec::new("last_frame", &[Constraint::Nested(MEDIA_REFERENCE_FIELDS)]),
    FieldSpec::new("seed", &[SEED]),
    FieldSpec::new("fps", &[Constraint::OneOf(FRAME_RATES)]),
    FieldSpec::new("duration", &[Constraint::range(5.0, 8.0)]),
    FieldSpec::new("resolution", &[Constraint::OneOf(&["720p", "1080p"])]),
    FieldSpec::new("aspect_ratio", &[Constraint::OneOf(VIDEO_ASPECT_RATIOS)]),
    FieldSpec::new("sample_count", &[SAMPLE_COUNT]),
    FieldSpec::new("negative_prompt", &[NEGATIVE_PROMPT]),
    FieldSpec::new(
        "person_generation",
        &[Constraint::OneOf(VIDEO_PERSON_GENERATION)],
    ),
    FieldSpec::new(
        "compression_quality",
        &[Constraint::OneOf(COMPRESSION_QUALITIES)],
    ),
];

/// Parameters for Veo3 Fast video generation, with or without audio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Veo3FastParams {
    #[serde(default)]
    pub prompt: String,
    pub seed: Option<i64>,
    pub fps: Option<i64>,
    pub duration: Option<i64>,
    pub aspect_ratio: Option<String>,
    pub sample_count: Option<i64>,
    pub enhance_prompt: Option<bool>,
    pub generate_audio: Option<bool>,
    pub negative_prompt: Option<String>,
    pub person_generation: Option<String>,
    pub compression_quality: Option<String>,
}

impl ToolParameters for Veo3FastParams {}

pub const VEO3_FAST_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("prompt", &[Constraint::Required, Constraint::length(10, 2000)]),
    FieldSpec::new("seed", &[SEED]),
    FieldSpec::new("fps", &[Constraint::OneOf(FRAME_RATES)]),
    FieldSpec::new("duration", &[Constraint::range(5.0, 8.0)]),
    FieldSpec::new("aspect_ratio", &[Constraint::OneOf(VIDEO_ASPECT_RATIOS)]),
    FieldSpec::new("sample_count", &[SAMPLE_COUNT]),
    FieldSpec::new("negative_prompt", &[NEGATIVE_PROMPT]),
    FieldSpec::new(
        "person_generation",
        &[Constraint::OneOf(VIDEO_PERSON_GENERATION)],
    ),
    FieldSpec::new(
        "compression_quality",
        &[Constraint::OneOf(COMPRESSION_QUALITIES)],
    ),
];

// ============================================================================
// Lyria
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LyriaParams {
    /// Genre, mood and instrumentation of the track.
    #[serde(default)]
    pub prompt: String,
    pub seed: Option<i64>,
    pub sample_count: Option<i64>,
    pub negative_prompt: Option<String>,
}

impl ToolParameters for LyriaParams {}

pub const LYRIA_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("prompt", &[Constraint::Required]),
    FieldSpec::new("sample_count", &[SAMPLE_COUNT]),
];
