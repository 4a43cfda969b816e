//! The closed set of invocable tools.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Identifier of one invocable tool.
///
/// Parses from and formats as its wire name (`generate-image-imagen`, ...).
/// Every variant has exactly one parameter contract and one metadata record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
    AsRefStr,
)]
pub enum ToolName {
    // Media generation
    #[serde(rename = "generate-image-imagen")]
    #[strum(serialize = "generate-image-imagen")]
    GenerateImageImagen,
    #[serde(rename = "generate-image-imagen-fast")]
    #[strum(serialize = "generate-image-imagen-fast")]
    GenerateImageImagenFast,
    #[serde(rename = "generate-image-imagen-ultra")]
    #[strum(serialize = "generate-image-imagen-ultra")]
    GenerateImageImagenUltra,
    #[serde(rename = "generate-image-flash")]
    #[strum(serialize = "generate-image-flash")]
    GenerateImageFlash,
    #[serde(rename = "nano-banana")]
    #[strum(serialize = "nano-banana")]
    NanoBanana,
    #[serde(rename = "generate-video-veo3")]
    #[strum(serialize = "generate-video-veo3")]
    GenerateVideoVeo3,
    #[serde(rename = "generate-video-veo3-fast")]
    #[strum(serialize = "generate-video-veo3-fast")]
    GenerateVideoVeo3Fast,
    #[serde(rename = "generate-video-veo3-fast-no-audio")]
    #[strum(serialize = "generate-video-veo3-fast-no-audio")]
    GenerateVideoVeo3FastNoAudio,
    #[serde(rename = "generate-video-veo3-no-audio")]
    #[strum(serialize = "generate-video-veo3-no-audio")]
    GenerateVideoVeo3NoAudio,
    #[serde(rename = "generate-music-lyria")]
    #[strum(serialize = "generate-music-lyria")]
    GenerateMusicLyria,

    // Video processing
    #[serde(rename = "combine-videos")]
    #[strum(serialize = "combine-videos")]
    CombineVideos,
    #[serde(rename = "trim-video")]
    #[strum(serialize = "trim-video")]
    TrimVideo,
    #[serde(rename = "image-audio-merge")]
    #[strum(serialize = "image-audio-merge")]
    ImageAudioMerge,
    #[serde(rename = "extract-frame")]
    #[strum(serialize = "extract-frame")]
    ExtractFrame,
    #[serde(rename = "merge-images")]
    #[strum(serialize = "merge-images")]
    MergeImages,

    // Content analysis
    #[serde(rename = "content-analyzer")]
    #[strum(serialize = "content-analyzer")]
    ContentAnalyzer,
    #[serde(rename = "google-search")]
    #[strum(serialize = "google-search")]
    GoogleSearch,
}

impl ToolName {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Whether `name` is the wire name of a known tool.
pub fn is_valid_tool_name(name: &str) -> bool {
    name.parse::<ToolName>().is_ok()
}
