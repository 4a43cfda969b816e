//! Parameter contracts, one typed record per tool family.
//!
//! ## Organization
//! - `media` - Image, video and music generation (Imagen, Flash, Nano Banana, Veo3, Lyria)
//! - `video` - Video and image processing (combine, trim, merge, extract)
//! - `analysis` - Content analysis and web search
//!
//! Each record comes with one or more `*_FIELDS` tables. Tools that share a
//! record but differ in limits (the Imagen variants) get their own table;
//! aliased tools (Veo3 with and without audio) share record and table.

pub mod analysis;
pub mod media;
pub mod video;

pub use analysis::{ContentAnalyzerParams, GoogleSearchParams};
pub use media::{
    ContextMessage, ImageFlashParams, ImagenParams, LyriaParams, MediaReference, MessagePart,
    NanoBananaParams, Veo3FastParams, Veo3Params,
};
pub use video::{
    CombineVideosParams, ExtractFrameParams, ImageAudioMergeParams, MergeImagesParams,
    TrimVideoParams,
};

use super::constraints::ValidationFailure;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A typed tool parameter record.
///
/// Declarative limits live in the record's field table. This trait only adds
/// the cross-field rule a table cannot express, run after the table passes.
pub trait ToolParameters: DeserializeOwned + JsonSchema + Into<ToolParams> {
    fn check_invariants(&self) -> Result<(), ValidationFailure> {
        Ok(())
    }
}

/// Validated parameters of any tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolParams {
    Imagen(ImagenParams),
    ImageFlash(ImageFlashParams),
    NanoBanana(NanoBananaParams),
    Veo3(Veo3Params),
    Veo3Fast(Veo3FastParams),
    Lyria(LyriaParams),
    CombineVideos(CombineVideosParams),
    TrimVideo(TrimVideoParams),
    ImageAudioMerge(ImageAudioMergeParams),
    ExtractFrame(ExtractFrameParams),
    MergeImages(MergeImagesParams),
    ContentAnalyzer(ContentAnalyzerParams),
    GoogleSearch(GoogleSearchParams),
}

macro_rules! tool_params_from {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for ToolParams {
                fn from(params: $ty) -> Self {
                    Self::$variant(params)
                }
            }
        )+
    };
}

tool_params_from! {
    Imagen => ImagenParams,
    ImageFlash => ImageFlashParams,
    NanoBanana => NanoBananaParams,
    Veo3 => Veo3Params,
    Veo3Fast => Veo3FastParams,
    Lyria => LyriaParams,
    CombineVideos => CombineVideosParams,
    TrimVideo => TrimVideoParams,
    ImageAudioMerge => ImageAudioMergeParams,
    ExtractFrame => ExtractFrameParams,
    MergeImages => MergeImagesParams,
    ContentAnalyzer => ContentAnalyzerParams,
    GoogleSearch => GoogleSearchParams,
}

/// Whether an optional string carries a non-empty value.
pub(crate) fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}
