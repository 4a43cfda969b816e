//! Static descriptive data per tool: cost, routing and examples.
//!
//! The table is a single exhaustive `match`, so a new [`ToolName`] without a
//! metadata record does not compile.

use super::names::ToolName;
use serde::Serialize;
use strum::{Display, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ToolType {
    Media,
    Native,
    ImageProcessing,
}

/// Backend service that executes a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ServiceType {
    MediaAi,
    VideoProcessor,
    Native,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OutputType {
    Image,
    Video,
    Audio,
    Json,
    Text,
}

/// Metadata record for one tool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToolMeta {
    pub name: ToolName,
    /// Cost per invocation.
    pub credits: u32,
    pub tool_type: ToolType,
    pub service_type: ServiceType,
    pub description: &'static str,
    pub examples: &'static [&'static str],
    pub output_type: OutputType,
    pub endpoint_path: &'static str,
}

const VEO3_EXAMPLES: &[&str] = &[
    "Create a cinematic 8-second video in 1080p",
    "Generate high-quality product showcase video",
    "Transform this image into a dynamic 8-second video",
    "Make a professional marketing video with specific camera movements",
    "Create artistic video from image with zoom effect",
];

const VEO3_FAST_EXAMPLES: &[&str] = &[
    "Create an 8-second video of a sunset",
    "Generate a preview of product demo",
    "Make a social media clip of nature scene",
    "Quick test video of abstract patterns",
];

/// Metadata for `tool`.
pub fn tool_metadata(tool: ToolName) -> &'static ToolMeta {
    use OutputType::*;
    use ToolName::*;

    match tool {
        GenerateImageImagen => &ToolMeta {
            name: GenerateImageImagen,
            credits: 2,
            tool_type: ToolType::Media,
            service_type: ServiceType::MediaAi,
            description: "Standard quality image generation using Google Imagen 4.0. Balanced quality and speed. Supports creative controls, multiple images, and various aspect ratios. Best for general use cases.",
            examples: &[
                "Generate a professional product photo",
                "Create a marketing banner with text",
                "Design a logo concept",
                "Illustrate a scene from a story",
                "Generate multiple variations of an icon",
            ],
            output_type: Image,
            endpoint_path: "/api/generate-image-imagen/generate/async",
        },
        GenerateImageImagenFast => &ToolMeta {
            name: GenerateImageImagenFast,
            credits: 1,
            tool_type: ToolType::Media,
            service_type: ServiceType::MediaAi,
            description: "Fast, cost-effective image generation using Google Imagen 4.0 Fast. Lower quality but quicker generation and reduced cost. Best for drafts, iterations, and testing.",
            examples: &[
                "Quick draft of a product mockup",
                "Generate test images for layout",
                "Fast iteration on concept art",
                "Budget-friendly batch image generation",
            ],
            output_type: Image,
            endpoint_path: "/api/generate-image-imagen-fast/generate/async",
        },
        GenerateImageImagenUltra => &ToolMeta {
            name: GenerateImageImagenUltra,
            credits: 3,
            tool_type: ToolType::Media,
            service_type: ServiceType::MediaAi,
            description: "Premium ultra-high quality image generation using Google Imagen 4.0 Ultra. Highest quality, photorealistic results. Limited to 1 image per request. Best for hero images, professional photography, and final production.",
            examples: &[
                "Ultra-realistic product photography for marketing",
                "Photorealistic portrait for professional use",
                "High-end architectural visualization",
                "Premium quality hero image for website",
                "Museum-quality artistic rendering",
            ],
            output_type: Image,
            endpoint_path: "/api/generate-image-imagen-ultra/generate/async",
        },
        GenerateImageFlash => &ToolMeta {
            name: GenerateImageFlash,
            credits: 10,
            tool_type: ToolType::Media,
            service_type: ServiceType::MediaAi,
            description: "Generate images using Flash technology. Fast and efficient image generation.",
            examples: &[
                "Generate a quick concept image",
                "Create a draft illustration",
                "Make a simple graphic",
            ],
            output_type: Image,
            endpoint_path: "/api/generate-image-flash/generate/async",
        },
        NanoBanana => &ToolMeta {
            name: NanoBanana,
            credits: 3,
            tool_type: ToolType::Media,
            service_type: ServiceType::MediaAi,
            description: "Versatile image generation with Gemini 2.5 Flash Image Preview. Supports text-to-image, image editing, style transfer, and multi-image composition. Best for creative editing and conversational image generation.",
            examples: &[
                "Create a photorealistic portrait of an elderly Japanese ceramicist",
                "Edit this image to add a sunset background",
                "Combine these three images into a creative composition",
                "Apply the style of this painting to my photo",
                "Transform this sketch into a detailed illustration",
            ],
            output_type: Image,
            endpoint_path: "/api/nano-banana/generate/async",
        },
        GenerateVideoVeo3 => &ToolMeta {
            name: GenerateVideoVeo3,
            credits: 300,
            tool_type: ToolType::Media,
            service_type: ServiceType::MediaAi,
            description: "Premium video generation using Google Veo3. Creates high-quality 8-second videos at up to 1080p resolution with optional audio generation. Supports both text-to-video and image-to-video with optional ending frame control. Best for final production quality.",
            examples: VEO3_EXAMPLES,
            output_type: Video,
            endpoint_path: "/api/generate-video-veo3/generate/async",
        },
        GenerateVideoVeo3Fast => &ToolMeta {
            name: GenerateVideoVeo3Fast,
            credits: 160,
            tool_type: ToolType::Media,
            service_type: ServiceType::MediaAi,
            description: "Fast, cost-effective video generation using Google Veo3 Fast. Generates 8-second videos at 720p resolution with optional audio generation. Best for quick iterations and testing.",
            examples: VEO3_FAST_EXAMPLES,
            output_type: Video,
            endpoint_path: "/api/generate-video-veo3-fast/generate/async",
        },
        GenerateVideoVeo3FastNoAudio => &ToolMeta {
            name: GenerateVideoVeo3FastNoAudio,
            credits: 100,
            tool_type: ToolType::Media,
            service_type: ServiceType::MediaAi,
            description: "Fast, cost-effective video generation using Google Veo3 Fast. Generates 8-second videos at 720p resolution without audio generation.",
            examples: VEO3_FAST_EXAMPLES,
            output_type: Video,
            endpoint_path: "/api/generate-video-veo3-fast-no-audio/generate/async",
        },
        GenerateVideoVeo3NoAudio => &ToolMeta {
            name: GenerateVideoVeo3NoAudio,
            credits: 200,
            tool_type: ToolType::Media,
            service_type: ServiceType::MediaAi,
            description: "Premium video generation using Google Veo3. Creates high-quality 8-second videos at up to 1080p resolution without audio generation. Supports both text-to-video and image-to-video with optional ending frame control. Best for final production quality.",
            examples: VEO3_EXAMPLES,
            output_type: Video,
            endpoint_path: "/api/generate-video-veo3-no-audio/generate/async",
        },
        GenerateMusicLyria => &ToolMeta {
            name: GenerateMusicLyria,
            credits: 3,
            tool_type: ToolType::Media,
            service_type: ServiceType::MediaAi,
            description: "Generate high-quality music using Google Lyria. Creates 30-second instrumental tracks in various genres and styles. Supports custom seeds for reproducible generation.",
            examples: &[
                "Smooth jazz with mellow brass and piano",
                "Epic orchestral battle music with heavy drums",
                "Lo-fi hip hop beat for studying",
            ],
            output_type: Audio,
            endpoint_path: "/api/generate-music-lyria/generate/async",
        },
        CombineVideos => &ToolMeta {
            name: CombineVideos,
            credits: 20,
            tool_type: ToolType::Media,
            service_type: ServiceType::VideoProcessor,
            description: "Combine multiple videos into a single video with optional transitions. Supports fade and dissolve transitions between clips.",
            examples: &[
                "Combine two videos with fade transition",
                "Merge multiple clips into one video",
                "Create a compilation video with transitions",
            ],
            output_type: Video,
            endpoint_path: "/api/video/combine/async",
        },
        TrimVideo => &ToolMeta {
            name: TrimVideo,
            credits: 10,
            tool_type: ToolType::Media,
            service_type: ServiceType::VideoProcessor,
            description: "Trim a video by specifying start and end times or duration. Supports fast mode for quick processing.",
            examples: &[
                "Extract 30-second clip starting at 10 seconds",
                "Trim video from 0:10 to 0:40",
                "Cut the first 5 seconds from a video",
            ],
            output_type: Video,
            endpoint_path: "/api/video/trim/async",
        },
        ImageAudioMerge => &ToolMeta {
            name: ImageAudioMerge,
            credits: 15,
            tool_type: ToolType::Media,
            service_type: ServiceType::VideoProcessor,
            description: "Create a video by combining a static image with an audio track. Perfect for music visualizations or podcast videos.",
            examples: &[
                "Create music video with album cover",
                "Make a podcast video with logo",
                "Generate audio visualization with background image",
            ],
            output_type: Video,
            endpoint_path: "/api/video/image-audio-merge/async",
        },
        ExtractFrame => &ToolMeta {
            name: ExtractFrame,
            credits: 5,
            tool_type: ToolType::Media,
            service_type: ServiceType::VideoProcessor,
            description: "Extract frames from videos at specific positions or timestamps. Supports first, last, middle positions or exact timestamps. Works with generated videos, uploads, or gallery assets.",
            examples: &[
                "Extract the last frame from this video",
                "Get frame at 5 seconds from the video",
                "Extract the middle frame from the generated video",
                "Get the first frame as a thumbnail",
                "Extract frame at 00:00:03.5 from my upload",
            ],
            output_type: Image,
            endpoint_path: "/api/video/extract-frame/async",
        },
        MergeImages => &ToolMeta {
            name: MergeImages,
            credits: 0,
            tool_type: ToolType::ImageProcessing,
            service_type: ServiceType::MediaAi,
            description: "Merge multiple images into a single composite",
            examples: &[],
            output_type: Image,
            endpoint_path: "/api/merge-images/generate/async",
        },
        ContentAnalyzer => &ToolMeta {
            name: ContentAnalyzer,
            credits: 1,
            tool_type: ToolType::Native,
            service_type: ServiceType::MediaAi,
            description: "Analyzes a given web page(s) for information as needed for the core user task or request",
            examples: &[
                "analyze this YouTube video",
                "summarize this article",
                "extract key points from this webpage",
            ],
            output_type: Text,
            endpoint_path: "/api/content-analyzer/generate/async",
        },
        GoogleSearch => &ToolMeta {
            name: GoogleSearch,
            credits: 0,
            tool_type: ToolType::Native,
            service_type: ServiceType::MediaAi,
            description: "Proactively or upon instruction search the internet to build context on the user's request or domain",
            examples: &[
                "search for AI developments",
                "find information about renewable energy",
                "research competitors",
            ],
            output_type: Json,
            endpoint_path: "/api/google-search/generate/async",
        },
    }
}

/// Metadata by wire name, `None` for unknown tools.
pub fn tool_metadata_by_name(name: &str) -> Option<&'static ToolMeta> {
    name.parse::<ToolName>().ok().map(tool_metadata)
}

/// Credit cost by wire name; unknown tools cost nothing.
pub fn tool_credits(name: &str) -> u32 {
    tool_metadata_by_name(name).map_or(0, |meta| meta.credits)
}

pub fn tools_by_type(tool_type: ToolType) -> Vec<&'static ToolMeta> {
    all_tools().filter(|m| m.tool_type == tool_type).collect()
}

pub fn tools_by_service(service_type: ServiceType) -> Vec<&'static ToolMeta> {
    all_tools().filter(|m| m.service_type == service_type).collect()
}

/// Every tool's metadata, in tool order.
pub fn all_tools() -> impl Iterator<Item = &'static ToolMeta> {
    ToolName::iter().map(tool_metadata)
}

/// Caller-supplied URL fields the platform signs before execution.
///
/// Signed copies land in the matching `signed_*` parameter fields.
pub fn signable_fields(tool: ToolName) -> &'static [&'static str] {
    match tool {
        ToolName::CombineVideos => &["video_urls"],
        ToolName::TrimVideo | ToolName::ExtractFrame => &["video_url"],
        ToolName::ImageAudioMerge => &["image_url", "audio_url"],
        ToolName::MergeImages => &["images"],
        _ => &[],
    }
}

pub fn needs_signed_urls(tool: ToolName) -> bool {
    !signable_fields(tool).is_empty()
}
