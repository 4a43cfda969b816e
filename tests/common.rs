//! Test helper utilities for latent-contracts integration tests
//!
//! Payload fixtures and small assertion helpers shared across test files.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use latent_contracts::{ServiceError, ToolName};
use serde_json::{json, Map, Value};

/// Convert a `json!` object literal into the payload map the dispatcher takes.
///
/// # Panics
///
/// Panics if `value` is not a JSON object.
pub fn payload(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("payload must be a JSON object, got {other}"),
    }
}

/// A minimal payload that passes validation for `tool`.
pub fn valid_payload(tool: ToolName) -> Map<String, Value> {
    let value = match tool {
        ToolName::GenerateImageImagen
        | ToolName::GenerateImageImagenFast
        | ToolName::GenerateImageImagenUltra
        | ToolName::GenerateImageFlash
        | ToolName::GenerateMusicLyria => json!({"prompt": "A lighthouse at dusk"}),
        ToolName::NanoBanana => json!({
            "prompt": "Add a sunset background",
            "input_images": [{"storage_url": "gs://bucket/in.png", "mime_type": "image/png"}],
            "context": [{"role": "user", "parts": [{"text": "Make it warmer"}]}]
        }),
        ToolName::GenerateVideoVeo3
        | ToolName::GenerateVideoVeo3NoAudio
        | ToolName::GenerateVideoVeo3Fast
        | ToolName::GenerateVideoVeo3FastNoAudio => json!({
            "prompt": "A slow pan across a misty forest",
            "duration": 8,
            "aspect_ratio": "16:9"
        }),
        ToolName::CombineVideos => json!({
            "video_urls": ["gs://bucket/a.mp4", "gs://bucket/b.mp4"],
            "transition": "dissolve"
        }),
        ToolName::TrimVideo => json!({
            "video_url": "gs://bucket/a.mp4",
            "start_time": "00:00:10",
            "duration": 30
        }),
        ToolName::ImageAudioMerge => json!({
            "image_url": "gs://bucket/cover.png",
            "audio_url": "gs://bucket/track.mp3",
            "resolution": "1280x720"
        }),
        ToolName::ExtractFrame => json!({"video_url": "gs://bucket/a.mp4", "position": "middle"}),
        ToolName::MergeImages => json!({
            "images": ["gs://bucket/1.png", "gs://bucket/2.png"],
            "layout": "grid"
        }),
        ToolName::ContentAnalyzer => json!({"url": "https://example.com/article"}),
        ToolName::GoogleSearch => json!({"query": "rust error handling", "max_results": 5}),
    };
    payload(value)
}

/// First validation detail of an error.
///
/// # Panics
///
/// Panics if the error carries no validation details.
pub fn first_detail(err: &ServiceError) -> &latent_contracts::ValidationDetail {
    err.metadata()
        .and_then(|m| m.validation_details.first())
        .expect("error should carry a validation detail")
}
