//! Image generation module.

pub mod hook;
mod pipeline;
pub mod prompt;
mod provider;
pub mod providers;
mod types;
pub mod watermark;

pub use hook::extract_hook;
pub use pipeline::{day_file_name, BatchReport, DayOutcome, ImageGenerator, ImageJobOptions};
pub use prompt::{build_prompt, normalize_topic, PromptStyle, SafeCategory};
pub use provider::ImageProvider;
pub use types::{
    decode_base64, AspectRatio, GeneratedImage, GenerationMetadata, GenerationRequest,
    ImageFormat, ImagePayload, ImageProviderKind,
};
pub use watermark::Watermark;
