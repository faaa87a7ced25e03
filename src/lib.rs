#![warn(missing_docs)]
//! Campaign Forge - a week of LinkedIn posts and matching banners via AI APIs.
//!
//! The workflow has two stages that run as separate invocations and meet
//! only through files on disk:
//!
//! 1. [`CampaignGenerator`] asks a text model for a seven-day plan, extracts
//!    the JSON from its answer, appends it to the archive store and
//!    overwrites the current-week store.
//! 2. [`ImageGenerator`] reads the current week and produces one image per
//!    day, recording each day's outcome in a [`BatchReport`].
//!
//! # Quick Start - Campaign
//!
//! ```no_run
//! use campaign_forge::{CampaignGenerator, OpenAiTextProvider, Settings};
//!
//! #[tokio::main]
//! async fn main() -> campaign_forge::Result<()> {
//!     let settings = Settings::load(None)?;
//!     let provider = OpenAiTextProvider::builder()
//!         .model(settings.text_model.clone())
//!         .build()?;
//!     let campaign = CampaignGenerator::from_settings(Box::new(provider), &settings)
//!         .run()
//!         .await?;
//!     println!("Week {}: {}", campaign.week, campaign.topic);
//!     Ok(())
//! }
//! ```
//!
//! # Quick Start - Images
//!
//! ```no_run
//! use campaign_forge::{
//!     load_campaign, GeminiProvider, ImageGenerator, ImageJobOptions, PromptStyle, Settings,
//! };
//!
//! #[tokio::main]
//! async fn main() -> campaign_forge::Result<()> {
//!     let settings = Settings::load(None)?;
//!     let provider = GeminiProvider::builder().build()?;
//!     let campaign = load_campaign(&settings.current_path)?;
//!     let options = ImageJobOptions::from_settings(&settings, PromptStyle::Banner);
//!     let report = ImageGenerator::new(Box::new(provider), options)
//!         .run(&campaign)
//!         .await?;
//!     println!("{} of {} images saved", report.succeeded().len(), report.attempted());
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `openai-image`: OpenAI images (dall-e-2, dall-e-3, gpt-image-1)
//! - `gemini-image`: Gemini images (Google)
//! - `cli`: Command-line interface

pub mod campaign;
pub mod config;
mod error;
pub mod image;
pub mod text;

// Re-export error types at crate root
pub use error::{CampaignError, Result};

pub use config::Settings;

pub use campaign::{
    extract_json, load_campaign, ArchiveStore, Campaign, CampaignDraft, CampaignGenerator,
    CampaignStore, DayPost, PostType,
};

pub use crate::image::{
    extract_hook, AspectRatio, BatchReport, DayOutcome, GeneratedImage, GenerationRequest,
    ImageGenerator, ImageJobOptions, ImagePayload, ImageProvider, ImageProviderKind, PromptStyle,
    Watermark,
};

pub use text::providers::{OpenAiTextProvider, OpenAiTextProviderBuilder};
pub use text::{CompletionRequest, TextProvider};

#[cfg(feature = "gemini-image")]
pub use crate::image::providers::{GeminiModel, GeminiProvider, GeminiProviderBuilder};

#[cfg(feature = "openai-image")]
pub use crate::image::providers::{OpenAiImageModel, OpenAiImageProvider, OpenAiImageProviderBuilder};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::campaign::{Campaign, CampaignGenerator, CampaignStore};
    pub use crate::config::Settings;
    pub use crate::error::{CampaignError, Result};
    pub use crate::image::{ImageGenerator, ImageJobOptions, ImageProvider, PromptStyle};
    pub use crate::text::TextProvider;

    #[cfg(feature = "gemini-image")]
    pub use crate::image::providers::GeminiProvider;

    #[cfg(feature = "openai-image")]
    pub use crate::image::providers::OpenAiImageProvider;

    pub use crate::text::providers::OpenAiTextProvider;
}
