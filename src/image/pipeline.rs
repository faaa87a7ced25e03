//! Image stage: one banner per day of the current campaign.

use crate::campaign::{Campaign, DayPost};
use crate::config::Settings;
use crate::error::Result;
use crate::image::hook::extract_hook;
use crate::image::prompt::{build_prompt, PromptStyle};
use crate::image::provider::ImageProvider;
use crate::image::types::{AspectRatio, GenerationRequest};
use crate::image::watermark::Watermark;
use image::DynamicImage;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File name for a day's image, e.g. `week_day03.png`.
pub fn day_file_name(day: u32) -> String {
    format!("week_day{day:02}.png")
}

/// Options for an image run.
#[derive(Debug, Clone)]
pub struct ImageJobOptions {
    /// Where images are written.
    pub output_dir: PathBuf,
    /// Maximum hook length.
    pub hook_max_chars: usize,
    /// Hook used for empty posts.
    pub fallback_hook: String,
    /// Which prompt template to use.
    pub style: PromptStyle,
    /// Square edge length requested from size-based providers.
    pub image_size: u32,
    /// Aspect ratio requested from ratio-based providers.
    pub aspect_ratio: AspectRatio,
}

impl ImageJobOptions {
    /// Builds options from settings with the given prompt style.
    pub fn from_settings(settings: &Settings, style: PromptStyle) -> Self {
        Self {
            output_dir: settings.output_dir.clone(),
            hook_max_chars: settings.hook_max_chars,
            fallback_hook: settings.fallback_hook.clone(),
            style,
            image_size: settings.image_size,
            aspect_ratio: settings.image_aspect_ratio,
        }
    }
}

/// Result of one day's attempt.
#[derive(Debug, Clone, Serialize)]
pub struct DayOutcome {
    /// Day number from the campaign.
    pub day: u32,
    /// Saved file on success, rendered error otherwise.
    pub result: std::result::Result<PathBuf, String>,
}

/// Per-day results of an image run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// One entry per day, in campaign order.
    pub outcomes: Vec<DayOutcome>,
}

impl BatchReport {
    /// Number of days attempted.
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Paths of the images that were saved.
    pub fn succeeded(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(PathBuf::as_path))
            .collect()
    }

    /// Days that failed, with their errors.
    pub fn failed(&self) -> Vec<(u32, &str)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.day, e.as_str())))
            .collect()
    }
}

/// Generates one image per post, sequentially.
pub struct ImageGenerator {
    provider: Box<dyn ImageProvider>,
    options: ImageJobOptions,
    watermark: Option<Watermark>,
}

impl ImageGenerator {
    /// Creates a generator.
    pub fn new(provider: Box<dyn ImageProvider>, options: ImageJobOptions) -> Self {
        Self {
            provider,
            options,
            watermark: None,
        }
    }

    /// Stamps every saved image with the given watermark.
    pub fn with_watermark(mut self, watermark: Watermark) -> Self {
        self.watermark = Some(watermark);
        self
    }

    /// Builds the prompt for one post.
    pub fn prompt_for(&self, campaign: &Campaign, post: &DayPost) -> String {
        let hook = extract_hook(
            &post.content,
            self.options.hook_max_chars,
            &self.options.fallback_hook,
        );
        build_prompt(self.options.style, &hook, &campaign.topic)
    }

    /// Processes every day. A failing day is recorded and skipped; only
    /// failing to create the output directory aborts the run.
    pub async fn run(&self, campaign: &Campaign) -> Result<BatchReport> {
        std::fs::create_dir_all(&self.options.output_dir)?;

        let mut report = BatchReport::default();
        for post in &campaign.days {
            let result = self.process_day(campaign, post).await;
            match &result {
                Ok(path) => tracing::info!(day = post.day, path = %path.display(), "saved image"),
                Err(e) => tracing::warn!(day = post.day, error = %e, "skipping day"),
            }
            report.outcomes.push(DayOutcome {
                day: post.day,
                result: result.map_err(|e| e.to_string()),
            });
        }

        tracing::info!(
            attempted = report.attempted(),
            saved = report.succeeded().len(),
            "image run finished"
        );
        Ok(report)
    }

    async fn process_day(&self, campaign: &Campaign, post: &DayPost) -> Result<PathBuf> {
        let prompt = self.prompt_for(campaign, post);
        tracing::debug!(day = post.day, post_type = %post.post_type, prompt = %prompt, "built prompt");

        let request = GenerationRequest::new(prompt)
            .with_size(self.options.image_size, self.options.image_size)
            .with_aspect_ratio(self.options.aspect_ratio);
        let generated = self.provider.generate(&request).await?;
        let decoded = generated.decode()?;
        let finished = match &self.watermark {
            Some(watermark) => DynamicImage::ImageRgb8(watermark.apply(&decoded)),
            None => decoded,
        };

        let path = self.options.output_dir.join(day_file_name(post.day));
        write_png(&finished, &path)?;
        Ok(path)
    }
}

/// Encodes in memory first so a failed encode leaves no file behind.
fn write_png(img: &DynamicImage, path: &Path) -> Result<()> {
    let mut bytes = std::io::Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png)?;
    std::fs::write(path, bytes.into_inner())?;
    Ok(())
}
