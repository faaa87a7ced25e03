//! OpenAI image generation provider (dall-e-2, dall-e-3, gpt-image-1).

use crate::error::{parse_retry_after, sanitize_error_message, CampaignError, Result};
use crate::image::provider::{download_with_timeout, ImageProvider};
use crate::image::types::{AspectRatio, GenerationRequest, ImagePayload, ImageProviderKind};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GENERATIONS_URL: &str = "https://api.openai.com/v1/images/generations";

/// Default timeout for fetching URL-served images.
const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// OpenAI image model variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpenAiImageModel {
    /// DALL-E 2 - the images endpoint's own default; answers with URLs.
    #[default]
    DallE2,
    /// DALL-E 3 - high quality image generation.
    DallE3,
    /// GPT Image 1 - answers with base64 data.
    GptImage1,
}

impl OpenAiImageModel {
    /// Returns the API model identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DallE2 => "dall-e-2",
            Self::DallE3 => "dall-e-3",
            Self::GptImage1 => "gpt-image-1",
        }
    }
}

/// Builder for OpenAiImageProvider.
#[derive(Debug, Clone, Default)]
pub struct OpenAiImageProviderBuilder {
    api_key: Option<String>,
    model: OpenAiImageModel,
    download_timeout: Option<Duration>,
}

impl OpenAiImageProviderBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `OPENAI_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the OpenAI image model variant.
    pub fn model(mut self, model: OpenAiImageModel) -> Self {
        self.model = model;
        self
    }

    /// Sets the timeout for downloading URL-served images (default: 60s).
    pub fn download_timeout(mut self, timeout: Duration) -> Self {
        self.download_timeout = Some(timeout);
        self
    }

    /// Builds the provider, resolving the API key.
    pub fn build(self) -> Result<OpenAiImageProvider> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                CampaignError::Auth("OPENAI_API_KEY not set and no API key provided".into())
            })?;

        Ok(OpenAiImageProvider {
            client: reqwest::Client::new(),
            api_key,
            model: self.model,
            download_timeout: self.download_timeout.unwrap_or(DEFAULT_DOWNLOAD_TIMEOUT),
        })
    }
}

/// OpenAI image generation provider.
pub struct OpenAiImageProvider {
    client: reqwest::Client,
    api_key: String,
    model: OpenAiImageModel,
    download_timeout: Duration,
}

impl OpenAiImageProvider {
    /// Creates a new `OpenAiImageProviderBuilder`.
    pub fn builder() -> OpenAiImageProviderBuilder {
        OpenAiImageProviderBuilder::new()
    }

    /// Maps width/height or aspect_ratio to an OpenAI size string.
    fn resolve_size(request: &GenerationRequest, model: &OpenAiImageModel) -> Option<String> {
        // Explicit width/height takes priority
        if let (Some(w), Some(h)) = (request.width, request.height) {
            return Some(format!("{}x{}", w, h));
        }

        let ar = request.aspect_ratio?;
        let size = match model {
            OpenAiImageModel::DallE2 => "1024x1024",
            OpenAiImageModel::GptImage1 => match ar {
                AspectRatio::Square => "1024x1024",
                AspectRatio::Landscape | AspectRatio::Standard => "1536x1024",
                AspectRatio::Portrait | AspectRatio::StandardPortrait => "1024x1536",
            },
            OpenAiImageModel::DallE3 => match ar {
                AspectRatio::Square => "1024x1024",
                AspectRatio::Landscape | AspectRatio::Standard => "1792x1024",
                AspectRatio::Portrait | AspectRatio::StandardPortrait => "1024x1792",
            },
        };
        Some(size.to_string())
    }

    fn parse_error(
        &self,
        status: u16,
        text: &str,
        headers: &reqwest::header::HeaderMap,
    ) -> CampaignError {
        let text = sanitize_error_message(text);
        if status == 429 {
            let retry_after = parse_retry_after(headers).map(std::time::Duration::from_secs);
            return CampaignError::RateLimited { retry_after };
        }
        if status == 401 || status == 403 {
            return CampaignError::Auth(text);
        }
        let lower = text.to_lowercase();
        if lower.contains("safety") || lower.contains("blocked") || lower.contains("content_policy")
        {
            return CampaignError::ContentBlocked(text);
        }
        CampaignError::Api {
            status,
            message: text,
        }
    }
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    async fn request(&self, request: &GenerationRequest) -> Result<ImagePayload> {
        let body = OpenAiImageRequest::from_generation_request(request, &self.model);

        let response = self
            .client
            .post(GENERATIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let text = response.text().await.unwrap_or_default();
            return Err(self.parse_error(status.as_u16(), &text, &headers));
        }

        let openai_response: OpenAiImageResponse = response.json().await?;
        openai_response.into_payload()
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        download_with_timeout(&self.client, url, self.download_timeout).await
    }

    fn kind(&self) -> ImageProviderKind {
        ImageProviderKind::OpenAI
    }

    fn model(&self) -> &str {
        self.model.as_str()
    }
}

#[derive(Debug, Serialize)]
struct OpenAiImageRequest {
    model: String,
    prompt: String,
    n: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<String>,
}

impl OpenAiImageRequest {
    fn from_generation_request(req: &GenerationRequest, model: &OpenAiImageModel) -> Self {
        Self {
            model: model.as_str().to_string(),
            prompt: req.prompt.clone(),
            n: 1,
            size: OpenAiImageProvider::resolve_size(req, model),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiImageResponse {
    #[serde(default)]
    data: Vec<OpenAiImageData>,
}

#[derive(Debug, Deserialize)]
struct OpenAiImageData {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    b64_json: Option<String>,
}

impl OpenAiImageResponse {
    fn into_payload(self) -> Result<ImagePayload> {
        let image_data = self.data.into_iter().next().ok_or_else(|| {
            CampaignError::UnexpectedResponse("No images in OpenAI response".into())
        })?;
        ImagePayload::from_fields(image_data.b64_json, image_data.url)
    }
}
