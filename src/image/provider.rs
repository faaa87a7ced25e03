//! Image provider trait and utilities.

use crate::error::{CampaignError, Result};
use crate::image::types::{
    decode_base64, GeneratedImage, GenerationMetadata, GenerationRequest, ImageFormat,
    ImagePayload, ImageProviderKind,
};
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Trait for image generation providers.
///
/// Implementors make one API call per [`ImageProvider::request`] and report
/// what came back as an [`ImagePayload`]. [`ImageProvider::generate`] turns
/// that into bytes.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Calls the API once and returns the image payload.
    async fn request(&self, request: &GenerationRequest) -> Result<ImagePayload>;

    /// Downloads an image served by URL.
    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        Err(CampaignError::UnexpectedResponse(format!(
            "{} does not serve images by URL: {url}",
            self.name()
        )))
    }

    /// Returns the kind of this provider.
    fn kind(&self) -> ImageProviderKind;

    /// Returns the model identifier used for requests.
    fn model(&self) -> &str;

    /// Returns the name of this provider for display.
    fn name(&self) -> &str {
        match self.kind() {
            ImageProviderKind::OpenAI => "OpenAI (DALL-E / gpt-image)",
            ImageProviderKind::Gemini => "Gemini (Google)",
        }
    }

    /// Requests an image and resolves the payload to bytes: inline base64 is
    /// decoded, a URL is downloaded.
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
        let start = Instant::now();

        let (data, mime_type) = match self.request(request).await? {
            ImagePayload::Inline { data, mime_type } => (decode_base64(&data)?, mime_type),
            ImagePayload::RemoteUrl(url) => {
                tracing::debug!(url = %url, "downloading generated image");
                (self.download(&url).await?, None)
            }
        };

        let format = ImageFormat::from_magic_bytes(&data)
            .or_else(|| mime_type.as_deref().and_then(ImageFormat::from_mime_type))
            .unwrap_or_default();

        Ok(GeneratedImage::new(
            data,
            format,
            self.kind(),
            GenerationMetadata {
                model: Some(self.model().to_string()),
                duration_ms: Some(start.elapsed().as_millis() as u64),
            },
        ))
    }
}

/// Fetches `url` once with the given timeout. No retry.
#[cfg_attr(not(feature = "openai-image"), allow(dead_code))]
pub(crate) async fn download_with_timeout(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<Vec<u8>> {
    let response = client.get(url).timeout(timeout).send().await?;
    if !response.status().is_success() {
        return Err(CampaignError::Api {
            status: response.status().as_u16(),
            message: "Failed to download image from URL".into(),
        });
    }
    Ok(response.bytes().await?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(ImagePayload);

    #[async_trait]
    impl ImageProvider for Fixed {
        async fn request(&self, _request: &GenerationRequest) -> Result<ImagePayload> {
            Ok(self.0.clone())
        }

        fn kind(&self) -> ImageProviderKind {
            ImageProviderKind::Gemini
        }

        fn model(&self) -> &str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_generate_decodes_inline_payload() {
        let provider = Fixed(ImagePayload::Inline {
            data: "AQID".into(),
            mime_type: Some("image/jpeg".into()),
        });
        let image = provider.generate(&GenerationRequest::new("x")).await.unwrap();
        assert_eq!(image.data, vec![1, 2, 3]);
        assert_eq!(image.format, ImageFormat::Jpeg);
        assert_eq!(image.metadata.model.as_deref(), Some("fixed"));
    }

    #[tokio::test]
    async fn test_generate_url_without_download_support() {
        let provider = Fixed(ImagePayload::RemoteUrl("https://example.com/a.png".into()));
        let err = provider.generate(&GenerationRequest::new("x")).await.unwrap_err();
        assert!(matches!(err, CampaignError::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn test_generate_bad_base64_is_decode_error() {
        let provider = Fixed(ImagePayload::Inline {
            data: "@@@".into(),
            mime_type: None,
        });
        let err = provider.generate(&GenerationRequest::new("x")).await.unwrap_err();
        assert!(matches!(err, CampaignError::Decode(_)));
    }
}
