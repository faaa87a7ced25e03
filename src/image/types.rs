//! Core types for image generation.

use crate::error::{CampaignError, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG format (lossless).
    #[default]
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format.
    WebP,
}

impl ImageFormat {
    /// Returns the matching decoder format.
    pub fn codec(&self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::WebP => image::ImageFormat::WebP,
        }
    }

    /// Maps a MIME type to a format.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// Image provider kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageProviderKind {
    /// OpenAI image models (DALL-E, GPT Image).
    OpenAI,
    /// Google Gemini image models.
    Gemini,
}

impl std::fmt::Display for ImageProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAI => write!(f, "openai"),
            Self::Gemini => write!(f, "gemini"),
        }
    }
}

/// Common aspect ratios for image generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 1:1 square aspect ratio.
    #[default]
    #[serde(rename = "1:1")]
    Square,
    /// 16:9 landscape (widescreen) aspect ratio.
    #[serde(rename = "16:9")]
    Landscape,
    /// 9:16 portrait (tall) aspect ratio.
    #[serde(rename = "9:16")]
    Portrait,
    /// 4:3 standard landscape aspect ratio.
    #[serde(rename = "4:3")]
    Standard,
    /// 3:4 standard portrait aspect ratio.
    #[serde(rename = "3:4")]
    StandardPortrait,
}

impl AspectRatio {
    /// Returns the aspect ratio as a string (e.g., "16:9").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
            Self::Standard => "4:3",
            Self::StandardPortrait => "3:4",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata about the generation process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Model used for generation.
    pub model: Option<String>,
    /// Generation duration in milliseconds, including any download.
    pub duration_ms: Option<u64>,
}

/// A request to generate an image.
///
/// Providers use the fields they understand: OpenAI reads the size,
/// Gemini reads the aspect ratio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The text prompt describing the desired image.
    pub prompt: String,
    /// Desired width in pixels.
    pub width: Option<u32>,
    /// Desired height in pixels.
    pub height: Option<u32>,
    /// Aspect ratio (alternative to width/height).
    pub aspect_ratio: Option<AspectRatio>,
}

impl GenerationRequest {
    /// Creates a new request with the given prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            width: None,
            height: None,
            aspect_ratio: None,
        }
    }

    /// Sets the desired dimensions.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sets the aspect ratio.
    pub fn with_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }
}

/// Image data as returned by a provider, before decoding.
///
/// Providers decide the shape once at the API boundary; everything
/// downstream matches on this instead of probing response fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    /// Base64-encoded bytes embedded in the response.
    Inline {
        /// Base64 text.
        data: String,
        /// MIME type, when the provider reports one.
        mime_type: Option<String>,
    },
    /// A URL the image must be downloaded from.
    RemoteUrl(String),
}

impl ImagePayload {
    /// Picks the payload from optional base64 and URL fields, preferring
    /// base64. Fails if neither is present.
    pub fn from_fields(b64: Option<String>, url: Option<String>) -> Result<Self> {
        match (b64.filter(|s| !s.is_empty()), url.filter(|s| !s.is_empty())) {
            (Some(data), _) => Ok(Self::Inline {
                data,
                mime_type: None,
            }),
            (None, Some(url)) => Ok(Self::RemoteUrl(url)),
            (None, None) => Err(CampaignError::UnexpectedResponse(
                "response contained neither base64 data nor a URL".into(),
            )),
        }
    }
}

/// Decodes standard base64, tolerating embedded whitespace and a data URI
/// prefix.
pub fn decode_base64(input: &str) -> Result<Vec<u8>> {
    let b64 = match input.find(";base64,") {
        Some(pos) => &input[pos + 8..],
        None => input,
    };
    let cleaned: String = b64.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    base64::engine::general_purpose::STANDARD
        .decode(&cleaned)
        .or_else(|_| base64::engine::general_purpose::STANDARD_NO_PAD.decode(&cleaned))
        .map_err(|e| CampaignError::Decode(e.to_string()))
}

/// A generated image with its data and metadata.
#[derive(Debug, Clone)]
#[must_use = "generated image should be saved or processed"]
pub struct GeneratedImage {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// Image format.
    pub format: ImageFormat,
    /// Provider that generated this image.
    pub provider: ImageProviderKind,
    /// Generation metadata.
    pub metadata: GenerationMetadata,
}

impl GeneratedImage {
    /// Creates a new generated image.
    pub fn new(
        data: Vec<u8>,
        format: ImageFormat,
        provider: ImageProviderKind,
        metadata: GenerationMetadata,
    ) -> Self {
        Self {
            data,
            format,
            provider,
            metadata,
        }
    }

    /// Decodes the bytes as the detected format. Bytes that are not an
    /// image of that format are an [`CampaignError::Image`] error.
    pub fn decode(&self) -> Result<image::DynamicImage> {
        Ok(image::load_from_memory_with_format(
            &self.data,
            self.format.codec(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: [u8; 12] = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0];
    const WEBP_MAGIC: [u8; 12] = *b"RIFF\x00\x00\x00\x00WEBP";

    #[test]
    fn test_format_from_magic_bytes() {
        assert_eq!(
            ImageFormat::from_magic_bytes(&PNG_MAGIC),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&JPEG_MAGIC),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&WEBP_MAGIC),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_magic_bytes(b"short"), None);
    }

    #[test]
    fn test_format_from_mime_type() {
        assert_eq!(ImageFormat::from_mime_type("image/png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_mime_type("image/jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_mime_type("text/plain"), None);
    }

    fn encoded(format: image::ImageFormat) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            16,
            16,
            image::Rgb([10, 20, 90]),
        ));
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, format).unwrap();
        bytes.into_inner()
    }

    fn generated(data: Vec<u8>, format: ImageFormat) -> GeneratedImage {
        GeneratedImage::new(
            data,
            format,
            ImageProviderKind::OpenAI,
            GenerationMetadata::default(),
        )
    }

    #[test]
    fn test_decode_png_and_jpeg() {
        let png = generated(encoded(image::ImageFormat::Png), ImageFormat::Png);
        assert_eq!(png.decode().unwrap().width(), 16);

        let jpeg = generated(encoded(image::ImageFormat::Jpeg), ImageFormat::Jpeg);
        assert_eq!(jpeg.decode().unwrap().height(), 16);
    }

    #[test]
    fn test_decode_garbage_is_image_error() {
        let garbage = generated(b"not an image at all".to_vec(), ImageFormat::Png);
        assert!(matches!(garbage.decode(), Err(CampaignError::Image(_))));
    }

    #[test]
    fn test_aspect_ratio_serde() {
        assert_eq!(AspectRatio::Square.as_str(), "1:1");
        let parsed: AspectRatio = serde_json::from_str("\"9:16\"").unwrap();
        assert_eq!(parsed, AspectRatio::Portrait);
    }

    #[test]
    fn test_provider_kind_display() {
        assert_eq!(ImageProviderKind::OpenAI.to_string(), "openai");
        assert_eq!(ImageProviderKind::Gemini.to_string(), "gemini");
    }

    #[test]
    fn test_payload_prefers_base64() {
        let payload =
            ImagePayload::from_fields(Some("AQID".into()), Some("https://x/img.png".into()))
                .unwrap();
        assert!(matches!(payload, ImagePayload::Inline { ref data, .. } if data == "AQID"));
    }

    #[test]
    fn test_payload_falls_back_to_url() {
        let payload =
            ImagePayload::from_fields(Some(String::new()), Some("https://x/img.png".into()))
                .unwrap();
        assert_eq!(payload, ImagePayload::RemoteUrl("https://x/img.png".into()));
    }

    #[test]
    fn test_payload_neither_is_unexpected() {
        let err = ImagePayload::from_fields(None, None).unwrap_err();
        assert!(matches!(err, CampaignError::UnexpectedResponse(_)));
    }

    #[test]
    fn test_decode_base64_lenient() {
        assert_eq!(decode_base64("AQID").unwrap(), vec![1, 2, 3]);
        assert_eq!(decode_base64("AQ\nID").unwrap(), vec![1, 2, 3]);
        assert_eq!(decode_base64("data:image/png;base64,AQID").unwrap(), vec![1, 2, 3]);
        assert_eq!(decode_base64("AQ").unwrap(), vec![1]);
        assert!(matches!(decode_base64("!!!"), Err(CampaignError::Decode(_))));
    }
}
