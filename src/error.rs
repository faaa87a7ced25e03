//! Error types for campaign and image generation.

use std::time::Duration;

/// Errors that can occur while generating or persisting campaign content.
#[derive(Debug, thiserror::Error)]
pub enum CampaignError {
    /// API key missing or invalid.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Settings could not be loaded or are invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Rate limit exceeded.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// Content was blocked by safety filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The API answered, but not in any shape we know how to read.
    #[error("unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// No JSON object could be extracted from model output.
    #[error("JSON not found or invalid: {reason}")]
    Parse {
        /// What went wrong.
        reason: String,
        /// The full model output, for the operator to inspect.
        raw: String,
    },

    /// Failed to decode base64 data.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error (e.g., saving file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image decode, encode or compositing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl CampaignError {
    /// Returns true if this error must stop the process before any work is done.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Auth(_) | Self::Config(_))
    }
}

/// Result type alias for campaign operations.
pub type Result<T> = std::result::Result<T, CampaignError>;

/// Maximum length of an API error message carried inside an error.
const MAX_ERROR_MESSAGE_LEN: usize = 500;

/// Redacts anything that looks like a credential and truncates long bodies.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    let redacted: Vec<String> = text
        .split_whitespace()
        .map(|word| {
            let bare = word.trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '-');
            if bare.starts_with("sk-") || bare.starts_with("AIza") {
                "[REDACTED]".to_string()
            } else {
                word.to_string()
            }
        })
        .collect();
    let joined = redacted.join(" ");

    if joined.chars().count() > MAX_ERROR_MESSAGE_LEN {
        let truncated: String = joined.chars().take(MAX_ERROR_MESSAGE_LEN).collect();
        format!("{truncated}...")
    } else {
        joined
    }
}

/// Parses a `Retry-After` header given in whole seconds.
pub(crate) fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
