//! OpenAI legacy completions provider.

use crate::error::{parse_retry_after, sanitize_error_message, CampaignError, Result};
use crate::text::provider::{CompletionRequest, TextProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/completions";

/// Default completion model.
pub const DEFAULT_TEXT_MODEL: &str = "gpt-5.1";

/// Builder for OpenAiTextProvider.
#[derive(Debug, Clone, Default)]
pub struct OpenAiTextProviderBuilder {
    api_key: Option<String>,
    model: Option<String>,
}

impl OpenAiTextProviderBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `OPENAI_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the completion model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Builds the provider, resolving the API key.
    pub fn build(self) -> Result<OpenAiTextProvider> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                CampaignError::Auth("OPENAI_API_KEY not set and no API key provided".into())
            })?;

        Ok(OpenAiTextProvider {
            client: reqwest::Client::new(),
            api_key,
            model: self.model.unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
        })
    }
}

/// OpenAI text completion provider.
pub struct OpenAiTextProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiTextProvider {
    /// Creates a new `OpenAiTextProviderBuilder`.
    pub fn builder() -> OpenAiTextProviderBuilder {
        OpenAiTextProviderBuilder::new()
    }

    /// Returns the configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
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
        if status == 400 || status == 404 {
            return CampaignError::InvalidRequest(text);
        }
        CampaignError::Api {
            status,
            message: text,
        }
    }
}

#[async_trait]
impl TextProvider for OpenAiTextProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let start = Instant::now();
        let body = OpenAiCompletionRequest::new(&self.model, request);

        let response = self
            .client
            .post(COMPLETIONS_URL)
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

        let completion: OpenAiCompletionResponse = response.json().await?;
        let text = completion.into_text()?;

        tracing::debug!(
            model = %self.model,
            chars = text.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "completion received"
        );
        Ok(text)
    }

    fn name(&self) -> &str {
        "OpenAI completions"
    }
}

#[derive(Debug, Serialize)]
struct OpenAiCompletionRequest {
    model: String,
    prompt: String,
    max_tokens: u32,
    n: u32,
}

impl OpenAiCompletionRequest {
    fn new(model: &str, request: &CompletionRequest) -> Self {
        Self {
            model: model.to_string(),
            prompt: request.prompt.clone(),
            max_tokens: request.max_tokens,
            n: 1,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiCompletionResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    #[serde(default)]
    text: Option<String>,
}

impl OpenAiCompletionResponse {
    fn into_text(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.text)
            .map(|t| t.trim().to_string())
            .ok_or_else(|| {
                CampaignError::UnexpectedResponse("no text in OpenAI completion response".into())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_with_explicit_key() {
        let provider = OpenAiTextProviderBuilder::new().api_key("sk-test").build();
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().model(), DEFAULT_TEXT_MODEL);
    }

    #[test]
    fn test_builder_rejects_blank_key() {
        let provider = OpenAiTextProviderBuilder::new().api_key("  ").build();
        assert!(matches!(provider, Err(CampaignError::Auth(_))));
    }

    #[test]
    fn test_builder_with_model() {
        let provider = OpenAiTextProviderBuilder::new()
            .api_key("sk-test")
            .model("gpt-3.5-turbo-instruct")
            .build()
            .unwrap();
        assert_eq!(provider.model(), "gpt-3.5-turbo-instruct");
    }

    #[test]
    fn test_request_serialization() {
        let req = CompletionRequest::new("Write posts", 5000);
        let body = OpenAiCompletionRequest::new("gpt-5.1", &req);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "gpt-5.1");
        assert_eq!(json["prompt"], "Write posts");
        assert_eq!(json["max_tokens"], 5000);
        assert_eq!(json["n"], 1);
    }

    #[test]
    fn test_response_text_is_trimmed() {
        let json = r#"{"choices": [{"text": "\n\n{\"topic\": \"x\"}\n", "index": 0}]}"#;
        let resp: OpenAiCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_text().unwrap(), "{\"topic\": \"x\"}");
    }

    #[test]
    fn test_response_without_choices() {
        let resp: OpenAiCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            resp.into_text(),
            Err(CampaignError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn test_parse_error_mapping() {
        let provider = OpenAiTextProviderBuilder::new()
            .api_key("sk-test")
            .build()
            .unwrap();
        let headers = reqwest::header::HeaderMap::new();

        assert!(matches!(
            provider.parse_error(401, "bad key", &headers),
            CampaignError::Auth(_)
        ));
        assert!(matches!(
            provider.parse_error(429, "slow down", &headers),
            CampaignError::RateLimited { retry_after: None }
        ));
        assert!(matches!(
            provider.parse_error(500, "boom", &headers),
            CampaignError::Api { status: 500, .. }
        ));
    }
}
