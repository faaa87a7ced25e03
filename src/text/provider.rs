//! Text completion provider trait.

use crate::error::Result;
use async_trait::async_trait;

/// A single prompt with an output-length budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// The full instruction text.
    pub prompt: String,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Creates a request with the given prompt and token budget.
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
        }
    }
}

/// Trait for text generation backends: prompt in, text out.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Returns the model's free-form answer, trimmed.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Returns the name of this provider for display.
    fn name(&self) -> &str;
}
