//! Image generation providers.

#[cfg(feature = "gemini-image")]
mod gemini;
#[cfg(feature = "openai-image")]
mod openai;

#[cfg(feature = "gemini-image")]
pub use gemini::{GeminiModel, GeminiProvider, GeminiProviderBuilder};

#[cfg(feature = "openai-image")]
pub use openai::{OpenAiImageModel, OpenAiImageProvider, OpenAiImageProviderBuilder};
