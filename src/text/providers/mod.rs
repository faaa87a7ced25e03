//! Text generation providers.

mod openai;

pub use openai::{OpenAiTextProvider, OpenAiTextProviderBuilder, DEFAULT_TEXT_MODEL};
