//! Text generation module.

mod provider;
pub mod providers;

pub use provider::{CompletionRequest, TextProvider};
