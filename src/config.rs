//! Runtime settings.
//!
//! Every path and tunable the workflow uses lives here so nothing is tied to
//! a particular machine. Settings come from an optional TOML file, then
//! `CAMPAIGN_FORGE_*` environment variables override the file paths.
//! API credentials are never stored here; providers read them from the
//! environment when they are built.

use crate::error::{CampaignError, Result};
use crate::image::AspectRatio;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "campaign-forge.toml";

/// Workflow settings shared by the campaign and image stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cumulative list-of-campaigns store.
    pub archive_path: PathBuf,
    /// Single most recent campaign, overwritten on every run.
    pub current_path: PathBuf,
    /// Directory where day images are written.
    pub output_dir: PathBuf,
    /// Logo used for watermarking.
    pub logo_path: PathBuf,
    /// Maximum characters in a hook before it is truncated.
    pub hook_max_chars: usize,
    /// Hook used when a post has no content.
    pub fallback_hook: String,
    /// Text completion model.
    pub text_model: String,
    /// Output-length budget for the campaign completion.
    pub max_output_tokens: u32,
    /// Edge length of the square images requested from OpenAI.
    pub image_size: u32,
    /// Aspect ratio requested from Gemini.
    pub image_aspect_ratio: AspectRatio,
    /// Company the campaign is written for.
    pub company_name: String,
    /// Call-to-action link included in every post.
    pub company_url: String,
    /// Timeout for downloading images served by URL.
    pub download_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            archive_path: PathBuf::from("all_weeks.json"),
            current_path: PathBuf::from("current_week.json"),
            output_dir: PathBuf::from("generated_images"),
            logo_path: PathBuf::from("logo.png"),
            hook_max_chars: 90,
            fallback_hook: "CurlSek.ai".to_string(),
            text_model: "gpt-5.1".to_string(),
            max_output_tokens: 5000,
            image_size: 1024,
            image_aspect_ratio: AspectRatio::Square,
            company_name: "CurlSek".to_string(),
            company_url: "https://curlsek.ai".to_string(),
            download_timeout_secs: 60,
        }
    }
}

impl Settings {
    /// Loads settings.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read if present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)?
                } else {
                    Self::default()
                }
            }
        };
        settings.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Parses settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CampaignError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses settings from TOML text. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(content).map_err(|e| CampaignError::Config(e.to_string()))?;
        if settings.hook_max_chars < 4 {
            return Err(CampaignError::Config(
                "hook_max_chars must be at least 4".into(),
            ));
        }
        Ok(settings)
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("CAMPAIGN_FORGE_ARCHIVE") {
            self.archive_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("CAMPAIGN_FORGE_CURRENT") {
            self.current_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("CAMPAIGN_FORGE_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("CAMPAIGN_FORGE_LOGO") {
            self.logo_path = PathBuf::from(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.archive_path, PathBuf::from("all_weeks.json"));
        assert_eq!(s.current_path, PathBuf::from("current_week.json"));
        assert_eq!(s.hook_max_chars, 90);
        assert_eq!(s.max_output_tokens, 5000);
        assert_eq!(s.image_aspect_ratio, AspectRatio::Square);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let s = Settings::from_toml(
            r#"
            output_dir = "/tmp/banners"
            hook_max_chars = 100
            image_aspect_ratio = "16:9"
            "#,
        )
        .unwrap();
        assert_eq!(s.output_dir, PathBuf::from("/tmp/banners"));
        assert_eq!(s.hook_max_chars, 100);
        assert_eq!(s.image_aspect_ratio, AspectRatio::Landscape);
        assert_eq!(s.company_url, "https://curlsek.ai");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Settings::from_toml("hook_max_chars = \"lots\"").unwrap_err();
        assert!(matches!(err, CampaignError::Config(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_tiny_hook_limit_rejected() {
        assert!(Settings::from_toml("hook_max_chars = 2").is_err());
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let err = Settings::load(Some(Path::new("/nonexistent/campaign-forge.toml"))).unwrap_err();
        assert!(matches!(err, CampaignError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut s = Settings::default();
        s.apply_env_overrides(|key| match key {
            "CAMPAIGN_FORGE_CURRENT" => Some("/data/week.json".to_string()),
            "CAMPAIGN_FORGE_OUTPUT_DIR" => Some("/data/img".to_string()),
            _ => None,
        });
        assert_eq!(s.current_path, PathBuf::from("/data/week.json"));
        assert_eq!(s.output_dir, PathBuf::from("/data/img"));
        assert_eq!(s.archive_path, PathBuf::from("all_weeks.json"));
    }
}
