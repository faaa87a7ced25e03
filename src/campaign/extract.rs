//! Pulls the JSON payload out of free-form model output.

use crate::campaign::types::CampaignDraft;
use crate::error::{CampaignError, Result};

/// Extracts the JSON object spanning the first `{` and the last `}`.
///
/// Surrounding commentary is ignored. No shape checking happens here.
pub fn extract_json(text: &str) -> Result<serde_json::Value> {
    let parse_error = |reason: String| CampaignError::Parse {
        reason,
        raw: text.to_string(),
    };

    let start = text
        .find('{')
        .ok_or_else(|| parse_error("no opening brace in model output".into()))?;
    let end = text
        .rfind('}')
        .ok_or_else(|| parse_error("no closing brace in model output".into()))?;
    if end < start {
        return Err(parse_error("closing brace precedes opening brace".into()));
    }

    serde_json::from_str(&text[start..=end]).map_err(|e| parse_error(e.to_string()))
}

/// Extracts a campaign draft (`topic` + `days`) from model output.
pub fn extract_draft(text: &str) -> Result<CampaignDraft> {
    let value = extract_json(text)?;
    serde_json::from_value(value).map_err(|e| CampaignError::Parse {
        reason: format!("unexpected campaign shape: {e}"),
        raw: text.to_string(),
    })
}
