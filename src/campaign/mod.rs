//! Weekly campaign generation and persistence.

pub mod extract;
mod generator;
mod prompt;
pub mod store;
mod types;

pub use extract::{extract_draft, extract_json};
pub use generator::CampaignGenerator;
pub use prompt::campaign_prompt;
pub use store::{load_campaign, CampaignStore};
pub use types::{ArchiveStore, Campaign, CampaignDraft, DayPost, PostType};
