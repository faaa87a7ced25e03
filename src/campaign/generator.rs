//! Campaign stage: prompt the text model, extract the plan, persist it.

use crate::campaign::extract::extract_draft;
use crate::campaign::prompt::campaign_prompt;
use crate::campaign::store::CampaignStore;
use crate::campaign::types::Campaign;
use crate::config::Settings;
use crate::error::Result;
use crate::text::{CompletionRequest, TextProvider};

/// Generates one week of posts and saves it to both stores.
pub struct CampaignGenerator {
    provider: Box<dyn TextProvider>,
    store: CampaignStore,
    prompt: String,
    max_output_tokens: u32,
}

impl CampaignGenerator {
    /// Creates a generator with an explicit prompt and token budget.
    pub fn new(
        provider: Box<dyn TextProvider>,
        store: CampaignStore,
        prompt: impl Into<String>,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            provider,
            store,
            prompt: prompt.into(),
            max_output_tokens,
        }
    }

    /// Creates a generator using the configured company, budget and paths.
    pub fn from_settings(provider: Box<dyn TextProvider>, settings: &Settings) -> Self {
        Self::new(
            provider,
            CampaignStore::from_settings(settings),
            campaign_prompt(&settings.company_name, &settings.company_url),
            settings.max_output_tokens,
        )
    }

    /// The store this generator writes to.
    pub fn store(&self) -> &CampaignStore {
        &self.store
    }

    /// Runs the stage once.
    ///
    /// Nothing is written unless a JSON object with a `topic` and `days` can
    /// be extracted; in that case the error carries the raw model output.
    pub async fn run(&self) -> Result<Campaign> {
        tracing::info!(provider = self.provider.name(), "requesting weekly campaign");
        let request = CompletionRequest::new(self.prompt.clone(), self.max_output_tokens);
        let raw = self.provider.complete(&request).await?;

        let draft = extract_draft(&raw)?;
        let campaign = self.store.save(draft)?;

        if !campaign.is_complete_week() {
            tracing::warn!(
                week = campaign.week,
                days = campaign.days.len(),
                "campaign does not follow the seven-day schedule"
            );
        }
        tracing::info!(week = campaign.week, topic = %campaign.topic, "campaign saved");
        Ok(campaign)
    }
}
