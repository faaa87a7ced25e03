//! Campaign data model.

use serde::{Deserialize, Serialize};

/// The kind of post scheduled for a day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    /// Day 1: a short post.
    ShortPost,
    /// Day 2: a long-form post.
    LongPost,
    /// Day 3: a carousel script.
    Carousel,
    /// Day 4: a video script.
    VideoScript,
    /// Day 5: an analytic post.
    AnalyticPost,
    /// Day 6: an insight post.
    InsightPost,
    /// Day 7: a recap of the week.
    RecapPost,
    /// Anything else the model returned, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl PostType {
    /// The seven post types in schedule order; day `n` uses `WEEK[n - 1]`.
    pub const WEEK: [PostType; 7] = [
        PostType::ShortPost,
        PostType::LongPost,
        PostType::Carousel,
        PostType::VideoScript,
        PostType::AnalyticPost,
        PostType::InsightPost,
        PostType::RecapPost,
    ];

    /// Returns the wire name of this post type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::ShortPost => "short_post",
            Self::LongPost => "long_post",
            Self::Carousel => "carousel",
            Self::VideoScript => "video_script",
            Self::AnalyticPost => "analytic_post",
            Self::InsightPost => "insight_post",
            Self::RecapPost => "recap_post",
            Self::Other(s) => s,
        }
    }

    /// Returns the post type scheduled for `day` (1-based), if any.
    pub fn for_day(day: u32) -> Option<PostType> {
        let idx = usize::try_from(day).ok()?.checked_sub(1)?;
        Self::WEEK.get(idx).cloned()
    }
}

impl Default for PostType {
    fn default() -> Self {
        Self::Other("post".to_string())
    }
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One day's post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPost {
    /// Day of the week, 1 through 7.
    #[serde(default)]
    pub day: u32,
    /// What kind of post this is.
    #[serde(default)]
    pub post_type: PostType,
    /// Post body.
    #[serde(default)]
    pub content: String,
}

impl DayPost {
    /// Creates a post for the given day.
    pub fn new(day: u32, post_type: PostType, content: impl Into<String>) -> Self {
        Self {
            day,
            post_type,
            content: content.into(),
        }
    }
}

/// What the text model is asked to produce: a topic and its posts.
///
/// This is the payload extracted from model output before a week number
/// is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDraft {
    /// Main topic of the week.
    pub topic: String,
    /// The week's posts.
    pub days: Vec<DayPost>,
}

/// A numbered week of posts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Campaign {
    /// Sequence number assigned when the campaign was archived.
    #[serde(default)]
    pub week: u32,
    /// Main topic of the week.
    #[serde(default)]
    pub topic: String,
    /// The week's posts.
    #[serde(default)]
    pub days: Vec<DayPost>,
}

impl Campaign {
    /// Numbers a draft as the given week.
    pub fn from_draft(week: u32, draft: CampaignDraft) -> Self {
        Self {
            week,
            topic: draft.topic,
            days: draft.days,
        }
    }

    /// Returns true if the campaign has exactly one post per day 1..=7, in
    /// order, each with its scheduled post type.
    pub fn is_complete_week(&self) -> bool {
        self.days.len() == PostType::WEEK.len()
            && self.days.iter().enumerate().all(|(i, post)| {
                post.day as usize == i + 1 && post.post_type == PostType::WEEK[i]
            })
    }
}

/// The cumulative, append-only list of every campaign generated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArchiveStore {
    /// Campaigns in the order they were generated.
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
}

impl ArchiveStore {
    /// Week number the next appended campaign receives.
    pub fn next_week(&self) -> u32 {
        self.campaigns.len() as u32 + 1
    }

    /// Numbers the draft, appends it and returns the stored entry.
    pub fn append(&mut self, draft: CampaignDraft) -> Campaign {
        let campaign = Campaign::from_draft(self.next_week(), draft);
        self.campaigns.push(campaign.clone());
        campaign
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_week() -> Vec<DayPost> {
        PostType::WEEK
            .iter()
            .enumerate()
            .map(|(i, t)| DayPost::new(i as u32 + 1, t.clone(), format!("Post {}", i + 1)))
            .collect()
    }

    #[test]
    fn test_post_type_wire_names() {
        let json = serde_json::to_string(&PostType::VideoScript).unwrap();
        assert_eq!(json, "\"video_script\"");

        let parsed: PostType = serde_json::from_str("\"analytic_post\"").unwrap();
        assert_eq!(parsed, PostType::AnalyticPost);
    }

    #[test]
    fn test_unknown_post_type_kept_verbatim() {
        let parsed: PostType = serde_json::from_str("\"poll\"").unwrap();
        assert_eq!(parsed, PostType::Other("poll".into()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"poll\"");
    }

    #[test]
    fn test_for_day() {
        assert_eq!(PostType::for_day(1), Some(PostType::ShortPost));
        assert_eq!(PostType::for_day(3), Some(PostType::Carousel));
        assert_eq!(PostType::for_day(7), Some(PostType::RecapPost));
        assert_eq!(PostType::for_day(0), None);
        assert_eq!(PostType::for_day(8), None);
    }

    #[test]
    fn test_complete_week() {
        let campaign = Campaign {
            week: 1,
            topic: "AI phishing kits".into(),
            days: full_week(),
        };
        assert!(campaign.is_complete_week());

        let mut short = campaign.clone();
        short.days.pop();
        assert!(!short.is_complete_week());

        let mut swapped = campaign;
        swapped.days.swap(0, 1);
        assert!(!swapped.is_complete_week());
    }

    #[test]
    fn test_archive_append_numbers_weeks() {
        let mut archive = ArchiveStore::default();
        for n in 1..=3 {
            let entry = archive.append(CampaignDraft {
                topic: format!("Topic {n}"),
                days: full_week(),
            });
            assert_eq!(entry.week, n);
        }
        assert_eq!(archive.campaigns.len(), 3);
        assert_eq!(archive.next_week(), 4);
    }

    #[test]
    fn test_campaign_reads_leniently() {
        let campaign: Campaign =
            serde_json::from_str(r#"{"days": [{"content": "Hello"}]}"#).unwrap();
        assert_eq!(campaign.topic, "");
        assert_eq!(campaign.week, 0);
        assert_eq!(campaign.days[0].day, 0);
        assert_eq!(campaign.days[0].post_type, PostType::Other("post".into()));
    }

    #[test]
    fn test_draft_requires_topic_and_days() {
        assert!(serde_json::from_str::<CampaignDraft>(r#"{"days": []}"#).is_err());
        assert!(serde_json::from_str::<CampaignDraft>(r#"{"topic": "x"}"#).is_err());
    }
}
