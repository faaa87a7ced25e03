//! Image prompt construction.
//!
//! Two plain templates interpolate the post hook and campaign topic. The
//! safe template instead maps the topic onto a neutral category and an
//! abstract visual concept, so literal threat vocabulary never reaches the
//! image API's content filters.

use serde::{Deserialize, Serialize};

/// Which prompt template to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptStyle {
    /// Dark-blue banner background with elements drawn from the hook.
    #[default]
    Banner,
    /// LinkedIn-style post illustration.
    Post,
    /// Topic normalized to an abstract concept; the hook is not used.
    Safe,
}

/// Builds the prompt for one post.
pub fn build_prompt(style: PromptStyle, hook: &str, topic: &str) -> String {
    match style {
        PromptStyle::Banner => banner_prompt(hook, topic),
        PromptStyle::Post => post_prompt(hook, topic),
        PromptStyle::Safe => safe_prompt(topic),
    }
}

fn topic_line(topic: &str) -> String {
    let topic = topic.trim();
    if topic.is_empty() {
        String::new()
    } else {
        format!("\nTopic: \"{topic}\"\n")
    }
}

/// Banner background template.
pub fn banner_prompt(hook: &str, topic: &str) -> String {
    format!(
        r#"Create a high-quality cybersecurity-themed background image inspired by the following content:

"{hook}"

Translate the meaning of the content into visual concepts. Use elements such as AI-driven attacks, malware evolution, automated phishing, code patterns, neural-network shapes, data flows, network graphs, digital shields, exploit chains, or reconnaissance visuals, whichever best represents the idea of the content.

Important:
- Do NOT include any readable text, letters, numbers, or logos.
- Do NOT show human faces.
- Use a modern, dark-blue professional cybersecurity style.
- The image should look like a LinkedIn banner background.
- Keep the center area clean so a headline can be added later.
{topic}"#,
        topic = topic_line(topic),
    )
}

/// Post illustration template.
pub fn post_prompt(hook: &str, topic: &str) -> String {
    format!(
        r#"Create a LinkedIn-style cybersecurity image based on the following content:

"{hook}"

Do NOT include any readable text, words, letters, numbers, or logos in the image.
Instead, represent the idea visually using cybersecurity elements such as:
networks, data flows, shields, threat indicators, code patterns, AI visuals, or digital system graphics.

Use a modern blue and dark color theme.
Make the design clean, professional, and appropriate for a LinkedIn post.
Ensure the center has some empty space so a headline can be added later.
{topic}"#,
        topic = topic_line(topic),
    )
}

/// Neutral category a campaign topic is normalized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafeCategory {
    /// Email, messaging and social engineering.
    DigitalCommunication,
    /// Data theft, extortion, leaks.
    DataProtection,
    /// Malicious code on endpoints.
    SystemIntegrity,
    /// Vulnerabilities and their exploitation.
    SystemResilience,
    /// Identity, credentials, impersonation.
    IdentityTrust,
    /// Intrusions and network-level attacks.
    NetworkDefense,
    /// Nothing matched.
    General,
}

/// Sensitive terms in match order. The first term found in the topic wins,
/// so more specific terms come before generic ones.
pub const SENSITIVE_TERMS: &[(&str, SafeCategory)] = &[
    ("phishing", SafeCategory::DigitalCommunication),
    ("smishing", SafeCategory::DigitalCommunication),
    ("vishing", SafeCategory::DigitalCommunication),
    ("social engineering", SafeCategory::DigitalCommunication),
    ("spam", SafeCategory::DigitalCommunication),
    ("ransomware", SafeCategory::DataProtection),
    ("extortion", SafeCategory::DataProtection),
    ("data breach", SafeCategory::DataProtection),
    ("data leak", SafeCategory::DataProtection),
    ("exfiltration", SafeCategory::DataProtection),
    ("malware", SafeCategory::SystemIntegrity),
    ("trojan", SafeCategory::SystemIntegrity),
    ("spyware", SafeCategory::SystemIntegrity),
    ("backdoor", SafeCategory::SystemIntegrity),
    ("botnet", SafeCategory::SystemIntegrity),
    ("worm", SafeCategory::SystemIntegrity),
    ("zero-day", SafeCategory::SystemResilience),
    ("zero day", SafeCategory::SystemResilience),
    ("exploit", SafeCategory::SystemResilience),
    ("vulnerability", SafeCategory::SystemResilience),
    ("cve", SafeCategory::SystemResilience),
    ("deepfake", SafeCategory::IdentityTrust),
    ("impersonation", SafeCategory::IdentityTrust),
    ("credential", SafeCategory::IdentityTrust),
    ("password", SafeCategory::IdentityTrust),
    ("identity theft", SafeCategory::IdentityTrust),
    ("breach", SafeCategory::NetworkDefense),
    ("hack", SafeCategory::NetworkDefense),
    ("intrusion", SafeCategory::NetworkDefense),
    ("ddos", SafeCategory::NetworkDefense),
    ("attack", SafeCategory::NetworkDefense),
];

impl SafeCategory {
    /// Euphemistic label for the category.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DigitalCommunication => "digital communication security",
            Self::DataProtection => "data protection and recovery",
            Self::SystemIntegrity => "system integrity",
            Self::SystemResilience => "software resilience",
            Self::IdentityTrust => "digital identity and trust",
            Self::NetworkDefense => "network defense",
            Self::General => "proactive cyber resilience",
        }
    }

    /// Abstract visual concept substituted into the safe template.
    pub fn concept(&self) -> &'static str {
        match self {
            Self::DigitalCommunication => CONCEPT_SIGNAL_FLOW,
            Self::DataProtection => CONCEPT_VAULT,
            Self::SystemIntegrity | Self::SystemResilience => CONCEPT_LATTICE,
            Self::IdentityTrust => CONCEPT_KEYS,
            Self::NetworkDefense => CONCEPT_PERIMETER,
            Self::General => CONCEPT_HORIZON,
        }
    }
}

const CONCEPT_SIGNAL_FLOW: &str = "streams of glowing light particles travelling between abstract nodes, some filtered through translucent layered membranes";
const CONCEPT_VAULT: &str = "luminous geometric blocks arranged in a protected core, surrounded by concentric rings of soft blue light";
const CONCEPT_LATTICE: &str = "a precise crystalline lattice of interconnected structures, with a few elements being reinforced by bright beams";
const CONCEPT_KEYS: &str = "interlocking abstract shapes that fit together like keys and locks, rendered as light and glass";
const CONCEPT_PERIMETER: &str = "a wide network of connected points enclosed by a calm, continuous arc of protective light";
const CONCEPT_HORIZON: &str = "flowing data streams over a deep blue horizon, with layered translucent planes suggesting structure and foresight";

/// Maps a topic to the category of the first sensitive term it contains,
/// case-insensitively. Unmatched topics map to [`SafeCategory::General`].
pub fn normalize_topic(topic: &str) -> SafeCategory {
    let lower = topic.to_lowercase();
    SENSITIVE_TERMS
        .iter()
        .find(|(term, _)| lower.contains(term))
        .map(|(_, category)| *category)
        .unwrap_or(SafeCategory::General)
}

const SAFE_TEMPLATE: &str = r#"Create an abstract, high-quality background image for a professional technology company.

Visual concept: {concept}.

Strict content rules:
- No text, letters, numbers, or symbols of any kind.
- No logos, brand marks, or watermarks.
- No charts, graphs, or dashboards.
- No warning signs, skulls, locks with alerts, or hazard symbols.
- No people or faces.

Style: modern, calm, dark navy and electric blue palette, soft depth of field, clean composition.
Leave the center area visually quiet so a headline can be placed there later.
"#;

/// Builds the safe prompt for a campaign topic.
pub fn safe_prompt(topic: &str) -> String {
    SAFE_TEMPLATE.replace("{concept}", normalize_topic(topic).concept())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_prompt_embeds_hook_and_topic() {
        let p = banner_prompt("AI agents now write exploits", "Autonomous attack tooling");
        assert!(p.contains("\"AI agents now write exploits\""));
        assert!(p.contains("Topic: \"Autonomous attack tooling\""));
        assert!(p.contains("Do NOT show human faces."));
        assert!(p.contains("Keep the center area clean"));
    }

    #[test]
    fn test_post_prompt_without_topic() {
        let p = post_prompt("Hook", "  ");
        assert!(p.contains("\"Hook\""));
        assert!(!p.contains("Topic:"));
        assert!(p.contains("Use a modern blue and dark color theme."));
    }

    #[test]
    fn test_ransomware_topic_normalized() {
        let category = normalize_topic("New Ransomware Attack Uses AI");
        assert_eq!(category, SafeCategory::DataProtection);
        assert_eq!(category.label(), "data protection and recovery");
        assert_eq!(category.concept(), CONCEPT_VAULT);
    }

    #[test]
    fn test_first_term_in_list_order_wins() {
        // "attack" appears first in the topic, but "phishing" is earlier in the list.
        assert_eq!(
            normalize_topic("Attack wave of AI phishing"),
            SafeCategory::DigitalCommunication
        );
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(normalize_topic("ZERO-DAY in VPN"), SafeCategory::SystemResilience);
        assert_eq!(normalize_topic("Deepfake CFO"), SafeCategory::IdentityTrust);
    }

    #[test]
    fn test_unmatched_topic_uses_default() {
        let category = normalize_topic("Quarterly product update");
        assert_eq!(category, SafeCategory::General);
        assert_eq!(safe_prompt("Quarterly product update"), SAFE_TEMPLATE.replace("{concept}", CONCEPT_HORIZON));
    }

    #[test]
    fn test_safe_prompt_hides_sensitive_terms() {
        let p = safe_prompt("Malware exploit chain hits banks");
        let lower = p.to_lowercase();
        assert!(!lower.contains("malware"));
        assert!(!lower.contains("exploit"));
        assert!(p.contains(CONCEPT_LATTICE));
        assert!(p.contains("No charts"));
        assert!(!p.contains("{concept}"));
    }

    #[test]
    fn test_safe_style_ignores_hook() {
        let a = build_prompt(PromptStyle::Safe, "first hook", "Ransomware");
        let b = build_prompt(PromptStyle::Safe, "second hook", "Ransomware");
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_category_has_concept() {
        for (_, category) in SENSITIVE_TERMS {
            assert!(!category.concept().is_empty());
            assert!(!category.label().is_empty());
        }
    }
}
