//! The weekly campaign instruction sent to the text model.

/// Builds the campaign instruction for the given company.
pub fn campaign_prompt(company_name: &str, company_url: &str) -> String {
    format!(
        r#"
I am part of a B2B SaaS company called {company_name} ({company_url}). We are an AI powered offensive security product company mainly targeting VAPT and continuous penetration testing. Create a weekly LinkedIn campaign based on a real cybersecurity news event from the last 2 weeks involving AI or a threat where AI fits naturally. Avoid generic topics.

Provide 7 days of content:
Day 1 short post
Day 2 long post
Day 3 carousel script
Day 4 video script
Day 5 analytic post
Day 6 insight post
Day 7 recap post

Each day's post must:
Include a CTA to {company_url}
Be unique
Contain no emojis or special characters

Output ONLY JSON:

{{
  "topic": "MAIN TOPIC",
  "days": [
    {{ "day": 1, "post_type": "short_post", "content": "..." }},
    {{ "day": 2, "post_type": "long_post", "content": "..." }},
    {{ "day": 3, "post_type": "carousel", "content": "..." }},
    {{ "day": 4, "post_type": "video_script", "content": "..." }},
    {{ "day": 5, "post_type": "analytic_post", "content": "..." }},
    {{ "day": 6, "post_type": "insight_post", "content": "..." }},
    {{ "day": 7, "post_type": "recap_post", "content": "..." }}
  ]
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::types::PostType;

    #[test]
    fn test_prompt_names_company_and_cta() {
        let prompt = campaign_prompt("Acme Sec", "https://acme.example");
        assert!(prompt.contains("company called Acme Sec (https://acme.example)"));
        assert!(prompt.contains("Include a CTA to https://acme.example"));
    }

    #[test]
    fn test_prompt_lists_every_post_type_in_order() {
        let prompt = campaign_prompt("CurlSek", "https://curlsek.ai");
        let mut last = 0;
        for (i, post_type) in PostType::WEEK.iter().enumerate() {
            let needle = format!(
                "\"day\": {}, \"post_type\": \"{}\"",
                i + 1,
                post_type.as_str()
            );
            let pos = prompt.find(&needle).expect("post type missing from prompt");
            assert!(pos > last);
            last = pos;
        }
    }

    #[test]
    fn test_prompt_example_is_extractable() {
        let prompt = campaign_prompt("CurlSek", "https://curlsek.ai");
        let draft = crate::campaign::extract::extract_draft(&prompt).unwrap();
        assert_eq!(draft.topic, "MAIN TOPIC");
        assert_eq!(draft.days.len(), 7);
    }
}
