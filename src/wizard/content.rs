use serde::Serialize;

use super::CampaignForm;

const AUDIENCE_SUGGESTIONS: &[&str] = &[
    "Tech-savvy millennials (25-35)",
    "Small business owners",
    "Digital marketing professionals",
    "E-commerce entrepreneurs",
];

const OPTIMIZATION_TIPS: &[&str] = &[
    "Use action-oriented CTAs for better conversion",
    "Target mobile users during evening hours",
    "A/B test different ad creatives",
    "Implement retargeting campaigns",
];

const DEFAULT_DESCRIPTION: &str = "Campaign description";
const SUMMARY_DESCRIPTION_CHARS: usize = 100;

/// Step 2 content. Fixed lists, independent of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insights {
    pub audience_suggestions: Vec<String>,
    pub optimization_tips: Vec<String>,
}

impl Insights {
    pub fn generate() -> Self {
        Self {
            audience_suggestions: AUDIENCE_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            optimization_tips: OPTIMIZATION_TIPS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Step 3 read-only snapshot of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub name: String,
    pub platform: String,
    pub objective: String,
    pub budget: String,
    pub description: String,
}

impl Summary {
    pub fn from_form(form: &CampaignForm) -> Self {
        let description = match form.description.trim() {
            "" => DEFAULT_DESCRIPTION,
            d => d,
        };
        Self {
            name: form.name_or_default().to_string(),
            platform: form.platform_or_default().to_string(),
            objective: form.objective_or_default().to_string(),
            budget: form.budget_or_default().to_string(),
            description: truncate_description(description),
        }
    }
}

fn truncate_description(text: &str) -> String {
    if text.chars().count() > SUMMARY_DESCRIPTION_CHARS {
        let head: String = text.chars().take(SUMMARY_DESCRIPTION_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
