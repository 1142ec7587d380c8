//! Domain entities held by the [`EntityStore`](super::EntityStore).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audience::ReachPotential;

// ---------------------------------------------------------------------------
// Campaign
// ---------------------------------------------------------------------------

/// Advertising platform a campaign runs on. Unknown names are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AdPlatform {
    MetaAds,
    GoogleAds,
    LinkedInAds,
    TikTokAds,
    TwitterAds,
    Other(String),
}

impl AdPlatform {
    pub fn parse(val: &str) -> Self {
        match val.trim().to_ascii_lowercase().as_str() {
            "meta ads" | "meta" | "facebook" => Self::MetaAds,
            "google ads" | "google" => Self::GoogleAds,
            "linkedin ads" | "linkedin" => Self::LinkedInAds,
            "tiktok ads" | "tiktok" => Self::TikTokAds,
            "twitter ads" | "twitter" | "x" => Self::TwitterAds,
            _ => Self::Other(val.trim().to_string()),
        }
    }
}

impl std::fmt::Display for AdPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MetaAds => write!(f, "Meta Ads"),
            Self::GoogleAds => write!(f, "Google Ads"),
            Self::LinkedInAds => write!(f, "LinkedIn Ads"),
            Self::TikTokAds => write!(f, "TikTok Ads"),
            Self::TwitterAds => write!(f, "Twitter Ads"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

impl From<String> for AdPlatform {
    fn from(val: String) -> Self {
        Self::parse(&val)
    }
}

impl From<AdPlatform> for String {
    fn from(val: AdPlatform) -> Self {
        val.to_string()
    }
}

/// Campaign objective. Also the category set of intent classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    BrandAwareness,
    LeadGeneration,
    Conversions,
    Traffic,
    Engagement,
}

impl Objective {
    pub const ALL: [Objective; 5] = [
        Self::BrandAwareness,
        Self::LeadGeneration,
        Self::Conversions,
        Self::Traffic,
        Self::Engagement,
    ];

    /// Wire key, e.g. `lead_generation`.
    pub fn key(self) -> &'static str {
        match self {
            Self::BrandAwareness => "brand_awareness",
            Self::LeadGeneration => "lead_generation",
            Self::Conversions => "conversions",
            Self::Traffic => "traffic",
            Self::Engagement => "engagement",
        }
    }

    /// Human label, e.g. `Lead Generation`.
    pub fn label(self) -> &'static str {
        match self {
            Self::BrandAwareness => "Brand Awareness",
            Self::LeadGeneration => "Lead Generation",
            Self::Conversions => "Conversions",
            Self::Traffic => "Traffic",
            Self::Engagement => "Engagement",
        }
    }

    /// Accepts either the key or the label, case-insensitively.
    pub fn parse(val: &str) -> Option<Self> {
        let normalized = val.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Self::ALL.into_iter().find(|o| o.key() == normalized)
    }
}

impl std::fmt::Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    #[default]
    Active,
    Paused,
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Active => write!(f, "active"),
            Self::Paused => write!(f, "paused"),
        }
    }
}

/// Simulated performance counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performance {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: u64,
    pub name: String,
    pub platform: AdPlatform,
    pub objective: Objective,
    pub daily_budget: f64,
    pub status: CampaignStatus,
    #[serde(flatten)]
    pub performance: Performance,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: u64,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub uploaded_at: DateTime<Utc>,
}

impl Asset {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

// ---------------------------------------------------------------------------
// Audience
// ---------------------------------------------------------------------------

/// One targeting filter: a type label and the chosen or typed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audience {
    pub id: u64,
    pub name: String,
    pub size: u64,
    pub potential: ReachPotential,
    pub filters: Vec<Filter>,
}

// ---------------------------------------------------------------------------
// Creative
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creative {
    pub id: u64,
    pub style: String,
    pub format: String,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
}

impl Creative {
    /// Gallery title, e.g. `Modern Square (1:1)`.
    pub fn title(&self) -> String {
        format!("{} {}", self.style, self.format)
    }

    /// First 50 characters of the prompt followed by `...`.
    pub fn excerpt(&self) -> String {
        let head: String = self.prompt.chars().take(50).collect();
        format!("{head}...")
    }
}
