//! Campaign creation wizard.
//!
//! Three steps: details, AI insights, review. `next` and `prev` move one
//! step and clamp at the ends. Entering step 2 produces the insight lists,
//! entering step 3 produces the review summary and swaps the primary action
//! to Deploy. Deploying is only possible from step 3.

mod content;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::store::{AdPlatform, Campaign, CampaignStatus, EntityStore, Objective, Performance};

pub use content::{Insights, Summary};

pub const DEFAULT_NAME: &str = "New Campaign";
pub const DEFAULT_PLATFORM: &str = "Meta Ads";
pub const DEFAULT_OBJECTIVE: &str = "Brand Awareness";
pub const DEFAULT_BUDGET: &str = "100";

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Details,
    Insights,
    Review,
}

impl Step {
    pub fn number(self) -> u8 {
        match self {
            Self::Details => 1,
            Self::Insights => 2,
            Self::Review => 3,
        }
    }

    fn forward(self) -> Self {
        match self {
            Self::Details => Self::Insights,
            Self::Insights | Self::Review => Self::Review,
        }
    }

    fn back(self) -> Self {
        match self {
            Self::Details | Self::Insights => Self::Details,
            Self::Review => Self::Insights,
        }
    }
}

/// Which button the wizard footer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryAction {
    Next,
    Deploy,
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// Raw field values as typed in step 1. Blank fields fall back to defaults
/// when the summary is built or the campaign deployed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignForm {
    pub name: String,
    pub platform: String,
    pub objective: String,
    pub budget: String,
    pub description: String,
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}

impl CampaignForm {
    pub fn name_or_default(&self) -> &str {
        or_default(&self.name, DEFAULT_NAME)
    }

    pub fn platform_or_default(&self) -> &str {
        or_default(&self.platform, DEFAULT_PLATFORM)
    }

    pub fn objective_or_default(&self) -> &str {
        or_default(&self.objective, DEFAULT_OBJECTIVE)
    }

    pub fn budget_or_default(&self) -> &str {
        or_default(&self.budget, DEFAULT_BUDGET)
    }
}

/// Build a campaign from the form with random simulated counters.
pub fn build_campaign<R: Rng + ?Sized>(
    form: &CampaignForm,
    id: u64,
    rng: &mut R,
) -> Result<Campaign, DashboardError> {
    let budget_text = form.budget_or_default();
    let daily_budget: f64 = budget_text
        .trim_start_matches('$')
        .parse()
        .ok()
        .filter(|b: &f64| b.is_finite() && *b > 0.0)
        .ok_or_else(|| {
            DashboardError::missing_input(
                "Invalid Budget",
                &format!("daily budget must be a positive number, got '{budget_text}'"),
            )
        })?;

    let objective_text = form.objective_or_default();
    let objective = Objective::parse(objective_text).ok_or_else(|| {
        DashboardError::missing_input(
            "Invalid Objective",
            &format!("unknown campaign objective '{objective_text}'"),
        )
    })?;

    Ok(Campaign {
        id,
        name: form.name_or_default().to_string(),
        platform: AdPlatform::parse(form.platform_or_default()),
        objective,
        daily_budget,
        status: CampaignStatus::Active,
        performance: Performance {
            impressions: rng.gen_range(10_000..60_000),
            clicks: rng.gen_range(500..2_500),
            conversions: rng.gen_range(20..120),
        },
        created_at: Utc::now(),
    })
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Wizard {
    step: Step,
    visible: bool,
    form: CampaignForm,
    insights: Option<Insights>,
    summary: Option<Summary>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self {
            step: Step::Details,
            visible: false,
            form: CampaignForm::default(),
            insights: None,
            summary: None,
        }
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn form(&self) -> &CampaignForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CampaignForm {
        &mut self.form
    }

    pub fn insights(&self) -> Option<&Insights> {
        self.insights.as_ref()
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn primary_action(&self) -> PrimaryAction {
        if self.step == Step::Review {
            PrimaryAction::Deploy
        } else {
            PrimaryAction::Next
        }
    }

    /// Progress indicator: steps up to and including the current one are lit.
    pub fn progress(&self) -> [bool; 3] {
        let current = self.step.number();
        [1, 2, 3].map(|n| n <= current)
    }

    /// Show the wizard at step 1. The form keeps whatever was typed.
    pub fn open(&mut self) {
        self.visible = true;
        self.step = Step::Details;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Advance one step. Returns `true` if the step changed.
    pub fn next(&mut self) -> bool {
        let target = self.step.forward();
        if target == self.step {
            return false;
        }
        self.step = target;
        match target {
            Step::Insights => self.insights = Some(Insights::generate()),
            Step::Review => self.summary = Some(Summary::from_form(&self.form)),
            Step::Details => {}
        }
        true
    }

    /// Go back one step. Returns `true` if the step changed.
    pub fn prev(&mut self) -> bool {
        let target = self.step.back();
        if target == self.step {
            return false;
        }
        self.step = target;
        true
    }

    /// Create the campaign, append it to the store and reset the wizard.
    ///
    /// Rejected outside the review step; a rejected deploy leaves both the
    /// wizard and the store untouched.
    pub fn deploy<R: Rng + ?Sized>(
        &mut self,
        store: &mut EntityStore,
        rng: &mut R,
    ) -> Result<Campaign, DashboardError> {
        if self.step != Step::Review {
            return Err(DashboardError::InvalidTransition(format!(
                "deploy is only available on step 3 (currently on step {})",
                self.step.number()
            )));
        }

        let id = store.next_id();
        let campaign = build_campaign(&self.form, id, rng)?;
        store.add_campaign(campaign.clone());

        self.reset();
        Ok(campaign)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
