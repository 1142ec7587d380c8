//! Composition root.
//!
//! `Platform` owns the store and every controller. The CLI and the web
//! server construct one and pass it by `&mut` to each handler; nothing in
//! the crate reaches for global state.

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::activity::{ActivityLog, EventKind};
use crate::analysis::{self, Analysis, Analyzer, KeywordAnalyzer};
use crate::audience::{AudienceBuilder, FilterSlot, format_count};
use crate::charts::ChartRegistry;
use crate::config::schema::AdpilotConfig;
use crate::creative::CreativeRequest;
use crate::dashboard::{self, KpiId};
use crate::error::DashboardError;
use crate::navigation::{LoadContext, Navigator, Section, SectionView};
use crate::notify::{Outbox, Toast};
use crate::report::{self, Report};
use crate::store::{Audience, Campaign, Creative, EntityStore};
use crate::tasks::{CancelToken, SimulatedDelay, TaskQueue};
use crate::theme::{Theme, ThemeStore};
use crate::upload::{self, FileDescriptor, UploadOutcome, UploadProgress};
use crate::wizard::{CampaignForm, Wizard};

pub struct Platform {
    config: AdpilotConfig,
    store: EntityStore,
    wizard: Wizard,
    navigator: Navigator,
    audience: AudienceBuilder,
    charts: ChartRegistry,
    outbox: Outbox,
    log: ActivityLog,
    analyzer: Box<dyn Analyzer>,
    theme: ThemeStore,
    rng: SmallRng,
    cancel: CancelToken,
}

impl Platform {
    /// Build a platform from loaded configuration.
    pub fn new(config: AdpilotConfig) -> Self {
        let store = if config.store.seed_sample_data {
            EntityStore::with_sample_data()
        } else {
            EntityStore::new()
        };
        Self {
            log: ActivityLog::from_config(&config.logging),
            store,
            wizard: Wizard::new(),
            navigator: Navigator::new(),
            audience: AudienceBuilder::new(),
            charts: ChartRegistry::with_dashboard_surfaces(),
            outbox: Outbox::default(),
            analyzer: Box::new(KeywordAnalyzer),
            theme: ThemeStore::default_location(),
            rng: SmallRng::from_entropy(),
            cancel: CancelToken::new(),
            config,
        }
    }

    pub fn with_log(mut self, log: ActivityLog) -> Self {
        self.log = log;
        self
    }

    pub fn with_theme_store(mut self, theme: ThemeStore) -> Self {
        self.theme = theme;
        self
    }

    /// Make every random draw reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    pub fn with_analyzer(mut self, analyzer: Box<dyn Analyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    // -- Accessors --

    pub fn config(&self) -> &AdpilotConfig {
        &self.config
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn audience(&self) -> &AudienceBuilder {
        &self.audience
    }

    pub fn charts(&self) -> &ChartRegistry {
        &self.charts
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn analyzer(&self) -> &dyn Analyzer {
        self.analyzer.as_ref()
    }

    pub fn current_section(&self) -> Section {
        self.navigator.current()
    }

    /// Token shared by every simulated task this platform runs.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn pending_toasts(&self) -> &[Toast] {
        self.outbox.pending()
    }

    pub fn drain_toasts(&mut self) -> Vec<Toast> {
        self.outbox.drain()
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    pub fn navigate(&mut self, name: &str) -> Result<SectionView, DashboardError> {
        let section = Section::parse(name).inspect_err(|err| {
            self.log.warn(EventKind::Navigation, err.to_string());
        })?;
        Ok(self.navigate_to(section))
    }

    pub fn navigate_to(&mut self, section: Section) -> SectionView {
        let ctx = LoadContext {
            store: &self.store,
            audience: &mut self.audience,
            charts: &mut self.charts,
            log: &self.log,
            rng: &mut self.rng,
            wizard_open: self.wizard.is_visible(),
        };
        self.navigator.navigate(section, ctx)
    }

    /// KPI tiles to highlight this tick. Empty unless the dashboard is the
    /// active section.
    pub fn pulse(&mut self) -> Vec<KpiId> {
        if self.navigator.current() != Section::Dashboard {
            return Vec::new();
        }
        dashboard::pulse(&mut self.rng)
    }

    // ---------------------------------------------------------------------
    // Analysis
    // ---------------------------------------------------------------------

    /// Analyze a campaign description. Text shorter than the configured
    /// minimum yields `None` without waiting.
    pub fn analyze(&mut self, text: &str) -> Result<Option<Analysis>, DashboardError> {
        if !analysis::is_ready(text, self.config.analysis.min_text_length) {
            return Ok(None);
        }
        SimulatedDelay::from_millis("analysis", self.config.simulation.analysis_delay_ms)
            .wait(&self.cancel)?;

        let result = self.analyzer.analyze(text);
        self.log.info(
            EventKind::Analysis,
            format!(
                "{} analyzer: {}, {}, {} entities",
                self.analyzer.name(),
                result.sentiment_display(),
                result.intent_display(),
                result.entities.len()
            ),
        );
        Ok(Some(result))
    }

    // ---------------------------------------------------------------------
    // Wizard
    // ---------------------------------------------------------------------

    pub fn open_wizard(&mut self) {
        self.wizard.open();
        self.log.debug(EventKind::Wizard, "wizard opened");
    }

    pub fn close_wizard(&mut self) {
        self.wizard.close();
        self.log.debug(EventKind::Wizard, "wizard closed");
    }

    pub fn update_form(&mut self, form: CampaignForm) {
        *self.wizard.form_mut() = form;
    }

    pub fn wizard_next(&mut self) -> bool {
        let moved = self.wizard.next();
        if moved {
            self.log.debug(
                EventKind::Wizard,
                format!("wizard advanced to step {}", self.wizard.step().number()),
            );
        }
        moved
    }

    pub fn wizard_prev(&mut self) -> bool {
        let moved = self.wizard.prev();
        if moved {
            self.log.debug(
                EventKind::Wizard,
                format!("wizard back to step {}", self.wizard.step().number()),
            );
        }
        moved
    }

    /// Deploy the campaign from the review step, then show the campaign
    /// list.
    pub fn deploy_campaign(&mut self) -> Result<Campaign, DashboardError> {
        if self.wizard.step() != crate::wizard::Step::Review {
            // Rejected before the simulated wait.
            let rejected = self.wizard.deploy(&mut self.store, &mut self.rng);
            return self.fail(EventKind::Deploy, rejected);
        }

        let mut ctx = DeployContext {
            wizard: &mut self.wizard,
            store: &mut self.store,
            navigator: &mut self.navigator,
            rng: &mut self.rng,
            deployed: None,
        };
        let outcome = TaskQueue::new("deploy")
            .delay_ms(self.config.simulation.deploy_delay_ms)
            .then("create campaign", |ctx: &mut DeployContext<'_>| {
                let campaign = ctx.wizard.deploy(ctx.store, ctx.rng)?;
                ctx.deployed = Some(campaign);
                Ok(())
            })
            .then("reload campaigns", |ctx: &mut DeployContext<'_>| {
                ctx.navigator.set_current(Section::Campaigns);
                Ok(())
            })
            .run(&mut ctx, &self.cancel);
        let deployed = ctx.deployed;

        let result = outcome.and_then(|_| {
            deployed.ok_or_else(|| DashboardError::Cancelled("deploy".to_string()))
        });
        let campaign = self.fail(EventKind::Deploy, result)?;

        self.outbox
            .success("Campaign Deployed", "Your campaign is now live!");
        self.log.info(
            EventKind::Deploy,
            format!(
                "deployed '{}' on {} ({}/day)",
                campaign.name, campaign.platform, campaign.daily_budget
            ),
        );
        Ok(campaign)
    }

    // ---------------------------------------------------------------------
    // Audience
    // ---------------------------------------------------------------------

    pub fn add_audience_filter(&mut self) -> FilterSlot {
        let slot = self.audience.add_random_filter(&mut self.rng).clone();
        self.log
            .debug(EventKind::Audience, format!("added {} filter", slot.kind));
        slot
    }

    pub fn set_audience_filter(&mut self, index: usize, value: &str) -> Result<(), DashboardError> {
        let result = self.audience.set_value(index, value);
        self.fail(EventKind::Audience, result)
    }

    pub fn remove_audience_filter(&mut self, index: usize) -> Result<FilterSlot, DashboardError> {
        let result = self.audience.remove(index);
        self.fail(EventKind::Audience, result)
    }

    /// Save the current filter set as a new audience.
    pub fn create_audience(&mut self) -> Audience {
        let id = self.store.next_id();
        let ordinal = self.store.audiences().len() + 1;
        let audience = self.audience.snapshot(id, ordinal);
        self.store.add_audience(audience.clone());

        self.outbox.success(
            "Audience Created",
            format!(
                "New audience saved with {} estimated reach",
                format_count(audience.size)
            ),
        );
        self.log.info(
            EventKind::Audience,
            format!(
                "created {} ({} filters, {} reach, {})",
                audience.name,
                audience.filters.len(),
                audience.size,
                audience.potential
            ),
        );
        audience
    }

    // ---------------------------------------------------------------------
    // Uploads, creatives, reports
    // ---------------------------------------------------------------------

    /// Upload files one after another. Each completed upload is appended
    /// as an asset before the next starts.
    pub fn upload(&mut self, files: Vec<FileDescriptor>) -> Result<Vec<UploadOutcome>, DashboardError> {
        let sim = &self.config.simulation;
        let tick = SimulatedDelay::from_millis("upload", sim.upload_tick_ms);
        let max_increment = sim.upload_max_increment;

        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            let mut progress = UploadProgress::new(file, max_increment);
            let ticks = upload::run_to_completion(&mut progress, &mut self.rng, &tick, &self.cancel);
            let ticks = self.fail(EventKind::Upload, ticks)?;

            let id = self.store.next_id();
            let asset = self.store.add_asset(progress.into_asset(id)).clone();
            self.outbox.success(
                "Upload Complete",
                format!("{} uploaded successfully", asset.name),
            );
            self.log.info(
                EventKind::Upload,
                format!("uploaded {} ({} bytes, {})", asset.name, asset.size, asset.mime_type),
            );
            outcomes.push(UploadOutcome { asset, ticks });
        }
        Ok(outcomes)
    }

    pub fn generate_creative(&mut self, request: CreativeRequest) -> Result<Creative, DashboardError> {
        let validated = request.validate();
        self.fail(EventKind::Creative, validated)?;

        let waited = SimulatedDelay::from_millis("creative", self.config.simulation.creative_delay_ms)
            .wait(&self.cancel);
        self.fail(EventKind::Creative, waited)?;

        let id = self.store.next_id();
        let creative = self.store.add_creative(request.into_creative(id)).clone();
        self.outbox
            .success("Creative Generated", "AI has generated your creative asset");
        self.log.info(
            EventKind::Creative,
            format!("generated {}", creative.title()),
        );
        Ok(creative)
    }

    pub fn export_report(&mut self) -> Result<Report, DashboardError> {
        let waited = SimulatedDelay::from_millis("export", self.config.simulation.export_delay_ms)
            .wait(&self.cancel);
        self.fail(EventKind::Export, waited)?;

        let report = report::build(self.store.campaigns());
        self.outbox
            .success("Report Exported", "Your analytics report has been generated");
        self.log.info(
            EventKind::Export,
            format!("exported report with {} campaigns", report.rows.len()),
        );
        Ok(report)
    }

    // ---------------------------------------------------------------------
    // Theme
    // ---------------------------------------------------------------------

    pub fn theme(&self) -> Theme {
        self.theme.current(self.config.general.theme)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<Theme> {
        self.theme.save(theme)?;
        self.theme_changed(theme);
        Ok(theme)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let theme = self.theme.toggle(self.config.general.theme)?;
        self.theme_changed(theme);
        Ok(theme)
    }

    fn theme_changed(&mut self, theme: Theme) {
        self.outbox
            .success("Theme Updated", format!("Switched to {theme} mode"));
        self.log
            .info(EventKind::Theme, format!("theme set to {theme}"));
    }

    // ---------------------------------------------------------------------

    /// Toast and log a failed operation, passing the result through.
    fn fail<T>(&mut self, kind: EventKind, result: Result<T, DashboardError>) -> Result<T, DashboardError> {
        if let Err(err) = &result {
            self.outbox.report(err);
            if err.is_user_error() {
                self.log.warn(kind, err.to_string());
            } else {
                self.log.error(kind, err.to_string());
            }
        }
        result
    }
}

struct DeployContext<'a> {
    wizard: &'a mut Wizard,
    store: &'a mut EntityStore,
    navigator: &'a mut Navigator,
    rng: &'a mut SmallRng,
    deployed: Option<Campaign>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Pace;
    use crate::notify::ToastKind;

    fn instant_platform() -> Platform {
        let mut config = AdpilotConfig::default();
        config.general.pace = Pace::Instant;
        config.apply_pace();
        Platform::new(config)
            .with_log(ActivityLog::disabled())
            .with_seed(7)
    }

    #[test]
    fn sample_data_is_seeded_by_default() {
        let platform = instant_platform();
        assert_eq!(platform.store().campaigns().len(), 2);
    }

    #[test]
    fn deploy_adds_campaign_and_switches_section() {
        let mut platform = instant_platform();
        platform.open_wizard();
        platform.wizard_next();
        platform.wizard_next();

        let campaign = platform.deploy_campaign().unwrap();
        assert_eq!(platform.store().campaigns().len(), 3);
        assert_eq!(platform.store().campaigns()[2].id, campaign.id);
        assert_eq!(platform.current_section(), Section::Campaigns);

        let toasts = platform.drain_toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "Campaign Deployed");
    }

    #[test]
    fn cancelled_deploy_changes_nothing() {
        let mut platform = instant_platform();
        platform.wizard_next();
        platform.wizard_next();
        platform.cancel_token().cancel();

        let err = platform.deploy_campaign().unwrap_err();
        assert_eq!(err, DashboardError::Cancelled("deploy".into()));
        assert_eq!(platform.store().campaigns().len(), 2);
        assert!(platform.drain_toasts().is_empty());
    }

    #[test]
    fn invalid_budget_raises_error_toast() {
        let mut platform = instant_platform();
        platform.update_form(CampaignForm {
            budget: "lots".into(),
            ..CampaignForm::default()
        });
        platform.wizard_next();
        platform.wizard_next();

        assert!(platform.deploy_campaign().is_err());
        let toasts = platform.drain_toasts();
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert_eq!(toasts[0].title, "Invalid Budget");
        assert_eq!(platform.store().campaigns().len(), 2);
    }

    #[test]
    fn short_text_is_not_analyzed() {
        let mut platform = instant_platform();
        assert_eq!(platform.analyze("too short").unwrap(), None);
        assert!(platform.analyze("We want more leads and signups").unwrap().is_some());
    }

    #[test]
    fn length_gate_runs_before_the_analysis_wait() {
        let mut platform = instant_platform();
        platform.cancel_token().cancel();

        assert_eq!(platform.analyze("too short").unwrap(), None);
        let err = platform.analyze("We want more leads and signups").unwrap_err();
        assert_eq!(err, DashboardError::Cancelled("analysis".into()));
    }

    #[test]
    fn pulse_only_on_dashboard() {
        let mut platform = instant_platform();
        platform.navigate("campaigns").unwrap();
        for _ in 0..50 {
            assert!(platform.pulse().is_empty());
        }
    }

    #[test]
    fn audience_from_defaults() {
        let mut platform = instant_platform();
        platform.navigate("audience").unwrap();
        let audience = platform.create_audience();
        assert_eq!(audience.name, "Audience 1");
        assert_eq!(audience.size, 3_535_533);
        assert_eq!(
            platform.drain_toasts()[0].message,
            "New audience saved with 3,535,533 estimated reach"
        );
        assert_eq!(platform.create_audience().name, "Audience 2");
    }

    #[test]
    fn upload_appends_one_asset_per_file() {
        let mut platform = instant_platform();
        let outcomes = platform
            .upload(vec![
                FileDescriptor::new("a.png", 10, "image/png"),
                FileDescriptor::new("b.pdf", 20, "application/pdf"),
            ])
            .unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(platform.store().assets().len(), 4);
        let toasts = platform.drain_toasts();
        assert_eq!(toasts[1].message, "b.pdf uploaded successfully");
    }

    #[test]
    fn empty_prompt_mutates_nothing() {
        let mut platform = instant_platform();
        assert!(platform.generate_creative(CreativeRequest::new("")).is_err());
        assert!(platform.store().creatives().is_empty());
        assert_eq!(platform.drain_toasts()[0].title, "Missing Prompt");
    }

    #[test]
    fn theme_toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut platform = instant_platform()
            .with_theme_store(ThemeStore::at(dir.path().join("preferences.json")));
        platform.set_theme(Theme::Light).unwrap();
        assert_eq!(platform.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(platform.theme(), Theme::Dark);
        assert_eq!(
            platform.drain_toasts().last().unwrap().message,
            "Switched to dark mode"
        );
    }
}
