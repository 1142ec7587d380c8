//! Section navigation and per-section load routines.
//!
//! `navigate` switches the active section and loads its view from the
//! current state. Loading never mutates the store, so loading the same
//! section twice yields the same collections.

use rand::RngCore;
use serde::Serialize;
use serde_json::Value;

use crate::activity::{ActivityLog, EventKind};
use crate::audience::{AudienceBuilder, Estimate, FilterSlot, format_count};
use crate::charts::{ChartRegistry, ChartSpec, presets};
use crate::dashboard::{self, ActivityItem, CohortCell, Kpi};
use crate::error::DashboardError;
use crate::store::EntityStore;
use crate::upload::format_file_size;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Dashboard,
    Campaigns,
    Assets,
    Audience,
    Creative,
    Analytics,
}

impl Section {
    pub const ALL: [Self; 6] = [
        Self::Dashboard,
        Self::Campaigns,
        Self::Assets,
        Self::Audience,
        Self::Creative,
        Self::Analytics,
    ];

    pub fn parse(val: &str) -> Result<Self, DashboardError> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(val.trim()))
            .ok_or_else(|| DashboardError::UnknownSection(val.to_string()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Campaigns => "campaigns",
            Self::Assets => "assets",
            Self::Audience => "audience",
            Self::Creative => "creative",
            Self::Analytics => "analytics",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: &'static str,
    pub message: &'static str,
}

const NO_CAMPAIGNS: EmptyState = EmptyState {
    title: "No campaigns yet",
    message: "Create your first campaign to get started",
};

const NO_ASSETS: EmptyState = EmptyState {
    title: "No assets uploaded",
    message: "Upload your first asset to get started",
};

const NO_CREATIVES: EmptyState = EmptyState {
    title: "No creatives generated",
    message: "Use AI to generate your first creative",
};

/// A chart bound to a surface, in the charting library's format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub surface: &'static str,
    pub config: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignCard {
    pub id: u64,
    pub name: String,
    pub platform: String,
    pub status: String,
    pub impressions: String,
    pub clicks: String,
    pub conversions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetCard {
    pub id: u64,
    pub name: String,
    pub size: String,
    pub mime_type: String,
    pub is_image: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreativeCard {
    pub id: u64,
    pub title: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section", rename_all = "lowercase")]
pub enum SectionView {
    Dashboard {
        kpis: Vec<Kpi>,
        recent_activity: Vec<ActivityItem>,
        charts: Vec<ChartView>,
    },
    Campaigns {
        campaigns: Vec<CampaignCard>,
        empty: Option<EmptyState>,
        wizard_open: bool,
    },
    Assets {
        assets: Vec<AssetCard>,
        empty: Option<EmptyState>,
    },
    Audience {
        filters: Vec<FilterSlot>,
        estimate: Estimate,
        size_display: String,
    },
    Creative {
        creatives: Vec<CreativeCard>,
        empty: Option<EmptyState>,
    },
    Analytics {
        charts: Vec<ChartView>,
        cohort: Vec<Vec<CohortCell>>,
    },
}

impl SectionView {
    pub fn section(&self) -> Section {
        match self {
            Self::Dashboard { .. } => Section::Dashboard,
            Self::Campaigns { .. } => Section::Campaigns,
            Self::Assets { .. } => Section::Assets,
            Self::Audience { .. } => Section::Audience,
            Self::Creative { .. } => Section::Creative,
            Self::Analytics { .. } => Section::Analytics,
        }
    }
}

/// Everything a load routine reads from. Only the audience builder (first
/// visit defaults) and the chart registry (surface rebinding) change.
pub struct LoadContext<'a> {
    pub store: &'a EntityStore,
    pub audience: &'a mut AudienceBuilder,
    pub charts: &'a mut ChartRegistry,
    pub log: &'a ActivityLog,
    pub rng: &'a mut dyn RngCore,
    pub wizard_open: bool,
}

// ---------------------------------------------------------------------------
// Navigator
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Navigator {
    current: Section,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Section {
        self.current
    }

    pub fn set_current(&mut self, section: Section) {
        self.current = section;
    }

    /// Switch to `section` and load it.
    pub fn navigate(&mut self, section: Section, ctx: LoadContext<'_>) -> SectionView {
        self.current = section;
        ctx.log.info(EventKind::Navigation, format!("navigated to {section}"));
        load(section, ctx)
    }
}

/// Build the view of a section from current state.
pub fn load(section: Section, ctx: LoadContext<'_>) -> SectionView {
    match section {
        Section::Dashboard => SectionView::Dashboard {
            kpis: dashboard::kpis(),
            recent_activity: dashboard::recent_activity(),
            charts: bind_charts(
                ctx.charts,
                ctx.log,
                vec![
                    (presets::PERFORMANCE, presets::performance()),
                    (presets::FUNNEL, presets::funnel()),
                ],
            ),
        },
        Section::Campaigns => {
            let campaigns: Vec<CampaignCard> = ctx
                .store
                .campaigns()
                .iter()
                .map(|c| CampaignCard {
                    id: c.id,
                    name: c.name.clone(),
                    platform: c.platform.to_string(),
                    status: c.status.to_string(),
                    impressions: format_count(c.performance.impressions),
                    clicks: format_count(c.performance.clicks),
                    conversions: c.performance.conversions,
                })
                .collect();
            SectionView::Campaigns {
                empty: campaigns.is_empty().then_some(NO_CAMPAIGNS),
                campaigns,
                wizard_open: ctx.wizard_open,
            }
        }
        Section::Assets => {
            let assets: Vec<AssetCard> = ctx
                .store
                .assets()
                .iter()
                .map(|a| AssetCard {
                    id: a.id,
                    name: a.name.clone(),
                    size: format_file_size(a.size),
                    mime_type: a.mime_type.clone(),
                    is_image: a.is_image(),
                })
                .collect();
            SectionView::Assets {
                empty: assets.is_empty().then_some(NO_ASSETS),
                assets,
            }
        }
        Section::Audience => {
            ctx.audience.ensure_defaults();
            let estimate = ctx.audience.estimate();
            SectionView::Audience {
                filters: ctx.audience.filters().to_vec(),
                size_display: format_count(estimate.size),
                estimate,
            }
        }
        Section::Creative => {
            let creatives: Vec<CreativeCard> = ctx
                .store
                .creatives()
                .iter()
                .map(|c| CreativeCard {
                    id: c.id,
                    title: c.title(),
                    excerpt: c.excerpt(),
                })
                .collect();
            SectionView::Creative {
                empty: creatives.is_empty().then_some(NO_CREATIVES),
                creatives,
            }
        }
        Section::Analytics => SectionView::Analytics {
            charts: bind_charts(
                ctx.charts,
                ctx.log,
                vec![
                    (presets::TRENDS, presets::trends()),
                    (presets::ATTRIBUTION, presets::attribution()),
                ],
            ),
            cohort: dashboard::cohort_heatmap(ctx.rng),
        },
    }
}

/// Bind each chart and return the ones that are now on their surface.
fn bind_charts(
    registry: &mut ChartRegistry,
    log: &ActivityLog,
    charts: Vec<(&'static str, ChartSpec)>,
) -> Vec<ChartView> {
    charts
        .into_iter()
        .filter_map(|(surface, spec)| {
            let config = spec.to_library_config();
            registry
                .bind_or_log(surface, spec, log)
                .then_some(ChartView { surface, config })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    struct Fixture {
        store: EntityStore,
        audience: AudienceBuilder,
        charts: ChartRegistry,
        log: ActivityLog,
        rng: SmallRng,
    }

    impl Fixture {
        fn new(store: EntityStore) -> Self {
            Self {
                store,
                audience: AudienceBuilder::new(),
                charts: ChartRegistry::with_dashboard_surfaces(),
                log: ActivityLog::disabled(),
                rng: SmallRng::seed_from_u64(31),
            }
        }

        fn ctx(&mut self) -> LoadContext<'_> {
            LoadContext {
                store: &self.store,
                audience: &mut self.audience,
                charts: &mut self.charts,
                log: &self.log,
                rng: &mut self.rng,
                wizard_open: false,
            }
        }
    }

    #[test]
    fn section_names_parse_case_insensitively() {
        assert_eq!(Section::parse("Campaigns").unwrap(), Section::Campaigns);
        assert_eq!(Section::parse(" ANALYTICS ").unwrap(), Section::Analytics);
        assert_eq!(
            Section::parse("settings"),
            Err(DashboardError::UnknownSection("settings".into()))
        );
    }

    #[test]
    fn navigate_updates_current_section() {
        let mut fx = Fixture::new(EntityStore::new());
        let mut nav = Navigator::new();
        assert_eq!(nav.current(), Section::Dashboard);

        let view = nav.navigate(Section::Assets, fx.ctx());
        assert_eq!(nav.current(), Section::Assets);
        assert_eq!(view.section(), Section::Assets);
    }

    #[test]
    fn empty_collections_show_empty_state() {
        let mut fx = Fixture::new(EntityStore::new());
        match load(Section::Campaigns, fx.ctx()) {
            SectionView::Campaigns { campaigns, empty, .. } => {
                assert!(campaigns.is_empty());
                assert_eq!(empty, Some(NO_CAMPAIGNS));
            }
            other => panic!("unexpected view {other:?}"),
        }
        match load(Section::Creative, fx.ctx()) {
            SectionView::Creative { empty, .. } => assert_eq!(empty, Some(NO_CREATIVES)),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn loading_twice_is_idempotent() {
        let mut fx = Fixture::new(EntityStore::with_sample_data());
        for section in [
            Section::Dashboard,
            Section::Campaigns,
            Section::Assets,
            Section::Audience,
            Section::Creative,
        ] {
            let first = load(section, fx.ctx());
            let second = load(section, fx.ctx());
            assert_eq!(first, second, "{section}");
        }
    }

    #[test]
    fn asset_sizes_are_human_readable() {
        let mut fx = Fixture::new(EntityStore::with_sample_data());
        match load(Section::Assets, fx.ctx()) {
            SectionView::Assets { assets, empty } => {
                assert!(empty.is_none());
                assert_eq!(assets[0].size, "512 KB");
                assert!(assets[0].is_image);
                assert_eq!(assets[1].size, "15 MB");
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn audience_defaults_load_on_first_visit() {
        let mut fx = Fixture::new(EntityStore::new());
        match load(Section::Audience, fx.ctx()) {
            SectionView::Audience { filters, estimate, size_display } => {
                assert_eq!(filters.len(), 3);
                assert_eq!(estimate.size, 3_535_533);
                assert_eq!(size_display, "3,535,533");
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn dashboard_rebinds_charts() {
        let mut fx = Fixture::new(EntityStore::new());
        load(Section::Dashboard, fx.ctx());
        load(Section::Dashboard, fx.ctx());
        assert_eq!(fx.charts.released_count(), 2);
    }

    #[test]
    fn missing_surfaces_are_skipped() {
        let mut fx = Fixture::new(EntityStore::new());
        fx.charts = ChartRegistry::new();
        fx.charts.add_surface(presets::TRENDS);
        match load(Section::Analytics, fx.ctx()) {
            SectionView::Analytics { charts, cohort } => {
                assert_eq!(charts.len(), 1);
                assert_eq!(charts[0].surface, presets::TRENDS);
                assert_eq!(cohort.len(), 10);
            }
            other => panic!("unexpected view {other:?}"),
        }
    }
}
