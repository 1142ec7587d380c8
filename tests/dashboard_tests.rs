/// Audience estimation, dashboard content and chart binding tests.
use adpilot::audience::{self, AudienceBuilder, ReachPotential, format_count};
use adpilot::charts::{ChartRegistry, presets};
use adpilot::dashboard::{self, COHORT_SIZE};
use adpilot::error::DashboardError;
use rand::SeedableRng;
use rand::rngs::SmallRng;

// ---------------------------------------------------------------------------
// Audience estimate
// ---------------------------------------------------------------------------

#[test]
fn no_filters_is_full_reach() {
    let estimate = audience::estimate(0);
    assert_eq!(estimate.size, 10_000_000);
    assert_eq!(estimate.potential, ReachPotential::High);
}

#[test]
fn each_filter_narrows_reach() {
    let sizes: Vec<u64> = (0..20).map(|n| audience::estimate(n).size).collect();
    assert!(sizes.windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn potential_bands() {
    assert_eq!(audience::estimate(6).potential, ReachPotential::High);
    assert_eq!(audience::estimate(7).potential, ReachPotential::Medium);
    assert_eq!(audience::estimate(13).potential, ReachPotential::Medium);
    assert_eq!(audience::estimate(14).potential, ReachPotential::Low);
}

#[test]
fn default_filters_estimate() {
    let mut builder = AudienceBuilder::new();
    builder.ensure_defaults();
    assert_eq!(builder.filters().len(), 3);
    assert_eq!(format_count(builder.estimate().size), "3,535,533");
}

#[test]
fn defaults_load_once() {
    let mut builder = AudienceBuilder::new();
    builder.ensure_defaults();
    builder.remove(0).unwrap();
    builder.ensure_defaults();
    assert_eq!(builder.filters().len(), 2);
}

#[test]
fn random_filters_are_free_text() {
    let mut builder = AudienceBuilder::new();
    let mut rng = SmallRng::seed_from_u64(11);
    let slot = builder.add_random_filter(&mut rng).clone();
    assert!(slot.value.is_empty());
    assert!(audience::builder::EXTRA_FILTER_TYPES.contains(&slot.kind.as_str()));
    builder.set_value(0, "Running shoes").unwrap();
    assert_eq!(builder.filters()[0].value, "Running shoes");
}

#[test]
fn unknown_filter_index_is_user_error() {
    let mut builder = AudienceBuilder::new();
    let err = builder.remove(4).unwrap_err();
    assert!(matches!(err, DashboardError::MissingInput { .. }));
    assert!(err.is_user_error());
}

// ---------------------------------------------------------------------------
// Dashboard content
// ---------------------------------------------------------------------------

#[test]
fn kpis_are_fixed() {
    let changes: Vec<&str> = dashboard::kpis().iter().map(|k| k.change).collect();
    assert_eq!(changes, vec!["+12.5%", "+3", "+0.8%", "+15%"]);
    assert_eq!(dashboard::recent_activity().len(), 5);
}

#[test]
fn cohort_grid_is_square_and_bounded() {
    let mut rng = SmallRng::seed_from_u64(5);
    let grid = dashboard::cohort_heatmap(&mut rng);
    assert_eq!(grid.len(), COHORT_SIZE);
    for row in &grid {
        assert_eq!(row.len(), COHORT_SIZE);
        for cell in row {
            assert!((0.0..100.0).contains(&cell.value));
            assert!((0.0..1.0).contains(&cell.opacity));
            assert_eq!(cell.label, cell.value.floor() as u32);
        }
    }
}

#[test]
fn pulse_never_repeats_a_tile() {
    let mut rng = SmallRng::seed_from_u64(8);
    for _ in 0..50 {
        let picked = dashboard::pulse(&mut rng);
        let mut deduped = picked.clone();
        deduped.dedup();
        assert_eq!(picked, deduped);
        assert!(picked.len() <= 4);
    }
}

// ---------------------------------------------------------------------------
// Chart binding
// ---------------------------------------------------------------------------

#[test]
fn presets_are_valid() {
    for spec in [
        presets::performance(),
        presets::funnel(),
        presets::trends(),
        presets::attribution(),
    ] {
        assert!(spec.validate().is_ok());
    }
}

#[test]
fn rebinding_releases_previous_chart() {
    let mut registry = ChartRegistry::with_dashboard_surfaces();
    registry.bind(presets::FUNNEL, presets::funnel()).unwrap();
    registry.bind(presets::FUNNEL, presets::funnel()).unwrap();
    registry.bind(presets::FUNNEL, presets::funnel()).unwrap();
    assert_eq!(registry.released_count(), 2);
    assert!(registry.get(presets::FUNNEL).is_some());
}

#[test]
fn missing_surface_is_reported() {
    let mut registry = ChartRegistry::new();
    let err = registry
        .bind(presets::TRENDS, presets::trends())
        .unwrap_err();
    assert_eq!(err, DashboardError::SurfaceMissing(presets::TRENDS.to_string()));
    assert!(registry.get(presets::TRENDS).is_none());
}

#[test]
fn funnel_is_horizontal() {
    let config = presets::funnel().to_library_config();
    assert_eq!(config["options"]["indexAxis"], "y");
}
