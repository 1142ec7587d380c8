/// End-to-end tests through the composition root.
///
/// Every test runs with zero simulated delay, a seeded RNG and its own
/// temporary activity log and preferences file.
use std::fs;

use adpilot::activity::{ActivityLog, EventKind, Level, reader};
use adpilot::config::{self, schema::{AdpilotConfig, Pace, ThemeSetting}};
use adpilot::creative::CreativeRequest;
use adpilot::navigation::{Section, SectionView};
use adpilot::notify::ToastKind;
use adpilot::platform::Platform;
use adpilot::theme::{Theme, ThemeStore};
use adpilot::upload::FileDescriptor;
use tempfile::TempDir;

fn platform(dir: &TempDir) -> Platform {
    let mut config = AdpilotConfig::default();
    config.general.pace = Pace::Instant;
    config.general.theme = ThemeSetting::Light;
    config.apply_pace();
    Platform::new(config)
        .with_log(ActivityLog::at_path(dir.path().join("activity.jsonl"), Level::Debug))
        .with_theme_store(ThemeStore::at(dir.path().join("preferences.json")))
        .with_seed(42)
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[test]
fn reloading_a_section_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let mut p = platform(&dir);

    for section in Section::ALL {
        if section == Section::Analytics {
            continue;
        }
        let first = p.navigate_to(section);
        let second = p.navigate_to(section);
        assert_eq!(first, second, "{section} changed on reload");
    }
}

#[test]
fn analytics_charts_are_stable_across_reloads() {
    let dir = TempDir::new().unwrap();
    let mut p = platform(&dir);

    let SectionView::Analytics { charts: first, .. } = p.navigate_to(Section::Analytics) else {
        panic!("expected analytics view");
    };
    let SectionView::Analytics { charts: second, .. } = p.navigate_to(Section::Analytics) else {
        panic!("expected analytics view");
    };
    assert_eq!(first, second);
    assert_eq!(p.charts().released_count(), 2);
}

#[test]
fn unknown_section_leaves_current_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut p = platform(&dir);
    p.navigate("assets").unwrap();
    assert!(p.navigate("reports").is_err());
    assert_eq!(p.current_section(), Section::Assets);
}

// ---------------------------------------------------------------------------
// Audience
// ---------------------------------------------------------------------------

#[test]
fn audience_snapshot_uses_current_filters() {
    let dir = TempDir::new().unwrap();
    let mut p = platform(&dir);
    p.navigate_to(Section::Audience);
    p.add_audience_filter();
    p.set_audience_filter(3, "Hiking").unwrap();

    let saved = p.create_audience();
    assert_eq!(saved.name, "Audience 1");
    assert_eq!(saved.filters.len(), 4);
    assert_eq!(saved.filters[3].value, "Hiking");
    assert_eq!(saved.size, 2_500_000);

    let toasts = p.drain_toasts();
    assert_eq!(toasts[0].message, "New audience saved with 2,500,000 estimated reach");
}

#[test]
fn removing_a_missing_filter_raises_toast() {
    let dir = TempDir::new().unwrap();
    let mut p = platform(&dir);
    assert!(p.remove_audience_filter(9).is_err());
    let toasts = p.drain_toasts();
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].title, "Unknown Filter");
}

// ---------------------------------------------------------------------------
// Uploads, creatives, reports
// ---------------------------------------------------------------------------

#[test]
fn uploads_become_assets_in_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("banner.png");
    fs::write(&path, vec![0u8; 2048]).unwrap();

    let mut p = platform(&dir);
    let files = vec![
        FileDescriptor::from_path(&path).unwrap(),
        FileDescriptor::new("brief.pdf", 10, "application/pdf"),
    ];
    let outcomes = p.upload(files).unwrap();

    assert_eq!(outcomes.len(), 2);
    for outcome in &outcomes {
        assert_eq!(outcome.ticks.last(), Some(&100));
        assert!(outcome.ticks.windows(2).all(|w| w[0] <= w[1]));
    }
    let names: Vec<&str> = p.store().assets().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["hero-banner.jpg", "product-video.mp4", "banner.png", "brief.pdf"]
    );
    assert_eq!(p.store().assets()[2].mime_type, "image/png");

    let titles: Vec<String> = p.drain_toasts().into_iter().map(|t| t.message).collect();
    assert_eq!(
        titles,
        vec!["banner.png uploaded successfully", "brief.pdf uploaded successfully"]
    );
}

#[test]
fn blank_prompt_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut p = platform(&dir);
    assert!(p.generate_creative(CreativeRequest::new("   ")).is_err());
    assert!(p.store().creatives().is_empty());
    let toasts = p.drain_toasts();
    assert_eq!(toasts[0].title, "Missing Prompt");
}

#[test]
fn creative_appears_in_creative_section() {
    let dir = TempDir::new().unwrap();
    let mut p = platform(&dir);
    p.generate_creative(CreativeRequest::new("Summer shoes on a beach"))
        .unwrap();

    let SectionView::Creative { creatives, empty } = p.navigate_to(Section::Creative) else {
        panic!("expected creative view");
    };
    assert!(empty.is_none());
    assert_eq!(creatives.len(), 1);
}

#[test]
fn export_covers_every_campaign() {
    let dir = TempDir::new().unwrap();
    let mut p = platform(&dir);
    let report = p.export_report().unwrap();
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.totals.impressions, 123_000);
    assert_eq!(report.totals.clicks, 2_150);
    assert!(report.to_csv().lines().count() >= 3);
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

#[test]
fn theme_toggle_persists() {
    let dir = TempDir::new().unwrap();
    let mut p = platform(&dir);
    assert_eq!(p.theme(), Theme::Light);
    assert_eq!(p.toggle_theme().unwrap(), Theme::Dark);

    let reopened = platform(&dir);
    assert_eq!(reopened.theme(), Theme::Dark);
    assert_eq!(p.drain_toasts()[0].message, "Switched to dark mode");
}

// ---------------------------------------------------------------------------
// Activity log
// ---------------------------------------------------------------------------

#[test]
fn operations_are_logged() {
    let dir = TempDir::new().unwrap();
    let mut p = platform(&dir);
    p.navigate_to(Section::Campaigns);
    p.export_report().unwrap();

    let entries = reader::read_entries(&dir.path().join("activity.jsonl"));
    assert!(entries.iter().any(|e| e.kind == EventKind::Navigation));
    assert!(entries.iter().any(|e| e.kind == EventKind::Export));
}

// ---------------------------------------------------------------------------
// Config layering
// ---------------------------------------------------------------------------

#[test]
fn project_config_overrides_global() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("config.toml");
    let project = dir.path().join(".adpilot.toml");
    fs::write(&global, "[server]\naddr = \"127.0.0.1:8000\"\n[analysis]\nmin_text_length = 20\n")
        .unwrap();
    fs::write(&project, "[analysis]\nmin_text_length = 5\n").unwrap();

    let cfg = config::load_layers(Some(global), Some(project));
    assert_eq!(cfg.analysis.min_text_length, 5);
    assert_eq!(cfg.server.addr, "127.0.0.1:8000");
}

#[test]
fn env_overrides_beat_file_layers() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("config.toml");
    fs::write(&global, "[store]\nseed_sample_data = true\n").unwrap();

    // Only this test reads ADPILOT_SEED_SAMPLE_DATA.
    unsafe { std::env::set_var("ADPILOT_SEED_SAMPLE_DATA", "off") };
    let cfg = config::load_layers(Some(global), None);
    unsafe { std::env::remove_var("ADPILOT_SEED_SAMPLE_DATA") };

    assert!(!cfg.store.seed_sample_data);
    assert!(Platform::new(cfg).store().campaigns().is_empty());
}
