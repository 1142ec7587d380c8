//! CLI command implementations for adpilot.
//!
//! Provides subcommand handlers for:
//! - `adpilot analyze "text"` — keyword NLP analysis of a campaign description
//! - `adpilot estimate --filters N` — audience reach estimate
//! - `adpilot deploy --name ...` — run the campaign wizard end to end
//! - `adpilot campaigns | assets` — list store contents
//! - `adpilot upload FILE...` — simulated asset upload
//! - `adpilot audience` — save an audience from the default filters
//! - `adpilot creative "prompt"` — simulated creative generation
//! - `adpilot export` — campaign performance report
//! - `adpilot section NAME` — render one dashboard section as JSON
//! - `adpilot theme show|toggle|set` — theme preference
//! - `adpilot activity` — recent activity log entries
//! - `adpilot config show|init|set|reset` — configuration management
//!
//! Every command builds a fresh [`Platform`]; the store lives in memory and
//! starts from the sample data on each run.

use anyhow::{Result, bail};
use colored::Colorize;

use crate::activity::{Level, reader};
use crate::analysis::Analysis;
use crate::audience::{self, Estimate, ReachPotential, format_count};
use crate::config::{self, schema::Pace};
use crate::creative::CreativeRequest;
use crate::notify::{Toast, ToastKind};
use crate::platform::Platform;
use crate::report::Report;
use crate::store::{Asset, Campaign};
use crate::theme::Theme;
use crate::upload::{FileDescriptor, format_file_size};
use crate::wizard::CampaignForm;

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

/// Build the platform for one command. `instant` forces zero simulated
/// delays regardless of config.
pub fn platform(instant: bool) -> Platform {
    let mut cfg = config::load();
    if instant {
        cfg.general.pace = Pace::Instant;
        cfg.apply_pace();
    }
    Platform::new(cfg)
}

/// Print and clear any pending toasts.
fn flush_toasts(platform: &mut Platform) {
    for toast in platform.drain_toasts() {
        print_toast(&toast);
    }
}

fn print_toast(toast: &Toast) {
    let icon = match toast.kind {
        ToastKind::Success => toast.kind.icon().green().bold(),
        ToastKind::Error => toast.kind.icon().red().bold(),
        ToastKind::Warning => toast.kind.icon().yellow().bold(),
        ToastKind::Info => toast.kind.icon().blue().bold(),
    };
    println!("{} {} {}", icon, toast.title.bold(), toast.message.dimmed());
}

/// Print pending toasts, then fail with the operation's error.
fn finish<T>(platform: &mut Platform, result: Result<T, crate::error::DashboardError>) -> Result<T> {
    flush_toasts(platform);
    Ok(result?)
}

// ---------------------------------------------------------------------------
// adpilot analyze
// ---------------------------------------------------------------------------

/// Analyze a campaign description and print sentiment, intent and entities.
pub fn run_analyze(platform: &mut Platform, text: &str, format: OutputFormat) -> Result<()> {
    let result = platform.analyze(text);
    let Some(analysis) = finish(platform, result)? else {
        let min = platform.config().analysis.min_text_length;
        println!(
            "{}",
            format!("Text too short to analyze (minimum {min} characters).").yellow()
        );
        return Ok(());
    };

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "analysis": analysis,
                "models": platform.analyzer().models(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Csv => print_analysis_csv(&analysis),
        OutputFormat::Table => print_analysis_table(platform, &analysis),
    }
    Ok(())
}

fn print_analysis_table(platform: &Platform, analysis: &Analysis) {
    let models = platform.analyzer().models();
    println!("{}", "Campaign Text Analysis".bold().cyan());
    println!("{}", "=".repeat(50));
    println!("  {} {}", "Sentiment:".bold(), analysis.sentiment_display());
    println!("  {}   {}", "Intent:".bold(), analysis.intent_display());
    if analysis.entities.is_empty() {
        println!("  {} {}", "Entities:".bold(), "none".dimmed());
    } else {
        println!("  {}", "Entities:".bold());
        for entity in &analysis.entities {
            println!("    {} {}", format!("{:<10}", entity.kind).dimmed(), entity.value);
        }
    }
    println!();
    println!("{}", "Models".dimmed());
    println!("  {} {}", "sentiment".dimmed(), models.sentiment.dimmed());
    println!("  {} {}", "ner      ".dimmed(), models.ner.dimmed());
    println!("  {} {}", "intent   ".dimmed(), models.intent.dimmed());
}

fn print_analysis_csv(analysis: &Analysis) {
    println!("sentiment,sentiment_score,intent,intent_confidence,entities");
    let entities: Vec<String> = analysis
        .entities
        .iter()
        .map(|e| format!("{}:{}", e.kind, e.value))
        .collect();
    println!(
        "{},{:.2},{},{:.2},{}",
        analysis.sentiment.label,
        analysis.sentiment.score,
        analysis.intent.category.key(),
        analysis.intent.confidence,
        crate::report::csv_field(&entities.join(" ")),
    );
}

// ---------------------------------------------------------------------------
// adpilot estimate
// ---------------------------------------------------------------------------

/// Print the reach estimate for a filter count.
pub fn run_estimate(filters: usize, format: OutputFormat) -> Result<()> {
    let estimate = audience::estimate(filters);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&estimate)?),
        OutputFormat::Csv => {
            println!("filters,size,potential");
            println!("{},{},{}", estimate.filter_count, estimate.size, estimate.potential);
        }
        OutputFormat::Table => print_estimate(&estimate),
    }
    Ok(())
}

fn print_estimate(estimate: &Estimate) {
    println!(
        "  {} {} ({} filters)",
        "Estimated reach:".bold(),
        format_count(estimate.size),
        estimate.filter_count
    );
    println!(
        "  {} {}",
        "Potential:      ".bold(),
        colorize_potential(estimate.potential)
    );
}

// ---------------------------------------------------------------------------
// adpilot deploy
// ---------------------------------------------------------------------------

/// Walk the wizard through all three steps and deploy the campaign.
pub fn run_deploy(platform: &mut Platform, form: CampaignForm) -> Result<()> {
    platform.open_wizard();
    platform.update_form(form);

    platform.wizard_next();
    if let Some(insights) = platform.wizard().insights() {
        println!("{}", "AI Insights".bold().cyan());
        for suggestion in &insights.audience_suggestions {
            println!("  {} {}", "·".dimmed(), suggestion);
        }
        for tip in &insights.optimization_tips {
            println!("  {} {}", "·".dimmed(), tip.dimmed());
        }
        println!();
    }

    platform.wizard_next();
    if let Some(summary) = platform.wizard().summary() {
        println!("{}", "Review".bold().cyan());
        println!("  {} {}", "Name:     ".bold(), summary.name);
        println!("  {} {}", "Platform: ".bold(), summary.platform);
        println!("  {} {}", "Objective:".bold(), summary.objective);
        println!("  {} {}", "Budget:   ".bold(), summary.budget);
        println!();
    }

    let result = platform.deploy_campaign();
    let campaign = finish(platform, result)?;
    println!(
        "  {} #{} {} on {} at ${:.2}/day",
        "Deployed:".bold(),
        campaign.id,
        campaign.name,
        campaign.platform,
        campaign.daily_budget
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// adpilot campaigns | assets
// ---------------------------------------------------------------------------

/// List campaigns in the store.
pub fn run_campaigns(platform: &Platform, format: OutputFormat) -> Result<()> {
    let campaigns = platform.store().campaigns();
    if campaigns.is_empty() {
        println!("{}", "No campaigns yet.".yellow());
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(campaigns)?),
        OutputFormat::Csv => print_campaigns_csv(campaigns),
        OutputFormat::Table => print_campaigns_table(campaigns),
    }
    Ok(())
}

fn print_campaigns_table(campaigns: &[Campaign]) {
    println!("{}", "Campaigns".bold().cyan());
    println!("{}", "=".repeat(72));
    println!(
        "  {:<4} {:<24} {:<10} {:<8} {:>11} {:>8} {:>6}",
        "ID", "Name", "Platform", "Status", "Impressions", "Clicks", "Conv"
    );
    println!("  {}", "-".repeat(70));

    for (i, c) in campaigns.iter().enumerate() {
        let line = format!(
            "  {:<4} {:<24} {:<10} {:<8} {:>11} {:>8} {:>6}",
            c.id % 10_000,
            truncate(&c.name, 24),
            c.platform.to_string(),
            c.status.to_string(),
            format_count(c.performance.impressions),
            format_count(c.performance.clicks),
            c.performance.conversions,
        );
        if i % 2 == 0 {
            println!("{}", line);
        } else {
            println!("{}", line.dimmed());
        }
    }
}

fn print_campaigns_csv(campaigns: &[Campaign]) {
    println!("id,name,platform,objective,daily_budget,status,impressions,clicks,conversions");
    for c in campaigns {
        println!(
            "{},{},{},{},{:.2},{},{},{},{}",
            c.id,
            crate::report::csv_field(&c.name),
            c.platform,
            c.objective.key(),
            c.daily_budget,
            c.status,
            c.performance.impressions,
            c.performance.clicks,
            c.performance.conversions,
        );
    }
}

/// List uploaded assets.
pub fn run_assets(platform: &Platform, format: OutputFormat) -> Result<()> {
    let assets = platform.store().assets();
    if assets.is_empty() {
        println!("{}", "No assets uploaded.".yellow());
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(assets)?),
        OutputFormat::Csv => {
            println!("id,name,size,type");
            for a in assets {
                println!(
                    "{},{},{},{}",
                    a.id,
                    crate::report::csv_field(&a.name),
                    a.size,
                    a.mime_type
                );
            }
        }
        OutputFormat::Table => print_assets_table(assets),
    }
    Ok(())
}

fn print_assets_table(assets: &[Asset]) {
    println!("{}", "Assets".bold().cyan());
    println!("{}", "=".repeat(60));
    for asset in assets {
        let kind = if asset.is_image() { "image" } else { "file" };
        println!(
            "  {:<30} {:>10} {}",
            truncate(&asset.name, 30),
            format_file_size(asset.size),
            kind.dimmed()
        );
    }
}

// ---------------------------------------------------------------------------
// adpilot upload
// ---------------------------------------------------------------------------

/// Upload local files as assets, showing simulated progress.
pub fn run_upload(platform: &mut Platform, paths: &[String]) -> Result<()> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(FileDescriptor::from_path(std::path::Path::new(path))?);
    }

    let result = platform.upload(files);
    let outcomes = finish(platform, result)?;
    for outcome in &outcomes {
        let steps: Vec<String> = outcome.ticks.iter().map(|t| format!("{t}%")).collect();
        println!(
            "  {:<30} {:>10} {}",
            truncate(&outcome.asset.name, 30),
            format_file_size(outcome.asset.size),
            steps.join(" → ").dimmed()
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// adpilot audience
// ---------------------------------------------------------------------------

/// Load the audience section (default filters), add `extra` random filters
/// and save the result.
pub fn run_audience(platform: &mut Platform, extra: usize) -> Result<()> {
    platform.navigate_to(crate::navigation::Section::Audience);
    for _ in 0..extra {
        platform.add_audience_filter();
    }

    println!("{}", "Audience Filters".bold().cyan());
    println!("{}", "=".repeat(40));
    for slot in platform.audience().filters() {
        let value = if slot.value.is_empty() {
            "(any)".dimmed().to_string()
        } else {
            slot.value.clone()
        };
        println!("  {:<12} {}", slot.kind.bold(), value);
    }
    println!();

    let saved = platform.create_audience();
    flush_toasts(platform);
    println!(
        "  {} {} ({})",
        "Reach:".bold(),
        format_count(saved.size),
        colorize_potential(saved.potential)
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// adpilot creative
// ---------------------------------------------------------------------------

/// Generate a creative from a prompt.
pub fn run_creative(
    platform: &mut Platform,
    prompt: &str,
    style: Option<String>,
    format: Option<String>,
) -> Result<()> {
    let request = CreativeRequest {
        prompt: prompt.to_string(),
        style: style.unwrap_or_default(),
        format: format.unwrap_or_default(),
    };
    let result = platform.generate_creative(request);
    let creative = finish(platform, result)?;
    println!("  {} {}", "Title:  ".bold(), creative.title());
    println!("  {} {}", "Excerpt:".bold(), creative.excerpt().dimmed());
    Ok(())
}

// ---------------------------------------------------------------------------
// adpilot export
// ---------------------------------------------------------------------------

/// Generate the campaign performance report.
pub fn run_export(platform: &mut Platform, format: OutputFormat) -> Result<()> {
    let result = platform.export_report();
    let report = finish(platform, result)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Csv => print!("{}", report.to_csv()),
        OutputFormat::Table => print_report_table(&report),
    }
    Ok(())
}

fn print_report_table(report: &Report) {
    println!(
        "{}",
        format!(
            "Performance Report — {}",
            report.generated_at.format("%Y-%m-%d %H:%M UTC")
        )
        .bold()
        .cyan()
    );
    println!("{}", "=".repeat(72));
    println!(
        "  {:<24} {:>12} {:>9} {:>6} {:>7} {:>7}",
        "Campaign", "Impressions", "Clicks", "Conv", "CTR", "CVR"
    );
    println!("  {}", "-".repeat(70));
    for row in &report.rows {
        println!(
            "  {:<24} {:>12} {:>9} {:>6} {:>6.2}% {:>6.2}%",
            truncate(&row.campaign, 24),
            format_count(row.impressions),
            format_count(row.clicks),
            row.conversions,
            row.ctr,
            row.conversion_rate,
        );
    }
    let t = &report.totals;
    println!("  {}", "-".repeat(70));
    println!(
        "  {} {:>12} {:>9} {:>6} {:>6.2}% {:>6.2}%",
        format!("{:<24}", format!("Total ({})", t.campaigns)).bold(),
        format_count(t.impressions),
        format_count(t.clicks),
        t.conversions,
        t.ctr,
        t.conversion_rate,
    );
}

// ---------------------------------------------------------------------------
// adpilot section
// ---------------------------------------------------------------------------

/// Load a dashboard section and print its view model as JSON.
pub fn run_section(platform: &mut Platform, name: &str) -> Result<()> {
    let result = platform.navigate(name);
    let view = finish(platform, result)?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// adpilot theme
// ---------------------------------------------------------------------------

/// Show, toggle or set the saved theme.
pub fn run_theme(platform: &mut Platform, action: Option<&str>) -> Result<()> {
    match action {
        None | Some("show") => {
            println!("  {} {}", "Theme:".bold(), platform.theme());
        }
        Some("toggle") => {
            platform.toggle_theme()?;
            flush_toasts(platform);
        }
        Some(other) => {
            let Some(theme) = Theme::parse(other) else {
                bail!("unknown theme '{other}' (expected light, dark, show or toggle)");
            };
            platform.set_theme(theme)?;
            flush_toasts(platform);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// adpilot activity
// ---------------------------------------------------------------------------

/// Show the most recent activity log entries.
pub fn run_activity(
    platform: &Platform,
    limit: usize,
    level: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let Some(path) = platform.log().path() else {
        println!("{}", "Activity logging is disabled.".yellow());
        return Ok(());
    };
    let min_level = level.and_then(Level::parse).unwrap_or(Level::Debug);
    let entries = reader::recent(path, limit, min_level);

    if entries.is_empty() {
        println!("{}", "No activity recorded yet.".yellow());
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Csv => {
            println!("timestamp,level,kind,message");
            for e in &entries {
                println!(
                    "{},{},{},{}",
                    e.timestamp,
                    e.level,
                    e.kind,
                    crate::report::csv_field(&e.message)
                );
            }
        }
        OutputFormat::Table => {
            println!("{}", "Recent Activity".bold().cyan());
            println!("{}", "=".repeat(72));
            for e in &entries {
                let ts = e.timestamp.get(..19).unwrap_or(&e.timestamp);
                println!(
                    "  {} {} {:<10} {}",
                    ts.dimmed(),
                    colorize_level(e.level),
                    e.kind.to_string(),
                    e.message
                );
            }
            println!();
            let counts: Vec<String> = reader::counts_by_kind(&entries)
                .into_iter()
                .map(|(kind, n)| format!("{kind} {n}"))
                .collect();
            println!("  {} {}", "By kind:".dimmed(), counts.join(", ").dimmed());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// adpilot config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective adpilot Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.adpilot/config.toml", global_exists);
    print_source(".adpilot.toml", project_exists);
    println!(
        "  {} {}",
        "·".dimmed(),
        "ADPILOT_* environment variables".dimmed()
    );
    Ok(())
}

fn print_source(label: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), label.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{label} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.adpilot/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    println!("  {}", "Edit the file to customize adpilot.".dimmed());
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// adpilot web
// ---------------------------------------------------------------------------

/// Serve the dashboard. `addr` overrides `[server] addr`.
pub fn run_web(mut platform: Platform, addr: Option<String>, no_open: bool) -> Result<()> {
    let addr = addr.unwrap_or_else(|| platform.config().server.addr.clone());
    let open = platform.config().server.open_browser && !no_open;
    crate::web::serve(&mut platform, &addr, open)
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Truncate a string to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

fn colorize_potential(potential: ReachPotential) -> colored::ColoredString {
    let label = potential.to_string();
    match potential {
        ReachPotential::High => label.green(),
        ReachPotential::Medium => label.yellow(),
        ReachPotential::Low => label.red(),
    }
}

fn colorize_level(level: Level) -> colored::ColoredString {
    let label = format!("{:<5}", level.to_string());
    match level {
        Level::Error => label.red(),
        Level::Warn => label.yellow(),
        Level::Info => label.normal(),
        Level::Debug => label.dimmed(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
