//! JSON API handlers for the web dashboard.
//!
//! Each handler corresponds to an API endpoint, calls into the [`Platform`]
//! and returns a JSON response. Failures are returned as errors and mapped
//! to a status code by the router.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tiny_http::{Response, StatusCode};

use crate::analysis::{Analysis, ModelCatalog};
use crate::audience::{self, Estimate, FilterSlot, format_count};
use crate::config;
use crate::creative::CreativeRequest;
use crate::dashboard::KpiId;
use crate::error::DashboardError;
use crate::notify::Toast;
use crate::platform::Platform;
use crate::store::{Audience, Campaign};
use crate::theme::Theme;
use crate::upload::FileDescriptor;
use crate::wizard::{CampaignForm, Insights, PrimaryAction, Summary};

use super::{JsonResponse, content_type_json};

// ---------------------------------------------------------------------------
// JSON request/response types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct AnalyzeRequest {
    text: String,
}

#[derive(Serialize)]
struct AnalyzeResponse<'a> {
    analyzer: &'a str,
    models: &'a ModelCatalog,
    /// `None` when the text is too short to analyze.
    analysis: Option<Analysis>,
    sentiment: Option<String>,
    intent: Option<String>,
}

/// Wizard state as the frontend renders it.
#[derive(Serialize)]
struct WizardResponse<'a> {
    step: u8,
    visible: bool,
    progress: [bool; 3],
    primary_action: PrimaryAction,
    form: &'a CampaignForm,
    insights: Option<&'a Insights>,
    summary: Option<&'a Summary>,
}

#[derive(Serialize)]
struct DeployResponse {
    campaign: Campaign,
}

#[derive(Serialize)]
struct FiltersResponse<'a> {
    filters: &'a [FilterSlot],
    estimate: Estimate,
    size_display: String,
}

#[derive(Deserialize)]
struct FilterValueRequest {
    value: String,
}

#[derive(Serialize)]
struct AudienceResponse {
    audience: Audience,
}

#[derive(Deserialize)]
struct UploadRequest {
    files: Vec<FileDescriptor>,
}

#[derive(Deserialize)]
struct ThemeRequest {
    theme: String,
}

#[derive(Serialize)]
struct ThemeResponse {
    theme: Theme,
}

#[derive(Serialize)]
struct PulseResponse {
    interval_ms: u64,
    highlight: Vec<KpiId>,
}

#[derive(Serialize)]
struct ToastsResponse {
    toasts: Vec<Toast>,
}

#[derive(Serialize)]
struct HealthResponse {
    version: &'static str,
    analyzer: String,
    section: String,
    campaigns: usize,
    assets: usize,
    audiences: usize,
    creatives: usize,
    config_exists: bool,
    log_path: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a JSON success response.
fn json_response<T: Serialize>(data: &T) -> Result<JsonResponse> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(200)))
}

/// Parse a JSON request body. Malformed bodies are the caller's fault.
fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        DashboardError::missing_input("Invalid Request", &format!("invalid JSON body: {e}")).into()
    })
}

fn parse_index(raw: &str) -> Result<usize> {
    raw.parse().map_err(|_| {
        DashboardError::missing_input("Invalid Request", &format!("'{raw}' is not a filter index"))
            .into()
    })
}

/// Parse the `?filters=N` query parameter from a URL. A missing parameter
/// means no filters; a present one must be a non-negative integer.
fn parse_filters_param(url: &str) -> Result<usize> {
    let raw = url.split('?').nth(1).and_then(|query| {
        query.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k == "filters").then_some(v)
        })
    });
    let Some(raw) = raw else {
        return Ok(0);
    };
    raw.parse().map_err(|_| {
        DashboardError::missing_input(
            "Invalid Request",
            &format!("filters must be a non-negative integer, got '{raw}'"),
        )
        .into()
    })
}

fn wizard_state(platform: &Platform) -> Result<JsonResponse> {
    let wizard = platform.wizard();
    json_response(&WizardResponse {
        step: wizard.step().number(),
        visible: wizard.is_visible(),
        progress: wizard.progress(),
        primary_action: wizard.primary_action(),
        form: wizard.form(),
        insights: wizard.insights(),
        summary: wizard.summary(),
    })
}

fn filters_state(platform: &Platform) -> Result<JsonResponse> {
    let builder = platform.audience();
    let estimate = builder.estimate();
    json_response(&FiltersResponse {
        filters: builder.filters(),
        size_display: format_count(estimate.size),
        estimate,
    })
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `GET /api/section/{name}` — navigate and load a section.
pub fn get_section(platform: &mut Platform, name: &str) -> Result<JsonResponse> {
    let view = platform.navigate(name)?;
    json_response(&view)
}

/// `GET /api/metrics/pulse` — KPI tiles to highlight on this tick.
pub fn get_pulse(platform: &mut Platform) -> Result<JsonResponse> {
    json_response(&PulseResponse {
        interval_ms: platform.config().simulation.metrics_interval_ms,
        highlight: platform.pulse(),
    })
}

/// `POST /api/analyze` — simulated NLP analysis of `{ "text": ... }`.
pub fn post_analyze(platform: &mut Platform, body: &str) -> Result<JsonResponse> {
    let req: AnalyzeRequest = parse_body(body)?;
    let analysis = platform.analyze(&req.text)?;

    json_response(&AnalyzeResponse {
        analyzer: platform.analyzer().name(),
        models: platform.analyzer().models(),
        sentiment: analysis.as_ref().map(Analysis::sentiment_display),
        intent: analysis.as_ref().map(Analysis::intent_display),
        analysis,
    })
}

/// `GET /api/estimate?filters=N` — audience size for a filter count.
pub fn get_estimate(url: &str) -> Result<JsonResponse> {
    let filters = parse_filters_param(url)?;
    json_response(&audience::estimate(filters))
}

/// `GET /api/wizard` — current wizard state.
pub fn get_wizard(platform: &mut Platform) -> Result<JsonResponse> {
    wizard_state(platform)
}

/// `PUT /api/wizard/form` — replace the step 1 form fields.
pub fn put_wizard_form(platform: &mut Platform, body: &str) -> Result<JsonResponse> {
    let form: CampaignForm = parse_body(body)?;
    platform.update_form(form);
    wizard_state(platform)
}

/// `POST /api/wizard/{open|close|next|prev|deploy}`.
pub fn post_wizard_action(platform: &mut Platform, action: &str) -> Result<JsonResponse> {
    match action {
        "open" => platform.open_wizard(),
        "close" => platform.close_wizard(),
        "next" => {
            platform.wizard_next();
        }
        "prev" => {
            platform.wizard_prev();
        }
        "deploy" => {
            let campaign = platform.deploy_campaign()?;
            return json_response(&DeployResponse { campaign });
        }
        other => {
            return Err(DashboardError::InvalidTransition(format!("unknown wizard action '{other}'")).into());
        }
    }
    wizard_state(platform)
}

/// `GET /api/audience/filters` — current filter set and estimate.
pub fn get_filters(platform: &mut Platform) -> Result<JsonResponse> {
    filters_state(platform)
}

/// `POST /api/audience/filters` — add a random free-text filter.
pub fn post_filter(platform: &mut Platform) -> Result<JsonResponse> {
    platform.add_audience_filter();
    filters_state(platform)
}

/// `PUT /api/audience/filters/{index}` — set a filter value.
pub fn put_filter(platform: &mut Platform, index: &str, body: &str) -> Result<JsonResponse> {
    let index = parse_index(index)?;
    let req: FilterValueRequest = parse_body(body)?;
    platform.set_audience_filter(index, &req.value)?;
    filters_state(platform)
}

/// `DELETE /api/audience/filters/{index}` — remove a filter.
pub fn delete_filter(platform: &mut Platform, index: &str) -> Result<JsonResponse> {
    let index = parse_index(index)?;
    platform.remove_audience_filter(index)?;
    filters_state(platform)
}

/// `POST /api/audience` — save the current filters as an audience.
pub fn post_audience(platform: &mut Platform) -> Result<JsonResponse> {
    let audience = platform.create_audience();
    json_response(&AudienceResponse { audience })
}

/// `POST /api/uploads` — simulate uploading `{ "files": [...] }`.
pub fn post_uploads(platform: &mut Platform, body: &str) -> Result<JsonResponse> {
    let req: UploadRequest = parse_body(body)?;
    let outcomes = platform.upload(req.files)?;
    json_response(&serde_json::json!({ "uploads": outcomes }))
}

/// `POST /api/creatives` — generate a creative from a prompt.
pub fn post_creative(platform: &mut Platform, body: &str) -> Result<JsonResponse> {
    let req: CreativeRequest = parse_body(body)?;
    let creative = platform.generate_creative(req)?;
    json_response(&serde_json::json!({
        "creative": creative,
        "title": creative.title(),
        "excerpt": creative.excerpt(),
    }))
}

/// `POST /api/export` — generate the performance report.
pub fn post_export(platform: &mut Platform) -> Result<JsonResponse> {
    let report = platform.export_report()?;
    json_response(&report)
}

/// `GET /api/theme` — effective theme.
pub fn get_theme(platform: &mut Platform) -> Result<JsonResponse> {
    json_response(&ThemeResponse {
        theme: platform.theme(),
    })
}

/// `POST /api/theme` — set `{ "theme": "light" | "dark" }`.
pub fn post_theme(platform: &mut Platform, body: &str) -> Result<JsonResponse> {
    let req: ThemeRequest = parse_body(body)?;
    let theme = Theme::parse(&req.theme).ok_or_else(|| {
        DashboardError::missing_input("Invalid Theme", &format!("unknown theme '{}'", req.theme))
    })?;
    let theme = platform.set_theme(theme)?;
    json_response(&ThemeResponse { theme })
}

/// `POST /api/theme/toggle` — flip between light and dark.
pub fn post_theme_toggle(platform: &mut Platform) -> Result<JsonResponse> {
    let theme = platform.toggle_theme()?;
    json_response(&ThemeResponse { theme })
}

/// `GET /api/toasts` — drain pending notifications.
pub fn get_toasts(platform: &mut Platform) -> Result<JsonResponse> {
    json_response(&ToastsResponse {
        toasts: platform.drain_toasts(),
    })
}

/// `GET /api/health` — server summary.
pub fn get_health(platform: &mut Platform) -> Result<JsonResponse> {
    let store = platform.store();
    let config_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);

    let resp = HealthResponse {
        version: env!("CARGO_PKG_VERSION"),
        analyzer: platform.analyzer().name().to_string(),
        section: platform.current_section().to_string(),
        campaigns: store.campaigns().len(),
        assets: store.assets().len(),
        audiences: store.audiences().len(),
        creatives: store.creatives().len(),
        config_exists,
        log_path: platform.log().path().map(|p| p.display().to_string()),
    };

    json_response(&resp)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
