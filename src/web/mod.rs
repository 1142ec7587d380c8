//! Embedded web dashboard for adpilot.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - The single-page campaign dashboard
//! - A JSON API that drives the same [`Platform`] the CLI uses
//!
//! Launched via `adpilot web` (default: `http://127.0.0.1:9747`).

mod api;
mod frontend;

use std::io::Cursor;

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::error::DashboardError;
use crate::platform::Platform;

pub(crate) type JsonResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the dashboard server on the given address.
///
/// Blocks the current thread. Requests are handled one at a time against
/// the same platform, so simulated delays hold up the next request exactly
/// as long as the operation takes.
pub fn serve(platform: &mut Platform, addr: &str, open: bool) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("adpilot dashboard running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    if open {
        let url = format!("http://{addr}");
        let _ = open_browser(&url);
    }

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        // Read body up-front for methods that carry one
        let body = if matches!(method, Method::Put | Method::Post | Method::Patch) {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let resp = handle(platform, &method, &url, body.as_deref());
        let status = resp.status_code().0;
        let _ = request.respond(resp);

        // Brief access log
        println!(
            "{} {} {} {}",
            method,
            url,
            status,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

/// Route a request and turn handler errors into JSON error responses.
pub(crate) fn handle(
    platform: &mut Platform,
    method: &Method,
    url: &str,
    body: Option<&str>,
) -> JsonResponse {
    match dispatch(platform, method, url, body) {
        Ok(resp) => resp,
        Err(e) => error_response(status_for(&e), &e.to_string()),
    }
}

/// 400 for bad user input, 500 for everything else.
fn status_for(err: &anyhow::Error) -> u16 {
    match err.downcast_ref::<DashboardError>() {
        Some(e) if e.is_user_error() => 400,
        _ => 500,
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

fn dispatch(
    platform: &mut Platform,
    method: &Method,
    url: &str,
    body: Option<&str>,
) -> Result<JsonResponse> {
    // Strip query string for path matching
    let path = url.split('?').next().unwrap_or(url);
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let body = body.unwrap_or("{}");

    match (method, segments.as_slice()) {
        // Frontend
        (&Method::Get, [""]) | (&Method::Get, ["index.html"]) => Ok(serve_frontend()),

        // API — Navigation and dashboard
        (&Method::Get, ["api", "section", name]) => api::get_section(platform, name),
        (&Method::Get, ["api", "metrics", "pulse"]) => api::get_pulse(platform),

        // API — Analysis and estimation
        (&Method::Post, ["api", "analyze"]) => api::post_analyze(platform, body),
        (&Method::Get, ["api", "estimate"]) => api::get_estimate(url),

        // API — Wizard
        (&Method::Get, ["api", "wizard"]) => api::get_wizard(platform),
        (&Method::Put, ["api", "wizard", "form"]) => api::put_wizard_form(platform, body),
        (&Method::Post, ["api", "wizard", action]) => api::post_wizard_action(platform, action),

        // API — Audience
        (&Method::Get, ["api", "audience", "filters"]) => api::get_filters(platform),
        (&Method::Post, ["api", "audience", "filters"]) => api::post_filter(platform),
        (&Method::Put, ["api", "audience", "filters", index]) => {
            api::put_filter(platform, index, body)
        }
        (&Method::Delete, ["api", "audience", "filters", index]) => {
            api::delete_filter(platform, index)
        }
        (&Method::Post, ["api", "audience"]) => api::post_audience(platform),

        // API — Uploads, creatives, reports
        (&Method::Post, ["api", "uploads"]) => api::post_uploads(platform, body),
        (&Method::Post, ["api", "creatives"]) => api::post_creative(platform, body),
        (&Method::Post, ["api", "export"]) => api::post_export(platform),

        // API — Theme and notifications
        (&Method::Get, ["api", "theme"]) => api::get_theme(platform),
        (&Method::Post, ["api", "theme"]) => api::post_theme(platform, body),
        (&Method::Post, ["api", "theme", "toggle"]) => api::post_theme_toggle(platform),
        (&Method::Get, ["api", "toasts"]) => api::get_toasts(platform),

        // API — Health
        (&Method::Get, ["api", "health"]) => api::get_health(platform),

        // 404
        _ => Ok(not_found()),
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Serve the embedded single-page frontend.
fn serve_frontend() -> JsonResponse {
    let html = frontend::INDEX_HTML;
    Response::from_data(html.as_bytes().to_vec())
        .with_header(content_type_html())
        .with_status_code(StatusCode(200))
}

/// 404 response.
fn not_found() -> JsonResponse {
    error_response(404, "not found")
}

fn error_response(status: u16, message: &str) -> JsonResponse {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(status))
}

/// JSON content type header.
pub(crate) fn content_type_json() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap()
}

/// HTML content type header.
fn content_type_html() -> Header {
    Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap()
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}
