//! Simulated file uploads.
//!
//! No bytes move anywhere. A file is reduced to its name, size and MIME
//! type, progress advances in random ticks until it reaches 100, and the
//! finished upload becomes an [`Asset`].

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::store::Asset;
use crate::tasks::{CancelToken, SimulatedDelay};

/// Increment used when the configured one is not a positive number.
const FALLBACK_MAX_INCREMENT: f64 = 15.0;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type", default)]
    pub mime_type: String,
}

impl FileDescriptor {
    pub fn new(name: &str, size: u64, mime_type: &str) -> Self {
        Self {
            name: name.to_string(),
            size,
            mime_type: mime_type.to_string(),
        }
    }

    /// Describe a file on disk. The MIME type comes from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("failed to read metadata for {}", path.display()))?;
        if !meta.is_file() {
            anyhow::bail!("{} is not a regular file", path.display());
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = guess_mime(&name);
        Ok(Self {
            name,
            size: meta.len(),
            mime_type: mime_type.to_string(),
        })
    }
}

/// MIME type for a file name, by extension.
pub fn guess_mime(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mp3" => "audio/mpeg",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

/// `0 Bytes`, `512 KB`, `1.5 MB`, ... with at most two decimals.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exp = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exp = exp.min(SIZE_UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", SIZE_UNITS[exp])
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct UploadProgress {
    file: FileDescriptor,
    progress: f64,
    max_increment: f64,
}

impl UploadProgress {
    pub fn new(file: FileDescriptor, max_increment: f64) -> Self {
        let max_increment = if max_increment.is_finite() && max_increment > 0.0 {
            max_increment
        } else {
            FALLBACK_MAX_INCREMENT
        };
        Self {
            file,
            progress: 0.0,
            max_increment,
        }
    }

    pub fn file(&self) -> &FileDescriptor {
        &self.file
    }

    /// Whole percent shown next to the bar.
    pub fn percent(&self) -> u32 {
        self.progress.floor() as u32
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 100.0
    }

    /// Advance by a random amount in `[0, max_increment)`, clamped to 100.
    /// Returns the new percent.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u32 {
        if !self.is_complete() {
            self.progress = (self.progress + rng.gen_range(0.0..self.max_increment)).min(100.0);
        }
        self.percent()
    }

    pub fn into_asset(self, id: u64) -> Asset {
        Asset {
            id,
            name: self.file.name,
            size: self.file.size,
            mime_type: self.file.mime_type,
            uploaded_at: Utc::now(),
        }
    }
}

/// A finished upload: the percent after every tick, ending at 100.
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub asset: Asset,
    pub ticks: Vec<u32>,
}

/// Drive one upload to completion, waiting `tick` between steps.
pub fn run_to_completion<R: Rng + ?Sized>(
    progress: &mut UploadProgress,
    rng: &mut R,
    tick: &SimulatedDelay,
    token: &CancelToken,
) -> Result<Vec<u32>, DashboardError> {
    let mut ticks = Vec::new();
    while !progress.is_complete() {
        tick.wait(token)?;
        ticks.push(progress.tick(rng));
    }
    Ok(ticks)
}
