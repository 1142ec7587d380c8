//! Activity log: one JSON line per domain event.
//!
//! Every navigation, analysis, deployment, upload, audience, creative,
//! export, theme and chart event is appended to `~/.adpilot/activity.jsonl`
//! (configurable via `[logging]`). Writes are best-effort: an unwritable log
//! never fails the operation that produced the event.

pub mod reader;

use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::schema::LoggingConfig;

// ---------------------------------------------------------------------------
// Levels and event kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn parse(val: &str) -> Option<Self> {
        match val.to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// What part of the dashboard produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Navigation,
    Analysis,
    Wizard,
    Deploy,
    Upload,
    Audience,
    Creative,
    Export,
    Theme,
    Chart,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Navigation => "navigation",
            Self::Analysis => "analysis",
            Self::Wizard => "wizard",
            Self::Deploy => "deploy",
            Self::Upload => "upload",
            Self::Audience => "audience",
            Self::Creative => "creative",
            Self::Export => "export",
            Self::Theme => "theme",
            Self::Chart => "chart",
        };
        write!(f, "{name}")
    }
}

/// A single line of the activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: String,
    pub level: Level,
    pub kind: EventKind,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Logger
// ---------------------------------------------------------------------------

/// Append-only activity logger.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: Option<PathBuf>,
    min_level: Level,
}

impl ActivityLog {
    /// Build a logger from the `[logging]` config section.
    pub fn from_config(config: &LoggingConfig) -> Self {
        let path = if config.enabled {
            crate::config::expand_tilde(&config.path)
        } else {
            None
        };
        Self {
            path,
            min_level: Level::parse(&config.level).unwrap_or(Level::Info),
        }
    }

    /// Logger writing to an explicit file.
    pub fn at_path(path: impl Into<PathBuf>, min_level: Level) -> Self {
        Self {
            path: Some(path.into()),
            min_level,
        }
    }

    /// Logger that drops everything.
    pub fn disabled() -> Self {
        Self {
            path: None,
            min_level: Level::Error,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn record(&self, level: Level, kind: EventKind, message: impl Into<String>) {
        if level < self.min_level {
            return;
        }
        let Some(path) = &self.path else {
            return;
        };
        let entry = ActivityEntry {
            timestamp: Utc::now().to_rfc3339(),
            level,
            kind,
            message: message.into(),
        };
        let _ = append_entry(path, &entry);
    }

    pub fn debug(&self, kind: EventKind, message: impl Into<String>) {
        self.record(Level::Debug, kind, message);
    }

    pub fn info(&self, kind: EventKind, message: impl Into<String>) {
        self.record(Level::Info, kind, message);
    }

    pub fn warn(&self, kind: EventKind, message: impl Into<String>) {
        self.record(Level::Warn, kind, message);
    }

    pub fn error(&self, kind: EventKind, message: impl Into<String>) {
        self.record(Level::Error, kind, message);
    }
}

fn append_entry(path: &Path, entry: &ActivityEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_below_min_level_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activity.jsonl");
        let log = ActivityLog::at_path(&path, Level::Info);

        log.debug(EventKind::Navigation, "hidden");
        log.info(EventKind::Navigation, "navigated to campaigns");
        log.warn(EventKind::Chart, "surface missing");

        let entries = reader::read_entries(&path);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "navigated to campaigns");
        assert_eq!(entries[1].level, Level::Warn);
        assert_eq!(entries[1].kind, EventKind::Chart);
    }

    #[test]
    fn disabled_log_writes_nothing() {
        let log = ActivityLog::disabled();
        log.error(EventKind::Deploy, "nothing");
        assert!(log.path().is_none());
    }

    #[test]
    fn from_config_respects_enabled_flag() {
        let config = LoggingConfig {
            enabled: false,
            ..LoggingConfig::default()
        };
        assert!(ActivityLog::from_config(&config).path().is_none());
    }

    #[test]
    fn level_ordering_and_parse() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Warn < Level::Error);
        assert_eq!(Level::parse("WARNING"), Some(Level::Warn));
        assert_eq!(Level::parse("trace"), None);
    }
}
