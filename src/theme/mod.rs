//! Light/dark theme preference.
//!
//! The chosen theme is stored under the `theme` key of
//! `~/.adpilot/preferences.json`. Other keys in that file are preserved.
//! Until the user picks a theme the configured default applies.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::schema::ThemeSetting;

const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn parse(val: &str) -> Option<Self> {
        match val.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

// ---------------------------------------------------------------------------
// System theme detection
// ---------------------------------------------------------------------------

/// Resolve the environment's preferred theme.
///
/// `ADPILOT_COLOR_SCHEME` wins; otherwise the background index of the
/// terminal's `COLORFGBG` (`fg;bg`) decides. Falls back to light.
pub fn system_theme() -> Theme {
    detect_theme(
        std::env::var("ADPILOT_COLOR_SCHEME").ok().as_deref(),
        std::env::var("COLORFGBG").ok().as_deref(),
    )
}

pub fn detect_theme(color_scheme: Option<&str>, colorfgbg: Option<&str>) -> Theme {
    if let Some(theme) = color_scheme.and_then(Theme::parse) {
        return theme;
    }
    if let Some(bg) = colorfgbg
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
    {
        // ANSI palette: 0-6 and 8 are dark backgrounds.
        return if bg <= 6 || bg == 8 {
            Theme::Dark
        } else {
            Theme::Light
        };
    }
    Theme::Light
}

pub fn resolve_setting(setting: ThemeSetting) -> Theme {
    match setting {
        ThemeSetting::Light => Theme::Light,
        ThemeSetting::Dark => Theme::Dark,
        ThemeSetting::System => system_theme(),
    }
}

// ---------------------------------------------------------------------------
// Preference file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: Option<PathBuf>,
}

impl ThemeStore {
    /// `preferences.json` in the data directory.
    pub fn default_location() -> Self {
        Self {
            path: crate::config::data_dir().map(|dir| dir.join("preferences.json")),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The saved theme, if any. An unreadable or malformed file counts as
    /// no preference.
    pub fn saved(&self) -> Option<Theme> {
        let prefs = self.read_prefs().ok()?;
        prefs.get(THEME_KEY)?.as_str().and_then(Theme::parse)
    }

    /// Saved theme, or the resolved default.
    pub fn current(&self, default: ThemeSetting) -> Theme {
        self.saved().unwrap_or_else(|| resolve_setting(default))
    }

    pub fn save(&self, theme: Theme) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .context("could not determine preferences location")?;
        let mut prefs = self.read_prefs().unwrap_or_default();
        prefs.insert(THEME_KEY.to_string(), Value::String(theme.to_string()));

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&Value::Object(prefs))?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Flip the current theme and persist it.
    pub fn toggle(&self, default: ThemeSetting) -> Result<Theme> {
        let next = self.current(default).toggled();
        self.save(next)?;
        Ok(next)
    }

    fn read_prefs(&self) -> Result<Map<String, Value>> {
        let path = self.path.as_ref().context("no preferences path")?;
        let content = fs::read_to_string(path)?;
        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            _ => anyhow::bail!("{} is not a JSON object", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_prefers_explicit_scheme() {
        assert_eq!(detect_theme(Some("dark"), Some("0;15")), Theme::Dark);
        assert_eq!(detect_theme(Some("LIGHT"), Some("15;0")), Theme::Light);
    }

    #[test]
    fn detection_reads_colorfgbg_background() {
        assert_eq!(detect_theme(None, Some("15;0")), Theme::Dark);
        assert_eq!(detect_theme(None, Some("0;15")), Theme::Light);
        assert_eq!(detect_theme(None, Some("12;default;8")), Theme::Dark);
        assert_eq!(detect_theme(Some("purple"), Some("junk")), Theme::Light);
        assert_eq!(detect_theme(None, None), Theme::Light);
    }

    #[test]
    fn toggle_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::at(dir.path().join("preferences.json"));

        assert_eq!(store.saved(), None);
        assert_eq!(store.current(ThemeSetting::Light), Theme::Light);

        assert_eq!(store.toggle(ThemeSetting::Light).unwrap(), Theme::Dark);
        assert_eq!(store.saved(), Some(Theme::Dark));
        assert_eq!(store.toggle(ThemeSetting::Light).unwrap(), Theme::Light);
        assert_eq!(store.saved(), Some(Theme::Light));
    }

    #[test]
    fn save_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"sidebar":"collapsed"}"#).unwrap();

        let store = ThemeStore::at(&path);
        store.save(Theme::Dark).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["sidebar"], "collapsed");
        assert_eq!(written["theme"], "dark");
    }

    #[test]
    fn malformed_file_means_no_preference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "not json").unwrap();

        let store = ThemeStore::at(&path);
        assert_eq!(store.saved(), None);
        assert_eq!(store.current(ThemeSetting::Dark), Theme::Dark);
        store.save(Theme::Light).unwrap();
        assert_eq!(store.saved(), Some(Theme::Light));
    }
}
