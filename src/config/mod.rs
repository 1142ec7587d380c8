/// Configuration system for adpilot.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults** — hardcoded in [`schema::AdpilotConfig::default()`]
/// 2. **User global config** — `~/.adpilot/config.toml`
/// 3. **Project local config** — `.adpilot.toml` in the current working directory
/// 4. **Environment variables** — `ADPILOT_*` overrides (highest precedence)
///
/// Later layers override earlier ones at the key level: a file that only sets
/// `[simulation] deploy_delay_ms` leaves every other value untouched.
///
/// After merging, the `general.pace` preset is applied.
///
/// The data directory (`~/.adpilot`) can be relocated with `ADPILOT_HOME`.
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::AdpilotConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
pub fn load() -> AdpilotConfig {
    load_layers(global_config_path(), project_config_path())
}

/// Load configuration from explicit file layers, then apply env overrides
/// and the pace preset.
pub fn load_layers(global: Option<PathBuf>, project: Option<PathBuf>) -> AdpilotConfig {
    let mut merged = defaults_as_value();

    for path in [global, project].into_iter().flatten() {
        if let Some(layer) = read_toml_value(&path) {
            let mut candidate = merged.clone();
            merge_values(&mut candidate, layer);
            // A layer with a wrong-typed value is skipped whole.
            if candidate.clone().try_into::<AdpilotConfig>().is_ok() {
                merged = candidate;
            }
        }
    }

    let mut config: AdpilotConfig = merged.try_into().unwrap_or_default();

    apply_env_overrides(&mut config);
    config.apply_pace();
    config
}

/// Read a TOML file as a value tree. Missing or malformed files are ignored.
fn read_toml_value(path: &Path) -> Option<toml::Value> {
    let content = fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

fn defaults_as_value() -> toml::Value {
    toml::Value::try_from(AdpilotConfig::default())
        .unwrap_or_else(|_| toml::Value::Table(toml::map::Map::new()))
}

/// Recursively merge `overlay` into `base`. Tables merge key by key; any
/// other value replaces the base value.
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// The adpilot data directory: `$ADPILOT_HOME` or `~/.adpilot`.
pub fn data_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("ADPILOT_HOME")
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::home_dir().map(|home| home.join(".adpilot"))
}

/// Expand a leading `~/` to the home directory.
pub fn expand_tilde(path: &str) -> Option<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None => Some(PathBuf::from(path)),
    }
}

fn global_config_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("config.toml"))
}

fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".adpilot.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `ADPILOT_THEME` — `light`, `dark`, `system`
/// - `ADPILOT_PACE` — `realistic`, `instant`
/// - `ADPILOT_ADDR` — dashboard bind address
/// - `ADPILOT_LOGGING` — activity log on/off
/// - `ADPILOT_LOG_LEVEL` — `debug`, `info`, `warn`, `error`
/// - `ADPILOT_SEED_SAMPLE_DATA` — seed sample campaigns and assets
fn apply_env_overrides(config: &mut AdpilotConfig) {
    if let Ok(val) = std::env::var("ADPILOT_THEME")
        && let Some(theme) = parse_theme_setting(&val)
    {
        config.general.theme = theme;
    }
    if let Ok(val) = std::env::var("ADPILOT_PACE")
        && let Some(pace) = parse_pace(&val)
    {
        config.general.pace = pace;
    }
    if let Ok(val) = std::env::var("ADPILOT_ADDR")
        && !val.is_empty()
    {
        config.server.addr = val;
    }
    if let Ok(val) = std::env::var("ADPILOT_LOGGING") {
        config.logging.enabled = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("ADPILOT_LOG_LEVEL")
        && !val.is_empty()
    {
        config.logging.level = val.to_ascii_lowercase();
    }
    if let Ok(val) = std::env::var("ADPILOT_SEED_SAMPLE_DATA") {
        config.store.seed_sample_data = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
pub(crate) fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

pub fn parse_theme_setting(val: &str) -> Option<schema::ThemeSetting> {
    match val.to_ascii_lowercase().as_str() {
        "light" => Some(schema::ThemeSetting::Light),
        "dark" => Some(schema::ThemeSetting::Dark),
        "system" | "auto" => Some(schema::ThemeSetting::System),
        _ => None,
    }
}

pub fn parse_pace(val: &str) -> Option<schema::Pace> {
    match val.to_ascii_lowercase().as_str() {
        "realistic" => Some(schema::Pace::Realistic),
        "instant" => Some(schema::Pace::Instant),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.adpilot/config.toml`.
///
/// Returns an error if the file already exists (use `force = true` to
/// overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;
    init_config_at(&path, force)?;
    Ok(path)
}

fn init_config_at(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }

    fs::write(path, AdpilotConfig::default_toml()).context("failed to write config file")
}

/// Set a single config key in the global config file.
///
/// Supports dotted keys like `simulation.deploy_delay_ms`. When the file
/// does not exist yet it is created from the defaults first.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;
    set_config_value_at(&path, key, value)
}

fn set_config_value_at(path: &Path, key: &str, value: &str) -> Result<()> {
    let content = if path.exists() {
        fs::read_to_string(path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&AdpilotConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value =
        toml::from_str(&content).context("failed to parse config as TOML value")?;
    set_toml_value(&mut root, key, value)?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(path, output).context("failed to write config file")
}

/// Set a value in a TOML value tree using a dotted key path.
///
/// The new value is parsed according to the type of the existing value.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let Some((section_path, leaf)) = key.rsplit_once('.') else {
        anyhow::bail!("config key must be dotted (section.key), got '{key}'");
    };

    let mut current = root;
    for part in section_path.split('.') {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table at '{section_path}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::Float(_)) => {
            let f: f64 = raw_value
                .parse()
                .with_context(|| format!("expected float for '{key}', got '{raw_value}'"))?;
            toml::Value::Float(f)
        }
        Some(_) => toml::Value::String(raw_value.to_string()),
        None => anyhow::bail!("unknown config key '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
