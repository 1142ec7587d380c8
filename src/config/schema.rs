/// Configuration schema and defaults for adpilot.
///
/// Defines the TOML-serializable configuration structure with all sections:
/// `[general]`, `[server]`, `[analysis]`, `[simulation]`, `[store]` and
/// `[logging]`.
///
/// Every field has a built-in default. Users only need to set the values
/// they want to override.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level adpilot configuration.
///
/// Maps directly to the `~/.adpilot/config.toml` and `.adpilot.toml` file
/// schemas. All sections and fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdpilotConfig {
    pub general: GeneralConfig,
    pub server: ServerConfig,
    pub analysis: AnalysisConfig,
    pub simulation: SimulationConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [general]
// ---------------------------------------------------------------------------

/// Default theme used when no preference has been saved yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeSetting {
    Light,
    Dark,
    /// Follow the operating environment.
    #[default]
    System,
}

impl std::fmt::Display for ThemeSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
            Self::System => write!(f, "system"),
        }
    }
}

/// How simulated work is paced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pace {
    /// Use the configured simulation delays.
    #[default]
    Realistic,
    /// Every simulated delay is zero.
    Instant,
}

impl std::fmt::Display for Pace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Realistic => write!(f, "realistic"),
            Self::Instant => write!(f, "instant"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Theme used until the user toggles one: `light`, `dark`, `system`.
    pub theme: ThemeSetting,
    /// `realistic` or `instant`.
    pub pace: Pace,
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for `adpilot web`.
    pub addr: String,
    /// Open the dashboard in the default browser on start.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9747".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [analysis]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Text shorter than this (in characters) is not analyzed.
    pub min_text_length: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { min_text_length: 10 }
    }
}

// ---------------------------------------------------------------------------
// [simulation]
// ---------------------------------------------------------------------------

/// Durations of the simulated work. All values in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub analysis_delay_ms: u64,
    pub deploy_delay_ms: u64,
    pub creative_delay_ms: u64,
    pub export_delay_ms: u64,
    /// Interval between two upload progress ticks.
    pub upload_tick_ms: u64,
    /// Upper bound (exclusive) of the random per-tick upload increment, in percent.
    pub upload_max_increment: f64,
    /// Interval of the real-time metrics pulse on the dashboard.
    pub metrics_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            analysis_delay_ms: 800,
            deploy_delay_ms: 2000,
            creative_delay_ms: 3000,
            export_delay_ms: 2000,
            upload_tick_ms: 200,
            upload_max_increment: 15.0,
            metrics_interval_ms: 5000,
        }
    }
}

// ---------------------------------------------------------------------------
// [store]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Seed the in-memory store with the sample campaigns and assets.
    pub seed_sample_data: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether the activity log is written.
    pub enabled: bool,
    /// Path to the activity log file. `~` is expanded to the home directory.
    pub path: String,
    /// Minimum level written: `"debug"`, `"info"`, `"warn"`, `"error"`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.adpilot/activity.jsonl".to_string(),
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pace application
// ---------------------------------------------------------------------------

impl AdpilotConfig {
    /// Apply the `general.pace` preset. `instant` zeroes every delay.
    pub fn apply_pace(&mut self) {
        match self.general.pace {
            Pace::Realistic => {}
            Pace::Instant => {
                let sim = &mut self.simulation;
                sim.analysis_delay_ms = 0;
                sim.deploy_delay_ms = 0;
                sim.creative_delay_ms = 0;
                sim.export_delay_ms = 0;
                sim.upload_tick_ms = 0;
            }
        }
    }

    /// Generate the annotated default TOML config file content.
    pub fn default_toml() -> String {
        r#"# adpilot configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (ADPILOT_*)
#   2. Project config (.adpilot.toml in current directory)
#   3. User global config (~/.adpilot/config.toml)
#   4. Built-in defaults

[general]
theme = "system"        # light | dark | system
pace = "realistic"      # realistic | instant (no simulated delays)

[server]
addr = "127.0.0.1:9747"
open_browser = true

[analysis]
min_text_length = 10    # shorter descriptions are not analyzed

[simulation]
analysis_delay_ms = 800
deploy_delay_ms = 2000
creative_delay_ms = 3000
export_delay_ms = 2000
upload_tick_ms = 200
upload_max_increment = 15.0
metrics_interval_ms = 5000

[store]
seed_sample_data = true

[logging]
enabled = true
path = "~/.adpilot/activity.jsonl"
level = "info"          # debug | info | warn | error
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
