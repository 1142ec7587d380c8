//! Chart specifications and the surface registry.
//!
//! Drawing happens in the browser through the charting library; this module
//! only describes charts (kind, labels, named series, colors) and keeps
//! track of which chart is bound to which surface so a surface is always
//! released before it is reused.

pub mod presets;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::{Value, json};

use crate::activity::{ActivityLog, EventKind};
use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Doughnut,
}

/// Fill/stroke colors of a series. Doughnut and bar series may carry one
/// color per point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesColor {
    Single(String),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<SeriesColor>,
    pub fill: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
}

impl Series {
    pub fn new(label: &str, data: &[f64]) -> Self {
        Self {
            label: label.to_string(),
            data: data.to_vec(),
            border_color: None,
            background_color: None,
            fill: false,
            tension: None,
            border_radius: None,
        }
    }

    pub fn stroke(mut self, color: &str) -> Self {
        self.border_color = Some(color.to_string());
        self
    }

    pub fn background(mut self, color: &str) -> Self {
        self.background_color = Some(SeriesColor::Single(color.to_string()));
        self
    }

    pub fn point_colors(mut self, colors: &[&str]) -> Self {
        self.background_color = Some(SeriesColor::PerPoint(
            colors.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }

    pub fn filled(mut self) -> Self {
        self.fill = true;
        self
    }

    pub fn tension(mut self, tension: f64) -> Self {
        self.tension = Some(tension);
        self
    }

    pub fn rounded(mut self, radius: u32) -> Self {
        self.border_radius = Some(radius);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    /// Draw bars horizontally.
    pub horizontal: bool,
    pub show_legend: bool,
    pub legend_position: String,
    pub begin_at_zero: bool,
    pub grid_color: Option<String>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            horizontal: false,
            show_legend: true,
            legend_position: "top".to_string(),
            begin_at_zero: false,
            grid_color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    pub options: ChartOptions,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, labels: &[&str]) -> Self {
        Self {
            kind,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            series: Vec::new(),
            options: ChartOptions::default(),
        }
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    /// Check the spec can be drawn: at least one series, and every series
    /// has exactly one point per label.
    pub fn validate(&self) -> Result<(), String> {
        if self.series.is_empty() {
            return Err("chart has no data series".to_string());
        }
        for series in &self.series {
            if series.data.len() != self.labels.len() {
                return Err(format!(
                    "series '{}' has {} points for {} labels",
                    series.label,
                    series.data.len(),
                    self.labels.len()
                ));
            }
        }
        Ok(())
    }

    /// Render the charting library's configuration object.
    pub fn to_library_config(&self) -> Value {
        let datasets: Vec<Value> = self
            .series
            .iter()
            .map(|s| {
                let mut ds = json!({ "label": s.label, "data": s.data, "fill": s.fill });
                if let Some(c) = &s.border_color {
                    ds["borderColor"] = json!(c);
                }
                if let Some(c) = &s.background_color {
                    ds["backgroundColor"] = json!(c);
                }
                if let Some(t) = s.tension {
                    ds["tension"] = json!(t);
                }
                if let Some(r) = s.border_radius {
                    ds["borderRadius"] = json!(r);
                }
                ds
            })
            .collect();

        let mut options = json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": {
                    "display": self.options.show_legend,
                    "position": self.options.legend_position,
                }
            }
        });

        if self.options.horizontal {
            options["indexAxis"] = json!("y");
        }

        if self.kind != ChartKind::Doughnut {
            let grid = self
                .options
                .grid_color
                .as_ref()
                .map(|c| json!({ "color": c }))
                .unwrap_or_else(|| json!({}));
            let (value_axis, category_axis) = if self.options.horizontal {
                ("x", "y")
            } else {
                ("y", "x")
            };
            options["scales"] = json!({
                value_axis: { "beginAtZero": self.options.begin_at_zero, "grid": grid },
                category_axis: { "grid": grid },
            });
        }

        json!({
            "type": self.kind,
            "data": { "labels": self.labels, "datasets": datasets },
            "options": options,
        })
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Outcome of binding a chart to a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// Bound to a surface that held nothing.
    Created,
    /// Bound after releasing the chart previously on the surface.
    Replaced(ChartSpec),
}

/// Tracks the chart bound to each known drawing surface.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    surfaces: BTreeSet<String>,
    bound: BTreeMap<String, ChartSpec>,
    released: usize,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the dashboard's standard surfaces.
    pub fn with_dashboard_surfaces() -> Self {
        let mut registry = Self::new();
        for surface in presets::SURFACES {
            registry.add_surface(surface);
        }
        registry
    }

    pub fn add_surface(&mut self, surface: &str) {
        self.surfaces.insert(surface.to_string());
    }

    pub fn has_surface(&self, surface: &str) -> bool {
        self.surfaces.contains(surface)
    }

    pub fn get(&self, surface: &str) -> Option<&ChartSpec> {
        self.bound.get(surface)
    }

    /// How many charts have been released to make room for a new one.
    pub fn released_count(&self) -> usize {
        self.released
    }

    /// Bind `spec` to `surface`, releasing whatever was there.
    ///
    /// A missing surface or an invalid spec leaves the registry untouched.
    pub fn bind(&mut self, surface: &str, spec: ChartSpec) -> Result<Binding, DashboardError> {
        if !self.has_surface(surface) {
            return Err(DashboardError::SurfaceMissing(surface.to_string()));
        }
        spec.validate()
            .map_err(|reason| DashboardError::ChartConstruction {
                surface: surface.to_string(),
                reason,
            })?;

        match self.bound.insert(surface.to_string(), spec) {
            Some(previous) => {
                self.released += 1;
                Ok(Binding::Replaced(previous))
            }
            None => Ok(Binding::Created),
        }
    }

    /// Bind and log instead of failing: the rendering-layer contract, where
    /// a missing surface or a broken chart must never take the page down.
    /// Returns whether the chart is now bound.
    pub fn bind_or_log(&mut self, surface: &str, spec: ChartSpec, log: &ActivityLog) -> bool {
        match self.bind(surface, spec) {
            Ok(_) => true,
            Err(err @ DashboardError::SurfaceMissing(_)) => {
                log.warn(EventKind::Chart, err.to_string());
                false
            }
            Err(err) => {
                log.error(EventKind::Chart, err.to_string());
                false
            }
        }
    }
}
