//! The dashboard's fixed charts.

use super::{ChartKind, ChartOptions, ChartSpec, Series};

pub const PERFORMANCE: &str = "performanceChart";
pub const FUNNEL: &str = "funnelChart";
pub const TRENDS: &str = "trendsChart";
pub const ATTRIBUTION: &str = "attributionChart";

pub const SURFACES: [&str; 4] = [PERFORMANCE, FUNNEL, TRENDS, ATTRIBUTION];

const TEAL: &str = "#1FB8CD";
const PEACH: &str = "#FFC185";
const BRICK: &str = "#B4413C";
const SLATE: &str = "#5D878F";
const CREAM: &str = "#ECEBD5";
const GRID: &str = "rgba(167, 169, 169, 0.1)";

/// Monthly revenue and conversions.
pub fn performance() -> ChartSpec {
    ChartSpec::new(
        ChartKind::Line,
        &["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"],
    )
    .with_series(
        Series::new(
            "Revenue",
            &[12000.0, 19000.0, 15000.0, 25000.0, 22000.0, 30000.0, 28000.0],
        )
        .stroke(TEAL)
        .background("rgba(31, 184, 205, 0.1)")
        .filled()
        .tension(0.4),
    )
    .with_series(
        Series::new(
            "Conversions",
            &[300.0, 450.0, 320.0, 580.0, 520.0, 680.0, 650.0],
        )
        .stroke(PEACH)
        .background("rgba(255, 193, 133, 0.1)")
        .filled()
        .tension(0.4),
    )
    .with_options(ChartOptions {
        begin_at_zero: true,
        grid_color: Some(GRID.to_string()),
        ..ChartOptions::default()
    })
}

/// Impressions → conversions funnel, drawn as horizontal bars.
pub fn funnel() -> ChartSpec {
    ChartSpec::new(
        ChartKind::Bar,
        &["Impressions", "Clicks", "Leads", "Conversions"],
    )
    .with_series(
        Series::new("Funnel Metrics", &[100000.0, 8500.0, 2400.0, 680.0])
            .point_colors(&[TEAL, PEACH, BRICK, SLATE])
            .rounded(8),
    )
    .with_options(ChartOptions {
        horizontal: true,
        show_legend: false,
        begin_at_zero: true,
        grid_color: Some(GRID.to_string()),
        ..ChartOptions::default()
    })
}

/// Weekly CTR and ROAS.
pub fn trends() -> ChartSpec {
    ChartSpec::new(ChartKind::Line, &["Week 1", "Week 2", "Week 3", "Week 4"])
        .with_series(Series::new("CTR", &[2.1, 2.8, 3.2, 3.5]).stroke(TEAL).tension(0.4))
        .with_series(Series::new("ROAS", &[3.2, 3.8, 4.1, 4.5]).stroke(PEACH).tension(0.4))
}

/// Revenue share per channel.
pub fn attribution() -> ChartSpec {
    ChartSpec::new(
        ChartKind::Doughnut,
        &["Direct", "Social Media", "Search", "Email", "Referral"],
    )
    .with_series(
        Series::new("Attribution", &[30.0, 25.0, 20.0, 15.0, 10.0])
            .point_colors(&[TEAL, PEACH, BRICK, CREAM, SLATE]),
    )
}
