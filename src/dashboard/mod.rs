//! Dashboard content: headline KPIs, recent activity, the real-time pulse
//! and the analytics cohort heatmap.

use rand::Rng;
use serde::Serialize;

use crate::audience::format_count;

/// Chance that a single KPI tile is highlighted on a pulse.
pub const PULSE_PROBABILITY: f64 = 0.3;

pub const COHORT_SIZE: usize = 10;

// ---------------------------------------------------------------------------
// KPIs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiId {
    TotalRevenue,
    ActiveCampaigns,
    AvgCtr,
    Roas,
}

impl KpiId {
    pub const ALL: [Self; 4] = [
        Self::TotalRevenue,
        Self::ActiveCampaigns,
        Self::AvgCtr,
        Self::Roas,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::TotalRevenue => "Total Revenue",
            Self::ActiveCampaigns => "Active Campaigns",
            Self::AvgCtr => "Avg. CTR",
            Self::Roas => "ROAS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    pub id: KpiId,
    pub label: &'static str,
    pub value: f64,
    pub display: String,
    pub change: &'static str,
}

fn kpi(id: KpiId, value: f64, change: &'static str) -> Kpi {
    Kpi {
        id,
        label: id.label(),
        value,
        display: format_kpi(id, value),
        change,
    }
}

/// Format a KPI value the way its tile shows it.
pub fn format_kpi(id: KpiId, value: f64) -> String {
    match id {
        KpiId::TotalRevenue => format!("${}", format_count(value.max(0.0) as u64)),
        KpiId::ActiveCampaigns => format!("{}", value as i64),
        KpiId::AvgCtr => format!("{value:.2}%"),
        KpiId::Roas => format!("{value:.1}x"),
    }
}

pub fn kpis() -> Vec<Kpi> {
    vec![
        kpi(KpiId::TotalRevenue, 284_750.0, "+12.5%"),
        kpi(KpiId::ActiveCampaigns, 12.0, "+3"),
        kpi(KpiId::AvgCtr, 3.24, "+0.8%"),
        kpi(KpiId::Roas, 4.2, "+15%"),
    ]
}

// ---------------------------------------------------------------------------
// Recent activity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityItem {
    pub icon: &'static str,
    pub title: &'static str,
    pub time: &'static str,
}

const RECENT_ACTIVITY: [ActivityItem; 5] = [
    ActivityItem {
        icon: "🚀",
        title: "Campaign \"Summer Sale\" launched",
        time: "2 minutes ago",
    },
    ActivityItem {
        icon: "📊",
        title: "Monthly report generated",
        time: "15 minutes ago",
    },
    ActivityItem {
        icon: "🎯",
        title: "New audience segment created",
        time: "1 hour ago",
    },
    ActivityItem {
        icon: "💡",
        title: "AI optimization applied to \"Brand Awareness\"",
        time: "2 hours ago",
    },
    ActivityItem {
        icon: "📈",
        title: "Conversion rate increased by 12%",
        time: "4 hours ago",
    },
];

pub fn recent_activity() -> Vec<ActivityItem> {
    RECENT_ACTIVITY.to_vec()
}

// ---------------------------------------------------------------------------
// Pulse and heatmap
// ---------------------------------------------------------------------------

/// KPI tiles to highlight on this tick. Each is picked independently.
pub fn pulse<R: Rng + ?Sized>(rng: &mut R) -> Vec<KpiId> {
    KpiId::ALL
        .into_iter()
        .filter(|_| rng.gen_bool(PULSE_PROBABILITY))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CohortCell {
    pub value: f64,
    pub label: u32,
    pub opacity: f64,
}

impl CohortCell {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            label: value.floor() as u32,
            opacity: value / 100.0,
        }
    }
}

/// Random 10×10 retention grid, row-major.
pub fn cohort_heatmap<R: Rng + ?Sized>(rng: &mut R) -> Vec<Vec<CohortCell>> {
    (0..COHORT_SIZE)
        .map(|_| {
            (0..COHORT_SIZE)
                .map(|_| CohortCell::new(rng.gen_range(0.0..100.0)))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn kpi_display_formats() {
        let displays: Vec<String> = kpis().into_iter().map(|k| k.display).collect();
        assert_eq!(displays, vec!["$284,750", "12", "3.24%", "4.2x"]);
    }

    #[test]
    fn change_indicators() {
        let changes: Vec<&str> = kpis().iter().map(|k| k.change).collect();
        assert_eq!(changes, vec!["+12.5%", "+3", "+0.8%", "+15%"]);
    }

    #[test]
    fn recent_activity_is_fixed() {
        let items = recent_activity();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].icon, "🚀");
        assert_eq!(items[4].time, "4 hours ago");
    }

    #[test]
    fn pulse_picks_roughly_thirty_percent() {
        let mut rng = SmallRng::seed_from_u64(11);
        let picked: usize = (0..1000).map(|_| pulse(&mut rng).len()).sum();
        let rate = picked as f64 / 4000.0;
        assert!((0.25..0.35).contains(&rate), "rate {rate}");
    }

    #[test]
    fn heatmap_cells_are_in_range() {
        let mut rng = SmallRng::seed_from_u64(12);
        let grid = cohort_heatmap(&mut rng);
        assert_eq!(grid.len(), 10);
        for row in &grid {
            assert_eq!(row.len(), 10);
            for cell in row {
                assert!((0.0..100.0).contains(&cell.value));
                assert!(cell.label < 100);
                assert!((0.0..1.0).contains(&cell.opacity));
            }
        }
    }
}
