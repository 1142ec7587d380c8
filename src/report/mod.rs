//! Campaign performance report produced by "Export Report".

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::Campaign;

#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub id: u64,
    pub campaign: String,
    pub platform: String,
    pub objective: String,
    pub daily_budget: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    /// Clicks per impression, in percent.
    pub ctr: f64,
    /// Conversions per click, in percent.
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportTotals {
    pub campaigns: usize,
    pub daily_budget: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub ctr: f64,
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<ReportRow>,
    pub totals: ReportTotals,
}

/// `part / whole · 100`, or 0 when `whole` is 0.
pub fn rate(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

pub fn build(campaigns: &[Campaign]) -> Report {
    let rows: Vec<ReportRow> = campaigns
        .iter()
        .map(|c| {
            let p = &c.performance;
            ReportRow {
                id: c.id,
                campaign: c.name.clone(),
                platform: c.platform.to_string(),
                objective: c.objective.label().to_string(),
                daily_budget: c.daily_budget,
                impressions: p.impressions,
                clicks: p.clicks,
                conversions: p.conversions,
                ctr: rate(p.clicks, p.impressions),
                conversion_rate: rate(p.conversions, p.clicks),
            }
        })
        .collect();

    let mut totals = ReportTotals {
        campaigns: rows.len(),
        ..ReportTotals::default()
    };
    for row in &rows {
        totals.daily_budget += row.daily_budget;
        totals.impressions += row.impressions;
        totals.clicks += row.clicks;
        totals.conversions += row.conversions;
    }
    totals.ctr = rate(totals.clicks, totals.impressions);
    totals.conversion_rate = rate(totals.conversions, totals.clicks);

    Report {
        generated_at: Utc::now(),
        rows,
        totals,
    }
}

impl Report {
    /// CSV with a header row. Names are quoted when they contain a comma
    /// or a quote.
    pub fn to_csv(&self) -> String {
        let mut out = String::from(
            "id,campaign,platform,objective,daily_budget,impressions,clicks,conversions,ctr,conversion_rate\n",
        );
        for r in &self.rows {
            out.push_str(&format!(
                "{},{},{},{},{:.2},{},{},{},{:.2},{:.2}\n",
                r.id,
                csv_field(&r.campaign),
                csv_field(&r.platform),
                csv_field(&r.objective),
                r.daily_budget,
                r.impressions,
                r.clicks,
                r.conversions,
                r.ctr,
                r.conversion_rate
            ));
        }
        out
    }
}

pub(crate) fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{AdPlatform, CampaignStatus, Objective, Performance};

    fn campaign(name: &str, impressions: u64, clicks: u64, conversions: u64) -> Campaign {
        Campaign {
            id: 1,
            name: name.into(),
            platform: AdPlatform::GoogleAds,
            objective: Objective::Traffic,
            daily_budget: 50.0,
            status: CampaignStatus::Active,
            performance: Performance {
                impressions,
                clicks,
                conversions,
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn rates_guard_zero_denominators() {
        assert_eq!(rate(5, 0), 0.0);
        assert_eq!(rate(25, 100), 25.0);
    }

    #[test]
    fn rows_and_totals() {
        let report = build(&[campaign("A", 1000, 50, 5), campaign("B", 0, 0, 0)]);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].ctr, 5.0);
        assert_eq!(report.rows[0].conversion_rate, 10.0);
        assert_eq!(report.rows[1].ctr, 0.0);

        assert_eq!(report.totals.campaigns, 2);
        assert_eq!(report.totals.impressions, 1000);
        assert_eq!(report.totals.daily_budget, 100.0);
        assert_eq!(report.totals.ctr, 5.0);
    }

    #[test]
    fn empty_report() {
        let report = build(&[]);
        assert!(report.rows.is_empty());
        assert_eq!(report.totals.ctr, 0.0);
    }

    #[test]
    fn csv_quotes_commas() {
        let report = build(&[campaign("Sale, Summer", 100, 10, 1)]);
        let csv = report.to_csv();
        let line = csv.lines().nth(1).unwrap();
        assert!(line.starts_with("1,\"Sale, Summer\",Google Ads,Traffic,50.00,100,10,1,10.00,10.00"));
    }
}
