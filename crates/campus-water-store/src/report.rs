use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use campus_water_model::{Alert, AlertSeverity, ComplianceStatus};

use crate::alerts::AlertBoard;
use crate::faucets::FaucetCatalog;
use crate::samples::SampleRepository;
use crate::stats::{percent, QualityDistribution};

/// Compliance rate below which reports ask for more frequent sampling.
pub const TARGET_COMPLIANCE_RATE: u32 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_faucets: usize,
    pub active_faucets: usize,
    pub samples_this_month: usize,
    pub compliance_rate: u32,
    pub active_alerts: usize,
    pub critical_alerts: usize,
    pub last_update: DateTime<Utc>,
}

impl DashboardStats {
    #[must_use]
    pub fn compute(
        catalog: &FaucetCatalog,
        samples: &SampleRepository,
        alerts: &AlertBoard,
        now: DateTime<Utc>,
    ) -> Self {
        let faucets = catalog.stats();
        let sample_stats = samples.stats(now.date_naive());
        let alert_stats = alerts.stats();
        Self {
            total_faucets: faucets.total,
            active_faucets: faucets.active,
            samples_this_month: sample_stats.this_month,
            compliance_rate: sample_stats.compliance_rate,
            active_alerts: alert_stats.active,
            critical_alerts: alert_stats.critical,
            last_update: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityReport {
    pub title: String,
    pub period: ReportPeriod,
    /// Faucets with at least one sample in the period, sorted.
    pub faucet_ids: Vec<String>,
    pub samples_analyzed: usize,
    pub compliance_rate: u32,
    pub summary: QualityDistribution,
    /// Critical alerts raised during the period, resolved or not.
    pub critical_findings: Vec<Alert>,
    pub recommendations: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl QualityReport {
    /// Report over samples collected in `period` (inclusive) and alerts raised in it.
    #[must_use]
    pub fn build(
        period: ReportPeriod,
        samples: &SampleRepository,
        alerts: &AlertBoard,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let in_period: Vec<_> = samples
            .by_date_range(period.start_date, period.end_date)
            .collect();
        let faucet_ids: BTreeSet<&str> = in_period.iter().map(|s| s.faucet_id.as_str()).collect();
        let compliant = in_period
            .iter()
            .filter(|s| s.compliance_status == ComplianceStatus::Compliant)
            .count();
        let summary = QualityDistribution::from_grades(in_period.iter().map(|s| s.quality_rating));
        let compliance_rate = percent(compliant, in_period.len());
        let critical_findings = alerts
            .by_severity(AlertSeverity::Critical)
            .filter(|a| {
                let day = a.created_at.date_naive();
                day >= period.start_date && day <= period.end_date
            })
            .cloned()
            .collect();

        Self {
            title: format!(
                "Water quality report {} to {}",
                period.start_date, period.end_date
            ),
            period,
            faucet_ids: faucet_ids.into_iter().map(str::to_string).collect(),
            samples_analyzed: in_period.len(),
            compliance_rate,
            recommendations: recommendations(&summary, in_period.len(), compliance_rate),
            summary,
            critical_findings,
            generated_at,
        }
    }
}

fn recommendations(summary: &QualityDistribution, analyzed: usize, compliance_rate: u32) -> Vec<String> {
    if analyzed == 0 {
        return vec![
            "no samples were analyzed in this period; sample every active faucet".to_string(),
        ];
    }
    let mut out = Vec::new();
    if summary.unacceptable > 0 {
        out.push(format!(
            "{} unacceptable sample(s): take the affected faucets out of service and resample after corrective action",
            summary.unacceptable
        ));
    }
    if summary.poor > 0 {
        out.push(format!(
            "{} sample(s) graded poor: schedule maintenance for the affected faucets",
            summary.poor
        ));
    }
    if compliance_rate < TARGET_COMPLIANCE_RATE {
        out.push(format!(
            "increase sampling frequency until compliance reaches {TARGET_COMPLIANCE_RATE}%"
        ));
    }
    if out.is_empty() {
        out.push("keep the current monitoring schedule".to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_period_keeps_the_schedule() {
        let summary = QualityDistribution {
            excellent: 4,
            ..QualityDistribution::default()
        };
        assert_eq!(
            recommendations(&summary, 4, 100),
            ["keep the current monitoring schedule"]
        );
    }

    #[test]
    fn unacceptable_samples_come_first() {
        let summary = QualityDistribution {
            excellent: 1,
            poor: 1,
            unacceptable: 2,
            ..QualityDistribution::default()
        };
        let out = recommendations(&summary, 4, 50);
        assert_eq!(out.len(), 3);
        assert!(out[0].starts_with("2 unacceptable sample(s)"));
        assert!(out[1].contains("graded poor"));
        assert!(out[2].contains("95%"));
    }
}
