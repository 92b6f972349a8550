use campus_water_model::{AlertSeverity, AlertType, MeasurementGroup, Parameter};
use serde::{Deserialize, Serialize};

use crate::classification::{Classification, Finding};
use crate::evaluation::{BoundViolation, EvaluationStatus};
use crate::registry::LimitsRegistry;

/// Alert content derived from one finding; the store assigns ids, faucet and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDraft {
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub parameter: Parameter,
    pub value: f64,
    pub title: String,
    pub description: String,
}

/// One draft per finding, most severe first; ties keep measurement order.
#[must_use]
pub fn derive_alerts(classification: &Classification, registry: &LimitsRegistry) -> Vec<AlertDraft> {
    let mut drafts: Vec<AlertDraft> = classification
        .findings
        .iter()
        .map(|finding| draft_for(finding, registry))
        .collect();
    drafts.sort_by(|a, b| b.severity.cmp(&a.severity));
    drafts
}

fn draft_for(finding: &Finding, registry: &LimitsRegistry) -> AlertDraft {
    let alert_type = match finding.group {
        MeasurementGroup::Bacteriological => AlertType::BacteriologicalContamination,
        MeasurementGroup::Chemical => AlertType::ChemicalExceedance,
    };
    let severity = if finding.counted_critical {
        AlertSeverity::Critical
    } else if finding.evaluation.status == EvaluationStatus::Critical {
        AlertSeverity::High
    } else {
        AlertSeverity::Medium
    };

    let key = finding.parameter.as_str();
    let limit = registry.get(key);
    let unit = limit.map_or("", |l| l.unit.as_str());
    let measured = quantity(finding.value, unit);
    let (title, description) = match limit.and_then(|l| l.violated_bound(finding.value)) {
        Some(BoundViolation::AboveMaximum(max)) => (
            format!("{key} above permitted maximum"),
            format!(
                "measured {key} ({measured}) exceeds the maximum allowed ({})",
                quantity(max, unit)
            ),
        ),
        Some(BoundViolation::BelowMinimum(min)) => (
            format!("{key} below required minimum"),
            format!(
                "measured {key} ({measured}) is below the minimum required ({})",
                quantity(min, unit)
            ),
        ),
        None => (
            format!("{key} out of limits"),
            format!("measured {key} ({measured}) is out of limits"),
        ),
    };

    AlertDraft {
        alert_type,
        severity,
        parameter: finding.parameter,
        value: finding.value,
        title,
        description,
    }
}

fn quantity(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        value.to_string()
    } else {
        format!("{value} {unit}")
    }
}
