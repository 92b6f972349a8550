//! Reduction of a whole sample to a quality grade.
//!
//! Every reading is evaluated once. Each non-compliant reading counts as a violation; it also
//! counts as a critical violation when it is bacteriological, or when it is chemical and the
//! [`CriticalityPolicy`] says so. The grade is then read off the two counters, first match wins:
//!
//! | condition | grade |
//! |---|---|
//! | critical violations > 0 | `unacceptable` |
//! | violations > 3 | `poor` |
//! | violations > 1 | `acceptable` |
//! | violations == 1 | `good` |
//! | otherwise | `excellent` |
//!
//! Only `unacceptable` maps to `non_compliant`; a `poor` sample is still reported compliant.

use campus_water_model::{
    ComplianceStatus, MeasurementGroup, MeasurementSet, Parameter, QualityGrade, Reading,
};
use serde::{Deserialize, Serialize};

use crate::evaluation::Evaluation;
use crate::limits::CRITICAL_CHEMICAL_ALLOWLIST;
use crate::registry::LimitsRegistry;

/// How a chemical violation is judged critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalityPolicy {
    /// Allowlisted parameters plus anything the table flags `critical_level`.
    #[default]
    AllowlistOrRegistry,
    /// Allowlisted parameters only; a turbidity violation stays a plain violation.
    Allowlist,
    /// The table's `critical_level` flag only.
    RegistryFlag,
}

impl CriticalityPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllowlistOrRegistry => "allowlist_or_registry",
            Self::Allowlist => "allowlist",
            Self::RegistryFlag => "registry_flag",
        }
    }

    fn chemical_is_critical(self, parameter: Parameter, registry_critical: bool) -> bool {
        let allowlisted = CRITICAL_CHEMICAL_ALLOWLIST.contains(&parameter);
        match self {
            Self::AllowlistOrRegistry => allowlisted || registry_critical,
            Self::Allowlist => allowlisted,
            Self::RegistryFlag => registry_critical,
        }
    }
}

/// A non-compliant reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub parameter: Parameter,
    pub group: MeasurementGroup,
    pub value: f64,
    pub evaluation: Evaluation,
    pub counted_critical: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub grade: QualityGrade,
    pub compliance_status: ComplianceStatus,
    pub violations: u32,
    pub critical_violations: u32,
    pub policy: CriticalityPolicy,
    pub findings: Vec<Finding>,
}

#[must_use]
pub fn grade_for_counts(violations: u32, critical_violations: u32) -> QualityGrade {
    if critical_violations > 0 {
        QualityGrade::Unacceptable
    } else if violations > 3 {
        QualityGrade::Poor
    } else if violations > 1 {
        QualityGrade::Acceptable
    } else if violations == 1 {
        QualityGrade::Good
    } else {
        QualityGrade::Excellent
    }
}

#[must_use]
pub fn compliance_for_grade(grade: QualityGrade) -> ComplianceStatus {
    match grade {
        QualityGrade::Unacceptable => ComplianceStatus::NonCompliant,
        _ => ComplianceStatus::Compliant,
    }
}

/// Chemical readings are walked before bacteriological ones; findings keep that order.
#[must_use]
pub fn classify(
    registry: &LimitsRegistry,
    measurements: &MeasurementSet,
    policy: CriticalityPolicy,
) -> Classification {
    classify_readings(registry, measurements.readings(), policy)
}

#[must_use]
pub fn classify_readings<I>(
    registry: &LimitsRegistry,
    readings: I,
    policy: CriticalityPolicy,
) -> Classification
where
    I: IntoIterator<Item = Reading>,
{
    let mut violations = 0_u32;
    let mut critical_violations = 0_u32;
    let mut findings = Vec::new();

    for reading in readings {
        let key = reading.parameter.as_str();
        let evaluation = registry.evaluate(key, reading.value);
        if evaluation.compliant {
            continue;
        }

        let counted_critical = match reading.group {
            MeasurementGroup::Bacteriological => true,
            MeasurementGroup::Chemical => {
                policy.chemical_is_critical(reading.parameter, registry.is_critical(key))
            }
        };
        violations += 1;
        if counted_critical {
            critical_violations += 1;
        }
        findings.push(Finding {
            parameter: reading.parameter,
            group: reading.group,
            value: reading.value,
            evaluation,
            counted_critical,
        });
    }

    let grade = grade_for_counts(violations, critical_violations);
    Classification {
        grade,
        compliance_status: compliance_for_grade(grade),
        violations,
        critical_violations,
        policy,
        findings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_table_is_first_match() {
        assert_eq!(grade_for_counts(0, 0), QualityGrade::Excellent);
        assert_eq!(grade_for_counts(1, 0), QualityGrade::Good);
        assert_eq!(grade_for_counts(2, 0), QualityGrade::Acceptable);
        assert_eq!(grade_for_counts(3, 0), QualityGrade::Acceptable);
        assert_eq!(grade_for_counts(4, 0), QualityGrade::Poor);
        assert_eq!(grade_for_counts(1, 1), QualityGrade::Unacceptable);
        assert_eq!(grade_for_counts(9, 1), QualityGrade::Unacceptable);
    }

    #[test]
    fn only_unacceptable_is_non_compliant() {
        for grade in QualityGrade::ALL {
            let expected = if grade == QualityGrade::Unacceptable {
                ComplianceStatus::NonCompliant
            } else {
                ComplianceStatus::Compliant
            };
            assert_eq!(compliance_for_grade(grade), expected, "{grade}");
        }
    }

    #[test]
    fn empty_reading_list_is_excellent() {
        let out = classify_readings(
            LimitsRegistry::builtin(),
            std::iter::empty(),
            CriticalityPolicy::default(),
        );
        assert_eq!(out.grade, QualityGrade::Excellent);
        assert_eq!(out.violations, 0);
        assert!(out.findings.is_empty());
    }

    #[test]
    fn allowlist_policy_keeps_turbidity_non_critical() {
        let reading = Reading {
            parameter: Parameter::Turbidity,
            group: MeasurementGroup::Chemical,
            value: 2.5,
        };
        let registry = LimitsRegistry::builtin();
        let parity = classify_readings(registry, [reading], CriticalityPolicy::Allowlist);
        assert_eq!(parity.grade, QualityGrade::Good);

        let strict = classify_readings(registry, [reading], CriticalityPolicy::AllowlistOrRegistry);
        assert_eq!(strict.grade, QualityGrade::Unacceptable);
    }
}
