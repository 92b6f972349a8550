// SPDX-License-Identifier: Apache-2.0

use campus_water_policies::{
    evaluate, parameter_limit, Evaluation, EvaluationStatus, LimitsRegistry, BUILTIN_LIMITS,
};

const EPSILON: f64 = 1e-9;

#[test]
fn max_only_limits_are_inclusive_and_escalate_by_criticality() {
    for row in BUILTIN_LIMITS.iter().filter(|s| s.min_value.is_none()) {
        let max = row.max_value.expect("max-only row");

        let at = evaluate(row.parameter, max);
        assert_eq!(at, Evaluation::COMPLIANT, "{} at max", row.parameter);

        let over = evaluate(row.parameter, max + EPSILON);
        assert!(!over.compliant, "{} above max", row.parameter);
        let expected = if row.critical_level {
            EvaluationStatus::Critical
        } else {
            EvaluationStatus::Warning
        };
        assert_eq!(over.status, expected, "{} status", row.parameter);
    }
}

#[test]
fn ranged_limits_reject_both_sides() {
    let cases = [
        ("pH", 6.5, true),
        ("pH", 9.0, true),
        ("pH", 7.4, true),
        ("pH", 6.2, false),
        ("pH", 9.3, false),
        ("freeChlorine", 0.3, true),
        ("freeChlorine", 2.0, true),
        ("freeChlorine", 0.15, false),
        ("freeChlorine", 2.5, false),
    ];
    for (parameter, value, compliant) in cases {
        let result = evaluate(parameter, value);
        assert_eq!(result.compliant, compliant, "{parameter}={value}");
        if !compliant {
            assert_eq!(result.status, EvaluationStatus::Critical);
        }
    }
}

#[test]
fn unknown_parameters_are_always_compliant() {
    for value in [0.0, -1.0, 1e12, f64::MAX, -f64::MAX] {
        assert_eq!(evaluate("fluoride", value), Evaluation::COMPLIANT);
        assert_eq!(evaluate("PH", value), Evaluation::COMPLIANT);
        assert_eq!(evaluate("", value), Evaluation::COMPLIANT);
    }
}

#[test]
fn negative_values_are_evaluated_against_bounds() {
    assert_eq!(evaluate("lead", -0.5), Evaluation::COMPLIANT);
    let below = evaluate("freeChlorine", -0.1);
    assert!(!below.compliant);
    assert_eq!(below.status, EvaluationStatus::Critical);
}

#[test]
fn bacteriological_zero_limits_flag_any_growth() {
    let hit = evaluate("escherichiaColi", 1.0);
    assert_eq!(hit.status, EvaluationStatus::Critical);
    assert_eq!(evaluate("escherichiaColi", 0.0), Evaluation::COMPLIANT);

    let heterotrophic = evaluate("heterotrophicBacteria", 650.0);
    assert_eq!(heterotrophic.status, EvaluationStatus::Warning);
}

#[test]
fn registry_reproduces_regulatory_table() {
    let lead = parameter_limit("lead").expect("lead");
    assert_eq!(lead.max_value, Some(0.01));
    assert_eq!(lead.unit, "mg/L");
    assert!(lead.critical_level);

    let ph = parameter_limit("pH").expect("pH");
    assert_eq!((ph.min_value, ph.max_value), (Some(6.5), Some(9.0)));

    let iron = parameter_limit("iron").expect("iron");
    assert_eq!(iron.max_value, Some(0.3));
    assert!(!iron.critical_level);

    let registry = LimitsRegistry::builtin();
    let critical: Vec<&str> = registry
        .iter()
        .filter(|l| l.critical_level)
        .map(|l| l.parameter.as_str())
        .collect();
    assert_eq!(
        critical,
        [
            "turbidity",
            "pH",
            "nitrate",
            "nitrite",
            "lead",
            "cadmium",
            "chromium",
            "mercury",
            "arsenic",
            "freeChlorine",
            "totalColiforms",
            "fecalColiforms",
            "escherichiaColi",
            "enterococci",
            "pseudomonasAeruginosa",
        ]
    );
}

#[test]
fn evaluate_with_limit_returns_matched_row() {
    let registry = LimitsRegistry::builtin();
    let (result, limit) = registry.evaluate_with_limit("nitrate", 12.0);
    assert!(!result.compliant);
    assert_eq!(limit.map(|l| l.max_value), Some(Some(10.0)));

    let (result, limit) = registry.evaluate_with_limit("fluoride", 12.0);
    assert!(result.compliant);
    assert!(limit.is_none());
}
