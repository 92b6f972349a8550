use serde::{Deserialize, Serialize};

use crate::registry::LimitsRegistry;
use crate::schema::ParameterLimit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    Normal,
    Warning,
    Critical,
}

impl EvaluationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// Outcome of checking one value against one limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub compliant: bool,
    pub status: EvaluationStatus,
}

impl Evaluation {
    pub const COMPLIANT: Self = Self {
        compliant: true,
        status: EvaluationStatus::Normal,
    };
}

/// The bound a non-compliant value crossed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "bound", content = "limit")]
pub enum BoundViolation {
    AboveMaximum(f64),
    BelowMinimum(f64),
}

impl ParameterLimit {
    /// Bounds are inclusive: a value equal to a bound is compliant.
    #[must_use]
    pub fn violated_bound(&self, value: f64) -> Option<BoundViolation> {
        if let Some(max) = self.max_value {
            if value > max {
                return Some(BoundViolation::AboveMaximum(max));
            }
        }
        if let Some(min) = self.min_value {
            if value < min {
                return Some(BoundViolation::BelowMinimum(min));
            }
        }
        None
    }

    #[must_use]
    pub fn evaluate(&self, value: f64) -> Evaluation {
        if self.violated_bound(value).is_none() {
            return Evaluation::COMPLIANT;
        }
        Evaluation {
            compliant: false,
            status: if self.critical_level {
                EvaluationStatus::Critical
            } else {
                EvaluationStatus::Warning
            },
        }
    }
}

impl LimitsRegistry {
    /// Unknown parameters are compliant: the table only constrains what it lists.
    #[must_use]
    pub fn evaluate(&self, parameter: &str, value: f64) -> Evaluation {
        self.get(parameter)
            .map_or(Evaluation::COMPLIANT, |limit| limit.evaluate(value))
    }

    #[must_use]
    pub fn evaluate_with_limit(
        &self,
        parameter: &str,
        value: f64,
    ) -> (Evaluation, Option<&ParameterLimit>) {
        match self.get(parameter) {
            Some(limit) => (limit.evaluate(value), Some(limit)),
            None => (Evaluation::COMPLIANT, None),
        }
    }
}

/// [`LimitsRegistry::evaluate`] against the built-in registry.
#[must_use]
pub fn evaluate(parameter: &str, value: f64) -> Evaluation {
    LimitsRegistry::builtin().evaluate(parameter, value)
}
