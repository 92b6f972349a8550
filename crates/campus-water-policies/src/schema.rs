use campus_water_model::ParameterCategory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum LimitsSchemaVersion {
    #[serde(rename = "1")]
    V1,
}

impl LimitsSchemaVersion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "1",
        }
    }
}

/// Compile-time row of the built-in table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitSpec {
    pub parameter: &'static str,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub unit: &'static str,
    pub category: ParameterCategory,
    pub critical_level: bool,
}

/// Allowed range for one parameter. A missing bound leaves that side unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterLimit {
    pub parameter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    pub unit: String,
    pub category: ParameterCategory,
    pub critical_level: bool,
}

impl From<&LimitSpec> for ParameterLimit {
    fn from(row: &LimitSpec) -> Self {
        Self {
            parameter: row.parameter.to_string(),
            min_value: row.min_value,
            max_value: row.max_value,
            unit: row.unit.to_string(),
            category: row.category,
            critical_level: row.critical_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsDocument {
    pub schema_version: LimitsSchemaVersion,
    pub limits: Vec<ParameterLimit>,
}
