use std::collections::BTreeSet;

use crate::limits::LIMITS_SCHEMA_VERSION;
use crate::schema::ParameterLimit;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryValidationError(pub String);

impl std::fmt::Display for RegistryValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for RegistryValidationError {}

/// Structural checks a limits table must pass before it can back a registry.
pub fn validate_limits(limits: &[ParameterLimit]) -> Result<(), RegistryValidationError> {
    if limits.is_empty() {
        return Err(RegistryValidationError(
            "limits table must not be empty".to_string(),
        ));
    }

    let mut seen = BTreeSet::<&str>::new();
    for limit in limits {
        let key = limit.parameter.as_str();
        if key.trim().is_empty() || key.trim() != key {
            return Err(RegistryValidationError(format!(
                "limit parameter key must be non-empty without surrounding whitespace: `{key}`"
            )));
        }
        if !seen.insert(key) {
            return Err(RegistryValidationError(format!(
                "limit parameter duplicated: {key}"
            )));
        }
        if limit.unit.trim().is_empty() {
            return Err(RegistryValidationError(format!(
                "limit {key} must declare a unit"
            )));
        }
        match (limit.min_value, limit.max_value) {
            (None, None) => {
                return Err(RegistryValidationError(format!(
                    "limit {key} must declare min_value or max_value"
                )));
            }
            (min, max) => {
                for bound in [min, max].into_iter().flatten() {
                    if !bound.is_finite() {
                        return Err(RegistryValidationError(format!(
                            "limit {key} has non-finite bound {bound}"
                        )));
                    }
                }
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        return Err(RegistryValidationError(format!(
                            "limit {key} has min_value {min} above max_value {max}"
                        )));
                    }
                }
            }
        }
    }
    Ok(())
}

pub(crate) fn validate_schema_version(found: &str) -> Result<(), RegistryValidationError> {
    if found != LIMITS_SCHEMA_VERSION {
        return Err(RegistryValidationError(format!(
            "unsupported limits schema version: {found} (expected {LIMITS_SCHEMA_VERSION})"
        )));
    }
    Ok(())
}
