use std::collections::BTreeMap;
use std::sync::OnceLock;

use campus_water_core::canonical;
use campus_water_model::ParameterCategory;

use crate::limits::BUILTIN_LIMITS;
use crate::schema::ParameterLimit;
use crate::validate::{validate_limits, RegistryValidationError};

/// Immutable lookup table from parameter key to its limit definition.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitsRegistry {
    limits: Vec<ParameterLimit>,
    index: BTreeMap<String, usize>,
}

static BUILTIN: OnceLock<LimitsRegistry> = OnceLock::new();

impl LimitsRegistry {
    pub fn new(limits: Vec<ParameterLimit>) -> Result<Self, RegistryValidationError> {
        validate_limits(&limits)?;
        Ok(Self::from_validated(limits))
    }

    fn from_validated(limits: Vec<ParameterLimit>) -> Self {
        let index = limits
            .iter()
            .enumerate()
            .map(|(i, limit)| (limit.parameter.clone(), i))
            .collect();
        Self { limits, index }
    }

    /// Process-wide registry built from [`BUILTIN_LIMITS`] on first use.
    #[must_use]
    pub fn builtin() -> &'static Self {
        BUILTIN.get_or_init(|| {
            Self::from_validated(BUILTIN_LIMITS.iter().map(ParameterLimit::from).collect())
        })
    }

    /// `None` for names the table does not know, including misspellings.
    #[must_use]
    pub fn get(&self, parameter: &str) -> Option<&ParameterLimit> {
        self.index.get(parameter).map(|&i| &self.limits[i])
    }

    #[must_use]
    pub fn is_critical(&self, parameter: &str) -> bool {
        self.get(parameter).is_some_and(|l| l.critical_level)
    }

    /// Table order.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterLimit> {
        self.limits.iter()
    }

    pub fn by_category(&self, category: ParameterCategory) -> impl Iterator<Item = &ParameterLimit> {
        self.limits.iter().filter(move |l| l.category == category)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.limits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    #[must_use]
    pub fn limits(&self) -> &[ParameterLimit] {
        &self.limits
    }

    /// SHA-256 over the canonical JSON of the table; identifies which limits graded a sample.
    pub fn fingerprint(&self) -> Result<String, RegistryValidationError> {
        canonical::fingerprint(&self.limits)
            .map_err(|e| RegistryValidationError(format!("encode limits failed: {e}")))
    }
}

/// Lookup against the built-in registry.
#[must_use]
pub fn parameter_limit(parameter: &str) -> Option<&'static ParameterLimit> {
    LimitsRegistry::builtin().get(parameter)
}
