use campus_water_model::{Parameter, ParameterCategory};

use crate::schema::LimitSpec;

pub const LIMITS_SCHEMA_VERSION: &str = "1";

/// Chemical parameters whose violation forces an `unacceptable` grade even when the limits table
/// does not flag them as critical.
pub const CRITICAL_CHEMICAL_ALLOWLIST: [Parameter; 9] = [
    Parameter::Ph,
    Parameter::Nitrate,
    Parameter::Nitrite,
    Parameter::Lead,
    Parameter::Cadmium,
    Parameter::Chromium,
    Parameter::Mercury,
    Parameter::Arsenic,
    Parameter::FreeChlorine,
];

const fn max_only(
    parameter: &'static str,
    max: f64,
    unit: &'static str,
    category: ParameterCategory,
    critical: bool,
) -> LimitSpec {
    LimitSpec {
        parameter,
        min_value: None,
        max_value: Some(max),
        unit,
        category,
        critical_level: critical,
    }
}

const fn ranged(
    parameter: &'static str,
    min: f64,
    max: f64,
    unit: &'static str,
    critical: bool,
) -> LimitSpec {
    LimitSpec {
        parameter,
        min_value: Some(min),
        max_value: Some(max),
        unit,
        category: ParameterCategory::Chemical,
        critical_level: critical,
    }
}

use campus_water_model::ParameterCategory::{Bacteriological as B, Chemical as C, Physical as P};

/// Drinking-water limits (potable water technical regulation, treatment title).
pub const BUILTIN_LIMITS: &[LimitSpec] = &[
    max_only("turbidity", 2.0, "NTU", P, true),
    max_only("color", 15.0, "UPC", P, false),
    max_only("odor", 3.0, "threshold", P, false),
    max_only("taste", 3.0, "threshold", P, false),
    max_only("temperature", 30.0, "°C", P, false),
    ranged("pH", 6.5, 9.0, "pH units", true),
    max_only("conductivity", 1000.0, "μS/cm", C, false),
    max_only("totalDissolvedSolids", 500.0, "mg/L", C, false),
    max_only("totalHardness", 300.0, "mg/L CaCO3", C, false),
    max_only("chloride", 250.0, "mg/L", C, false),
    max_only("sulfate", 250.0, "mg/L", C, false),
    max_only("nitrate", 10.0, "mg/L", C, true),
    max_only("nitrite", 0.1, "mg/L", C, true),
    max_only("ammonia", 0.5, "mg/L", C, false),
    max_only("iron", 0.3, "mg/L", C, false),
    max_only("manganese", 0.1, "mg/L", C, false),
    max_only("copper", 1.0, "mg/L", C, false),
    max_only("zinc", 3.0, "mg/L", C, false),
    max_only("lead", 0.01, "mg/L", C, true),
    max_only("cadmium", 0.003, "mg/L", C, true),
    max_only("chromium", 0.05, "mg/L", C, true),
    max_only("mercury", 0.001, "mg/L", C, true),
    max_only("arsenic", 0.01, "mg/L", C, true),
    ranged("freeChlorine", 0.3, 2.0, "mg/L", true),
    max_only("totalChlorine", 5.0, "mg/L", C, false),
    max_only("totalColiforms", 0.0, "UFC/100mL", B, true),
    max_only("fecalColiforms", 0.0, "UFC/100mL", B, true),
    max_only("escherichiaColi", 0.0, "UFC/100mL", B, true),
    max_only("enterococci", 0.0, "UFC/100mL", B, true),
    max_only("pseudomonasAeruginosa", 0.0, "UFC/100mL", B, true),
    max_only("heterotrophicBacteria", 500.0, "UFC/mL", B, false),
];
