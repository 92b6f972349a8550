// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod adapters;
mod alerts;
mod classification;
mod evaluation;
mod limits;
mod registry;
mod schema;
mod validate;

pub use adapters::{
    limits_config_path, limits_schema_path, load_registry_from_path, load_registry_from_workspace,
    parse_limits_json,
};
pub use alerts::{derive_alerts, AlertDraft};
pub use classification::{
    classify, classify_readings, compliance_for_grade, grade_for_counts, Classification,
    CriticalityPolicy, Finding,
};
pub use evaluation::{evaluate, BoundViolation, Evaluation, EvaluationStatus};
pub use limits::{BUILTIN_LIMITS, CRITICAL_CHEMICAL_ALLOWLIST, LIMITS_SCHEMA_VERSION};
pub use registry::{parameter_limit, LimitsRegistry};
pub use schema::{LimitSpec, LimitsDocument, LimitsSchemaVersion, ParameterLimit};
pub use validate::{validate_limits, RegistryValidationError};

pub const CRATE_NAME: &str = "campus-water-policies";
