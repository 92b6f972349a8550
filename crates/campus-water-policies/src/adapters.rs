use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::registry::LimitsRegistry;
use crate::schema::LimitsDocument;
use crate::validate::{validate_schema_version, RegistryValidationError};

const LIMITS_CONFIG_PATH: &str = "configs/limits/limits.json";
const LIMITS_SCHEMA_PATH: &str = "configs/limits/limits.schema.json";

#[must_use]
pub fn limits_config_path(root: &Path) -> PathBuf {
    root.join(LIMITS_CONFIG_PATH)
}

#[must_use]
pub fn limits_schema_path(root: &Path) -> PathBuf {
    root.join(LIMITS_SCHEMA_PATH)
}

pub fn load_registry_from_workspace(root: &Path) -> Result<LimitsRegistry, RegistryValidationError> {
    load_registry_from_path(&limits_config_path(root), &limits_schema_path(root))
}

pub fn load_registry_from_path(
    config: &Path,
    schema: &Path,
) -> Result<LimitsRegistry, RegistryValidationError> {
    let config_raw = fs::read_to_string(config).map_err(|e| {
        RegistryValidationError(format!("read limits config {} failed: {e}", config.display()))
    })?;
    let schema_raw = fs::read_to_string(schema).map_err(|e| {
        RegistryValidationError(format!("read limits schema {} failed: {e}", schema.display()))
    })?;
    parse_limits_json(&config_raw, &schema_raw)
}

/// The schema pins `properties.schema_version.const`; the document must declare the same version.
pub fn parse_limits_json(
    config_raw: &str,
    schema_raw: &str,
) -> Result<LimitsRegistry, RegistryValidationError> {
    let schema_val: Value = serde_json::from_str(schema_raw)
        .map_err(|e| RegistryValidationError(format!("parse limits schema failed: {e}")))?;
    let pinned = schema_val
        .get("properties")
        .and_then(|p| p.get("schema_version"))
        .and_then(|p| p.get("const"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            RegistryValidationError("schema properties.schema_version.const missing".to_string())
        })?;
    validate_schema_version(pinned)?;

    let doc: LimitsDocument = serde_json::from_str(config_raw)
        .map_err(|e| RegistryValidationError(format!("decode limits config failed: {e}")))?;
    if doc.schema_version.as_str() != pinned {
        return Err(RegistryValidationError(format!(
            "limits config schema_version {} does not match schema {pinned}",
            doc.schema_version.as_str()
        )));
    }
    LimitsRegistry::new(doc.limits)
}
