// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use campus_water_policies::{
    limits_config_path, limits_schema_path, load_registry_from_path, load_registry_from_workspace,
    parse_limits_json, LimitsRegistry,
};
use serde_json::{json, Value};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn schema_raw() -> String {
    std::fs::read_to_string(limits_schema_path(&workspace_root())).expect("schema read")
}

fn config_value() -> Value {
    let raw = std::fs::read_to_string(limits_config_path(&workspace_root())).expect("config read");
    serde_json::from_str(&raw).expect("config json")
}

fn reject(doc: &Value, needle: &str) {
    let err = parse_limits_json(&doc.to_string(), &schema_raw()).expect_err("must reject");
    assert!(err.0.contains(needle), "`{err}` should mention `{needle}`");
}

#[test]
fn shipped_limits_document_matches_builtin_table() {
    let loaded = load_registry_from_workspace(&workspace_root()).expect("load limits");
    let builtin = LimitsRegistry::builtin();
    assert_eq!(&loaded, builtin);
    assert_eq!(
        loaded.fingerprint().expect("fingerprint"),
        builtin.fingerprint().expect("fingerprint")
    );
}

#[test]
fn custom_limits_file_loads_from_any_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("strict.json");
    let schema = dir.path().join("limits.schema.json");

    let mut doc = config_value();
    doc["limits"][0]["max_value"] = json!(1.0);
    std::fs::write(&config, doc.to_string()).expect("write config");
    std::fs::write(&schema, schema_raw()).expect("write schema");

    let registry = load_registry_from_path(&config, &schema).expect("load custom limits");
    assert!(!registry.evaluate("turbidity", 1.5).compliant);
    assert!(LimitsRegistry::builtin().evaluate("turbidity", 1.5).compliant);
    assert_ne!(
        registry.fingerprint().expect("fingerprint"),
        LimitsRegistry::builtin().fingerprint().expect("fingerprint")
    );
}

#[test]
fn missing_files_are_reported_with_their_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("absent.json");
    let err = load_registry_from_path(&missing, &missing).expect_err("missing file");
    assert!(err.0.contains("absent.json"), "{err}");
}

#[test]
fn invalid_documents_are_rejected() {
    let mut doc = config_value();
    doc["schema_version"] = json!("2");
    reject(&doc, "decode limits config failed");

    let mut doc = config_value();
    let first = doc["limits"][0].clone();
    doc["limits"].as_array_mut().expect("array").push(first);
    reject(&doc, "duplicated: turbidity");

    let mut doc = config_value();
    doc["limits"][5]["min_value"] = json!(9.5);
    reject(&doc, "min_value 9.5 above max_value 9");

    let mut doc = config_value();
    doc["limits"][1]
        .as_object_mut()
        .expect("object")
        .remove("max_value");
    reject(&doc, "must declare min_value or max_value");

    let mut doc = config_value();
    doc["limits"][2]["unit"] = json!("  ");
    reject(&doc, "must declare a unit");

    let mut doc = config_value();
    doc["limits"][3]["parameter"] = json!(" taste");
    reject(&doc, "surrounding whitespace");

    let mut doc = config_value();
    doc["limits"][0]["threshold"] = json!(1);
    reject(&doc, "unknown field");

    let mut doc = config_value();
    doc["limits"] = json!([]);
    reject(&doc, "must not be empty");
}

#[test]
fn schema_must_pin_the_supported_version() {
    let config = config_value().to_string();
    let err = parse_limits_json(&config, "{}").expect_err("unpinned schema");
    assert!(err.0.contains("schema_version.const missing"), "{err}");

    let pinned_elsewhere = json!({"properties": {"schema_version": {"const": "7"}}}).to_string();
    let err = parse_limits_json(&config, &pinned_elsewhere).expect_err("future schema");
    assert!(err.0.contains("unsupported limits schema version: 7"), "{err}");
}
