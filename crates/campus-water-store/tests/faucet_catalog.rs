// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use campus_water_model::{FaucetStatus, FaucetType};
use campus_water_store::{faucet_catalog_path, FaucetCatalog, FaucetQuery, StoreError};

fn config_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .join("configs")
}

fn shipped() -> FaucetCatalog {
    FaucetCatalog::load(&faucet_catalog_path(&config_dir())).expect("load catalog")
}

#[test]
fn shipped_catalog_loads_with_expected_mix() {
    let catalog = shipped();
    let stats = catalog.stats();
    assert_eq!(stats.total, 12);
    assert_eq!(stats.active, 10);
    assert_eq!(stats.maintenance, 1);
    assert_eq!(stats.out_of_service, 1);
    assert_eq!(stats.active_percentage, 83);
}

#[test]
fn lookups_by_id_building_and_type() {
    let catalog = shipped();
    assert_eq!(
        catalog.get("faucet-008").map(|f| f.code.as_str()),
        Some("LAB-QUI-001")
    );
    assert!(catalog.get("faucet-999").is_none());

    let engineering: Vec<&str> = catalog
        .by_building("Engineering")
        .map(|f| f.id.as_str())
        .collect();
    assert_eq!(
        engineering,
        ["faucet-001", "faucet-002", "faucet-003", "faucet-012"]
    );
    assert_eq!(catalog.by_building("engineering").count(), 0);

    assert_eq!(catalog.by_type(FaucetType::Tap).count(), 3);
    assert_eq!(catalog.by_type(FaucetType::WaterCooler).count(), 3);
    assert_eq!(catalog.by_type(FaucetType::DrinkingFountain).count(), 6);

    let out: Vec<&str> = catalog
        .by_status(FaucetStatus::OutOfService)
        .map(|f| f.id.as_str())
        .collect();
    assert_eq!(out, ["faucet-010"]);
    assert_eq!(catalog.buildings().len(), 8);
}

#[test]
fn queries_combine_building_type_and_status() {
    let catalog = shipped();
    let engineering_taps = FaucetQuery {
        building: Some("Engineering".to_string()),
        faucet_type: Some(FaucetType::Tap),
        ..FaucetQuery::default()
    };
    let ids: Vec<&str> = catalog
        .query(&engineering_taps)
        .map(|f| f.id.as_str())
        .collect();
    assert_eq!(ids, ["faucet-002", "faucet-012"]);

    let library_active = FaucetQuery {
        status: Some(FaucetStatus::Active),
        building: Some("Library".to_string()),
        faucet_type: None,
    };
    let ids: Vec<&str> = catalog
        .query(&library_active)
        .map(|f| f.id.as_str())
        .collect();
    assert_eq!(ids, ["faucet-004"]);
    assert_eq!(catalog.query(&FaucetQuery::default()).count(), 12);
}

#[test]
fn duplicate_ids_and_codes_are_rejected() {
    let catalog = shipped();
    let mut faucets = catalog.all().to_vec();
    faucets.push(faucets[0].clone());
    let err = FaucetCatalog::new(faucets).expect_err("duplicate id");
    assert_eq!(
        err,
        StoreError::Duplicate {
            kind: "faucet",
            id: "faucet-001".to_string()
        }
    );

    let mut faucets = catalog.all().to_vec();
    let mut twin = faucets[1].clone();
    twin.id = "faucet-100".to_string();
    faucets.push(twin);
    let err = FaucetCatalog::new(faucets).expect_err("duplicate code");
    assert_eq!(err.code(), "duplicate_id");
}

#[test]
fn catalog_documents_are_strict() {
    let err = FaucetCatalog::from_json_str(r#"{"schema_version":"2","faucets":[]}"#)
        .expect_err("future version");
    assert!(err.to_string().contains("unsupported faucet catalog schema version"));

    let err = FaucetCatalog::from_json_str(r#"{"schema_version":"1","faucets":[],"owner":"x"}"#)
        .expect_err("unknown field");
    assert_eq!(err.code(), "decode_error");

    let empty = FaucetCatalog::from_json_str(r#"{"schema_version":"1","faucets":[]}"#)
        .expect("empty catalog");
    assert!(empty.is_empty());
    assert_eq!(empty.stats().active_percentage, 0);
}
