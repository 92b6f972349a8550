// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use campus_water_model::{AlertSeverity, MeasurementSet};
use campus_water_policies::{CriticalityPolicy, LimitsRegistry};
use campus_water_store::{
    faucet_catalog_path, CampusStore, FaucetCatalog, ReportPeriod, SampleMetadata,
    SampleSubmission, StoreError, StoreSnapshot,
};

fn catalog() -> FaucetCatalog {
    let configs = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .join("configs");
    FaucetCatalog::load(&faucet_catalog_path(&configs)).expect("catalog")
}

fn empty_store() -> CampusStore {
    CampusStore::new(
        catalog(),
        LimitsRegistry::builtin().clone(),
        CriticalityPolicy::default(),
    )
}

fn now() -> DateTime<Utc> {
    "2024-10-20T12:00:00Z".parse().expect("timestamp")
}

fn date(raw: &str) -> NaiveDate {
    raw.parse().expect("date")
}

fn submit(store: &mut CampusStore, faucet: &str, day: &str, mutate: fn(&mut MeasurementSet)) {
    let raw: Value =
        serde_json::from_str(include_str!("fixtures/within_limits.json")).expect("fixture");
    let mut measurements = MeasurementSet::from_json(&raw).expect("measurements");
    mutate(&mut measurements);
    let submission = SampleSubmission {
        metadata: SampleMetadata {
            faucet_id: faucet.to_string(),
            collection_date: date(day),
            id: None,
            sample_code: None,
            collection_time: None,
            collected_by: None,
            analysis_date: None,
            laboratory_id: None,
            observations: None,
        },
        measurements,
    };
    store.ingest(submission, now()).expect("ingest");
}

fn populated() -> CampusStore {
    let mut store = empty_store();
    submit(&mut store, "faucet-001", "2024-10-02", |_| {});
    submit(&mut store, "faucet-002", "2024-10-08", |m| m.chemical.iron = 0.5);
    submit(&mut store, "faucet-009", "2024-10-15", |m| {
        m.bacteriological.total_coliforms = 3.0;
    });
    submit(&mut store, "faucet-001", "2024-09-12", |_| {});
    store
}

#[test]
fn snapshot_survives_a_save_and_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("state").join("campus.json");
    let store = populated();
    store.snapshot().save(&path).expect("save");

    let loaded = StoreSnapshot::load(&path).expect("load");
    assert_eq!(loaded, store.snapshot());
    let restored = empty_store().with_snapshot(loaded).expect("restore");
    assert_eq!(restored.samples(), store.samples());
    assert_eq!(restored.alerts(), store.alerts());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn missing_state_file_is_an_empty_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let snapshot = StoreSnapshot::load(&dir.path().join("absent.json")).expect("load");
    assert!(snapshot.samples.is_empty());
    assert!(snapshot.alerts.is_empty());
}

#[test]
fn snapshot_with_unknown_faucet_is_rejected() {
    let mut snapshot = populated().snapshot();
    snapshot.samples[0].faucet_id = "faucet-777".to_string();
    let err = empty_store().with_snapshot(snapshot).expect_err("orphan sample");
    assert_eq!(err, StoreError::FaucetNotFound("faucet-777".to_string()));
}

#[test]
fn dashboard_combines_catalog_samples_and_alerts() {
    let stats = populated().dashboard(now());
    assert_eq!(stats.total_faucets, 12);
    assert_eq!(stats.active_faucets, 10);
    assert_eq!(stats.samples_this_month, 3);
    assert_eq!(stats.compliance_rate, 75);
    assert_eq!(stats.active_alerts, 2);
    assert_eq!(stats.critical_alerts, 1);
    assert_eq!(stats.last_update, now());
}

#[test]
fn report_covers_only_the_requested_period() {
    let store = populated();
    let period = ReportPeriod {
        start_date: date("2024-10-01"),
        end_date: date("2024-10-31"),
    };
    let report = store.report(period, now());
    assert_eq!(report.samples_analyzed, 3);
    assert_eq!(report.faucet_ids, ["faucet-001", "faucet-002", "faucet-009"]);
    assert_eq!(report.compliance_rate, 67);
    assert_eq!(report.summary.excellent, 1);
    assert_eq!(report.summary.good, 1);
    assert_eq!(report.summary.unacceptable, 1);
    assert_eq!(report.critical_findings.len(), 1);
    let finding = &report.critical_findings[0];
    assert_eq!(finding.id, "alert-0002");
    assert_eq!(finding.severity, AlertSeverity::Critical);
    assert_eq!(finding.faucet_id.as_deref(), Some("faucet-009"));
    assert_eq!(finding.sample_id.as_deref(), Some("sample-faucet-009-0003"));
    assert_eq!(finding.title, "totalColiforms above permitted maximum");
    assert_eq!(report.recommendations.len(), 2);
    assert!(report.recommendations[0].starts_with("1 unacceptable sample(s)"));

    let september = store.report(
        ReportPeriod {
            start_date: date("2024-09-01"),
            end_date: date("2024-09-30"),
        },
        now(),
    );
    assert_eq!(september.samples_analyzed, 1);
    // Alerts are dated by when they were raised, not by sample collection.
    assert!(september.critical_findings.is_empty());
    assert_eq!(september.recommendations, ["keep the current monitoring schedule"]);

    let empty = store.report(
        ReportPeriod {
            start_date: date("2023-01-01"),
            end_date: date("2023-01-31"),
        },
        now(),
    );
    assert_eq!(empty.samples_analyzed, 0);
    assert_eq!(empty.compliance_rate, 0);
    assert_eq!(empty.recommendations.len(), 1);
}
