// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use campus_water_model::MeasurementSet;
use campus_water_policies::{
    classify, derive_alerts, evaluate, load_registry_from_workspace, CriticalityPolicy,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn bench_classification(c: &mut Criterion) {
    let registry = load_registry_from_workspace(&workspace_root()).expect("load limits");
    let raw: serde_json::Value =
        serde_json::from_str(include_str!("../tests/fixtures/within_limits.json")).expect("fixture");
    let clean = MeasurementSet::from_json(&raw).expect("measurements");

    let mut dirty = clean;
    dirty.chemical.iron = 0.6;
    dirty.chemical.lead = 0.05;
    dirty.chemical.turbidity = 4.0;
    dirty.bacteriological.total_coliforms = 12.0;

    c.bench_function("evaluate_single_parameter", |b| {
        b.iter(|| evaluate(black_box("lead"), black_box(0.02)))
    });

    c.bench_function("classify_clean_sample", |b| {
        b.iter(|| classify(&registry, black_box(&clean), CriticalityPolicy::default()))
    });

    c.bench_function("classify_and_derive_alerts", |b| {
        b.iter(|| {
            let out = classify(&registry, black_box(&dirty), CriticalityPolicy::default());
            derive_alerts(&out, &registry)
        })
    });
}

criterion_group!(benches, bench_classification);
criterion_main!(benches);
