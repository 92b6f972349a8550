// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! In-memory campus sample store: faucet catalog, graded sample history, alert lifecycle and
//! the dashboard/report aggregates computed over them.
//!
//! Nothing here reads the clock; callers pass `today` / `now` explicitly.

mod alerts;
mod error;
mod faucets;
mod report;
mod samples;
mod snapshot;
mod stats;
mod store;

pub use alerts::{AlertBoard, AlertQuery, AlertStats, AlertTypeCounts, SeverityCounts};
pub use error::StoreError;
pub use faucets::{
    faucet_catalog_path, FaucetCatalog, FaucetCatalogDocument, FaucetQuery, FaucetStats,
    FAUCET_CATALOG_SCHEMA_VERSION,
};
pub use report::{DashboardStats, QualityReport, ReportPeriod, TARGET_COMPLIANCE_RATE};
pub use samples::{
    BacteriologicalStats, BacteriologicalTrendPoint, ChemicalTrendPoint, ParameterStats,
    SampleMetadata, SampleQuery, SampleRepository, SampleStats, SampleSubmission, CORRECTIVE_ACTION_OBSERVATION,
    DEFAULT_COLLECTION_TIME, DEFAULT_COLLECTOR, DEFAULT_LABORATORY, TRACKED_CHEMICAL_PARAMETERS,
    TREND_WINDOW_DAYS,
};
pub use snapshot::{StoreSnapshot, STATE_SCHEMA_VERSION};
pub use stats::{percent, QualityDistribution};
pub use store::{CampusStore, IngestOutcome};

pub const CRATE_NAME: &str = "campus-water-store";
