use chrono::{DateTime, Utc};

use campus_water_model::{Alert, WaterSample};
use campus_water_policies::{derive_alerts, Classification, CriticalityPolicy, LimitsRegistry};

use crate::alerts::AlertBoard;
use crate::error::StoreError;
use crate::faucets::FaucetCatalog;
use crate::report::{DashboardStats, QualityReport, ReportPeriod};
use crate::samples::{SampleRepository, SampleSubmission};
use crate::snapshot::{StoreSnapshot, STATE_SCHEMA_VERSION};

/// Result of ingesting one laboratory report.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    pub sample: WaterSample,
    pub classification: Classification,
    pub alerts: Vec<Alert>,
}

/// Catalog, limits, samples and alerts behind one single-writer API.
#[derive(Debug, Clone)]
pub struct CampusStore {
    catalog: FaucetCatalog,
    registry: LimitsRegistry,
    policy: CriticalityPolicy,
    samples: SampleRepository,
    alerts: AlertBoard,
}

impl CampusStore {
    #[must_use]
    pub fn new(catalog: FaucetCatalog, registry: LimitsRegistry, policy: CriticalityPolicy) -> Self {
        Self {
            catalog,
            registry,
            policy,
            samples: SampleRepository::default(),
            alerts: AlertBoard::default(),
        }
    }

    /// Restores samples and alerts; every sample must reference a catalog faucet.
    pub fn with_snapshot(mut self, snapshot: StoreSnapshot) -> Result<Self, StoreError> {
        if let Some(orphan) = snapshot
            .samples
            .iter()
            .find(|s| self.catalog.get(&s.faucet_id).is_none())
        {
            return Err(StoreError::FaucetNotFound(orphan.faucet_id.clone()));
        }
        self.samples = SampleRepository::new(snapshot.samples)?;
        self.alerts = AlertBoard::new(snapshot.alerts)?;
        Ok(self)
    }

    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            schema_version: STATE_SCHEMA_VERSION.to_string(),
            samples: self.samples.all().to_vec(),
            alerts: self.alerts.all().to_vec(),
        }
    }

    /// Stores the sample, then raises one alert per limit violation.
    pub fn ingest(
        &mut self,
        submission: SampleSubmission,
        now: DateTime<Utc>,
    ) -> Result<IngestOutcome, StoreError> {
        let (sample, classification) =
            self.samples
                .add_sample(&self.catalog, &self.registry, self.policy, submission)?;
        let drafts = derive_alerts(&classification, &self.registry);
        let alerts = self.alerts.raise(drafts, &sample.faucet_id, &sample.id, now);
        Ok(IngestOutcome {
            sample,
            classification,
            alerts,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &FaucetCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn registry(&self) -> &LimitsRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn policy(&self) -> CriticalityPolicy {
        self.policy
    }

    #[must_use]
    pub fn samples(&self) -> &SampleRepository {
        &self.samples
    }

    #[must_use]
    pub fn alerts(&self) -> &AlertBoard {
        &self.alerts
    }

    pub fn alerts_mut(&mut self) -> &mut AlertBoard {
        &mut self.alerts
    }

    #[must_use]
    pub fn dashboard(&self, now: DateTime<Utc>) -> DashboardStats {
        DashboardStats::compute(&self.catalog, &self.samples, &self.alerts, now)
    }

    #[must_use]
    pub fn report(&self, period: ReportPeriod, now: DateTime<Utc>) -> QualityReport {
        QualityReport::build(period, &self.samples, &self.alerts, now)
    }
}
