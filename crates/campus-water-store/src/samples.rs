use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use campus_water_model::{
    ComplianceStatus, MeasurementSet, Parameter, QualityGrade, SampleStatus, WaterSample,
};
use campus_water_policies::{classify, Classification, CriticalityPolicy, LimitsRegistry};

use crate::error::StoreError;
use crate::faucets::FaucetCatalog;
use crate::stats::{mean, percent, QualityDistribution};

pub const DEFAULT_COLLECTOR: &str = "report upload";
pub const DEFAULT_LABORATORY: &str = "lab-001";
pub const DEFAULT_COLLECTION_TIME: &str = "00:00";
pub const CORRECTIVE_ACTION_OBSERVATION: &str =
    "non-compliant sample - corrective action required";
pub const TREND_WINDOW_DAYS: i64 = 30;

/// Parameters summarised by [`SampleRepository::parameter_stats`].
pub const TRACKED_CHEMICAL_PARAMETERS: [Parameter; 6] = [
    Parameter::Ph,
    Parameter::Turbidity,
    Parameter::FreeChlorine,
    Parameter::Conductivity,
    Parameter::TotalHardness,
    Parameter::Nitrate,
];

/// Sample metadata supplied by the operator; anything left out is filled in on ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleMetadata {
    pub faucet_id: String,
    pub collection_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collected_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laboratory_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

/// Sample listing filter; unset fields match everything. Dates are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleQuery {
    pub faucet_id: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub compliance: Option<ComplianceStatus>,
}

/// A laboratory result waiting to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSubmission {
    pub metadata: SampleMetadata,
    pub measurements: MeasurementSet,
}

impl SampleSubmission {
    /// Decodes `{"metadata": {...}, "measurements": {"chemical": {...}, "bacteriological": {...}}}`.
    pub fn from_json(value: &Value) -> Result<Self, StoreError> {
        let obj = value
            .as_object()
            .ok_or_else(|| StoreError::Decode("sample submission must be a JSON object".to_string()))?;
        if let Some(extra) = obj
            .keys()
            .find(|k| k.as_str() != "metadata" && k.as_str() != "measurements")
        {
            return Err(StoreError::Decode(format!(
                "sample submission contains unknown field `{extra}`"
            )));
        }
        let metadata = obj
            .get("metadata")
            .ok_or_else(|| StoreError::Decode("sample submission missing `metadata`".to_string()))?;
        let metadata: SampleMetadata = serde_json::from_value(metadata.clone())
            .map_err(|e| StoreError::Decode(format!("sample metadata: {e}")))?;
        let measurements = obj.get("measurements").ok_or_else(|| {
            StoreError::Decode("sample submission missing `measurements`".to_string())
        })?;
        Ok(Self {
            metadata,
            measurements: MeasurementSet::from_json(measurements)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleStats {
    pub total: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    pub compliance_rate: u32,
    pub quality_distribution: QualityDistribution,
    pub this_month: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterStats {
    pub parameter: Parameter,
    pub average: f64,
    pub minimum: f64,
    pub maximum: f64,
    pub sample_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BacteriologicalStats {
    pub total: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    pub compliance_rate: u32,
    pub avg_total_coliforms: f64,
    pub avg_escherichia_coli: f64,
    /// Samples with any E. coli.
    pub contaminated: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChemicalTrendPoint {
    pub date: NaiveDate,
    pub ph: f64,
    pub turbidity: f64,
    pub free_chlorine: f64,
    pub conductivity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BacteriologicalTrendPoint {
    pub date: NaiveDate,
    pub total_coliforms: f64,
    pub fecal_coliforms: f64,
    pub escherichia_coli: f64,
    pub enterococci: f64,
    pub pseudomonas_aeruginosa: f64,
}

/// Append-only sample history, most recent collection first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleRepository {
    samples: Vec<WaterSample>,
}

impl SampleRepository {
    /// Rejects duplicate sample ids; order is restored on construction.
    pub fn new(mut samples: Vec<WaterSample>) -> Result<Self, StoreError> {
        let mut seen = std::collections::HashSet::new();
        for sample in &samples {
            if !seen.insert(sample.id.as_str()) {
                return Err(StoreError::Duplicate {
                    kind: "sample",
                    id: sample.id.clone(),
                });
            }
        }
        samples.sort_by(|a, b| b.collection_date.cmp(&a.collection_date));
        Ok(Self { samples })
    }

    /// Grades the submission and stores it.
    ///
    /// Missing metadata is generated: id `sample-<faucet>-<seq>`, code
    /// `<faucet code>-YYYYMMDD-NN`, analysis one day after collection.
    pub fn add_sample(
        &mut self,
        catalog: &FaucetCatalog,
        registry: &LimitsRegistry,
        policy: CriticalityPolicy,
        submission: SampleSubmission,
    ) -> Result<(WaterSample, Classification), StoreError> {
        let SampleSubmission {
            metadata,
            measurements,
        } = submission;
        let faucet = catalog
            .get(&metadata.faucet_id)
            .ok_or_else(|| StoreError::FaucetNotFound(metadata.faucet_id.clone()))?;
        measurements.ensure_finite()?;

        let classification = classify(registry, &measurements, policy);
        let seq = self.samples.len() + 1;
        let collection_date = metadata.collection_date;
        let id = match metadata.id {
            Some(id) => id,
            None => self.next_id(&faucet.id, seq),
        };
        if self.get(&id).is_some() {
            return Err(StoreError::Duplicate { kind: "sample", id });
        }
        let sample_code = metadata.sample_code.unwrap_or_else(|| {
            format!(
                "{}-{}-{seq:02}",
                faucet.code,
                collection_date.format("%Y%m%d")
            )
        });
        let observations = metadata.observations.or_else(|| {
            (classification.grade == QualityGrade::Unacceptable)
                .then(|| CORRECTIVE_ACTION_OBSERVATION.to_string())
        });

        let sample = WaterSample {
            id,
            sample_code,
            faucet_id: faucet.id.clone(),
            collection_date,
            collection_time: metadata
                .collection_time
                .unwrap_or_else(|| DEFAULT_COLLECTION_TIME.to_string()),
            collected_by: metadata
                .collected_by
                .unwrap_or_else(|| DEFAULT_COLLECTOR.to_string()),
            analysis_date: metadata
                .analysis_date
                .unwrap_or(collection_date + Duration::days(1)),
            laboratory_id: metadata
                .laboratory_id
                .unwrap_or_else(|| DEFAULT_LABORATORY.to_string()),
            chemical_parameters: measurements.chemical,
            bacteriological_parameters: measurements.bacteriological,
            status: SampleStatus::Completed,
            observations,
            quality_rating: classification.grade,
            compliance_status: classification.compliance_status,
        };

        // Insert after every sample collected on or after this date.
        let at = self
            .samples
            .partition_point(|s| s.collection_date >= sample.collection_date);
        self.samples.insert(at, sample.clone());
        tracing::info!(
            sample_id = %sample.id,
            faucet_id = %sample.faucet_id,
            grade = %sample.quality_rating,
            violations = classification.violations,
            critical_violations = classification.critical_violations,
            "sample stored"
        );
        Ok((sample, classification))
    }

    #[must_use]
    pub fn all(&self) -> &[WaterSample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WaterSample> {
        self.samples.iter().find(|s| s.id == id)
    }

    pub fn by_faucet<'a>(&'a self, faucet_id: &'a str) -> impl Iterator<Item = &'a WaterSample> {
        self.samples.iter().filter(move |s| s.faucet_id == faucet_id)
    }

    /// Both ends inclusive.
    pub fn by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &WaterSample> {
        self.samples
            .iter()
            .filter(move |s| s.collection_date >= start && s.collection_date <= end)
    }

    pub fn by_compliance(&self, status: ComplianceStatus) -> impl Iterator<Item = &WaterSample> {
        self.samples
            .iter()
            .filter(move |s| s.compliance_status == status)
    }

    #[must_use]
    pub fn latest_for_faucet(&self, faucet_id: &str) -> Option<&WaterSample> {
        self.samples.iter().find(|s| s.faucet_id == faucet_id)
    }

    /// Samples matching every constraint set on `query`, most recent first.
    pub fn query<'a>(&'a self, query: &'a SampleQuery) -> impl Iterator<Item = &'a WaterSample> + 'a {
        self.by_date_range(
            query.from.unwrap_or(NaiveDate::MIN),
            query.to.unwrap_or(NaiveDate::MAX),
        )
        .filter(move |s| {
            query
                .faucet_id
                .as_deref()
                .map_or(true, |f| s.faucet_id == f)
        })
        .filter(move |s| query.compliance.map_or(true, |c| s.compliance_status == c))
    }

    /// `sample-<faucet>-<seq>`, skipping any id already taken by an explicit submission.
    fn next_id(&self, faucet_id: &str, mut seq: usize) -> String {
        loop {
            let id = format!("sample-{faucet_id}-{seq:04}");
            if self.get(&id).is_none() {
                return id;
            }
            seq += 1;
        }
    }

    #[must_use]
    pub fn stats(&self, today: NaiveDate) -> SampleStats {
        let total = self.samples.len();
        let compliant = self.by_compliance(ComplianceStatus::Compliant).count();
        let month_start = today.with_day(1).unwrap_or(today);
        SampleStats {
            total,
            compliant,
            non_compliant: self.by_compliance(ComplianceStatus::NonCompliant).count(),
            compliance_rate: percent(compliant, total),
            quality_distribution: QualityDistribution::from_grades(
                self.samples.iter().map(|s| s.quality_rating),
            ),
            this_month: self
                .samples
                .iter()
                .filter(|s| s.collection_date >= month_start)
                .count(),
        }
    }

    /// One entry per tracked parameter; empty when no samples are stored.
    #[must_use]
    pub fn parameter_stats(&self) -> Vec<ParameterStats> {
        if self.samples.is_empty() {
            return Vec::new();
        }
        TRACKED_CHEMICAL_PARAMETERS
            .iter()
            .map(|&parameter| {
                let values: Vec<f64> = self
                    .samples
                    .iter()
                    .filter_map(|s| s.measurements().value_of(parameter))
                    .collect();
                ParameterStats {
                    parameter,
                    average: mean(values.iter().copied()),
                    minimum: values.iter().copied().fold(f64::INFINITY, f64::min),
                    maximum: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                    sample_count: values.len(),
                }
            })
            .collect()
    }

    #[must_use]
    pub fn bacteriological_stats(&self) -> BacteriologicalStats {
        let total = self.samples.len();
        let compliant = self.by_compliance(ComplianceStatus::Compliant).count();
        BacteriologicalStats {
            total,
            compliant,
            non_compliant: total - compliant,
            compliance_rate: percent(compliant, total),
            avg_total_coliforms: mean(
                self.samples
                    .iter()
                    .map(|s| s.bacteriological_parameters.total_coliforms),
            ),
            avg_escherichia_coli: mean(
                self.samples
                    .iter()
                    .map(|s| s.bacteriological_parameters.escherichia_coli),
            ),
            contaminated: self
                .samples
                .iter()
                .filter(|s| s.bacteriological_parameters.escherichia_coli > 0.0)
                .count(),
        }
    }

    /// Samples collected in the trend window ending `today`, oldest first.
    fn trend_window(&self, today: NaiveDate) -> impl Iterator<Item = &WaterSample> {
        let since = today - Duration::days(TREND_WINDOW_DAYS);
        self.samples
            .iter()
            .rev()
            .filter(move |s| s.collection_date >= since)
    }

    #[must_use]
    pub fn chemical_trend(&self, today: NaiveDate) -> Vec<ChemicalTrendPoint> {
        self.trend_window(today)
            .map(|s| ChemicalTrendPoint {
                date: s.collection_date,
                ph: s.chemical_parameters.ph,
                turbidity: s.chemical_parameters.turbidity,
                free_chlorine: s.chemical_parameters.free_chlorine,
                conductivity: s.chemical_parameters.conductivity,
            })
            .collect()
    }

    #[must_use]
    pub fn bacteriological_trend(&self, today: NaiveDate) -> Vec<BacteriologicalTrendPoint> {
        self.trend_window(today)
            .map(|s| {
                let b = &s.bacteriological_parameters;
                BacteriologicalTrendPoint {
                    date: s.collection_date,
                    total_coliforms: b.total_coliforms,
                    fecal_coliforms: b.fecal_coliforms,
                    escherichia_coli: b.escherichia_coli,
                    enterococci: b.enterococci,
                    pseudomonas_aeruginosa: b.pseudomonas_aeruginosa,
                }
            })
            .collect()
    }
}
