use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::grade::{ComplianceStatus, QualityGrade};
use crate::measurements::{BacteriologicalParameters, ChemicalParameters, MeasurementSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleStatus {
    Pending,
    InAnalysis,
    Completed,
    Rejected,
}

/// A laboratory-analysed sample. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaterSample {
    pub id: String,
    pub sample_code: String,
    pub faucet_id: String,
    pub collection_date: NaiveDate,
    pub collection_time: String,
    pub collected_by: String,
    pub analysis_date: NaiveDate,
    pub laboratory_id: String,
    pub chemical_parameters: ChemicalParameters,
    pub bacteriological_parameters: BacteriologicalParameters,
    pub status: SampleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    pub quality_rating: QualityGrade,
    pub compliance_status: ComplianceStatus,
}

impl WaterSample {
    #[must_use]
    pub fn measurements(&self) -> MeasurementSet {
        MeasurementSet {
            chemical: self.chemical_parameters,
            bacteriological: self.bacteriological_parameters,
        }
    }
}
