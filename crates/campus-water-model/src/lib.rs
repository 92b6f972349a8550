// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Typed water-quality model shared by the policy engine, the sample store and the CLI.
//!
//! Measurement groups are plain structs with one field per parameter. Code that needs to walk
//! a group goes through [`ChemicalParameters::entries`] / [`BacteriologicalParameters::entries`],
//! which pair every value with its [`Parameter`] identifier.

mod alert;
mod faucet;
mod grade;
mod measurements;
mod parameter;
mod sample;

pub use alert::{Alert, AlertSeverity, AlertStatus, AlertType};
pub use faucet::{Faucet, FaucetStatus, FaucetType, Location};
pub use grade::{ComplianceStatus, QualityGrade};
pub use measurements::{
    BacteriologicalParameters, ChemicalParameters, MeasurementError, MeasurementSet, Reading,
};
pub use parameter::{MeasurementGroup, Parameter, ParameterCategory, ValidationError};
pub use sample::{SampleStatus, WaterSample};

pub const CRATE_NAME: &str = "campus-water-model";
