use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

use crate::parameter::{MeasurementGroup, Parameter};

/// Rejection raised while turning an untyped measurement document into a [`MeasurementSet`].
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum MeasurementError {
    NotAnObject {
        group: MeasurementGroup,
    },
    MissingField {
        group: MeasurementGroup,
        parameter: Parameter,
    },
    UnknownField {
        group: MeasurementGroup,
        field: String,
    },
    NonNumeric {
        group: MeasurementGroup,
        parameter: Parameter,
        found: String,
    },
    NonFinite {
        parameter: Parameter,
        value: f64,
    },
    Decode(String),
}

impl Display for MeasurementError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject { group } => write!(f, "{group} measurements must be a JSON object"),
            Self::MissingField { group, parameter } => {
                write!(f, "{group} measurements missing `{parameter}`")
            }
            Self::UnknownField { group, field } => {
                write!(f, "{group} measurements contain unknown field `{field}`")
            }
            Self::NonNumeric {
                group,
                parameter,
                found,
            } => write!(f, "{group} measurement `{parameter}` must be numeric, found {found}"),
            Self::NonFinite { parameter, value } => {
                write!(f, "measurement `{parameter}` must be finite, found {value}")
            }
            Self::Decode(message) => write!(f, "measurement decode failed: {message}"),
        }
    }
}

impl std::error::Error for MeasurementError {}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChemicalParameters {
    // physical
    pub turbidity: f64,
    pub color: f64,
    pub odor: f64,
    pub taste: f64,
    pub temperature: f64,
    // basic chemistry
    #[serde(rename = "pH")]
    pub ph: f64,
    pub conductivity: f64,
    pub total_dissolved_solids: f64,
    pub total_hardness: f64,
    // ions
    pub chloride: f64,
    pub sulfate: f64,
    pub nitrate: f64,
    pub nitrite: f64,
    pub ammonia: f64,
    // metals
    pub iron: f64,
    pub manganese: f64,
    pub copper: f64,
    pub zinc: f64,
    pub lead: f64,
    pub cadmium: f64,
    pub chromium: f64,
    pub mercury: f64,
    pub arsenic: f64,
    // residual disinfectant
    pub free_chlorine: f64,
    pub total_chlorine: f64,
}

impl ChemicalParameters {
    pub const LEN: usize = 25;

    #[must_use]
    pub fn entries(&self) -> [(Parameter, f64); Self::LEN] {
        [
            (Parameter::Turbidity, self.turbidity),
            (Parameter::Color, self.color),
            (Parameter::Odor, self.odor),
            (Parameter::Taste, self.taste),
            (Parameter::Temperature, self.temperature),
            (Parameter::Ph, self.ph),
            (Parameter::Conductivity, self.conductivity),
            (Parameter::TotalDissolvedSolids, self.total_dissolved_solids),
            (Parameter::TotalHardness, self.total_hardness),
            (Parameter::Chloride, self.chloride),
            (Parameter::Sulfate, self.sulfate),
            (Parameter::Nitrate, self.nitrate),
            (Parameter::Nitrite, self.nitrite),
            (Parameter::Ammonia, self.ammonia),
            (Parameter::Iron, self.iron),
            (Parameter::Manganese, self.manganese),
            (Parameter::Copper, self.copper),
            (Parameter::Zinc, self.zinc),
            (Parameter::Lead, self.lead),
            (Parameter::Cadmium, self.cadmium),
            (Parameter::Chromium, self.chromium),
            (Parameter::Mercury, self.mercury),
            (Parameter::Arsenic, self.arsenic),
            (Parameter::FreeChlorine, self.free_chlorine),
            (Parameter::TotalChlorine, self.total_chlorine),
        ]
    }

    pub fn from_json(value: &Value) -> Result<Self, MeasurementError> {
        check_group_document(MeasurementGroup::Chemical, value)?;
        serde_json::from_value(value.clone()).map_err(|e| MeasurementError::Decode(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BacteriologicalParameters {
    /// CFU/100mL
    pub total_coliforms: f64,
    /// CFU/100mL
    pub fecal_coliforms: f64,
    /// CFU/100mL
    pub escherichia_coli: f64,
    /// CFU/100mL
    pub enterococci: f64,
    /// CFU/100mL
    pub pseudomonas_aeruginosa: f64,
    /// CFU/mL
    pub heterotrophic_bacteria: f64,
}

impl BacteriologicalParameters {
    pub const LEN: usize = 6;

    #[must_use]
    pub fn entries(&self) -> [(Parameter, f64); Self::LEN] {
        [
            (Parameter::TotalColiforms, self.total_coliforms),
            (Parameter::FecalColiforms, self.fecal_coliforms),
            (Parameter::EscherichiaColi, self.escherichia_coli),
            (Parameter::Enterococci, self.enterococci),
            (Parameter::PseudomonasAeruginosa, self.pseudomonas_aeruginosa),
            (Parameter::HeterotrophicBacteria, self.heterotrophic_bacteria),
        ]
    }

    /// A clean bacteriological result: no indicator organisms, no heterotrophic growth.
    #[must_use]
    pub const fn clean() -> Self {
        Self {
            total_coliforms: 0.0,
            fecal_coliforms: 0.0,
            escherichia_coli: 0.0,
            enterococci: 0.0,
            pseudomonas_aeruginosa: 0.0,
            heterotrophic_bacteria: 0.0,
        }
    }

    pub fn from_json(value: &Value) -> Result<Self, MeasurementError> {
        check_group_document(MeasurementGroup::Bacteriological, value)?;
        serde_json::from_value(value.clone()).map_err(|e| MeasurementError::Decode(e.to_string()))
    }
}

/// One evaluated value, tagged with where it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub parameter: Parameter,
    pub group: MeasurementGroup,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeasurementSet {
    pub chemical: ChemicalParameters,
    pub bacteriological: BacteriologicalParameters,
}

impl MeasurementSet {
    /// Chemical readings first, then bacteriological, each in report order.
    pub fn readings(&self) -> impl Iterator<Item = Reading> {
        let chemical = self.chemical.entries().into_iter().map(|(parameter, value)| Reading {
            parameter,
            group: MeasurementGroup::Chemical,
            value,
        });
        let bacteriological =
            self.bacteriological
                .entries()
                .into_iter()
                .map(|(parameter, value)| Reading {
                    parameter,
                    group: MeasurementGroup::Bacteriological,
                    value,
                });
        chemical.chain(bacteriological)
    }

    #[must_use]
    pub fn value_of(&self, parameter: Parameter) -> Option<f64> {
        self.readings()
            .find(|r| r.parameter == parameter)
            .map(|r| r.value)
    }

    /// Rejects NaN and infinities; negative values are accepted as reported.
    pub fn ensure_finite(&self) -> Result<(), MeasurementError> {
        match self.readings().find(|r| !r.value.is_finite()) {
            Some(r) => Err(MeasurementError::NonFinite {
                parameter: r.parameter,
                value: r.value,
            }),
            None => Ok(()),
        }
    }

    /// Decodes `{"chemical": {...}, "bacteriological": {...}}`, reporting the first offending
    /// field instead of a generic serde message.
    pub fn from_json(value: &Value) -> Result<Self, MeasurementError> {
        let chemical = value
            .get("chemical")
            .ok_or(MeasurementError::NotAnObject {
                group: MeasurementGroup::Chemical,
            })?;
        let bacteriological =
            value
                .get("bacteriological")
                .ok_or(MeasurementError::NotAnObject {
                    group: MeasurementGroup::Bacteriological,
                })?;
        let set = Self {
            chemical: ChemicalParameters::from_json(chemical)?,
            bacteriological: BacteriologicalParameters::from_json(bacteriological)?,
        };
        set.ensure_finite()?;
        Ok(set)
    }
}

fn check_group_document(group: MeasurementGroup, value: &Value) -> Result<(), MeasurementError> {
    let obj = value
        .as_object()
        .ok_or(MeasurementError::NotAnObject { group })?;

    for key in obj.keys() {
        let known = Parameter::lookup(key).is_some_and(|p| p.group() == group);
        if !known {
            return Err(MeasurementError::UnknownField {
                group,
                field: key.clone(),
            });
        }
    }

    for parameter in Parameter::ALL.iter().copied().filter(|p| p.group() == group) {
        let Some(raw) = obj.get(parameter.as_str()) else {
            return Err(MeasurementError::MissingField { group, parameter });
        };
        let Some(number) = raw.as_f64() else {
            return Err(MeasurementError::NonNumeric {
                group,
                parameter,
                found: raw.to_string(),
            });
        };
        if !number.is_finite() {
            return Err(MeasurementError::NonFinite {
                parameter,
                value: number,
            });
        }
    }
    Ok(())
}
