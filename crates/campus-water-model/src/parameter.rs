use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

/// Regulatory grouping of a parameter. Informational only; evaluation never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterCategory {
    Physical,
    Chemical,
    Bacteriological,
}

impl ParameterCategory {
    pub const ALL: [Self; 3] = [Self::Physical, Self::Chemical, Self::Bacteriological];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Chemical => "chemical",
            Self::Bacteriological => "bacteriological",
        }
    }
}

impl Display for ParameterCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| ValidationError(format!("unknown parameter category: {s}")))
    }
}

/// Which half of a sample a value was reported in. Physical parameters are reported with the
/// chemical group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementGroup {
    Chemical,
    Bacteriological,
}

impl MeasurementGroup {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chemical => "chemical",
            Self::Bacteriological => "bacteriological",
        }
    }
}

impl Display for MeasurementGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! parameters {
    ($( $variant:ident => $key:literal, $group:ident; )*) => {
        /// Every parameter a laboratory report carries.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum Parameter {
            $(
                #[serde(rename = $key)]
                $variant,
            )*
        }

        impl Parameter {
            pub const ALL: &'static [Parameter] = &[$(Parameter::$variant,)*];

            /// Registry key, identical to the field name used in measurement documents.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)*
                }
            }

            #[must_use]
            pub const fn group(self) -> MeasurementGroup {
                match self {
                    $(Self::$variant => MeasurementGroup::$group,)*
                }
            }
        }
    };
}

parameters! {
    Turbidity => "turbidity", Chemical;
    Color => "color", Chemical;
    Odor => "odor", Chemical;
    Taste => "taste", Chemical;
    Temperature => "temperature", Chemical;
    Ph => "pH", Chemical;
    Conductivity => "conductivity", Chemical;
    TotalDissolvedSolids => "totalDissolvedSolids", Chemical;
    TotalHardness => "totalHardness", Chemical;
    Chloride => "chloride", Chemical;
    Sulfate => "sulfate", Chemical;
    Nitrate => "nitrate", Chemical;
    Nitrite => "nitrite", Chemical;
    Ammonia => "ammonia", Chemical;
    Iron => "iron", Chemical;
    Manganese => "manganese", Chemical;
    Copper => "copper", Chemical;
    Zinc => "zinc", Chemical;
    Lead => "lead", Chemical;
    Cadmium => "cadmium", Chemical;
    Chromium => "chromium", Chemical;
    Mercury => "mercury", Chemical;
    Arsenic => "arsenic", Chemical;
    FreeChlorine => "freeChlorine", Chemical;
    TotalChlorine => "totalChlorine", Chemical;
    TotalColiforms => "totalColiforms", Bacteriological;
    FecalColiforms => "fecalColiforms", Bacteriological;
    EscherichiaColi => "escherichiaColi", Bacteriological;
    Enterococci => "enterococci", Bacteriological;
    PseudomonasAeruginosa => "pseudomonasAeruginosa", Bacteriological;
    HeterotrophicBacteria => "heterotrophicBacteria", Bacteriological;
}

impl Parameter {
    #[must_use]
    pub fn lookup(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_str() == key)
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Parameter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s.trim()).ok_or_else(|| ValidationError(format!("unknown parameter: {s}")))
    }
}
