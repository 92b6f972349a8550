use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Sample-level quality grade.
///
/// Variants are declared worst-first so the derived ordering reads naturally:
/// `Excellent > Good > Acceptable > Poor > Unacceptable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityGrade {
    Unacceptable,
    Poor,
    Acceptable,
    Good,
    Excellent,
}

impl QualityGrade {
    /// Best to worst.
    pub const ALL: [Self; 5] = [
        Self::Excellent,
        Self::Good,
        Self::Acceptable,
        Self::Poor,
        Self::Unacceptable,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Acceptable => "acceptable",
            Self::Poor => "poor",
            Self::Unacceptable => "unacceptable",
        }
    }
}

impl Display for QualityGrade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
    Pending,
}

impl ComplianceStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::NonCompliant => "non_compliant",
            Self::Pending => "pending",
        }
    }
}

impl Display for ComplianceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
