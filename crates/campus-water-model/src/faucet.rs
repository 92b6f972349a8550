use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub building: String,
    pub floor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaucetType {
    DrinkingFountain,
    Tap,
    WaterCooler,
}

impl FaucetType {
    pub const ALL: [Self; 3] = [Self::DrinkingFountain, Self::Tap, Self::WaterCooler];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DrinkingFountain => "drinking_fountain",
            Self::Tap => "tap",
            Self::WaterCooler => "water_cooler",
        }
    }
}

impl Display for FaucetType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaucetStatus {
    Active,
    OutOfService,
    Maintenance,
}

impl FaucetStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::OutOfService, Self::Maintenance];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OutOfService => "out_of_service",
            Self::Maintenance => "maintenance",
        }
    }
}

impl Display for FaucetStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sampling point on campus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Faucet {
    pub id: String,
    pub code: String,
    pub name: String,
    pub location: Location,
    #[serde(rename = "type")]
    pub faucet_type: FaucetType,
    pub status: FaucetStatus,
    pub installation_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_maintenance: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_maintenance: Option<NaiveDate>,
}
