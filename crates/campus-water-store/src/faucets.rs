use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use campus_water_model::{Faucet, FaucetStatus, FaucetType};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::stats::percent;

const FAUCET_CATALOG_PATH: &str = "faucets/catalog.json";
pub const FAUCET_CATALOG_SCHEMA_VERSION: &str = "1";

/// Catalog file under a config directory (`<config_dir>/faucets/catalog.json`).
#[must_use]
pub fn faucet_catalog_path(config_dir: &Path) -> PathBuf {
    config_dir.join(FAUCET_CATALOG_PATH)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaucetCatalogDocument {
    pub schema_version: String,
    pub faucets: Vec<Faucet>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FaucetStats {
    pub total: usize,
    pub active: usize,
    pub out_of_service: usize,
    pub maintenance: usize,
    pub active_percentage: u32,
}

/// Catalog listing filter; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaucetQuery {
    pub status: Option<FaucetStatus>,
    pub building: Option<String>,
    pub faucet_type: Option<FaucetType>,
}

/// The sampling points known to the campus, in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaucetCatalog {
    faucets: Vec<Faucet>,
}

impl FaucetCatalog {
    /// Rejects duplicate faucet ids and codes.
    pub fn new(faucets: Vec<Faucet>) -> Result<Self, StoreError> {
        let mut ids = HashSet::new();
        let mut codes = HashSet::new();
        for faucet in &faucets {
            if !ids.insert(faucet.id.as_str()) {
                return Err(StoreError::Duplicate {
                    kind: "faucet",
                    id: faucet.id.clone(),
                });
            }
            if !codes.insert(faucet.code.as_str()) {
                return Err(StoreError::Duplicate {
                    kind: "faucet code",
                    id: faucet.code.clone(),
                });
            }
        }
        Ok(Self { faucets })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, StoreError> {
        let doc: FaucetCatalogDocument = serde_json::from_str(raw)
            .map_err(|e| StoreError::Decode(format!("faucet catalog: {e}")))?;
        if doc.schema_version != FAUCET_CATALOG_SCHEMA_VERSION {
            return Err(StoreError::Decode(format!(
                "unsupported faucet catalog schema version: {} (expected {FAUCET_CATALOG_SCHEMA_VERSION})",
                doc.schema_version
            )));
        }
        Self::new(doc.faucets)
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| StoreError::Io(format!("read {} failed: {e}", path.display())))?;
        let catalog = Self::from_json_str(&raw)?;
        tracing::debug!(path = %path.display(), faucets = catalog.len(), "faucet catalog loaded");
        Ok(catalog)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Faucet> {
        self.faucets.iter().find(|f| f.id == id)
    }

    #[must_use]
    pub fn all(&self) -> &[Faucet] {
        &self.faucets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.faucets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faucets.is_empty()
    }

    pub fn by_status(&self, status: FaucetStatus) -> impl Iterator<Item = &Faucet> {
        self.faucets.iter().filter(move |f| f.status == status)
    }

    /// Exact, case-sensitive building name match.
    pub fn by_building<'a>(&'a self, building: &'a str) -> impl Iterator<Item = &'a Faucet> {
        self.faucets
            .iter()
            .filter(move |f| f.location.building == building)
    }

    pub fn by_type(&self, faucet_type: FaucetType) -> impl Iterator<Item = &Faucet> {
        self.faucets
            .iter()
            .filter(move |f| f.faucet_type == faucet_type)
    }

    /// Faucets matching every constraint set on `query`, in catalog order.
    pub fn query<'a>(&'a self, query: &'a FaucetQuery) -> impl Iterator<Item = &'a Faucet> + 'a {
        self.faucets
            .iter()
            .filter(move |f| query.status.map_or(true, |s| f.status == s))
            .filter(move |f| {
                query
                    .building
                    .as_deref()
                    .map_or(true, |b| f.location.building == b)
            })
            .filter(move |f| query.faucet_type.map_or(true, |t| f.faucet_type == t))
    }

    #[must_use]
    pub fn buildings(&self) -> BTreeSet<&str> {
        self.faucets
            .iter()
            .map(|f| f.location.building.as_str())
            .collect()
    }

    #[must_use]
    pub fn stats(&self) -> FaucetStats {
        let active = self.by_status(FaucetStatus::Active).count();
        FaucetStats {
            total: self.faucets.len(),
            active,
            out_of_service: self.by_status(FaucetStatus::OutOfService).count(),
            maintenance: self.by_status(FaucetStatus::Maintenance).count(),
            active_percentage: percent(active, self.faucets.len()),
        }
    }
}
