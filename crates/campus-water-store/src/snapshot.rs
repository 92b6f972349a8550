use std::fs;
use std::path::Path;

use campus_water_core::canonical;
use campus_water_model::{Alert, WaterSample};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub const STATE_SCHEMA_VERSION: &str = "1";

/// Persisted samples and alerts. The faucet catalog and limits live in config, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSnapshot {
    pub schema_version: String,
    pub samples: Vec<WaterSample>,
    pub alerts: Vec<Alert>,
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self {
            schema_version: STATE_SCHEMA_VERSION.to_string(),
            samples: Vec::new(),
            alerts: Vec::new(),
        }
    }
}

impl StoreSnapshot {
    /// A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .map_err(|e| StoreError::Io(format!("read {} failed: {e}", path.display())))?;
        let snapshot: Self = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Decode(format!("state {}: {e}", path.display())))?;
        if snapshot.schema_version != STATE_SCHEMA_VERSION {
            return Err(StoreError::Decode(format!(
                "unsupported state schema version: {} (expected {STATE_SCHEMA_VERSION})",
                snapshot.schema_version
            )));
        }
        Ok(snapshot)
    }

    /// Writes canonical (key-sorted) JSON to a sibling temp file, then renames over `path`.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(format!("create {} failed: {e}", parent.display())))?;
        }
        let mut text = canonical::to_pretty(self)
            .map_err(|e| StoreError::Decode(format!("encode state failed: {e}")))?;
        text.push('\n');
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, text)
            .map_err(|e| StoreError::Io(format!("write {} failed: {e}", tmp.display())))?;
        fs::rename(&tmp, path)
            .map_err(|e| StoreError::Io(format!("rename to {} failed: {e}", path.display())))?;
        tracing::debug!(
            path = %path.display(),
            samples = self.samples.len(),
            alerts = self.alerts.len(),
            "state saved"
        );
        Ok(())
    }
}
