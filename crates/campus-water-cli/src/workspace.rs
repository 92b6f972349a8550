use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use campus_water_core::{
    resolve_config_dir, resolve_limits_path, ConfigPathScope, ENV_WATER_LIMITS_PATH,
};
use campus_water_policies::{load_registry_from_path, CriticalityPolicy, LimitsRegistry};
use campus_water_store::{faucet_catalog_path, CampusStore, FaucetCatalog, StoreSnapshot};

use crate::CliError;

const LIMITS_SCHEMA_FILE: &str = "limits.schema.json";

/// Paths and knobs resolved once per invocation: flags first, then env, then `./configs`.
pub(crate) struct Settings {
    pub(crate) config_dir: PathBuf,
    pub(crate) limits_path: PathBuf,
    /// Set when the limits path came from a flag or env var and must exist.
    pub(crate) limits_explicit: bool,
    pub(crate) policy: CriticalityPolicy,
    pub(crate) state_path: PathBuf,
    pub(crate) now: DateTime<Utc>,
}

impl Settings {
    pub(crate) fn resolve(
        config_dir: Option<PathBuf>,
        limits: Option<PathBuf>,
        policy: CriticalityPolicy,
        state_path: PathBuf,
        now: DateTime<Utc>,
    ) -> Result<Self, String> {
        let cwd = std::env::current_dir().map_err(|e| format!("resolve working directory: {e}"))?;
        let config_dir =
            config_dir.unwrap_or_else(|| resolve_config_dir(ConfigPathScope::Workspace, &cwd));
        let env_limits = std::env::var_os(ENV_WATER_LIMITS_PATH).is_some_and(|v| !v.is_empty());
        let (limits_path, limits_explicit) = match limits {
            Some(path) => (path, true),
            None if env_limits => (resolve_limits_path(ConfigPathScope::Workspace, &cwd), true),
            None => (config_dir.join("limits").join("limits.json"), false),
        };
        Ok(Self {
            config_dir,
            limits_path,
            limits_explicit,
            policy,
            state_path,
            now,
        })
    }

    /// Limits table from disk, or the built-in table when no document is configured.
    pub(crate) fn registry(&self) -> Result<LimitsRegistry, CliError> {
        if !self.limits_path.exists() {
            if self.limits_explicit {
                return Err(CliError::dependency(format!(
                    "limits table not found: {}",
                    self.limits_path.display()
                )));
            }
            tracing::debug!(path = %self.limits_path.display(), "no limits document; using built-in table");
            return Ok(LimitsRegistry::builtin().clone());
        }
        let schema = schema_beside(&self.limits_path);
        let registry = load_registry_from_path(&self.limits_path, &schema)?;
        tracing::info!(
            path = %self.limits_path.display(),
            parameters = registry.len(),
            "limits table loaded"
        );
        Ok(registry)
    }

    pub(crate) fn catalog(&self) -> Result<FaucetCatalog, CliError> {
        let path = faucet_catalog_path(&self.config_dir);
        if !path.exists() {
            return Err(CliError::dependency(format!(
                "faucet catalog not found: {}",
                path.display()
            )));
        }
        Ok(FaucetCatalog::load(&path)?)
    }

    pub(crate) fn open_store(&self) -> Result<CampusStore, CliError> {
        let store = CampusStore::new(self.catalog()?, self.registry()?, self.policy);
        let snapshot = StoreSnapshot::load(&self.state_path)?;
        Ok(store.with_snapshot(snapshot)?)
    }

    pub(crate) fn save_store(&self, store: &CampusStore) -> Result<(), CliError> {
        store.snapshot().save(&self.state_path)?;
        Ok(())
    }
}

fn schema_beside(limits_path: &Path) -> PathBuf {
    limits_path
        .parent()
        .map_or_else(|| PathBuf::from(LIMITS_SCHEMA_FILE), |p| p.join(LIMITS_SCHEMA_FILE))
}
