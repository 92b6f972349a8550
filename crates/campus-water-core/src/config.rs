use std::path::{Path, PathBuf};

use crate::{ENV_WATER_CONFIG_DIR, ENV_WATER_LIMITS_PATH};

const LIMITS_FILE: &str = "limits/limits.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigPathScope {
    User,
    Workspace,
}

/// Directory holding the `limits/` and `faucets/` documents.
#[must_use]
pub fn resolve_config_dir(scope: ConfigPathScope, workspace_root: &Path) -> PathBuf {
    if let Some(explicit) = non_empty_env(ENV_WATER_CONFIG_DIR) {
        return PathBuf::from(explicit);
    }
    match scope {
        ConfigPathScope::User => {
            if let Some(xdg_config_home) = non_empty_env("XDG_CONFIG_HOME") {
                return PathBuf::from(xdg_config_home).join("campus-water");
            }
            if let Some(home) = non_empty_env("HOME") {
                return PathBuf::from(home).join(".config").join("campus-water");
            }
            workspace_root.join("configs")
        }
        ConfigPathScope::Workspace => workspace_root.join("configs"),
    }
}

/// `WATER_LIMITS_PATH` wins over the limits document under the config dir.
#[must_use]
pub fn resolve_limits_path(scope: ConfigPathScope, workspace_root: &Path) -> PathBuf {
    if let Some(explicit) = non_empty_env(ENV_WATER_LIMITS_PATH) {
        return PathBuf::from(explicit);
    }
    resolve_config_dir(scope, workspace_root).join(LIMITS_FILE)
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
