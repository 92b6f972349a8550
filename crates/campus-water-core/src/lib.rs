// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod canonical;
mod config;
mod errors;

pub use config::{resolve_config_dir, resolve_limits_path, ConfigPathScope};
pub use errors::{ExitCode, MachineError};

pub const CRATE_NAME: &str = "campus-water-core";

pub const ENV_WATER_LOG_LEVEL: &str = "WATER_LOG_LEVEL";
pub const ENV_WATER_LOG_JSON: &str = "WATER_LOG_JSON";
pub const ENV_WATER_CONFIG_DIR: &str = "WATER_CONFIG_DIR";
pub const ENV_WATER_LIMITS_PATH: &str = "WATER_LIMITS_PATH";
