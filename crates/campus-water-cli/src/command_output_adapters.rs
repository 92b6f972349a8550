use campus_water_core::canonical;
use serde_json::Value;

use crate::{CliError, OutputMode};

/// `--json` prints one canonical (key-sorted) line; otherwise pretty JSON.
pub(crate) fn emit_ok(output_mode: OutputMode, payload: &Value) -> Result<(), CliError> {
    let text = if output_mode.json {
        canonical::to_compact(payload).map_err(|e| CliError::internal(e.to_string()))?
    } else {
        serde_json::to_string_pretty(payload).map_err(|e| CliError::internal(e.to_string()))?
    };
    println!("{text}");
    Ok(())
}

pub(crate) fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("error: {}", error.machine);
    }
}

pub(crate) fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, CliError> {
    serde_json::to_value(value).map_err(|e| CliError::internal(e.to_string()))
}
