//! Key-sorted JSON used for `--json` output, persisted state and limits fingerprints.
//!
//! Two documents that differ only in object key order encode to the same bytes, so the
//! fingerprint of a limits table does not depend on how its file was written.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Rebuilds every object with its keys in byte order; arrays keep their order.
fn sorted(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sorted(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sorted).collect()),
        scalar => scalar,
    }
}

fn canonical_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, serde_json::Error> {
    serde_json::to_value(value).map(sorted)
}

/// Single-line canonical encoding.
pub fn to_compact<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(&canonical_value(value)?)
}

/// Indented canonical encoding, for files people may diff.
pub fn to_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&canonical_value(value)?)
}

/// Lowercase hex SHA-256 of the compact canonical encoding.
pub fn fingerprint<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let digest = Sha256::digest(to_compact(value)?.as_bytes());
    Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
}
