// SPDX-License-Identifier: Apache-2.0

use campus_water_core::{ExitCode, MachineError};

#[test]
fn machine_error_serializes_details_only_when_present() {
    let bare = MachineError::new("usage_error", "missing command");
    let encoded = serde_json::to_value(&bare).expect("encode");
    assert_eq!(
        encoded,
        serde_json::json!({"code": "usage_error", "message": "missing command"})
    );

    let detailed = bare.with_detail("parameter", "pH");
    let encoded = serde_json::to_value(&detailed).expect("encode");
    assert_eq!(encoded["details"]["parameter"], "pH");
}

#[test]
fn machine_error_rejects_unknown_fields() {
    let raw = r#"{"code":"x","message":"y","extra":1}"#;
    assert!(serde_json::from_str::<MachineError>(raw).is_err());
}

#[test]
fn exit_codes_are_stable() {
    let codes: Vec<u8> = [
        ExitCode::Success,
        ExitCode::Usage,
        ExitCode::Validation,
        ExitCode::DependencyFailure,
        ExitCode::Internal,
    ]
    .into_iter()
    .map(ExitCode::code)
    .collect();
    assert_eq!(codes, vec![0, 2, 3, 4, 10]);
    assert_eq!(ExitCode::Validation.to_string(), "validation");
}

#[test]
fn machine_error_display_leads_with_the_message() {
    let err = MachineError::new("alert_not_found", "alert alert-0009 not found");
    assert_eq!(err.to_string(), "alert alert-0009 not found (alert_not_found)");
}
