// SPDX-License-Identifier: Apache-2.0

use campus_water_model::{MeasurementError, MeasurementGroup, MeasurementSet, Parameter};
use serde_json::Value;

fn fixture() -> Value {
    serde_json::from_str(include_str!("fixtures/within_limits.json")).expect("fixture json")
}

#[test]
fn complete_document_decodes_into_typed_set() {
    let set = MeasurementSet::from_json(&fixture()).expect("decode");
    assert_eq!(set.chemical.ph, 7.2);
    assert_eq!(set.bacteriological.heterotrophic_bacteria, 50.0);
    assert_eq!(set.readings().count(), 31);
    assert_eq!(set.value_of(Parameter::FreeChlorine), Some(1.0));
}

#[test]
fn readings_keep_report_order_and_group_tags() {
    let set = MeasurementSet::from_json(&fixture()).expect("decode");
    let readings: Vec<_> = set.readings().collect();
    assert_eq!(readings[0].parameter, Parameter::Turbidity);
    assert_eq!(readings[24].parameter, Parameter::TotalChlorine);
    assert_eq!(readings[25].parameter, Parameter::TotalColiforms);
    assert!(readings[..25]
        .iter()
        .all(|r| r.group == MeasurementGroup::Chemical));
    assert!(readings[25..]
        .iter()
        .all(|r| r.group == MeasurementGroup::Bacteriological));
}

#[test]
fn missing_field_is_named() {
    let mut doc = fixture();
    doc["chemical"]
        .as_object_mut()
        .expect("object")
        .remove("lead");
    let err = MeasurementSet::from_json(&doc).expect_err("must reject");
    assert_eq!(
        err,
        MeasurementError::MissingField {
            group: MeasurementGroup::Chemical,
            parameter: Parameter::Lead,
        }
    );
    assert_eq!(err.to_string(), "chemical measurements missing `lead`");
}

#[test]
fn non_numeric_value_is_rejected_at_the_boundary() {
    let mut doc = fixture();
    doc["bacteriological"]["escherichiaColi"] = Value::String("<1".to_string());
    let err = MeasurementSet::from_json(&doc).expect_err("must reject");
    assert!(matches!(
        err,
        MeasurementError::NonNumeric {
            parameter: Parameter::EscherichiaColi,
            ..
        }
    ));
}

#[test]
fn misspelled_or_misplaced_fields_are_rejected() {
    let mut doc = fixture();
    doc["chemical"]["ph"] = Value::from(7.0);
    assert!(matches!(
        MeasurementSet::from_json(&doc),
        Err(MeasurementError::UnknownField { ref field, .. }) if field == "ph"
    ));

    let mut doc = fixture();
    doc["bacteriological"]["lead"] = Value::from(0.001);
    assert!(matches!(
        MeasurementSet::from_json(&doc),
        Err(MeasurementError::UnknownField {
            group: MeasurementGroup::Bacteriological,
            ..
        })
    ));
}

#[test]
fn negative_values_are_accepted_but_nan_is_not() {
    let mut doc = fixture();
    doc["chemical"]["temperature"] = Value::from(-2.5);
    let mut set = MeasurementSet::from_json(&doc).expect("negative accepted");
    assert_eq!(set.chemical.temperature, -2.5);

    set.chemical.nitrate = f64::NAN;
    assert!(matches!(
        set.ensure_finite(),
        Err(MeasurementError::NonFinite {
            parameter: Parameter::Nitrate,
            ..
        })
    ));
}

#[test]
fn missing_group_is_reported() {
    let doc = serde_json::json!({ "chemical": fixture()["chemical"].clone() });
    assert_eq!(
        MeasurementSet::from_json(&doc),
        Err(MeasurementError::NotAnObject {
            group: MeasurementGroup::Bacteriological
        })
    );
}
