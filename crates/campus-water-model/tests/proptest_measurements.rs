// SPDX-License-Identifier: Apache-2.0

use campus_water_model::{MeasurementError, MeasurementSet, Parameter};
use proptest::prelude::*;
use serde_json::Value;

fn fixture() -> Value {
    serde_json::from_str(include_str!("fixtures/within_limits.json")).expect("fixture")
}

proptest! {
    #[test]
    fn any_finite_value_decodes_into_its_slot(
        index in 0..Parameter::ALL.len(),
        value in -1.0e6_f64..1.0e6,
    ) {
        let parameter = Parameter::ALL[index];
        let mut doc = fixture();
        doc[parameter.group().as_str()][parameter.as_str()] = serde_json::json!(value);
        let set = MeasurementSet::from_json(&doc).expect("decode");
        prop_assert_eq!(set.value_of(parameter), Some(value));
    }

    #[test]
    fn string_values_are_rejected_with_the_offending_parameter(
        index in 0..Parameter::ALL.len(),
        text in "[a-z]{1,8}",
    ) {
        let parameter = Parameter::ALL[index];
        let mut doc = fixture();
        doc[parameter.group().as_str()][parameter.as_str()] = Value::String(text);
        let err = MeasurementSet::from_json(&doc).expect_err("non-numeric");
        let matches = matches!(err, MeasurementError::NonNumeric { parameter: p, .. } if p == parameter);
        prop_assert!(matches);
    }

    #[test]
    fn parameter_keys_parse_back(index in 0..Parameter::ALL.len()) {
        let parameter = Parameter::ALL[index];
        prop_assert_eq!(parameter.as_str().parse::<Parameter>().ok(), Some(parameter));
    }
}
