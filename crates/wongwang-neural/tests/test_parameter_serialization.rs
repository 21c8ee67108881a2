// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Parameter records keep the field names used by run metadata files.

use wongwang_neural::{ModelParameters, NetworkParameters, WongWangNetwork};

#[test]
fn test_serialized_names_match_metadata_keys() {
    let params = NetworkParameters::default();
    let value = serde_json::to_value(params).unwrap();
    let object = value.as_object().unwrap();

    for (name, expected) in params.named_values() {
        let actual = object
            .get(name)
            .and_then(|v| v.as_f64())
            .unwrap_or_else(|| panic!("missing key {name}"));
        assert_eq!(actual, expected, "value mismatch for {name}");
    }
}

#[test]
fn test_partial_record_fills_defaults() {
    let params: NetworkParameters =
        serde_json::from_str(r#"{"sigma": 0.04, "w_I": 0.5}"#).unwrap();
    assert_eq!(params.sigma, 0.04);
    assert_eq!(params.w_i, 0.5);
    assert_eq!(params.i0, NetworkParameters::default().i0);

    let network = WongWangNetwork::new(params).unwrap();
    assert_eq!(network.params().w_i, 0.5);
}
