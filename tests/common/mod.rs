//! Shared fixtures for integration tests.

#![allow(dead_code)]

use flamebearer_engine::codec::parse_flamebearer;
use flamebearer_engine::model::FlamebearerModel;

/// total(100) -> a(60, self 10) -> b(50, self 50); total -> c(40, self 40)
pub const SINGLE_JSON: &str = r#"{
    "names": ["total", "a", "b", "c"],
    "levels": [
        [0, 100, 0, 0],
        [0, 60, 10, 1, 0, 40, 40, 3],
        [0, 50, 50, 2]
    ],
    "numTicks": 100,
    "maxSelf": 50,
    "format": "single",
    "sampleRate": 100,
    "units": "samples",
    "spyName": "gospy"
}"#;

/// The same tree wrapped in a versioned envelope
pub const ENVELOPE_JSON: &str = r#"{
    "version": 1,
    "flamebearer": {
        "names": ["total", "a", "b", "c"],
        "levels": [
            [0, 100, 0, 0],
            [0, 60, 10, 1, 0, 40, 40, 3],
            [0, 50, 50, 2]
        ],
        "numTicks": 100,
        "maxSelf": 50
    },
    "metadata": {
        "format": "single",
        "spyName": "gospy",
        "sampleRate": 100,
        "units": "samples"
    }
}"#;

/// Baseline total(10) -> a(10); comparison total(20) -> a(15), b(5)
pub const DOUBLE_JSON: &str = r#"{
    "names": ["total", "a", "b"],
    "levels": [
        [0, 10, 0, 0, 20, 0, 0],
        [0, 10, 10, 0, 15, 15, 1, 0, 0, 0, 0, 5, 5, 2]
    ],
    "numTicks": 30,
    "maxSelf": 20,
    "format": "double",
    "sampleRate": 100,
    "units": "objects",
    "leftTicks": 10,
    "rightTicks": 20
}"#;

pub fn single_model() -> FlamebearerModel {
    FlamebearerModel::new(parse_flamebearer(SINGLE_JSON).unwrap())
}

pub fn double_model() -> FlamebearerModel {
    FlamebearerModel::new(parse_flamebearer(DOUBLE_JSON).unwrap())
}
