//! Wire schema definitions for flamebearer payloads.
//!
//! Two JSON shapes are accepted:
//! - the flat shape (`names`, `levels`, `numTicks`, ... at the top level)
//! - the profile envelope (`flamebearer` + `metadata` objects)
//!
//! Both deserialize into [`RawFlamebearer`], whose levels are still
//! delta-encoded. Nothing in this module decodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field layout of the level arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// `offset, total, self, nameIndex`
    #[default]
    Single,
    /// `offsetLeft, totalLeft, selfLeft, offsetRight, totalRight, selfRight, nameIndex`
    Double,
}

impl Format {
    /// Number of values per node in a level array
    pub fn stride(self) -> usize {
        match self {
            Format::Single => 4,
            Format::Double => 7,
        }
    }

    /// Start indices of the delta-encoded `(offset, total)` pairs within a node
    pub fn delta_groups(self) -> &'static [usize] {
        match self {
            Format::Single => &[0],
            Format::Double => &[0, 3],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Format::Single => "single",
            Format::Double => "double",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What one tick of a profile measures
///
/// Unrecognised or empty unit strings deserialize to `Unknown`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum UnitKind {
    Samples,
    Objects,
    Goroutines,
    Bytes,
    LockSamples,
    LockNanoseconds,
    TraceSamples,
    Exceptions,
    #[default]
    #[serde(other)]
    Unknown,
}

impl UnitKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UnitKind::Samples => "samples",
            UnitKind::Objects => "objects",
            UnitKind::Goroutines => "goroutines",
            UnitKind::Bytes => "bytes",
            UnitKind::LockSamples => "lock_samples",
            UnitKind::LockNanoseconds => "lock_nanoseconds",
            UnitKind::TraceSamples => "trace_samples",
            UnitKind::Exceptions => "exceptions",
            UnitKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_sample_rate() -> u32 {
    100
}

/// A flamebearer exactly as received: levels are delta-encoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFlamebearer {
    pub names: Vec<String>,

    /// Delta-encoded level arrays (signed so that bad producers can be reported)
    pub levels: Vec<Vec<i64>>,

    pub num_ticks: u64,

    #[serde(default)]
    pub max_self: u64,

    #[serde(default)]
    pub format: Format,

    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    #[serde(default)]
    pub units: UnitKind,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub spy_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_ticks: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_ticks: Option<u64>,
}

/// Versioned profile envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlamebearerProfile {
    #[serde(default = "default_profile_version")]
    pub version: u32,

    pub flamebearer: FlamebearerBody,

    #[serde(default)]
    pub metadata: ProfileMetadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_ticks: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_ticks: Option<u64>,
}

fn default_profile_version() -> u32 {
    1
}

/// Tree portion of the envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlamebearerBody {
    pub names: Vec<String>,
    pub levels: Vec<Vec<i64>>,
    pub num_ticks: u64,
    #[serde(default)]
    pub max_self: u64,
}

/// Metadata portion of the envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetadata {
    #[serde(default)]
    pub format: Format,

    #[serde(default)]
    pub spy_name: String,

    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    #[serde(default)]
    pub units: UnitKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Default for ProfileMetadata {
    fn default() -> Self {
        Self {
            format: Format::Single,
            spy_name: String::new(),
            sample_rate: default_sample_rate(),
            units: UnitKind::Unknown,
            name: None,
        }
    }
}

impl From<FlamebearerProfile> for RawFlamebearer {
    fn from(profile: FlamebearerProfile) -> Self {
        let FlamebearerProfile {
            flamebearer,
            metadata,
            left_ticks,
            right_ticks,
            ..
        } = profile;

        Self {
            names: flamebearer.names,
            levels: flamebearer.levels,
            num_ticks: flamebearer.num_ticks,
            max_self: flamebearer.max_self,
            format: metadata.format,
            sample_rate: metadata.sample_rate,
            units: metadata.units,
            spy_name: metadata.spy_name,
            left_ticks,
            right_ticks,
        }
    }
}

impl From<RawFlamebearer> for FlamebearerProfile {
    fn from(raw: RawFlamebearer) -> Self {
        Self {
            version: default_profile_version(),
            flamebearer: FlamebearerBody {
                names: raw.names,
                levels: raw.levels,
                num_ticks: raw.num_ticks,
                max_self: raw.max_self,
            },
            metadata: ProfileMetadata {
                format: raw.format,
                spy_name: raw.spy_name,
                sample_rate: raw.sample_rate,
                units: raw.units,
                name: None,
            },
            left_ticks: raw.left_ticks,
            right_ticks: raw.right_ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_strides() {
        assert_eq!(Format::Single.stride(), 4);
        assert_eq!(Format::Double.stride(), 7);
        assert_eq!(Format::Double.delta_groups(), &[0, 3]);
    }

    #[test]
    fn test_unknown_units_fall_back() {
        let unit: UnitKind = serde_json::from_str("\"furlongs\"").unwrap();
        assert_eq!(unit, UnitKind::Unknown);

        let unit: UnitKind = serde_json::from_str("\"\"").unwrap();
        assert_eq!(unit, UnitKind::Unknown);

        let unit: UnitKind = serde_json::from_str("\"lock_nanoseconds\"").unwrap();
        assert_eq!(unit, UnitKind::LockNanoseconds);
    }

    #[test]
    fn test_flat_shape_defaults() {
        let raw: RawFlamebearer =
            serde_json::from_str(r#"{"names":["total"],"levels":[[0,10,10,0]],"numTicks":10}"#)
                .unwrap();
        assert_eq!(raw.format, Format::Single);
        assert_eq!(raw.sample_rate, 100);
        assert_eq!(raw.units, UnitKind::Unknown);
        assert_eq!(raw.left_ticks, None);
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        let result: Result<RawFlamebearer, _> = serde_json::from_str(
            r#"{"names":["a"],"levels":[],"numTicks":0,"format":"triple"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_envelope_converts_to_raw() {
        let json = r#"{
            "version": 1,
            "flamebearer": {"names":["total","a"],"levels":[[0,5,0,0]],"numTicks":5,"maxSelf":5},
            "metadata": {"format":"single","spyName":"gospy","sampleRate":100,"units":"samples"}
        }"#;
        let profile: FlamebearerProfile = serde_json::from_str(json).unwrap();
        let raw = RawFlamebearer::from(profile);

        assert_eq!(raw.spy_name, "gospy");
        assert_eq!(raw.units, UnitKind::Samples);
        assert_eq!(raw.max_self, 5);
    }
}
