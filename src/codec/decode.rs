//! Validation and delta decoding of flamebearer payloads.
//!
//! On the wire, each node's offset is stored relative to the end of the
//! previous node in the same level. Decoding is a running prefix sum per
//! level, applied once per `(offset, total)` group of the format:
//!
//! ```text
//! value[i] += prev
//! prev = value[i] + value[i + 1]
//! ```
//!
//! Decoding never touches its input. The result is a [`Flamebearer`], a
//! separate type from [`RawFlamebearer`], so an already decoded payload
//! cannot be fed back through the decoder.

use super::schema::{FlamebearerProfile, Format, RawFlamebearer, UnitKind};
use crate::utils::config::UNKNOWN_NAME;
use crate::utils::error::DecodeError;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// A decoded, immutable flamebearer with absolute offsets
#[derive(Debug, Clone, PartialEq)]
pub struct Flamebearer {
    names: Vec<String>,
    levels: Vec<Vec<u64>>,
    num_ticks: u64,
    max_self: u64,
    format: Format,
    sample_rate: u32,
    units: UnitKind,
    spy_name: String,
    left_ticks: Option<u64>,
    right_ticks: Option<u64>,
}

impl Flamebearer {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Absolute level arrays
    pub fn levels(&self) -> &[Vec<u64>] {
        &self.levels
    }

    pub fn num_ticks(&self) -> u64 {
        self.num_ticks
    }

    pub fn max_self(&self) -> u64 {
        self.max_self
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn units(&self) -> UnitKind {
        self.units
    }

    pub fn spy_name(&self) -> &str {
        &self.spy_name
    }

    pub fn left_ticks(&self) -> Option<u64> {
        self.left_ticks
    }

    pub fn right_ticks(&self) -> Option<u64> {
        self.right_ticks
    }

    /// True when there is nothing to draw or aggregate
    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(|level| level.is_empty()) || self.num_ticks == 0
    }

    /// Re-encode into the wire representation
    pub fn to_raw(&self) -> RawFlamebearer {
        let levels = encode_levels(&self.levels, self.format)
            .into_iter()
            .map(|level| level.into_iter().map(|v| v as i64).collect())
            .collect();

        RawFlamebearer {
            names: self.names.clone(),
            levels,
            num_ticks: self.num_ticks,
            max_self: self.max_self,
            format: self.format,
            sample_rate: self.sample_rate,
            units: self.units,
            spy_name: self.spy_name.clone(),
            left_ticks: self.left_ticks,
            right_ticks: self.right_ticks,
        }
    }
}

/// Parse a JSON payload in either the flat or the envelope shape
///
/// **Public** - main entry point for reading wire data
///
/// # Errors
/// * `DecodeError::Json` - not valid JSON, or not a flamebearer shape
pub fn parse_raw(json: &str) -> Result<RawFlamebearer, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    if value.get("flamebearer").is_some() {
        debug!("Detected profile envelope");
        let profile: FlamebearerProfile = serde_json::from_value(value)?;
        Ok(profile.into())
    } else {
        debug!("Detected flat flamebearer");
        Ok(serde_json::from_value(value)?)
    }
}

/// Parse and decode a JSON payload in one step
pub fn parse_flamebearer(json: &str) -> Result<Flamebearer, DecodeError> {
    let raw = parse_raw(json)?;
    decode_flamebearer(&raw)
}

/// Read, parse and decode a profile file
pub fn read_flamebearer(path: impl AsRef<Path>) -> Result<Flamebearer, DecodeError> {
    let path = path.as_ref();
    info!("Reading profile from: {}", path.display());

    let content = fs::read_to_string(path)?;
    parse_flamebearer(&content)
}

/// Validate and decode a raw payload
///
/// **Public** - the only constructor of [`Flamebearer`]
///
/// # Errors
/// * `DecodeError::InvalidStride` - a level is not a whole number of nodes
/// * `DecodeError::NegativeValue` - a tick field is negative
/// * `DecodeError::NameIndexOutOfRange` - a node points past `names`
/// * `DecodeError::TickOverflow` - absolute offsets or bar extents overflow `u64`
pub fn decode_flamebearer(raw: &RawFlamebearer) -> Result<Flamebearer, DecodeError> {
    validate(raw)?;

    // validate() has rejected every negative value
    let absolute: Vec<Vec<u64>> = raw
        .levels
        .iter()
        .map(|level| level.iter().map(|&v| v as u64).collect())
        .collect();
    let levels = decode_levels(&absolute, raw.format)?;

    let names = raw
        .names
        .iter()
        .map(|name| {
            if name.is_empty() {
                UNKNOWN_NAME.to_string()
            } else {
                name.clone()
            }
        })
        .collect();

    info!(
        "Decoded {} flamebearer: {} levels, {} names, {} ticks",
        raw.format,
        levels.len(),
        raw.names.len(),
        raw.num_ticks
    );

    Ok(Flamebearer {
        names,
        levels,
        num_ticks: raw.num_ticks,
        max_self: raw.max_self,
        format: raw.format,
        sample_rate: raw.sample_rate,
        units: raw.units,
        spy_name: raw.spy_name.clone(),
        left_ticks: raw.left_ticks,
        right_ticks: raw.right_ticks,
    })
}

/// Check stride, signs and name indices of every level
pub fn validate(raw: &RawFlamebearer) -> Result<(), DecodeError> {
    let stride = raw.format.stride();
    let name_field = stride - 1;

    for (level, values) in raw.levels.iter().enumerate() {
        if values.len() % stride != 0 {
            return Err(DecodeError::InvalidStride {
                level,
                len: values.len(),
                stride,
            });
        }

        for (index, &value) in values.iter().enumerate() {
            if index % stride == name_field {
                if value < 0 || value as usize >= raw.names.len() {
                    return Err(DecodeError::NameIndexOutOfRange {
                        level,
                        index: value,
                        names: raw.names.len(),
                    });
                }
            } else if value < 0 {
                return Err(DecodeError::NegativeValue { level, index, value });
            }
        }
    }

    Ok(())
}

/// Turn delta-encoded offsets into absolute offsets
///
/// Pure: returns a new set of levels and leaves `levels` untouched.
///
/// # Errors
/// * `DecodeError::TickOverflow` - an offset, an extent (`offset + total`)
///   or, for double format, a left+right bar sum does not fit in `u64`
pub fn decode_levels(levels: &[Vec<u64>], format: Format) -> Result<Vec<Vec<u64>>, DecodeError> {
    let stride = format.stride();

    levels
        .iter()
        .enumerate()
        .map(|(level_index, level)| {
            let overflow = |index: usize| DecodeError::TickOverflow {
                level: level_index,
                index,
            };

            let mut decoded = level.clone();
            for &group in format.delta_groups() {
                let mut prev = 0u64;
                let mut i = group;
                while i + 1 < decoded.len() {
                    decoded[i] = decoded[i].checked_add(prev).ok_or_else(|| overflow(i))?;
                    prev = decoded[i]
                        .checked_add(decoded[i + 1])
                        .ok_or_else(|| overflow(i + 1))?;
                    i += stride;
                }
            }

            if format == Format::Double {
                // bars span both sides: left+right offset, total and self are summed
                for (node, values) in decoded.chunks_exact(stride).enumerate() {
                    let j = node * stride;
                    [values[0], values[1], values[3], values[4]]
                        .iter()
                        .try_fold(0u64, |acc, &v| acc.checked_add(v))
                        .ok_or_else(|| overflow(j))?;
                    values[2].checked_add(values[5]).ok_or_else(|| overflow(j + 2))?;
                }
            }

            Ok(decoded)
        })
        .collect()
}

/// Inverse of [`decode_levels`]
pub fn encode_levels(levels: &[Vec<u64>], format: Format) -> Vec<Vec<u64>> {
    let stride = format.stride();

    levels
        .iter()
        .map(|level| {
            let mut encoded = level.clone();
            for &group in format.delta_groups() {
                let mut prev = 0u64;
                let mut i = group;
                while i + 1 < encoded.len() {
                    let absolute = level[i];
                    encoded[i] = absolute.saturating_sub(prev);
                    prev = absolute.saturating_add(level[i + 1]);
                    i += stride;
                }
            }
            encoded
        })
        .collect()
}
