//! Flamebearer wire format.
//!
//! This module handles:
//! - Deserializing flat and enveloped payloads
//! - Validating strides, signs and name indices
//! - Delta decoding into an immutable [`Flamebearer`]
//! - Re-encoding for producers

pub mod decode;
pub mod schema;

// Re-export main types
pub use decode::{
    decode_flamebearer, decode_levels, encode_levels, parse_flamebearer, parse_raw,
    read_flamebearer, validate, Flamebearer,
};
pub use schema::{FlamebearerProfile, Format, ProfileMetadata, RawFlamebearer, UnitKind};
