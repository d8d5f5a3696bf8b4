//! Human-readable formatting of tick values.
//!
//! A formatter is chosen once per profile from its largest value, so every
//! value rendered in one pass shares the same scale and suffix.

use super::numbers::{finite_or_zero, trim_precise};
use crate::codec::UnitKind;
use log::warn;

const TIME_LADDER: &[(f64, &str)] = &[
    (60.0, "minute"),
    (60.0, "hour"),
    (24.0, "day"),
    (30.0, "month"),
    (12.0, "year"),
];

const SUBSECOND_LADDER: &[(f64, &str)] = &[
    (1000.0, "ms"),
    (1000.0, "second"),
    (60.0, "minute"),
    (60.0, "hour"),
    (24.0, "day"),
    (30.0, "month"),
    (12.0, "year"),
];

const OBJECT_SUFFIXES: &[&str] = &["", "K", "M", "G", "T", "P"];
const BYTE_SUFFIXES: &[&str] = &["bytes", "KB", "MB", "GB", "TB", "PB"];

const NANOS_PER_SECOND: f64 = 1e9;
const MICROS_PER_SECOND: f64 = 1e6;

/// Time formatter working on a ladder of units
#[derive(Debug, Clone, PartialEq)]
pub struct DurationFormatter {
    /// Seconds are multiplied by this to reach the ladder's base unit
    base: f64,
    divider: f64,
    suffix: &'static str,
}

impl DurationFormatter {
    /// Ladder starting at seconds
    pub fn new(max_seconds: f64) -> Self {
        Self::with_ladder(max_seconds, 1.0, "second", TIME_LADDER)
    }

    /// Ladder starting at microseconds
    pub fn subsecond(max_seconds: f64) -> Self {
        Self::with_ladder(max_seconds, MICROS_PER_SECOND, "μs", SUBSECOND_LADDER)
    }

    fn with_ladder(
        max_seconds: f64,
        base: f64,
        base_suffix: &'static str,
        ladder: &[(f64, &'static str)],
    ) -> Self {
        let mut remaining = finite_or_zero(max_seconds * base);
        let mut divider = 1.0;
        let mut suffix = base_suffix;

        for &(step, name) in ladder {
            if remaining < step {
                break;
            }
            remaining /= step;
            divider *= step;
            suffix = name;
        }

        Self { base, divider, suffix }
    }

    pub fn suffix(&self) -> &'static str {
        self.suffix
    }

    fn scaled(&self, seconds: f64) -> f64 {
        finite_or_zero(seconds * self.base / self.divider)
    }

    fn format_seconds(&self, seconds: f64) -> String {
        let n = self.scaled(seconds);
        if n != 0.0 && n.abs() < 0.01 {
            format!("< 0.01 {}", plural(self.suffix, 0.01))
        } else {
            format!("{:.2} {}", n, plural(self.suffix, n))
        }
    }

    fn format_seconds_precise(&self, seconds: f64) -> String {
        let n = self.scaled(seconds);
        format!("{} {}", trim_precise(n), plural(self.suffix, n))
    }
}

/// Count formatter scaling by a fixed base (1000 for objects, 1024 for bytes)
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledFormatter {
    divider: f64,
    suffix: &'static str,
}

impl ScaledFormatter {
    pub fn objects(max_value: f64) -> Self {
        Self::with_base(max_value, 1000.0, OBJECT_SUFFIXES)
    }

    pub fn bytes(max_value: f64) -> Self {
        Self::with_base(max_value, 1024.0, BYTE_SUFFIXES)
    }

    fn with_base(max_value: f64, base: f64, suffixes: &[&'static str]) -> Self {
        let mut remaining = finite_or_zero(max_value);
        let mut divider = 1.0;
        let mut index = 0;

        while remaining >= base && index + 1 < suffixes.len() {
            remaining /= base;
            divider *= base;
            index += 1;
        }

        Self {
            divider,
            suffix: suffixes[index],
        }
    }

    pub fn suffix(&self) -> &'static str {
        self.suffix
    }

    fn scaled(&self, value: f64) -> f64 {
        finite_or_zero(value / self.divider)
    }

    fn format_value(&self, value: f64) -> String {
        let n = self.scaled(value);
        if n != 0.0 && n.abs() < 0.01 {
            format!("< 0.01 {}", self.suffix)
        } else {
            format!("{:.2} {}", n, self.suffix)
        }
    }

    fn format_value_precise(&self, value: f64) -> String {
        format!("{} {}", trim_precise(self.scaled(value)), self.suffix)
    }
}

/// Formatter selected for one profile
#[derive(Debug, Clone, PartialEq)]
pub enum Formatter {
    /// Values are samples taken at `sample_rate` per second
    Duration(DurationFormatter),
    /// Values are nanoseconds; the sample rate is ignored
    Nanoseconds(DurationFormatter),
    Objects(ScaledFormatter),
    Bytes(ScaledFormatter),
}

impl Formatter {
    /// Format with two decimals
    pub fn format(&self, value: f64, sample_rate: u32) -> String {
        match self {
            Formatter::Duration(f) => f.format_seconds(value / sample_rate as f64),
            Formatter::Nanoseconds(f) => f.format_seconds(value / NANOS_PER_SECOND),
            Formatter::Objects(f) | Formatter::Bytes(f) => f.format_value(value),
        }
    }

    /// Format with up to five decimals, trailing zeros removed
    pub fn format_precise(&self, value: f64, sample_rate: u32) -> String {
        match self {
            Formatter::Duration(f) => f.format_seconds_precise(value / sample_rate as f64),
            Formatter::Nanoseconds(f) => f.format_seconds_precise(value / NANOS_PER_SECOND),
            Formatter::Objects(f) | Formatter::Bytes(f) => f.format_value_precise(value),
        }
    }

    /// Unit label shared by every value this formatter produces
    pub fn suffix(&self) -> &'static str {
        match self {
            Formatter::Duration(f) | Formatter::Nanoseconds(f) => f.suffix(),
            Formatter::Objects(f) | Formatter::Bytes(f) => f.suffix(),
        }
    }
}

/// Choose a formatter from the largest value of a profile
///
/// **Public** - call once per profile, not per value
///
/// # Arguments
/// * `max_value` - largest value that will be formatted (usually `numTicks`)
/// * `sample_rate` - samples per second, used by time-like units
/// * `unit` - what a tick measures
pub fn get_formatter(max_value: f64, sample_rate: u32, unit: UnitKind) -> Formatter {
    let max_seconds = max_value / sample_rate as f64;

    match unit {
        UnitKind::Samples => Formatter::Duration(DurationFormatter::new(max_seconds)),
        UnitKind::TraceSamples => Formatter::Duration(DurationFormatter::subsecond(max_seconds)),
        UnitKind::LockNanoseconds => {
            Formatter::Nanoseconds(DurationFormatter::new(max_value / NANOS_PER_SECOND))
        }
        UnitKind::Objects
        | UnitKind::Goroutines
        | UnitKind::LockSamples
        | UnitKind::Exceptions => Formatter::Objects(ScaledFormatter::objects(max_value)),
        UnitKind::Bytes => Formatter::Bytes(ScaledFormatter::bytes(max_value)),
        UnitKind::Unknown => {
            warn!("Unknown unit kind, formatting values as durations");
            Formatter::Duration(DurationFormatter::new(max_seconds))
        }
    }
}

fn plural(suffix: &str, n: f64) -> String {
    if n == 1.0 || suffix.ends_with('s') {
        suffix.to_string()
    } else {
        format!("{}s", suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_seconds() {
        let f = get_formatter(100.0, 100, UnitKind::Samples);
        assert_eq!(f.format(0.001, 100), "< 0.01 seconds");
        assert_eq!(f.format(100.0, 100), "1.00 second");
        assert_eq!(f.format(2000.0, 100), "20.00 seconds");
        assert_eq!(f.format(0.0, 100), "0.00 seconds");
    }

    #[test]
    fn test_duration_minutes() {
        let f = get_formatter(160.0, 2, UnitKind::Samples);
        assert_eq!(f.suffix(), "minute");
        assert_eq!(f.format(6000.0, 100), "1.00 minute");
        assert_eq!(f.format(100.0, 100), "0.02 minutes");
        assert_eq!(f.format(0.001, 100), "< 0.01 minutes");
    }

    #[test]
    fn test_duration_hours_and_days() {
        let f = get_formatter(8000.0, 2, UnitKind::Samples);
        assert_eq!(f.format(720_000.0, 100), "2.00 hours");

        let f = get_formatter(160_000.0, 1, UnitKind::Samples);
        assert_eq!(f.suffix(), "day");
        assert_eq!(f.format(8_640_000.0, 100), "1.00 day");
    }

    #[test]
    fn test_duration_precise() {
        let f = get_formatter(100.0, 100, UnitKind::Samples);
        assert_eq!(f.format_precise(0.001, 100), "0.00001 seconds");
        assert_eq!(f.format_precise(100.0, 100), "1 second");

        let f = get_formatter(160.0, 2, UnitKind::Samples);
        assert_eq!(f.format_precise(1.0, 100), "0.00017 minutes");
    }

    #[test]
    fn test_trace_samples_subsecond() {
        let f = get_formatter(10.0, 100, UnitKind::TraceSamples);
        assert_eq!(f.suffix(), "ms");
        assert_eq!(f.format(55.0, 100), "550.00 ms");
        assert_eq!(f.format(100.0, 100), "1000.00 ms");
        assert_eq!(f.format(0.0, 100), "0.00 ms");

        let f = get_formatter(0.01, 100, UnitKind::TraceSamples);
        assert_eq!(f.suffix(), "μs");
        assert_eq!(f.format(0.01, 100), "100.00 μs");
    }

    #[test]
    fn test_objects_scale_from_max() {
        let f = get_formatter(747_270.0, 100, UnitKind::Objects);
        assert_eq!(f.format(747_270.0, 100), "747.27 K");
        assert_eq!(f.format(65_536.0, 100), "65.54 K");
        assert_eq!(f.format(1.0, 100), "< 0.01 K");
        assert_eq!(f.format_precise(1.0, 100), "0.001 K");
    }

    #[test]
    fn test_objects_without_scale() {
        let f = get_formatter(1.0, 100, UnitKind::Objects);
        assert_eq!(f.format(-1.0, 100), "-1.00 ");
        assert_eq!(f.format(0.0, 100), "0.00 ");
    }

    #[test]
    fn test_goroutines_use_objects() {
        let f = get_formatter(20_000_000.0, 100, UnitKind::Goroutines);
        assert_eq!(f.format(20_000_000.0, 100), "20.00 M");
    }

    #[test]
    fn test_bytes_scale_from_max() {
        let f = get_formatter(338_855_357.0, 100, UnitKind::Bytes);
        assert_eq!(f.format(269_094_260.0, 100), "256.63 MB");

        let f = get_formatter(33_261_774_660.0, 100, UnitKind::Bytes);
        assert_eq!(f.format(2_369_569_091.0, 100), "2.21 GB");

        let f = get_formatter(1.0, 100, UnitKind::Bytes);
        assert_eq!(f.format(-1.0, 100), "-1.00 bytes");
        assert_eq!(f.format_precise(1.0, 100), "1 bytes");
    }

    #[test]
    fn test_lock_nanoseconds() {
        let f = get_formatter(60_000_000_000.0, 100, UnitKind::LockNanoseconds);
        assert_eq!(f.suffix(), "minute");
        assert_eq!(f.format(60_000_000_000.0, 100), "1.00 minute");

        let f = get_formatter(1_000_000_000.0, 100, UnitKind::LockNanoseconds);
        assert_eq!(f.format(2_000_000_000.0, 0), "2.00 seconds");
    }

    #[test]
    fn test_unknown_unit_defaults_to_duration() {
        let f = get_formatter(100.0, 100, UnitKind::Unknown);
        assert!(matches!(f, Formatter::Duration(_)));
        assert_eq!(f.format(100.0, 100), "1.00 second");
    }

    #[test]
    fn test_zero_sample_rate_does_not_leak_nan() {
        let f = get_formatter(100.0, 0, UnitKind::Samples);
        assert_eq!(f.format(50.0, 0), "0.00 seconds");
    }
}
