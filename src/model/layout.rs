//! Per-format field accessors.
//!
//! The format of a profile is looked at exactly once, when the model picks
//! its layout. Every later field read goes through the chosen
//! [`FieldLayout`] without re-checking the format.

use crate::codec::Format;
use std::fmt;

/// Read access to the fields of one node inside a decoded level
pub trait FieldLayout: fmt::Debug + Send + Sync {
    fn format(&self) -> Format;

    /// Number of values per node, including the trailing name index
    fn j_step(&self) -> usize {
        self.format().stride()
    }

    fn offset(&self, level: &[u64], j: usize) -> u64;

    fn total(&self, level: &[u64], j: usize) -> u64;

    fn self_ticks(&self, level: &[u64], j: usize) -> u64;

    fn name_index(&self, level: &[u64], j: usize) -> usize {
        level[j + self.j_step() - 1] as usize
    }

    /// Baseline/comparison breakdown, only available for diff profiles
    fn split(&self, _level: &[u64], _j: usize) -> Option<SplitTicks> {
        None
    }
}

/// `offset, total, self, nameIndex`
#[derive(Debug, Clone, Copy)]
pub struct SingleLayout;

impl FieldLayout for SingleLayout {
    fn format(&self) -> Format {
        Format::Single
    }

    fn offset(&self, level: &[u64], j: usize) -> u64 {
        level[j]
    }

    fn total(&self, level: &[u64], j: usize) -> u64 {
        level[j + 1]
    }

    fn self_ticks(&self, level: &[u64], j: usize) -> u64 {
        level[j + 2]
    }
}

/// `offsetLeft, totalLeft, selfLeft, offsetRight, totalRight, selfRight, nameIndex`
///
/// The bar drawn for a diff node spans both channels, so offset, total
/// and self are the sums of left and right.
#[derive(Debug, Clone, Copy)]
pub struct DoubleLayout;

impl FieldLayout for DoubleLayout {
    fn format(&self) -> Format {
        Format::Double
    }

    fn offset(&self, level: &[u64], j: usize) -> u64 {
        level[j] + level[j + 3]
    }

    fn total(&self, level: &[u64], j: usize) -> u64 {
        level[j + 1] + level[j + 4]
    }

    fn self_ticks(&self, level: &[u64], j: usize) -> u64 {
        level[j + 2] + level[j + 5]
    }

    fn split(&self, level: &[u64], j: usize) -> Option<SplitTicks> {
        Some(SplitTicks {
            total_left: level[j + 1],
            total_right: level[j + 4],
            self_left: level[j + 2],
            self_right: level[j + 5],
        })
    }
}

static SINGLE: SingleLayout = SingleLayout;
static DOUBLE: DoubleLayout = DoubleLayout;

/// Pick the layout for a format
pub fn layout_for(format: Format) -> &'static dyn FieldLayout {
    match format {
        Format::Single => &SINGLE,
        Format::Double => &DOUBLE,
    }
}

/// Left (baseline) and right (comparison) ticks of one diff node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitTicks {
    pub total_left: u64,
    pub total_right: u64,
    pub self_left: u64,
    pub self_right: u64,
}

impl SplitTicks {
    /// `total_right - total_left`
    pub fn total_diff(&self) -> i64 {
        self.total_right as i64 - self.total_left as i64
    }

    /// `self_right - self_left`
    pub fn self_diff(&self) -> i64 {
        self.self_right as i64 - self.self_left as i64
    }
}
