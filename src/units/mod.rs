//! Unit formatting for tick values.
//!
//! This module handles:
//! - Picking a duration, object-count or byte formatter per profile
//! - Percent and diff helpers that never print NaN
//! - Baseline/comparison change labels

pub mod diff;
pub mod formatter;
pub mod numbers;

pub use diff::{DiffKind, DiffLabel};
pub use formatter::{get_formatter, DurationFormatter, Formatter, ScaledFormatter};
pub use numbers::{
    diff_percent, finite_or_zero, format_percent, format_signed_percent, number_with_commas,
    percent_of, ratio_to_percent,
};
