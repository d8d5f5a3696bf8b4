//! Baseline vs comparison change labels.
//!
//! Both sides are first turned into a share of their own profile's ticks,
//! so profiles of different lengths compare fairly.

use super::numbers::{diff_percent, format_signed_percent, percent_of};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Only present in the comparison
    New,
    /// Only present in the baseline
    Removed,
    Regression,
    Improvement,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiffLabel {
    pub kind: DiffKind,
    /// Relative change of the share, in percent (0 for new/removed)
    pub percent: f64,
}

impl DiffLabel {
    pub fn new(total_left: u64, total_right: u64, left_ticks: u64, right_ticks: u64) -> Self {
        let (kind, percent) = match (total_left, total_right) {
            (0, 0) => (DiffKind::Unchanged, 0.0),
            (0, _) => (DiffKind::New, 0.0),
            (_, 0) => (DiffKind::Removed, 0.0),
            _ => {
                let percent = diff_percent(
                    percent_of(total_left, left_ticks),
                    percent_of(total_right, right_ticks),
                );
                let kind = if percent > 0.0 {
                    DiffKind::Regression
                } else if percent < 0.0 {
                    DiffKind::Improvement
                } else {
                    DiffKind::Unchanged
                };
                (kind, percent)
            }
        };
        Self { kind, percent }
    }

    /// `new`, `removed` or a signed percent such as `+100.00%`
    pub fn text(&self) -> String {
        match self.kind {
            DiffKind::New => "new".to_string(),
            DiffKind::Removed => "removed".to_string(),
            _ => format_signed_percent(self.percent),
        }
    }
}

impl fmt::Display for DiffLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.text())
    }
}
