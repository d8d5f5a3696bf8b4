//! Label fitting inside a bar.

use serde::{Deserialize, Serialize};

const ELLIPSIS: &str = "...";

/// Which end of a label survives truncation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Keep the prefix (package), cut the tail
    #[default]
    Head,
    /// Keep the suffix (function), cut the head
    Tail,
}

/// Pick the label to draw in `available` pixels
///
/// Tries `full`, then `short`, then `short` truncated with an ellipsis on
/// the side chosen by `mode`. Returns `None` when not even one character
/// plus the ellipsis fits.
pub fn fit_label(
    mode: FitMode,
    full: &str,
    short: &str,
    available: f64,
    measure: impl Fn(&str) -> f64,
) -> Option<String> {
    if available <= 0.0 {
        return None;
    }
    if measure(full) <= available {
        return Some(full.to_string());
    }
    if measure(short) <= available {
        return Some(short.to_string());
    }

    let chars: Vec<char> = short.chars().collect();
    let truncate = |keep: usize| -> String {
        match mode {
            FitMode::Head => format!("{}{}", chars[..keep].iter().collect::<String>(), ELLIPSIS),
            FitMode::Tail => format!(
                "{}{}",
                ELLIPSIS,
                chars[chars.len() - keep..].iter().collect::<String>()
            ),
        }
    };

    // largest number of kept characters that still fits
    let (mut lo, mut hi) = (0usize, chars.len().saturating_sub(1));
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if measure(&truncate(mid)) <= available {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    (lo > 0).then(|| truncate(lo))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mono(text: &str) -> f64 {
        text.chars().count() as f64 * 10.0
    }

    #[test]
    fn test_prefers_full_then_short() {
        let full = "main.work (12.5%, 1.00 second)";
        assert_eq!(fit_label(FitMode::Head, full, "main.work", 400.0, mono).as_deref(), Some(full));
        assert_eq!(
            fit_label(FitMode::Head, full, "main.work", 95.0, mono).as_deref(),
            Some("main.work")
        );
    }

    #[test]
    fn test_head_keeps_prefix() {
        let label = fit_label(
            FitMode::Head,
            "github.com/pkg.Func (1%)",
            "github.com/pkg.Func",
            80.0,
            mono,
        );
        assert_eq!(label.as_deref(), Some("githu..."));
    }

    #[test]
    fn test_tail_keeps_suffix() {
        let label = fit_label(
            FitMode::Tail,
            "github.com/pkg.Func (1%)",
            "github.com/pkg.Func",
            90.0,
            mono,
        );
        assert_eq!(label.as_deref(), Some("...g.Func"));
    }

    #[test]
    fn test_too_narrow_gives_nothing() {
        assert_eq!(fit_label(FitMode::Head, "abcdef", "abcdef", 35.0, mono), None);
        assert_eq!(fit_label(FitMode::Tail, "abcdef", "abcdef", 0.0, mono), None);
    }

    #[test]
    fn test_multibyte_names_are_cut_on_chars() {
        let label =
            fit_label(FitMode::Head, "日本語の関数名", "日本語の関数名", 50.0, mono);
        assert_eq!(label.as_deref(), Some("日本..."));
    }
}
