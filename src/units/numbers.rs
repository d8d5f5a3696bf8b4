//! Number helpers shared by the formatters, tooltip and table.
//!
//! None of these functions lets a NaN or an infinity reach a string.

/// Replace NaN and infinities with 0
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// `1234567` -> `"1,234,567"`
pub fn number_with_commas(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Ratio to percent, rounded to two decimals
pub fn ratio_to_percent(ratio: f64) -> f64 {
    finite_or_zero((ratio * 10_000.0).round() / 100.0)
}

/// `value / total` as a rounded percent; 0 when `total` is 0
pub fn percent_of(value: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    ratio_to_percent(value as f64 / total as f64)
}

/// Shortest rendering of a percent value, e.g. `12.5%` or `100%`
pub fn format_percent(percent: f64) -> String {
    format!("{}%", finite_or_zero(percent))
}

/// Relative change from `left` to `right`, in percent
///
/// Equal values give 0. A zero baseline with a non-zero comparison
/// gives `f64::INFINITY`; callers label that case as new.
pub fn diff_percent(left: f64, right: f64) -> f64 {
    if left == right {
        return 0.0;
    }
    if left == 0.0 {
        return f64::INFINITY;
    }
    finite_or_zero((right - left) / left * 100.0)
}

/// Signed two-decimal percent, e.g. `+100.00%`
pub fn format_signed_percent(percent: f64) -> String {
    format!("{:+.2}%", finite_or_zero(percent))
}

/// Five decimals with trailing zeros removed
pub(crate) fn trim_precise(value: f64) -> String {
    let formatted = format!("{:.5}", finite_or_zero(value));
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_with_commas() {
        assert_eq!(number_with_commas(0), "0");
        assert_eq!(number_with_commas(999), "999");
        assert_eq!(number_with_commas(1000), "1,000");
        assert_eq!(number_with_commas(1_234_567), "1,234,567");
        assert_eq!(number_with_commas(-45_000), "-45,000");
    }

    #[test]
    fn test_percentages_guard_zero() {
        assert_eq!(percent_of(1, 8), 12.5);
        assert_eq!(percent_of(5, 0), 0.0);
        assert_eq!(ratio_to_percent(f64::NAN), 0.0);
        assert_eq!(format_percent(12.5), "12.5%");
        assert_eq!(format_percent(100.0), "100%");
        assert_eq!(format_percent(f64::NAN), "0%");
    }

    #[test]
    fn test_diff_percent() {
        assert_eq!(diff_percent(100.0, 200.0), 100.0);
        assert_eq!(diff_percent(200.0, 100.0), -50.0);
        assert_eq!(diff_percent(7.0, 7.0), 0.0);
        assert_eq!(diff_percent(0.0, 0.0), 0.0);
        assert!(diff_percent(0.0, 3.0).is_infinite());
        assert_eq!(format_signed_percent(100.0), "+100.00%");
        assert_eq!(format_signed_percent(-50.0), "-50.00%");
    }

    #[test]
    fn test_trim_precise() {
        assert_eq!(trim_precise(0.00001), "0.00001");
        assert_eq!(trim_precise(1.0), "1");
        assert_eq!(trim_precise(-0.000001), "0");
        assert_eq!(trim_precise(2.5), "2.5");
    }
}
