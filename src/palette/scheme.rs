//! Swappable flame graph palettes.
//!
//! A palette carries the three diff anchor colors (good, neutral, bad) and
//! the list of hues used for regular frames. Palettes hold no caches, so
//! any number of profiles can be colored side by side.

use super::color::Color;
use super::murmur::murmur3_32;
use crate::units::diff::{DiffKind, DiffLabel};
use crate::units::numbers::{diff_percent, finite_or_zero};

/// Diff percentages saturate at this magnitude
pub const DIFF_CLAMP_PERCENT: f64 = 100.0;

pub const PALETTE_NAMES: &[&str] = &["default", "colorblind"];

#[derive(Debug, Clone, PartialEq)]
pub struct FlamegraphPalette {
    pub name: String,
    /// Comparison is cheaper than baseline
    pub good: Color,
    pub neutral: Color,
    /// Comparison is more expensive than baseline
    pub bad: Color,
    /// Hues for regular (single profile) frames
    pub colors: Vec<Color>,
}

impl Default for FlamegraphPalette {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            good: Color::rgb(0, 170, 0),
            neutral: Color::rgb(192, 192, 192),
            bad: Color::rgb(200, 0, 0),
            colors: [
                210.0, 30.0, 140.0, 340.0, 270.0, 180.0, 50.0, 10.0, 160.0, 290.0, 195.0, 80.0,
                320.0, 40.0, 250.0, 120.0,
            ]
            .iter()
            .map(|&hue| Color::from_hsl(hue, 0.7, 0.6))
            .collect(),
        }
    }
}

impl FlamegraphPalette {
    /// Blue/orange diff anchors that stay distinct for red-green color blindness
    pub fn colorblind() -> Self {
        Self {
            name: "colorblind".to_string(),
            good: Color::rgb(0, 114, 178),
            neutral: Color::rgb(192, 192, 192),
            bad: Color::rgb(213, 94, 0),
            colors: vec![
                Color::rgb(230, 159, 0),
                Color::rgb(86, 180, 233),
                Color::rgb(0, 158, 115),
                Color::rgb(240, 228, 66),
                Color::rgb(0, 114, 178),
                Color::rgb(213, 94, 0),
                Color::rgb(204, 121, 167),
                Color::rgb(153, 153, 153),
            ],
        }
    }

    /// Look a palette up by name (case-insensitive)
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(Self::default()),
            "colorblind" => Some(Self::colorblind()),
            _ => None,
        }
    }

    /// Stable color for a frame or package name
    pub fn color_for(&self, name: &str) -> Color {
        if self.colors.is_empty() {
            return self.neutral;
        }
        let index = murmur3_32(name.as_bytes(), 0) as usize % self.colors.len();
        self.colors[index]
    }

    /// Color for a signed percent change on the good/neutral/bad gradient
    ///
    /// -100 maps to `good`, 0 to `neutral`, 100 to `bad`; values beyond the
    /// clamp saturate.
    pub fn diff_color_for_percent(&self, percent: f64) -> Color {
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(-DIFF_CLAMP_PERCENT, DIFF_CLAMP_PERCENT)
        };

        if percent < 0.0 {
            self.neutral.mix(self.good, -percent / DIFF_CLAMP_PERCENT)
        } else {
            self.neutral.mix(self.bad, percent / DIFF_CLAMP_PERCENT)
        }
    }

    /// Diff color for one bar: intensity is `|self_right - self_left| / bar_total`
    pub fn diff_color(&self, self_left: u64, self_right: u64, bar_total: u64) -> Color {
        if bar_total == 0 {
            return self.neutral;
        }
        let change = self_right as f64 - self_left as f64;
        let percent = finite_or_zero(change / bar_total as f64 * 100.0);
        self.diff_color_for_percent(percent)
    }

    /// Diff color from the relative change between two values
    pub fn color_based_on_diff_percent(&self, left: u64, right: u64) -> Color {
        self.diff_color_for_percent(diff_percent(left as f64, right as f64))
    }

    /// Text color for a change label: regressions are bad, improvements good
    pub fn diff_label_color(&self, label: &DiffLabel) -> Color {
        match label.kind {
            DiffKind::New | DiffKind::Regression => self.bad,
            DiffKind::Removed | DiffKind::Improvement => self.good,
            DiffKind::Unchanged => self.neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_for_is_deterministic() {
        let palette = FlamegraphPalette::default();
        let a = palette.color_for("runtime.mallocgc");
        let b = palette.color_for("runtime.mallocgc");
        assert_eq!(a, b);
        assert!(palette.colors.contains(&a));
    }

    #[test]
    fn test_palettes_do_not_share_state() {
        let default = FlamegraphPalette::default();
        let colorblind = FlamegraphPalette::colorblind();
        let name = "net/http.(*conn).serve";
        assert!(colorblind.colors.contains(&colorblind.color_for(name)));
        assert_eq!(default.color_for(name), FlamegraphPalette::default().color_for(name));
    }

    #[test]
    fn test_diff_gradient_white_to_black() {
        let palette = FlamegraphPalette {
            name: "my palette".to_string(),
            good: Color::rgb(255, 255, 255),
            neutral: Color::rgb(128, 128, 128),
            bad: Color::rgb(0, 0, 0),
            colors: vec![],
        };
        assert_eq!(palette.diff_color_for_percent(-100.0).to_css(), "rgb(255, 255, 255)");
        assert_eq!(palette.diff_color_for_percent(0.0).to_css(), "rgb(128, 128, 128)");
        assert_eq!(palette.diff_color_for_percent(100.0).to_css(), "rgb(0, 0, 0)");
        assert_eq!(palette.diff_color_for_percent(-5000.0).to_css(), "rgb(255, 255, 255)");
    }

    #[test]
    fn test_color_based_on_diff_percent() {
        let palette = FlamegraphPalette::default();
        assert_eq!(palette.color_based_on_diff_percent(30, 60), palette.bad);
        assert_eq!(palette.color_based_on_diff_percent(60, 0), palette.good);
        assert_eq!(palette.color_based_on_diff_percent(0, 0), palette.neutral);
    }

    #[test]
    fn test_diff_color_by_bar_total() {
        let palette = FlamegraphPalette::default();
        assert_eq!(palette.diff_color(50, 50, 100), palette.neutral);
        assert_eq!(palette.diff_color(0, 100, 100), palette.bad);
        assert_eq!(palette.diff_color(100, 0, 100), palette.good);
        assert_eq!(palette.diff_color(10, 20, 0), palette.neutral);

        let regression = palette.diff_color(100, 200, 300);
        assert!(regression.r > palette.neutral.r);
        assert!(regression.g < palette.neutral.g);
    }

    #[test]
    fn test_diff_label_color() {
        let palette = FlamegraphPalette::default();
        assert_eq!(palette.diff_label_color(&DiffLabel::new(100, 200, 1000, 1000)), palette.bad);
        assert_eq!(palette.diff_label_color(&DiffLabel::new(200, 100, 1000, 1000)), palette.good);
        assert_eq!(palette.diff_label_color(&DiffLabel::new(0, 1, 10, 10)), palette.bad);
        assert_eq!(palette.diff_label_color(&DiffLabel::new(7, 7, 10, 10)), palette.neutral);
    }

    #[test]
    fn test_by_name() {
        assert_eq!(FlamegraphPalette::by_name("ColorBlind").unwrap().name, "colorblind");
        assert!(FlamegraphPalette::by_name("neon").is_none());
    }
}
