//! Tooltip content for a hovered node.

use super::hit_test::NodeQueryResult;
use crate::codec::UnitKind;
use crate::model::FlamebearerModel;
use crate::palette::{Color, FlamegraphPalette};
use crate::units::{
    format_percent, get_formatter, number_with_commas, percent_of, DiffLabel, Formatter,
};
use serde::Serialize;

/// Row titles for the share and the formatted value of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitTitles {
    pub percent: &'static str,
    pub value: &'static str,
}

pub fn unit_title(unit: UnitKind) -> UnitTitles {
    let (percent, value) = match unit {
        UnitKind::Samples => ("Share of CPU", "CPU Time"),
        UnitKind::Objects => ("Share of Allocated Objects", "Allocated Objects"),
        UnitKind::Goroutines => ("Share of Goroutines", "Goroutines"),
        UnitKind::Bytes => ("Share of Allocated Memory", "Allocated Memory"),
        UnitKind::LockSamples => ("Share of Lock Acquisitions", "Lock Acquisitions"),
        UnitKind::LockNanoseconds => ("Share of Lock Wait Time", "Lock Wait Time"),
        UnitKind::TraceSamples => ("Share of Time", "Time"),
        UnitKind::Exceptions => ("Share of Thrown Exceptions", "Thrown Exceptions"),
        UnitKind::Unknown => ("Percentage", "Value"),
    };
    UnitTitles { percent, value }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipRow {
    pub label: String,
    /// One value for single profiles, baseline and comparison for diffs
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub title: String,
    pub rows: Vec<TooltipRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffLabel>,
    #[serde(skip)]
    pub diff_color: Option<Color>,
}

impl Tooltip {
    /// Build tooltip content for a hit, with a formatter chosen for the whole profile
    pub fn from_hit(
        model: &FlamebearerModel,
        data: &NodeQueryResult,
        formatter: &Formatter,
        palette: &FlamegraphPalette,
    ) -> Self {
        let fb = model.flamebearer();
        let titles = unit_title(fb.units());
        let sample_rate = fb.sample_rate();

        match data {
            NodeQueryResult::Single { name, total, .. } => Self {
                title: name.clone(),
                rows: vec![
                    row(titles.percent, [format_percent(percent_of(*total, model.num_ticks()))]),
                    row(titles.value, [formatter.format(*total as f64, sample_rate)]),
                    row("Samples", [number_with_commas(*total as i64)]),
                ],
                diff: None,
                diff_color: None,
            },
            NodeQueryResult::Double {
                name,
                total_left,
                total_right,
                ..
            } => {
                let (left_ticks, right_ticks) = (model.left_ticks(), model.right_ticks());
                let label = DiffLabel::new(*total_left, *total_right, left_ticks, right_ticks);

                Self {
                    title: name.clone(),
                    rows: vec![
                        row(
                            titles.percent,
                            [
                                format_percent(percent_of(*total_left, left_ticks)),
                                format_percent(percent_of(*total_right, right_ticks)),
                            ],
                        ),
                        row(
                            titles.value,
                            [
                                formatter.format(*total_left as f64, sample_rate),
                                formatter.format(*total_right as f64, sample_rate),
                            ],
                        ),
                        row(
                            "Samples",
                            [
                                number_with_commas(*total_left as i64),
                                number_with_commas(*total_right as i64),
                            ],
                        ),
                    ],
                    diff: Some(label),
                    diff_color: Some(palette.diff_label_color(&label)),
                }
            }
        }
    }

    /// Convenience constructor that picks the formatter from the model
    pub fn for_model(
        model: &FlamebearerModel,
        data: &NodeQueryResult,
        palette: &FlamegraphPalette,
    ) -> Self {
        let fb = model.flamebearer();
        let formatter = get_formatter(model.num_ticks() as f64, fb.sample_rate(), fb.units());
        Self::from_hit(model, data, &formatter, palette)
    }

    /// Plain-text rendering, one line per row
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![self.title.clone()];
        for row in &self.rows {
            lines.push(format!("  {}: {}", row.label, row.values.join(" | ")));
        }
        if let Some(diff) = &self.diff {
            lines.push(format!("  Diff: {}", diff));
        }
        lines
    }
}

fn row<const N: usize>(label: &str, values: [String; N]) -> TooltipRow {
    TooltipRow {
        label: label.to_string(),
        values: values.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_flamebearer, Format, RawFlamebearer};
    use crate::model::NodeRef;

    fn model(format: Format, levels: Vec<Vec<i64>>, num_ticks: u64) -> FlamebearerModel {
        let raw = RawFlamebearer {
            names: vec!["total".into(), "main.work".into()],
            levels,
            num_ticks,
            max_self: 0,
            format,
            sample_rate: 100,
            units: UnitKind::Samples,
            spy_name: String::new(),
            left_ticks: None,
            right_ticks: None,
        };
        FlamebearerModel::new(decode_flamebearer(&raw).unwrap())
    }

    #[test]
    fn test_single_tooltip() {
        let m = model(Format::Single, vec![vec![0, 8000, 0, 0], vec![0, 1000, 1000, 1]], 8000);
        let data = NodeQueryResult::for_node(&m, NodeRef::new(1, 0));
        let tooltip = Tooltip::for_model(&m, &data, &FlamegraphPalette::default());

        assert_eq!(tooltip.title, "main.work");
        assert_eq!(tooltip.rows[0].label, "Share of CPU");
        assert_eq!(tooltip.rows[0].values, vec!["12.5%"]);
        assert_eq!(tooltip.rows[1].values, vec!["0.17 minutes"]);
        assert_eq!(tooltip.rows[2].values, vec!["1,000"]);
        assert!(tooltip.diff.is_none());
    }

    #[test]
    fn test_double_tooltip_regression() {
        let m = model(
            Format::Double,
            vec![vec![0, 1000, 0, 0, 1000, 0, 0], vec![0, 100, 100, 0, 200, 200, 1]],
            2000,
        );
        let palette = FlamegraphPalette::default();
        let data = NodeQueryResult::for_node(&m, NodeRef::new(1, 0));
        let tooltip = Tooltip::for_model(&m, &data, &palette);

        assert_eq!(tooltip.rows[0].values, vec!["10%", "20%"]);
        assert_eq!(tooltip.diff.unwrap().text(), "+100.00%");
        assert_eq!(tooltip.diff_color, Some(palette.bad));
        assert!(tooltip.to_lines().last().unwrap().contains("(+100.00%)"));
    }
}
