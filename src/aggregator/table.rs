//! Per-function table aggregated from the flame graph tree.
//!
//! Every node is visited once and its self/total values are summed into
//! the row for its name. A function that appears under several parents
//! therefore gets one row. Recursive frames add their total once per
//! occurrence, the same way the flame graph draws them.

use crate::codec::{Format, UnitKind};
use crate::model::FlamebearerModel;
use crate::units::{format_percent, get_formatter, percent_of, DiffKind, DiffLabel, Formatter};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One aggregated function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum TableRow {
    Single {
        name: String,
        self_ticks: u64,
        total: u64,
    },
    Double {
        name: String,
        /// Baseline plus comparison
        self_ticks: u64,
        total: u64,
        self_left: u64,
        self_right: u64,
        self_diff: i64,
        total_left: u64,
        total_right: u64,
        total_diff: i64,
    },
}

impl TableRow {
    pub fn name(&self) -> &str {
        match self {
            TableRow::Single { name, .. } | TableRow::Double { name, .. } => name,
        }
    }

    pub fn self_ticks(&self) -> u64 {
        match self {
            TableRow::Single { self_ticks, .. } | TableRow::Double { self_ticks, .. } => {
                *self_ticks
            }
        }
    }

    pub fn total(&self) -> u64 {
        match self {
            TableRow::Single { total, .. } | TableRow::Double { total, .. } => *total,
        }
    }

    /// Numeric value of a column; `None` for the name column and for
    /// diff columns on single rows
    pub fn value(&self, column: SortColumn) -> Option<i64> {
        let v = |x: u64| Some(i64::try_from(x).unwrap_or(i64::MAX));
        match (self, column) {
            (_, SortColumn::Name) => None,
            (_, SortColumn::SelfTicks) => v(self.self_ticks()),
            (_, SortColumn::Total) => v(self.total()),
            (TableRow::Single { .. }, _) => None,
            (TableRow::Double { self_left, .. }, SortColumn::SelfLeft) => v(*self_left),
            (TableRow::Double { self_right, .. }, SortColumn::SelfRight) => v(*self_right),
            (TableRow::Double { self_diff, .. }, SortColumn::SelfDiff) => Some(*self_diff),
            (TableRow::Double { total_left, .. }, SortColumn::TotalLeft) => v(*total_left),
            (TableRow::Double { total_right, .. }, SortColumn::TotalRight) => v(*total_right),
            (TableRow::Double { total_diff, .. }, SortColumn::TotalDiff) => Some(*total_diff),
        }
    }
}

/// Aggregate every node of the tree into one row per function name
///
/// **Public** - main entry point for the table view
///
/// Rows come out in first-seen order (level by level, left to right).
/// An empty tree aggregates to no rows.
pub fn aggregate(model: &FlamebearerModel) -> Vec<TableRow> {
    if model.is_empty() {
        return Vec::new();
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<TableRow> = Vec::new();

    for node in model.all_nodes() {
        let name = model.name(node);
        let slot = *index.entry(name).or_insert_with(|| {
            rows.push(empty_row(model.format(), name));
            rows.len() - 1
        });

        let node_self = model.self_ticks(node);
        let node_total = model.total(node);

        match &mut rows[slot] {
            TableRow::Single { self_ticks, total, .. } => {
                *self_ticks += node_self;
                *total += node_total;
            }
            TableRow::Double {
                self_ticks,
                total,
                self_left,
                self_right,
                self_diff,
                total_left,
                total_right,
                total_diff,
                ..
            } => {
                *self_ticks += node_self;
                *total += node_total;
                if let Some(split) = model.split(node) {
                    *self_left += split.self_left;
                    *self_right += split.self_right;
                    *self_diff += split.self_diff();
                    *total_left += split.total_left;
                    *total_right += split.total_right;
                    *total_diff += split.total_diff();
                }
            }
        }
    }

    debug!("Aggregated {} rows from {} levels", rows.len(), model.depth());
    rows
}

fn empty_row(format: Format, name: &str) -> TableRow {
    let name = name.to_string();
    match format {
        Format::Single => TableRow::Single {
            name,
            self_ticks: 0,
            total: 0,
        },
        Format::Double => TableRow::Double {
            name,
            self_ticks: 0,
            total: 0,
            self_left: 0,
            self_right: 0,
            self_diff: 0,
            total_left: 0,
            total_right: 0,
            total_diff: 0,
        },
    }
}

/// Keep rows whose name contains `query` (case-sensitive); an empty query keeps all
pub fn filter_rows(rows: Vec<TableRow>, query: &str) -> Vec<TableRow> {
    if query.is_empty() {
        return rows;
    }
    rows.into_iter().filter(|row| row.name().contains(query)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Name,
    #[value(name = "self")]
    #[serde(rename = "self")]
    SelfTicks,
    #[default]
    Total,
    SelfLeft,
    SelfRight,
    SelfDiff,
    TotalLeft,
    TotalRight,
    TotalDiff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Stable sort by one column
///
/// Rows that compare equal keep their current relative order, so sorting
/// the output of [`aggregate`] breaks ties by first appearance.
pub fn sort_rows(rows: &mut [TableRow], column: SortColumn, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ordering = match column {
            SortColumn::Name => a.name().cmp(b.name()),
            _ => a.value(column).cmp(&b.value(column)),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Header metadata for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    pub id: SortColumn,
    pub label: String,
    pub default_direction: SortDirection,
}

impl TableColumn {
    fn new(id: SortColumn, label: &str) -> Self {
        let default_direction = if id == SortColumn::Name {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };
        Self {
            id,
            label: label.to_string(),
            default_direction,
        }
    }
}

/// Columns shown for a profile format
pub fn columns(format: Format) -> Vec<TableColumn> {
    match format {
        Format::Single => vec![
            TableColumn::new(SortColumn::Name, "Location"),
            TableColumn::new(SortColumn::SelfTicks, "Self"),
            TableColumn::new(SortColumn::Total, "Total"),
        ],
        Format::Double => vec![
            TableColumn::new(SortColumn::Name, "Location"),
            TableColumn::new(SortColumn::SelfLeft, "Self (Left)"),
            TableColumn::new(SortColumn::SelfRight, "Self (Right)"),
            TableColumn::new(SortColumn::SelfDiff, "Self (Diff)"),
            TableColumn::new(SortColumn::TotalLeft, "Total (Left)"),
            TableColumn::new(SortColumn::TotalRight, "Total (Right)"),
            TableColumn::new(SortColumn::TotalDiff, "Total (Diff)"),
        ],
    }
}

/// A formatted cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub text: String,
    /// Set on diff cells so terminals can color them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffKind>,
}

impl TableCell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            diff: None,
        }
    }

    fn diff(label: DiffLabel) -> Self {
        Self {
            text: label.to_string(),
            diff: Some(label.kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub row: TableRow,
    /// One cell per entry of [`TableReport::columns`]
    pub cells: Vec<TableCell>,
}

/// Sorted rows with display-ready cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableReport {
    pub format: Format,
    pub units: UnitKind,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<ReportRow>,
}

impl TableReport {
    /// Format rows for display with a formatter chosen for the whole profile
    pub fn new(model: &FlamebearerModel, rows: Vec<TableRow>) -> Self {
        let fb = model.flamebearer();
        let formatter = get_formatter(model.num_ticks() as f64, fb.sample_rate(), fb.units());
        let ctx = CellContext {
            formatter: &formatter,
            sample_rate: fb.sample_rate(),
            num_ticks: model.num_ticks(),
            left_ticks: model.left_ticks(),
            right_ticks: model.right_ticks(),
        };

        let rows = rows
            .into_iter()
            .map(|row| ReportRow {
                cells: ctx.cells(&row),
                row,
            })
            .collect();

        Self {
            format: model.format(),
            units: fb.units(),
            columns: columns(model.format()),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

struct CellContext<'a> {
    formatter: &'a Formatter,
    sample_rate: u32,
    num_ticks: u64,
    left_ticks: u64,
    right_ticks: u64,
}

impl CellContext<'_> {
    fn cells(&self, row: &TableRow) -> Vec<TableCell> {
        match row {
            TableRow::Single {
                name,
                self_ticks,
                total,
            } => vec![
                TableCell::plain(name.clone()),
                TableCell::plain(self.value_with_share(*self_ticks, self.num_ticks)),
                TableCell::plain(self.value_with_share(*total, self.num_ticks)),
            ],
            TableRow::Double {
                name,
                self_left,
                self_right,
                total_left,
                total_right,
                ..
            } => vec![
                TableCell::plain(name.clone()),
                TableCell::plain(self.value_with_share(*self_left, self.left_ticks)),
                TableCell::plain(self.value_with_share(*self_right, self.right_ticks)),
                TableCell::diff(DiffLabel::new(
                    *self_left,
                    *self_right,
                    self.left_ticks,
                    self.right_ticks,
                )),
                TableCell::plain(self.value_with_share(*total_left, self.left_ticks)),
                TableCell::plain(self.value_with_share(*total_right, self.right_ticks)),
                TableCell::diff(DiffLabel::new(
                    *total_left,
                    *total_right,
                    self.left_ticks,
                    self.right_ticks,
                )),
            ],
        }
    }

    fn value_with_share(&self, value: u64, of: u64) -> String {
        format!(
            "{} ({})",
            self.formatter.format(value as f64, self.sample_rate).trim_end(),
            format_percent(percent_of(value, of))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_flamebearer, RawFlamebearer};
    use pretty_assertions::assert_eq;

    fn single() -> FlamebearerModel {
        // total -> a -> b, total -> b
        let raw = RawFlamebearer {
            names: vec!["total".into(), "a".into(), "b".into()],
            levels: vec![
                vec![0, 100, 0, 0],
                vec![0, 60, 20, 1, 0, 40, 40, 2],
                vec![0, 40, 40, 2],
            ],
            num_ticks: 100,
            max_self: 40,
            format: Format::Single,
            sample_rate: 100,
            units: UnitKind::Samples,
            spy_name: String::new(),
            left_ticks: None,
            right_ticks: None,
        };
        FlamebearerModel::new(decode_flamebearer(&raw).unwrap())
    }

    #[test]
    fn test_aggregate_merges_names() {
        let rows = aggregate(&single());
        assert_eq!(
            rows,
            vec![
                TableRow::Single { name: "total".into(), self_ticks: 0, total: 100 },
                TableRow::Single { name: "a".into(), self_ticks: 20, total: 60 },
                TableRow::Single { name: "b".into(), self_ticks: 80, total: 80 },
            ]
        );
    }

    #[test]
    fn test_self_sum_matches_tree() {
        let m = single();
        let rows = aggregate(&m);
        let table_self: u64 = rows.iter().map(TableRow::self_ticks).sum();
        let tree_self: u64 = m.all_nodes().map(|n| m.self_ticks(n)).sum();
        assert_eq!(table_self, tree_self);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut rows = vec![
            TableRow::Single { name: "x".into(), self_ticks: 1, total: 5 },
            TableRow::Single { name: "y".into(), self_ticks: 2, total: 5 },
            TableRow::Single { name: "z".into(), self_ticks: 3, total: 9 },
        ];
        sort_rows(&mut rows, SortColumn::Total, SortDirection::Desc);
        let names: Vec<&str> = rows.iter().map(TableRow::name).collect();
        assert_eq!(names, vec!["z", "x", "y"]);

        sort_rows(&mut rows, SortColumn::Name, SortDirection::Desc);
        let names: Vec<&str> = rows.iter().map(TableRow::name).collect();
        assert_eq!(names, vec!["z", "y", "x"]);

        sort_rows(&mut rows, SortColumn::SelfTicks, SortDirection::Asc);
        let names: Vec<&str> = rows.iter().map(TableRow::name).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_columns_per_format() {
        let single = columns(Format::Single);
        let labels: Vec<&str> = single.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Location", "Self", "Total"]);
        assert_eq!(single[0].default_direction, SortDirection::Asc);
        assert_eq!(single[2].default_direction, SortDirection::Desc);
        assert_eq!(columns(Format::Double).len(), 7);
    }

    #[test]
    fn test_double_rows_and_cells() {
        let raw = RawFlamebearer {
            names: vec!["total".into(), "a".into()],
            levels: vec![
                vec![0, 100, 0, 0, 200, 0, 0],
                vec![0, 100, 100, 0, 200, 200, 1],
            ],
            num_ticks: 300,
            max_self: 200,
            format: Format::Double,
            sample_rate: 100,
            units: UnitKind::Objects,
            spy_name: String::new(),
            left_ticks: Some(100),
            right_ticks: Some(200),
        };
        let m = FlamebearerModel::new(decode_flamebearer(&raw).unwrap());
        let rows = aggregate(&m);
        assert_eq!(
            rows[1],
            TableRow::Double {
                name: "a".into(),
                self_ticks: 300,
                total: 300,
                self_left: 100,
                self_right: 200,
                self_diff: 100,
                total_left: 100,
                total_right: 200,
                total_diff: 100,
            }
        );

        let report = TableReport::new(&m, rows);
        let cells: Vec<&str> = report.rows[1].cells.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(cells[1], "100.00 (100%)");
        assert_eq!(cells[2], "200.00 (100%)");
        // same share of each side: no change
        assert_eq!(cells[3], "(+0.00%)");
        assert_eq!(report.rows[1].cells[3].diff, Some(DiffKind::Unchanged));
    }

    #[test]
    fn test_filter_and_empty() {
        let rows = filter_rows(aggregate(&single()), "a");
        assert_eq!(rows.len(), 1);
        assert_eq!(filter_rows(aggregate(&single()), "").len(), 3);

        let raw = RawFlamebearer {
            names: vec!["total".into()],
            levels: vec![],
            num_ticks: 0,
            max_self: 0,
            format: Format::Single,
            sample_rate: 100,
            units: UnitKind::Samples,
            spy_name: String::new(),
            left_ticks: None,
            right_ticks: None,
        };
        let empty = FlamebearerModel::new(decode_flamebearer(&raw).unwrap());
        assert!(aggregate(&empty).is_empty());
        assert!(TableReport::new(&empty, Vec::new()).is_empty());
    }
}
