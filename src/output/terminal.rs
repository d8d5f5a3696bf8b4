//! Terminal rendering for tables and tooltips.
//!
//! Diff cells are colored: red for regressions and new frames, green for
//! improvements and removed frames.

use crate::aggregator::{TableCell, TableReport};
use crate::flamegraph::Tooltip;
use crate::units::DiffKind;
use colored::*;

/// Longest name shown before the location column is shortened
const MAX_NAME_WIDTH: usize = 60;

/// Render a table report for the terminal
///
/// **Public** - used by the `table` command
///
/// Shows at most `limit` rows; `None` shows all of them.
pub fn render_terminal_table(report: &TableReport, limit: Option<usize>) -> String {
    let shown = limit.unwrap_or(report.rows.len()).min(report.rows.len());
    let rows = &report.rows[..shown];

    let mut widths: Vec<usize> = report.columns.iter().map(|c| c.label.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.cells.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell_width(i, cell));
            }
        }
    }

    let mut out = String::new();

    let header: Vec<String> = report
        .columns
        .iter()
        .zip(&widths)
        .enumerate()
        .map(|(i, (column, &width))| pad(i, &column.label, width))
        .collect();
    out.push_str(&header.join("  ").bold().to_string());
    out.push('\n');

    let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule));
    out.push('\n');

    for row in rows {
        let line: Vec<String> = row
            .cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, &width))| {
                let text = if i == 0 {
                    shorten_name(&cell.text)
                } else {
                    cell.text.clone()
                };
                colorize(cell, pad(i, &text, width))
            })
            .collect();
        out.push_str(&line.join("  "));
        out.push('\n');
    }

    if shown < report.rows.len() {
        out.push_str(&format!("\n(Showing top {} of {} rows)\n", shown, report.rows.len()));
    }

    out
}

/// Render tooltip lines, coloring the diff label
pub fn render_tooltip(tooltip: &Tooltip) -> String {
    let mut lines = tooltip.to_lines();
    if let (Some(last), Some(label)) = (lines.last_mut(), tooltip.diff) {
        *last = match label.kind {
            DiffKind::New | DiffKind::Regression => last.red().to_string(),
            DiffKind::Removed | DiffKind::Improvement => last.green().to_string(),
            DiffKind::Unchanged => last.clone(),
        };
    }
    if let Some(first) = lines.first_mut() {
        *first = first.bold().to_string();
    }
    lines.join("\n")
}

fn cell_width(column: usize, cell: &TableCell) -> usize {
    let len = cell.text.chars().count();
    if column == 0 {
        len.min(MAX_NAME_WIDTH)
    } else {
        len
    }
}

/// Location column is left-aligned, numbers are right-aligned
fn pad(column: usize, text: &str, width: usize) -> String {
    if column == 0 {
        format!("{:<width$}", text, width = width)
    } else {
        format!("{:>width$}", text, width = width)
    }
}

fn colorize(cell: &TableCell, text: String) -> String {
    match cell.diff {
        Some(DiffKind::New | DiffKind::Regression) => text.red().to_string(),
        Some(DiffKind::Removed | DiffKind::Improvement) => text.green().to_string(),
        _ => text,
    }
}

fn shorten_name(name: &str) -> String {
    let len = name.chars().count();
    if len <= MAX_NAME_WIDTH {
        return name.to_string();
    }
    let tail: String = name.chars().skip(len - (MAX_NAME_WIDTH - 3)).collect();
    format!("...{}", tail)
}
