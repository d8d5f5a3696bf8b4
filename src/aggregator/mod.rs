//! Aggregation of flame graph trees into tables and stacks.
//!
//! This module transforms decoded trees into:
//! - Per-function tables (self/total, with diff columns for comparisons)
//! - Collapsed stack format (for export and re-import)
//! - Flamebearer payloads built from collapsed stacks

pub mod stack_builder;
pub mod table;

// Re-export main types and functions
pub use stack_builder::{
    collapse, collapsed_to_string, parse_collapsed, read_collapsed, CollapsedStack,
    FlamebearerBuilder,
};
pub use table::{
    aggregate, columns, filter_rows, sort_rows, ReportRow, SortColumn, SortDirection, TableCell,
    TableColumn, TableReport, TableRow,
};
