//! Table command implementation.
//!
//! Aggregates a profile into one row per function, sorts it, prints it
//! and optionally writes it as JSON.

use super::utils::load_model;
use crate::aggregator::{aggregate, filter_rows, sort_rows, SortColumn, SortDirection, TableReport};
use crate::output::{render_terminal_table, write_table_report};
use anyhow::{bail, Context, Result};
use log::info;
use std::path::PathBuf;

/// Arguments for the table command
#[derive(Debug, Clone, Default)]
pub struct TableArgs {
    pub input: PathBuf,
    pub sort: SortColumn,
    pub ascending: bool,

    /// Maximum number of rows to print
    pub limit: Option<usize>,

    /// Keep only rows whose name contains this
    pub highlight: Option<String>,

    /// Also write the full report here
    pub json: Option<PathBuf>,
}

/// Execute the table command
///
/// **Public** - main entry point called from main.rs
pub fn execute_table(args: TableArgs) -> Result<()> {
    let model = load_model(&args.input)?;

    let mut rows = aggregate(&model);
    info!("Aggregated {} functions", rows.len());

    if let Some(query) = &args.highlight {
        rows = filter_rows(rows, query);
        info!("{} functions match '{}'", rows.len(), query);
    }

    let direction = if args.ascending {
        SortDirection::Asc
    } else {
        SortDirection::Desc
    };
    let sortable = args.sort == SortColumn::Name
        || rows.is_empty()
        || rows.iter().any(|row| row.value(args.sort).is_some());
    if !sortable {
        bail!("Column {:?} only exists for diff profiles", args.sort);
    }
    sort_rows(&mut rows, args.sort, direction);

    let report = TableReport::new(&model, rows);
    println!("{}", render_terminal_table(&report, args.limit));

    if let Some(path) = &args.json {
        write_table_report(&report, path).context("Failed to write table JSON")?;
        info!("✓ Table written to: {}", path.display());
    }

    Ok(())
}
