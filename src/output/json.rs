//! JSON output writer.
//!
//! Writes flamebearer payloads and table reports to JSON files with
//! proper formatting.

use crate::aggregator::{ReportRow, TableColumn, TableReport};
use crate::codec::{Format, FlamebearerProfile, RawFlamebearer, UnitKind};
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Table report as stored on disk
///
/// **Public** - written by `table --json`, read back by tooling and tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableReportFile {
    /// Schema version of this file
    pub version: String,

    /// ISO 8601 timestamp of when the report was written
    pub generated_at: String,

    pub format: Format,
    pub units: UnitKind,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<ReportRow>,
}

impl From<&TableReport> for TableReportFile {
    fn from(report: &TableReport) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            format: report.format,
            units: report.units,
            columns: report.columns.clone(),
            rows: report.rows.clone(),
        }
    }
}

/// Write a table report to a JSON file
///
/// **Public** - main entry point for table JSON output
///
/// # Arguments
/// * `report` - Formatted table
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_table_report(
    report: &TableReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing table report to: {}", output_path.display());

    write_json(&TableReportFile::from(report), output_path)?;

    info!(
        "Table report written successfully ({} rows, {} bytes)",
        report.len(),
        calculate_file_size(output_path)
    );
    Ok(())
}

/// Read a table report from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_table_report(input_path: impl AsRef<Path>) -> Result<TableReportFile, OutputError> {
    let input_path = input_path.as_ref();
    debug!("Reading table report from: {}", input_path.display());

    let file = File::open(input_path)?;
    let report: TableReportFile = serde_json::from_reader(file)?;

    debug!(
        "Table report loaded: version {}, {} rows",
        report.version,
        report.rows.len()
    );
    Ok(report)
}

/// Write a flamebearer payload wrapped in the versioned envelope
///
/// # Errors
/// Same as [`write_table_report`]
pub fn write_flamebearer(
    raw: &RawFlamebearer,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing flamebearer to: {}", output_path.display());

    let profile = FlamebearerProfile::from(raw.clone());
    write_json(&profile, output_path)?;

    info!(
        "Flamebearer written successfully ({} levels, {} bytes)",
        raw.levels.len(),
        calculate_file_size(output_path)
    );
    Ok(())
}

fn write_json<T: Serialize>(value: &T, output_path: &Path) -> Result<(), OutputError> {
    prepare_output_path(output_path)?;

    let file = File::create(output_path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;

    Ok(())
}

/// Validate an output path and create its parent directories
///
/// **Internal** - shared by every writer in this module tree
pub(crate) fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

/// Calculate file size in bytes
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
