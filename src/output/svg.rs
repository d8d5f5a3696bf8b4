//! SVG and plain-text file writers.

use super::json::prepare_output_path;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write SVG content to a file
///
/// **Public** - main entry point for SVG output
///
/// # Arguments
/// * `svg_content` - SVG document from the flame graph generator
/// * `output_path` - Path to output SVG file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
///
/// # Example
/// ```ignore
/// let (svg, _) = generate_flamegraph(&model, &viewport, &config)?;
/// write_svg(&svg, "flamegraph.svg")?;
/// ```
pub fn write_svg(svg_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing SVG to: {}", output_path.display());

    if output_path.extension().is_some_and(|ext| ext != "svg") {
        debug!("File does not have .svg extension: {}", output_path.display());
    }

    write_bytes(svg_content.as_bytes(), output_path)?;

    let file_size = svg_content.len();
    info!(
        "SVG written successfully ({} bytes, {:.2} KB)",
        file_size,
        file_size as f64 / 1024.0
    );
    Ok(())
}

/// Write UTF-8 text (e.g. collapsed stacks) to a file
///
/// # Errors
/// Same as [`write_svg`]
pub fn write_text(content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing text to: {}", output_path.display());

    write_bytes(content.as_bytes(), output_path)?;

    info!("Text written successfully ({} bytes)", content.len());
    Ok(())
}

fn write_bytes(content: &[u8], output_path: &Path) -> Result<(), OutputError> {
    prepare_output_path(output_path)?;

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content)?;
    writer.flush()?;

    Ok(())
}
