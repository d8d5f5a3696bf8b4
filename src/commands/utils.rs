//! Helpers shared by the commands, plus the small `validate` and `version` commands.

use crate::codec::{decode_flamebearer, parse_raw, validate};
use crate::model::FlamebearerModel;
use crate::palette::{FlamegraphPalette, PALETTE_NAMES};
use crate::utils::config::{RenderConfig, SCHEMA_VERSION};
use anyhow::{anyhow, Context, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Read and decode a flamebearer file into a model
pub fn load_model(path: &Path) -> Result<FlamebearerModel> {
    let fb = crate::codec::read_flamebearer(path)
        .with_context(|| format!("Failed to decode flamebearer {}", path.display()))?;
    debug!(
        "Decoded {} profile: {} levels, {} ticks",
        fb.format(),
        fb.levels().len(),
        fb.num_ticks()
    );
    Ok(FlamebearerModel::new(fb))
}

/// Load the TOML config if given, defaults otherwise
pub fn load_config(path: Option<&Path>) -> Result<RenderConfig> {
    match path {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(RenderConfig::default()),
    }
}

/// Look up a palette by name
pub fn resolve_palette(name: &str) -> Result<FlamegraphPalette> {
    FlamegraphPalette::by_name(name).ok_or_else(|| {
        anyhow!(
            "Unknown palette '{}' (expected one of: {})",
            name,
            PALETTE_NAMES.join(", ")
        )
    })
}

/// Validate a flamebearer JSON file and print a summary
pub fn validate_flamebearer_file(file_path: PathBuf) -> Result<()> {
    println!("Validating flamebearer: {}", file_path.display());

    let content = fs::read_to_string(&file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;
    let raw = parse_raw(&content).context("Not a flamebearer payload")?;
    validate(&raw).context("Invalid flamebearer")?;
    let fb = decode_flamebearer(&raw)?;

    println!("✓ Valid flamebearer JSON");
    println!("  Format: {}", fb.format());
    println!("  Units: {}", fb.units());
    println!("  Sample Rate: {}", fb.sample_rate());
    println!("  Levels: {}", fb.levels().len());
    println!("  Names: {}", fb.names().len());
    println!("  Total Ticks: {}", fb.num_ticks());
    if let (Some(left), Some(right)) = (fb.left_ticks(), fb.right_ticks()) {
        println!("  Baseline/Comparison Ticks: {} / {}", left, right);
    }

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("flamebearer v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Decode, render and compare flamebearer profiles.");
}
