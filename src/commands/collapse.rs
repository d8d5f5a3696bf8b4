//! Collapse and build commands.
//!
//! `collapse` exports a flamebearer as collapsed stacks; `build` goes the
//! other way, optionally pairing a baseline with a comparison.

use super::utils::load_model;
use crate::aggregator::{
    collapse, collapsed_to_string, read_collapsed, CollapsedStack, FlamebearerBuilder,
};
use crate::codec::UnitKind;
use crate::output::{write_flamebearer, write_text};
use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

/// Arguments for the collapse command
#[derive(Debug, Clone, Default)]
pub struct CollapseArgs {
    pub input: PathBuf,

    /// Write here instead of stdout
    pub output: Option<PathBuf>,
}

/// Execute the collapse command
pub fn execute_collapse(args: CollapseArgs) -> Result<()> {
    let model = load_model(&args.input)?;
    let stacks = collapse(&model);
    let text = collapsed_to_string(&stacks);

    match &args.output {
        Some(path) => {
            write_text(&text, path).context("Failed to write collapsed stacks")?;
            info!("✓ {} stacks written to: {}", stacks.len(), path.display());
        }
        None => print!("{}", text),
    }

    Ok(())
}

/// Arguments for the build command
#[derive(Debug, Clone)]
pub struct BuildArgs {
    /// Collapsed stacks (the comparison when a baseline is given)
    pub input: PathBuf,

    /// Baseline collapsed stacks; produces a diff profile
    pub baseline: Option<PathBuf>,

    pub output: PathBuf,
    pub units: UnitKind,
    pub sample_rate: u32,
    pub spy_name: Option<String>,
}

impl Default for BuildArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            baseline: None,
            output: PathBuf::from("flamebearer.json"),
            units: UnitKind::Samples,
            sample_rate: 100,
            spy_name: None,
        }
    }
}

/// Execute the build command
pub fn execute_build(args: BuildArgs) -> Result<()> {
    let stacks = read_stacks(&args.input)?;

    let builder = match &args.baseline {
        Some(baseline_path) => {
            let baseline = read_stacks(baseline_path)?;
            info!(
                "Building diff profile from {} baseline and {} comparison stacks",
                baseline.len(),
                stacks.len()
            );
            FlamebearerBuilder::double(&baseline, &stacks)
        }
        None => {
            info!("Building profile from {} stacks", stacks.len());
            FlamebearerBuilder::single(&stacks)
        }
    };

    let raw = builder
        .with_units(args.units)
        .with_sample_rate(args.sample_rate)
        .with_spy_name(args.spy_name.unwrap_or_default())
        .build()
        .context("Failed to build flamebearer")?;

    write_flamebearer(&raw, &args.output).context("Failed to write flamebearer JSON")?;
    info!("✓ Flamebearer written to: {}", args.output.display());

    Ok(())
}

fn read_stacks(path: &Path) -> Result<Vec<CollapsedStack>> {
    read_collapsed(path)
        .with_context(|| format!("Failed to load collapsed stacks {}", path.display()))
}
