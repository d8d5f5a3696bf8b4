//! Render command implementation.
//!
//! The render command:
//! 1. Loads the render configuration
//! 2. Reads and decodes the flamebearer
//! 3. Resolves the viewport (focus, zoom, highlight, palette)
//! 4. Generates the SVG flame graph
//! 5. Writes it to disk

use super::utils::{load_config, load_model, resolve_palette};
use crate::flamegraph::{generate_flamegraph, FitMode, Viewport};
use crate::model::NodeRef;
use crate::output::write_svg;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct RenderArgs {
    /// Flamebearer JSON to read
    pub input: PathBuf,

    /// SVG file to write
    pub output: PathBuf,

    /// TOML render configuration; CLI values override it
    pub config: Option<PathBuf>,

    pub title: Option<String>,
    pub width: Option<usize>,
    pub fit_mode: Option<FitMode>,
    pub palette: Option<String>,

    /// Dim every frame whose name does not contain this
    pub highlight: Option<String>,

    pub focus: Option<NodeRef>,
    pub zoom: Option<NodeRef>,
}

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Config file or profile cannot be read
/// * Unknown palette name
/// * Focus/zoom do not address a node, or zoom sits above focus
/// * SVG cannot be written
pub fn execute_render(args: RenderArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Step 1/4: Loading configuration...");
    let mut config = load_config(args.config.as_deref())?;
    if let Some(title) = args.title {
        config = config.with_title(title);
    }
    if let Some(width) = args.width {
        config = config.with_width(width);
    }
    if let Some(fit_mode) = args.fit_mode {
        config = config.with_fit_mode(fit_mode);
    }
    if let Some(palette) = args.palette {
        config = config.with_palette(palette);
    }
    config.validate().context("Invalid render configuration")?;

    info!("Step 2/4: Decoding {}...", args.input.display());
    let model = load_model(&args.input)?;

    info!("Step 3/4: Generating flamegraph...");
    let mut viewport = Viewport::new()
        .with_fit_mode(config.fit_mode)
        .with_palette(resolve_palette(&config.palette)?);
    if let Some(query) = args.highlight {
        viewport = viewport.with_highlight(query);
    }
    if let Some(node) = args.focus {
        viewport = viewport.with_focus(node);
    }
    if let Some(node) = args.zoom {
        viewport = viewport.with_zoom(node);
    }

    let (svg, summary) =
        generate_flamegraph(&model, &viewport, &config).context("Failed to render flamegraph")?;
    info!(
        "Drew {} nodes ({} skipped), {} labels",
        summary.nodes_drawn, summary.nodes_skipped, summary.labels_drawn
    );

    info!("Step 4/4: Writing output...");
    write_svg(&svg, &args.output).context("Failed to write flamegraph SVG")?;
    info!("✓ Flamegraph written to: {}", args.output.display());

    info!("Render completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}
