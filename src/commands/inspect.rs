//! Inspect command implementation.
//!
//! Resolves a pixel position on the rendered flame graph to a node and
//! prints its tooltip, using the same layout as `render`.

use super::utils::{load_config, load_model, resolve_palette};
use crate::flamegraph::{node_at, Tooltip, Viewport};
use crate::model::NodeRef;
use crate::output::render_tooltip;
use anyhow::Result;
use log::info;
use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Debug, Clone, Default)]
pub struct InspectArgs {
    pub input: PathBuf,
    pub config: Option<PathBuf>,

    /// Pointer position in flame graph pixels (title excluded)
    pub x: f64,
    pub y: f64,

    pub width: Option<usize>,
    pub focus: Option<NodeRef>,
    pub zoom: Option<NodeRef>,
}

/// Execute the inspect command
pub fn execute_inspect(args: InspectArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config = config.with_width(width);
    }

    let model = load_model(&args.input)?;
    let palette = resolve_palette(&config.palette)?;

    let mut viewport = Viewport::new()
        .with_fit_mode(config.fit_mode)
        .with_palette(palette.clone());
    if let Some(node) = args.focus {
        viewport = viewport.with_focus(node);
    }
    if let Some(node) = args.zoom {
        viewport = viewport.with_zoom(node);
    }

    match node_at(&model, &viewport, config.width as f64, &config, args.x, args.y) {
        Some(hit) => {
            info!("Hit node {} at ({}, {})", hit.node, args.x, args.y);
            let tooltip = Tooltip::for_model(&model, &hit.data, &palette);
            println!("{}", render_tooltip(&tooltip));
            println!("  Node: {}", hit.node);
        }
        None => println!("No node at ({}, {})", args.x, args.y),
    }

    Ok(())
}
