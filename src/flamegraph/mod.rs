//! Flame graph drawing and interaction.
//!
//! This module handles:
//! - Projecting ticks to pixels under focus and zoom
//! - Drawing bars and labels onto any [`Canvas`]
//! - Resolving pointer positions back to nodes
//! - Tooltip content and SVG output

pub mod canvas;
pub mod fit;
pub mod renderer;
pub mod svg;
pub mod tooltip;
pub mod viewport;

// Re-export main types
pub use canvas::{Canvas, DrawCall, Rect, RecordingCanvas};
pub use fit::{fit_label, FitMode};
pub use hit_test::{node_at, node_at_projected, NodeHit, NodeQueryResult};
pub use renderer::{focus_header_text, render, RenderSummary};
pub use svg::{escape_xml, generate_flamegraph, SvgCanvas};
pub use tooltip::{unit_title, Tooltip, TooltipRow, UnitTitles};
pub use viewport::{Projection, RowKind, Viewport};
