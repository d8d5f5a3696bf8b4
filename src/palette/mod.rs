//! Color assignment for flame graph bars.
//!
//! This module handles:
//! - RGBA colors and CSS output
//! - Swappable palettes (default and colorblind)
//! - Diff gradients between baseline and comparison
//! - Package-based coloring per profiler naming scheme

pub mod color;
pub mod murmur;
pub mod package;
pub mod scheme;

pub use color::Color;
pub use package::{package_name, SpyKind};
pub use scheme::{FlamegraphPalette, DIFF_CLAMP_PERCENT, PALETTE_NAMES};
