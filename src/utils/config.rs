//! Configuration and constants for rendering and reports.

use crate::flamegraph::FitMode;
use crate::utils::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current table report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Vertical layout: one row per level, bars leave a small gap below them
pub const PX_PER_LEVEL: f64 = 22.0;
pub const BAR_GAP: f64 = 0.5;
pub const BAR_HEIGHT: f64 = PX_PER_LEVEL - BAR_GAP;

/// Bars narrower than this (in pixels) are not drawn and cannot be hit
pub const MIN_BAR_WIDTH: f64 = 1.0;

/// Bars narrower than this (in pixels) never get a label
pub const LABEL_THRESHOLD: f64 = 20.0;

/// Horizontal padding between a bar's left edge and its label
pub const LABEL_PADDING: f64 = 3.0;

pub const HIGHLIGHT_DIM_ALPHA: f64 = 0.35;
pub const ZOOM_DIM_ALPHA: f64 = 0.33;

pub const DEFAULT_WIDTH: usize = 1200;
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Advance of one monospace glyph at the default font size
pub const CHAR_WIDTH: f64 = 7.0;

/// Name given to the synthetic root of built profiles
pub const ROOT_NAME: &str = "total";

/// Label used for nodes whose name is missing from the names table
pub const UNKNOWN_NAME: &str = "unknown";

/// Rendering configuration, loadable from TOML
///
/// Every field is optional in the file; missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub title: String,
    pub width: usize,
    pub palette: String,
    pub fit_mode: FitMode,
    pub px_per_level: f64,
    pub bar_height: f64,
    pub min_bar_width: f64,
    pub label_threshold: f64,
    pub highlight_dim_alpha: f64,
    pub zoom_dim_alpha: f64,
    pub font_size: f64,
    pub char_width: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: "Flame Graph".to_string(),
            width: DEFAULT_WIDTH,
            palette: "default".to_string(),
            fit_mode: FitMode::Head,
            px_per_level: PX_PER_LEVEL,
            bar_height: BAR_HEIGHT,
            min_bar_width: MIN_BAR_WIDTH,
            label_threshold: LABEL_THRESHOLD,
            highlight_dim_alpha: HIGHLIGHT_DIM_ALPHA,
            zoom_dim_alpha: ZOOM_DIM_ALPHA,
            font_size: DEFAULT_FONT_SIZE,
            char_width: CHAR_WIDTH,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_palette(mut self, palette: impl Into<String>) -> Self {
        self.palette = palette.into();
        self
    }

    pub fn with_fit_mode(mut self, fit_mode: FitMode) -> Self {
        self.fit_mode = fit_mode;
        self
    }

    /// Load a render configuration from a TOML file
    ///
    /// # Errors
    /// * `ConfigError::Io` - file cannot be read
    /// * `ConfigError::Toml` - file is not valid TOML for this struct
    /// * `ConfigError::Invalid` - values are out of range
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading render config from {}", path.display());

        let content = fs::read_to_string(path)?;
        let config: RenderConfig = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Check that the layout values can produce a sensible drawing
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::Invalid("width must be greater than 0".to_string()));
        }
        if self.px_per_level <= 0.0 || self.bar_height <= 0.0 {
            return Err(ConfigError::Invalid(
                "px_per_level and bar_height must be positive".to_string(),
            ));
        }
        if self.bar_height > self.px_per_level {
            return Err(ConfigError::Invalid(format!(
                "bar_height ({}) cannot exceed px_per_level ({})",
                self.bar_height, self.px_per_level
            )));
        }
        for (field, alpha) in [
            ("highlight_dim_alpha", self.highlight_dim_alpha),
            ("zoom_dim_alpha", self.zoom_dim_alpha),
        ] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(ConfigError::Invalid(format!("{} must be within 0..=1", field)));
            }
        }
        if self.char_width <= 0.0 {
            return Err(ConfigError::Invalid("char_width must be positive".to_string()));
        }
        Ok(())
    }
}
