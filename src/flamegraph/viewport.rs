//! View parameters and the tick-to-pixel projection.
//!
//! [`Projection`] is the only place where ticks become pixels. The renderer
//! draws with it and the hit tester inverts it, so what is clicked is
//! always what was drawn.

use super::canvas::Rect;
use super::fit::FitMode;
use crate::model::{FlamebearerModel, NodeRef};
use crate::palette::FlamegraphPalette;
use crate::utils::config::RenderConfig;
use crate::utils::error::RenderError;
use log::debug;

/// What the user is looking at
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    /// Re-roots percentages and the drawn subtree at this node
    pub focused_node: Option<NodeRef>,
    /// Stretches this node's span to the full canvas width
    pub zoom: Option<NodeRef>,
    pub fit_mode: FitMode,
    /// Case-sensitive substring; non-matching bars are dimmed
    pub highlight_query: String,
    pub palette: FlamegraphPalette,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_focus(mut self, node: NodeRef) -> Self {
        self.focused_node = Some(node);
        self
    }

    pub fn with_zoom(mut self, node: NodeRef) -> Self {
        self.zoom = Some(node);
        self
    }

    pub fn with_fit_mode(mut self, fit_mode: FitMode) -> Self {
        self.fit_mode = fit_mode;
        self
    }

    pub fn with_highlight(mut self, query: impl Into<String>) -> Self {
        self.highlight_query = query.into();
        self
    }

    pub fn with_palette(mut self, palette: FlamegraphPalette) -> Self {
        self.palette = palette;
        self
    }

    /// True when `name` should be drawn at full opacity
    pub fn is_highlighted(&self, name: &str) -> bool {
        self.highlight_query.is_empty() || name.contains(&self.highlight_query)
    }
}

/// Vertical band of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Collapsed-ancestors bar shown above a focused subtree
    FocusHeader,
    Level(usize),
}

/// Resolved linear mapping between ticks and pixels for one viewport
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    width: f64,
    range_start: f64,
    range_end: f64,
    px_per_tick: f64,
    top_level: usize,
    header_rows: usize,
    depth: usize,
    focus_span: Option<(u64, u64)>,
    zoom_level: Option<usize>,
    percent_base: u64,
    px_per_level: f64,
    bar_height: f64,
    min_bar_width: f64,
}

impl Projection {
    /// Resolve a viewport against a model and a canvas width
    ///
    /// # Errors
    /// * `RenderError::InvalidCanvasWidth` - width is zero, negative or not finite
    /// * `RenderError::NodeNotInTree` - focus or zoom does not address a node
    /// * `RenderError::ZoomAboveFocus` - zoomed node sits above the focused level
    pub fn new(
        model: &FlamebearerModel,
        viewport: &Viewport,
        canvas_width: f64,
        config: &RenderConfig,
    ) -> Result<Self, RenderError> {
        if !canvas_width.is_finite() || canvas_width <= 0.0 {
            return Err(RenderError::InvalidCanvasWidth(canvas_width));
        }

        let focus = viewport.focused_node.map(|n| model.check(n)).transpose()?;
        let zoom = viewport.zoom.map(|n| model.check(n)).transpose()?;

        if let (Some(z), Some(f)) = (zoom, focus) {
            if z.level < f.level {
                return Err(RenderError::ZoomAboveFocus {
                    zoom_level: z.level,
                    focus_level: f.level,
                });
            }
        }

        let span = |node: NodeRef| {
            let offset = model.offset(node);
            (offset, offset + model.total(node))
        };

        let (range_start, range_end) = match zoom {
            Some(node) => {
                let (start, end) = span(node);
                (start as f64, end as f64)
            }
            None => (0.0, model.num_ticks() as f64),
        };
        let range_ticks = range_end - range_start;
        let px_per_tick = if range_ticks > 0.0 {
            canvas_width / range_ticks
        } else {
            0.0
        };

        let percent_base = match focus {
            Some(node) => model.total(node),
            None => model.num_ticks(),
        };

        debug!(
            "Projection: ticks [{}, {}), {:.4} px/tick, focus {:?}, zoom {:?}",
            range_start, range_end, px_per_tick, focus, zoom
        );

        Ok(Self {
            width: canvas_width,
            range_start,
            range_end,
            px_per_tick,
            top_level: focus.map_or(0, |n| n.level),
            header_rows: usize::from(focus.is_some_and(|n| n.level > 0)),
            depth: model.depth(),
            focus_span: focus.map(span),
            zoom_level: zoom.map(|n| n.level),
            percent_base,
            px_per_level: config.px_per_level,
            bar_height: config.bar_height,
            min_bar_width: config.min_bar_width,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn px_per_tick(&self) -> f64 {
        self.px_per_tick
    }

    /// First level drawn below the optional focus header
    pub fn top_level(&self) -> usize {
        self.top_level
    }

    pub fn has_focus_header(&self) -> bool {
        self.header_rows > 0
    }

    /// Denominator for the percentages shown in labels
    pub fn percent_base(&self) -> u64 {
        self.percent_base
    }

    pub fn zoom_level(&self) -> Option<usize> {
        self.zoom_level
    }

    pub fn tick_to_x(&self, tick: f64) -> f64 {
        (tick - self.range_start) * self.px_per_tick
    }

    pub fn x_to_tick(&self, x: f64) -> f64 {
        if self.px_per_tick == 0.0 {
            return self.range_start;
        }
        x / self.px_per_tick + self.range_start
    }

    /// Number of rows drawn, including the focus header
    pub fn rows(&self) -> usize {
        self.header_rows + self.depth.saturating_sub(self.top_level)
    }

    pub fn height(&self) -> f64 {
        self.rows() as f64 * self.px_per_level
    }

    pub fn level_y(&self, level: usize) -> f64 {
        (self.header_rows + level).saturating_sub(self.top_level) as f64 * self.px_per_level
    }

    /// Full-width bar of the focus header
    pub fn header_rect(&self) -> Option<Rect> {
        self.has_focus_header()
            .then(|| Rect::new(0.0, 0.0, self.width, self.bar_height))
    }

    /// Which row a vertical pixel position falls into
    pub fn row_at(&self, y: f64) -> Option<RowKind> {
        if !y.is_finite() || y < 0.0 {
            return None;
        }
        let row = (y / self.px_per_level).floor() as usize;
        if row >= self.rows() {
            return None;
        }
        if row < self.header_rows {
            Some(RowKind::FocusHeader)
        } else {
            Some(RowKind::Level(row - self.header_rows + self.top_level))
        }
    }

    /// Pixel rectangle of a node, or `None` if the node is not drawn
    ///
    /// A node is drawn when it lies within the focused subtree, overlaps
    /// the visible tick range and is at least `min_bar_width` wide after
    /// clipping to the canvas.
    pub fn bar_rect(&self, model: &FlamebearerModel, node: NodeRef) -> Option<Rect> {
        if node.level < self.top_level {
            return None;
        }

        let start = model.offset(node);
        let end = start + model.total(node);

        if let Some((focus_start, focus_end)) = self.focus_span {
            if start < focus_start || end > focus_end {
                return None;
            }
        }
        if end as f64 <= self.range_start || start as f64 >= self.range_end {
            return None;
        }

        let x0 = self.tick_to_x(start as f64).max(0.0);
        let x1 = self.tick_to_x(end as f64).min(self.width);
        let width = x1 - x0;
        if width < self.min_bar_width {
            return None;
        }

        Some(Rect::new(x0, self.level_y(node.level), width, self.bar_height))
    }
}
