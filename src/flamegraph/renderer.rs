//! Flame graph renderer.
//!
//! This module handles:
//! - Walking the model level by level under a viewport
//! - Coloring bars by package (single) or by change (double)
//! - Fitting labels into bars
//! - Dimming for highlight queries and zoom ancestors

use super::canvas::{Canvas, Rect};
use super::fit::fit_label;
use super::viewport::{Projection, Viewport};
use crate::model::{FlamebearerModel, NodeRef};
use crate::palette::{package_name, Color};
use crate::units::{format_percent, get_formatter, percent_of, DiffLabel, Formatter};
use crate::utils::config::{RenderConfig, LABEL_PADDING, ROOT_NAME};
use crate::utils::error::RenderError;
use log::{debug, info};
use serde::Serialize;

const LABEL_COLOR: Color = Color::rgb(34, 34, 34);
const HEADER_GREY: u8 = 200;
const HEADER_ALPHA: f64 = 0.66;

/// What a render pass produced
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderSummary {
    pub nodes_drawn: usize,
    /// Nodes outside the view or narrower than the minimum bar width
    pub nodes_skipped: usize,
    pub labels_drawn: usize,
    pub height: f64,
}

/// Render a flame graph onto a canvas
///
/// **Public** - main entry point for drawing
///
/// # Arguments
/// * `model` - Decoded tree
/// * `canvas` - Target surface; its width sets the horizontal scale
/// * `viewport` - Focus, zoom, fit mode, highlight and palette
/// * `config` - Layout constants
///
/// # Errors
/// * `RenderError::InvalidCanvasWidth` - canvas width is not usable
/// * `RenderError::NodeNotInTree` - focus or zoom does not address a node
/// * `RenderError::ZoomAboveFocus` - zoomed node sits above the focused level
pub fn render(
    model: &FlamebearerModel,
    canvas: &mut dyn Canvas,
    viewport: &Viewport,
    config: &RenderConfig,
) -> Result<RenderSummary, RenderError> {
    let projection = Projection::new(model, viewport, canvas.width(), config)?;

    if model.is_empty() {
        debug!("Empty flamebearer, nothing to draw");
        canvas.set_height(0.0);
        return Ok(RenderSummary::default());
    }

    let fb = model.flamebearer();
    let formatter = get_formatter(model.num_ticks() as f64, fb.sample_rate(), fb.units());
    let mut summary = RenderSummary {
        height: projection.height(),
        ..Default::default()
    };

    info!(
        "Rendering {} levels at {:.0}px (focus {:?}, zoom {:?})",
        model.depth(),
        projection.width(),
        viewport.focused_node,
        viewport.zoom
    );

    canvas.set_height(summary.height);

    if let Some(rect) = projection.header_rect() {
        if draw_focus_header(canvas, rect, projection.top_level(), config, viewport) {
            summary.labels_drawn += 1;
        }
    }

    let painter = BarPainter {
        model,
        projection: &projection,
        viewport,
        config,
        formatter: &formatter,
    };

    for level in projection.top_level()..model.depth() {
        for node in model.nodes(level) {
            let Some(rect) = projection.bar_rect(model, node) else {
                summary.nodes_skipped += 1;
                continue;
            };
            summary.nodes_drawn += 1;
            if painter.paint(canvas, node, rect) {
                summary.labels_drawn += 1;
            }
        }
    }

    debug!(
        "Render done: {} drawn, {} skipped, {} labels",
        summary.nodes_drawn, summary.nodes_skipped, summary.labels_drawn
    );

    Ok(summary)
}

/// Text of the collapsed-ancestors bar, e.g. `total (2 levels collapsed)`
pub fn focus_header_text(collapsed_levels: usize) -> String {
    let noun = if collapsed_levels == 1 { "level" } else { "levels" };
    format!("{} ({} {} collapsed)", ROOT_NAME, collapsed_levels, noun)
}

fn draw_focus_header(
    canvas: &mut dyn Canvas,
    rect: Rect,
    collapsed_levels: usize,
    config: &RenderConfig,
    viewport: &Viewport,
) -> bool {
    let text = focus_header_text(collapsed_levels);
    canvas.fill_bar(rect, Color::greyscale(HEADER_GREY, HEADER_ALPHA), &text);

    let available = rect.width - 2.0 * LABEL_PADDING;
    let measure = |s: &str| canvas.measure_text(s);
    match fit_label(viewport.fit_mode, &text, ROOT_NAME, available, measure) {
        Some(label) => {
            canvas.fill_text(
                &label,
                rect.x + LABEL_PADDING,
                rect.y + config.bar_height / 2.0,
                LABEL_COLOR,
            );
            true
        }
        None => false,
    }
}

/// Per-pass state shared by every bar
struct BarPainter<'a> {
    model: &'a FlamebearerModel,
    projection: &'a Projection,
    viewport: &'a Viewport,
    config: &'a RenderConfig,
    formatter: &'a Formatter,
}

impl BarPainter<'_> {
    /// Draw one bar and its label; returns true when a label was drawn
    fn paint(&self, canvas: &mut dyn Canvas, node: NodeRef, rect: Rect) -> bool {
        let name = self.model.name(node);
        let long_name = self.long_name(node, name);

        let color = self.base_color(node, name).with_alpha(self.alpha(node, name));
        canvas.fill_bar(rect, color, &long_name);

        if rect.width < self.config.label_threshold {
            return false;
        }

        let available = rect.width - 2.0 * LABEL_PADDING;
        let measure = |s: &str| canvas.measure_text(s);
        match fit_label(self.viewport.fit_mode, &long_name, name, available, measure) {
            Some(label) => {
                canvas.fill_text(
                    &label,
                    rect.x + LABEL_PADDING,
                    rect.y + self.config.bar_height / 2.0,
                    LABEL_COLOR,
                );
                true
            }
            None => false,
        }
    }

    fn base_color(&self, node: NodeRef, name: &str) -> Color {
        let palette = &self.viewport.palette;
        match self.model.split(node) {
            Some(split) => {
                palette.diff_color(split.self_left, split.self_right, self.model.total(node))
            }
            None => palette.color_for(package_name(self.model.flamebearer().spy_name(), name)),
        }
    }

    fn alpha(&self, node: NodeRef, name: &str) -> f64 {
        let mut alpha: f64 = 1.0;
        if self.projection.zoom_level().is_some_and(|z| node.level < z) {
            alpha = alpha.min(self.config.zoom_dim_alpha);
        }
        if !self.viewport.is_highlighted(name) {
            alpha = alpha.min(self.config.highlight_dim_alpha);
        }
        alpha
    }

    /// `name (12.5%, 1.00 second)` for single, `name (+10.00%)` for double
    fn long_name(&self, node: NodeRef, name: &str) -> String {
        match self.model.split(node) {
            Some(split) => {
                let label = DiffLabel::new(
                    split.total_left,
                    split.total_right,
                    self.model.left_ticks(),
                    self.model.right_ticks(),
                );
                format!("{} {}", name, label)
            }
            None => {
                let total = self.model.total(node);
                let percent = percent_of(total, self.projection.percent_base());
                let value = self
                    .formatter
                    .format(total as f64, self.model.flamebearer().sample_rate());
                format!("{} ({}, {})", name, format_percent(percent), value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_flamebearer, Format, RawFlamebearer, UnitKind};
    use crate::flamegraph::canvas::RecordingCanvas;
    use crate::flamegraph::fit::FitMode;
    use crate::palette::FlamegraphPalette;

    fn model(
        format: Format,
        names: &[&str],
        levels: Vec<Vec<i64>>,
        num_ticks: u64,
    ) -> FlamebearerModel {
        let raw = RawFlamebearer {
            names: names.iter().map(|s| s.to_string()).collect(),
            levels,
            num_ticks,
            max_self: 0,
            format,
            sample_rate: 100,
            units: UnitKind::Samples,
            spy_name: "gospy".to_string(),
            left_ticks: None,
            right_ticks: None,
        };
        FlamebearerModel::new(decode_flamebearer(&raw).unwrap())
    }

    fn single() -> FlamebearerModel {
        // total(100) -> net/http.serve(60) [runtime.gc(30)], main.work(40)
        model(
            Format::Single,
            &["total", "net/http.serve", "runtime.gc", "main.work"],
            vec![
                vec![0, 100, 0, 0],
                vec![0, 60, 30, 1, 0, 40, 40, 3],
                vec![0, 30, 30, 2],
            ],
            100,
        )
    }

    #[test]
    fn test_draws_every_visible_node() {
        let m = single();
        let mut canvas = RecordingCanvas::new(1000.0, 7.0);
        let summary = render(&m, &mut canvas, &Viewport::new(), &RenderConfig::default()).unwrap();

        assert_eq!(summary.nodes_drawn, 4);
        assert_eq!(summary.nodes_skipped, 0);
        assert_eq!(canvas.height(), 66.0);
        assert_eq!(canvas.rects().count(), 4);

        let texts: Vec<&str> = canvas.texts().collect();
        assert_eq!(texts[0], "total (100%, 1.00 second)");
        assert!(texts.contains(&"main.work (40%, 0.40 seconds)"));
    }

    #[test]
    fn test_single_colors_by_package() {
        let m = single();
        let mut canvas = RecordingCanvas::new(1000.0, 7.0);
        render(&m, &mut canvas, &Viewport::new(), &RenderConfig::default()).unwrap();

        let palette = FlamegraphPalette::default();
        let (_, color, title) = canvas.rects().nth(1).unwrap();
        assert_eq!(title, Some("net/http.serve (60%, 0.60 seconds)"));
        assert_eq!(*color, palette.color_for("net/http."));
    }

    #[test]
    fn test_labels_fall_back_and_truncate() {
        let m = single();
        let config = RenderConfig::default();

        // 100px canvas: main.work is 40px, room for 34px = 4 chars
        let mut canvas = RecordingCanvas::new(100.0, 7.0);
        render(&m, &mut canvas, &Viewport::new(), &config).unwrap();
        assert!(canvas.texts().any(|t| t == "m..."));

        let mut canvas = RecordingCanvas::new(100.0, 7.0);
        let viewport = Viewport::new().with_fit_mode(FitMode::Tail);
        render(&m, &mut canvas, &viewport, &config).unwrap();
        assert!(canvas.texts().any(|t| t == "...k"));
    }

    #[test]
    fn test_narrow_bars_get_no_label() {
        let m = single();
        // runtime.gc is 15px wide, below the label threshold
        let mut canvas = RecordingCanvas::new(50.0, 7.0);
        let summary = render(&m, &mut canvas, &Viewport::new(), &RenderConfig::default()).unwrap();
        assert_eq!(summary.nodes_drawn, 4);
        assert!(summary.labels_drawn < 4);
    }

    #[test]
    fn test_highlight_dims_non_matching() {
        let m = single();
        let config = RenderConfig::default();
        let mut canvas = RecordingCanvas::new(1000.0, 7.0);
        let viewport = Viewport::new().with_highlight("main");
        render(&m, &mut canvas, &viewport, &config).unwrap();

        for (_, color, title) in canvas.rects() {
            let title = title.unwrap();
            if title.contains("main") {
                assert_eq!(color.a, 1.0);
            } else {
                assert_eq!(color.a, config.highlight_dim_alpha);
            }
        }
    }

    #[test]
    fn test_zoom_dims_ancestors_only() {
        let m = single();
        let mut canvas = RecordingCanvas::new(1000.0, 7.0);
        let viewport = Viewport::new().with_zoom(NodeRef::new(1, 0));
        let summary = render(&m, &mut canvas, &viewport, &RenderConfig::default()).unwrap();

        // main.work is outside the zoomed range
        assert_eq!(summary.nodes_drawn, 3);
        assert_eq!(summary.nodes_skipped, 1);

        let alphas: Vec<f64> = canvas.rects().map(|(_, c, _)| c.a).collect();
        assert_eq!(alphas, vec![0.33, 1.0, 1.0]);
    }

    #[test]
    fn test_focus_draws_header_and_rebases_percent() {
        let m = single();
        let mut canvas = RecordingCanvas::new(1000.0, 7.0);
        let viewport = Viewport::new().with_focus(NodeRef::new(1, 0));
        let summary = render(&m, &mut canvas, &viewport, &RenderConfig::default()).unwrap();

        assert_eq!(summary.nodes_drawn, 2);
        assert_eq!(canvas.height(), 66.0);

        let texts: Vec<&str> = canvas.texts().collect();
        assert_eq!(texts[0], "total (1 level collapsed)");
        assert_eq!(texts[1], "net/http.serve (100%, 0.60 seconds)");
        assert_eq!(texts[2], "runtime.gc (50%, 0.30 seconds)");
    }

    #[test]
    fn test_double_colors_and_labels() {
        let m = model(
            Format::Double,
            &["total", "a"],
            vec![vec![0, 100, 0, 0, 100, 0, 0], vec![0, 100, 100, 0, 100, 100, 1]],
            200,
        );
        let mut canvas = RecordingCanvas::new(1000.0, 7.0);
        render(&m, &mut canvas, &Viewport::new(), &RenderConfig::default()).unwrap();

        let palette = FlamegraphPalette::default();
        let (_, color, _) = canvas.rects().nth(1).unwrap();
        assert_eq!(*color, palette.neutral);
        assert!(canvas.texts().any(|t| t == "a (+0.00%)"));
    }

    #[test]
    fn test_errors_and_empty_tree() {
        let m = single();
        let viewport = Viewport::new()
            .with_focus(NodeRef::new(2, 0))
            .with_zoom(NodeRef::new(1, 0));
        let mut canvas = RecordingCanvas::new(1000.0, 7.0);
        assert!(matches!(
            render(&m, &mut canvas, &viewport, &RenderConfig::default()),
            Err(RenderError::ZoomAboveFocus { .. })
        ));

        let mut canvas = RecordingCanvas::new(0.0, 7.0);
        assert!(render(&m, &mut canvas, &Viewport::new(), &RenderConfig::default()).is_err());

        let empty = model(Format::Single, &["total"], vec![], 0);
        let mut canvas = RecordingCanvas::new(1000.0, 7.0);
        let summary =
            render(&empty, &mut canvas, &Viewport::new(), &RenderConfig::default()).unwrap();
        assert_eq!(summary, RenderSummary::default());
        assert!(canvas.calls().is_empty());
    }

    #[test]
    fn test_focus_header_text() {
        assert_eq!(focus_header_text(1), "total (1 level collapsed)");
        assert_eq!(focus_header_text(3), "total (3 levels collapsed)");
    }
}
