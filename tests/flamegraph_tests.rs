mod common;

use common::{double_model, single_model};
use flamebearer_engine::flamegraph::{
    generate_flamegraph, node_at, render, RecordingCanvas, Tooltip, Viewport,
};
use flamebearer_engine::model::{FlamebearerModel, NodeRef};
use flamebearer_engine::palette::FlamegraphPalette;
use flamebearer_engine::utils::config::RenderConfig;
use flamebearer_engine::utils::RenderError;
use pretty_assertions::assert_eq;

/// Every drawn bar must resolve back to the node it was drawn for
fn assert_bars_resolve(model: &FlamebearerModel, viewport: &Viewport, width: f64) {
    let config = RenderConfig::default();
    let mut canvas = RecordingCanvas::new(width, config.char_width);
    let summary = render(model, &mut canvas, viewport, &config).unwrap();

    let bars: Vec<_> = canvas.rects().collect();
    assert!(!bars.is_empty());
    assert!(summary.nodes_drawn > 0);

    for (rect, _, title) in bars {
        let (x, y) = rect.center();
        let hit = node_at(model, viewport, width, &config, x, y)
            .unwrap_or_else(|| panic!("no node at center of {:?}", rect));
        let title = title.unwrap();
        assert!(
            title.starts_with(hit.data.name()),
            "bar {:?} resolved to {}",
            title,
            hit.data.name()
        );
        assert_eq!(&hit.rect, rect);
    }
}

#[test]
fn test_drawn_bars_resolve_to_their_nodes() {
    assert_bars_resolve(&single_model(), &Viewport::new(), 1200.0);
    assert_bars_resolve(&double_model(), &Viewport::new(), 1200.0);
}

#[test]
fn test_drawn_bars_resolve_under_focus_and_zoom() {
    let model = single_model();
    assert_bars_resolve(&model, &Viewport::new().with_focus(NodeRef::new(1, 0)), 800.0);
    assert_bars_resolve(&model, &Viewport::new().with_zoom(NodeRef::new(1, 4)), 800.0);
    assert_bars_resolve(
        &model,
        &Viewport::new()
            .with_focus(NodeRef::new(1, 0))
            .with_zoom(NodeRef::new(2, 0)),
        800.0,
    );
}

#[test]
fn test_hit_outside_drawing_is_none() {
    let model = single_model();
    let config = RenderConfig::default();
    let viewport = Viewport::new();

    assert!(node_at(&model, &viewport, 1200.0, &config, -1.0, 5.0).is_none());
    assert!(node_at(&model, &viewport, 1200.0, &config, 1200.0, 5.0).is_none());
    assert!(node_at(&model, &viewport, 1200.0, &config, 10.0, 10_000.0).is_none());
    // c has no children
    assert!(node_at(&model, &viewport, 1200.0, &config, 1000.0, 55.0).is_none());
}

#[test]
fn test_focus_header_resolves_to_root() {
    let model = single_model();
    let config = RenderConfig::default();
    let viewport = Viewport::new().with_focus(NodeRef::new(2, 0));

    let hit = node_at(&model, &viewport, 1200.0, &config, 100.0, 5.0).unwrap();
    assert_eq!(hit.node, NodeRef::new(0, 0));
}

#[test]
fn test_zoom_above_focus_is_rejected() {
    let model = single_model();
    let config = RenderConfig::default();
    let viewport = Viewport::new()
        .with_focus(NodeRef::new(2, 0))
        .with_zoom(NodeRef::new(1, 0));
    let mut canvas = RecordingCanvas::new(1200.0, config.char_width);

    let err = render(&model, &mut canvas, &viewport, &config).unwrap_err();
    assert_eq!(
        err,
        RenderError::ZoomAboveFocus {
            zoom_level: 1,
            focus_level: 2
        }
    );
    assert!(node_at(&model, &viewport, 1200.0, &config, 10.0, 5.0).is_none());
}

#[test]
fn test_tooltip_for_hit_in_double_profile() {
    let model = double_model();
    let config = RenderConfig::default();
    let palette = FlamegraphPalette::default();

    // a covers ticks [0, 25) of 30 on the second row
    let hit = node_at(&model, &Viewport::new(), 1200.0, &config, 100.0, 30.0).unwrap();
    assert_eq!(hit.data.name(), "a");

    let tooltip = Tooltip::for_model(&model, &hit.data, &palette);
    assert_eq!(tooltip.title, "a");
    assert_eq!(tooltip.rows.len(), 3);
    assert_eq!(tooltip.rows[0].values, vec!["100%", "75%"]);
    assert_eq!(tooltip.diff.map(|d| d.text()), Some("-25.00%".to_string()));
}

#[test]
fn test_generate_svg_document() {
    let model = single_model();
    let config = RenderConfig::default().with_title("CPU <main>");

    let (svg, summary) = generate_flamegraph(&model, &Viewport::new(), &config).unwrap();

    assert_eq!(summary.nodes_drawn, 4);
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("CPU &lt;main&gt;"));
    assert!(svg.trim_end().ends_with("</svg>"));
}
