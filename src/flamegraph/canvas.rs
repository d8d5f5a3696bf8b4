//! Drawing surface used by the renderer.
//!
//! The renderer only needs filled rectangles, text and text measurement.
//! [`RecordingCanvas`] keeps every call in memory so that callers (and
//! tests) can inspect exactly what was drawn.

use crate::palette::Color;

/// Axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Half-open containment: left/top edges are inside, right/bottom are not
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// 2D drawing surface
pub trait Canvas {
    /// Drawable width in pixels
    fn width(&self) -> f64;

    /// Called once per render with the height the flame graph needs
    fn set_height(&mut self, height: f64);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// `y` is the vertical middle of the text line
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color);

    /// Rendered width of `text` in pixels
    fn measure_text(&self, text: &str) -> f64;

    /// Draw a flame graph bar; surfaces that support hover text can attach `title`
    fn fill_bar(&mut self, rect: Rect, color: Color, _title: &str) {
        self.fill_rect(rect, color);
    }
}

/// One recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Rect {
        rect: Rect,
        color: Color,
        title: Option<String>,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        color: Color,
    },
}

/// In-memory canvas with fixed-advance text measurement
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: f64,
    height: f64,
    char_width: f64,
    calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new(width: f64, char_width: f64) -> Self {
        Self {
            width,
            height: 0.0,
            char_width,
            calls: Vec::new(),
        }
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Recorded bars, in drawing order
    pub fn rects(&self) -> impl Iterator<Item = (&Rect, &Color, Option<&str>)> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Rect { rect, color, title } => Some((rect, color, title.as_deref())),
            DrawCall::Text { .. } => None,
        })
    }

    /// Recorded label texts, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            DrawCall::Rect { .. } => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn set_height(&mut self, height: f64) {
        self.height = height;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::Rect {
            rect,
            color,
            title: None,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }

    fn fill_bar(&mut self, rect: Rect, color: Color, title: &str) {
        self.calls.push(DrawCall::Rect {
            rect,
            color,
            title: Some(title.to_string()),
        });
    }
}
