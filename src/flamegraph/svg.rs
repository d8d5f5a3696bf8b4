//! SVG flame graph generation.
//!
//! [`SvgCanvas`] implements [`Canvas`] by appending SVG elements, so the
//! SVG output goes through exactly the same renderer as any other surface.
//! Text width is estimated with a fixed advance per character.

use super::canvas::{Canvas, Rect};
use super::renderer::{render, RenderSummary};
use super::viewport::Viewport;
use crate::model::FlamebearerModel;
use crate::palette::Color;
use crate::utils::config::RenderConfig;
use crate::utils::error::RenderError;
use log::info;

/// Space above the flame graph for the title
const TITLE_HEIGHT: f64 = 30.0;

/// Canvas that accumulates SVG markup
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    char_width: f64,
    font_size: f64,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: f64, char_width: f64, font_size: f64) -> Self {
        Self {
            width,
            height: 0.0,
            char_width,
            font_size,
            body: String::new(),
        }
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Elements drawn so far, without the `<svg>` wrapper
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Wrap the drawn elements in a complete document
    pub fn finish(self, title: &str) -> String {
        let total_height = self.height + TITLE_HEIGHT;
        let mut svg = String::with_capacity(self.body.len() + 512);

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = total_height
        ));
        svg.push_str(&format!(
            r#"<style>.func {{ font: {}px monospace; }} .func:hover {{ stroke: black; stroke-width: 1; cursor: pointer; }}</style>"#,
            self.font_size
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="20" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
            self.width / 2.0,
            escape_xml(title)
        ));
        svg.push_str(&format!(r#"<g transform="translate(0,{})">"#, TITLE_HEIGHT));
        svg.push_str(&self.body);
        svg.push_str("</g></svg>");
        svg
    }
}

impl Canvas for SvgCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn set_height(&mut self, height: f64) {
        self.height = height;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.body.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            color.to_css()
        ));
    }

    fn fill_bar(&mut self, rect: Rect, color: Color, title: &str) {
        self.body.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" class="func"><title>{}</title></rect>"#,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            color.to_css(),
            escape_xml(title)
        ));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color) {
        self.body.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" class="func" dominant-baseline="middle" fill="{}" pointer-events="none">{}</text>"#,
            x,
            y,
            color.to_css(),
            escape_xml(text)
        ));
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }
}

/// Render a complete SVG document
///
/// **Public** - used by the `render` command
///
/// # Errors
/// Same as [`render`]
pub fn generate_flamegraph(
    model: &FlamebearerModel,
    viewport: &Viewport,
    config: &RenderConfig,
) -> Result<(String, RenderSummary), RenderError> {
    let mut canvas = SvgCanvas::new(config.width as f64, config.char_width, config.font_size);
    let summary = render(model, &mut canvas, viewport, config)?;
    let svg = canvas.finish(&config.title);

    info!("Flamegraph generated successfully ({} bytes)", svg.len());
    Ok((svg, summary))
}

/// Escape the five XML special characters
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
