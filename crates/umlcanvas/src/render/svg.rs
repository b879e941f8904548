//! SVG surface
//!
//! Collects drawing calls as SVG elements and wraps them in a document
//! sized to the drawn content plus padding.

use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use crate::core::{Marker, Palette, Point, Surface, TextAlign, Theme, CHAR_WIDTH, LINE_HEIGHT};

const FONT_SIZE: f64 = 13.0;

/// A [`Surface`] that produces an SVG document
#[derive(Debug, Clone)]
pub struct SvgSurface {
    palette: Palette,
    padding: f64,
    elements: Vec<String>,
    bounds: Option<(f64, f64, f64, f64)>,
}

impl SvgSurface {
    pub fn new(padding: f64) -> Self {
        Self {
            palette: Theme::Default.palette(),
            padding: padding.max(0.0),
            elements: Vec::new(),
            bounds: None,
        }
    }

    /// Number of elements drawn since the last clear
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn include(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        let (lo_x, hi_x) = (x0.min(x1), x0.max(x1));
        let (lo_y, hi_y) = (y0.min(y1), y0.max(y1));
        self.bounds = Some(match self.bounds {
            None => (lo_x, lo_y, hi_x, hi_y),
            Some((a, b, c, d)) => (a.min(lo_x), b.min(lo_y), c.max(hi_x), d.max(hi_y)),
        });
    }

    /// The complete SVG document
    pub fn finish(&self) -> String {
        let (min_x, min_y, max_x, max_y) = self.bounds.unwrap_or((0.0, 0.0, 0.0, 0.0));
        let x = min_x - self.padding;
        let y = min_y - self.padding;
        let width = (max_x - min_x + 2.0 * self.padding).max(1.0).ceil();
        let height = (max_y - min_y + 2.0 * self.padding).max(1.0).ceil();

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="{x} {y} {w} {h}">"#,
            w = num(width),
            h = num(height),
            x = num(x),
            y = num(y),
        );
        let _ = writeln!(
            svg,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            num(x),
            num(y),
            num(width),
            num(height),
            self.palette.background
        );
        for element in &self.elements {
            svg.push_str(element);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self, palette: &Palette) {
        self.palette = *palette;
        self.elements.clear();
        self.bounds = None;
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.include(x, y, x + width, y + height);
        self.elements.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="1"/>"#,
            num(x),
            num(y),
            num(width),
            num(height),
            self.palette.line
        ));
    }

    fn stroke_line(&mut self, from: Point, to: Point, dashed: bool) {
        self.include(from.x, from.y, to.x, to.y);
        let dash = if dashed { r#" stroke-dasharray="6 4""# } else { "" };
        self.elements.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="1"{}/>"#,
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            self.palette.line,
            dash
        ));
    }

    fn fill_text(&mut self, x: f64, y: f64, text: &str, align: TextAlign) {
        let width = text.width() as f64 * CHAR_WIDTH;
        let (left, anchor) = match align {
            TextAlign::Left => (x, "start"),
            TextAlign::Center => (x - width / 2.0, "middle"),
        };
        self.include(left, y, left + width, y + LINE_HEIGHT);

        let baseline = y + LINE_HEIGHT * 0.75;
        self.elements.push(format!(
            r#"<text x="{}" y="{}" font-family="monospace" font-size="{}" fill="{}" text-anchor="{}">{}</text>"#,
            num(x),
            num(baseline),
            FONT_SIZE,
            self.palette.text,
            anchor,
            escape_xml(text)
        ));
    }

    fn marker(&mut self, tip: Point, from: Point, marker: Marker) {
        let Some(points) = marker.outline(tip, from) else {
            return;
        };
        let fill = if marker.is_filled() {
            self.palette.line
        } else {
            self.palette.background
        };

        for p in &points {
            self.include(p.x, p.y, p.x, p.y);
        }
        let coords: Vec<String> = points
            .iter()
            .map(|p| format!("{},{}", num(p.x), num(p.y)))
            .collect();
        self.elements.push(format!(
            r#"<polygon points="{}" fill="{}" stroke="{}" stroke-width="1"/>"#,
            coords.join(" "),
            fill,
            self.palette.line
        ));
    }
}

/// Format a coordinate with at most two decimals
fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
