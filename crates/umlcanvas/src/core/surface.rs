//! Drawing surface abstraction
//!
//! A surface is anything a diagram can be drawn onto: a character grid, an
//! SVG document, or a browser canvas. Coordinates are pixels with the origin
//! at the top-left corner.

use anyhow::Result;

use super::{Marker, Palette, Point};

/// Height of one text line, in pixels
pub const LINE_HEIGHT: f64 = 16.0;

/// Approximate advance of one character, in pixels
pub const CHAR_WIDTH: f64 = 8.0;

/// Horizontal placement of text relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Primitive drawing operations shared by every output target
pub trait Surface {
    /// Erase everything and paint the background
    fn clear(&mut self, palette: &Palette);

    /// Outline a rectangle
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Draw a straight line
    fn stroke_line(&mut self, from: Point, to: Point, dashed: bool);

    /// Write one line of text; `y` is the top of the text line
    fn fill_text(&mut self, x: f64, y: f64, text: &str, align: TextAlign);

    /// Decorate the end of a line at `tip`, pointing away from `from`
    fn marker(&mut self, tip: Point, from: Point, marker: Marker);
}

/// Something that can draw itself onto a surface
///
/// `Context` carries whatever the element needs besides itself, e.g. the
/// class list a relationship resolves its ends against. An element that
/// cannot be drawn returns an error; the caller decides whether to skip it.
pub trait Draw<Context: ?Sized> {
    fn draw(&self, surface: &mut dyn Surface, context: &Context) -> Result<()>;
}
