//! Character-grid surface
//!
//! Pixels map onto cells at [`CHAR_WIDTH`] per column and [`LINE_HEIGHT`]
//! per row. Lines that are neither horizontal nor vertical are routed as
//! three orthogonal segments so they stay readable in a terminal.

use anyhow::Result;

use crate::core::{
    AsciiCanvas, DiagramError, Marker, Palette, Point, Rect, Surface, TextAlign, CHAR_WIDTH,
    LINE_HEIGHT,
};

/// Widest drawing, in columns, a text canvas accepts
pub const MAX_COLUMNS: i64 = 2000;
/// Tallest drawing, in rows, a text canvas accepts
pub const MAX_ROWS: i64 = 1000;

type Cell = (i64, i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dir {
    Left,
    Right,
    Up,
    Down,
}

impl Dir {
    fn between(from: Cell, to: Cell) -> Dir {
        if from.1 == to.1 {
            if to.0 >= from.0 {
                Dir::Right
            } else {
                Dir::Left
            }
        } else if to.1 > from.1 {
            Dir::Down
        } else {
            Dir::Up
        }
    }

    fn step(self, (col, row): Cell) -> Cell {
        match self {
            Dir::Left => (col - 1, row),
            Dir::Right => (col + 1, row),
            Dir::Up => (col, row - 1),
            Dir::Down => (col, row + 1),
        }
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Dir::Left | Dir::Right)
    }
}

// Round half up so that offsets of whole rows stay whole rows for negative coordinates too.
fn to_col(x: f64) -> i64 {
    (x / CHAR_WIDTH + 0.5).floor() as i64
}

fn to_row(y: f64) -> i64 {
    (y / LINE_HEIGHT + 0.5).floor() as i64
}

fn cell(p: Point) -> Cell {
    (to_col(p.x), to_row(p.y))
}

/// Waypoints of the orthogonal route between two cells, ends included
///
/// The route between `b` and `a` is the reverse of the route between `a`
/// and `b`.
fn route(from: Cell, to: Cell) -> Vec<Cell> {
    let (c0, r0) = from;
    let (c1, r1) = to;
    let candidates = if c0 == c1 || r0 == r1 {
        vec![from, to]
    } else if (c1 - c0).abs() >= (r1 - r0).abs() {
        let mid = (c0 + c1).div_euclid(2);
        vec![from, (mid, r0), (mid, r1), to]
    } else {
        let mid = (r0 + r1).div_euclid(2);
        vec![from, (c0, mid), (c1, mid), to]
    };

    let mut points: Vec<Cell> = Vec::with_capacity(candidates.len());
    for point in candidates {
        if points.last() != Some(&point) {
            points.push(point);
        }
    }
    points
}

fn corner(a: Dir, b: Dir) -> char {
    let (h, v) = if a.is_horizontal() { (a, b) } else { (b, a) };
    match (h, v) {
        (Dir::Left, Dir::Down) => '┐',
        (Dir::Left, Dir::Up) => '┘',
        (Dir::Right, Dir::Down) => '┌',
        (Dir::Right, Dir::Up) => '└',
        _ => '┼',
    }
}

/// A [`Surface`] that draws with box-drawing characters
#[derive(Debug, Clone, Default)]
pub struct AsciiSurface {
    canvas: AsciiCanvas,
}

impl AsciiSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn canvas(&self) -> &AsciiCanvas {
        &self.canvas
    }

    /// The drawing as text, cropped to what was drawn
    pub fn finish(&self) -> String {
        self.canvas.to_string()
    }

    /// Fail when the given boxes would spread over more cells than the grid allows
    pub fn check_extent(rects: impl IntoIterator<Item = Rect>) -> Result<()> {
        let mut bounds: Option<(i64, i64, i64, i64)> = None;
        for rect in rects {
            let (c0, r0) = cell(Point::new(rect.x, rect.y));
            let (c1, r1) = cell(Point::new(rect.x + rect.width, rect.y + rect.height));
            let (lo_c, hi_c) = (c0.min(c1), c0.max(c1));
            let (lo_r, hi_r) = (r0.min(r1), r0.max(r1));
            bounds = Some(match bounds {
                None => (lo_c, lo_r, hi_c, hi_r),
                Some((min_c, min_r, max_c, max_r)) => (
                    min_c.min(lo_c),
                    min_r.min(lo_r),
                    max_c.max(hi_c),
                    max_r.max(hi_r),
                ),
            });
        }

        let Some((min_c, min_r, max_c, max_r)) = bounds else {
            return Ok(());
        };
        let columns = max_c.saturating_sub(min_c);
        let rows = max_r.saturating_sub(min_r);
        if columns > MAX_COLUMNS || rows > MAX_ROWS {
            return Err(DiagramError::render_error(format!(
                "diagram spans {}x{} cells, the text canvas holds at most {}x{}",
                columns, rows, MAX_COLUMNS, MAX_ROWS
            ))
            .into());
        }
        Ok(())
    }

    /// Draw the end cell of a line, joining it to a perpendicular border
    fn line_end(&mut self, (col, row): Cell, leaving: Dir, glyph: char) {
        let joined = match (self.canvas.get_char(col, row), leaving) {
            ('│', Dir::Right) => '├',
            ('│', Dir::Left) => '┤',
            ('─', Dir::Down) => '┬',
            ('─', Dir::Up) => '┴',
            (' ', _) => glyph,
            _ => return,
        };
        self.canvas.set_char(col, row, joined);
    }
}

impl Surface for AsciiSurface {
    fn clear(&mut self, _palette: &Palette) {
        self.canvas.clear();
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (left, top) = cell(Point::new(x, y));
        let right = to_col(x + width).max(left + 1);
        let bottom = to_row(y + height).max(top + 1);

        self.canvas
            .draw_horizontal_line(left + 1, top, right - left - 1, '─');
        self.canvas
            .draw_horizontal_line(left + 1, bottom, right - left - 1, '─');
        self.canvas
            .draw_vertical_line(left, top + 1, bottom - top - 1, '│');
        self.canvas
            .draw_vertical_line(right, top + 1, bottom - top - 1, '│');
        self.canvas.set_char(left, top, '┌');
        self.canvas.set_char(right, top, '┐');
        self.canvas.set_char(left, bottom, '└');
        self.canvas.set_char(right, bottom, '┘');
    }

    fn stroke_line(&mut self, from: Point, to: Point, dashed: bool) {
        let (horizontal, vertical) = if dashed { ('╌', '┆') } else { ('─', '│') };
        let points = route(cell(from), cell(to));

        if let [only] = points.as_slice() {
            self.canvas.set_char_if_blank(only.0, only.1, horizontal);
            return;
        }

        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let dir = Dir::between(a, b);
            let glyph = if dir.is_horizontal() { horizontal } else { vertical };
            let mut at = dir.step(a);
            while at != b {
                self.canvas.set_char_if_blank(at.0, at.1, glyph);
                at = dir.step(at);
            }
        }

        for triple in points.windows(3) {
            let (prev, here, next) = (triple[0], triple[1], triple[2]);
            let glyph = corner(Dir::between(here, prev), Dir::between(here, next));
            self.canvas.set_char_if_blank(here.0, here.1, glyph);
        }

        let last = points.len() - 1;
        for (end, neighbour) in [(points[0], points[1]), (points[last], points[last - 1])] {
            let leaving = Dir::between(end, neighbour);
            let glyph = if leaving.is_horizontal() { horizontal } else { vertical };
            self.line_end(end, leaving, glyph);
        }
    }

    fn fill_text(&mut self, x: f64, y: f64, text: &str, align: TextAlign) {
        let (col, row) = cell(Point::new(x, y));
        match align {
            TextAlign::Left => self.canvas.draw_text(col, row, text),
            TextAlign::Center => self.canvas.draw_text_centered(col, row, text),
        }
    }

    fn marker(&mut self, tip: Point, from: Point, marker: Marker) {
        let tip = cell(tip);
        let points = route(tip, cell(from));
        let (at, leaving) = match points.get(1) {
            Some(&next) => {
                let dir = Dir::between(tip, next);
                (dir.step(tip), Some(dir))
            }
            None => (tip, None),
        };

        let glyph = match (marker, leaving) {
            (Marker::FilledDiamond, _) => '◆',
            (Marker::HollowDiamond, _) => '◇',
            (Marker::HollowTriangle, Some(Dir::Right)) => '◁',
            (Marker::HollowTriangle, Some(Dir::Left)) => '▷',
            (Marker::HollowTriangle, Some(Dir::Down)) => '△',
            (Marker::HollowTriangle, Some(Dir::Up) | None) => '▽',
        };
        self.canvas.set_char(at.0, at.1, glyph);
    }
}
