//! Character grid used by the ASCII surface
//!
//! The grid is sparse and unbounded in every direction, so diagrams placed at
//! negative coordinates still render. Output is cropped to the drawn cells.

use std::collections::BTreeMap;

/// Sparse character grid addressed by (column, row)
#[derive(Debug, Clone, Default)]
pub struct AsciiCanvas {
    cells: BTreeMap<(i64, i64), char>,
}

impl AsciiCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every drawn cell
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Set a character, replacing whatever was there
    pub fn set_char(&mut self, col: i64, row: i64, c: char) {
        if c == ' ' {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), c);
        }
    }

    /// Set a character only where nothing has been drawn yet
    pub fn set_char_if_blank(&mut self, col: i64, row: i64, c: char) {
        if c != ' ' {
            self.cells.entry((row, col)).or_insert(c);
        }
    }

    /// Get the character at a position (space when nothing is drawn)
    pub fn get_char(&self, col: i64, row: i64) -> char {
        self.cells.get(&(row, col)).copied().unwrap_or(' ')
    }

    /// Draw text starting at the given cell
    pub fn draw_text(&mut self, col: i64, row: i64, text: &str) {
        for (i, c) in text.chars().enumerate() {
            self.set_char(col + i as i64, row, c);
        }
    }

    /// Draw text centered on the given column
    pub fn draw_text_centered(&mut self, center_col: i64, row: i64, text: &str) {
        let half = (unicode_width::UnicodeWidthStr::width(text) / 2) as i64;
        self.draw_text(center_col - half, row, text);
    }

    pub fn draw_horizontal_line(&mut self, col: i64, row: i64, length: i64, c: char) {
        for i in 0..length {
            self.set_char(col + i, row, c);
        }
    }

    pub fn draw_vertical_line(&mut self, col: i64, row: i64, length: i64, c: char) {
        for i in 0..length {
            self.set_char(col, row + i, c);
        }
    }

    /// Smallest (min_col, min_row, max_col, max_row) box holding every cell
    pub fn bounds(&self) -> Option<(i64, i64, i64, i64)> {
        let mut iter = self.cells.keys();
        let &(row, col) = iter.next()?;
        let init = (col, row, col, row);
        Some(iter.fold(init, |(min_c, min_r, max_c, max_r), &(r, c)| {
            (min_c.min(c), min_r.min(r), max_c.max(c), max_r.max(r))
        }))
    }
}

impl std::fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some((min_col, min_row, _, max_row)) = self.bounds() else {
            return Ok(());
        };

        // Cells are keyed (row, col), so one in-order pass yields each row left to right.
        let mut cells = self.cells.iter().peekable();
        let mut rows = Vec::new();
        for row in min_row..=max_row {
            let mut line = String::new();
            let mut next_col = min_col;
            while let Some((&(_, col), &c)) = cells.next_if(|(key, _)| key.0 == row) {
                line.extend(std::iter::repeat(' ').take((col - next_col) as usize));
                line.push(c);
                next_col = col + 1;
            }
            rows.push(line);
        }

        write!(f, "{}", rows.join("\n"))
    }
}
