//! How classes and relationships draw themselves

use anyhow::{anyhow, Result};

use crate::core::{Draw, Marker, Point, Rect, Surface, TextAlign, CHAR_WIDTH, LINE_HEIGHT};
use crate::diagram::{ClassRecord, Relationship, RelationshipKind};

// Rows in a box besides features: top border, name, two separators, bottom border.
const FIXED_ROWS: usize = 4;
const SELF_LOOP_REACH: f64 = 3.0 * CHAR_WIDTH;

/// The box a class occupies once grown to fit its text
pub fn class_rect(class: &ClassRecord) -> Rect {
    let longest = std::iter::once(&class.name)
        .chain(&class.attributes)
        .chain(&class.methods)
        .map(|s| unicode_width::UnicodeWidthStr::width(s.as_str()))
        .max()
        .unwrap_or(0);
    let text_width = (longest + 2) as f64 * CHAR_WIDTH;
    let rows = FIXED_ROWS + class.attributes.len() + class.methods.len();
    let text_height = rows as f64 * LINE_HEIGHT;

    Rect::new(
        class.x as f64,
        class.y as f64,
        (class.width as f64).max(text_width),
        (class.height as f64).max(text_height),
    )
}

impl Draw<()> for ClassRecord {
    fn draw(&self, surface: &mut dyn Surface, _context: &()) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(anyhow!(
                "class {} has a non-positive size {}x{}",
                self.id,
                self.width,
                self.height
            ));
        }

        let rect = class_rect(self);
        surface.stroke_rect(rect.x, rect.y, rect.width, rect.height);
        surface.fill_text(
            rect.x + rect.width / 2.0,
            rect.y + LINE_HEIGHT,
            &self.name,
            TextAlign::Center,
        );

        let left = Point::new(rect.x, 0.0);
        let right = Point::new(rect.x + rect.width, 0.0);
        let separator = |surface: &mut dyn Surface, y: f64| {
            surface.stroke_line(Point::new(left.x, y), Point::new(right.x, y), false);
        };

        let mut y = rect.y + 2.0 * LINE_HEIGHT;
        separator(surface, y);
        for attribute in &self.attributes {
            y += LINE_HEIGHT;
            surface.fill_text(rect.x + CHAR_WIDTH, y, attribute, TextAlign::Left);
        }
        y += LINE_HEIGHT;
        separator(surface, y);
        for method in &self.methods {
            y += LINE_HEIGHT;
            surface.fill_text(rect.x + CHAR_WIDTH, y, method, TextAlign::Left);
        }
        Ok(())
    }
}

impl Draw<[ClassRecord]> for Relationship {
    fn draw(&self, surface: &mut dyn Surface, classes: &[ClassRecord]) -> Result<()> {
        let lookup = |index: usize| {
            classes
                .get(index)
                .ok_or_else(|| anyhow!("relationship {} refers to missing class #{}", self.id(), index))
        };
        let from = class_rect(lookup(self.from.index())?);
        let to = class_rect(lookup(self.to.index())?);

        // Each end also carries the point its line leaves toward, for markers.
        let (start, start_away, end, end_away) = if self.from == self.to {
            draw_self_loop(surface, &from)
        } else {
            let start = from.border_toward(to.center());
            let end = to.border_toward(from.center());
            surface.stroke_line(start, end, false);
            (start, end, end, start)
        };

        match self.kind() {
            RelationshipKind::Inheritance => surface.marker(end, end_away, Marker::HollowTriangle),
            RelationshipKind::Composition => {
                surface.marker(start, start_away, Marker::FilledDiamond)
            }
            RelationshipKind::Aggregation => {
                surface.marker(start, start_away, Marker::HollowDiamond)
            }
            RelationshipKind::Association => {}
            RelationshipKind::AssociationClass => {
                if let Some(assoc) = self.association_class {
                    let assoc_rect = class_rect(lookup(assoc.index())?);
                    let mid = start.midpoint(end);
                    surface.stroke_line(mid, assoc_rect.border_toward(mid), true);
                }
            }
        }
        Ok(())
    }
}

/// Loop out of the right side of a box and back
fn draw_self_loop(surface: &mut dyn Surface, rect: &Rect) -> (Point, Point, Point, Point) {
    let edge = rect.x + rect.width;
    let out = edge + SELF_LOOP_REACH;
    let upper = rect.y + LINE_HEIGHT;
    let lower = rect.y + 3.0 * LINE_HEIGHT;

    let start = Point::new(edge, upper);
    let upper_corner = Point::new(out, upper);
    let lower_corner = Point::new(out, lower);
    let end = Point::new(edge, lower);
    surface.stroke_line(start, upper_corner, false);
    surface.stroke_line(upper_corner, lower_corner, false);
    surface.stroke_line(lower_corner, end, false);
    (start, upper_corner, end, lower_corner)
}
