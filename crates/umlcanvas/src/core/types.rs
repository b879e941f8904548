//! Core type definitions shared by surfaces and renderers
//!
//! Drawing coordinates, marker kinds, visual themes and render configuration.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::DiagramError;

/// A point in drawing coordinates (pixels, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between two points
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// An axis-aligned rectangle in drawing coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Point where the segment from the center toward `target` leaves the rectangle
    ///
    /// Returns the center itself when `target` coincides with it.
    pub fn border_toward(&self, target: Point) -> Point {
        let c = self.center();
        let dx = target.x - c.x;
        let dy = target.y - c.y;
        if dx == 0.0 && dy == 0.0 {
            return c;
        }
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        let scale_x = if dx != 0.0 { half_w / dx.abs() } else { f64::INFINITY };
        let scale_y = if dy != 0.0 { half_h / dy.abs() } else { f64::INFINITY };
        let t = scale_x.min(scale_y);
        Point::new(c.x + dx * t, c.y + dy * t)
    }
}

/// Relationship end decorations a surface knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Hollow triangle (generalization, at the supertype)
    HollowTriangle,
    /// Hollow diamond (shared aggregation, at the whole)
    HollowDiamond,
    /// Filled diamond (composition, at the whole)
    FilledDiamond,
}

impl Marker {
    /// Distance from the tip to the back of the marker
    pub const LENGTH: f64 = 14.0;
    /// Half of the marker's widest extent across the line
    pub const HALF_WIDTH: f64 = 6.0;

    /// Polygon outline with its tip at `tip`, lying along the line toward `from`
    ///
    /// Returns `None` when the two points coincide and there is no direction.
    pub fn outline(self, tip: Point, from: Point) -> Option<Vec<Point>> {
        let dx = tip.x - from.x;
        let dy = tip.y - from.y;
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            return None;
        }
        let (ux, uy) = (dx / len, dy / len);
        let (nx, ny) = (-uy, ux);
        let at = |back: f64, side: f64| {
            Point::new(tip.x - ux * back + nx * side, tip.y - uy * back + ny * side)
        };

        Some(match self {
            Marker::HollowTriangle => vec![
                tip,
                at(Self::LENGTH, Self::HALF_WIDTH),
                at(Self::LENGTH, -Self::HALF_WIDTH),
            ],
            Marker::HollowDiamond | Marker::FilledDiamond => vec![
                tip,
                at(Self::LENGTH / 2.0, Self::HALF_WIDTH),
                at(Self::LENGTH, 0.0),
                at(Self::LENGTH / 2.0, -Self::HALF_WIDTH),
            ],
        })
    }

    /// Filled with the line color rather than the background
    pub fn is_filled(self) -> bool {
        self == Marker::FilledDiamond
    }
}

/// Colors used to draw a diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub line: &'static str,
    pub text: &'static str,
}

/// Visual theme for the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Theme {
    /// White background, black lines and text
    #[default]
    Default,
    /// Dark grey background, white lines and text
    DarkMode,
    /// Light grey background, dark grey lines and text
    LightMode,
    /// Blue background, white lines and text
    Blueprint,
}

impl Theme {
    /// Every theme, in menu order
    pub const ALL: [Theme; 4] = [
        Theme::Default,
        Theme::DarkMode,
        Theme::LightMode,
        Theme::Blueprint,
    ];

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Default => Palette {
                background: "#ffffff",
                line: "#000000",
                text: "#000000",
            },
            Theme::DarkMode => Palette {
                background: "#2c2c2c",
                line: "#ffffff",
                text: "#ffffff",
            },
            Theme::LightMode => Palette {
                background: "#f0f0f0",
                line: "#333333",
                text: "#333333",
            },
            Theme::Blueprint => Palette {
                background: "#1c2f90",
                line: "#ffffff",
                text: "#ffffff",
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Default => write!(f, "default"),
            Theme::DarkMode => write!(f, "darkMode"),
            Theme::LightMode => write!(f, "lightMode"),
            Theme::Blueprint => write!(f, "blueprint"),
        }
    }
}

impl FromStr for Theme {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "default" => Ok(Theme::Default),
            "darkmode" | "dark" => Ok(Theme::DarkMode),
            "lightmode" | "light" => Ok(Theme::LightMode),
            "blueprint" => Ok(Theme::Blueprint),
            _ => Err(DiagramError::unknown_theme(s)),
        }
    }
}

/// Configuration shared by all renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Colors to draw with
    pub theme: Theme,
    /// Blank margin around the drawn content, in pixels (SVG/PNG only)
    pub padding: f64,
}

impl RenderConfig {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Default,
            padding: 20.0,
        }
    }
}
