//! Diagram rendering
//!
//! [`draw_diagram`] paints a [`Diagram`] onto any [`Surface`]: the surface
//! is cleared with the theme's palette, then every class is drawn in order,
//! then every relationship. An element that fails to draw is logged and
//! skipped; the rest of the diagram is still drawn.
//!
//! The renderers wrap that with a concrete surface and produce ASCII text,
//! SVG markup or PNG bytes.

mod ascii;
mod draw;
#[cfg(feature = "png")]
mod raster;
mod svg;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, span, warn, Level};

use crate::core::{Draw, RenderConfig, Renderer, Surface, Theme};
use crate::diagram::Diagram;

pub use ascii::AsciiSurface;
pub use draw::class_rect;
#[cfg(feature = "png")]
pub use raster::svg_to_png;
pub use svg::SvgSurface;

/// What happened during one draw pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    pub classes_drawn: usize,
    pub relationships_drawn: usize,
    pub skipped: usize,
}

/// Clear `surface` and draw every class, then every relationship
pub fn draw_diagram(diagram: &Diagram, surface: &mut dyn Surface, theme: Theme) -> RenderSummary {
    let draw_span = span!(
        Level::DEBUG,
        "draw_diagram",
        classes = diagram.class_count(),
        relationships = diagram.relationship_count(),
        %theme
    );
    let _enter = draw_span.enter();

    let mut summary = RenderSummary::default();
    surface.clear(&theme.palette());

    for class in diagram.classes() {
        match class.draw(surface, &()) {
            Ok(()) => summary.classes_drawn += 1,
            Err(e) => {
                warn!(class = %class.id, error = %e, "Skipping class that cannot be drawn");
                summary.skipped += 1;
            }
        }
    }

    for rel in diagram.relationships() {
        match rel.draw(surface, diagram.classes()) {
            Ok(()) => summary.relationships_drawn += 1,
            Err(e) => {
                warn!(relationship = %rel.id(), error = %e, "Skipping relationship that cannot be drawn");
                summary.skipped += 1;
            }
        }
    }

    debug!(
        classes_drawn = summary.classes_drawn,
        relationships_drawn = summary.relationships_drawn,
        skipped = summary.skipped,
        "Diagram drawn"
    );
    summary
}

/// Renders a diagram as box-drawing text
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiRenderer {
    config: RenderConfig,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl Renderer<Diagram> for AsciiRenderer {
    type Output = String;

    fn render(&self, diagram: &Diagram) -> Result<Self::Output> {
        AsciiSurface::check_extent(diagram.classes().iter().map(class_rect))?;
        let mut surface = AsciiSurface::new();
        draw_diagram(diagram, &mut surface, self.config.theme);
        Ok(surface.finish())
    }

    fn name(&self) -> &'static str {
        "ascii"
    }

    fn format(&self) -> &'static str {
        "ascii"
    }
}

/// Renders a diagram as an SVG document
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRenderer {
    config: RenderConfig,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl Renderer<Diagram> for SvgRenderer {
    type Output = String;

    fn render(&self, diagram: &Diagram) -> Result<Self::Output> {
        let mut surface = SvgSurface::new(self.config.padding);
        draw_diagram(diagram, &mut surface, self.config.theme);
        Ok(surface.finish())
    }

    fn name(&self) -> &'static str {
        "svg"
    }

    fn format(&self) -> &'static str {
        "svg"
    }
}

/// Renders a diagram as PNG bytes
#[cfg(feature = "png")]
#[derive(Debug, Clone, Copy, Default)]
pub struct PngRenderer {
    config: RenderConfig,
}

#[cfg(feature = "png")]
impl PngRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }
}

#[cfg(feature = "png")]
impl Renderer<Diagram> for PngRenderer {
    type Output = Vec<u8>;

    fn render(&self, diagram: &Diagram) -> Result<Self::Output> {
        let svg = SvgRenderer::with_config(self.config).render(diagram)?;
        svg_to_png(&svg)
    }

    fn name(&self) -> &'static str {
        "png"
    }

    fn format(&self) -> &'static str {
        "png"
    }
}
