//! umlcanvas - Import XMI class diagrams and draw them
//!
//! Reads UML class models exported as XMI 1.x (classes, attributes,
//! operations, associations, generalizations and diagram geometry) into an
//! in-memory [`Diagram`], and draws that diagram as ASCII art, SVG or PNG.
//!
//! # Quick Start
//!
//! ```rust
//! let xmi = r#"<XMI xmlns:UML="org.omg.xmi.namespace.UML"><XMI.content>
//!   <UML:Class xmi.id="C1" name="Person"/>
//! </XMI.content></XMI>"#;
//!
//! let diagram = umlcanvas::import(xmi).unwrap();
//! assert_eq!(diagram.class_count(), 1);
//!
//! let ascii = umlcanvas::render_ascii(&diagram).unwrap();
//! assert!(ascii.contains("Person"));
//! ```
//!
//! # Advanced Usage
//!
//! ```rust
//! use umlcanvas::prelude::*;
//!
//! let xmi = r#"<XMI xmlns:UML="org.omg.xmi.namespace.UML"><XMI.content>
//!   <UML:Class xmi.id="C1" name="Animal"/>
//!   <UML:Class xmi.id="C2" name="Dog"/>
//!   <UML:Generalization xmi.id="G1" subtype="C2" supertype="C1"/>
//! </XMI.content></XMI>"#;
//!
//! let diagram = XmiImporter::new().import(xmi).unwrap();
//! assert_eq!(diagram.edge_count(), 1);
//!
//! let renderer = SvgRenderer::with_config(RenderConfig::new(Theme::Blueprint));
//! let svg = renderer.render(&diagram).unwrap();
//! assert!(svg.contains("Dog"));
//! ```

pub mod core;
pub mod diagram;
pub mod render;
pub mod xmi;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::core::*;
pub use crate::diagram::{Diagram, Relationship, RelationshipKind};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Database, DiagramError, Draw, ImportWarning, Marker, Palette, RenderConfig, Renderer,
        Surface, TextAlign, Theme,
    };
    pub use crate::diagram::{
        ClassIndex, ClassRecord, ClassRef, Diagram, Relationship, RelationshipKind,
        RelationshipRecord,
    };
    #[cfg(feature = "png")]
    pub use crate::render::PngRenderer;
    pub use crate::render::{
        draw_diagram, AsciiRenderer, AsciiSurface, RenderSummary, SvgRenderer, SvgSurface,
    };
    pub use crate::xmi::XmiImporter;
}

/// Import an XMI document from text
///
/// # Example
/// ```rust
/// let diagram = umlcanvas::import(
///     r#"<XMI xmlns:UML="org.omg.xmi.namespace.UML"><UML:Class xmi.id="A"/></XMI>"#,
/// ).unwrap();
/// assert_eq!(diagram.classes()[0].name, "Unnamed");
/// ```
pub fn import(input: &str) -> anyhow::Result<Diagram> {
    xmi::XmiImporter::new().import(input)
}

/// Read and import an XMI file
pub fn import_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Diagram> {
    xmi::XmiImporter::new().import_file(path)
}

/// Draw a diagram as box-drawing text
pub fn render_ascii(diagram: &Diagram) -> anyhow::Result<String> {
    use crate::core::Renderer as _;
    render::AsciiRenderer::new().render(diagram)
}

/// Draw a diagram as an SVG document in the given theme
pub fn render_svg(diagram: &Diagram, theme: Theme) -> anyhow::Result<String> {
    use crate::core::Renderer as _;
    render::SvgRenderer::with_config(RenderConfig::new(theme)).render(diagram)
}

/// Draw a diagram and encode it as PNG bytes in the given theme
#[cfg(feature = "png")]
pub fn export_png(diagram: &Diagram, theme: Theme) -> anyhow::Result<Vec<u8>> {
    use crate::core::Renderer as _;
    render::PngRenderer::with_config(RenderConfig::new(theme)).render(diagram)
}
