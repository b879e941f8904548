//! XMI import pipeline
//!
//! Reads the flat UML 1.x XMI vocabulary (`UML:Class`, `UML:DiagramElement`,
//! `UML:Association`, `UML:Generalization`) into a [`Diagram`](crate::diagram::Diagram).

mod classes;
mod document;
mod geometry;
mod importer;
mod linker;
mod relationships;

pub use classes::{
    apply_features, apply_positions, extract_classes, DEFAULT_ATTRIBUTE_NAME,
    DEFAULT_OPERATION_NAME,
};
pub use document::XmiDocument;
pub use geometry::{parse_geometry, Geometry};
pub use importer::XmiImporter;
pub use linker::{link_association_classes, link_relationships};
pub use relationships::extract_relationships;

use crate::core::ImportWarning;

/// Log a skipped element and keep it for the session's warning list
pub(crate) fn report(warnings: &mut Vec<ImportWarning>, warning: ImportWarning) {
    tracing::warn!("{}", warning);
    warnings.push(warning);
}
