//! XMI import orchestration
//!
//! Runs the pipeline document → classes → positions → features →
//! relationships → links and packages the result as a [`Diagram`].

use std::path::Path;

use anyhow::Result;
use tracing::{info, span, Level};

use super::classes::{apply_features, apply_positions, extract_classes};
use super::document::XmiDocument;
use super::linker::{link_association_classes, link_relationships};
use super::relationships::extract_relationships;
use crate::core::DiagramError;
use crate::diagram::Diagram;

/// Imports XMI class diagrams
#[derive(Debug, Clone, Copy, Default)]
pub struct XmiImporter;

impl XmiImporter {
    pub fn new() -> Self {
        Self
    }

    /// Import a document from text
    ///
    /// Malformed XML fails the whole import. Anything else that is wrong with
    /// individual elements ends up in [`Diagram::warnings`].
    pub fn import(&self, input: &str) -> Result<Diagram> {
        let import_span = span!(Level::INFO, "import_xmi", input_len = input.len());
        let _enter = import_span.enter();

        let doc = XmiDocument::parse(input)?;
        let mut warnings = Vec::new();

        let (mut classes, index) = extract_classes(&doc, &mut warnings);
        apply_positions(&doc, &mut classes, &index, &mut warnings);
        apply_features(&doc, &mut classes, &index);

        let records = extract_relationships(&doc, &mut warnings);
        let mut relationships = link_relationships(records, &index, &mut warnings);
        link_association_classes(&mut relationships, &index, &mut warnings);

        info!(
            classes = classes.len(),
            relationships = relationships.len(),
            warnings = warnings.len(),
            "Import completed"
        );
        Ok(Diagram::from_parts(classes, index, relationships, warnings))
    }

    /// Read a UTF-8 file and import it
    pub fn import_file(&self, path: impl AsRef<Path>) -> Result<Diagram> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| DiagramError::read_error(path.display().to_string(), e))?;
        self.import(&text)
    }
}
