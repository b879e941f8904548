//! Core error types for diagram import, rendering and export
//!
//! Fatal errors abort the whole operation. Element-level problems found while
//! importing are not errors; they are collected as [`ImportWarning`]s instead.

use thiserror::Error;

/// Core error types for the import/render pipeline
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Read error: could not read {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("XML error: {source}")]
    XmlError {
        #[from]
        source: roxmltree::Error,
    },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("Export error: {message}")]
    ExportError { message: String },

    #[error("Unknown theme: {name}")]
    UnknownTheme { name: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new read error for the given path
    pub fn read_error(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Create a new render error
    pub fn render_error(message: impl Into<String>) -> Self {
        Self::RenderError {
            message: message.into(),
        }
    }

    /// Create a new export error
    pub fn export_error(message: impl Into<String>) -> Self {
        Self::ExportError {
            message: message.into(),
        }
    }

    /// Create a new unknown theme error
    pub fn unknown_theme(name: impl Into<String>) -> Self {
        Self::UnknownTheme { name: name.into() }
    }
}

/// A non-fatal problem found while importing a document
///
/// The offending element is skipped (or the relationship dropped) and the
/// import continues.
#[derive(Error, Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImportWarning {
    #[error("class without xmi.id skipped")]
    ClassMissingId,

    #[error("duplicate class xmi.id {id} skipped")]
    DuplicateClassId { id: String },

    #[error("diagram element refers to unknown class {subject}")]
    UnknownSubject { subject: String },

    #[error("association without xmi.id skipped")]
    AssociationMissingId,

    #[error("association {id} has fewer than two ends, skipped")]
    TooFewEnds { id: String },

    #[error("generalization without xmi.id skipped")]
    GeneralizationMissingId,

    #[error("relationship {id} is missing an end reference, skipped")]
    MissingEnd { id: String },

    #[error("relationship {id} refers to missing classes, dropped")]
    UnresolvedRelationship { id: String },

    #[error("association class {class_id} not found for relationship {id}")]
    UnresolvedAssociationClass { id: String, class_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error() {
        let error = DiagramError::render_error("Render failed");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Render error"));
        assert!(error_msg.contains("Render failed"));
    }

    #[test]
    fn test_read_error_names_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error = DiagramError::read_error("model.xmi", io_err);
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("model.xmi"));
        assert!(error_msg.contains("File not found"));
    }

    #[test]
    fn test_xml_error_conversion() {
        let err = roxmltree::Document::parse("<a>").unwrap_err();
        let error: DiagramError = err.into();
        assert!(format!("{}", error).starts_with("XML error"));
    }

    #[test]
    fn test_warning_messages() {
        let warning = ImportWarning::TooFewEnds { id: "A1".into() };
        assert_eq!(warning.to_string(), "association A1 has fewer than two ends, skipped");

        let warning = ImportWarning::UnresolvedAssociationClass {
            id: "R1".into(),
            class_id: "C9".into(),
        };
        assert!(warning.to_string().contains("C9"));
        assert!(warning.to_string().contains("R1"));
    }

    #[test]
    fn test_warning_serializes_with_kind_tag() {
        let json = serde_json::to_value(ImportWarning::MissingEnd { id: "G1".into() }).unwrap();
        assert_eq!(json["kind"], "missing_end");
        assert_eq!(json["id"], "G1");
    }
}
