//! Parsed XMI document and tag lookup helpers
//!
//! Elements are matched by qualified name (`UML:Class`), the way a DOM
//! `getElementsByTagName` lookup would: the element's namespace must be bound
//! to the same prefix in scope.

use roxmltree::{Document, Node, ParsingOptions};

use crate::core::DiagramError;

pub const CLASS: &str = "UML:Class";
pub const DIAGRAM_ELEMENT: &str = "UML:DiagramElement";
pub const CLASSIFIER_FEATURE: &str = "UML:Classifier.feature";
pub const ATTRIBUTE: &str = "UML:Attribute";
pub const OPERATION: &str = "UML:Operation";
pub const ASSOCIATION: &str = "UML:Association";
pub const ASSOCIATION_END: &str = "UML:AssociationEnd";
pub const GENERALIZATION: &str = "UML:Generalization";

pub const XMI_ID: &str = "xmi.id";

/// A well-formed XMI document
pub struct XmiDocument<'input> {
    doc: Document<'input>,
}

impl<'input> XmiDocument<'input> {
    /// Parse XMI text; malformed XML is a fatal error
    ///
    /// A `<!DOCTYPE>` declaration is accepted since many UML tools emit one.
    pub fn parse(text: &'input str) -> Result<Self, DiagramError> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let doc = Document::parse_with_options(text, options)?;
        Ok(Self { doc })
    }

    /// All elements with the given qualified name, in document order
    pub fn elements<'a>(
        &'a self,
        qname: &'a str,
    ) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
        self.doc
            .root()
            .descendants()
            .filter(move |node| has_qualified_name(*node, qname))
    }
}

/// Descendant elements of `node` (excluding `node` itself) with the given qualified name
pub fn descendants_named<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    qname: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.descendants()
        .skip(1)
        .filter(move |child| has_qualified_name(*child, qname))
}

/// True if `node` is an element named `prefix:local` (or just `local` with no namespace)
pub fn has_qualified_name(node: Node<'_, '_>, qname: &str) -> bool {
    if !node.is_element() {
        return false;
    }
    let tag = node.tag_name();
    match qname.split_once(':') {
        Some((prefix, local)) => {
            tag.name() == local
                && tag
                    .namespace()
                    .and_then(|uri| node.lookup_prefix(uri))
                    .is_some_and(|p| p == prefix)
        }
        None => tag.name() == qname && tag.namespace().is_none(),
    }
}

/// Attribute value, treating an empty value as absent
pub fn attr<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<XMI xmlns:UML="org.omg.xmi.namespace.UML">
        <UML:Class xmi.id="C1" name="A">
            <UML:Class xmi.id="C2" name=""/>
        </UML:Class>
        <Class xmi.id="plain"/>
    </XMI>"#;

    #[test]
    fn test_elements_by_qualified_name() {
        let doc = XmiDocument::parse(DOC).unwrap();
        let ids: Vec<_> = doc
            .elements(CLASS)
            .filter_map(|n| attr(n, XMI_ID))
            .collect();
        assert_eq!(ids, vec!["C1", "C2"]);
    }

    #[test]
    fn test_unprefixed_name_matches_only_unqualified() {
        let doc = XmiDocument::parse(DOC).unwrap();
        let ids: Vec<_> = doc
            .elements("Class")
            .filter_map(|n| attr(n, XMI_ID))
            .collect();
        assert_eq!(ids, vec!["plain"]);
    }

    #[test]
    fn test_descendants_exclude_self() {
        let doc = XmiDocument::parse(DOC).unwrap();
        let outer = doc.elements(CLASS).next().unwrap();
        let inner: Vec<_> = descendants_named(outer, CLASS).collect();
        assert_eq!(inner.len(), 1);
        assert_eq!(attr(inner[0], XMI_ID), Some("C2"));
    }

    #[test]
    fn test_empty_attribute_is_absent() {
        let doc = XmiDocument::parse(DOC).unwrap();
        let inner = doc.elements(CLASS).nth(1).unwrap();
        assert_eq!(attr(inner, "name"), None);
        assert_eq!(attr(inner, "missing"), None);
    }

    #[test]
    fn test_other_prefix_does_not_match() {
        let text = r#"<XMI xmlns:Foo="urn:foo"><Foo:Class xmi.id="X"/></XMI>"#;
        let doc = XmiDocument::parse(text).unwrap();
        assert_eq!(doc.elements(CLASS).count(), 0);
    }

    #[test]
    fn test_doctype_accepted() {
        let text = r#"<?xml version="1.0"?>
<!DOCTYPE XMI SYSTEM "uml.dtd">
<XMI xmlns:UML="org.omg.xmi.namespace.UML"><UML:Class xmi.id="C1"/></XMI>"#;
        let doc = XmiDocument::parse(text).unwrap();
        assert_eq!(doc.elements(CLASS).count(), 1);
    }

    #[test]
    fn test_malformed_xml_is_error() {
        assert!(XmiDocument::parse("<XMI><UML:Class></XMI>").is_err());
        assert!(XmiDocument::parse("not xml at all").is_err());
    }
}
