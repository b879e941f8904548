//! Association and generalization extraction
//!
//! Produces unlinked [`RelationshipRecord`]s: all associations first, then
//! all generalizations, each in document order.

use tracing::{debug, trace};

use super::document::{
    attr, descendants_named, XmiDocument, ASSOCIATION, ASSOCIATION_END, GENERALIZATION, XMI_ID,
};
use super::report;
use crate::core::ImportWarning;
use crate::diagram::{RelationshipKind, RelationshipRecord};

/// Extract every well-formed association and generalization
pub fn extract_relationships(
    doc: &XmiDocument<'_>,
    warnings: &mut Vec<ImportWarning>,
) -> Vec<RelationshipRecord> {
    let mut relationships = extract_associations(doc, warnings);
    let association_count = relationships.len();
    relationships.extend(extract_generalizations(doc, warnings));

    debug!(
        association_count,
        generalization_count = relationships.len() - association_count,
        "Extracted relationships"
    );
    relationships
}

fn extract_associations(
    doc: &XmiDocument<'_>,
    warnings: &mut Vec<ImportWarning>,
) -> Vec<RelationshipRecord> {
    let mut out = Vec::new();

    for element in doc.elements(ASSOCIATION) {
        let Some(id) = attr(element, XMI_ID) else {
            report(warnings, ImportWarning::AssociationMissingId);
            continue;
        };

        // Only the first two ends matter.
        let mut ends = descendants_named(element, ASSOCIATION_END);
        let (Some(first), Some(second)) = (ends.next(), ends.next()) else {
            report(warnings, ImportWarning::TooFewEnds { id: id.to_string() });
            continue;
        };

        let (Some(from_id), Some(to_id)) = (attr(first, "type"), attr(second, "type")) else {
            report(warnings, ImportWarning::MissingEnd { id: id.to_string() });
            continue;
        };

        let kind = RelationshipKind::from_aggregation(
            first.attribute("aggregation"),
            second.attribute("aggregation"),
        );
        trace!(id, from_id, to_id, %kind, "Extracted association");
        out.push(RelationshipRecord::new(id, from_id, to_id, kind));
    }

    out
}

fn extract_generalizations(
    doc: &XmiDocument<'_>,
    warnings: &mut Vec<ImportWarning>,
) -> Vec<RelationshipRecord> {
    let mut out = Vec::new();

    for element in doc.elements(GENERALIZATION) {
        let Some(id) = attr(element, XMI_ID) else {
            report(warnings, ImportWarning::GeneralizationMissingId);
            continue;
        };

        let (Some(subtype), Some(supertype)) = (attr(element, "subtype"), attr(element, "supertype"))
        else {
            report(warnings, ImportWarning::MissingEnd { id: id.to_string() });
            continue;
        };

        trace!(id, subtype, supertype, "Extracted generalization");
        out.push(RelationshipRecord::new(
            id,
            subtype,
            supertype,
            RelationshipKind::Inheritance,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(body: &str) -> (Vec<RelationshipRecord>, Vec<ImportWarning>) {
        let text = format!(
            r#"<XMI xmlns:UML="org.omg.xmi.namespace.UML"><XMI.content>{}</XMI.content></XMI>"#,
            body
        );
        let doc = XmiDocument::parse(&text).unwrap();
        let mut warnings = Vec::new();
        let records = extract_relationships(&doc, &mut warnings);
        (records, warnings)
    }

    fn association(id: &str, first: &str, second: &str) -> String {
        format!(
            r#"<UML:Association xmi.id="{}"><UML:Association.connection>{}{}</UML:Association.connection></UML:Association>"#,
            id, first, second
        )
    }

    #[test]
    fn test_shared_end_yields_aggregation() {
        let (records, warnings) = extract(&association(
            "A1",
            r#"<UML:AssociationEnd type="C1" aggregation="shared"/>"#,
            r#"<UML:AssociationEnd type="C2" aggregation="none"/>"#,
        ));
        assert!(warnings.is_empty());
        assert_eq!(
            records,
            vec![RelationshipRecord::new("A1", "C1", "C2", RelationshipKind::Aggregation)]
        );
    }

    #[test]
    fn test_composite_beats_shared() {
        let (records, _) = extract(&association(
            "A1",
            r#"<UML:AssociationEnd type="C1" aggregation="shared"/>"#,
            r#"<UML:AssociationEnd type="C2" aggregation="composite"/>"#,
        ));
        assert_eq!(records[0].kind, RelationshipKind::Composition);
    }

    #[test]
    fn test_plain_association() {
        let (records, _) = extract(&association(
            "A1",
            r#"<UML:AssociationEnd type="C1"/>"#,
            r#"<UML:AssociationEnd type="C2"/>"#,
        ));
        assert_eq!(records[0].kind, RelationshipKind::Association);
    }

    #[test]
    fn test_third_end_ignored() {
        let (records, _) = extract(&association(
            "A1",
            r#"<UML:AssociationEnd type="C1"/>"#,
            r#"<UML:AssociationEnd type="C2"/><UML:AssociationEnd type="C3" aggregation="composite"/>"#,
        ));
        assert_eq!(records[0].to_id, "C2");
        assert_eq!(records[0].kind, RelationshipKind::Association);
    }

    #[test]
    fn test_malformed_associations_skipped() {
        let body = [
            r#"<UML:Association><UML:AssociationEnd type="C1"/><UML:AssociationEnd type="C2"/></UML:Association>"#.to_string(),
            r#"<UML:Association xmi.id="A2"><UML:AssociationEnd type="C1"/></UML:Association>"#.to_string(),
            association("A3", r#"<UML:AssociationEnd type="C1"/>"#, r#"<UML:AssociationEnd/>"#),
        ]
        .concat();
        let (records, warnings) = extract(&body);
        assert!(records.is_empty());
        assert_eq!(
            warnings,
            vec![
                ImportWarning::AssociationMissingId,
                ImportWarning::TooFewEnds { id: "A2".into() },
                ImportWarning::MissingEnd { id: "A3".into() },
            ]
        );
    }

    #[test]
    fn test_generalizations() {
        let (records, warnings) = extract(
            r#"<UML:Generalization xmi.id="G1" subtype="Dog" supertype="Animal"/>
               <UML:Generalization subtype="Cat" supertype="Animal"/>
               <UML:Generalization xmi.id="G3" subtype="Cat"/>"#,
        );
        assert_eq!(
            records,
            vec![RelationshipRecord::new("G1", "Dog", "Animal", RelationshipKind::Inheritance)]
        );
        assert_eq!(
            warnings,
            vec![
                ImportWarning::GeneralizationMissingId,
                ImportWarning::MissingEnd { id: "G3".into() },
            ]
        );
    }

    #[test]
    fn test_associations_precede_generalizations() {
        let body = format!(
            r#"<UML:Generalization xmi.id="G1" subtype="B" supertype="A"/>{}"#,
            association(
                "A1",
                r#"<UML:AssociationEnd type="A"/>"#,
                r#"<UML:AssociationEnd type="B"/>"#
            )
        );
        let (records, _) = extract(&body);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "G1"]);
    }
}
