//! Resolve relationship ends into class references
//!
//! Linking consumes the extracted records and produces a new vector; records
//! whose ends cannot be resolved are left out.

use tracing::debug;

use super::report;
use crate::core::ImportWarning;
use crate::diagram::{ClassIndex, Relationship, RelationshipKind, RelationshipRecord};

/// Link every record whose `from_id` and `to_id` both name known classes
pub fn link_relationships(
    records: Vec<RelationshipRecord>,
    index: &ClassIndex,
    warnings: &mut Vec<ImportWarning>,
) -> Vec<Relationship> {
    let total = records.len();
    let linked: Vec<Relationship> = records
        .into_iter()
        .filter_map(|record| match (index.get(&record.from_id), index.get(&record.to_id)) {
            (Some(from), Some(to)) => Some(Relationship {
                record,
                from,
                to,
                association_class: None,
            }),
            _ => {
                report(
                    warnings,
                    ImportWarning::UnresolvedRelationship {
                        id: record.id.clone(),
                    },
                );
                None
            }
        })
        .collect();

    debug!(
        linked = linked.len(),
        dropped = total - linked.len(),
        "Linked relationships"
    );
    linked
}

/// Resolve the association class of `AssociationClass` relationships
///
/// An unknown association class is reported but the relationship is kept.
pub fn link_association_classes(
    relationships: &mut [Relationship],
    index: &ClassIndex,
    warnings: &mut Vec<ImportWarning>,
) {
    for rel in relationships
        .iter_mut()
        .filter(|rel| rel.kind() == RelationshipKind::AssociationClass)
    {
        let Some(class_id) = rel.record.association_class_id.as_deref() else {
            continue;
        };
        match index.get(class_id) {
            Some(class) => rel.association_class = Some(class),
            None => report(
                warnings,
                ImportWarning::UnresolvedAssociationClass {
                    id: rel.record.id.clone(),
                    class_id: class_id.to_string(),
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{ClassRecord, ClassRef};

    fn index() -> ClassIndex {
        ClassIndex::build(&[
            ClassRecord::new("C1", "A"),
            ClassRecord::new("C2", "B"),
            ClassRecord::new("C3", "Link"),
        ])
    }

    #[test]
    fn test_adjacent_unresolvable_records_are_all_dropped() {
        let records = vec![
            RelationshipRecord::new("R1", "C1", "C2", RelationshipKind::Association),
            RelationshipRecord::new("R2", "C1", "X", RelationshipKind::Association),
            RelationshipRecord::new("R3", "Y", "C2", RelationshipKind::Association),
            RelationshipRecord::new("R4", "C2", "C1", RelationshipKind::Inheritance),
        ];
        let mut warnings = Vec::new();
        let linked = link_relationships(records, &index(), &mut warnings);

        let ids: Vec<_> = linked.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["R1", "R4"]);
        assert_eq!((linked[0].from, linked[0].to), (ClassRef(0), ClassRef(1)));
        assert_eq!((linked[1].from, linked[1].to), (ClassRef(1), ClassRef(0)));
        assert_eq!(
            warnings,
            vec![
                ImportWarning::UnresolvedRelationship { id: "R2".into() },
                ImportWarning::UnresolvedRelationship { id: "R3".into() },
            ]
        );
    }

    #[test]
    fn test_association_class_resolution() {
        let records = vec![
            RelationshipRecord::new("R1", "C1", "C2", RelationshipKind::AssociationClass)
                .with_association_class("C3"),
            RelationshipRecord::new("R2", "C1", "C2", RelationshipKind::AssociationClass)
                .with_association_class("C404"),
            RelationshipRecord::new("R3", "C1", "C2", RelationshipKind::Association)
                .with_association_class("C3"),
        ];
        let idx = index();
        let mut warnings = Vec::new();
        let mut linked = link_relationships(records, &idx, &mut warnings);
        link_association_classes(&mut linked, &idx, &mut warnings);

        assert_eq!(linked.len(), 3);
        assert_eq!(linked[0].association_class, Some(ClassRef(2)));
        assert_eq!(linked[1].association_class, None);
        assert_eq!(linked[2].association_class, None);
        assert_eq!(
            warnings,
            vec![ImportWarning::UnresolvedAssociationClass {
                id: "R2".into(),
                class_id: "C404".into(),
            }]
        );
    }
}
