//! Class extraction, positioning and features

use tracing::{debug, trace};

use super::document::{
    attr, descendants_named, XmiDocument, ATTRIBUTE, CLASS, CLASSIFIER_FEATURE, DIAGRAM_ELEMENT,
    OPERATION, XMI_ID,
};
use super::geometry::parse_geometry;
use super::report;
use crate::core::ImportWarning;
use crate::diagram::{ClassIndex, ClassRecord, ClassRef, DEFAULT_CLASS_NAME};

pub const DEFAULT_ATTRIBUTE_NAME: &str = "unnamedAttribute";
pub const DEFAULT_OPERATION_NAME: &str = "unnamedOperation";

/// Build one record per `UML:Class` with an unused `xmi.id`, in document order
///
/// Returns the records and the index over them. Classes without an id, and
/// later classes reusing an id, are skipped with a warning.
pub fn extract_classes(
    doc: &XmiDocument<'_>,
    warnings: &mut Vec<ImportWarning>,
) -> (Vec<ClassRecord>, ClassIndex) {
    let mut classes = Vec::new();
    let mut index = ClassIndex::new();

    for element in doc.elements(CLASS) {
        let Some(id) = attr(element, XMI_ID) else {
            report(warnings, ImportWarning::ClassMissingId);
            continue;
        };
        if !index.insert(id, ClassRef(classes.len())) {
            report(warnings, ImportWarning::DuplicateClassId { id: id.to_string() });
            continue;
        }
        let name = attr(element, "name").unwrap_or(DEFAULT_CLASS_NAME);
        trace!(id, name, "Extracted class");
        classes.push(ClassRecord::new(id, name));
    }

    debug!(class_count = classes.len(), "Extracted classes");
    (classes, index)
}

/// Apply `UML:DiagramElement` geometry to the classes they refer to
///
/// Elements missing `subject` or `geometry` are ignored. A subject that
/// names no known class is skipped with a warning.
pub fn apply_positions(
    doc: &XmiDocument<'_>,
    classes: &mut [ClassRecord],
    index: &ClassIndex,
    warnings: &mut Vec<ImportWarning>,
) {
    let mut positioned = 0usize;
    for element in doc.elements(DIAGRAM_ELEMENT) {
        let (Some(subject), Some(geometry)) = (attr(element, "subject"), attr(element, "geometry"))
        else {
            continue;
        };
        let Some(class) = index.get(subject).and_then(|r| classes.get_mut(r.index())) else {
            report(
                warnings,
                ImportWarning::UnknownSubject {
                    subject: subject.to_string(),
                },
            );
            continue;
        };

        let coords = parse_geometry(geometry);
        class.x = coords.left();
        class.y = coords.top();
        class.width = coords.width();
        class.height = coords.height();
        positioned += 1;
    }
    debug!(positioned, "Applied diagram geometry");
}

/// Append attribute and operation names found under each class's feature containers
pub fn apply_features(doc: &XmiDocument<'_>, classes: &mut [ClassRecord], index: &ClassIndex) {
    let mut attribute_count = 0usize;
    let mut method_count = 0usize;

    for element in doc.elements(CLASS) {
        let Some(class) = attr(element, XMI_ID)
            .and_then(|id| index.get(id))
            .and_then(|r| classes.get_mut(r.index()))
        else {
            continue;
        };

        for feature in descendants_named(element, CLASSIFIER_FEATURE) {
            for attribute in descendants_named(feature, ATTRIBUTE) {
                class.add_attribute(attr(attribute, "name").unwrap_or(DEFAULT_ATTRIBUTE_NAME));
                attribute_count += 1;
            }
            for operation in descendants_named(feature, OPERATION) {
                class.add_method(attr(operation, "name").unwrap_or(DEFAULT_OPERATION_NAME));
                method_count += 1;
            }
        }
    }
    debug!(attribute_count, method_count, "Extracted class features");
}
