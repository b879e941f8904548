//! The diagram session
//!
//! A [`Diagram`] is everything one import produced: the classes, the linked
//! relationships, the identifier index and the warnings. A new import builds
//! a new session; sessions are never merged.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use serde::Serialize;

use super::records::{ClassRecord, ClassRef, Relationship};
use crate::core::{Database, ImportWarning};

/// Identifier → class lookup, built once per session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassIndex {
    by_id: HashMap<String, ClassRef>,
}

impl ClassIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a class list; the first class with a given id wins
    pub fn build(classes: &[ClassRecord]) -> Self {
        let mut index = Self::new();
        for (i, class) in classes.iter().enumerate() {
            index.insert(&class.id, ClassRef(i));
        }
        index
    }

    /// Register an id; returns false (and changes nothing) if it is taken
    pub fn insert(&mut self, id: &str, class: ClassRef) -> bool {
        if self.by_id.contains_key(id) {
            return false;
        }
        self.by_id.insert(id.to_string(), class);
        true
    }

    pub fn get(&self, id: &str) -> Option<ClassRef> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// One imported class diagram
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagram {
    classes: Vec<ClassRecord>,
    relationships: Vec<Relationship>,
    warnings: Vec<ImportWarning>,
    #[serde(skip)]
    index: ClassIndex,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        classes: Vec<ClassRecord>,
        index: ClassIndex,
        relationships: Vec<Relationship>,
        warnings: Vec<ImportWarning>,
    ) -> Self {
        Self {
            classes,
            relationships,
            warnings,
            index,
        }
    }

    /// Classes in document order
    pub fn classes(&self) -> &[ClassRecord] {
        &self.classes
    }

    /// Linked relationships: associations first, then generalizations
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Everything the import skipped or dropped, in the order it happened
    pub fn warnings(&self) -> &[ImportWarning] {
        &self.warnings
    }

    pub fn index(&self) -> &ClassIndex {
        &self.index
    }

    pub fn class(&self, class: ClassRef) -> Option<&ClassRecord> {
        self.classes.get(class.0)
    }

    pub fn class_by_id(&self, id: &str) -> Option<&ClassRecord> {
        self.index.get(id).and_then(|r| self.class(r))
    }

    pub fn from_class(&self, rel: &Relationship) -> Option<&ClassRecord> {
        self.class(rel.from)
    }

    pub fn to_class(&self, rel: &Relationship) -> Option<&ClassRecord> {
        self.class(rel.to)
    }

    pub fn association_class(&self, rel: &Relationship) -> Option<&ClassRecord> {
        rel.association_class.and_then(|r| self.class(r))
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.relationships.is_empty()
    }

    /// Serialize the session (classes, relationships, warnings) as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn check_ref(&self, class: ClassRef) -> Result<()> {
        if class.0 < self.classes.len() {
            Ok(())
        } else {
            Err(anyhow!("class reference {} is out of range", class.0))
        }
    }
}

impl Database for Diagram {
    type Node = ClassRecord;
    type Edge = Relationship;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        let class_ref = ClassRef(self.classes.len());
        if !self.index.insert(&node.id, class_ref) {
            return Err(anyhow!("duplicate class id {}", node.id));
        }
        self.classes.push(node);
        Ok(())
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
        self.check_ref(edge.from)?;
        self.check_ref(edge.to)?;
        if let Some(assoc) = edge.association_class {
            self.check_ref(assoc)?;
        }
        self.relationships.push(edge);
        Ok(())
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.class_by_id(id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.classes.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.relationships.iter()
    }

    fn clear(&mut self) {
        *self = Self::new();
    }

    fn node_count(&self) -> usize {
        self.classes.len()
    }

    fn edge_count(&self) -> usize {
        self.relationships.len()
    }
}
