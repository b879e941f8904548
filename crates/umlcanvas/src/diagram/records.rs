//! Class and relationship records
//!
//! Records are plain data. Relationships refer to classes through
//! [`ClassRef`], an index into the owning [`Diagram`](super::Diagram)'s class
//! list, so a linked relationship never owns the classes it connects.

use std::fmt;

use serde::Serialize;

/// Name given to classes whose `name` attribute is absent
pub const DEFAULT_CLASS_NAME: &str = "Unnamed";
/// Width given to classes without usable geometry
pub const DEFAULT_WIDTH: i64 = 100;
/// Height given to classes without usable geometry
pub const DEFAULT_HEIGHT: i64 = 50;

/// Index of a class within its diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClassRef(pub(crate) usize);

impl ClassRef {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One UML class box
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRecord {
    pub id: String,
    pub name: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub attributes: Vec<String>,
    pub methods: Vec<String>,
}

impl ClassRecord {
    /// A class at the origin with the default size and no features
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            x: 0,
            y: 0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            attributes: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn at(mut self, x: i64, y: i64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn sized(mut self, width: i64, height: i64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn add_attribute(&mut self, name: impl Into<String>) {
        self.attributes.push(name.into());
    }

    pub fn add_method(&mut self, name: impl Into<String>) {
        self.methods.push(name.into());
    }
}

/// Kind of connector between two classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationshipKind {
    Association,
    Aggregation,
    Composition,
    Inheritance,
    /// Link to an association class; never produced by the XMI importer
    AssociationClass,
}

impl RelationshipKind {
    /// Classify an association from the `aggregation` markers on its two ends
    ///
    /// `composite` on either end wins over `shared`.
    pub fn from_aggregation(first: Option<&str>, second: Option<&str>) -> Self {
        let has = |marker: &str| first == Some(marker) || second == Some(marker);
        if has("composite") {
            RelationshipKind::Composition
        } else if has("shared") {
            RelationshipKind::Aggregation
        } else {
            RelationshipKind::Association
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipKind::Association => write!(f, "association"),
            RelationshipKind::Aggregation => write!(f, "aggregation"),
            RelationshipKind::Composition => write!(f, "composition"),
            RelationshipKind::Inheritance => write!(f, "inheritance"),
            RelationshipKind::AssociationClass => write!(f, "associationClass"),
        }
    }
}

/// A relationship as read from the document, before its ends are resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipRecord {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    pub kind: RelationshipKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub association_class_id: Option<String>,
}

impl RelationshipRecord {
    pub fn new(
        id: impl Into<String>,
        from_id: impl Into<String>,
        to_id: impl Into<String>,
        kind: RelationshipKind,
    ) -> Self {
        Self {
            id: id.into(),
            from_id: from_id.into(),
            to_id: to_id.into(),
            kind,
            association_class_id: None,
        }
    }

    pub fn with_association_class(mut self, class_id: impl Into<String>) -> Self {
        self.association_class_id = Some(class_id.into());
        self
    }
}

/// A relationship whose ends point at classes of the same diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    #[serde(flatten)]
    pub record: RelationshipRecord,
    pub from: ClassRef,
    pub to: ClassRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub association_class: Option<ClassRef>,
}

impl Relationship {
    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn kind(&self) -> RelationshipKind {
        self.record.kind
    }
}
