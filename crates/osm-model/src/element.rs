//! In-memory form of one top-level OSM element and its direct children.
//!
//! An [`Element`] is built by the streaming reader, handed to a consumer, and
//! dropped once the consumer returns. Nothing here holds on to the rest of
//! the document.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Child element name for secondary tags.
pub const TAG_CHILD: &str = "tag";

/// Child element name for way-node references.
pub const NODE_REF_CHILD: &str = "nd";

/// Kind of a top-level OSM element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl ElementKind {
    /// All top-level kinds, in the order they appear in an OSM dump.
    pub const ALL: [ElementKind; 3] = [ElementKind::Node, ElementKind::Way, ElementKind::Relation];

    /// Resolve an XML element name to a kind.
    pub fn from_tag_name(name: &str) -> Option<Self> {
        match name {
            "node" => Some(Self::Node),
            "way" => Some(Self::Way),
            "relation" => Some(Self::Relation),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
            Self::Relation => "relation",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// XML attributes in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Value of the first attribute with the given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// A direct child of a top-level element (`tag`, `nd`, `member`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub name: String,
    pub attributes: Attributes,
}

impl Child {
    pub fn new(name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    pub fn is_tag(&self) -> bool {
        self.name == TAG_CHILD
    }

    pub fn is_node_ref(&self) -> bool {
        self.name == NODE_REF_CHILD
    }
}

/// One top-level OSM element with its direct children in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementKind,
    pub attributes: Attributes,
    pub children: Vec<Child>,
}

impl Element {
    pub fn new(kind: ElementKind, attributes: Attributes) -> Self {
        Self {
            kind,
            attributes,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_child(mut self, child: Child) -> Self {
        self.children.push(child);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// The element id, or `"?"` when absent. Used for labelling only.
    pub fn id_label(&self) -> &str {
        self.attribute("id").unwrap_or("?")
    }

    /// Fetch an attribute that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingAttribute`] naming this element.
    pub fn require(&self, name: &str) -> Result<&str> {
        self.attribute(name)
            .ok_or_else(|| ModelError::MissingAttribute {
                element: self.describe(),
                attribute: name.to_string(),
            })
    }

    /// Fetch a required attribute from one of this element's children.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingAttribute`] naming the child and its owner.
    pub fn require_child<'a>(&self, child: &'a Child, name: &str) -> Result<&'a str> {
        child
            .attributes
            .get(name)
            .ok_or_else(|| ModelError::MissingAttribute {
                element: format!("<{}> child of {}", child.name, self.describe()),
                attribute: name.to_string(),
            })
    }

    /// Secondary `tag` children in document order.
    pub fn tags(&self) -> impl Iterator<Item = &Child> {
        self.children.iter().filter(|child| child.is_tag())
    }

    /// `nd` children in document order.
    pub fn node_refs(&self) -> impl Iterator<Item = &Child> {
        self.children.iter().filter(|child| child.is_node_ref())
    }

    fn describe(&self) -> String {
        format!("{} {}", self.kind, self.id_label())
    }
}
