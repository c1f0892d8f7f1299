//! Flat records produced by shaping an element.
//!
//! Every record type carries its column list in [`Record::FIELDS`]; the CSV
//! sinks write headers and rows in exactly that order and the schema
//! validator looks fields up by those names.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Tag type used when a tag key has no colon.
pub const DEFAULT_TAG_TYPE: &str = "regular";

pub const NODE_FIELDS: &[&str] = &[
    "id",
    "lat",
    "lon",
    "user",
    "uid",
    "version",
    "changeset",
    "timestamp",
];
pub const NODE_TAGS_FIELDS: &[&str] = &["id", "key", "value", "type"];
pub const WAY_FIELDS: &[&str] = &["id", "user", "uid", "version", "changeset", "timestamp"];
pub const WAY_TAGS_FIELDS: &[&str] = &["id", "key", "value", "type"];
pub const WAY_NODES_FIELDS: &[&str] = &["id", "node_id", "position"];

/// A flat row with a fixed column order.
pub trait Record {
    /// Column names, in output order.
    const FIELDS: &'static [&'static str];

    /// Column values aligned with [`Record::FIELDS`].
    fn values(&self) -> Vec<Cow<'_, str>>;

    /// Value of a named column.
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        let index = Self::FIELDS.iter().position(|field| *field == name)?;
        self.values().into_iter().nth(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub lat: String,
    pub lon: String,
    pub user: String,
    pub uid: String,
    pub version: String,
    pub changeset: String,
    pub timestamp: String,
}

impl Record for NodeRecord {
    const FIELDS: &'static [&'static str] = NODE_FIELDS;

    fn values(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.id.as_str()),
            Cow::Borrowed(self.lat.as_str()),
            Cow::Borrowed(self.lon.as_str()),
            Cow::Borrowed(self.user.as_str()),
            Cow::Borrowed(self.uid.as_str()),
            Cow::Borrowed(self.version.as_str()),
            Cow::Borrowed(self.changeset.as_str()),
            Cow::Borrowed(self.timestamp.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WayRecord {
    pub id: String,
    pub user: String,
    pub uid: String,
    pub version: String,
    pub changeset: String,
    pub timestamp: String,
}

impl Record for WayRecord {
    const FIELDS: &'static [&'static str] = WAY_FIELDS;

    fn values(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.id.as_str()),
            Cow::Borrowed(self.user.as_str()),
            Cow::Borrowed(self.uid.as_str()),
            Cow::Borrowed(self.version.as_str()),
            Cow::Borrowed(self.changeset.as_str()),
            Cow::Borrowed(self.timestamp.as_str()),
        ]
    }
}

/// One secondary tag of a node or way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub id: String,
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub tag_type: String,
}

impl Record for TagRecord {
    const FIELDS: &'static [&'static str] = NODE_TAGS_FIELDS;

    fn values(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.id.as_str()),
            Cow::Borrowed(self.key.as_str()),
            Cow::Borrowed(self.value.as_str()),
            Cow::Borrowed(self.tag_type.as_str()),
        ]
    }
}

/// Position of a node reference inside a way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WayNodeRecord {
    pub id: String,
    pub node_id: String,
    pub position: usize,
}

impl Record for WayNodeRecord {
    const FIELDS: &'static [&'static str] = WAY_NODES_FIELDS;

    fn values(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.id.as_str()),
            Cow::Borrowed(self.node_id.as_str()),
            Cow::Owned(self.position.to_string()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapedNode {
    pub node: NodeRecord,
    pub node_tags: Vec<TagRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapedWay {
    pub way: WayRecord,
    pub way_nodes: Vec<WayNodeRecord>,
    pub way_tags: Vec<TagRecord>,
}

/// Output of shaping a single element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapedElement {
    Node(ShapedNode),
    Way(ShapedWay),
}

impl ShapedElement {
    pub fn id(&self) -> &str {
        match self {
            Self::Node(shaped) => &shaped.node.id,
            Self::Way(shaped) => &shaped.way.id,
        }
    }

    pub fn tags(&self) -> &[TagRecord] {
        match self {
            Self::Node(shaped) => &shaped.node_tags,
            Self::Way(shaped) => &shaped.way_tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn way_node_position_is_rendered() {
        let record = WayNodeRecord {
            id: "1".to_string(),
            node_id: "99".to_string(),
            position: 3,
        };
        assert_eq!(record.values(), vec!["1", "99", "3"]);
        assert_eq!(record.field("position").as_deref(), Some("3"));
        assert_eq!(record.field("missing"), None);
    }

    #[test]
    fn values_follow_field_order() {
        let record = TagRecord {
            id: "5".to_string(),
            key: "street".to_string(),
            value: "Main Street".to_string(),
            tag_type: "addr".to_string(),
        };
        let values = record.values();
        assert_eq!(values.len(), TagRecord::FIELDS.len());
        assert_eq!(record.field("type").as_deref(), Some("addr"));
    }
}
