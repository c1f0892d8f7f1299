//! Field constraints for the five record kinds.

use serde::{Deserialize, Serialize};

use osm_model::{NODE_FIELDS, NODE_TAGS_FIELDS, WAY_FIELDS, WAY_NODES_FIELDS, WAY_TAGS_FIELDS};

/// Value type a field must parse as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Integer,
    Float,
    String,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
        }
    }

    /// Whether `value` is acceptable for this type.
    pub fn accepts(self, value: &str) -> bool {
        match self {
            Self::Integer => value.parse::<i64>().is_ok(),
            Self::Float => value.parse::<f64>().is_ok_and(f64::is_finite),
            Self::String => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl FieldRule {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Ordered field rules for one record kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSchema {
    pub fields: Vec<FieldRule>,
}

impl RecordSchema {
    /// Rules for `fields`, typed by `type_of`.
    fn for_fields(fields: &[&str], type_of: impl Fn(&str) -> FieldType) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|&name| FieldRule::new(name, type_of(name)))
                .collect(),
        }
    }

    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }
}

/// Constraints for every record kind the shaper produces.
///
/// The default mirrors the output columns: ids, uids, changesets and
/// positions are integers, coordinates are floats, everything else is text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    pub node: RecordSchema,
    pub node_tags: RecordSchema,
    pub way: RecordSchema,
    pub way_nodes: RecordSchema,
    pub way_tags: RecordSchema,
}

impl Default for Schema {
    fn default() -> Self {
        let entity = |name: &str| match name {
            "id" | "uid" | "changeset" => FieldType::Integer,
            "lat" | "lon" => FieldType::Float,
            _ => FieldType::String,
        };
        let tag = |name: &str| match name {
            "id" => FieldType::Integer,
            _ => FieldType::String,
        };
        Self {
            node: RecordSchema::for_fields(NODE_FIELDS, entity),
            node_tags: RecordSchema::for_fields(NODE_TAGS_FIELDS, tag),
            way: RecordSchema::for_fields(WAY_FIELDS, entity),
            way_nodes: RecordSchema::for_fields(WAY_NODES_FIELDS, |_| FieldType::Integer),
            way_tags: RecordSchema::for_fields(WAY_TAGS_FIELDS, tag),
        }
    }
}
