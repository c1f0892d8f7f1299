use osm_model::{Record, ShapedElement};

use crate::error::{Result, ValidationError};
use crate::schema::{RecordSchema, Schema};

/// Checks shaped elements against a [`Schema`], stopping at the first
/// broken field.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    schema: Schema,
}

impl Validator {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validate every record of `element`: the entity record first, then its
    /// child records in output order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self, element: &ShapedElement) -> Result<()> {
        match element {
            ShapedElement::Node(shaped) => {
                check_record(&self.schema.node, "node", &shaped.node)?;
                check_all(&self.schema.node_tags, "node_tags", &shaped.node_tags)
            }
            ShapedElement::Way(shaped) => {
                check_record(&self.schema.way, "way", &shaped.way)?;
                check_all(&self.schema.way_nodes, "way_nodes", &shaped.way_nodes)?;
                check_all(&self.schema.way_tags, "way_tags", &shaped.way_tags)
            }
        }
    }
}

fn check_all<R: Record>(schema: &RecordSchema, label: &str, records: &[R]) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        check_record(schema, &format!("{label}[{index}]"), record)?;
    }
    Ok(())
}

fn check_record<R: Record>(schema: &RecordSchema, label: &str, record: &R) -> Result<()> {
    for rule in &schema.fields {
        let fail = |constraint: String, value: &str| ValidationError {
            element: label.to_string(),
            field: rule.name.clone(),
            constraint,
            value: value.to_string(),
        };
        let Some(value) = record.field(&rule.name) else {
            if rule.required {
                return Err(fail("required field is missing".to_string(), ""));
            }
            continue;
        };
        if !rule.field_type.accepts(&value) {
            return Err(fail(
                format!("must be of {} type, got '{value}'", rule.field_type.as_str()),
                &value,
            ));
        }
    }
    Ok(())
}
