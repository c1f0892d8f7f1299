use thiserror::Error;

/// First field of a shaped element that broke the schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("element '{element}' field '{field}': {constraint}")]
pub struct ValidationError {
    /// Record label, e.g. `node` or `way_tags[2]`.
    pub element: String,
    pub field: String,
    pub constraint: String,
    /// The offending value, empty when the field was absent.
    pub value: String,
}

pub type Result<T> = std::result::Result<T, ValidationError>;
