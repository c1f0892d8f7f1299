use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// A required XML attribute was absent on an element or one of its children.
    #[error("{element} is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
