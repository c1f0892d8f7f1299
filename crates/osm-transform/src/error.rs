use thiserror::Error;

use osm_model::ModelError;

#[derive(Debug, Error)]
pub enum TransformError {
    /// An abbreviation prefix could not be compiled into a pattern.
    #[error("invalid abbreviation rule '{prefix}' -> '{canonical}': {source}")]
    InvalidRule {
        prefix: String,
        canonical: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
