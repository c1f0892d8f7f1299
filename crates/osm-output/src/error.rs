use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing a header or row to one of the sinks failed.
    #[error("failed to write {sink} row: {source}")]
    Write {
        sink: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("failed to flush {sink}: {source}")]
    Flush {
        sink: &'static str,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OutputError>;
