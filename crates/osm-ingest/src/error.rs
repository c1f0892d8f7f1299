//! Error types for OSM XML ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading an OSM document.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file does not exist.
    #[error("OSM file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Input file exists but could not be opened.
    #[error("failed to open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === XML Errors ===
    /// Malformed XML, including I/O failures surfaced by the parser.
    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// Document ended inside a top-level element.
    #[error("document ended inside <{element}> {id}")]
    UnexpectedEof { element: String, id: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
