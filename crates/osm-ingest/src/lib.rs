//! OSM XML ingestion.
//!
//! This crate streams an OpenStreetMap XML document and yields its top-level
//! elements (`node`, `way`, `relation`) one at a time, each with its direct
//! `tag` / `nd` / `member` children.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use osm_ingest::ElementReader;
//!
//! for element in ElementReader::open(Path::new("new-orleans.osm"))? {
//!     let element = element?;
//!     println!("{} {}", element.kind, element.id_label());
//! }
//! ```

mod error;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Streaming Reader ===
pub use reader::{DEFAULT_KINDS, ElementReader};
