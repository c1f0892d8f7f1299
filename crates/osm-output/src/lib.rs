//! CSV output for shaped OSM records.
//!
//! Five sinks are written side by side: nodes, node tags, ways, way nodes and
//! way tags. Each starts with a header row in its record's column order.

pub mod error;
pub mod files;
pub mod sink;

pub use error::{OutputError, Result};
pub use files::OutputFiles;
pub use sink::{CsvSinks, RecordSink, RowCounts, Sinks};
