//! CSV sinks for nodes, ways and their child records.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use osm_model::{
    NodeRecord, Record, ShapedElement, ShapedNode, ShapedWay, TagRecord, WayNodeRecord, WayRecord,
};

use crate::error::{OutputError, Result};
use crate::files::OutputFiles;

/// Destination for shaped elements.
pub trait RecordSink {
    fn write_node(&mut self, shaped: &ShapedNode) -> Result<()>;

    fn write_way(&mut self, shaped: &ShapedWay) -> Result<()>;

    fn write(&mut self, element: &ShapedElement) -> Result<()> {
        match element {
            ShapedElement::Node(shaped) => self.write_node(shaped),
            ShapedElement::Way(shaped) => self.write_way(shaped),
        }
    }

    /// Push buffered rows to the underlying writers.
    fn flush(&mut self) -> Result<()>;
}

/// One value per sink, in output order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Sinks<T> {
    pub nodes: T,
    pub node_tags: T,
    pub ways: T,
    pub way_nodes: T,
    pub way_tags: T,
}

/// Rows written per sink, headers excluded.
pub type RowCounts = Sinks<u64>;

impl RowCounts {
    pub fn total(&self) -> u64 {
        self.nodes + self.node_tags + self.ways + self.way_nodes + self.way_tags
    }
}

const NODES: &str = "nodes";
const NODE_TAGS: &str = "node_tags";
const WAYS: &str = "ways";
const WAY_NODES: &str = "way_nodes";
const WAY_TAGS: &str = "way_tags";

/// Five CSV writers, each started with its header row.
pub struct CsvSinks<W: Write> {
    writers: Sinks<csv::Writer<W>>,
    counts: RowCounts,
}

impl CsvSinks<File> {
    /// Create the output directory and the five files inside it.
    ///
    /// # Errors
    ///
    /// Fails if the directory or any file cannot be created, or a header
    /// cannot be written.
    pub fn create(dir: &Path, files: &OutputFiles) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let [nodes, node_tags, ways, way_nodes, way_tags] = files.paths(dir);
        let open = |path: PathBuf| {
            debug!(path = %path.display(), "creating output file");
            File::create(&path).map_err(|source| OutputError::Create { path, source })
        };
        Self::new(Sinks {
            nodes: open(nodes)?,
            node_tags: open(node_tags)?,
            ways: open(ways)?,
            way_nodes: open(way_nodes)?,
            way_tags: open(way_tags)?,
        })
    }
}

impl<W: Write> CsvSinks<W> {
    /// Wrap five writers and write their header rows.
    ///
    /// # Errors
    ///
    /// Fails if a header row cannot be written.
    pub fn new(inner: Sinks<W>) -> Result<Self> {
        let mut writers = Sinks {
            nodes: csv::Writer::from_writer(inner.nodes),
            node_tags: csv::Writer::from_writer(inner.node_tags),
            ways: csv::Writer::from_writer(inner.ways),
            way_nodes: csv::Writer::from_writer(inner.way_nodes),
            way_tags: csv::Writer::from_writer(inner.way_tags),
        };
        write_header::<NodeRecord, _>(&mut writers.nodes, NODES)?;
        write_header::<TagRecord, _>(&mut writers.node_tags, NODE_TAGS)?;
        write_header::<WayRecord, _>(&mut writers.ways, WAYS)?;
        write_header::<WayNodeRecord, _>(&mut writers.way_nodes, WAY_NODES)?;
        write_header::<TagRecord, _>(&mut writers.way_tags, WAY_TAGS)?;
        Ok(Self {
            writers,
            counts: RowCounts::default(),
        })
    }

    pub fn counts(&self) -> &RowCounts {
        &self.counts
    }

    /// Flush and hand back the underlying writers.
    ///
    /// # Errors
    ///
    /// Fails if any writer cannot be flushed.
    pub fn into_inner(self) -> Result<Sinks<W>> {
        let Sinks {
            nodes,
            node_tags,
            ways,
            way_nodes,
            way_tags,
        } = self.writers;
        Ok(Sinks {
            nodes: unwrap_writer(nodes, NODES)?,
            node_tags: unwrap_writer(node_tags, NODE_TAGS)?,
            ways: unwrap_writer(ways, WAYS)?,
            way_nodes: unwrap_writer(way_nodes, WAY_NODES)?,
            way_tags: unwrap_writer(way_tags, WAY_TAGS)?,
        })
    }
}

impl<W: Write> RecordSink for CsvSinks<W> {
    fn write_node(&mut self, shaped: &ShapedNode) -> Result<()> {
        write_row(&mut self.writers.nodes, NODES, &shaped.node)?;
        self.counts.nodes += 1;
        for tag in &shaped.node_tags {
            write_row(&mut self.writers.node_tags, NODE_TAGS, tag)?;
            self.counts.node_tags += 1;
        }
        Ok(())
    }

    fn write_way(&mut self, shaped: &ShapedWay) -> Result<()> {
        write_row(&mut self.writers.ways, WAYS, &shaped.way)?;
        self.counts.ways += 1;
        for way_node in &shaped.way_nodes {
            write_row(&mut self.writers.way_nodes, WAY_NODES, way_node)?;
            self.counts.way_nodes += 1;
        }
        for tag in &shaped.way_tags {
            write_row(&mut self.writers.way_tags, WAY_TAGS, tag)?;
            self.counts.way_tags += 1;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        flush_writer(&mut self.writers.nodes, NODES)?;
        flush_writer(&mut self.writers.node_tags, NODE_TAGS)?;
        flush_writer(&mut self.writers.ways, WAYS)?;
        flush_writer(&mut self.writers.way_nodes, WAY_NODES)?;
        flush_writer(&mut self.writers.way_tags, WAY_TAGS)
    }
}

fn write_header<R: Record, W: Write>(writer: &mut csv::Writer<W>, sink: &'static str) -> Result<()> {
    writer
        .write_record(R::FIELDS)
        .map_err(|source| OutputError::Write { sink, source })
}

fn write_row<R: Record, W: Write>(
    writer: &mut csv::Writer<W>,
    sink: &'static str,
    record: &R,
) -> Result<()> {
    writer
        .write_record(record.values().iter().map(|value| value.as_bytes()))
        .map_err(|source| OutputError::Write { sink, source })
}

fn flush_writer<W: Write>(writer: &mut csv::Writer<W>, sink: &'static str) -> Result<()> {
    writer
        .flush()
        .map_err(|source| OutputError::Flush { sink, source })
}

fn unwrap_writer<W: Write>(writer: csv::Writer<W>, sink: &'static str) -> Result<W> {
    writer.into_inner().map_err(|err| OutputError::Flush {
        sink,
        source: err.into_error(),
    })
}
