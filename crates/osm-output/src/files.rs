//! Output directory and file names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File names of the five CSV sinks, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputFiles {
    /// Directory the files are written to.
    pub dir: PathBuf,
    pub nodes: String,
    pub node_tags: String,
    pub ways: String,
    pub way_nodes: String,
    pub way_tags: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            nodes: "nodes.csv".to_string(),
            node_tags: "nodes_tags.csv".to_string(),
            ways: "ways.csv".to_string(),
            way_nodes: "ways_nodes.csv".to_string(),
            way_tags: "ways_tags.csv".to_string(),
        }
    }
}

impl OutputFiles {
    /// Full paths of all five files under `dir`, in sink order.
    pub fn paths(&self, dir: &Path) -> [PathBuf; 5] {
        [
            dir.join(&self.nodes),
            dir.join(&self.node_tags),
            dir.join(&self.ways),
            dir.join(&self.way_nodes),
            dir.join(&self.way_tags),
        ]
    }
}
