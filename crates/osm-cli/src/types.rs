use std::collections::BTreeMap;
use std::path::PathBuf;

use osm_output::RowCounts;
use osm_transform::{KeyTally, NormalizationMapping};

use osm_cli::pipeline::PipelineStats;

#[derive(Debug)]
pub struct ProcessResult {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    /// Output file paths in sink order.
    pub files: [PathBuf; 5],
    pub rows: RowCounts,
    pub stats: PipelineStats,
    pub tally: KeyTally,
    pub postcode_changes: BTreeMap<String, String>,
    pub mapping: NormalizationMapping,
    pub validated: bool,
}
