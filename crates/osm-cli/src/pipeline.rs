//! Pipeline driver: read → shape → (validate) → write.
//!
//! Elements are processed strictly in document order. The normalization
//! mapping is owned by the pipeline for the length of a run and is read and
//! extended by every `addr:street` tag, so a rule learned from one element
//! applies to every element after it.

use std::io::BufRead;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span, trace};

use osm_ingest::ElementReader;
use osm_model::{ProcessingOptions, ShapedElement};
use osm_output::RecordSink;
use osm_transform::{ElementShaper, NormalizationMapping};
use osm_validate::Validator;

/// Counts collected during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub nodes: u64,
    pub ways: u64,
    /// Top-level elements of other kinds (relations).
    pub skipped: u64,
    /// Tags dropped for problem characters in their key.
    pub dropped_tags: u64,
}

impl PipelineStats {
    pub fn elements(&self) -> u64 {
        self.nodes + self.ways
    }
}

pub struct Pipeline {
    shaper: ElementShaper,
    mapping: NormalizationMapping,
    validator: Option<Validator>,
    progress_interval: u64,
}

impl Pipeline {
    /// Build a pipeline that starts from `mapping`.
    ///
    /// Pass [`NormalizationMapping::seeded`] for the usual seed entries, or
    /// any other table to control what the run starts out knowing.
    pub fn new(options: &ProcessingOptions, mapping: NormalizationMapping) -> Result<Self> {
        let shaper = ElementShaper::new(options).context("compile abbreviation rules")?;
        Ok(Self {
            shaper,
            mapping,
            validator: None,
            progress_interval: options.progress_interval,
        })
    }

    /// Validate every shaped element before it is written.
    #[must_use]
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn mapping(&self) -> &NormalizationMapping {
        &self.mapping
    }

    pub fn shaper(&self) -> &ElementShaper {
        &self.shaper
    }

    /// Stream every element from `reader` into `sink`.
    ///
    /// The run stops at the first error: a read failure, a missing required
    /// attribute, a schema violation, or a failed write.
    pub fn run<R: BufRead, S: RecordSink>(
        &mut self,
        mut reader: ElementReader<R>,
        sink: &mut S,
    ) -> Result<PipelineStats> {
        let span = info_span!("process");
        let _guard = span.enter();
        let start = Instant::now();
        let mut stats = PipelineStats::default();

        for element in reader.by_ref() {
            let element = element.context("read OSM element")?;
            let label = format!("{} {}", element.kind, element.id_label());
            let Some(shaped) = self
                .shaper
                .shape(&element, &mut self.mapping)
                .with_context(|| format!("shape {label}"))?
            else {
                stats.skipped += 1;
                continue;
            };
            drop(element);

            if let Some(validator) = &self.validator {
                validator
                    .validate(&shaped)
                    .with_context(|| format!("validate {label}"))?;
            }
            sink.write(&shaped)
                .with_context(|| format!("write {label}"))?;
            trace!(element = %label, tags = shaped.tags().len(), "wrote element");

            match shaped {
                ShapedElement::Node(_) => stats.nodes += 1,
                ShapedElement::Way(_) => stats.ways += 1,
            }
            let processed = stats.elements();
            if self.progress_interval > 0 && processed % self.progress_interval == 0 {
                info!(elements = processed, "progress");
            }
        }
        sink.flush().context("flush output")?;

        stats.skipped += reader.elements_skipped();
        stats.dropped_tags = self.shaper.dropped_tags();
        info!(
            nodes = stats.nodes,
            ways = stats.ways,
            skipped = stats.skipped,
            dropped_tags = stats.dropped_tags,
            mapping_entries = self.mapping.len(),
            duration_ms = start.elapsed().as_millis(),
            "processing complete"
        );
        Ok(stats)
    }
}
