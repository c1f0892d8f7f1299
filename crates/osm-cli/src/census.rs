//! Audit-only passes over a document: street types, tag keys, contributors.
//!
//! None of these write output; each streams the document once and returns
//! what it collected.

use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;

use anyhow::{Context, Result};
use tracing::{info, warn};

use osm_ingest::ElementReader;
use osm_model::{ElementKind, ProcessingOptions};
use osm_transform::{KeyTally, NormalizationMapping, STREET_KEY, StreetTypeAuditor, TagClassifier};

/// Unexpected street types and the mapping learned from them.
#[derive(Debug, Clone)]
pub struct StreetReport {
    pub unexpected: BTreeMap<String, BTreeSet<String>>,
    pub mapping: NormalizationMapping,
    pub streets_seen: u64,
}

/// Audit every `addr:street` value of nodes and ways.
pub fn audit_streets<R: BufRead>(
    reader: ElementReader<R>,
    options: &ProcessingOptions,
    mut mapping: NormalizationMapping,
) -> Result<StreetReport> {
    let mut auditor = StreetTypeAuditor::from_options(options).context("compile abbreviation rules")?;
    let mut streets_seen = 0u64;
    for element in reader {
        let element = element.context("read OSM element")?;
        for tag in element.tags() {
            if tag.attributes.get("k") != Some(STREET_KEY) {
                continue;
            }
            let Some(street) = tag.attributes.get("v") else {
                continue;
            };
            auditor.audit(street, &mut mapping);
            streets_seen += 1;
        }
    }
    info!(
        streets = streets_seen,
        unexpected = auditor.report().len(),
        "street audit complete"
    );
    Ok(StreetReport {
        unexpected: auditor.report().clone(),
        mapping,
        streets_seen,
    })
}

/// Classify the key of every `tag` in the document, whatever element owns it.
pub fn tally_tag_keys<R: BufRead>(reader: ElementReader<R>) -> Result<KeyTally> {
    let mut classifier = TagClassifier::new();
    for element in reader.with_kinds(&ElementKind::ALL) {
        let element = element.context("read OSM element")?;
        for tag in element.tags() {
            if let Some(key) = tag.attributes.get("k") {
                classifier.classify(key);
            }
        }
    }
    info!(keys = classifier.tally().total(), "tag key tally complete");
    Ok(*classifier.tally())
}

/// Contributors keyed by uid, with the user name first seen for each.
#[derive(Debug, Clone, Default)]
pub struct Contributors {
    pub users: BTreeMap<String, String>,
    /// Elements carrying no uid (anonymous edits).
    pub anonymous: u64,
}

impl Contributors {
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Collect the uid of every node, way and relation.
pub fn collect_contributors<R: BufRead>(reader: ElementReader<R>) -> Result<Contributors> {
    let mut contributors = Contributors::default();
    for element in reader.with_kinds(&ElementKind::ALL) {
        let element = element.context("read OSM element")?;
        let Some(uid) = element.attribute("uid") else {
            warn!(kind = %element.kind, id = element.id_label(), "element has no uid");
            contributors.anonymous += 1;
            continue;
        };
        let user = element.attribute("user").unwrap_or_default();
        contributors
            .users
            .entry(uid.to_string())
            .or_insert_with(|| user.to_string());
    }
    info!(
        contributors = contributors.len(),
        anonymous = contributors.anonymous,
        "contributor census complete"
    );
    Ok(contributors)
}
