//! Configuration options for element shaping and tag normalization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Street-type words accepted as already canonical.
pub const DEFAULT_EXPECTED_STREET_TYPES: &[&str] = &[
    "Street", "Avenue", "Boulevard", "Drive", "Court", "Place", "Square", "Lane", "Road", "Trail",
    "Parkway", "Commons", "Bayou", "Circle", "Bend", "Highway", "Point", "Way", "Hollow", "Trace",
    "Run", "Loop", "Knee", "Ridge", "Park", "Hill", "Cove", "Alley",
];

/// Abbreviation entries known before any data is read.
pub const DEFAULT_SEED_MAPPING: &[(&str, &str)] = &[("St", "Street"), ("St.", "Street")];

/// Abbreviation prefixes and their canonical word, in priority order.
pub const DEFAULT_ABBREVIATIONS: &[(&str, &str)] = &[
    ("Av", "Avenue"),
    ("Rd", "Road"),
    ("St", "Street"),
    ("Lp", "Loop"),
    ("Blvd", "Boulevard"),
    ("Hwy", "Highway"),
];

/// Postal codes longer than this are rewritten even when all digits.
pub const DEFAULT_POSTCODE_MAX_LEN: usize = 5;

pub const DEFAULT_PROGRESS_INTERVAL: u64 = 100_000;

/// Which element kinds get street and postcode cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagCleaning {
    /// Clean `addr:street` and `addr:postcode` on nodes and ways alike.
    #[default]
    Uniform,
    /// Clean node tags only. Way street names are still audited, so the
    /// mapping keeps learning from them, but way values are written as-is.
    NodesOnly,
}

/// One abbreviation rule: a token starting a word with `prefix`
/// (case-insensitive) maps to `canonical`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AbbreviationRule {
    pub prefix: String,
    pub canonical: String,
}

impl AbbreviationRule {
    pub fn new(prefix: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            canonical: canonical.into(),
        }
    }
}

/// Options controlling how elements are shaped and normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingOptions {
    /// Street-type suffixes that need no normalization.
    pub expected_street_types: Vec<String>,

    /// Initial abbreviation → canonical word entries.
    pub seed_mapping: BTreeMap<String, String>,

    /// Ordered abbreviation rules; the first matching rule wins.
    pub abbreviations: Vec<AbbreviationRule>,

    /// Maximum length of a postal code accepted unchanged.
    pub postcode_max_len: usize,

    pub tag_cleaning: TagCleaning,

    /// Emit a progress event every this many elements (0 disables).
    pub progress_interval: u64,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            expected_street_types: DEFAULT_EXPECTED_STREET_TYPES
                .iter()
                .map(|word| (*word).to_string())
                .collect(),
            seed_mapping: DEFAULT_SEED_MAPPING
                .iter()
                .map(|(token, word)| ((*token).to_string(), (*word).to_string()))
                .collect(),
            abbreviations: DEFAULT_ABBREVIATIONS
                .iter()
                .map(|(prefix, word)| AbbreviationRule::new(*prefix, *word))
                .collect(),
            postcode_max_len: DEFAULT_POSTCODE_MAX_LEN,
            tag_cleaning: TagCleaning::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl ProcessingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tag_cleaning(mut self, mode: TagCleaning) -> Self {
        self.tag_cleaning = mode;
        self
    }

    #[must_use]
    pub fn with_postcode_max_len(mut self, len: usize) -> Self {
        self.postcode_max_len = len;
        self
    }

    #[must_use]
    pub fn with_abbreviations(mut self, rules: Vec<AbbreviationRule>) -> Self {
        self.abbreviations = rules;
        self
    }
}
