//! Abbreviation → canonical word table shared by the street auditor and the
//! name normalizer.

use std::collections::BTreeMap;

use serde::Serialize;

use osm_model::ProcessingOptions;

/// Mutable abbreviation table. Entries are added or overwritten, never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizationMapping {
    entries: BTreeMap<String, String>,
}

impl NormalizationMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapping holding the configured seed entries.
    pub fn seeded(options: &ProcessingOptions) -> Self {
        options
            .seed_mapping
            .iter()
            .map(|(token, canonical)| (token.clone(), canonical.clone()))
            .collect()
    }

    /// Insert or overwrite an entry, returning the previous target.
    pub fn insert(
        &mut self,
        token: impl Into<String>,
        canonical: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(token.into(), canonical.into())
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(token, canonical)| (token.as_str(), canonical.as_str()))
    }
}

impl FromIterator<(String, String)> for NormalizationMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
