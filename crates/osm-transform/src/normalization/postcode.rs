//! Postal-code cleanup.

use std::collections::BTreeMap;

use tracing::debug;

use osm_model::ProcessingOptions;

/// Rewrites malformed postal codes and remembers what it changed.
#[derive(Debug, Clone)]
pub struct PostcodeAuditor {
    max_len: usize,
    changes: BTreeMap<String, String>,
}

impl PostcodeAuditor {
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len,
            changes: BTreeMap::new(),
        }
    }

    pub fn from_options(options: &ProcessingOptions) -> Self {
        Self::new(options.postcode_max_len)
    }

    /// Return the postal code to store for `code`.
    ///
    /// Codes made only of digits and no longer than the configured maximum
    /// pass through. Anything else has its non-digit characters removed.
    pub fn audit(&mut self, code: &str) -> String {
        if is_all_digits(code) && code.chars().count() <= self.max_len {
            return code.to_string();
        }
        let cleaned = strip_non_digits(code);
        if cleaned != code {
            debug!(original = code, cleaned = %cleaned, "rewrote postal code");
            self.changes.insert(code.to_string(), cleaned.clone());
        }
        cleaned
    }

    /// Original → rewritten postal codes seen so far.
    pub fn changes(&self) -> &BTreeMap<String, String> {
        &self.changes
    }
}

fn is_all_digits(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|ch| ch.is_ascii_digit())
}

fn strip_non_digits(code: &str) -> String {
    code.chars().filter(char::is_ascii_digit).collect()
}
