//! Street-type auditing.
//!
//! The auditor looks at the last word of a street name. Names ending in an
//! expected street type are left alone. Anything else is recorded in the
//! audit report, and when the word looks like a known abbreviation the
//! mapping learns `word -> canonical` so the name normalizer can rewrite it.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use osm_model::{AbbreviationRule, ProcessingOptions};

use crate::error::{Result, TransformError};
use crate::normalization::NormalizationMapping;

/// Last word of a name, optionally ending in a period. A single trailing
/// newline still counts as the end of the name.
static STREET_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\S+\.?\n?$").expect("Invalid street type regex"));

/// Extract the trailing street-type token of a street name.
pub fn street_type(street_name: &str) -> Option<&str> {
    STREET_TYPE.find(street_name).map(|found| {
        let token = found.as_str();
        token.strip_suffix('\n').unwrap_or(token)
    })
}

/// Compiled abbreviation rule: a word starting with the prefix, any case.
#[derive(Debug, Clone)]
struct AbbreviationPattern {
    pattern: Regex,
    canonical: String,
}

impl AbbreviationPattern {
    fn compile(rule: &AbbreviationRule) -> Result<Self> {
        let pattern = Regex::new(&format!(r"(?i)\b{}", regex::escape(&rule.prefix))).map_err(
            |source| TransformError::InvalidRule {
                prefix: rule.prefix.clone(),
                canonical: rule.canonical.clone(),
                source,
            },
        )?;
        Ok(Self {
            pattern,
            canonical: rule.canonical.clone(),
        })
    }
}

/// Outcome of auditing one street name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreetAudit {
    /// The name has no trailing word.
    NoStreetType,
    /// The trailing word is an expected street type.
    Expected,
    /// The trailing word matched a rule and the mapping now holds it.
    Learned { token: String, canonical: String },
    /// The trailing word is unexpected and matched no rule.
    Unmatched { token: String },
}

#[derive(Debug, Clone)]
pub struct StreetTypeAuditor {
    expected: BTreeSet<String>,
    rules: Vec<AbbreviationPattern>,
    report: BTreeMap<String, BTreeSet<String>>,
}

impl StreetTypeAuditor {
    /// Build an auditor from an allow-list and ordered abbreviation rules.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidRule`] if a rule cannot be compiled.
    pub fn new<I, S>(expected: I, rules: &[AbbreviationRule]) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rules = rules
            .iter()
            .map(AbbreviationPattern::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            expected: expected.into_iter().map(Into::into).collect(),
            rules,
            report: BTreeMap::new(),
        })
    }

    pub fn from_options(options: &ProcessingOptions) -> Result<Self> {
        Self::new(
            options.expected_street_types.iter().map(String::as_str),
            &options.abbreviations,
        )
    }

    pub fn is_expected(&self, token: &str) -> bool {
        self.expected.contains(token)
    }

    /// Canonical word of the first rule matching `token`.
    pub fn canonical_for(&self, token: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(token))
            .map(|rule| rule.canonical.as_str())
    }

    /// Audit a street name, teaching `mapping` any abbreviation it recognizes.
    pub fn audit(&mut self, street_name: &str, mapping: &mut NormalizationMapping) -> StreetAudit {
        let Some(token) = street_type(street_name) else {
            return StreetAudit::NoStreetType;
        };
        if self.is_expected(token) {
            return StreetAudit::Expected;
        }
        let first_sighting = !self.report.contains_key(token);
        self.report
            .entry(token.to_string())
            .or_default()
            .insert(street_name.to_string());

        let Some(canonical) = self.canonical_for(token).map(str::to_string) else {
            if first_sighting {
                warn!(token, street = street_name, "unexpected street type matches no abbreviation rule");
            }
            return StreetAudit::Unmatched {
                token: token.to_string(),
            };
        };
        let previous = mapping.insert(token, canonical.as_str());
        if previous.as_deref() != Some(canonical.as_str()) {
            debug!(token, canonical = %canonical, street = street_name, "learned street abbreviation");
        }
        StreetAudit::Learned {
            token: token.to_string(),
            canonical,
        }
    }

    /// Unexpected street types with every full name seen for each.
    pub fn report(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auditor() -> StreetTypeAuditor {
        StreetTypeAuditor::from_options(&ProcessingOptions::default()).unwrap()
    }

    #[test]
    fn test_street_type_extraction() {
        assert_eq!(street_type("123 Main St"), Some("St"));
        assert_eq!(street_type("West Lexington St."), Some("St."));
        assert_eq!(street_type("Broadway"), Some("Broadway"));
        assert_eq!(street_type("Main St "), None);
        assert_eq!(street_type("N Rampart St\n"), Some("St"));
        assert_eq!(street_type("N Rampart St\n\n"), None);
        assert_eq!(street_type(""), None);
    }

    #[test]
    fn test_expected_type_is_untouched() {
        let mut auditor = auditor();
        let mut mapping = NormalizationMapping::new();
        assert_eq!(
            auditor.audit("Canal Street", &mut mapping),
            StreetAudit::Expected
        );
        assert!(mapping.is_empty());
        assert!(auditor.report().is_empty());
    }

    #[test]
    fn test_abbreviation_is_learned() {
        let mut auditor = auditor();
        let mut mapping = NormalizationMapping::new();
        let audit = auditor.audit("45 Elm Av", &mut mapping);
        assert_eq!(
            audit,
            StreetAudit::Learned {
                token: "Av".to_string(),
                canonical: "Avenue".to_string()
            }
        );
        assert_eq!(mapping.get("Av"), Some("Avenue"));
        assert!(auditor.report()["Av"].contains("45 Elm Av"));
    }

    #[test]
    fn test_rules_are_case_insensitive_and_ordered() {
        let auditor = auditor();
        assert_eq!(auditor.canonical_for("ave"), Some("Avenue"));
        assert_eq!(auditor.canonical_for("RD."), Some("Road"));
        assert_eq!(auditor.canonical_for("Blvd"), Some("Boulevard"));
        assert_eq!(auditor.canonical_for("HWY"), Some("Highway"));
        assert_eq!(auditor.canonical_for("Lp"), Some("Loop"));
        // "Str" hits the St rule; nothing earlier claims it.
        assert_eq!(auditor.canonical_for("Str"), Some("Street"));
        assert_eq!(auditor.canonical_for("Pkwy"), None);
    }

    #[test]
    fn test_unmatched_token_is_reported_only() {
        let mut auditor = auditor();
        let mut mapping = NormalizationMapping::new();
        assert_eq!(
            auditor.audit("Bayou St. John", &mut mapping),
            StreetAudit::Unmatched {
                token: "John".to_string()
            }
        );
        assert!(mapping.is_empty());
        assert_eq!(auditor.report()["John"].len(), 1);
    }

    #[test]
    fn test_trailing_newline_name_is_normalized() {
        let mut auditor = auditor();
        let mut mapping = NormalizationMapping::seeded(&ProcessingOptions::default());
        assert_eq!(
            auditor.audit("N Rampart Rd\n", &mut mapping),
            StreetAudit::Learned {
                token: "Rd".to_string(),
                canonical: "Road".to_string()
            }
        );
        assert_eq!(
            crate::update_name("N Rampart Rd\n", &mapping),
            "N Rampart Road\n"
        );
    }

    #[test]
    fn test_later_rule_overwrites_target() {
        let rules = vec![AbbreviationRule::new("Ct", "Court")];
        let mut auditor = StreetTypeAuditor::new(["Street"], &rules).unwrap();
        let mut mapping = NormalizationMapping::new();
        mapping.insert("Ct", "Circuit");
        auditor.audit("Mystic Ct", &mut mapping);
        assert_eq!(mapping.get("Ct"), Some("Court"));
    }

    #[test]
    fn test_rule_prefix_is_escaped() {
        let rules = vec![AbbreviationRule::new("St.", "Street")];
        let auditor = StreetTypeAuditor::new(["Street"], &rules).unwrap();
        assert_eq!(auditor.canonical_for("St."), Some("Street"));
        assert_eq!(auditor.canonical_for("Sta"), None);
    }
}
