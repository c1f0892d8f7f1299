//! Tag key classification.
//!
//! Keys fall into one of four categories, tested in this order:
//!
//! 1. `lower`: only lowercase ASCII letters and underscores
//! 2. `lower_colon`: two such segments joined by a single colon
//! 3. `problemchars`: contains a character that is unsafe as a column value
//! 4. `other`: everything else (uppercase, digits, multiple colons, ...)

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static LOWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]|_)*$").expect("Invalid lower regex"));

static LOWER_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]|_)*:([a-z]|_)*$").expect("Invalid lower_colon regex"));

static PROBLEM_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[=+/&<>;'"?%#$@,. \t\r\n]"#).expect("Invalid problemchars regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagCategory {
    Lower,
    LowerColon,
    #[serde(rename = "problemchars")]
    ProblemChars,
    Other,
}

impl TagCategory {
    pub const ALL: [TagCategory; 4] = [
        TagCategory::Lower,
        TagCategory::LowerColon,
        TagCategory::ProblemChars,
        TagCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::LowerColon => "lower_colon",
            Self::ProblemChars => "problemchars",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a tag key without recording it.
pub fn classify_key(key: &str) -> TagCategory {
    if LOWER.is_match(key) {
        TagCategory::Lower
    } else if LOWER_COLON.is_match(key) {
        TagCategory::LowerColon
    } else if PROBLEM_CHARS.is_match(key) {
        TagCategory::ProblemChars
    } else {
        TagCategory::Other
    }
}

/// Running count of keys per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KeyTally {
    pub lower: u64,
    pub lower_colon: u64,
    pub problemchars: u64,
    pub other: u64,
}

impl KeyTally {
    pub fn record(&mut self, category: TagCategory) {
        match category {
            TagCategory::Lower => self.lower += 1,
            TagCategory::LowerColon => self.lower_colon += 1,
            TagCategory::ProblemChars => self.problemchars += 1,
            TagCategory::Other => self.other += 1,
        }
    }

    pub fn get(&self, category: TagCategory) -> u64 {
        match category {
            TagCategory::Lower => self.lower,
            TagCategory::LowerColon => self.lower_colon,
            TagCategory::ProblemChars => self.problemchars,
            TagCategory::Other => self.other,
        }
    }

    pub fn total(&self) -> u64 {
        self.lower + self.lower_colon + self.problemchars + self.other
    }
}

/// Classifier that tallies every key it sees.
#[derive(Debug, Clone, Default)]
pub struct TagClassifier {
    tally: KeyTally,
}

impl TagClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&mut self, key: &str) -> TagCategory {
        let category = classify_key(key);
        self.tally.record(category);
        category
    }

    pub fn tally(&self) -> &KeyTally {
        &self.tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert_eq!(classify_key("amenity"), TagCategory::Lower);
        assert_eq!(classify_key("building_id"), TagCategory::Lower);
        assert_eq!(classify_key("addr:street"), TagCategory::LowerColon);
        assert_eq!(classify_key("addr:street:name"), TagCategory::Other);
        assert_eq!(classify_key("name:en"), TagCategory::LowerColon);
        assert_eq!(classify_key("Name"), TagCategory::Other);
        assert_eq!(classify_key("tiger:zip_left_1"), TagCategory::Other);
        assert_eq!(classify_key("fixme name"), TagCategory::ProblemChars);
        assert_eq!(classify_key("addr.street"), TagCategory::ProblemChars);
        assert_eq!(classify_key("FIXME?"), TagCategory::ProblemChars);
    }

    #[test]
    fn test_empty_segments_still_match_lower_patterns() {
        assert_eq!(classify_key(""), TagCategory::Lower);
        assert_eq!(classify_key(":"), TagCategory::LowerColon);
    }

    #[test]
    fn test_classifier_tallies_each_call() {
        let mut classifier = TagClassifier::new();
        for key in ["amenity", "addr:city", "a b", "Name", "highway"] {
            classifier.classify(key);
        }
        let tally = classifier.tally();
        assert_eq!(tally.lower, 2);
        assert_eq!(tally.lower_colon, 1);
        assert_eq!(tally.problemchars, 1);
        assert_eq!(tally.other, 1);
        assert_eq!(tally.total(), 5);
        assert_eq!(tally.get(TagCategory::Lower), 2);
    }
}
