//! Street-name rewriting from the learned abbreviation table.

use crate::normalization::NormalizationMapping;

/// Rewrite every mapped word of `name` to its canonical form.
///
/// The name is split on single spaces. Each word found in `mapping` has all
/// of its occurrences in the working string replaced, so a mapped word that
/// also appears inside a longer word is replaced there too. A trailing
/// newline is not part of the last word, matching [`street_type`].
///
/// [`street_type`]: crate::normalization::street_type
pub fn update_name(name: &str, mapping: &NormalizationMapping) -> String {
    let mut updated = name.to_string();
    let words = name.strip_suffix('\n').unwrap_or(name);
    for token in words.split(' ') {
        if token.is_empty() {
            continue;
        }
        if let Some(canonical) = mapping.get(token)
            && !canonical.is_empty()
        {
            updated = updated.replace(token, canonical);
        }
    }
    updated
}
