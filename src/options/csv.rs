//! Derivation of ordered token sets from comma-separated option values.
//!
//! # Format
//! ```text
//! csv    := entry ("," entry)*
//! entry  := name | "-" name        ("-" excludes a name added earlier)
//! ```
//! Whitespace around entries is ignored, empty entries are dropped and
//! duplicates keep their first position.

use crate::options::keys::COLLECTION_REMOVAL_PREFIX;

/// One parsed CSV entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvEntry<'a> {
    Include(&'a str),
    Exclude(&'a str),
}

/// Parse raw CSV text into entries, skipping empty tokens.
pub fn parse_entries(csv: &str) -> impl Iterator<Item = CsvEntry<'_>> {
    csv.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.strip_prefix(COLLECTION_REMOVAL_PREFIX) {
            Some(name) => {
                let name = name.trim();
                (!name.is_empty()).then_some(CsvEntry::Exclude(name))
            }
            None => Some(CsvEntry::Include(token)),
        })
}

/// Derive the ordered, de-duplicated token set of a CSV value.
///
/// An absent value yields the empty set.
pub fn derive_set(csv: Option<&str>) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let Some(csv) = csv else {
        return tokens;
    };

    for entry in parse_entries(csv) {
        match entry {
            CsvEntry::Include(name) => {
                if !tokens.iter().any(|t| t == name) {
                    tokens.push(name.to_string());
                }
            }
            CsvEntry::Exclude(name) => tokens.retain(|t| t != name),
        }
    }
    tokens
}

/// Whether the CSV value carries a removal directive for `name`.
pub fn removes(csv: &str, name: &str) -> bool {
    parse_entries(csv).any(|entry| entry == CsvEntry::Exclude(name))
}
