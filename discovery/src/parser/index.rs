//! Filter index parser.

use indexmap::IndexMap;

use super::PATTERNS;

/// Parses the flat `-h filters` listing into an ordered name → description
/// mapping.
///
/// First-seen order is preserved; a duplicate name (which should not occur)
/// keeps its original position with the later description winning. Lines not
/// matching `<name>: <description>` are skipped.
pub fn parse_filter_index(text: &str) -> IndexMap<String, String> {
    let mut index = IndexMap::new();
    for line in text.lines() {
        if let Some(caps) = PATTERNS.index_line.captures(line) {
            index.insert(caps[1].to_string(), caps[2].to_string());
        }
    }
    index
}
