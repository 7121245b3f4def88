//! Filter link parser.
//!
//! Parses the two-line `-h links <name>` report into upstream/downstream
//! adjacency lists. The tool sometimes returns degenerate output (fewer than
//! two lines) for filters without linkage information; that is not an error
//! for this parser, only a known limitation, and the caller omits both lists.

use gpac_catalog_core::FilterLinks;

/// Parses the raw links report. Returns `None` when the report has fewer
/// than two lines.
///
/// Line 1 is sources, line 2 is sinks; each has the grammar
/// `<label>: <space-separated-names>`. A value portion containing the token
/// `none` yields an empty sequence.
pub fn parse_filter_links(text: &str) -> Option<FilterLinks> {
    let mut lines = text.lines();
    let sources = lines.next()?;
    let sinks = lines.next()?;

    Some(FilterLinks {
        sources: parse_link_line(sources),
        sinks: parse_link_line(sinks),
    })
}

fn parse_link_line(line: &str) -> Vec<String> {
    let Some((_, value)) = line.split_once(": ") else {
        return Vec::new();
    };
    if value.split(' ').any(|token| token == "none") {
        return Vec::new();
    }
    value
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}
