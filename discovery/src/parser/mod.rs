//! Line-oriented parsers for gpac help output.
//!
//! The help text is semi-structured and human-formatted; each parser here
//! walks it line by line against a fixed grammar:
//!
//! - [`codecs`] — the flat codec listing (`-h codecs`)
//! - [`index`] — the flat filter listing (`-h filters`)
//! - [`detail`] — the multi-section per-filter help (`-hh <name>`)
//! - [`links`] — the two-line per-filter links report (`-h links <name>`)
//!
//! Lines that do not match the expected grammar inside a block are skipped,
//! never raised: blank and separator lines are part of the format. The
//! parsers share one compiled pattern table and an explicit [`LineCursor`]
//! so state transitions are visible rather than fallthrough behavior.

pub mod codecs;
pub mod detail;
pub mod index;
pub mod links;

use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns for the help-text grammar, compiled once.
pub(crate) static PATTERNS: LazyLock<HelpPatterns> = LazyLock::new(HelpPatterns::new);

pub(crate) struct HelpPatterns {
    /// `<name-field>: <description> (<mime-field>)`
    pub(crate) codec_line: Regex,
    /// `<name>: <description>`
    pub(crate) index_line: Regex,
    /// `<name> (<type-and-modifiers>): <description>`
    pub(crate) option_line: Regex,
    /// Indented `* <symbol>: <meaning>` bullet
    pub(crate) enum_line: Regex,
    pub(crate) stream_type: Regex,
    pub(crate) codec_id: Regex,
}

impl HelpPatterns {
    fn new() -> Self {
        // An expect() failure here is a programmer error in the pattern, not
        // a runtime condition.
        Self {
            codec_line: Regex::new(r"^(.+):\s*(.+)\s\((.+)\)$").expect("static regex must compile"),
            index_line: Regex::new(r"^(.+):\s(.+)$").expect("static regex must compile"),
            option_line: Regex::new(r"^(.+)\s\((.+)\):\s*(.+)$")
                .expect("static regex must compile"),
            enum_line: Regex::new(r"^\s*\*\s(.+):\s(.+)$").expect("static regex must compile"),
            stream_type: Regex::new(r#"StreamType="(.+)""#).expect("static regex must compile"),
            codec_id: Regex::new(r#"CodecID="(.+)""#).expect("static regex must compile"),
        }
    }
}

/// Explicit cursor over the lines of a help-text block.
///
/// Every parser state pulls lines through this cursor; `None` means the
/// text is exhausted, which the detail parser treats as early termination
/// rather than an error.
pub(crate) struct LineCursor<'a> {
    lines: std::str::Lines<'a>,
}

impl<'a> LineCursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
        }
    }

    pub(crate) fn next_line(&mut self) -> Option<&'a str> {
        self.lines.next()
    }
}
