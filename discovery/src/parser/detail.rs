//! Filter detail parser.
//!
//! Parses the multi-section `-hh <name>` text for one filter into a
//! [`FilterDetail`]: metadata header, free-text body, option schemas, and
//! input/output capability sets.
//!
//! The text is walked by an explicit finite-state machine, strictly forward,
//! no backtracking:
//!
//! ```text
//! Preamble → Metadata → Body → Options → Capabilities → Done
//! ```
//!
//! Running out of input in any state terminates parsing early and keeps
//! whatever was built so far. Early termination is non-fatal by design: some
//! filters provide strictly less detail than others, and the overall run
//! must survive them. `capabilities` is `None` exactly when the
//! Capabilities state was never entered, which is how callers detect a
//! truncated detail text.

use gpac_catalog_core::{FilterCapabilities, FilterDetail, OptionSpec, OptionValue};
use indexmap::IndexMap;
use tracing::debug;

use super::{LineCursor, PATTERNS};

/// Marker line opening the options block.
const OPTIONS_MARKER: &str = "Options (expert):";
/// Marker line for filters without any options.
const NO_OPTIONS_MARKER: &str = "No options";
/// Marker line opening the capabilities bundle.
const CAPABILITIES_MARKER: &str = "Capabilities Bundle:";

/// Parser states, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailState {
    /// Fixed three-line banner.
    Preamble,
    /// `Key: Value` lines until the first blank line.
    Metadata,
    /// Free text until an options marker.
    Body,
    /// Option definitions and enum bullets until the capabilities marker.
    Options,
    /// Capability-bundle lines until a blank line.
    Capabilities,
    Done,
}

/// Parses the raw detail text for the named filter.
pub fn parse_filter_detail(name: &str, text: &str) -> FilterDetail {
    DetailParser::new(text).run(name)
}

struct DetailParser<'a> {
    cursor: LineCursor<'a>,
    detail: FilterDetail,
    /// Attachment target for enum bullet lines; set only when an
    /// option-definition line is recognized.
    current_option: Option<String>,
}

impl<'a> DetailParser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            cursor: LineCursor::new(text),
            detail: FilterDetail::default(),
            current_option: None,
        }
    }

    fn run(mut self, name: &str) -> FilterDetail {
        let mut state = DetailState::Preamble;
        while state != DetailState::Done {
            state = match state {
                DetailState::Preamble => self.preamble(),
                DetailState::Metadata => self.metadata(),
                DetailState::Body => self.body(),
                DetailState::Options => self.options(),
                DetailState::Capabilities => self.capabilities(),
                DetailState::Done => DetailState::Done,
            };
        }
        if self.detail.capabilities.is_none() {
            debug!(
                filter = name,
                "detail text ended before the capabilities bundle"
            );
        }
        self.detail
    }

    fn preamble(&mut self) -> DetailState {
        for _ in 0..3 {
            if self.cursor.next_line().is_none() {
                return DetailState::Done;
            }
        }
        DetailState::Metadata
    }

    fn metadata(&mut self) -> DetailState {
        while let Some(line) = self.cursor.next_line() {
            if line.is_empty() {
                return DetailState::Body;
            }
            if let Some((key, value)) = line.split_once(": ") {
                self.detail
                    .metadata
                    .insert(key.to_ascii_lowercase(), value.to_string());
            }
        }
        DetailState::Done
    }

    fn body(&mut self) -> DetailState {
        while let Some(line) = self.cursor.next_line() {
            if line.contains(OPTIONS_MARKER) {
                // One blank separator follows the marker.
                if self.cursor.next_line().is_none() {
                    return DetailState::Done;
                }
                return DetailState::Options;
            }
            if line.contains(NO_OPTIONS_MARKER) {
                return DetailState::Capabilities;
            }
            self.detail.body.push_str(line);
            self.detail.body.push('\n');
        }
        DetailState::Done
    }

    fn options(&mut self) -> DetailState {
        while let Some(line) = self.cursor.next_line() {
            if line.contains(CAPABILITIES_MARKER) {
                return DetailState::Capabilities;
            }
            // Option definitions are tried before enum bullets so a bullet
            // whose meaning contains parentheses cannot be misread.
            if let Some(caps) = PATTERNS.option_line.captures(line) {
                let option_name = caps[1].to_string();
                let spec = parse_option_spec(&caps[2], &caps[3]);
                self.current_option = Some(option_name.clone());
                self.detail.options.insert(option_name, spec);
                continue;
            }
            if let Some(caps) = PATTERNS.enum_line.captures(line) {
                let Some(current) = self.current_option.as_deref() else {
                    // Stray bullet before any option definition.
                    continue;
                };
                if let Some(option) = self.detail.options.get_mut(current) {
                    option
                        .choices
                        .get_or_insert_with(IndexMap::new)
                        .insert(caps[1].to_string(), caps[2].to_string());
                }
            }
        }
        DetailState::Done
    }

    fn capabilities(&mut self) -> DetailState {
        let mut caps = FilterCapabilities::default();
        while let Some(line) = self.cursor.next_line() {
            if line.is_empty() {
                break;
            }

            let (value, is_stream_type) = if let Some(m) = PATTERNS.stream_type.captures(line) {
                (m[1].to_string(), true)
            } else if let Some(m) = PATTERNS.codec_id.captures(line) {
                (m[1].to_string(), false)
            } else {
                continue;
            };

            // A bundle line may describe both pad directions at once.
            for (tag, set) in [
                ("Input", &mut caps.input),
                ("Output", &mut caps.output),
            ] {
                if !line.contains(tag) {
                    continue;
                }
                if is_stream_type {
                    set.stream_type.insert(value.clone());
                } else {
                    set.codec_id.insert(value.clone());
                }
            }
        }
        self.detail.capabilities = Some(caps);
        DetailState::Done
    }
}

/// Parses the parenthesized type-and-modifiers field of an option line.
///
/// The field is comma-separated; the first token is the type, and the first
/// later token containing `default` carries the default value after its
/// first `": "`. A default token without `": "` yields no default.
fn parse_option_spec(attributes: &str, description: &str) -> OptionSpec {
    let mut tokens = attributes.split(", ");
    let value_type = tokens.next().unwrap_or("").to_string();
    let default = tokens
        .find(|token| token.contains("default"))
        .and_then(|token| token.split_once(": "))
        .map(|(_, raw)| OptionValue::from_typed_str(&value_type, raw));

    OptionSpec {
        value_type,
        description: description.to_string(),
        default,
        choices: None,
    }
}
