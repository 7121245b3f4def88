//! Record type definitions for the generated catalog.
//!
//! This module defines the data model for codec and filter records extracted
//! from `gpac` help output. The types are designed for serialization with
//! [`serde`] and round-trip through JSON without lossy coercion: the on-disk
//! contract is an array of flat objects per entity, each object's `name`
//! field first (field order follows struct declaration order).

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Raw I/O and transcoding capabilities of a codec.
///
/// Derived from the single-letter flags adjacent to the codec name in the
/// codec listing (`I` raw input, `O` raw output, `D` decoder, `E` encoder).
/// All flags default to `false`; unrecognized letters are ignored.
///
/// # Examples
///
/// ```
/// use gpac_catalog_core::CodecCapabilities;
///
/// let caps = CodecCapabilities::from_flags("IODE");
/// assert!(caps.raw_input && caps.raw_output && caps.decoder && caps.encoder);
///
/// let partial = CodecCapabilities::from_flags("DX");
/// assert!(partial.decoder);
/// assert!(!partial.encoder);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecCapabilities {
    pub raw_input: bool,
    pub raw_output: bool,
    pub decoder: bool,
    pub encoder: bool,
}

impl CodecCapabilities {
    /// Maps a flag string onto capability booleans, one letter per flag.
    pub fn from_flags(flags: &str) -> Self {
        let mut caps = Self::default();
        for flag in flags.chars() {
            match flag {
                'I' => caps.raw_input = true,
                'O' => caps.raw_output = true,
                'D' => caps.decoder = true,
                'E' => caps.encoder = true,
                _ => continue,
            }
        }
        caps
    }
}

/// A single codec entry in the catalog.
///
/// Codec names declared as a pipe-separated alias group (`avc|h264|x264`)
/// expand into one record per name: the group's first token is the canonical
/// record, and every alias record carries [`variant_of`](Self::variant_of)
/// pointing back at it. Alias records share the canonical record's
/// description, mime, and capabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecRecord {
    /// Unique codec name.
    pub name: String,
    /// Description from the codec listing.
    pub description: String,
    /// Canonical name when this record is an alias-group member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_of: Option<String>,
    /// Selected media-type token (first comma-separated candidate containing
    /// `/`, else the original field verbatim).
    pub mime: String,
    pub capabilities: CodecCapabilities,
}

/// Typed default value of a filter option.
///
/// Serialized untagged, so JSON keeps the native representation
/// (`128000`, `2.5`, `true`, `"auto"`).
///
/// # Examples
///
/// ```
/// use gpac_catalog_core::OptionValue;
///
/// assert_eq!(OptionValue::from_typed_str("uint", "128000"), OptionValue::Integer(128000));
/// // A uint default that does not parse stays a string.
/// assert_eq!(
///     OptionValue::from_typed_str("uint", "10M"),
///     OptionValue::Text("10M".to_string()),
/// );
/// assert_eq!(OptionValue::from_typed_str("bool", "false"), OptionValue::Bool(true));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl OptionValue {
    /// Casts a raw default-value string according to the option's type token.
    ///
    /// `uint` parses as integer with a string fallback, `flt` parses as float
    /// with the same fallback, `bool` is always `true` (the source format
    /// never encodes a literal false default), and every other type token
    /// passes the string through.
    pub fn from_typed_str(value_type: &str, raw: &str) -> Self {
        match value_type {
            "uint" => raw
                .parse::<i64>()
                .map_or_else(|_| Self::Text(raw.to_string()), Self::Integer),
            "flt" => raw
                .parse::<f64>()
                .map_or_else(|_| Self::Text(raw.to_string()), Self::Float),
            "bool" => Self::Bool(true),
            _ => Self::Text(raw.to_string()),
        }
    }
}

/// Schema of one configurable filter option.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Type token from the option line (`uint`, `flt`, `bool`, or any other
    /// token treated as a generic string).
    #[serde(rename = "type")]
    pub value_type: String,
    /// Description from the option line.
    pub description: String,
    /// Default value, present only when the option line declares one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<OptionValue>,
    /// Symbolic values from indented bullet lines following the option line.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<IndexMap<String, String>>,
}

/// Accepted stream types and codec identifiers for one pad direction.
///
/// Sets are deduplicated; serialization order is sorted (insertion order is
/// not significant), which keeps generated output deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    pub codec_id: BTreeSet<String>,
    pub stream_type: BTreeSet<String>,
}

impl CapabilitySet {
    pub fn is_empty(&self) -> bool {
        self.codec_id.is_empty() && self.stream_type.is_empty()
    }
}

/// Input/output capability sets parsed from a filter's capabilities bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCapabilities {
    pub input: CapabilitySet,
    pub output: CapabilitySet,
}

/// Intermediate product of the filter detail parser.
///
/// `capabilities` is `None` exactly when the detail text ended before the
/// capabilities bundle was reached (early termination, non-fatal).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterDetail {
    /// Lower-cased key → value pairs from the fixed-format header block.
    pub metadata: IndexMap<String, String>,
    /// Free-text body, possibly empty.
    pub body: String,
    /// Options in declaration order.
    pub options: IndexMap<String, OptionSpec>,
    pub capabilities: Option<FilterCapabilities>,
}

/// Intermediate product of the filter link parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterLinks {
    /// Filters that may feed into this filter.
    pub sources: Vec<String>,
    /// Filters that may receive from this filter.
    pub sinks: Vec<String>,
}

/// A single filter entry in the catalog.
///
/// Record order in the serialized catalog follows the filter index listing
/// and is significant. Optional fields are omitted entirely when the
/// corresponding parse was degraded: `capabilities` on truncated detail
/// text, `sources`/`sinks` on a degenerate links report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRecord {
    /// Unique filter name.
    pub name: String,
    /// Description from the filter index listing.
    pub description: String,
    /// Lower-cased key → value pairs from the detail header block.
    pub metadata: IndexMap<String, String>,
    /// Free-text body between the header block and the options marker.
    pub body: String,
    /// Option schemas in declaration order.
    pub options: IndexMap<String, OptionSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<FilterCapabilities>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sinks: Option<Vec<String>>,
}
