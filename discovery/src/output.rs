//! Output formatting for records and reports.

use gpac_catalog_core::{CodecRecord, FilterRecord};

use crate::report::GenerationReport;

/// Supported output formats.
///
/// JSON is the on-disk contract consumed by the UI data layer: an array of
/// flat objects per entity, each object's `name` field first.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Formats a codec record sequence in the requested output format.
pub fn format_codecs(codecs: &[CodecRecord], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(codecs)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(codecs).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}

/// Formats a filter record sequence in the requested output format.
pub fn format_filters(filters: &[FilterRecord], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(filters)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(filters).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}

/// Formats a generation report in the requested output format.
pub fn format_report(report: &GenerationReport, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}
