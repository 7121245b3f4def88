//! Structured run report for one catalog generation.

use serde::{Deserialize, Serialize};

/// Machine-readable summary of a generation run.
///
/// Degraded parses do not fail the run; they are recorded here so malformed
/// upstream text stays observable instead of silently producing thinner
/// records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    /// RFC 3339 timestamp of the run.
    pub generated_at: String,
    pub codec_count: usize,
    pub filter_count: usize,
    /// Filters whose detail text ended before the capabilities bundle.
    pub truncated: Vec<String>,
    /// Filters whose links report had fewer than two lines.
    pub degenerate_links: Vec<String>,
}

impl GenerationReport {
    pub fn new(
        codec_count: usize,
        filter_count: usize,
        truncated: Vec<String>,
        degenerate_links: Vec<String>,
    ) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            codec_count,
            filter_count,
            truncated,
            degenerate_links,
        }
    }

    /// True when every filter parsed without degradation.
    pub fn is_clean(&self) -> bool {
        self.truncated.is_empty() && self.degenerate_links.is_empty()
    }
}
