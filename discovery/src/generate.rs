//! Sequential catalog generation driver.
//!
//! One run is four invocations plus two per-filter sweeps, strictly ordered
//! and single-threaded: codec listing, filter listing, then detail text for
//! every filter, then the links report for every filter. Each invocation
//! blocks to completion before the next begins; a fatal invocation error
//! aborts the whole run with no partial output.

use gpac_catalog_core::{CatalogBuilder, CodecRecord, FilterRecord};
use tracing::info;

use crate::extractor::{Result, ToolInvoker};
use crate::parser::{codecs, detail, index, links};
use crate::progress::{Phase, ProgressObserver};
use crate::report::GenerationReport;

/// Complete output of one generation run.
#[derive(Debug)]
pub struct Catalog {
    pub codecs: Vec<CodecRecord>,
    pub filters: Vec<FilterRecord>,
    pub report: GenerationReport,
}

/// Runs a full extraction against the given tool invoker.
///
/// Degraded per-filter parses (truncated detail text, degenerate links
/// report) are tolerated and recorded in the report; diagnostic output on a
/// clean command aborts the run.
pub fn generate_catalog(
    invoker: &dyn ToolInvoker,
    progress: &mut dyn ProgressObserver,
) -> Result<Catalog> {
    let codec_text = invoker.invoke("-h codecs", false)?;
    let codecs = codecs::parse_codec_listing(&codec_text);
    info!(codecs = codecs.len(), "parsed codec listing");

    let filter_text = invoker.invoke("-h filters", false)?;
    let filter_index = index::parse_filter_index(&filter_text);
    info!(filters = filter_index.len(), "parsed filter index");

    let mut builder = CatalogBuilder::from_index(filter_index);
    let names = builder.filter_names();
    let mut truncated = Vec::new();
    let mut degenerate_links = Vec::new();

    progress.phase_started(Phase::Details, names.len());
    for (position, name) in names.iter().enumerate() {
        let text = invoker.invoke(&format!("-hh {name}"), false)?;
        let parsed = detail::parse_filter_detail(name, &text);
        if parsed.capabilities.is_none() {
            truncated.push(name.clone());
        }
        builder.apply_detail(name, parsed);
        progress.item_processed(Phase::Details, name, position);
    }

    progress.phase_started(Phase::Links, names.len());
    for (position, name) in names.iter().enumerate() {
        // The tool reports link data on the diagnostic channel by design.
        let text = invoker.invoke(&format!("-h links {name}"), true)?;
        match links::parse_filter_links(&text) {
            Some(parsed) => builder.apply_links(name, parsed),
            None => degenerate_links.push(name.clone()),
        }
        progress.item_processed(Phase::Links, name, position);
    }

    let filters = builder.finish();
    let report = GenerationReport::new(codecs.len(), filters.len(), truncated, degenerate_links);
    Ok(Catalog {
        codecs,
        filters,
        report,
    })
}
