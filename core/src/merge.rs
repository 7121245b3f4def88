//! Record assembly from per-stage parse products.
//!
//! Each generation run parses the filter index first, then per-filter detail
//! text, then per-filter link reports. [`CatalogBuilder`] merges the three
//! stages into final [`FilterRecord`]s, preserving index order and omitting
//! optional fields whose parse was degraded. [`CodecSet`] collects expanded
//! codec records into a flat, insertion-ordered sequence.
//!
//! # Example
//!
//! ```
//! use gpac_catalog_core::{CatalogBuilder, FilterDetail, FilterLinks};
//! use indexmap::IndexMap;
//!
//! let mut index = IndexMap::new();
//! index.insert("fin".to_string(), "file input".to_string());
//!
//! let mut builder = CatalogBuilder::from_index(index);
//! builder.apply_detail("fin", FilterDetail::default());
//! builder.apply_links("fin", FilterLinks { sources: vec![], sinks: vec!["fout".into()] });
//!
//! let records = builder.finish();
//! assert_eq!(records[0].name, "fin");
//! assert_eq!(records[0].sinks.as_deref(), Some(&["fout".to_string()][..]));
//! ```

use indexmap::IndexMap;

use crate::{CodecRecord, FilterDetail, FilterLinks, FilterRecord};

/// Insertion-ordered codec collection keyed by name.
///
/// Re-inserting an existing name replaces the record but keeps its original
/// position, so catalog order follows first appearance in the source text.
#[derive(Debug, Default)]
pub struct CodecSet {
    records: IndexMap<String, CodecRecord>,
}

impl CodecSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: CodecRecord) {
        self.records.insert(record.name.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Flattens into the serialized catalog sequence.
    pub fn into_records(self) -> Vec<CodecRecord> {
        self.records.into_values().collect()
    }
}

#[derive(Debug, Default)]
struct FilterEntry {
    description: String,
    detail: Option<FilterDetail>,
    links: Option<FilterLinks>,
}

/// Merges index descriptions, detail parses, and link parses into final
/// filter records, in index order.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    filters: IndexMap<String, FilterEntry>,
}

impl CatalogBuilder {
    /// Seeds the builder with the filter index (name → description).
    pub fn from_index(index: IndexMap<String, String>) -> Self {
        let filters = index
            .into_iter()
            .map(|(name, description)| {
                (
                    name,
                    FilterEntry {
                        description,
                        ..FilterEntry::default()
                    },
                )
            })
            .collect();
        Self { filters }
    }

    /// Filter names in index order, for the sequential per-filter sweeps.
    pub fn filter_names(&self) -> Vec<String> {
        self.filters.keys().cloned().collect()
    }

    /// Attaches a detail parse result. Unknown names are ignored.
    pub fn apply_detail(&mut self, name: &str, detail: FilterDetail) {
        if let Some(entry) = self.filters.get_mut(name) {
            entry.detail = Some(detail);
        }
    }

    /// Attaches a links parse result. Unknown names are ignored.
    pub fn apply_links(&mut self, name: &str, links: FilterLinks) {
        if let Some(entry) = self.filters.get_mut(name) {
            entry.links = Some(links);
        }
    }

    /// Emits final records in index order.
    pub fn finish(self) -> Vec<FilterRecord> {
        self.filters
            .into_iter()
            .map(|(name, entry)| {
                let detail = entry.detail.unwrap_or_default();
                let (sources, sinks) = match entry.links {
                    Some(links) => (Some(links.sources), Some(links.sinks)),
                    None => (None, None),
                };
                FilterRecord {
                    name,
                    description: entry.description,
                    metadata: detail.metadata,
                    body: detail.body,
                    options: detail.options,
                    capabilities: detail.capabilities,
                    sources,
                    sinks,
                }
            })
            .collect()
    }
}
