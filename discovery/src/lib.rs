//! Catalog extraction from gpac help output.
//!
//! This crate turns the free-text help output of the `gpac` command-line
//! tool into structured [`CodecRecord`]s and [`FilterRecord`]s. The parsing
//! core is offline and side-effect free; tool invocation is isolated behind
//! the [`ToolInvoker`] trait so captured text can be replayed without the
//! tool installed.
//!
//! # Main entry points
//!
//! - [`parse_codec_listing`] — parse a captured `-h codecs` listing.
//! - [`parse_filter_index`] — parse a captured `-h filters` listing.
//! - [`parse_filter_detail`] — parse one filter's `-hh <name>` text.
//! - [`parse_filter_links`] — parse one filter's `-h links <name>` report.
//! - [`generate_catalog`] — run the full sequential extraction against a
//!   [`ToolInvoker`] (requires the tool, or a fake, to supply text).
//!
//! # Example
//!
//! ```
//! use gpac_catalog_discovery::parse_filter_links;
//!
//! let report = "Sources: none\nSinks: fileout rawout\n";
//! let links = parse_filter_links(report).expect("two-line report");
//! assert!(links.sources.is_empty());
//! assert_eq!(links.sinks, vec!["fileout", "rawout"]);
//! ```
//!
//! # Degradation policy
//!
//! Per-filter parses degrade instead of failing: a truncated detail text
//! omits `capabilities`, a degenerate links report omits `sources`/`sinks`,
//! and both are recorded in the run's [`GenerationReport`]. Diagnostic
//! output on a command expected to be clean is fatal and aborts the run.
//!
//! [`CodecRecord`]: gpac_catalog_core::CodecRecord
//! [`FilterRecord`]: gpac_catalog_core::FilterRecord

pub mod extractor;
pub mod generate;
pub mod output;
pub mod parser;
pub mod progress;
pub mod report;

pub use extractor::{ExtractError, GpacRunner, ToolInvoker};
pub use generate::{Catalog, generate_catalog};
pub use parser::codecs::parse_codec_listing;
pub use parser::detail::parse_filter_detail;
pub use parser::index::parse_filter_index;
pub use parser::links::parse_filter_links;
pub use progress::{NullProgress, Phase, ProgressObserver, TracingProgress};
pub use report::GenerationReport;
