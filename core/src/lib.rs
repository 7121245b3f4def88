//! Core record types and assembly primitives for GPAC catalogs.
//!
//! This crate defines the data model shared by the extraction pipeline and
//! its consumers:
//!
//! - [`CodecRecord`] — one codec entry, with capability flags and optional
//!   alias-group membership ([`variant_of`](CodecRecord::variant_of)).
//! - [`FilterRecord`] — one filter entry: description, metadata, body,
//!   option schemas, pad capabilities, and graph connectivity.
//! - [`OptionSpec`] / [`OptionValue`] — typed option schemas with optional
//!   defaults and enumerated values.
//! - [`FilterDetail`] / [`FilterLinks`] — intermediate parse products handed
//!   to the assembler.
//!
//! Assembly ([`CatalogBuilder`], [`CodecSet`]) merges per-stage parse
//! products into final record sequences, preserving index order.
//!
//! Validation ([`validate_codecs`], [`validate_filters`]) checks structural
//! invariants of generated output, such as dangling alias references and
//! duplicate names.
//!
//! # Example
//!
//! ```
//! use gpac_catalog_core::*;
//! use indexmap::IndexMap;
//!
//! let mut index = IndexMap::new();
//! index.insert("aout".to_string(), "Audio output".to_string());
//!
//! let mut builder = CatalogBuilder::from_index(index);
//! builder.apply_detail("aout", FilterDetail::default());
//!
//! let records = builder.finish();
//! assert_eq!(records[0].name, "aout");
//! assert!(validate_filters(&records).is_empty());
//! ```

mod merge;
mod types;
mod validate;

pub use merge::{CatalogBuilder, CodecSet};
pub use types::*;
pub use validate::{ValidationError, validate_codecs, validate_filters};
