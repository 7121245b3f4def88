//! Structural validation of generated records.
//!
//! Generation itself is a faithful transcription pass and never validates;
//! these checks exist for the `validate` CLI subcommand, which re-reads
//! generated JSON and verifies the invariants downstream consumers rely on.
//!
//! # Examples
//!
//! ```
//! use gpac_catalog_core::*;
//!
//! let canon = CodecRecord {
//!     name: "avc".into(),
//!     description: "H.264".into(),
//!     variant_of: None,
//!     mime: "video/avc".into(),
//!     capabilities: CodecCapabilities::default(),
//! };
//! let mut alias = canon.clone();
//! alias.name = "h264".into();
//! alias.variant_of = Some("avc".into());
//!
//! assert!(validate_codecs(&[canon, alias]).is_empty());
//! ```

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::{CodecRecord, FilterRecord};

/// Structural problems found in a generated record sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A record has an empty or whitespace-only name.
    #[error("record name cannot be empty")]
    EmptyName,
    /// Two codec records share a name.
    #[error("duplicate codec: {0}")]
    DuplicateCodec(String),
    /// An alias record points at a canonical name missing from the catalog.
    #[error("codec '{name}' is a variant of unknown codec '{canonical}'")]
    DanglingVariant { name: String, canonical: String },
    /// An alias record points at another alias instead of a canonical record.
    #[error("codec '{name}' is a variant of variant '{canonical}'")]
    VariantOfVariant { name: String, canonical: String },
    /// An alias record disagrees with its canonical record on shared fields.
    #[error("codec '{0}' diverges from its canonical record")]
    VariantMismatch(String),
    /// Two filter records share a name.
    #[error("duplicate filter: {0}")]
    DuplicateFilter(String),
    /// A filter record carries sources without sinks or vice versa.
    #[error("filter '{0}' has only one side of its link report")]
    HalfLinks(String),
}

/// Validates a codec record sequence.
pub fn validate_codecs(codecs: &[CodecRecord]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut seen: HashSet<&str> = HashSet::new();
    let by_name: HashMap<&str, &CodecRecord> =
        codecs.iter().map(|c| (c.name.as_str(), c)).collect();

    for codec in codecs {
        if codec.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName);
            continue;
        }
        if !seen.insert(codec.name.as_str()) {
            errors.push(ValidationError::DuplicateCodec(codec.name.clone()));
        }

        let Some(canonical) = codec.variant_of.as_deref() else {
            continue;
        };
        match by_name.get(canonical) {
            None => errors.push(ValidationError::DanglingVariant {
                name: codec.name.clone(),
                canonical: canonical.to_string(),
            }),
            Some(target) if target.variant_of.is_some() => {
                errors.push(ValidationError::VariantOfVariant {
                    name: codec.name.clone(),
                    canonical: canonical.to_string(),
                });
            }
            Some(target) => {
                if target.description != codec.description
                    || target.mime != codec.mime
                    || target.capabilities != codec.capabilities
                {
                    errors.push(ValidationError::VariantMismatch(codec.name.clone()));
                }
            }
        }
    }

    errors
}

/// Validates a filter record sequence.
pub fn validate_filters(filters: &[FilterRecord]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for filter in filters {
        if filter.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName);
            continue;
        }
        if !seen.insert(filter.name.as_str()) {
            errors.push(ValidationError::DuplicateFilter(filter.name.clone()));
        }
        // Links are parsed from a single two-line report, so both sides are
        // present or both absent.
        if filter.sources.is_some() != filter.sinks.is_some() {
            errors.push(ValidationError::HalfLinks(filter.name.clone()));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodecCapabilities;
    use indexmap::IndexMap;

    fn codec(name: &str, variant_of: Option<&str>) -> CodecRecord {
        CodecRecord {
            name: name.to_string(),
            description: "desc".to_string(),
            variant_of: variant_of.map(String::from),
            mime: "audio/aac".to_string(),
            capabilities: CodecCapabilities::default(),
        }
    }

    fn filter(name: &str) -> FilterRecord {
        FilterRecord {
            name: name.to_string(),
            description: String::new(),
            metadata: IndexMap::new(),
            body: String::new(),
            options: IndexMap::new(),
            capabilities: None,
            sources: None,
            sinks: None,
        }
    }

    #[test]
    fn test_validate_codecs_accepts_alias_group() {
        let errors = validate_codecs(&[codec("mp4a", Some("aac")), codec("aac", None)]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_codecs_rejects_dangling_variant() {
        let errors = validate_codecs(&[codec("mp4a", Some("aac"))]);
        assert_eq!(
            errors,
            vec![ValidationError::DanglingVariant {
                name: "mp4a".to_string(),
                canonical: "aac".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_codecs_rejects_mismatched_variant() {
        let mut alias = codec("mp4a", Some("aac"));
        alias.mime = "audio/mp4".to_string();
        let errors = validate_codecs(&[alias, codec("aac", None)]);
        assert_eq!(
            errors,
            vec![ValidationError::VariantMismatch("mp4a".to_string())]
        );
    }

    #[test]
    fn test_validate_codecs_rejects_duplicates() {
        let errors = validate_codecs(&[codec("aac", None), codec("aac", None)]);
        assert_eq!(errors, vec![ValidationError::DuplicateCodec("aac".into())]);
    }

    #[test]
    fn test_validate_filters_rejects_half_links() {
        let mut bad = filter("aout");
        bad.sources = Some(Vec::new());
        let errors = validate_filters(&[filter("fin"), bad]);
        assert_eq!(errors, vec![ValidationError::HalfLinks("aout".into())]);
    }
}
