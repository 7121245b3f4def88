//! Codec catalog parser.
//!
//! Parses the flat `-h codecs` listing into [`CodecRecord`]s. The listing
//! opens with two header blocks, each terminated by a blank line; content
//! lines follow the grammar `<name-field>: <description> (<mime-field>)`.
//!
//! The name field may carry single-letter capability flags after a space
//! (`I/O/D/E`) and may declare a pipe-separated alias group; every alias
//! expands into its own record pointing back at the group's first token.

use gpac_catalog_core::{CodecCapabilities, CodecRecord, CodecSet};
use tracing::debug;

use super::{LineCursor, PATTERNS};

/// Parses the raw codec-listing text into a flat record sequence.
///
/// Record order follows first appearance in the source text, with alias
/// records inserted before their canonical record. Lines not matching the
/// content grammar are skipped.
pub fn parse_codec_listing(text: &str) -> Vec<CodecRecord> {
    let mut cursor = LineCursor::new(text);

    // Content starts on the first line after the second blank line.
    let mut blanks = 0;
    loop {
        match cursor.next_line() {
            Some(line) => {
                if line.is_empty() {
                    blanks += 1;
                }
                if blanks == 2 {
                    break;
                }
            }
            None => {
                debug!("codec listing ended before its header blocks");
                return Vec::new();
            }
        }
    }

    let mut set = CodecSet::new();
    while let Some(line) = cursor.next_line() {
        let Some(caps) = PATTERNS.codec_line.captures(line) else {
            continue;
        };

        let name_field = &caps[1];
        let description = caps[2].to_string();
        let mime = select_mime(&caps[3]);

        let mut tokens = name_field.split(' ');
        let name = tokens.next().unwrap_or(name_field);
        let capabilities = CodecCapabilities::from_flags(tokens.next().unwrap_or(""));

        match name.split_once('|') {
            Some((canonical, _)) => {
                for alias in name.split('|').skip(1) {
                    set.insert(CodecRecord {
                        name: alias.to_string(),
                        description: description.clone(),
                        variant_of: Some(canonical.to_string()),
                        mime: mime.clone(),
                        capabilities,
                    });
                }
                set.insert(CodecRecord {
                    name: canonical.to_string(),
                    description,
                    variant_of: None,
                    mime,
                    capabilities,
                });
            }
            None => set.insert(CodecRecord {
                name: name.to_string(),
                description,
                variant_of: None,
                mime,
                capabilities,
            }),
        }
    }

    set.into_records()
}

/// Selects a single media-type token from a comma-separated candidate list.
///
/// The first candidate containing `/` wins; when none qualifies the original
/// field is kept verbatim.
fn select_mime(field: &str) -> String {
    if field.contains(',') {
        for candidate in field.split(',') {
            if candidate.contains('/') {
                return candidate.trim().to_string();
            }
        }
    }
    field.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "GPAC codec listing\n\nFlags: I raw input, O raw output, D decoder, E encoder\n\n";

    fn listing(lines: &str) -> String {
        format!("{HEADER}{lines}")
    }

    #[test]
    fn test_flags_and_mime_selection() {
        let records =
            parse_codec_listing(&listing("opus IODE: Opus audio (audio/opus, x-opus)\n"));

        assert_eq!(records.len(), 1);
        let opus = &records[0];
        assert_eq!(opus.name, "opus");
        assert_eq!(opus.description, "Opus audio");
        assert_eq!(opus.mime, "audio/opus");
        assert!(opus.capabilities.raw_input);
        assert!(opus.capabilities.raw_output);
        assert!(opus.capabilities.decoder);
        assert!(opus.capabilities.encoder);
    }

    #[test]
    fn test_alias_group_expands_into_variants() {
        let records = parse_codec_listing(&listing(
            "avc|h264|x264 D: MPEG-4 AVC video (video/avc)\n",
        ));

        assert_eq!(records.len(), 3);
        // Aliases land before the canonical record.
        assert_eq!(records[0].name, "h264");
        assert_eq!(records[0].variant_of.as_deref(), Some("avc"));
        assert_eq!(records[1].name, "x264");
        assert_eq!(records[1].variant_of.as_deref(), Some("avc"));
        assert_eq!(records[2].name, "avc");
        assert!(records[2].variant_of.is_none());

        for record in &records {
            assert_eq!(record.description, "MPEG-4 AVC video");
            assert_eq!(record.mime, "video/avc");
            assert!(record.capabilities.decoder);
            assert!(!record.capabilities.encoder);
        }
    }

    #[test]
    fn test_mime_without_slash_candidate_kept_verbatim() {
        let records = parse_codec_listing(&listing("theora: Theora video (theora, vorbis)\n"));
        assert_eq!(records[0].mime, "theora, vorbis");
    }

    #[test]
    fn test_codec_without_flags_defaults_to_no_capabilities() {
        let records = parse_codec_listing(&listing("flac: FLAC audio (audio/flac)\n"));
        assert_eq!(records[0].capabilities, CodecCapabilities::default());
    }

    #[test]
    fn test_non_matching_lines_are_skipped() {
        let records = parse_codec_listing(&listing(
            "separator line without parens\n\npng IO: PNG image (image/png)\n",
        ));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "png");
    }

    #[test]
    fn test_listing_without_two_header_blanks_is_empty() {
        assert!(parse_codec_listing("only one header line\n").is_empty());
        assert!(parse_codec_listing("").is_empty());
    }

    #[test]
    fn test_content_starts_after_second_blank() {
        // A codec-shaped line inside the header blocks must not be parsed.
        let text = "header (not/acodec)\n\nfake IODE: still header (audio/fake)\n\nreal: Real entry (audio/real)\n";
        let records = parse_codec_listing(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "real");
    }
}
