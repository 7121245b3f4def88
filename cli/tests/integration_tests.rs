use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use gpac_catalog_core::{CodecRecord, FilterRecord};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_gpac-catalog")
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write test input");
    path
}

const CODEC_LISTING: &str = "codec listing\n\nflags legend\n\naac|mp4a DE: MPEG-4 AAC (audio/aac, audio/x-aac)\npng IO: PNG image (image/png)\n";

#[test]
fn parse_codecs_emits_expanded_records() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_file(dir.path(), "codecs.txt", CODEC_LISTING);

    let output = Command::new(bin())
        .args(["parse-codecs", "--input", input.to_str().unwrap()])
        .output()
        .expect("failed to run gpac-catalog");

    assert!(output.status.success());
    let records: Vec<CodecRecord> =
        serde_json::from_slice(&output.stdout).expect("stdout is a codec record array");
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["mp4a", "aac", "png"]);
    assert_eq!(records[0].variant_of.as_deref(), Some("aac"));
    assert_eq!(records[0].mime, "audio/aac");
}

#[test]
fn parse_filter_emits_detail_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let detail = "banner\nbanner\nbanner\nName: aenc\n\nbody line\nOptions (expert):\n\nbitrate (uint, default: 96000): target bitrate\nCapabilities Bundle:\nInput StreamType=\"Audio\"\n\n";
    let input = write_file(dir.path(), "detail.txt", detail);

    let output = Command::new(bin())
        .args([
            "parse-filter",
            "--name",
            "aenc",
            "--input",
            input.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run gpac-catalog");

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["metadata"]["name"], "aenc");
    assert_eq!(value["options"]["bitrate"]["default"], 96000);
    assert_eq!(value["options"]["bitrate"]["type"], "uint");
}

#[test]
fn parse_links_rejects_degenerate_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_file(dir.path(), "links.txt", "only one line\n");

    let output = Command::new(bin())
        .args(["parse-links", "--input", input.to_str().unwrap()])
        .output()
        .expect("failed to run gpac-catalog");

    assert!(!output.status.success());
}

#[test]
fn validate_accepts_generated_catalog() {
    let dir = tempfile::tempdir().expect("tempdir");
    let codecs = serde_json::json!([
        {
            "name": "aac",
            "description": "MPEG-4 AAC",
            "mime": "audio/aac",
            "capabilities": {"raw_input": false, "raw_output": false, "decoder": true, "encoder": true}
        }
    ]);
    let path = write_file(dir.path(), "codecs.json", &codecs.to_string());

    let output = Command::new(bin())
        .args(["validate", "--codecs", path.to_str().unwrap()])
        .output()
        .expect("failed to run gpac-catalog");

    assert!(output.status.success());
}

#[test]
fn validate_rejects_dangling_variant() {
    let dir = tempfile::tempdir().expect("tempdir");
    let codecs = serde_json::json!([
        {
            "name": "mp4a",
            "description": "MPEG-4 AAC",
            "variant_of": "aac",
            "mime": "audio/aac",
            "capabilities": {"raw_input": false, "raw_output": false, "decoder": true, "encoder": true}
        }
    ]);
    let path = write_file(dir.path(), "codecs.json", &codecs.to_string());

    let output = Command::new(bin())
        .args(["validate", "--codecs", path.to_str().unwrap()])
        .output()
        .expect("failed to run gpac-catalog");

    assert!(!output.status.success());
}

#[cfg(unix)]
#[test]
fn generate_writes_catalog_files_from_fake_tool() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("data");

    // Fake gpac replaying canned help output, link data on stderr.
    let script = r#"#!/bin/sh
case "$*" in
  "-h codecs") printf 'listing\n\nlegend\n\naac DE: MPEG-4 AAC (audio/aac)\n' ;;
  "-h filters") printf 'fin: File input\n' ;;
  "-hh fin") printf 'b1\nb2\nb3\nName: fin\n\nreads files\nNo options\nOutput StreamType="File"\n\n' ;;
  "-h links fin") printf 'fin sources: none\nfin sinks: none\n' >&2 ;;
esac
"#;
    let fake = write_file(dir.path(), "gpac-fake", script);
    let mut perms = fs::metadata(&fake).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&fake, perms).unwrap();

    let output = Command::new(bin())
        .args([
            "generate",
            "--binary",
            fake.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run gpac-catalog");

    assert!(
        output.status.success(),
        "generate failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let codecs: Vec<CodecRecord> =
        serde_json::from_str(&fs::read_to_string(out.join("codecs.json")).unwrap())
            .expect("codecs.json parses");
    assert_eq!(codecs.len(), 1);
    assert_eq!(codecs[0].name, "aac");

    let filters: Vec<FilterRecord> =
        serde_json::from_str(&fs::read_to_string(out.join("filters.json")).unwrap())
            .expect("filters.json parses");
    assert_eq!(filters.len(), 1);
    assert_eq!(filters[0].name, "fin");
    assert_eq!(filters[0].sources.as_deref(), Some(&[][..]));
    let caps = filters[0].capabilities.as_ref().expect("capabilities");
    assert!(caps.output.stream_type.contains("File"));

    assert!(out.join("generation-report.json").exists());
}
