use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use gpac_catalog_core::{CodecRecord, FilterRecord, validate_codecs, validate_filters};
use gpac_catalog_discovery::output::{
    OutputFormat, format_codecs, format_filters, format_report,
};
use gpac_catalog_discovery::{
    GpacRunner, TracingProgress, generate_catalog, parse_codec_listing, parse_filter_detail,
    parse_filter_links,
};

#[derive(Debug, Parser)]
#[command(name = "gpac-catalog")]
#[command(about = "Extract filter and codec catalogs from gpac help output")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the tool and write codec/filter catalogs to a directory.
    Generate(GenerateArgs),
    /// Parse a captured codec listing without executing the tool.
    ParseCodecs(ParseCodecsArgs),
    /// Parse one filter's captured detail text without executing the tool.
    ParseFilter(ParseFilterArgs),
    /// Parse one filter's captured links report without executing the tool.
    ParseLinks(ParseLinksArgs),
    /// Validate previously generated catalog JSON files.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Path or name of the gpac binary.
    #[arg(long, default_value = "gpac")]
    binary: String,
    /// Output directory for codecs.json, filters.json, and the run report.
    #[arg(long)]
    output: PathBuf,
    /// Per-invocation timeout in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Output format for catalog and report files (default: json).
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct ParseCodecsArgs {
    /// File containing captured `-h codecs` output; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct ParseFilterArgs {
    /// Filter name the captured text belongs to.
    #[arg(long)]
    name: String,
    /// File containing captured `-hh <name>` output; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ParseLinksArgs {
    /// File containing captured `-h links <name>` output; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Path to a generated codecs.json.
    #[arg(long)]
    codecs: Option<PathBuf>,
    /// Path to a generated filters.json.
    #[arg(long)]
    filters: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::ParseCodecs(args) => run_parse_codecs(args),
        Command::ParseFilter(args) => run_parse_filter(args),
        Command::ParseLinks(args) => run_parse_links(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let mut runner = GpacRunner::new(args.binary);
    if let Some(timeout_ms) = args.timeout_ms {
        runner = runner.with_timeout(Duration::from_millis(timeout_ms));
    }

    let mut progress = TracingProgress::default();
    let catalog = generate_catalog(&runner, &mut progress).map_err(|err| err.to_string())?;

    // Serialize everything before touching the filesystem, so a fatal run
    // leaves no partial output behind.
    let codecs_raw = format_codecs(&catalog.codecs, args.format)?;
    let filters_raw = format_filters(&catalog.filters, args.format)?;
    let report_raw = format_report(&catalog.report, args.format)?;

    fs::create_dir_all(&args.output).map_err(|err| {
        format!(
            "Failed to create output directory '{}': {err}",
            args.output.display()
        )
    })?;

    let ext = format_extension(args.format);
    for (file, raw) in [
        (format!("codecs.{ext}"), codecs_raw),
        (format!("filters.{ext}"), filters_raw),
        (format!("generation-report.{ext}"), report_raw),
    ] {
        let path = args.output.join(file);
        fs::write(&path, raw)
            .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
    }

    println!(
        "Wrote {} codec(s) and {} filter(s) to '{}'.",
        catalog.report.codec_count,
        catalog.report.filter_count,
        args.output.display()
    );
    if !catalog.report.truncated.is_empty() {
        eprintln!(
            "{} filter(s) with truncated detail text: {}",
            catalog.report.truncated.len(),
            catalog.report.truncated.join(", ")
        );
    }
    if !catalog.report.degenerate_links.is_empty() {
        eprintln!(
            "{} filter(s) without link information: {}",
            catalog.report.degenerate_links.len(),
            catalog.report.degenerate_links.join(", ")
        );
    }

    Ok(())
}

fn run_parse_codecs(args: ParseCodecsArgs) -> Result<(), String> {
    let text = read_input(args.input.as_deref())?;
    let records = parse_codec_listing(&text);
    println!("{}", format_codecs(&records, args.format)?);
    Ok(())
}

fn run_parse_filter(args: ParseFilterArgs) -> Result<(), String> {
    let text = read_input(args.input.as_deref())?;
    let detail = parse_filter_detail(&args.name, &text);
    let json = serde_json::to_string_pretty(&detail)
        .map_err(|err| format!("Failed to serialize detail: {err}"))?;
    println!("{json}");
    Ok(())
}

fn run_parse_links(args: ParseLinksArgs) -> Result<(), String> {
    let text = read_input(args.input.as_deref())?;
    match parse_filter_links(&text) {
        Some(links) => {
            let json = serde_json::to_string_pretty(&links)
                .map_err(|err| format!("Failed to serialize links: {err}"))?;
            println!("{json}");
            Ok(())
        }
        None => Err("links report has fewer than two lines".to_string()),
    }
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    if args.codecs.is_none() && args.filters.is_none() {
        return Err("Specify at least one input: --codecs or --filters".to_string());
    }

    let mut problems = Vec::new();

    if let Some(path) = args.codecs {
        let raw = fs::read_to_string(&path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
        let records: Vec<CodecRecord> = serde_json::from_str(&raw)
            .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))?;
        let errors = validate_codecs(&records);
        println!("Validated {} codec record(s).", records.len());
        problems.extend(errors.into_iter().map(|e| e.to_string()));
    }

    if let Some(path) = args.filters {
        let raw = fs::read_to_string(&path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
        let records: Vec<FilterRecord> = serde_json::from_str(&raw)
            .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))?;
        let errors = validate_filters(&records);
        println!("Validated {} filter record(s).", records.len());
        problems.extend(errors.into_iter().map(|e| e.to_string()));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems.join("; "))
    }
}

fn read_input(input: Option<&std::path::Path>) -> Result<String, String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|err| format!("Failed to read stdin: {err}"))?;
            Ok(text)
        }
    }
}

/// Returns the file extension for the given output format.
fn format_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Json => "json",
        OutputFormat::Yaml => "yaml",
    }
}
