//! sift - scan an order document and print a filtered report
//!
//! Usage:
//!   sift <file>                 Report every amount and the ids that follow it
//!   sift <file> -f 100 -p       Only amounts above 100, ids as absolute paths
//!   sift <file> -o report.txt   Write the report to a file
//!   sift <file> --tokens        Show the token stream instead of a report
//!
//! Examples:
//!   sift orders.xml --filter 100
//!   sift --xml '<o><amount>5</amount><l id="A"/></o>'

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;
use sift_common::warning::{clear_warnings, set_quiet};
use sift_xml::{ForwardOnlyParser, ReportConfig, ScanSummary, XmlTokenizer};

/// sift - forward-only order report scanner
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Report every amount and the ids that follow it
    sift orders.xml

    # Only amounts above 100, ids rendered as absolute paths
    sift orders.xml --filter 100 --paths

    # Settings from a JSON file, report into a file
    sift orders.xml --config report.json -o report.txt

    # Scan an inline document
    sift --xml '<o><amount>150</amount><line id="A1"/></o>'
"#)]
struct Cli {
    /// Path to the XML document
    #[arg(value_name = "FILE", required_unless_present = "xml", conflicts_with = "xml")]
    path: Option<PathBuf>,

    /// Scan an XML string directly instead of a file
    #[arg(long, value_name = "XML")]
    xml: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only report amounts strictly greater than this value
    #[arg(
        short = 'f',
        long = "filter",
        value_name = "AMOUNT",
        allow_negative_numbers = true
    )]
    filtered_amount: Option<i32>,

    /// Report ids as absolute element paths
    #[arg(short = 'p', long = "paths")]
    track_paths: bool,

    /// Load report settings from a JSON file (flags take precedence)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the token stream instead of a report
    #[arg(short, long)]
    tokens: bool,

    /// Suppress warnings, timing and the summary on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    set_quiet(cli.quiet);
    clear_warnings();

    let document = load_document(&cli)?;
    if cli.tokens {
        return print_tokens(&document);
    }
    let config = resolve_config(&cli)?;

    let started = Instant::now();
    let summary = if let Some(ref path) = cli.output {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        run(&document, &config, BufWriter::new(file))?
    } else {
        run(&document, &config, io::stdout().lock())?
    };
    let elapsed = started.elapsed();

    if !cli.quiet {
        eprintln!("Parsing took {} ms.", elapsed.as_millis());
        print_summary(&summary);
    }
    Ok(())
}

/// Scan `document` once into `output`.
fn run<W: Write>(document: &str, config: &ReportConfig, output: W) -> Result<ScanSummary> {
    let mut parser = ForwardOnlyParser::new();
    parser.bind_output(output);
    let report = parser.parse(document, config)?;
    Ok(report.summary)
}

/// Read the document from `--xml` or the positional path.
fn load_document(cli: &Cli) -> Result<String> {
    if let Some(ref xml) = cli.xml {
        return Ok(xml.clone());
    }
    match cli.path {
        Some(ref path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => bail!("no input: pass a FILE or --xml"),
    }
}

/// Merge the optional config file with command-line flags.
fn resolve_config(cli: &Cli) -> Result<ReportConfig> {
    let mut config = match cli.config {
        Some(ref path) => load_config(path)?,
        None => ReportConfig::default(),
    };
    if let Some(amount) = cli.filtered_amount {
        config = config.with_filtered_amount(amount);
    }
    if cli.track_paths {
        config = config.with_track_paths(true);
    }
    Ok(config)
}

fn load_config(path: &Path) -> Result<ReportConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn print_tokens(document: &str) -> Result<()> {
    let mut out = io::stdout().lock();
    for token in XmlTokenizer::new(document) {
        writeln!(out, "{}", token?)?;
    }
    Ok(())
}

fn print_summary(summary: &ScanSummary) {
    for line in summary_lines(summary) {
        eprintln!("{line}");
    }
}

/// The stderr summary, colored only when stderr is a terminal.
fn summary_lines(summary: &ScanSummary) -> Vec<String> {
    let written = format!("{} report lines", summary.lines_written());
    let mut lines = vec![format!(
        "{} ({} amounts, {} ids, {} tokens)",
        written.if_supports_color(Stderr, OwoColorize::green),
        summary.amounts_reported,
        summary.ids_reported,
        summary.tokens
    )];
    if !summary.issues.is_empty() {
        let skipped = format!("{} non-numeric amount value(s) skipped", summary.issues.len());
        lines.push(skipped.if_supports_color(Stderr, OwoColorize::yellow).to_string());
    }
    if summary.final_depth > 0 {
        let open = format!("{} element(s) still open at end of input", summary.final_depth);
        lines.push(open.if_supports_color(Stderr, OwoColorize::yellow).to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<order><amount>150</amount><line id="A1"/></order>"#;

    /// Helper: parse a command line.
    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sift").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_flags_map_to_config() {
        let cli = cli(&["orders.xml", "-f", "100", "--paths"]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(
            config,
            ReportConfig::new().with_filtered_amount(100).with_track_paths(true)
        );
    }

    #[test]
    fn test_negative_filter() {
        let cli = cli(&["orders.xml", "--filter", "-20"]);
        assert_eq!(cli.filtered_amount, Some(-20));
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["sift"]).is_err());
        assert!(Cli::try_parse_from(["sift", "a.xml", "--xml", "<a/>"]).is_err());
    }

    #[test]
    fn test_config_file_with_flag_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"filtered_amount": 500, "track_paths": true}}"#).unwrap();
        let path = file.path().to_str().unwrap();

        let from_file = resolve_config(&cli(&["a.xml", "-c", path])).unwrap();
        assert_eq!(from_file.filtered_amount, Some(500));
        assert!(from_file.track_paths);

        let overridden = resolve_config(&cli(&["a.xml", "-c", path, "-f", "10"])).unwrap();
        assert_eq!(overridden.filtered_amount, Some(10));
        assert!(overridden.track_paths);
    }

    #[test]
    fn test_bad_config_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let path = file.path().to_str().unwrap();
        let err = resolve_config(&cli(&["a.xml", "--config", path])).unwrap_err();
        assert!(err.to_string().starts_with("invalid config"));
    }

    #[test]
    fn test_load_document_from_file_and_inline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{DOC}").unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(load_document(&cli(&[path])).unwrap(), DOC);
        assert_eq!(load_document(&cli(&["--xml", DOC])).unwrap(), DOC);
    }

    #[test]
    fn test_missing_document_is_reported() {
        let err = load_document(&cli(&["/nonexistent/orders.xml"])).unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
    }

    #[test]
    fn test_run_writes_report() {
        let mut out = Vec::new();
        let summary = run(DOC, &ReportConfig::new().with_filtered_amount(100), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Amount: 150\nOrder ID: A1\n");
        assert_eq!(summary.lines_written(), 2);
    }

    #[test]
    fn test_run_surfaces_malformed_input() {
        let err = run("<order><amount", &ReportConfig::new(), Vec::new()).unwrap_err();
        assert!(err.to_string().starts_with("malformed input"));
    }

    #[test]
    fn test_summary_is_plain_without_color_support() {
        let doc = "<o><amount>n/a</amount><amount>n/a</amount><l id=\"A\"/>";
        let summary = run(doc, &ReportConfig::new(), io::sink()).unwrap();

        owo_colors::set_override(false);
        let lines = summary_lines(&summary);
        owo_colors::unset_override();

        assert_eq!(
            lines,
            vec![
                "0 report lines (0 amounts, 0 ids, 8 tokens)".to_string(),
                "2 non-numeric amount value(s) skipped".to_string(),
                "1 element(s) still open at end of input".to_string(),
            ]
        );
        assert!(lines.iter().all(|line| !line.contains('\u{1b}')));
    }
}
