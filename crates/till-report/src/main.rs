//! # till-report
//!
//! Parses a "sales by order type" report printed by the till.
//!
//! ## Usage
//! ```bash
//! # Sections as pretty JSON
//! till-report close-out.txt
//!
//! # Plain text with section totals
//! till-report close-out.txt --format text
//!
//! # Close-out sheet, with operator-entered figures (integer cents)
//! till-report close-out.txt --summary --manual manual.toml
//! ```
//!
//! Logging goes to stderr and honours `RUST_LOG`.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use till_core::{DailySummary, ManualEntries, ReportParser};
use till_report::render::{render_report, render_summary};
use till_report::{CliError, CliResult, OutputFormat, ReportConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Rebuild per-section line items from a till sales report", long_about = None)]
struct Cli {
    /// Report text file
    report: PathBuf,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,

    /// Reject a section header that reopens an earlier section
    #[arg(long)]
    strict: bool,

    /// Print the close-out sheet instead of the sections
    #[arg(long)]
    summary: bool,

    /// TOML file of operator-entered close-out figures
    #[arg(long, requires = "summary")]
    manual: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(out) => {
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let line = match &e {
                CliError::Report(report) => report.line(),
                _ => None,
            };
            error!(error = %e, ?line, "till-report failed");
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli) -> CliResult<String> {
    // An explicit --config must load; a broken file in the default location
    // falls back to defaults.
    let mut config = match &cli.config {
        Some(path) => ReportConfig::load(Some(path.as_path()))?,
        None => ReportConfig::load_or_default(None),
    };
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if cli.compact {
        config.output.pretty = false;
    }
    if cli.strict {
        config.parser.strict_headers = true;
    }

    let text = std::fs::read_to_string(&cli.report).map_err(|e| CliError::io(&cli.report, e))?;
    info!(path = ?cli.report, bytes = text.len(), "Parsing report");

    let parser = ReportParser::new(config.parser)?;
    let report = parser.parse(&text)?;
    info!(sections = report.sections.len(), "Report parsed");

    if cli.summary {
        let manual = match &cli.manual {
            Some(path) => load_manual(path)?,
            None => ManualEntries::default(),
        };
        let summary = DailySummary::from_sections(&report.sections, &manual)?;
        render_summary(&summary, &config.output)
    } else {
        render_report(&report, &config.output)
    }
}

fn load_manual(path: &Path) -> CliResult<ManualEntries> {
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
    Ok(toml::from_str(&contents)?)
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - ERROR: Parse failures
/// - WARN: Config fallbacks
/// - INFO: Run milestones
/// - DEBUG: Blocks and sections
/// - TRACE: Individual tokens
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,till=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
