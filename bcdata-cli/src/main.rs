//! bcdata CLI: validate the breast-cancer CSV against the fixed schema.
//!
//! With no arguments, reads `data/breast_cancer.csv`, validates every row,
//! prints the report to stdout, and exits 0 when the data is valid or 1 on
//! any validation failure, load error, or bad argument. Logs go to stderr
//! (`RUST_LOG`).

use anyhow::{Context, Result};
use bcdata_core::{
    load_records, LoadError, NonFinitePolicy, Outcome, OutputFormat, RecordValidator, RowPolicy,
    Schema, ValidatorConfig,
};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "validate-data",
    about = "Validate the breast-cancer CSV against the fixed feature schema"
)]
struct Cli {
    /// CSV file to validate. Defaults to data/breast_cancer.csv.
    input: Option<PathBuf>,

    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Accept NaN and infinite values in float columns.
    #[arg(long, default_value_t = false)]
    allow_non_finite: bool,

    /// Report at most one error per row.
    #[arg(long, default_value_t = false)]
    first_error_per_row: bool,

    /// Validate large tables on all cores.
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version.
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    match build_config(cli).and_then(|config| run(&config)) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(err) => {
            print_fatal(&err);
            ExitCode::FAILURE
        }
    }
}

/// Merge the optional config file with command-line overrides.
fn build_config(cli: Cli) -> Result<ValidatorConfig> {
    let mut config = match &cli.config {
        Some(path) => ValidatorConfig::from_file(path)?,
        None => ValidatorConfig::default(),
    };

    if let Some(input) = cli.input {
        config.input = input;
    }
    if let Some(format) = cli.format {
        config.format = format.into();
    }
    if cli.allow_non_finite {
        config.non_finite = NonFinitePolicy::Allow;
    }
    if cli.first_error_per_row {
        config.row_policy = RowPolicy::FirstErrorPerRow;
    }
    if cli.parallel {
        config.parallel = true;
    }

    debug!(?config, "resolved configuration");
    Ok(config)
}

fn run(config: &ValidatorConfig) -> Result<Outcome> {
    let schema = Schema::breast_cancer();
    let table = load_records(&config.input)?;

    let headers = schema.check_headers(&table.headers);
    if !headers.is_complete() {
        warn!(missing = ?headers.missing, "input is missing schema columns");
    }
    if !headers.unknown.is_empty() {
        debug!(ignored = ?headers.unknown, "ignoring columns not in schema");
    }

    let report = RecordValidator::new(schema)
        .with_policy(config.policy())
        .validate(&table.records);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.format {
        OutputFormat::Text => report.write_text(&mut out)?,
        OutputFormat::Json => {
            let json = report.to_json().context("failed to serialize report")?;
            writeln!(out, "{json}")?;
        }
    }
    out.flush()?;

    Ok(report.outcome())
}

fn print_fatal(err: &anyhow::Error) {
    match err.downcast_ref::<LoadError>() {
        Some(LoadError::NotFound { path }) => println!(
            "Error: '{}' not found. Please ensure the file exists.",
            path.display()
        ),
        _ => println!("An unexpected error occurred: {err:#}"),
    }
}
