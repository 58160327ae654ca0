//! eventalign-diff - Tolerance-aware diff for eventalign tables

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use eventalign_diff::config::{Config, OutputFormat};
use eventalign_diff::diff::compare_files;
use eventalign_diff::output::render_to_stdout;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Compare a generated eventalign table against a reference, column by column
#[derive(Parser, Debug)]
#[command(name = "eventalign-diff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Reference table
    reference_file: PathBuf,

    /// Generated table to check
    output_file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// JSON schema file replacing the built-in column layout
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Override a column tolerance, e.g. event_stdv=0.1 (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    tolerance: Vec<String>,

    /// Report a table that ends before the other as a mismatch
    #[arg(long)]
    strict_row_count: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli) {
        Ok(matched) => {
            if matched {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1) // Mismatch found
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to set tracing subscriber: {}", e);
    }
}

fn run(cli: Cli) -> Result<bool> {
    let mut config = Config::new(cli.reference_file, cli.output_file)
        .with_output_format(cli.format.into())
        .with_tolerance_overrides(cli.tolerance)
        .with_strict_row_count(cli.strict_row_count);
    if let Some(schema) = cli.schema {
        config = config.with_schema_file(schema);
    }

    let schema = config.load_schema().context("Failed to build schema")?;
    debug!(columns = schema.len(), "schema ready");

    let outcome = compare_files(
        &config.reference_file,
        &config.output_file,
        &schema,
        config.strict_row_count,
    )
    .with_context(|| {
        format!(
            "Failed to compare {} with {}",
            config.reference_file.display(),
            config.output_file.display()
        )
    })?;

    render_to_stdout(
        &outcome,
        &config.reference_file,
        &config.output_file,
        config.output_format,
    )?;

    Ok(outcome.is_match())
}
