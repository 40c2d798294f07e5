pub mod cmd;
pub mod output;
pub mod render;

use chrono::NaiveDate;
use clap::Args;
use output::OutputFormat;
use readiness_core::ReadinessError;
use std::path::PathBuf;

/// Flags shared by both binaries.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Input file (JSON, or YAML by .yaml/.yml extension)
    pub input: PathBuf,

    /// Report format
    #[arg(long, short = 'o', value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Evaluate deadlines as of this date (default: today)
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub as_of: Option<NaiveDate>,

    /// Log progress to stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{s}': {e}"))
}

/// Stdout carries only the report; logs go to stderr.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Exit code for a failed run: the code of the first `ReadinessError` in the
/// chain, otherwise 1.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|e| e.downcast_ref::<ReadinessError>())
        .map(ReadinessError::exit_code)
        .unwrap_or(1)
}

/// Print the error chain on one line and exit.
pub fn fail(err: anyhow::Error) -> ! {
    eprintln!("error: {err:#}");
    std::process::exit(exit_code(&err));
}
