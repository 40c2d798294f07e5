use crate::output::{emit, to_json, OutputFormat};
use crate::render;
use crate::CommonArgs;
use anyhow::Context;
use readiness_core::config::ReadinessConfig;
use readiness_core::io::{load_requirements, InputFormat};
use readiness_core::summary::summarize;
use std::path::Path;

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(args: &CommonArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            ReadinessConfig::load(path).context("failed to load configuration")?
        }
        None => ReadinessConfig::default(),
    };

    let report = build_report(args, &config)?;
    emit(&report, args.file.as_deref())
}

/// Render the complete report before anything is written, so a failure
/// never leaves a partial report behind.
pub fn build_report(args: &CommonArgs, config: &ReadinessConfig) -> anyhow::Result<String> {
    tracing::debug!(
        input = %args.input.display(),
        format = ?InputFormat::from_path(&args.input),
        "loading requirements"
    );
    let snapshot = load_requirements(&args.input).context("failed to load requirements")?;
    let as_of = args.as_of();
    tracing::debug!(
        requirements = snapshot.len(),
        applicable = snapshot.applicable().count(),
        %as_of,
        "requirements loaded"
    );

    let summary = summarize(&snapshot, config, as_of);
    tracing::debug!(
        state = %summary.readiness.state,
        blocking_gaps = summary.blocking_gaps.len(),
        "assessment complete"
    );

    let report = match args.output {
        OutputFormat::Text => render::text::readiness(&summary),
        OutputFormat::Json => to_json(&summary)?,
        OutputFormat::Csv => render::csv::requirements(&snapshot),
    };
    Ok(report)
}
