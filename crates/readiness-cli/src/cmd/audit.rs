use crate::output::{emit, to_json, OutputFormat};
use crate::render;
use crate::CommonArgs;
use anyhow::Context;
use readiness_core::io::load_audit;
use readiness_core::summary::summarize_audit;
use readiness_core::types::Category;

pub fn run(args: &CommonArgs, extra_risk_areas: &[Category]) -> anyhow::Result<()> {
    let report = build_report(args, extra_risk_areas)?;
    emit(&report, args.file.as_deref())
}

pub fn build_report(args: &CommonArgs, extra_risk_areas: &[Category]) -> anyhow::Result<String> {
    tracing::debug!(input = %args.input.display(), "loading audit document");
    let mut input = load_audit(&args.input).context("failed to load audit document")?;
    input.risk_areas.extend(extra_risk_areas.iter().copied());
    tracing::debug!(
        findings = input.findings.len(),
        questions = ?input.questions.as_ref().map(Vec::len),
        risk_areas = input.risk_areas.len(),
        "audit document loaded"
    );

    let summary = summarize_audit(&input, args.as_of());

    let report = match args.output {
        OutputFormat::Text => render::text::audit(&summary),
        OutputFormat::Json => to_json(&summary)?,
        OutputFormat::Csv => render::csv::checklist(&summary),
    };
    Ok(report)
}
