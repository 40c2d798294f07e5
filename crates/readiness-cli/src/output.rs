use anyhow::Context;
use clap::ValueEnum;
use readiness_core::io::atomic_write;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the header.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let header_row: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect();
    let _ = writeln!(out, "{}", header_row.join("  ").trim_end());

    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let _ = writeln!(out, "{}", sep.join("  "));

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }
    out
}

/// Print the finished report, or write it atomically to `file`.
pub fn emit(report: &str, file: Option<&Path>) -> anyhow::Result<()> {
    match file {
        Some(path) => {
            atomic_write(path, report.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::debug!(path = %path.display(), bytes = report.len(), "report written");
        }
        None => print!("{report}"),
    }
    Ok(())
}
