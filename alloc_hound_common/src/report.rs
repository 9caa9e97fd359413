// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::finding::{Finding, Severity};
use crate::span::SourceText;
use ansi_term::Color;

/// Convert a finding to a user-readable string with file and line information
pub fn render(finding: &Finding, file_name: &str, source: &SourceText) -> String {
    let lc = source.line_col(finding.span.lo);
    let line_text = source.line_text(finding.span.lo);
    let snippet = source.snippet(finding.span);
    let line_indent = " ".repeat(lc.line.to_string().len() + 1);
    let caret_pad = " ".repeat(lc.column as usize - 1);

    format!(
        "{} [{}]: {}\n{}:{}:{}\n{}|\n{} | {}\n{}| {}{}\n",
        severity_to_string(finding.severity),
        finding.rule_id,
        finding.message,
        file_name,
        lc.line,
        lc.column,
        line_indent,
        lc.line,
        line_text,
        line_indent,
        caret_pad,
        "^".repeat(snippet.len().max(1)),
    )
}

/// Render a whole batch, one rendered finding per entry.
pub fn render_all(findings: &[Finding], file_name: &str, source: &SourceText) -> String {
    findings
        .iter()
        .map(|f| render(f, file_name, source))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize findings to JSON for machine consumers (CI annotations etc.)
pub fn to_json(findings: &[Finding]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(findings)
}

fn severity_to_string(severity: Severity) -> String {
    match severity {
        Severity::Info => Color::Blue.bold().paint("info").to_string(),
        Severity::Warn => Color::Yellow.bold().paint("warning").to_string(),
        Severity::Error => Color::Red.bold().paint("error").to_string(),
    }
}
