//! Text rendering of audit results.

use std::fmt::Write;

use colored::Colorize;
use log::Level;

use crate::config::OutputFormat;
use crate::error_handling::Diagnostic;
use crate::models::{AnalysisResult, Category, HeaderStatus, StarttlsOutcome};
use crate::run::AuditReport;

/// Renders the findings of `report` as text.
///
/// With `detailed`, the transport policy status, per-host STARTTLS outcomes
/// and the collected diagnostics are appended.
pub fn render_report(report: &AuditReport, detailed: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "Results:".cyan().bold());

    section(
        &mut out,
        "SPF Analysis",
        &report.spf,
        "No SPF records found".to_string(),
    );
    section(
        &mut out,
        "DMARC Analysis",
        &report.dmarc,
        "No DMARC records found".to_string(),
    );
    section(
        &mut out,
        &format!("DKIM Analysis ({})", report.selector),
        &report.dkim,
        format!("No DKIM records found for selector: {}", report.selector),
    );

    let host_findings = report.host.result.vulnerabilities();
    if host_findings.is_empty() {
        let _ = writeln!(out, "{}", "No additional security issues found".green());
    } else {
        let _ = writeln!(out, "\n{}", "Additional Security Checks".magenta().bold());
        for finding in host_findings {
            let _ = writeln!(out, "{}", row(Category::Vulnerability, finding));
        }
    }

    if detailed {
        render_status(&mut out, &report.header_status(), &report.transport.starttls);
        render_diagnostics(&mut out, &report.diagnostics);
    }

    let _ = writeln!(out, "\n{}", "=== Audit Complete ===".cyan().bold());
    out
}

/// Confirmation line printed after a report file was written.
pub fn render_saved(format: OutputFormat, path: &std::path::Path) -> String {
    let label = match format {
        OutputFormat::Text => "text",
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
    };
    format!("Report saved in {label} format: {}", path.display())
        .green()
        .to_string()
}

fn section(out: &mut String, title: &str, result: &AnalysisResult, empty: String) {
    if result.is_empty() {
        let _ = writeln!(out, "{}", empty.yellow());
        return;
    }
    let _ = writeln!(out, "\n{}", title.magenta().bold());
    // Vulnerabilities first, then recommendations
    for finding in result.vulnerabilities() {
        let _ = writeln!(out, "{}", row(Category::Vulnerability, finding));
    }
    for finding in result.recommendations() {
        let _ = writeln!(out, "{}", row(Category::Recommendation, finding));
    }
}

fn row(category: Category, message: &str) -> String {
    let severity = match category {
        Category::Vulnerability => "ERROR".red(),
        Category::Recommendation => "WARNING".yellow(),
    };
    format!("  {:<14} {message} [{severity}]", category.to_string().dimmed())
}

fn render_status(out: &mut String, status: &HeaderStatus, starttls: &[(String, StarttlsOutcome)]) {
    let _ = writeln!(out, "\n{}", "Transport Security Status".magenta().bold());
    for (name, enabled) in [
        ("STARTTLS", status.starttls),
        ("MTA-STS", status.mta_sts),
        ("TLS-RPT", status.tls_rpt),
    ] {
        let state = if enabled {
            "enabled".green()
        } else {
            "not detected".red()
        };
        let _ = writeln!(out, "  {name:<9} {state}");
    }
    for (host, outcome) in starttls {
        let outcome = match outcome {
            StarttlsOutcome::Advertised => "STARTTLS advertised".green(),
            StarttlsOutcome::NotAdvertised => "STARTTLS not advertised".red(),
            StarttlsOutcome::Unreachable => "unreachable".yellow(),
        };
        let _ = writeln!(out, "  {host}: {outcome}");
    }
}

fn render_diagnostics(out: &mut String, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}", "Diagnostics".magenta().bold());
    for diagnostic in diagnostics {
        let level = match diagnostic.level {
            Level::Error => "ERROR".red(),
            Level::Warn => "WARN".yellow(),
            _ => diagnostic.level.as_str().normal(),
        };
        let _ = writeln!(out, "  [{level}] {}: {}", diagnostic.source, diagnostic.message);
    }
}
