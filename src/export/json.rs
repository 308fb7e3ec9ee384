//! JSON report export.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::types::{report_filename, ReportSummary};
use crate::run::AuditReport;

/// Writes the JSON report for `report` into `dir`.
///
/// The file holds one pretty-printed object with the keys `scan_time`,
/// `domain`, `spf_vulnerabilities`, `dmarc_vulnerabilities` and
/// `dkim_vulnerabilities`.
pub fn write_json_report(report: &AuditReport, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(report_filename(&report.domain, report.scan_time, "json"));
    let summary = ReportSummary::from(report);
    let body = serde_json::to_string_pretty(&summary).context("Failed to serialize report")?;
    std::fs::write(&path, body)
        .with_context(|| format!("Failed to write report file: {}", path.display()))?;

    log::info!("Wrote JSON report to {}", path.display());
    Ok(path)
}
