//! CSV report export.
//!
//! One `Type,Finding` row per vulnerability, SPF first, then DMARC, then DKIM.

use anyhow::{Context, Result};
use csv::Writer;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::types::{report_filename, ReportSummary};
use crate::run::AuditReport;

/// Writes the CSV report for `report` into `dir`.
///
/// # Returns
///
/// Returns the path of the written file.
pub fn write_csv_report(report: &AuditReport, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(report_filename(&report.domain, report.scan_time, "csv"));
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;

    let rows = write_csv(&ReportSummary::from(report), file)?;
    log::info!("Wrote {rows} finding(s) to {}", path.display());
    Ok(path)
}

/// Writes the summary as CSV to `output`, returning the number of rows.
pub fn write_csv<W: Write>(summary: &ReportSummary, output: W) -> Result<usize> {
    let mut writer = Writer::from_writer(output);
    writer
        .write_record(["Type", "Finding"])
        .context("Failed to write CSV header")?;

    let rows = summary.rows();
    for (label, finding) in &rows {
        writer
            .write_record([label.as_str(), *finding])
            .context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV output")?;
    Ok(rows.len())
}
