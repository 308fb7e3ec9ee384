//! Report files.
//!
//! Persists the vulnerabilities of an audit as JSON or CSV in a directory,
//! named `report_<domain>_<YYYYmmdd_HHMMSS>.<ext>`.

mod csv;
mod json;
mod types;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::OutputFormat;
use crate::run::AuditReport;

pub use self::csv::{write_csv, write_csv_report};
pub use json::write_json_report;
pub use types::{report_filename, ReportSummary};

/// Writes the report file for `format`, if that format produces one.
///
/// Text output is printed rather than persisted and yields `Ok(None)`.
pub fn write_report(
    report: &AuditReport,
    format: OutputFormat,
    dir: &Path,
) -> Result<Option<PathBuf>> {
    match format {
        OutputFormat::Text => Ok(None),
        OutputFormat::Json => write_json_report(report, dir).map(Some),
        OutputFormat::Csv => write_csv_report(report, dir).map(Some),
    }
}
