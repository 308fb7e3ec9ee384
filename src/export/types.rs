//! Report file types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::models::Protocol;
use crate::run::AuditReport;

/// Persisted subset of an audit: vulnerabilities of the record analyzers.
///
/// Recommendations and host findings are not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub scan_time: String,
    pub domain: String,
    pub spf_vulnerabilities: Vec<String>,
    pub dmarc_vulnerabilities: Vec<String>,
    pub dkim_vulnerabilities: Vec<String>,
}

impl ReportSummary {
    /// `(protocol label, vulnerability)` pairs in SPF, DMARC, DKIM order.
    pub fn rows(&self) -> Vec<(String, &str)> {
        Protocol::iter()
            .flat_map(move |protocol| {
                let label = protocol.to_string();
                self.vulnerabilities(protocol)
                    .iter()
                    .map(move |finding| (label.clone(), finding.as_str()))
            })
            .collect()
    }

    fn vulnerabilities(&self, protocol: Protocol) -> &[String] {
        match protocol {
            Protocol::Spf => &self.spf_vulnerabilities,
            Protocol::Dmarc => &self.dmarc_vulnerabilities,
            Protocol::Dkim => &self.dkim_vulnerabilities,
        }
    }
}

impl From<&AuditReport> for ReportSummary {
    fn from(report: &AuditReport) -> Self {
        Self {
            scan_time: report.scan_time.to_rfc3339(),
            domain: report.domain.clone(),
            spf_vulnerabilities: owned(report.spf.vulnerabilities()),
            dmarc_vulnerabilities: owned(report.dmarc.vulnerabilities()),
            dkim_vulnerabilities: owned(report.dkim.vulnerabilities()),
        }
    }
}

fn owned(findings: Vec<&str>) -> Vec<String> {
    findings.into_iter().map(str::to_string).collect()
}

/// `report_<domain>_<YYYYmmdd_HHMMSS>.<extension>`
pub fn report_filename(domain: &str, time: DateTime<Utc>, extension: &str) -> String {
    format!(
        "report_{domain}_{}.{extension}",
        time.format("%Y%m%d_%H%M%S")
    )
}
