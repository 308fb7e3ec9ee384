//! Core data types shared by the analyzers and the outer surfaces.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// Whether a finding is a weakness or a hardening suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum Category {
    Vulnerability,
    Recommendation,
}

/// A single audit finding. Findings carry no identifier beyond their text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub category: Category,
    pub message: String,
}

impl Finding {
    pub fn vulnerability(message: impl Into<String>) -> Self {
        Self {
            category: Category::Vulnerability,
            message: message.into(),
        }
    }

    pub fn recommendation(message: impl Into<String>) -> Self {
        Self {
            category: Category::Recommendation,
            message: message.into(),
        }
    }
}

/// Ordered findings produced by one analyzer.
///
/// Production order is kept: the first finding raised is reported first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    findings: Vec<Finding>,
}

impl AnalysisResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result holding exactly one vulnerability.
    pub fn single_vulnerability(message: impl Into<String>) -> Self {
        let mut result = Self::new();
        result.vulnerability(message);
        result
    }

    pub fn vulnerability(&mut self, message: impl Into<String>) {
        self.findings.push(Finding::vulnerability(message));
    }

    pub fn recommendation(&mut self, message: impl Into<String>) {
        self.findings.push(Finding::recommendation(message));
    }

    /// Appends every finding of `other`, keeping duplicates.
    pub fn merge(&mut self, other: &AnalysisResult) {
        self.findings.extend(other.findings.iter().cloned());
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn vulnerabilities(&self) -> Vec<&str> {
        self.messages(Category::Vulnerability)
    }

    pub fn recommendations(&self) -> Vec<&str> {
        self.messages(Category::Recommendation)
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    fn messages(&self, category: Category) -> Vec<&str> {
        self.findings
            .iter()
            .filter(|f| f.category == category)
            .map(|f| f.message.as_str())
            .collect()
    }
}

/// Protocols an audit reports on, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Protocol {
    #[strum(serialize = "SPF")]
    Spf,
    #[strum(serialize = "DMARC")]
    Dmarc,
    #[strum(serialize = "DKIM")]
    Dkim,
}

/// Result of probing one mail exchanger for STARTTLS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarttlsOutcome {
    Advertised,
    NotAdvertised,
    Unreachable,
}

/// Presence of transport-security signals for a domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeaderStatus {
    #[serde(rename = "STARTTLS")]
    pub starttls: bool,
    #[serde(rename = "MTA-STS")]
    pub mta_sts: bool,
    #[serde(rename = "TLS-RPT")]
    pub tls_rpt: bool,
}

/// TLS protocol versions, ordered oldest to newest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TlsVersion {
    Unknown,
    Ssl30,
    Tls10,
    Tls11,
    Tls12,
    Tls13,
}

impl TlsVersion {
    /// Oldest version accepted without a finding.
    pub const MINIMUM: TlsVersion = TlsVersion::Tls12;

    pub fn is_weak(&self) -> bool {
        *self < Self::MINIMUM
    }
}

impl fmt::Display for TlsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TlsVersion::Unknown => "Unknown",
            TlsVersion::Ssl30 => "SSLv3",
            TlsVersion::Tls10 => "TLSv1",
            TlsVersion::Tls11 => "TLSv1.1",
            TlsVersion::Tls12 => "TLSv1.2",
            TlsVersion::Tls13 => "TLSv1.3",
        })
    }
}

/// TLS details retrieved from a host's certificate endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateInfo {
    pub tls_version: TlsVersion,
    pub not_after: DateTime<Utc>,
}

impl CertificateInfo {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.not_after < now
    }
}
