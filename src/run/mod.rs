//! Audit orchestration.
//!
//! [`Auditor`] runs every analyzer for one domain over injected DNS and
//! network backends. [`run_audit`] wires the live backends from a [`Config`](crate::Config).

mod init;

use chrono::{DateTime, Utc};

use crate::analysis::{
    analyze_dmarc, analyze_spf, check_dkim, probe_transport, HostReport, HostSecurityAnalyzer,
    TransportReport,
};
use crate::config::DMARC_PREFIX;
use crate::dns::{dmarc_records, spf_records, DnsLookup, DnsQuery, ResolutionService};
use crate::error_handling::{Diagnostic, Diagnostics};
use crate::models::{AnalysisResult, HeaderStatus};
use crate::probe::NetworkProbe;

pub use init::run_audit;

/// Everything learned about one domain in a single audit.
#[derive(Debug, Clone)]
pub struct AuditReport {
    /// Audited domain
    pub domain: String,
    /// DKIM selector that was checked
    pub selector: String,
    /// When the audit started
    pub scan_time: DateTime<Utc>,
    /// SPF findings
    pub spf: AnalysisResult,
    /// DMARC findings
    pub dmarc: AnalysisResult,
    /// DKIM findings, transport findings included
    pub dkim: AnalysisResult,
    /// STARTTLS probe outcomes and transport findings
    pub transport: TransportReport,
    /// Host findings and transport policy status
    pub host: HostReport,
    /// Non-fatal notices raised while auditing
    pub diagnostics: Vec<Diagnostic>,
}

impl AuditReport {
    pub fn header_status(&self) -> HeaderStatus {
        self.host.status
    }
}

/// Runs all analyzers for a domain.
///
/// `resolver` serves the policy lookups and the transport probe,
/// `host_resolver` the host checks. Both are expected to record into
/// `diagnostics`.
pub struct Auditor<L, P> {
    resolver: ResolutionService<L>,
    host_resolver: ResolutionService<L>,
    probe: P,
    diagnostics: Diagnostics,
}

impl<L, P> Auditor<L, P>
where
    L: DnsLookup,
    P: NetworkProbe,
{
    pub fn new(
        resolver: ResolutionService<L>,
        host_resolver: ResolutionService<L>,
        probe: P,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            resolver,
            host_resolver,
            probe,
            diagnostics,
        }
    }

    /// Audits `domain`, checking DKIM under `selector`.
    ///
    /// SPF, DMARC, DKIM (with the transport probe) and the host checks run
    /// concurrently. The transport probe runs once; its outcomes feed both
    /// the DKIM findings and the STARTTLS flag of the header status.
    pub async fn audit(&self, domain: &str, selector: &str) -> AuditReport {
        let scan_time = Utc::now();
        log::info!("Auditing {domain} (DKIM selector {selector})");

        let spf = async {
            let txt = self.resolver.resolve(&DnsQuery::txt(domain)).await;
            analyze_spf(&spf_records(&txt))
        };
        let dmarc = async {
            let query = DnsQuery::txt(format!("{DMARC_PREFIX}.{domain}"));
            let txt = self.resolver.resolve(&query).await;
            analyze_dmarc(&dmarc_records(&txt))
        };
        let dkim = async {
            let transport = probe_transport(domain, &self.resolver, &self.probe).await;
            let dkim = check_dkim(domain, selector, &self.resolver, &transport).await;
            (dkim, transport)
        };
        let analyzer = HostSecurityAnalyzer::new(domain, &self.host_resolver, &self.probe);

        let (spf, dmarc, (dkim, transport), mut host) =
            tokio::join!(spf, dmarc, dkim, analyzer.analyze());
        host.status.starttls = transport.all_hosts_advertise_starttls();

        log::info!(
            "Audit of {domain} finished: {} SPF, {} DMARC, {} DKIM, {} host vulnerabilities",
            spf.vulnerabilities().len(),
            dmarc.vulnerabilities().len(),
            dkim.vulnerabilities().len(),
            host.result.vulnerabilities().len()
        );

        AuditReport {
            domain: domain.to_string(),
            selector: selector.to_string(),
            scan_time,
            spf,
            dmarc,
            dkim,
            transport,
            host,
            diagnostics: self.diagnostics.entries(),
        }
    }
}
