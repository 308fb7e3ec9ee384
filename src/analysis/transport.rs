//! Transport security probing: MTA-STS, TLS-RPT and STARTTLS per MX host.

use futures::future::join_all;

use crate::config::{MTA_STS_PREFIX, TLS_RPT_PREFIX};
use crate::dns::{DnsLookup, DnsQuery, ResolutionService};
use crate::models::{AnalysisResult, StarttlsOutcome};
use crate::probe::NetworkProbe;

/// Findings of the transport prober plus the per-host STARTTLS outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportReport {
    pub result: AnalysisResult,
    /// One entry per MX host, in MX preference order.
    pub starttls: Vec<(String, StarttlsOutcome)>,
}

impl TransportReport {
    /// True when at least one host was probed and all of them advertised
    /// STARTTLS.
    pub fn all_hosts_advertise_starttls(&self) -> bool {
        !self.starttls.is_empty()
            && self
                .starttls
                .iter()
                .all(|(_, outcome)| *outcome == StarttlsOutcome::Advertised)
    }
}

/// Checks MTA-STS and TLS-RPT records and probes every MX host for STARTTLS.
pub async fn probe_transport<L, P>(
    domain: &str,
    resolver: &ResolutionService<L>,
    probe: &P,
) -> TransportReport
where
    L: DnsLookup,
    P: NetworkProbe,
{
    let mut report = TransportReport::default();

    let mta_sts = DnsQuery::txt(format!("{MTA_STS_PREFIX}.{domain}"));
    if resolver.resolve(&mta_sts).await.is_empty() {
        report
            .result
            .recommendation("Implement MTA-STS for enhanced mail transport security");
    }

    let tls_rpt = DnsQuery::txt(format!("{TLS_RPT_PREFIX}.{domain}"));
    if resolver.resolve(&tls_rpt).await.is_empty() {
        report
            .result
            .recommendation("Enable TLS reporting (TLS-RPT) for monitoring mail transport security");
    }

    let hosts = match resolver.try_resolve(&DnsQuery::mx(domain)).await {
        Ok(records) => records.mx_hosts(),
        Err(e) => {
            report
                .result
                .vulnerability(format!("MTA security check failed: {e}"));
            return report;
        }
    };

    let outcomes = join_all(hosts.iter().map(|host| starttls_outcome(probe, host))).await;
    for (host, outcome) in hosts.into_iter().zip(outcomes) {
        match outcome {
            StarttlsOutcome::Advertised => {}
            StarttlsOutcome::NotAdvertised => {
                report
                    .result
                    .vulnerability(format!("STARTTLS not supported on {host}"));
                report
                    .result
                    .recommendation(format!("Enable STARTTLS on mail server {host}"));
            }
            StarttlsOutcome::Unreachable => {
                report
                    .result
                    .vulnerability(format!("Unable to check STARTTLS on {host}"));
            }
        }
        report.starttls.push((host, outcome));
    }

    report
}

async fn starttls_outcome<P: NetworkProbe>(probe: &P, host: &str) -> StarttlsOutcome {
    match probe.smtp_capabilities(host).await {
        Ok(reply) if advertises_starttls(&reply) => StarttlsOutcome::Advertised,
        Ok(_) => StarttlsOutcome::NotAdvertised,
        Err(e) => {
            log::warn!("STARTTLS probe of {host} failed: {e}");
            StarttlsOutcome::Unreachable
        }
    }
}

/// Whether an SMTP transcript lists the `STARTTLS` extension.
pub fn advertises_starttls(reply: &str) -> bool {
    reply.to_ascii_uppercase().contains("STARTTLS")
}
