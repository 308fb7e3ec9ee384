//! Host-level checks: MX enumeration, certificates, reverse DNS and
//! transport policy records.

use chrono::Utc;
use futures::future::join_all;

use crate::config::{MTA_STS_PREFIX, TLS_RPT_PREFIX};
use crate::dns::{DnsLookup, DnsQuery, ResolutionService};
use crate::error_handling::ResolutionError;
use crate::models::{AnalysisResult, HeaderStatus};
use crate::probe::NetworkProbe;

const SOURCE: &str = "host";

/// Findings of the host analyzer and the transport policy status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostReport {
    pub result: AnalysisResult,
    pub status: HeaderStatus,
}

/// Runs the host checks for one domain.
///
/// DNS lookups that time out or fail are reported as diagnostics on the
/// resolver's sink and never become findings.
pub struct HostSecurityAnalyzer<'a, L, P> {
    domain: &'a str,
    resolver: &'a ResolutionService<L>,
    probe: &'a P,
}

impl<'a, L, P> HostSecurityAnalyzer<'a, L, P>
where
    L: DnsLookup,
    P: NetworkProbe,
{
    pub fn new(domain: &'a str, resolver: &'a ResolutionService<L>, probe: &'a P) -> Self {
        Self {
            domain,
            resolver,
            probe,
        }
    }

    /// Enumerates MX hosts and checks the certificate of each one.
    pub async fn check_mx_records(&self) -> AnalysisResult {
        let mut result = AnalysisResult::new();
        let hosts = self.mx_hosts(&mut result).await;
        for outcome in join_all(hosts.iter().map(|host| self.check_ssl_tls(host))).await {
            result.merge(&outcome);
        }
        result
    }

    /// Checks the certificate expiry and negotiated TLS version of `host`.
    pub async fn check_ssl_tls(&self, host: &str) -> AnalysisResult {
        let mut result = AnalysisResult::new();
        match self.probe.tls_certificate(host).await {
            Ok(info) => {
                if info.is_expired_at(Utc::now()) {
                    result.vulnerability(format!("SSL certificate expired for {host}"));
                }
                if info.tls_version.is_weak() {
                    result.vulnerability(format!(
                        "Weak SSL/TLS version detected: {}",
                        info.tls_version
                    ));
                }
            }
            Err(e) => {
                result.vulnerability(format!("SSL/TLS check failed for {host}: {e}"));
            }
        }
        result
    }

    /// Checks that the PTR name of `host`'s first address lies within the
    /// audited domain.
    pub async fn check_reverse_dns(&self, host: &str) -> AnalysisResult {
        match self.reverse_name(host).await {
            Ok(name) if self.within_domain(&name) => AnalysisResult::new(),
            Ok(name) => {
                log::debug!("PTR of {host} is {name}, outside {}", self.domain);
                AnalysisResult::single_vulnerability(format!("Reverse DNS mismatch for {host}"))
            }
            Err(reason) => {
                AnalysisResult::single_vulnerability(format!("Reverse DNS check failed: {reason}"))
            }
        }
    }

    /// Looks up the MTA-STS and TLS-RPT records.
    ///
    /// The STARTTLS flag of the returned status is left unset.
    pub async fn check_email_headers(&self) -> (AnalysisResult, HeaderStatus) {
        let mut result = AnalysisResult::new();
        let mut status = HeaderStatus::default();

        let mta_sts = DnsQuery::txt(format!("{MTA_STS_PREFIX}.{}", self.domain));
        status.mta_sts = self
            .policy_present(
                &mta_sts,
                "MTA-STS policy not configured (Recommended for enhanced security)",
                &mut result,
            )
            .await;

        let tls_rpt = DnsQuery::txt(format!("{TLS_RPT_PREFIX}.{}", self.domain));
        status.tls_rpt = self
            .policy_present(&tls_rpt, "TLS-RPT not configured", &mut result)
            .await;

        (result, status)
    }

    /// Resolves MX once, checks every host, then the policy records.
    pub async fn analyze(&self) -> HostReport {
        let mut result = AnalysisResult::new();
        let hosts = self.mx_hosts(&mut result).await;

        let per_host = join_all(hosts.iter().map(|host| async move {
            let (tls, reverse) =
                tokio::join!(self.check_ssl_tls(host), self.check_reverse_dns(host));
            (tls, reverse)
        }))
        .await;
        for (tls, reverse) in &per_host {
            result.merge(tls);
            result.merge(reverse);
        }

        let (headers, status) = self.check_email_headers().await;
        result.merge(&headers);

        HostReport { result, status }
    }

    async fn mx_hosts(&self, result: &mut AnalysisResult) -> Vec<String> {
        match self.resolver.try_resolve(&DnsQuery::mx(self.domain)).await {
            Ok(records) if records.is_empty() => {
                result.vulnerability("No MX records found");
                Vec::new()
            }
            Ok(records) => records.mx_hosts(),
            Err(ResolutionError::Timeout(_)) => {
                self.warn("DNS timeout while checking MX records. Try again later.");
                Vec::new()
            }
            Err(e) => {
                self.warn(format!("MX record check failed: {e}"));
                Vec::new()
            }
        }
    }

    async fn policy_present(
        &self,
        query: &DnsQuery,
        missing: &str,
        result: &mut AnalysisResult,
    ) -> bool {
        match self.resolver.try_resolve(query).await {
            Ok(records) if records.is_empty() => {
                result.vulnerability(missing);
                false
            }
            Ok(_) => true,
            Err(ResolutionError::Timeout(_)) => {
                self.warn(format!("DNS timeout while checking {}", query.name()));
                false
            }
            Err(e) => {
                self.warn(format!("Policy record check failed: {e}"));
                false
            }
        }
    }

    async fn reverse_name(&self, host: &str) -> Result<String, String> {
        let addresses = self
            .resolver
            .lookup_ip(host)
            .await
            .map_err(|e| e.to_string())?;
        let ip = addresses
            .first()
            .copied()
            .ok_or_else(|| format!("no addresses found for {host}"))?;
        let names = self
            .resolver
            .reverse_lookup(ip)
            .await
            .map_err(|e| e.to_string())?;
        names
            .first()
            .map(|name| name.trim_end_matches('.').to_lowercase())
            .ok_or_else(|| format!("no PTR record for {ip}"))
    }

    fn within_domain(&self, name: &str) -> bool {
        let domain = self.domain.trim_end_matches('.').to_lowercase();
        name == domain || name.ends_with(&format!(".{domain}"))
    }

    fn warn(&self, message: impl Into<String>) {
        self.resolver.diagnostics().warn(SOURCE, message);
    }
}
