//! Shared test doubles for the DNS and network seams.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::dns::{format_mx, DnsLookup, DnsQuery, RecordType, ResolutionService};
use crate::error_handling::{Diagnostics, ProbeError, ResolutionError};
use crate::models::CertificateInfo;
use crate::probe::NetworkProbe;

/// In-memory DNS backend. Anything not scripted is NXDOMAIN.
#[derive(Clone, Default)]
pub struct ScriptedLookup {
    records: HashMap<(String, RecordType), Result<Vec<String>, ResolutionError>>,
    addresses: HashMap<String, Result<Vec<IpAddr>, ResolutionError>>,
    pointers: HashMap<IpAddr, Result<Vec<String>, ResolutionError>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_txt(mut self, name: &str, records: &[&str]) -> Self {
        self.records.insert(
            (name.to_string(), RecordType::Txt),
            Ok(records.iter().map(|r| r.to_string()).collect()),
        );
        self
    }

    pub fn with_mx(mut self, name: &str, exchanges: &[(u16, &str)]) -> Self {
        self.records.insert(
            (name.to_string(), RecordType::Mx),
            Ok(exchanges
                .iter()
                .map(|(preference, host)| format_mx(*preference, host))
                .collect()),
        );
        self
    }

    pub fn with_error(mut self, query: DnsQuery, error: ResolutionError) -> Self {
        self.records
            .insert((query.name().to_string(), query.record_type()), Err(error));
        self
    }

    pub fn with_ip(mut self, host: &str, ip: IpAddr) -> Self {
        self.addresses.insert(host.to_string(), Ok(vec![ip]));
        self
    }

    pub fn with_ip_error(mut self, host: &str, error: ResolutionError) -> Self {
        self.addresses.insert(host.to_string(), Err(error));
        self
    }

    pub fn with_ptr(mut self, ip: IpAddr, name: &str) -> Self {
        self.pointers.insert(ip, Ok(vec![name.to_string()]));
        self
    }

    /// Number of `records` calls answered so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DnsLookup for ScriptedLookup {
    async fn records(&self, query: &DnsQuery) -> Result<Vec<String>, ResolutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.records
            .get(&(query.name().to_string(), query.record_type()))
            .cloned()
            .unwrap_or_else(|| Err(ResolutionError::NotFound(query.name().to_string())))
    }

    async fn ip_addresses(&self, host: &str) -> Result<Vec<IpAddr>, ResolutionError> {
        self.addresses
            .get(host)
            .cloned()
            .unwrap_or_else(|| Err(ResolutionError::NotFound(host.to_string())))
    }

    async fn reverse(&self, ip: IpAddr) -> Result<Vec<String>, ResolutionError> {
        self.pointers
            .get(&ip)
            .cloned()
            .unwrap_or_else(|| Err(ResolutionError::NotFound(ip.to_string())))
    }
}

/// Wraps a single scripted backend in a service without fallbacks.
pub fn service(lookup: ScriptedLookup) -> ResolutionService<ScriptedLookup> {
    service_with(lookup, Diagnostics::new())
}

/// Like [`service`], recording into a shared sink.
pub fn service_with(
    lookup: ScriptedLookup,
    diagnostics: Diagnostics,
) -> ResolutionService<ScriptedLookup> {
    ResolutionService::new(lookup, Vec::new(), Duration::from_secs(5), diagnostics)
}

/// Scripted SMTP and TLS endpoints. Unscripted hosts are unreachable.
#[derive(Clone, Default)]
pub struct ScriptedProbe {
    smtp: HashMap<String, String>,
    certificates: HashMap<String, CertificateInfo>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_smtp(mut self, host: &str, reply: &str) -> Self {
        self.smtp.insert(host.to_string(), reply.to_string());
        self
    }

    pub fn with_certificate(mut self, host: &str, info: CertificateInfo) -> Self {
        self.certificates.insert(host.to_string(), info);
        self
    }
}

impl NetworkProbe for ScriptedProbe {
    async fn smtp_capabilities(&self, host: &str) -> Result<String, ProbeError> {
        self.smtp.get(host).cloned().ok_or_else(|| ProbeError::Timeout {
            target: format!("{host}:25"),
            secs: 5,
        })
    }

    async fn tls_certificate(&self, host: &str) -> Result<CertificateInfo, ProbeError> {
        self.certificates
            .get(host)
            .cloned()
            .ok_or_else(|| ProbeError::Handshake {
                target: format!("{host}:443"),
                reason: "connection reset".to_string(),
            })
    }
}
