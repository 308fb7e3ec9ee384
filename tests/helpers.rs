// Shared test doubles for the DNS and network seams.
//
// This module provides in-memory backends used across integration test files.

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;

use mail_posture::dns::{format_mx, DnsLookup, DnsQuery, RecordType, ResolutionService};
use mail_posture::error_handling::{Diagnostics, ProbeError, ResolutionError};
use mail_posture::models::CertificateInfo;
use mail_posture::probe::NetworkProbe;
use mail_posture::Auditor;

/// DNS backend answering from a fixed table. Unknown names are NXDOMAIN.
#[derive(Clone, Default)]
pub struct MockLookup {
    records: HashMap<(String, RecordType), Result<Vec<String>, ResolutionError>>,
    addresses: HashMap<String, Vec<IpAddr>>,
    pointers: HashMap<IpAddr, Vec<String>>,
}

#[allow(dead_code)] // Not every test file uses every builder
impl MockLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn txt(mut self, name: &str, value: &str) -> Self {
        self.push(name, RecordType::Txt, value.to_string());
        self
    }

    pub fn mx(mut self, name: &str, preference: u16, exchange: &str) -> Self {
        self.push(name, RecordType::Mx, format_mx(preference, exchange));
        self
    }

    pub fn timeout(mut self, query: DnsQuery) -> Self {
        let error = ResolutionError::Timeout(query.name().to_string());
        self.records
            .insert((query.name().to_string(), query.record_type()), Err(error));
        self
    }

    pub fn host(mut self, name: &str, ip: IpAddr, ptr: &str) -> Self {
        self.addresses.insert(name.to_string(), vec![ip]);
        self.pointers.insert(ip, vec![ptr.to_string()]);
        self
    }

    fn push(&mut self, name: &str, record_type: RecordType, value: String) {
        let entry = self
            .records
            .entry((name.to_string(), record_type))
            .or_insert_with(|| Ok(Vec::new()));
        if let Ok(records) = entry {
            records.push(value);
        }
    }
}

impl DnsLookup for MockLookup {
    async fn records(&self, query: &DnsQuery) -> Result<Vec<String>, ResolutionError> {
        self.records
            .get(&(query.name().to_string(), query.record_type()))
            .cloned()
            .unwrap_or_else(|| Err(ResolutionError::NotFound(query.name().to_string())))
    }

    async fn ip_addresses(&self, host: &str) -> Result<Vec<IpAddr>, ResolutionError> {
        self.addresses
            .get(host)
            .cloned()
            .ok_or_else(|| ResolutionError::NotFound(host.to_string()))
    }

    async fn reverse(&self, ip: IpAddr) -> Result<Vec<String>, ResolutionError> {
        self.pointers
            .get(&ip)
            .cloned()
            .ok_or_else(|| ResolutionError::NotFound(ip.to_string()))
    }
}

/// Network probe answering from fixed tables. Unknown hosts refuse connections.
#[derive(Clone, Default)]
pub struct MockProbe {
    smtp: HashMap<String, String>,
    certificates: HashMap<String, CertificateInfo>,
}

#[allow(dead_code)] // Not every test file uses every builder
impl MockProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn smtp(mut self, host: &str, transcript: &str) -> Self {
        self.smtp.insert(host.to_string(), transcript.to_string());
        self
    }

    pub fn certificate(mut self, host: &str, info: CertificateInfo) -> Self {
        self.certificates.insert(host.to_string(), info);
        self
    }
}

fn refused(target: String) -> ProbeError {
    ProbeError::Connect {
        target,
        source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
    }
}

impl NetworkProbe for MockProbe {
    async fn smtp_capabilities(&self, host: &str) -> Result<String, ProbeError> {
        self.smtp
            .get(host)
            .cloned()
            .ok_or_else(|| refused(format!("{host}:25")))
    }

    async fn tls_certificate(&self, host: &str) -> Result<CertificateInfo, ProbeError> {
        self.certificates
            .get(host)
            .cloned()
            .ok_or_else(|| refused(format!("{host}:443")))
    }
}

/// Auditor over the mocks, both resolvers sharing one diagnostics sink.
#[allow(dead_code)] // Used by other test files
pub fn mock_auditor(lookup: MockLookup, probe: MockProbe) -> Auditor<MockLookup, MockProbe> {
    let diagnostics = Diagnostics::new();
    let service = |lookup: MockLookup| {
        ResolutionService::new(lookup, Vec::new(), Duration::from_secs(5), diagnostics.clone())
    };
    Auditor::new(service(lookup.clone()), service(lookup), probe, diagnostics)
}
