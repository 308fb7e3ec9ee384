//! Network probes against mail hosts.
//!
//! [`NetworkProbe`] is the seam the transport and host analyzers talk to.
//! [`LiveProbe`] performs real SMTP and TLS connections; tests substitute
//! scripted probes.

mod smtp;

use std::future::Future;
use std::time::Duration;

use crate::config::{SMTP_TIMEOUT_SECS, TCP_CONNECT_TIMEOUT_SECS, TLS_HANDSHAKE_TIMEOUT_SECS};
use crate::error_handling::ProbeError;
use crate::models::CertificateInfo;

pub use smtp::read_capabilities;

/// Socket-level checks run against a remote host.
pub trait NetworkProbe: Send + Sync {
    /// SMTP greeting and EHLO reply of `host`.
    fn smtp_capabilities(
        &self,
        host: &str,
    ) -> impl Future<Output = Result<String, ProbeError>> + Send;

    /// Negotiated TLS version and certificate expiry of `host`.
    fn tls_certificate(
        &self,
        host: &str,
    ) -> impl Future<Output = Result<CertificateInfo, ProbeError>> + Send;
}

/// Probe that opens real connections, each bounded by a single timeout.
#[derive(Debug, Clone)]
pub struct LiveProbe {
    smtp_timeout: Duration,
    connect_timeout: Duration,
    handshake_timeout: Duration,
}

impl LiveProbe {
    pub fn new(smtp_timeout: Duration, connect_timeout: Duration, handshake_timeout: Duration) -> Self {
        Self {
            smtp_timeout,
            connect_timeout,
            handshake_timeout,
        }
    }
}

impl Default for LiveProbe {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(SMTP_TIMEOUT_SECS),
            Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
            Duration::from_secs(TLS_HANDSHAKE_TIMEOUT_SECS),
        )
    }
}

impl NetworkProbe for LiveProbe {
    async fn smtp_capabilities(&self, host: &str) -> Result<String, ProbeError> {
        read_capabilities(host, self.smtp_timeout).await
    }

    async fn tls_certificate(&self, host: &str) -> Result<CertificateInfo, ProbeError> {
        crate::tls::fetch_certificate(host, self.connect_timeout, self.handshake_timeout).await
    }
}
