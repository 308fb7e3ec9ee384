//! TLS/SSL certificate retrieval.
//!
//! Connects to a host's HTTPS port with standard certificate verification and
//! reports the negotiated protocol version and the peer certificate's expiry.
//!
//! Uses `tokio-rustls` for async TLS connections and `x509-parser` for certificate parsing.

mod extract;

use std::sync::Arc;
use std::time::Duration;

use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;

use crate::config::HTTPS_PORT;
use crate::error_handling::ProbeError;
use crate::models::{CertificateInfo, TlsVersion};

use extract::{certificate_not_after, tls_version};

/// Retrieves TLS details for a host.
///
/// # Arguments
///
/// * `host` - Host name to connect to (also used for SNI and verification)
/// * `connect_timeout` - Bound on the TCP connect
/// * `handshake_timeout` - Bound on the TLS handshake
///
/// # Errors
///
/// Returns a [`ProbeError`] if:
/// - The host name is not a valid server name
/// - TCP connection fails or times out
/// - TLS handshake (including certificate verification) fails or times out
/// - The certificate is missing or cannot be parsed
pub async fn fetch_certificate(
    host: &str,
    connect_timeout: Duration,
    handshake_timeout: Duration,
) -> Result<CertificateInfo, ProbeError> {
    let target = format!("{host}:{HTTPS_PORT}");
    log::debug!("Retrieving certificate from {target}");

    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let server_name = ServerName::try_from(host.to_string())
        .map_err(|_| ProbeError::InvalidServerName(host.to_string()))?;

    let sock = match tokio::time::timeout(connect_timeout, TcpStream::connect((host, HTTPS_PORT)))
        .await
    {
        Ok(Ok(sock)) => sock,
        Ok(Err(source)) => return Err(ProbeError::Connect { target, source }),
        Err(_) => {
            return Err(ProbeError::Timeout {
                target,
                secs: connect_timeout.as_secs(),
            })
        }
    };

    let connector = TlsConnector::from(Arc::new(config));
    let tls_stream =
        match tokio::time::timeout(handshake_timeout, connector.connect(server_name, sock)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                return Err(ProbeError::Handshake {
                    target,
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(ProbeError::Timeout {
                    target,
                    secs: handshake_timeout.as_secs(),
                })
            }
        };

    let connection = tls_stream.get_ref().1;
    let version = connection
        .protocol_version()
        .map(tls_version)
        .unwrap_or(TlsVersion::Unknown);

    let cert = connection
        .peer_certificates()
        .and_then(|certs| certs.first())
        .ok_or_else(|| ProbeError::NoCertificate(target.clone()))?;

    let not_after = certificate_not_after(cert.as_ref())
        .map_err(|reason| ProbeError::Certificate {
            target: target.clone(),
            reason,
        })?;

    log::debug!("{target} negotiated {version}, certificate valid until {not_after}");

    Ok(CertificateInfo {
        tls_version: version,
        not_after,
    })
}
