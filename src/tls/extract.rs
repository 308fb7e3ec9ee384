//! Certificate extraction utilities.

use chrono::{DateTime, Utc};
use rustls::ProtocolVersion;

use crate::models::TlsVersion;

/// Maps a negotiated rustls protocol version onto [`TlsVersion`].
pub(crate) fn tls_version(version: ProtocolVersion) -> TlsVersion {
    match version {
        ProtocolVersion::SSLv3 => TlsVersion::Ssl30,
        ProtocolVersion::TLSv1_0 => TlsVersion::Tls10,
        ProtocolVersion::TLSv1_1 => TlsVersion::Tls11,
        ProtocolVersion::TLSv1_2 => TlsVersion::Tls12,
        ProtocolVersion::TLSv1_3 => TlsVersion::Tls13,
        _ => TlsVersion::Unknown,
    }
}

/// Extracts the `notAfter` instant of a DER-encoded X.509 certificate.
///
/// # Errors
///
/// Returns the parser's message if the certificate is malformed or its
/// expiry cannot be represented.
pub(crate) fn certificate_not_after(der: &[u8]) -> Result<DateTime<Utc>, String> {
    let (_, cert) = x509_parser::parse_x509_certificate(der).map_err(|e| e.to_string())?;
    let timestamp = cert.validity().not_after.timestamp();
    DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| format!("certificate expiry {timestamp} is out of range"))
}
