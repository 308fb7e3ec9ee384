//! Configuration constants.
//!
//! This module defines the constants used throughout the audit, including
//! DNS servers, network timeouts, well-known ports and rule thresholds.

use std::net::{IpAddr, Ipv4Addr};

// DNS servers
/// Google public resolver (primary)
pub const GOOGLE_PRIMARY: IpAddr = IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8));
/// Google public resolver (secondary)
pub const GOOGLE_SECONDARY: IpAddr = IpAddr::V4(Ipv4Addr::new(8, 8, 4, 4));
/// Cloudflare public resolver (primary)
pub const CLOUDFLARE_PRIMARY: IpAddr = IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1));
/// Cloudflare public resolver (secondary)
pub const CLOUDFLARE_SECONDARY: IpAddr = IpAddr::V4(Ipv4Addr::new(1, 0, 0, 1));

/// Port DNS servers are queried on
pub const DNS_PORT: u16 = 53;

// Network operation timeouts
/// Per-query DNS timeout in seconds (one attempt per server)
pub const DNS_TIMEOUT_SECS: u64 = 2;
/// Ceiling on the total time spent on one DNS query, failover included
pub const DNS_LIFETIME_SECS: u64 = 10;
/// Timeout for connecting to and reading from an SMTP server
pub const SMTP_TIMEOUT_SECS: u64 = 5;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// TLS handshake timeout in seconds
pub const TLS_HANDSHAKE_TIMEOUT_SECS: u64 = 5;

// Well-known ports
/// Plain SMTP relay port probed for STARTTLS
pub const SMTP_PORT: u16 = 25;
/// Port used for certificate validation of mail hosts
pub const HTTPS_PORT: u16 = 443;
/// Maximum number of bytes read from an SMTP server per reply
pub const SMTP_MAX_REPLY_BYTES: usize = 4096;
/// Hostname announced in the EHLO command
pub const EHLO_IDENTITY: &str = "mail-posture.localdomain";

// Well-known DNS labels
/// Prefix of the MTA-STS policy indicator record
pub const MTA_STS_PREFIX: &str = "_mta-sts";
/// Prefix of the TLS reporting record
pub const TLS_RPT_PREFIX: &str = "_smtp._tls";
/// Prefix of the DMARC record
pub const DMARC_PREFIX: &str = "_dmarc";
/// Label separating the DKIM selector from the domain
pub const DKIM_LABEL: &str = "_domainkey";
/// DKIM selector used when none is given
pub const DEFAULT_DKIM_SELECTOR: &str = "selector1";

// Rule thresholds
/// More `include:` terms than this exceed the SPF 10-lookup limit
pub const MAX_SPF_INCLUDES: usize = 10;
/// Recommended maximum number of forensic (ruf) report URIs
pub const MAX_FORENSIC_URIS: usize = 2;
/// SPF includes of bulk senders that hand authority to shared infrastructure
pub const HIGH_RISK_SPF_INCLUDES: &[&str] = &["include:mailgun.org", "include:sendgrid.net"];
/// Bits of key material assumed per base64 character (coarse estimate)
pub const BITS_PER_KEY_CHAR: usize = 6;
/// RSA keys estimated below this size are reported as weak
pub const MIN_RSA_KEY_BITS: usize = 2048;
/// RSA keys estimated below this size get an upgrade recommendation
pub const RECOMMENDED_RSA_KEY_BITS: usize = 4096;
