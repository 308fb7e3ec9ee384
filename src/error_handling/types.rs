//! Error type definitions.
//!
//! This module defines the error taxonomy shared by the resolution layer,
//! the network probes and the analyzers.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Failure to resolve a DNS name.
///
/// `NotFound` is informational (NXDOMAIN or an empty answer); the resolution
/// service folds it into an empty record set. `Timeout` triggers server
/// failover before it is reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// No server answered within the configured bounds.
    #[error("DNS timeout while querying {0}")]
    Timeout(String),

    /// The name or the requested record type does not exist.
    #[error("No DNS record found for {0}")]
    NotFound(String),

    /// Any other resolver failure (malformed name, refused, network error).
    #[error("DNS lookup error for {name}: {reason}")]
    Failure {
        /// Name that was queried
        name: String,
        /// Resolver error text
        reason: String,
    },
}

/// Failure of a socket or TLS operation against a remote host.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The operation did not finish within its timeout.
    #[error("connection to {target} timed out after {secs}s")]
    Timeout {
        /// `host:port` that was contacted
        target: String,
        /// Timeout that elapsed
        secs: u64,
    },

    /// TCP connection could not be established.
    #[error("failed to connect to {target}: {source}")]
    Connect {
        /// `host:port` that was contacted
        target: String,
        /// Underlying socket error
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to an established connection failed.
    #[error("I/O error talking to {target}: {source}")]
    Io {
        /// `host:port` that was contacted
        target: String,
        /// Underlying socket error
        #[source]
        source: std::io::Error,
    },

    /// The host name cannot be used for TLS server name indication.
    #[error("invalid server name {0}")]
    InvalidServerName(String),

    /// The TLS handshake (including certificate verification) failed.
    #[error("TLS handshake with {target} failed: {reason}")]
    Handshake {
        /// `host:port` that was contacted
        target: String,
        /// rustls error text
        reason: String,
    },

    /// The server completed the handshake without a certificate.
    #[error("no peer certificate presented by {0}")]
    NoCertificate(String),

    /// The peer certificate could not be parsed.
    #[error("unable to parse certificate from {target}: {reason}")]
    Certificate {
        /// `host:port` that was contacted
        target: String,
        /// Parser error text
        reason: String,
    },
}

/// Failure to interpret DKIM public key material.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The record has no `p=` tag.
    #[error("DKIM record has no p= tag")]
    MissingPublicKey,
}
