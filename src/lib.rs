//! mail_posture library: email authentication and transport security audits
//!
//! This library resolves a domain's SPF, DMARC and DKIM records, probes its
//! mail exchangers for STARTTLS, certificate health and reverse DNS, and
//! reports the weaknesses found as categorized findings.
//!
//! # Example
//!
//! ```no_run
//! use mail_posture::{run_audit, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     domain: "example.com".to_string(),
//!     ..Default::default()
//! };
//!
//! let report = run_audit(&config).await?;
//! println!("SPF: {:?}", report.spf.vulnerabilities());
//! println!("DMARC: {:?}", report.dmarc.vulnerabilities());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Live TLS probes need a rustls
//! crypto provider, installed with
//! [`initialization::init_crypto_provider`].

pub mod analysis;
pub mod app;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod export;
pub mod initialization;
pub mod models;
pub mod probe;
mod run;
mod tls;

#[cfg(test)]
mod test_helpers;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use run::{run_audit, AuditReport, Auditor};
