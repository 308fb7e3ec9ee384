//! Protocol analyzers.
//!
//! Each analyzer turns DNS answers (and, for transport and host checks,
//! network probe results) into an ordered [`AnalysisResult`](crate::models::AnalysisResult):
//! - SPF and DMARC work on already-resolved record sets
//! - DKIM resolves its selector record and folds in the transport findings
//! - Transport and host checks talk to the mail exchangers themselves

mod dkim;
mod dmarc;
mod host;
mod spf;
mod tags;
mod transport;

// Re-export public API
pub use dkim::{check_dkim, estimate_rsa_bits};
pub use dmarc::analyze_dmarc;
pub use host::{HostReport, HostSecurityAnalyzer};
pub use spf::analyze_spf;
pub use tags::TagMap;
pub use transport::{advertises_starttls, probe_transport, TransportReport};
