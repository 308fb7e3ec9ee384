//! DNS resolution and record querying.
//!
//! This module provides async DNS operations using `hickory-resolver`:
//! - Text record queries (TXT) with SPF/DMARC extraction
//! - Mail exchanger queries (MX)
//! - IP address resolution (A/AAAA) and reverse lookup (PTR)
//!
//! All lookups go through [`ResolutionService`], which adds server failover,
//! a lifetime ceiling and diagnostics on top of a [`DnsLookup`] backend.

mod extract;
mod lookup;
mod records;
mod resolution;

// Re-export public API
pub use extract::{dmarc_records, spf_records, DMARC_MARKER, SPF_MARKER};
pub use lookup::{DnsLookup, HickoryLookup};
pub use records::{format_mx, DnsQuery, RecordSet, RecordType};
pub use resolution::ResolutionService;
