//! Policy record extraction utilities.
//!
//! Picks the SPF and DMARC records out of a domain's TXT answers. The match
//! is a case-insensitive substring test on the version tag, so records with
//! leading whitespace or unusual casing are still recognised.

use super::records::RecordSet;

/// Version tag identifying SPF records.
pub const SPF_MARKER: &str = "v=spf1";
/// Version tag identifying DMARC records.
pub const DMARC_MARKER: &str = "v=dmarc1";

/// Extracts SPF records from TXT records.
pub fn spf_records(txt_records: &RecordSet) -> RecordSet {
    txt_records.containing(SPF_MARKER)
}

/// Extracts DMARC records from the TXT records at `_dmarc.<domain>`.
pub fn dmarc_records(txt_records: &RecordSet) -> RecordSet {
    txt_records.containing(DMARC_MARKER)
}
