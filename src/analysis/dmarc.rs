//! DMARC policy analysis.

use crate::config::MAX_FORENSIC_URIS;
use crate::dns::RecordSet;
use crate::models::AnalysisResult;

use super::tags::TagMap;

/// Evaluates DMARC records already filtered to those containing `v=dmarc1`.
///
/// Only the first record is considered. An absent `p` tag counts as `none`.
pub fn analyze_dmarc(records: &RecordSet) -> AnalysisResult {
    let Some(first) = records.first() else {
        return AnalysisResult::single_vulnerability("Missing DMARC record");
    };
    let tags = TagMap::parse(first);
    let mut result = AnalysisResult::new();

    let policy = tags.get("p").unwrap_or("none");
    if policy == "none" {
        result.vulnerability("Policy set to monitoring only (p=none)");
    }
    if policy == "reject" {
        if let Some(pct) = tags.get("pct").filter(|pct| *pct != "100") {
            result.vulnerability(format!("Partial policy enforcement (pct={pct})"));
        }
    }
    if let Some(ruf) = tags.get("ruf") {
        if ruf.split(',').count() > MAX_FORENSIC_URIS {
            result.vulnerability(format!(
                "Too many forensic reporting URIs (max {MAX_FORENSIC_URIS} recommended)"
            ));
        }
    }

    if !tags.contains("adkim") {
        result.recommendation("Consider specifying DKIM alignment mode (adkim)");
    }
    if !tags.contains("aspf") {
        result.recommendation("Consider specifying SPF alignment mode (aspf)");
    }

    result
}
