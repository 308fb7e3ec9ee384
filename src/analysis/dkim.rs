//! DKIM selector analysis.

use crate::config::{BITS_PER_KEY_CHAR, DKIM_LABEL, MIN_RSA_KEY_BITS, RECOMMENDED_RSA_KEY_BITS};
use crate::dns::{DnsLookup, DnsQuery, ResolutionService};
use crate::error_handling::KeyError;
use crate::models::AnalysisResult;

use super::tags::TagMap;
use super::transport::TransportReport;

/// Checks the DKIM record published for `selector` and appends the
/// transport findings gathered for the same domain.
///
/// A missing record or a failed lookup ends the check early, without the
/// transport findings.
pub async fn check_dkim<L: DnsLookup>(
    domain: &str,
    selector: &str,
    resolver: &ResolutionService<L>,
    transport: &TransportReport,
) -> AnalysisResult {
    let query = DnsQuery::txt(format!("{selector}.{DKIM_LABEL}.{domain}"));
    let records = match resolver.try_resolve(&query).await {
        Ok(records) => records,
        Err(e) => return AnalysisResult::single_vulnerability(format!("DKIM check failed: {e}")),
    };
    if records.is_empty() {
        return AnalysisResult::single_vulnerability("Missing DKIM record");
    }

    let tags = TagMap::parse(&records.joined());
    let mut result = AnalysisResult::new();

    if tags.get("k") == Some("rsa") {
        if tags.get("p").map_or(true, str::is_empty) {
            result.vulnerability("Invalid or missing public key in DKIM record");
        }

        match estimate_rsa_bits(&tags) {
            Ok(bits) if bits < MIN_RSA_KEY_BITS => {
                result.vulnerability(format!("Weak RSA key length detected ({bits} bits)"));
                result.recommendation(format!(
                    "Upgrade RSA key length to at least {MIN_RSA_KEY_BITS} bits"
                ));
            }
            Ok(bits) if bits < RECOMMENDED_RSA_KEY_BITS => {
                result.recommendation(format!(
                    "Consider upgrading to {RECOMMENDED_RSA_KEY_BITS}-bit RSA key for future-proof security"
                ));
            }
            Ok(_) => {}
            Err(e) => {
                log::debug!("RSA key length of {query} not estimated: {e}");
                result.vulnerability("Unable to analyze RSA key length");
            }
        }
    }

    result.merge(&transport.result);
    result
}

/// Rough RSA modulus size: every encoded character of `p` counts as six bits.
pub fn estimate_rsa_bits(tags: &TagMap) -> Result<usize, KeyError> {
    let key = tags.get("p").ok_or(KeyError::MissingPublicKey)?;
    Ok(key.chars().count() * BITS_PER_KEY_CHAR)
}
