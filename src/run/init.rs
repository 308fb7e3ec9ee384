//! Live audit wiring.
//!
//! Builds the hickory-backed resolution services and the socket probe from
//! a [`Config`] and runs one audit with them.

use anyhow::{bail, Result};

use crate::config::Config;
use crate::error_handling::Diagnostics;
use crate::initialization::init_resolution_service;
use crate::probe::LiveProbe;

use super::{AuditReport, Auditor};

/// Audits `config.domain` against live DNS servers and mail hosts.
///
/// # Errors
///
/// Returns an error if the domain is empty or malformed. DNS and network
/// failures during the audit never abort it; they surface as findings or
/// diagnostics in the returned report.
pub async fn run_audit(config: &Config) -> Result<AuditReport> {
    let domain = normalize_domain(&config.domain)?;
    let selector = config.dkim_selector.trim();
    if selector.is_empty() {
        bail!("DKIM selector must not be empty");
    }

    let diagnostics = Diagnostics::new();
    let resolver = init_resolution_service(&config.resolver_settings(), diagnostics.clone());
    let host_resolver =
        init_resolution_service(&config.host_resolver_settings(), diagnostics.clone());
    let auditor = Auditor::new(resolver, host_resolver, LiveProbe::default(), diagnostics);

    Ok(auditor.audit(&domain, selector).await)
}

/// Trims whitespace and the root dot and lowercases the name.
fn normalize_domain(raw: &str) -> Result<String> {
    let domain = raw.trim().trim_end_matches('.').to_lowercase();
    if domain.is_empty() {
        bail!("Domain must not be empty");
    }
    if domain.contains(char::is_whitespace) || domain.contains('/') || domain.contains('@') {
        bail!("Invalid domain name: {raw}");
    }
    if domain.split('.').any(str::is_empty) {
        bail!("Invalid domain name: {raw}");
    }
    Ok(domain)
}
