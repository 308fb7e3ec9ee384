//! DNS resolver initialization.
//!
//! Builds a [`ResolutionService`] backed by `hickory-resolver` from
//! [`ResolverSettings`]: one backend over the full server list plus one
//! single-server backend per remaining server for failover.

use crate::config::ResolverSettings;
use crate::dns::{HickoryLookup, ResolutionService};
use crate::error_handling::Diagnostics;

/// Initializes a resolution service for the given settings.
///
/// # Arguments
///
/// * `settings` - Ordered DNS servers, per-query timeout and lifetime ceiling
/// * `diagnostics` - Sink for timeouts and lookup failures
pub fn init_resolution_service(
    settings: &ResolverSettings,
    diagnostics: Diagnostics,
) -> ResolutionService<HickoryLookup> {
    let primary = HickoryLookup::new(settings.servers(), settings.timeout());
    let fallbacks = settings
        .servers()
        .iter()
        .skip(1)
        .map(|server| HickoryLookup::new(std::slice::from_ref(server), settings.timeout()))
        .collect();

    log::debug!(
        "DNS resolver configured with {} server(s), timeout {:?}, lifetime {:?}",
        settings.servers().len(),
        settings.timeout(),
        settings.lifetime()
    );

    ResolutionService::new(primary, fallbacks, settings.lifetime(), diagnostics)
}
