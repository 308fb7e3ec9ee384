//! Fault-tolerant DNS resolution with server failover.
//!
//! The service asks its primary backend (all configured servers, in order)
//! first. A timeout there is retried against each remaining server on its own.
//! Every query, failover included, is bounded by the lifetime ceiling.

use std::net::IpAddr;
use std::time::Duration;

use crate::error_handling::{Diagnostics, ResolutionError};

use super::lookup::DnsLookup;
use super::records::{DnsQuery, RecordSet};

const SOURCE: &str = "dns";

/// Resolves DNS records without ever failing its caller.
///
/// [`resolve`](Self::resolve) folds every failure into an empty [`RecordSet`]
/// and records a diagnostic, so "confirmed absent" and "could not determine"
/// look the same in its return value. Callers that must tell them apart use
/// [`try_resolve`](Self::try_resolve).
pub struct ResolutionService<L> {
    primary: L,
    fallbacks: Vec<L>,
    lifetime: Duration,
    diagnostics: Diagnostics,
}

impl<L: DnsLookup> ResolutionService<L> {
    /// `fallbacks` are tried in order after a timeout of `primary`.
    pub fn new(primary: L, fallbacks: Vec<L>, lifetime: Duration, diagnostics: Diagnostics) -> Self {
        Self {
            primary,
            fallbacks,
            lifetime,
            diagnostics,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Resolves `query`, returning an empty set on any failure.
    pub async fn resolve(&self, query: &DnsQuery) -> RecordSet {
        match self.try_resolve(query).await {
            Ok(records) => records,
            Err(e @ ResolutionError::Timeout(_)) => {
                self.diagnostics.warn(SOURCE, format!("{e}; giving up"));
                RecordSet::empty()
            }
            Err(e) => {
                self.diagnostics.error(SOURCE, e.to_string());
                RecordSet::empty()
            }
        }
    }

    /// Resolves `query`, returning `Ok(empty)` when the record is confirmed
    /// absent and an error when the answer could not be determined.
    pub async fn try_resolve(&self, query: &DnsQuery) -> Result<RecordSet, ResolutionError> {
        match tokio::time::timeout(self.lifetime, self.resolve_with_failover(query)).await {
            Ok(result) => result,
            Err(_) => Err(ResolutionError::Timeout(query.name().to_string())),
        }
    }

    /// Forward-resolves a host name to its addresses.
    pub async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>, ResolutionError> {
        self.bounded(host, self.primary.ip_addresses(host)).await
    }

    /// Resolves the PTR names of an address.
    pub async fn reverse_lookup(&self, ip: IpAddr) -> Result<Vec<String>, ResolutionError> {
        self.bounded(&ip.to_string(), self.primary.reverse(ip)).await
    }

    async fn bounded<T>(
        &self,
        name: &str,
        lookup: impl std::future::Future<Output = Result<T, ResolutionError>>,
    ) -> Result<T, ResolutionError> {
        tokio::time::timeout(self.lifetime, lookup)
            .await
            .unwrap_or_else(|_| Err(ResolutionError::Timeout(name.to_string())))
    }

    async fn resolve_with_failover(&self, query: &DnsQuery) -> Result<RecordSet, ResolutionError> {
        match self.primary.records(query).await {
            Ok(records) => Ok(RecordSet::new(records)),
            Err(ResolutionError::NotFound(_)) => Ok(self.confirmed_absent(query)),
            Err(e @ ResolutionError::Timeout(_)) => {
                self.diagnostics.warn(
                    SOURCE,
                    format!(
                        "DNS timeout while querying {}. Retrying with different DNS servers...",
                        query.name()
                    ),
                );
                for fallback in &self.fallbacks {
                    match fallback.records(query).await {
                        Ok(records) => return Ok(RecordSet::new(records)),
                        Err(ResolutionError::NotFound(_)) => return Ok(self.confirmed_absent(query)),
                        Err(retry_error) => {
                            log::debug!("Failover query for {query} failed: {retry_error}");
                        }
                    }
                }
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    fn confirmed_absent(&self, query: &DnsQuery) -> RecordSet {
        self.diagnostics
            .info(SOURCE, format!("No DNS record found for {query}"));
        RecordSet::empty()
    }
}
