//! DNS backends.
//!
//! [`DnsLookup`] is the seam between the resolution service and the wire.
//! [`HickoryLookup`] answers through `hickory-resolver`; tests plug in
//! in-memory implementations.

use std::future::Future;
use std::net::IpAddr;
use std::time::Duration;

use hickory_resolver::config::{
    NameServerConfigGroup, ResolverConfig, ResolverOpts, ServerOrderingStrategy,
};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::error::ProtoErrorKind;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::{RData, RecordType as WireRecordType};
use hickory_resolver::TokioAsyncResolver;

use crate::config::DNS_PORT;
use crate::error_handling::ResolutionError;

use super::records::{format_mx, DnsQuery, RecordType};

/// A source of DNS answers.
///
/// Every method reports absence as [`ResolutionError::NotFound`] rather than
/// an empty `Ok`, so callers can tell NXDOMAIN/NODATA apart from an answer.
pub trait DnsLookup: Send + Sync {
    /// Raw answers for a TXT or MX query.
    fn records(
        &self,
        query: &DnsQuery,
    ) -> impl Future<Output = Result<Vec<String>, ResolutionError>> + Send;

    /// Forward lookup (A/AAAA) of a host name.
    fn ip_addresses(
        &self,
        host: &str,
    ) -> impl Future<Output = Result<Vec<IpAddr>, ResolutionError>> + Send;

    /// Reverse lookup (PTR) of an address.
    fn reverse(&self, ip: IpAddr)
        -> impl Future<Output = Result<Vec<String>, ResolutionError>> + Send;
}

/// `hickory-resolver` backed lookup against a fixed list of servers.
#[derive(Clone)]
pub struct HickoryLookup {
    resolver: TokioAsyncResolver,
}

impl HickoryLookup {
    /// Creates a lookup that asks `servers` in the given order, one attempt
    /// per server, each bounded by `timeout`.
    pub fn new(servers: &[IpAddr], timeout: Duration) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1;
        // Set ndots to 0 to prevent search domain appending
        opts.ndots = 0;
        opts.num_concurrent_reqs = 1;
        opts.server_ordering_strategy = ServerOrderingStrategy::UserProvidedOrder;

        let name_servers = NameServerConfigGroup::from_ips_clear(servers, DNS_PORT, true);
        let config = ResolverConfig::from_parts(None, vec![], name_servers);

        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
        }
    }

    /// Maps a hickory error onto the resolution taxonomy.
    ///
    /// hickory reports every error response code as `NoRecordsFound`; only
    /// NXDOMAIN and an empty NOERROR answer mean the record is absent.
    pub(super) fn classify(name: &str, error: &ResolveError) -> ResolutionError {
        match error.kind() {
            ResolveErrorKind::NoRecordsFound {
                response_code: ResponseCode::NXDomain | ResponseCode::NoError,
                ..
            } => ResolutionError::NotFound(name.to_string()),
            ResolveErrorKind::Timeout => ResolutionError::Timeout(name.to_string()),
            ResolveErrorKind::Proto(proto) if matches!(proto.kind(), ProtoErrorKind::Timeout) => {
                ResolutionError::Timeout(name.to_string())
            }
            _ => ResolutionError::Failure {
                name: name.to_string(),
                reason: error.to_string(),
            },
        }
    }
}

impl DnsLookup for HickoryLookup {
    async fn records(&self, query: &DnsQuery) -> Result<Vec<String>, ResolutionError> {
        let wire_type = match query.record_type() {
            RecordType::Txt => WireRecordType::TXT,
            RecordType::Mx => WireRecordType::MX,
        };

        let lookup = self
            .resolver
            .lookup(query.name(), wire_type)
            .await
            .map_err(|e| Self::classify(query.name(), &e))?;

        let records: Vec<String> = lookup
            .iter()
            .filter_map(|rdata| match rdata {
                // TXT records can contain multiple strings - join them
                RData::TXT(txt) => Some(
                    txt.iter()
                        .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                        .collect::<Vec<String>>()
                        .join(""),
                ),
                RData::MX(mx) => Some(format_mx(mx.preference(), &mx.exchange().to_utf8())),
                _ => None,
            })
            .collect();

        if records.is_empty() {
            // Only CNAMEs or other types came back
            return Err(ResolutionError::NotFound(query.name().to_string()));
        }
        Ok(records)
    }

    async fn ip_addresses(&self, host: &str) -> Result<Vec<IpAddr>, ResolutionError> {
        let response = self
            .resolver
            .lookup_ip(host)
            .await
            .map_err(|e| Self::classify(host, &e))?;
        Ok(response.iter().collect())
    }

    async fn reverse(&self, ip: IpAddr) -> Result<Vec<String>, ResolutionError> {
        let name = ip.to_string();
        let response = self
            .resolver
            .reverse_lookup(ip)
            .await
            .map_err(|e| Self::classify(&name, &e))?;
        Ok(response.iter().map(|ptr| ptr.to_utf8()).collect())
    }
}
