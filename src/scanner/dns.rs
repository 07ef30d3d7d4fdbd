//! DNS lookups against a single recursive nameserver.
//!
//! The [`DnsLookup`] trait is the seam between the scanner and the network;
//! [`TrustDnsLookup`] is the production implementation.

use crate::error::{ScanError, ScanResult};
use crate::types::RecordKind;
use async_trait::async_trait;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use trust_dns_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::ResolveErrorKind;
use trust_dns_resolver::proto::op::ResponseCode;
use trust_dns_resolver::proto::rr::{RData, RecordType};
use trust_dns_resolver::TokioAsyncResolver;

/// Nameserver used when none is configured.
pub const DEFAULT_NAMESERVER: &str = "8.8.8.8:53";

/// Trait for record lookups.
///
/// Implementations return the values of the requested kind in answer order.
/// A successful response without matching records yields an empty list;
/// transport errors and non-success response codes yield an error.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    async fn lookup(&self, name: &str, kind: RecordKind) -> ScanResult<Vec<String>>;
}

/// Parse a nameserver as `ip:port`, `[v6]:port` or a bare IP (port 53).
pub fn parse_nameserver(s: &str) -> ScanResult<SocketAddr> {
    let s = s.trim();
    if let Ok(addr) = s.parse::<SocketAddr>() {
        return Ok(addr);
    }
    s.parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, 53))
        .map_err(|_| ScanError::InvalidNameserver(s.to_string()))
}

/// Pick the nameserver to query from a configured list.
///
/// Only the first entry is used; an empty list falls back to
/// [`DEFAULT_NAMESERVER`].
pub fn select_nameserver(nameservers: &[String]) -> ScanResult<SocketAddr> {
    match nameservers.iter().map(|s| s.trim()).find(|s| !s.is_empty()) {
        Some(first) => parse_nameserver(first),
        None => parse_nameserver(DEFAULT_NAMESERVER),
    }
}

fn record_type(kind: RecordKind) -> RecordType {
    match kind {
        RecordKind::A => RecordType::A,
        RecordKind::Mx => RecordType::MX,
        RecordKind::Ns => RecordType::NS,
    }
}

/// Make a name absolute so no search domains get appended.
fn absolute(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

/// Recursive UDP lookups through `trust-dns-resolver`.
pub struct TrustDnsLookup {
    resolver: TokioAsyncResolver,
    nameserver: SocketAddr,
}

impl TrustDnsLookup {
    /// Create a resolver that only talks to `nameserver` over UDP.
    ///
    /// Each query is attempted once and bounded by `timeout`.
    pub fn new(nameserver: SocketAddr, timeout: Duration) -> Self {
        let mut config = ResolverConfig::new();
        config.add_name_server(NameServerConfig::new(nameserver, Protocol::Udp));

        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1;
        opts.use_hosts_file = false;

        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
            nameserver,
        }
    }

    /// The nameserver this resolver queries.
    pub fn nameserver(&self) -> SocketAddr {
        self.nameserver
    }
}

#[async_trait]
impl DnsLookup for TrustDnsLookup {
    async fn lookup(&self, name: &str, kind: RecordKind) -> ScanResult<Vec<String>> {
        let response = match self.resolver.lookup(absolute(name), record_type(kind)).await {
            Ok(response) => response,
            Err(e) => {
                return match e.kind() {
                    ResolveErrorKind::NoRecordsFound { response_code, .. }
                        if *response_code == ResponseCode::NoError =>
                    {
                        Ok(Vec::new())
                    }
                    _ => Err(ScanError::DnsLookup {
                        name: name.to_string(),
                        reason: e.to_string(),
                    }),
                };
            }
        };

        let values = response
            .iter()
            .filter_map(|rdata| record_value(kind, rdata))
            .collect();

        Ok(values)
    }
}

/// Text value of an answer of the requested kind.
///
/// A null MX (exchange `.`) has no host and yields nothing.
fn record_value(kind: RecordKind, rdata: &RData) -> Option<String> {
    match (kind, rdata) {
        (RecordKind::A, RData::A(a)) => Some(a.to_string()),
        (RecordKind::Mx, RData::MX(mx)) => host_name(&mx.exchange().to_string()),
        (RecordKind::Ns, RData::NS(ns)) => host_name(&ns.to_string()),
        _ => None,
    }
}

/// Strip the root dot from a host name; the root itself is not a host.
fn host_name(name: &str) -> Option<String> {
    let host = name.trim_end_matches('.');
    (!host.is_empty()).then(|| host.to_string())
}
