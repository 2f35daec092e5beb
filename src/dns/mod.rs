//! Hostname resolution for the DNS-record feature.
//!
//! A lookup either finds addresses, proves the name has none, or gives up
//! (timeout, resolver failure). The last case maps to an unknown feature
//! value rather than an error.

use std::net::IpAddr;
use std::time::Duration;

use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::TokioAsyncResolver;

/// Result of resolving a hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsOutcome {
    /// The name resolved to at least one address
    Resolved(Vec<IpAddr>),
    /// The resolver answered authoritatively that no address records exist
    NotFound,
    /// The lookup timed out or failed for a reason that says nothing about the name
    Unknown,
}

/// Resolves a hostname to its IP addresses, bounded by `timeout`.
///
/// The resolver has its own per-query timeout; the outer bound covers retries
/// and multiple name servers so the caller never waits longer than `timeout`.
pub async fn resolve_host(
    host: &str,
    resolver: &TokioAsyncResolver,
    timeout: Duration,
) -> DnsOutcome {
    let lookup = match tokio::time::timeout(timeout, resolver.lookup_ip(host)).await {
        Ok(result) => result,
        Err(_) => {
            log::debug!("DNS lookup for {host} timed out after {timeout:?}");
            return DnsOutcome::Unknown;
        }
    };

    match lookup {
        Ok(response) => {
            let ips: Vec<IpAddr> = response.iter().collect();
            if ips.is_empty() {
                DnsOutcome::NotFound
            } else {
                DnsOutcome::Resolved(ips)
            }
        }
        Err(e) => match e.kind() {
            ResolveErrorKind::NoRecordsFound { .. } => {
                log::debug!("No DNS records for {host}");
                DnsOutcome::NotFound
            }
            _ => {
                log::debug!("DNS lookup for {host} failed: {e}");
                DnsOutcome::Unknown
            }
        },
    }
}
