//! SSRF-safe DNS resolver for reqwest.
//!
//! Implements `reqwest::dns::Resolve` over the shared hickory resolver and
//! checks every returned address before reqwest opens a socket. The address
//! the client connects to is the one that was checked, so a name that
//! rebinds between two lookups, or that a local hosts file maps inward,
//! cannot reach an internal target.

use std::fmt;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use hickory_resolver::TokioAsyncResolver;
use reqwest::dns::{Addrs, Name, Resolve, Resolving};

use super::url_validation::{check_address, AddressPolicy};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A DNS resolver that refuses names with any non-public address.
#[derive(Clone)]
pub struct SafeResolver {
    resolver: Arc<TokioAsyncResolver>,
    policy: AddressPolicy,
}

impl SafeResolver {
    /// Resolver that allows only publicly routable addresses.
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self::with_policy(resolver, check_address)
    }

    /// Resolver that judges addresses with `policy`.
    pub fn with_policy(resolver: Arc<TokioAsyncResolver>, policy: AddressPolicy) -> Self {
        Self { resolver, policy }
    }

    /// The address policy in force.
    pub fn policy(&self) -> AddressPolicy {
        self.policy
    }
}

impl fmt::Debug for SafeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeResolver").finish_non_exhaustive()
    }
}

impl Resolve for SafeResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let resolver = self.resolver.clone();
        let policy = self.policy;
        Box::pin(async move {
            let lookup = resolver
                .lookup_ip(name.as_str())
                .await
                .map_err(|e| -> BoxError { Box::new(e) })?;
            let addrs = allowed_addresses(name.as_str(), lookup.iter(), policy)
                .map_err(|e| -> BoxError { Box::new(e) })?;
            let addrs: Addrs = Box::new(addrs.into_iter());
            Ok(addrs)
        })
    }
}

/// Turns a lookup answer into connectable addresses.
///
/// One refused address rejects the whole answer: a mixed public/internal
/// answer is how rebinding setups usually look.
pub(crate) fn allowed_addresses(
    host: &str,
    ips: impl IntoIterator<Item = IpAddr>,
    policy: AddressPolicy,
) -> Result<Vec<SocketAddr>, io::Error> {
    let mut addrs = Vec::new();
    for ip in ips {
        if let Err(e) = policy(ip) {
            log::debug!("Refusing to connect to {host}: {e}");
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("SSRF blocked: '{host}' resolves to {e}"),
            ));
        }
        // Port is filled in by the connector
        addrs.push(SocketAddr::new(ip, 0));
    }
    if addrs.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no addresses for '{host}'"),
        ));
    }
    Ok(addrs)
}
