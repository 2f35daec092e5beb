//! Fetch-target validation (SSRF protection).
//!
//! Page features require fetching a user-supplied URL from inside the
//! service's network. Before every hop of a fetch, the target is checked so a
//! submitted URL (or a redirect it triggers) cannot reach:
//! - Private/internal IP addresses (RFC 1918, RFC 4193, etc.)
//! - Localhost addresses and names
//! - Link-local, multicast, and reserved ranges
//! - Non-HTTP/HTTPS schemes (file://, ftp://, etc.)

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use thiserror::Error;
use url::Url;

/// Why a fetch target was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnsafeTarget {
    /// Scheme other than http/https.
    #[error("scheme '{0}' is not fetchable (only http:// and https:// allowed)")]
    Scheme(String),

    /// Host is missing.
    #[error("URL has no host component")]
    NoHost,

    /// Host is a localhost name.
    #[error("localhost domain '{0}' is not allowed")]
    Localhost(String),

    /// Host is, or resolves to, a non-public address.
    #[error("non-public address '{0}' is not allowed")]
    NonPublicAddress(IpAddr),
}

/// Decides whether a connection to an address is allowed.
pub type AddressPolicy = fn(IpAddr) -> Result<(), UnsafeTarget>;

/// Validates that a URL is safe to fetch.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use url_verdict::security::validate_fetch_target;
///
/// assert!(validate_fetch_target(&Url::parse("https://example.com").unwrap()).is_ok());
/// assert!(validate_fetch_target(&Url::parse("http://127.0.0.1").unwrap()).is_err());
/// assert!(validate_fetch_target(&Url::parse("file:///etc/passwd").unwrap()).is_err());
/// ```
pub fn validate_fetch_target(url: &Url) -> Result<(), UnsafeTarget> {
    validate_fetch_target_with(url, check_address)
}

/// Same as [`validate_fetch_target`], with literal IP hosts judged by `policy`.
///
/// Domain hosts only get the localhost-name check here; their addresses are
/// checked when the fetch client resolves them (see [`super::SafeResolver`]).
pub fn validate_fetch_target_with(url: &Url, policy: AddressPolicy) -> Result<(), UnsafeTarget> {
    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UnsafeTarget::Scheme(scheme.to_string())),
    }

    match url.host().ok_or(UnsafeTarget::NoHost)? {
        url::Host::Domain(domain) if is_localhost_domain(domain) => {
            Err(UnsafeTarget::Localhost(domain.to_string()))
        }
        url::Host::Domain(_) => Ok(()),
        url::Host::Ipv4(ip) => policy(IpAddr::V4(ip)),
        url::Host::Ipv6(ip) => policy(IpAddr::V6(ip)),
    }
}

/// Rejects an address that is not publicly routable.
///
/// Used both for literal hosts and for every address a hostname resolved to,
/// so a public name pointing at an internal address is refused as well.
pub fn check_address(ip: IpAddr) -> Result<(), UnsafeTarget> {
    let blocked = match ip {
        IpAddr::V4(v4) => is_non_public_ipv4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(mapped) => is_non_public_ipv4(mapped),
            None => is_non_public_ipv6(v6),
        },
    };
    if blocked {
        Err(UnsafeTarget::NonPublicAddress(ip))
    } else {
        Ok(())
    }
}

fn is_non_public_ipv4(ip: Ipv4Addr) -> bool {
    let [first, second, ..] = ip.octets();
    ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_multicast()
        || ip.is_broadcast()
        // 0.0.0.0/8 (this network)
        || first == 0
        // 100.64.0.0/10 (carrier-grade NAT)
        || (first == 100 && (64..=127).contains(&second))
        // 240.0.0.0/4 (reserved)
        || first >= 240
}

fn is_non_public_ipv6(ip: Ipv6Addr) -> bool {
    let head = ip.segments()[0];
    ip.is_loopback()
        || ip.is_unspecified()
        || ip.is_multicast()
        // fc00::/7 (unique local)
        || (head & 0xfe00) == 0xfc00
        // fe80::/10 (link-local)
        || (head & 0xffc0) == 0xfe80
}

fn is_localhost_domain(domain: &str) -> bool {
    let domain = domain.trim_end_matches('.').to_ascii_lowercase();
    domain == "localhost" || domain == "localhost.localdomain" || domain.ends_with(".localhost")
}
