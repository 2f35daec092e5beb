//! Host classification and registrable-domain extraction.
//!
//! This module turns arbitrary user input into the host-level facts the
//! feature extractor needs, using the Public Suffix List (PSL) to identify
//! registrable domains.
//!
//! Key functions:
//! - `parse_lenient()` - Parses a URL, retrying with `http://` when the scheme is missing
//! - `host_kind()` - Tells IP-literal hosts apart from domain names
//! - `registrable_domain()` - Extracts the registrable domain from a hostname

use std::net::IpAddr;

use url::{ParseError, Url};

/// A URL parsed from user input.
#[derive(Debug, Clone)]
pub struct ParsedUrl {
    /// The parsed URL (with `http://` prepended if the input had no scheme)
    pub url: Url,
    /// Whether the input carried its own scheme
    pub scheme_present: bool,
}

impl ParsedUrl {
    /// Returns the scheme as given by the user, or `None` if it was synthesized.
    pub fn original_scheme(&self) -> Option<&str> {
        self.scheme_present.then(|| self.url.scheme())
    }

    /// Returns the lowercased host, if any.
    pub fn host_str(&self) -> Option<&str> {
        self.url.host_str().filter(|h| !h.is_empty())
    }
}

/// What kind of host a URL points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostKind {
    /// Raw IPv4 or IPv6 address
    Ip(IpAddr),
    /// DNS name
    Domain(String),
}

/// Parses user input into a URL without ever failing hard.
///
/// Inputs like `example.com/login` or `localhost:8080` have no scheme (or
/// one that swallows the host), so they are retried with `http://`
/// prepended. The synthesized scheme is recorded so scheme-level features
/// still reflect the original input.
///
/// Returns `None` when neither form yields a URL with a host.
pub fn parse_lenient(raw: &str) -> Option<ParsedUrl> {
    match Url::parse(raw) {
        Ok(url) if url.host().is_some() => {
            return Some(ParsedUrl {
                url,
                scheme_present: true,
            })
        }
        Ok(_) if raw.contains("://") => return None,
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase) => {}
        Err(e) => {
            log::trace!("URL parse failed for {raw:?}: {e}");
            return None;
        }
    }

    let url = Url::parse(&format!("http://{raw}")).ok()?;
    url.host()?;
    Some(ParsedUrl {
        url,
        scheme_present: false,
    })
}

/// Classifies the host of a parsed URL.
///
/// IPv4 hosts written in shorthand forms (`http://0x7f.1/`, `http://2130706433/`)
/// are normalized by the URL parser and are reported as IP literals too.
pub fn host_kind(url: &Url) -> Option<HostKind> {
    match url.host()? {
        url::Host::Ipv4(ip) => Some(HostKind::Ip(IpAddr::V4(ip))),
        url::Host::Ipv6(ip) => Some(HostKind::Ip(IpAddr::V6(ip))),
        url::Host::Domain(domain) => {
            if domain.is_empty() {
                return None;
            }
            // Non-special schemes leave IP-looking hosts as opaque domains
            match domain.parse::<IpAddr>() {
                Ok(ip) => Some(HostKind::Ip(ip)),
                Err(_) => Some(HostKind::Domain(domain.to_ascii_lowercase())),
            }
        }
    }
}

/// Extracts the registrable domain from a hostname using the PSL.
///
/// # Returns
///
/// The registrable domain (e.g., "example.co.uk" from "www.example.co.uk"), or
/// `None` for IP addresses, bare public suffixes, and hosts whose suffix is
/// not listed in the PSL. The PSL's implicit `*` rule would otherwise treat
/// any last label (`notarealtld`) as a suffix.
pub fn registrable_domain(host: &str) -> Option<String> {
    let host = host.trim_end_matches('.');
    if host.is_empty() || host.parse::<IpAddr>().is_ok() {
        return None;
    }
    // Bracketed IPv6 as returned by Url::host_str
    if host.starts_with('[') {
        return None;
    }
    let lowered = host.to_ascii_lowercase();
    let domain = psl::domain(lowered.as_bytes())?;
    if !domain.suffix().is_known() {
        return None;
    }
    std::str::from_utf8(domain.as_bytes()).ok().map(str::to_string)
}
