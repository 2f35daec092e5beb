//! URL feature extraction.
//!
//! Turns any input string into a fixed-length, fixed-order vector of `f64`
//! values. The order is the contract with the model artifact: the artifact
//! stores the names it was trained on and `Detector` refuses to start when
//! they differ from [`FeatureName::names`].
//!
//! Extraction never fails. Features that cannot be determined degrade to a
//! default: `0` for string-level checks on unparseable input, and
//! [`UNKNOWN`] (`-1`) for DNS, WHOIS and page features when a lookup is
//! disabled, refused, times out, or errors.
//!
//! # Feature groups
//!
//! - **Lexical** (pure): IP host, `@`, length, depth, `//`, `https` in host,
//!   shortener, `-` in host, dot count, HTTPS scheme, registrable domain
//! - **Network**: DNS record, domain age, domain expiry
//! - **Page**: iframe, mouse-over script, right-click block, redirect count

mod lexical;
mod network;
mod page;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;
use serde::ser::{Serialize, SerializeMap, Serializer};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

use crate::config::Config;
use crate::domain::{host_kind, parse_lenient, registrable_domain, HostKind};
use crate::error_handling::InitializationError;
use crate::initialization::init_resolver;
use page::PageFetcher;

/// Value used for features whose lookup was skipped or inconclusive.
pub const UNKNOWN: f64 = -1.0;

/// Number of features in every vector.
pub const FEATURE_COUNT: usize = FeatureName::COUNT;

/// Named feature positions, in model order.
///
/// The discriminant is the index into [`FeatureVector`]. Reordering variants
/// invalidates every trained artifact.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCountMacro, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum FeatureName {
    /// Host is an IP literal
    HaveIp = 0,
    /// `@` occurs in the URL
    HaveAt = 1,
    /// URL is at least 54 characters
    LongUrl = 2,
    /// Number of non-empty path segments
    UrlDepth = 3,
    /// `//` occurs past the scheme separator
    DoubleSlashRedirect = 4,
    /// Host contains the token `https`
    HttpsInDomain = 5,
    /// Host belongs to a URL-shortening service
    Shortener = 6,
    /// Host contains `-`
    PrefixSuffix = 7,
    /// Number of `.` characters
    DotCount = 8,
    /// Scheme is `https`
    HttpsScheme = 9,
    /// Host has no registrable domain
    NoRegistrableDomain = 10,
    /// Host does not resolve
    DnsRecordMissing = 11,
    /// Domain registered less than six months ago
    DomainAgeYoung = 12,
    /// Domain expires within six months
    DomainExpiresSoon = 13,
    /// Page embeds an iframe
    Iframe = 14,
    /// Page script rewrites `onmouseover`
    MouseOver = 15,
    /// Page script blocks the right mouse button
    RightClickDisabled = 16,
    /// More than two redirects before the page
    WebForwards = 17,
}

impl FeatureName {
    /// Features that depend on DNS or WHOIS.
    pub const NETWORK: [FeatureName; 3] = [
        FeatureName::DnsRecordMissing,
        FeatureName::DomainAgeYoung,
        FeatureName::DomainExpiresSoon,
    ];

    /// Features that depend on fetching the page.
    pub const PAGE: [FeatureName; 4] = [
        FeatureName::Iframe,
        FeatureName::MouseOver,
        FeatureName::RightClickDisabled,
        FeatureName::WebForwards,
    ];

    /// Position of this feature in the vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable snake_case name, as recorded in model artifacts.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// All feature names in vector order.
    pub fn names() -> Vec<&'static str> {
        FeatureName::iter().map(FeatureName::as_str).collect()
    }
}

/// A fixed-length feature vector in model order.
///
/// Serializes as a JSON object keyed by feature name, in model order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.named() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

impl FeatureVector {
    /// A vector with every slot set to [`UNKNOWN`].
    pub fn unknown() -> Self {
        Self([UNKNOWN; FEATURE_COUNT])
    }

    /// Value of one feature.
    pub fn get(&self, name: FeatureName) -> f64 {
        self.0[name.index()]
    }

    pub(crate) fn set(&mut self, name: FeatureName, value: f64) {
        self.0[name.index()] = value;
    }

    pub(crate) fn set_flag(&mut self, name: FeatureName, value: bool) {
        self.set(name, if value { 1.0 } else { 0.0 });
    }

    /// Values in model order.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// `(name, value)` pairs in model order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FeatureName::iter().map(move |name| (name.as_str(), self.get(name)))
    }
}

/// Computes only the lexical features; network and page slots are [`UNKNOWN`].
///
/// Pure and deterministic: the same string always yields the same vector.
pub fn extract_lexical(url: &str) -> FeatureVector {
    let mut vector = FeatureVector::unknown();
    lexical::fill(url, &mut vector);
    vector
}

/// Shared clients and budgets for network and page lookups.
#[derive(Clone)]
struct Lookups {
    resolver: Arc<TokioAsyncResolver>,
    page: PageFetcher,
    dns_timeout: Duration,
    whois_timeout: Duration,
}

impl fmt::Debug for Lookups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lookups")
            .field("page", &self.page)
            .field("dns_timeout", &self.dns_timeout)
            .field("whois_timeout", &self.whois_timeout)
            .finish_non_exhaustive()
    }
}

/// Extracts feature vectors, optionally performing bounded network lookups.
///
/// Holds only read-only clients, so one extractor serves any number of
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    lookups: Option<Lookups>,
}

impl FeatureExtractor {
    /// An extractor that never touches the network.
    pub fn offline() -> Self {
        Self { lookups: None }
    }

    /// Builds an extractor from configuration.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the page client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        if !config.network_features {
            return Ok(Self::offline());
        }
        let resolver = init_resolver(config.dns_timeout);
        Ok(Self {
            lookups: Some(Lookups {
                page: PageFetcher::from_config(config, resolver.clone())?,
                resolver,
                dns_timeout: config.dns_timeout,
                whois_timeout: config.whois_timeout,
            }),
        })
    }

    /// Whether DNS, WHOIS and page lookups are performed.
    pub fn lookups_enabled(&self) -> bool {
        self.lookups.is_some()
    }

    /// Extracts the full feature vector for `url`.
    ///
    /// Never fails. DNS, WHOIS and the page fetch run concurrently, each under
    /// its own timeout.
    pub async fn extract(&self, url: &str) -> FeatureVector {
        let mut vector = extract_lexical(url);
        let Some(lookups) = &self.lookups else {
            return vector;
        };
        let Some(parsed) = parse_lenient(url) else {
            return vector;
        };
        let Some(kind) = host_kind(&parsed.url) else {
            return vector;
        };

        let domain = match &kind {
            HostKind::Domain(domain) => Some(domain.as_str()),
            HostKind::Ip(_) => None,
        };
        let registrable = domain.and_then(registrable_domain);

        let (dns, dates, signals) = tokio::join!(
            async {
                match domain {
                    Some(host) => Some(
                        crate::dns::resolve_host(host, &lookups.resolver, lookups.dns_timeout)
                            .await,
                    ),
                    None => None,
                }
            },
            async {
                match &registrable {
                    Some(reg) => crate::whois::lookup_registration(reg, lookups.whois_timeout).await,
                    None => None,
                }
            },
            lookups.page.fetch_signals(parsed.url)
        );

        network::fill_dns(dns.as_ref(), &mut vector);
        network::fill_registration(dates.as_ref(), chrono::Utc::now(), &mut vector);
        network::fill_page(signals.as_ref(), &mut vector);

        log::debug!(
            "Extracted features for {url}: {:?}",
            vector.as_slice()
        );
        vector
    }
}
