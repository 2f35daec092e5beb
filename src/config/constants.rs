//! Configuration constants.
//!
//! Timeouts, size limits and feature thresholds used across the extractor and
//! the HTTP service.

/// Address the HTTP service binds to when none is given
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";
/// Model artifact loaded when no `--model` is given
pub const DEFAULT_MODEL_PATH: &str = "models/url_forest.json";

// Network operation timeouts
/// DNS query timeout in seconds
/// Most queries complete in <1s; 3s keeps a dead resolver from stalling a request
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// WHOIS/RDAP lookup timeout in seconds
pub const WHOIS_TIMEOUT_SECS: u64 = 5;
/// Page fetch timeout in seconds (covers the whole redirect chain)
pub const PAGE_TIMEOUT_SECS: u64 = 5;

/// Default User-Agent string for page fetches.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Page fetch limits
/// Maximum response body size in bytes (2MB); larger bodies are truncated
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;
/// Maximum number of redirect hops followed when fetching a page
pub const MAX_REDIRECT_HOPS: usize = 10;

// Feature thresholds
/// URLs at least this long count as "long"
pub const LONG_URL_THRESHOLD: usize = 54;
/// `//` found after this byte offset indicates an embedded redirect
pub const DOUBLE_SLASH_MAX_POSITION: usize = 7;
/// Domains younger than this (in days) count as newly registered
pub const YOUNG_DOMAIN_DAYS: i64 = 180;
/// Domains expiring within this many days count as short-lived
pub const EXPIRING_DOMAIN_DAYS: i64 = 180;
/// Redirect chains longer than this count as forwarding
pub const MAX_BENIGN_FORWARDS: usize = 2;
