//! Page-content features.
//!
//! Fetches the page behind a URL (following redirects by hand so each hop can
//! be vetted) and looks for client-side tricks common on phishing pages.
//! Name resolution goes through [`SafeResolver`], so the checked address is
//! the one connected to.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;

use crate::config::{Config, MAX_REDIRECT_HOPS, MAX_RESPONSE_BODY_SIZE};
use crate::error_handling::InitializationError;
use crate::initialization::init_page_client;
use crate::security::{validate_fetch_target_with, AddressPolicy, SafeResolver};

static IFRAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<iframe\b|frameborder").expect("valid regex"));
static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>(.*?)</script>").expect("valid regex"));
static RIGHT_CLICK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"event\.button\s*===?\s*2").expect("valid regex"));

/// What the fetched page revealed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PageSignals {
    pub iframe: bool,
    pub mouse_over: bool,
    pub right_click_disabled: bool,
    pub redirects: usize,
}

impl PageSignals {
    /// Scans an HTML body for the client-side heuristics.
    pub(crate) fn from_body(body: &str, redirects: usize) -> Self {
        let mouse_over = SCRIPT_BLOCK.captures_iter(body).any(|caps| {
            caps.get(1)
                .is_some_and(|script| script.as_str().to_ascii_lowercase().contains("onmouseover"))
        });
        Self {
            iframe: IFRAME.is_match(body),
            mouse_over,
            right_click_disabled: RIGHT_CLICK.is_match(body),
            redirects,
        }
    }
}

/// Fetches pages for the page features.
///
/// Every hop is checked with `policy` before it is requested, and the client
/// resolves names through a [`SafeResolver`] using the same policy.
#[derive(Debug, Clone)]
pub(crate) struct PageFetcher {
    client: Arc<reqwest::Client>,
    policy: AddressPolicy,
    timeout: Duration,
}

impl PageFetcher {
    /// Builds a fetcher that only reaches public addresses.
    pub(crate) fn from_config(
        config: &Config,
        resolver: Arc<TokioAsyncResolver>,
    ) -> Result<Self, InitializationError> {
        Self::with_resolver(config, SafeResolver::new(resolver))
    }

    /// Builds a fetcher whose hop checks follow `resolver`'s policy.
    pub(crate) fn with_resolver(
        config: &Config,
        resolver: SafeResolver,
    ) -> Result<Self, InitializationError> {
        let policy = resolver.policy();
        Ok(Self {
            client: init_page_client(config, resolver)?,
            policy,
            timeout: config.page_timeout,
        })
    }

    /// Fetches `start` and derives page signals, bounded by the page timeout overall.
    ///
    /// Returns `None` when any hop targets a refused address, the chain exceeds
    /// the hop limit, a request or body read fails, or the timeout elapses.
    pub(crate) async fn fetch_signals(&self, start: Url) -> Option<PageSignals> {
        let host = start.host_str().unwrap_or_default().to_string();
        match tokio::time::timeout(self.timeout, self.follow(start)).await {
            Ok(signals) => signals,
            Err(_) => {
                log::debug!("Page fetch for {host} timed out after {:?}", self.timeout);
                None
            }
        }
    }

    async fn follow(&self, start: Url) -> Option<PageSignals> {
        let mut current = start;

        for redirects in 0..=MAX_REDIRECT_HOPS {
            if let Err(e) = validate_fetch_target_with(&current, self.policy) {
                log::debug!("Refusing to fetch {current}: {e}");
                return None;
            }

            let mut response = match self.client.get(current.clone()).send().await {
                Ok(response) => response,
                Err(e) => {
                    log::debug!("Page fetch for {current} failed: {e}");
                    return None;
                }
            };

            if response.status().is_redirection() {
                let location = response
                    .headers()
                    .get(reqwest::header::LOCATION)
                    .and_then(|loc| loc.to_str().ok())?;
                current = match current.join(location) {
                    Ok(next) => next,
                    Err(e) => {
                        log::debug!("Bad redirect location {location:?} from {current}: {e}");
                        return None;
                    }
                };
                continue;
            }

            let mut body = Vec::new();
            loop {
                match response.chunk().await {
                    Ok(Some(chunk)) => {
                        let room = MAX_RESPONSE_BODY_SIZE.saturating_sub(body.len());
                        body.extend_from_slice(&chunk[..chunk.len().min(room)]);
                        if body.len() >= MAX_RESPONSE_BODY_SIZE {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        log::debug!("Reading body of {current} failed: {e}");
                        return None;
                    }
                }
            }
            let text = String::from_utf8_lossy(&body);
            return Some(PageSignals::from_body(&text, redirects));
        }

        log::debug!("Redirect chain exceeded {MAX_REDIRECT_HOPS} hops");
        None
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
