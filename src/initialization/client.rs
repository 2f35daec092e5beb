//! HTTP client initialization.
//!
//! This module provides the client used to fetch pages for page features.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::security::SafeResolver;

/// Initializes the shared HTTP client for page fetches.
///
/// Creates a `reqwest::Client` with redirects disabled so the fetcher can
/// validate every hop and count the redirect chain itself. Host names are
/// resolved through `resolver`, which refuses non-public addresses.
///
/// # Arguments
///
/// * `config` - Configuration carrying the user-agent and page timeout
/// * `resolver` - DNS resolver used for every connection the client makes
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_page_client(
    config: &Config,
    resolver: SafeResolver,
) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .dns_resolver(Arc::new(resolver))
        .no_proxy()
        .timeout(config.page_timeout)
        .connect_timeout(config.page_timeout)
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
