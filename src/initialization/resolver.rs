//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

/// Initializes the DNS resolver for hostname lookups.
///
/// Creates a DNS resolver using default configuration (Google DNS: 8.8.8.8, 8.8.4.4)
/// with aggressive timeouts so a slow name server cannot stall extraction.
///
/// # Arguments
///
/// * `timeout` - Per-query timeout
///
/// # Returns
///
/// A configured `TokioAsyncResolver` wrapped in `Arc` for sharing across requests.
pub fn init_resolver(timeout: Duration) -> Arc<TokioAsyncResolver> {
    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = 1;
    // Prevent search domain appending; a bare label must not resolve via the host's search list
    opts.ndots = 0;

    Arc::new(TokioAsyncResolver::tokio(ResolverConfig::default(), opts))
}
