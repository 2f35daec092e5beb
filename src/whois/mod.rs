//! WHOIS/RDAP registration lookup for the domain-age features.
//!
//! Uses the `whois-service` crate, which tries RDAP first and falls back to
//! port-43 WHOIS with IANA bootstrap for TLD discovery. Every lookup is bounded
//! by a timeout; a failed or slow lookup yields `None` and the caller treats
//! the dependent features as unknown.

mod parse;
mod types;

use std::time::Duration;

use whois_service::WhoisClient;

pub use types::RegistrationDates;

/// Looks up registration dates for a registrable domain.
///
/// # Arguments
///
/// * `domain` - The registrable domain (e.g., "example.com")
/// * `timeout` - Upper bound on the whole lookup, including client setup
///
/// # Returns
///
/// The registration dates, or `None` if the lookup failed or timed out.
pub async fn lookup_registration(domain: &str, timeout: Duration) -> Option<RegistrationDates> {
    match tokio::time::timeout(timeout, lookup(domain)).await {
        Ok(result) => result,
        Err(_) => {
            log::debug!("WHOIS lookup for {domain} timed out after {timeout:?}");
            None
        }
    }
}

async fn lookup(domain: &str) -> Option<RegistrationDates> {
    let client = match WhoisClient::new().await {
        Ok(client) => client,
        Err(e) => {
            log::warn!("Failed to create WHOIS client: {e}");
            return None;
        }
    };

    match client.lookup(domain).await {
        Ok(response) => {
            let dates = parse::registration_dates(&response);
            log::debug!(
                "WHOIS for {domain}: created={:?} expires={:?}",
                dates.created,
                dates.expires
            );
            Some(dates)
        }
        Err(e) => {
            log::debug!("WHOIS lookup failed for {domain}: {e}");
            None
        }
    }
}
