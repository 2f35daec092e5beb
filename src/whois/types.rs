//! WHOIS data structures.

use chrono::{DateTime, Utc};

/// Registration dates for a domain, as far as WHOIS/RDAP reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDates {
    /// Domain creation date
    pub created: Option<DateTime<Utc>>,
    /// Domain expiration date
    pub expires: Option<DateTime<Utc>>,
}

impl RegistrationDates {
    /// Age of the domain in whole days at `now`, if the creation date is known.
    pub fn age_days(&self, now: DateTime<Utc>) -> Option<i64> {
        self.created.map(|created| (now - created).num_days())
    }

    /// Days until the domain expires at `now`, if the expiration date is known.
    /// Negative once the domain has lapsed.
    pub fn days_until_expiry(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expires.map(|expires| (expires - now).num_days())
    }
}
