//! Mapping of lookup results onto feature values.
//!
//! The lookups themselves live in `dns`, `whois` and `page`; this module only
//! decides what each outcome means for the model.

use chrono::{DateTime, Utc};

use super::{FeatureName, FeatureVector, UNKNOWN};
use crate::config::{EXPIRING_DOMAIN_DAYS, MAX_BENIGN_FORWARDS, YOUNG_DOMAIN_DAYS};
use crate::dns::DnsOutcome;
use crate::whois::RegistrationDates;

use super::page::PageSignals;

/// Fills the DNS-record slot. IP-literal hosts pass `None` and count as present.
pub(crate) fn fill_dns(outcome: Option<&DnsOutcome>, vector: &mut FeatureVector) {
    let value = match outcome {
        None | Some(DnsOutcome::Resolved(_)) => 0.0,
        Some(DnsOutcome::NotFound) => 1.0,
        Some(DnsOutcome::Unknown) => UNKNOWN,
    };
    vector.set(FeatureName::DnsRecordMissing, value);
}

/// Fills the domain-age and expiry slots from WHOIS dates.
pub(crate) fn fill_registration(
    dates: Option<&RegistrationDates>,
    now: DateTime<Utc>,
    vector: &mut FeatureVector,
) {
    let age = dates.and_then(|d| d.age_days(now));
    let remaining = dates.and_then(|d| d.days_until_expiry(now));

    vector.set(
        FeatureName::DomainAgeYoung,
        age.map_or(UNKNOWN, |days| flag(days < YOUNG_DOMAIN_DAYS)),
    );
    vector.set(
        FeatureName::DomainExpiresSoon,
        remaining.map_or(UNKNOWN, |days| flag(days < EXPIRING_DOMAIN_DAYS)),
    );
}

/// Fills the page slots; `None` leaves all four unknown.
pub(crate) fn fill_page(signals: Option<&PageSignals>, vector: &mut FeatureVector) {
    let Some(signals) = signals else {
        for name in FeatureName::PAGE {
            vector.set(name, UNKNOWN);
        }
        return;
    };
    vector.set_flag(FeatureName::Iframe, signals.iframe);
    vector.set_flag(FeatureName::MouseOver, signals.mouse_over);
    vector.set_flag(FeatureName::RightClickDisabled, signals.right_click_disabled);
    vector.set_flag(
        FeatureName::WebForwards,
        signals.redirects > MAX_BENIGN_FORWARDS,
    );
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
