//! WHOIS response parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use whois_service::WhoisResponse;

use super::types::RegistrationDates;

/// Date layouts seen in registry responses, tried in order after RFC 3339.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d",
    "%d-%b-%Y",
    "%d/%m/%Y",
    "%Y.%m.%d",
];

/// Pulls creation and expiration dates out of a whois-service response.
pub(crate) fn registration_dates(response: &WhoisResponse) -> RegistrationDates {
    let Some(parsed) = &response.parsed_data else {
        return RegistrationDates::default();
    };

    RegistrationDates {
        created: parsed.creation_date.as_deref().and_then(parse_date),
        expires: parsed.expiration_date.as_deref().and_then(parse_date),
    }
}

/// Parses a registry date string in any of the known layouts.
pub(crate) fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    DATE_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(raw, format)
            .map(|naive| naive.and_utc())
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(raw, format)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(|naive| naive.and_utc())
            })
    })
}
