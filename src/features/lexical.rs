//! Lexical and structural URL features.
//!
//! Everything here is a pure function of the input string. When the input
//! cannot be parsed as a URL, string-level features are still computed from
//! the raw text and host-level features fall back to their defaults.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{FeatureName, FeatureVector};
use crate::config::{DOUBLE_SLASH_MAX_POSITION, LONG_URL_THRESHOLD};
use crate::domain::{host_kind, parse_lenient, registrable_domain, HostKind, ParsedUrl};

/// Dotted-quad anywhere in an unparseable string.
static DOTTED_QUAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\d.])(?:\d{1,3}\.){3}\d{1,3}(?:$|[^\d.])").expect("valid regex")
});

/// Known URL-shortening services, matched against the host and its parent domains.
const SHORTENERS: &[&str] = &[
    "1url.com", "adf.ly", "bc.vc", "bit.do", "bit.ly", "bitly.com", "bkite.com", "budurl.com",
    "buff.ly", "buzurl.com", "cli.gs", "cur.lv", "cutt.ly", "cutt.us", "db.tt", "doiop.com",
    "ff.im", "fic.kr", "filoops.info", "go2l.ink", "goo.gl", "is.gd", "ity.im", "j.mp",
    "just.as", "kl.am", "lnkd.in", "loopt.us", "migre.me", "om.ly", "ow.ly", "ping.fm",
    "po.st", "post.ly", "prettylinkpro.com", "q.gs", "qr.ae", "qr.net", "rb.gy", "rebrand.ly",
    "rubyurl.com", "scrnch.me", "short.ie", "short.to", "shorte.st", "snipr.com",
    "snipurl.com", "su.pr", "t.co", "t.ly", "tiny.cc", "tinyurl.com", "to.ly", "tr.im",
    "tweez.me", "twit.ac", "twitthis.com", "twurl.nl", "u.bb", "u.to", "url4.eu", "v.gd",
    "vzturl.com", "wp.me", "x.co", "yfrog.com", "yourls.org",
];

/// Computes the lexical features into `vector`; other slots are left untouched.
pub(crate) fn fill(raw: &str, vector: &mut FeatureVector) {
    let parsed = parse_lenient(raw);
    let host = parsed.as_ref().and_then(ParsedUrl::host_str);
    let kind = parsed.as_ref().and_then(|p| host_kind(&p.url));

    let have_ip = match &kind {
        Some(HostKind::Ip(_)) => true,
        Some(HostKind::Domain(_)) => false,
        None => DOTTED_QUAD.is_match(raw),
    };
    vector.set_flag(FeatureName::HaveIp, have_ip);
    vector.set_flag(FeatureName::HaveAt, raw.contains('@'));
    vector.set_flag(
        FeatureName::LongUrl,
        raw.chars().count() >= LONG_URL_THRESHOLD,
    );
    vector.set(
        FeatureName::UrlDepth,
        parsed.as_ref().map_or(0, url_depth) as f64,
    );
    vector.set_flag(
        FeatureName::DoubleSlashRedirect,
        raw.rfind("//")
            .is_some_and(|pos| pos > DOUBLE_SLASH_MAX_POSITION),
    );
    vector.set_flag(
        FeatureName::HttpsInDomain,
        host.is_some_and(|h| h.contains("https")),
    );
    vector.set_flag(FeatureName::Shortener, host.is_some_and(is_shortener));
    vector.set_flag(
        FeatureName::PrefixSuffix,
        host.is_some_and(|h| h.contains('-')),
    );
    vector.set(FeatureName::DotCount, raw.matches('.').count() as f64);
    vector.set_flag(
        FeatureName::HttpsScheme,
        parsed
            .as_ref()
            .and_then(ParsedUrl::original_scheme)
            .is_some_and(|s| s == "https"),
    );
    let registrable = match &kind {
        Some(HostKind::Domain(d)) => registrable_domain(d).is_some(),
        Some(HostKind::Ip(_)) | None => false,
    };
    vector.set_flag(FeatureName::NoRegistrableDomain, !registrable);
}

/// Number of non-empty path segments.
fn url_depth(parsed: &ParsedUrl) -> usize {
    parsed
        .url
        .path_segments()
        .map_or(0, |segments| segments.filter(|s| !s.is_empty()).count())
}

/// Whether `host` is, or is a subdomain of, a known shortener.
fn is_shortener(host: &str) -> bool {
    let host = host.trim_end_matches('.');
    SHORTENERS.iter().any(|short| {
        host == *short
            || host
                .strip_suffix(short)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}
