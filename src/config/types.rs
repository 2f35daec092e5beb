//! Configuration types and CLI options.
//!
//! This module defines the library `Config` and the enums shared between the
//! CLI and the logger.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_LISTEN_ADDR, DEFAULT_MODEL_PATH, DEFAULT_USER_AGENT, DNS_TIMEOUT_SECS,
    PAGE_TIMEOUT_SECS, WHOIS_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use url_verdict::Config;
///
/// let config = Config {
///     network_features: false,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP service listens on
    pub listen_addr: String,

    /// Path to the serialized model artifact
    pub model_path: PathBuf,

    /// Perform DNS, WHOIS and page lookups during extraction.
    /// When false every network and page feature is reported as unknown.
    pub network_features: bool,

    /// DNS lookup timeout
    pub dns_timeout: Duration,

    /// WHOIS lookup timeout
    pub whois_timeout: Duration,

    /// Page fetch timeout (whole redirect chain)
    pub page_timeout: Duration,

    /// HTTP User-Agent header value for page fetches
    pub user_agent: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            network_features: true,
            dns_timeout: Duration::from_secs(DNS_TIMEOUT_SECS),
            whois_timeout: Duration::from_secs(WHOIS_TIMEOUT_SECS),
            page_timeout: Duration::from_secs(PAGE_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
