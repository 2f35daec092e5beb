//! Logger initialization.
//!
//! `env_logger` with two output formats: colored plain text for terminals and
//! JSON lines for log shippers.

use std::io::Write;

use colored::*;
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Dependency modules that are clamped regardless of the requested level.
const NOISY_MODULES: &[(&str, LevelFilter)] = &[
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
    ("reqwest", LevelFilter::Info),
    ("rustls", LevelFilter::Warn),
    // Truncated UDP answers are retried by hickory itself
    ("hickory_proto", LevelFilter::Error),
    ("hickory_resolver", LevelFilter::Warn),
];

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first; `level` then overrides the global filter, so
/// `RUST_LOG=url_verdict::features=trace` style per-module directives still
/// apply underneath an explicit `--log-level`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug url_verdict serve
/// url_verdict serve --log-level debug --log-format json
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    for (module, cap) in NOISY_MODULES {
        builder.filter_module(module, (*cap).min(level));
    }
    builder.filter_module("url_verdict", level);

    match format {
        LogFormat::Json => builder.format(format_json),
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(format_plain)
        }
    };

    builder.try_init()?;
    Ok(())
}

fn format_json(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    let line = serde_json::json!({
        "ts": chrono::Utc::now().timestamp_millis(),
        "level": record.level().as_str(),
        "target": record.target(),
        "msg": record.args().to_string(),
    });
    writeln!(buf, "{line}")
}

fn format_plain(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    let level = record.level();
    let (marker, colored_level) = match level {
        Level::Error => ("❌", level.as_str().red()),
        Level::Warn => ("⚠️", level.as_str().yellow()),
        Level::Info => ("✔️", level.as_str().green()),
        Level::Debug => ("🔍", level.as_str().blue()),
        Level::Trace => ("🔬", level.as_str().purple()),
    };
    writeln!(
        buf,
        "{} {} [{}] {}",
        marker,
        record.target().cyan(),
        colored_level,
        record.args()
    )
}
