//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, feature thresholds)
//! - The library `Config` struct and logging option types
//! - Command-line parsing for the binary

mod cli;
mod constants;
mod types;

pub use cli::{Cli, Command};
// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
