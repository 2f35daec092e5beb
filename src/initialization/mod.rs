//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - DNS resolver
//! - HTTP client for page fetches
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::init_page_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;
