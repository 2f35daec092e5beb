//! url_verdict library: URL phishing classification
//!
//! This library turns a URL into a fixed-order feature vector (lexical
//! signals, DNS, WHOIS and page content), feeds it to a pre-trained random
//! forest and maps the resulting class to a `Legitimate`/`Phishing` verdict.
//! The same pipeline backs the HTTP service in [`server`].
//!
//! # Example
//!
//! ```no_run
//! use url_verdict::{Config, Detector};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     network_features: false,
//!     ..Default::default()
//! };
//!
//! let detector = Detector::from_config(&config)?;
//! let result = detector.classify("http://192.168.1.1/login.php@verify-paypal.com").await?;
//! println!("{}", result.verdict);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Extraction and serving require a Tokio runtime. [`extract_lexical`] and
//! [`Classifier::predict`] are synchronous.

#![warn(missing_docs)]

pub mod config;
pub mod detector;
mod dns;
mod domain;
pub mod error_handling;
pub mod features;
pub mod initialization;
pub mod model;
pub mod security;
pub mod server;
mod whois;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use detector::{Classification, Detector};
pub use features::{extract_lexical, FeatureExtractor, FeatureName, FeatureVector};
pub use model::{Classifier, Verdict};

#[cfg(test)]
pub(crate) mod test_support;
