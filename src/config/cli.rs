//! Command-line options.
//!
//! The binary parses [`Cli`] and converts it into the library [`Config`].
//! Every flag can also be set from the environment or a `.env` file where an
//! `env` name is given.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::constants::{DEFAULT_LISTEN_ADDR, DEFAULT_MODEL_PATH, DEFAULT_USER_AGENT};
use crate::config::types::{Config, LogFormat, LogLevel};

/// Command-line options for `url_verdict`.
///
/// # Examples
///
/// ```bash
/// # Serve predictions on the default address
/// url_verdict serve
///
/// # Serve with a custom model, lexical features only
/// url_verdict serve --model ./forest.json --offline
///
/// # Classify URLs without starting the service
/// url_verdict check https://www.wikipedia.org http://192.168.1.1/login.php
///
/// # Inspect the feature vector for one URL
/// url_verdict features "http://bit.ly/abc"
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "url_verdict",
    version,
    about = "Classifies URLs as legitimate or phishing."
)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Path to the model artifact (JSON random forest)
    #[arg(long, env = "URL_VERDICT_MODEL", default_value = DEFAULT_MODEL_PATH, global = true)]
    pub model: PathBuf,

    /// Skip DNS, WHOIS and page lookups; those features report unknown (-1)
    #[arg(long, global = true)]
    pub offline: bool,

    /// HTTP User-Agent header value for page fetches
    #[arg(long, default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP prediction service
    Serve {
        /// Address to listen on
        #[arg(long, env = "URL_VERDICT_LISTEN", default_value = DEFAULT_LISTEN_ADDR)]
        listen: String,
    },

    /// Classify one or more URLs and print the verdicts
    Check {
        /// URLs to classify
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Print the feature vector extracted from a URL as JSON
    Features {
        /// URL to inspect
        url: String,
    },
}

impl Cli {
    /// Library configuration for these options.
    pub fn config(&self) -> Config {
        let mut config = Config {
            model_path: self.model.clone(),
            network_features: !self.offline,
            user_agent: self.user_agent.clone(),
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            ..Default::default()
        };
        if let Command::Serve { listen } = &self.command {
            config.listen_addr = listen.clone();
        }
        config
    }
}
