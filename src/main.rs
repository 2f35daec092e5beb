//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `url_verdict` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use url_verdict::config::{Cli, Command};
use url_verdict::initialization::init_logger_with;
use url_verdict::{server, Config, Detector, FeatureExtractor};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env from the current directory, then from next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();
    let config = cli.config();
    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let result = match cli.command {
        Command::Serve { .. } => run_server(&config).await,
        Command::Check { urls } => run_check(&config, &urls).await,
        Command::Features { url } => run_features(&config, &url).await,
    };

    if let Err(e) = result {
        eprintln!("url_verdict error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run_server(config: &Config) -> Result<()> {
    // Model load failures stop the process before the port is bound
    let detector = Detector::from_config(config)?;
    server::serve(&config.listen_addr, Arc::new(detector)).await
}

async fn run_check(config: &Config, urls: &[String]) -> Result<()> {
    let detector = Detector::from_config(config)?;
    for url in urls {
        let classification = detector
            .classify(url)
            .await
            .with_context(|| format!("Failed to classify {url}"))?;
        println!("{}\t{}", classification.verdict, url);
    }
    Ok(())
}

async fn run_features(config: &Config, url: &str) -> Result<()> {
    let extractor =
        FeatureExtractor::from_config(config).context("Failed to initialize feature extractor")?;
    let vector = extractor.extract(url).await;
    println!("{}", serde_json::to_string_pretty(&vector)?);
    Ok(())
}
