mod analysis;
mod api_client;
mod auth;
mod cli;
mod commands;
mod config;
mod errors;
mod models;
mod render;
mod routes;
mod state;
mod upload;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Args;
use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging on stderr; stdout carries command output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Resume Optimizer v{}", env!("CARGO_PKG_VERSION"));
    debug!("API base URL: {}", config.api_base_url);

    let state = AppState::new(config)?;

    if let Err(e) = commands::run(args.command, state).await {
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}
