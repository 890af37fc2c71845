use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const APP_DIR: &str = "resume-optimizer";
const TOKEN_FILE: &str = "session.json";

/// Client configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the analysis API, without a trailing slash.
    pub api_base_url: String,
    pub token_path: PathBuf,
    pub request_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_base_url = require_env("RESUME_API_URL")?
            .trim_end_matches('/')
            .to_string();

        let token_path = match std::env::var("RESUME_TOKEN_PATH") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_token_path()?,
        };

        let timeout_secs = std::env::var("RESUME_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".to_string())
            .parse::<u64>()
            .context("RESUME_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            api_base_url,
            token_path,
            request_timeout: Duration::from_secs(timeout_secs),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn default_token_path() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .context("Could not determine a config directory; set RESUME_TOKEN_PATH")?;
    Ok(token_path_in(base))
}

fn token_path_in(base: PathBuf) -> PathBuf {
    base.join(APP_DIR).join(TOKEN_FILE)
}
