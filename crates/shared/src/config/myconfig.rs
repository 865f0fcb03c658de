use anyhow::{Context, Result, anyhow};
use std::{path::PathBuf, time::Duration};

const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct Config {
    pub identity_base_url: String,
    pub identity_timeout: Duration,
    pub session_file: PathBuf,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        let identity_base_url = std::env::var("IDENTITY_BASE_URL")
            .context("Missing environment variable: IDENTITY_BASE_URL")?;

        if !(identity_base_url.starts_with("http://") || identity_base_url.starts_with("https://"))
        {
            return Err(anyhow!(
                "IDENTITY_BASE_URL must start with http:// or https://, got '{}'",
                identity_base_url
            ));
        }

        let identity_timeout = match std::env::var("IDENTITY_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .context("IDENTITY_TIMEOUT_SECS must be a valid u64 integer")?,
            ),
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let session_file = match std::env::var("SESSION_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_session_file()?,
        };

        let is_dev = env_flag("DEV_MODE");
        let enable_file_log = env_flag("ENABLE_FILE_LOG");

        Ok(Self {
            identity_base_url: identity_base_url.trim_end_matches('/').to_string(),
            identity_timeout,
            session_file,
            is_dev,
            enable_file_log,
        })
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

fn default_session_file() -> Result<PathBuf> {
    let base = dirs::data_dir()
        .context("Could not determine a data directory; set SESSION_FILE explicitly")?;
    Ok(base.join("property-portal").join("session.json"))
}
