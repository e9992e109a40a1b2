use std::path::PathBuf;

use anyhow::{Context, Result};

/// Server settings, read from `LOSTFOUND_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_file: PathBuf,
    pub logo_path: PathBuf,
    pub site_name: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let port: u16 = var("LOSTFOUND_PORT", "8501")
            .parse()
            .context("LOSTFOUND_PORT must be a port number")?;
        let max_upload_mb: usize = var("LOSTFOUND_MAX_UPLOAD_MB", "16")
            .parse()
            .context("LOSTFOUND_MAX_UPLOAD_MB must be a whole number of megabytes")?;
        let max_upload_bytes = max_upload_mb
            .checked_mul(1024 * 1024)
            .context("LOSTFOUND_MAX_UPLOAD_MB is too large")?;

        Ok(Self {
            host: var("LOSTFOUND_HOST", "0.0.0.0"),
            port,
            data_file: var("LOSTFOUND_DATA_FILE", "data_reports.json").into(),
            logo_path: var("LOSTFOUND_LOGO_PATH", "logo.png").into(),
            site_name: var("LOSTFOUND_SITE_NAME", "UT Lost & Found"),
            max_upload_bytes,
        })
    }
}
