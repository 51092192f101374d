use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    /// TrueType font embedded in every generated PDF.
    pub font_path: PathBuf,
    /// Directory receiving `rapor_<uuid>.<ext>` files.
    pub output_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
    pub llm_timeout: Duration,
    pub llm_max_attempts: u32,
    /// Age after which generated reports are swept. Zero disables the sweep.
    pub report_retention: Duration,
    pub report_sweep_interval: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let llm_max_attempts: u32 = parse_var(&lookup, "LLM_MAX_ATTEMPTS", 3)?;
        if llm_max_attempts == 0 {
            anyhow::bail!("LLM_MAX_ATTEMPTS must be at least 1");
        }

        Ok(Config {
            openai_api_key: lookup("OPENAI_API_KEY")
                .filter(|v| !v.trim().is_empty())
                .context("Required environment variable 'OPENAI_API_KEY' is not set")?,
            openai_base_url: get("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            font_path: PathBuf::from(get("FONT_PATH", "DejaVuSans.ttf")),
            output_dir: PathBuf::from(get("OUTPUT_DIR", ".")),
            templates_dir: PathBuf::from(get("TEMPLATES_DIR", "templates")),
            static_dir: PathBuf::from(get("STATIC_DIR", "static")),
            llm_timeout: Duration::from_secs(parse_var(&lookup, "LLM_TIMEOUT_SECS", 120)?),
            llm_max_attempts,
            report_retention: Duration::from_secs(parse_var(
                &lookup,
                "REPORT_RETENTION_SECS",
                3600,
            )?),
            report_sweep_interval: Duration::from_secs(
                parse_var::<_, u64>(&lookup, "REPORT_SWEEP_INTERVAL_SECS", 300)?.max(1),
            ),
            port: parse_var(&lookup, "PORT", 8000)?,
            rust_log: get("RUST_LOG", "info"),
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
