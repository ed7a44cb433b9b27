use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Read once at startup; every variable has a default except that a missing
/// `DATABASE_URL` disables the remote store.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_timeout: Duration,
    pub fallback_log_path: PathBuf,
    pub question_fallback: bool,
    /// Sessions idle longer than this are dropped.
    pub session_idle_ttl: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let llm_timeout_secs = env_or("LLM_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?;

        let session_idle_secs = env_or("SESSION_IDLE_TTL_SECS", "3600")
            .parse::<u64>()
            .context("SESSION_IDLE_TTL_SECS must be a whole number of seconds")?;

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            llm_base_url: env_or("LLM_BASE_URL", "http://localhost:11434"),
            llm_model: env_or("LLM_MODEL", "llama3.2:3b"),
            llm_timeout: Duration::from_secs(llm_timeout_secs),
            fallback_log_path: PathBuf::from(env_or("FALLBACK_LOG_PATH", "data/candidates.json")),
            question_fallback: parse_flag(&env_or("QUESTION_FALLBACK", "true"))
                .context("QUESTION_FALLBACK must be true or false")?,
            session_idle_ttl: Duration::from_secs(session_idle_secs),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

/// Set and non-blank, or `None`.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognised flag value '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true").unwrap());
        assert!(parse_flag(" ON ").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert!(!parse_flag("False").unwrap());
        assert!(parse_flag("maybe").is_err());
    }
}
