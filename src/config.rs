use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub balance_csv: PathBuf,
    pub history_csv: PathBuf,
    pub log_dir: PathBuf,

    // Rate limiting
    pub rate_submit_per_min: u32,

    pub api_prefix: String,
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has invalid value {raw:?}")),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server_addr: text("SERVER_ADDR", "127.0.0.1:8080"),
            balance_csv: text("BALANCE_CSV", "data/leave_balance.csv").into(),
            history_csv: text("HISTORY_CSV", "data/leave_history.csv").into(),
            log_dir: text("LOG_DIR", "logs").into(),

            rate_submit_per_min: parsed(&lookup, "RATE_SUBMIT_PER_MIN", 60)?,

            api_prefix: text("API_PREFIX", "/api"),
        })
    }
}
