use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use crate::store::RetryPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,

    /// Unset means the in-memory store only.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_connect_timeout: Duration,

    // Storage resilience
    pub store_retry_attempts: u32,
    pub store_timeout: Duration,

    // Rate limiting
    pub rate_per_min: u32,

    pub api_prefix: String,

    pub log_dir: String,
    pub log_level: tracing::Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "0.0.0.0:3001".to_string(),
            database_url: None,
            db_max_connections: 5,
            db_connect_timeout: Duration::from_secs(5),
            store_retry_attempts: 3,
            store_timeout: Duration::from_millis(2000),
            rate_per_min: 1000,
            api_prefix: "/api".to_string(),
            log_dir: "logs".to_string(),
            log_level: tracing::Level::DEBUG,
        }
    }
}

fn parsed<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let defaults = Self::default();

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or(defaults.server_addr),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            db_max_connections: parsed("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            db_connect_timeout: Duration::from_secs(parsed(
                "DB_CONNECT_TIMEOUT_SECS",
                defaults.db_connect_timeout.as_secs(),
            )?),
            store_retry_attempts: parsed("STORE_RETRY_ATTEMPTS", defaults.store_retry_attempts)?,
            store_timeout: Duration::from_millis(parsed(
                "STORE_TIMEOUT_MS",
                defaults.store_timeout.as_millis() as u64,
            )?),
            rate_per_min: parsed("RATE_PER_MIN", defaults.rate_per_min)?,
            api_prefix: env::var("API_PREFIX").unwrap_or(defaults.api_prefix),
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: parsed("LOG_LEVEL", defaults.log_level)?,
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.store_retry_attempts,
            timeout: self.store_timeout,
            ..RetryPolicy::default()
        }
    }
}
