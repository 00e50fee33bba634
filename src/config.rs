// src/config.rs
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_path: String,
    pub schema_path: String,
    /// Public origin of this site; the sign-up confirmation email links back here.
    pub site_url: String,
    pub backend_url: String,
    pub backend_anon_key: String,
    pub backend_timeout: Duration,
    pub max_workers: usize,
    pub reconcile_interval: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend_url = get("BACKEND_URL").ok_or(ConfigError::Missing("BACKEND_URL"))?;
        let backend_anon_key =
            get("BACKEND_ANON_KEY").ok_or(ConfigError::Missing("BACKEND_ANON_KEY"))?;

        let bind_addr: SocketAddr = parse_or(get("BIND_ADDR"), "BIND_ADDR", "127.0.0.1:3000")?;
        let site_url = get("SITE_URL")
            .unwrap_or_else(|| format!("http://{bind_addr}"))
            .trim_end_matches('/')
            .to_string();

        let max_workers: usize = parse_or(get("MAX_WORKERS"), "MAX_WORKERS", "8")?;
        if max_workers == 0 {
            return Err(ConfigError::Invalid {
                key: "MAX_WORKERS",
                reason: "must be at least 1".into(),
            });
        }

        let timeout_secs: u64 = parse_or(get("BACKEND_TIMEOUT_SECS"), "BACKEND_TIMEOUT_SECS", "15")?;
        let reconcile_secs: u64 =
            parse_or(get("RECONCILE_INTERVAL_SECS"), "RECONCILE_INTERVAL_SECS", "300")?;

        Ok(Self {
            bind_addr,
            database_path: get("DATABASE_PATH").unwrap_or_else(|| "rental_simple.sqlite3".into()),
            schema_path: get("SCHEMA_PATH").unwrap_or_else(|| "sql/schema.sql".into()),
            site_url,
            backend_url,
            backend_anon_key,
            backend_timeout: Duration::from_secs(timeout_secs),
            max_workers,
            reconcile_interval: Duration::from_secs(reconcile_secs),
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = value.unwrap_or_else(|| default.to_string());
    raw.parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        reason: format!("{raw:?}: {e}"),
    })
}
