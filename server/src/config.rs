//! Server configuration from environment variables.

use std::env;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Default bearer-token lifetime in days.
pub const DEFAULT_SESSION_DAYS: i64 = 7;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// When unset the in-memory store is used.
    pub database_url: Option<String>,
    pub session_ttl: chrono::Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// - `SMARTCHEF_BIND_ADDR` (default: "0.0.0.0:3000")
    /// - `DATABASE_URL` (optional)
    /// - `SMARTCHEF_SESSION_DAYS` (default: 7)
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr =
            env::var("SMARTCHEF_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let session_days = match env::var("SMARTCHEF_SESSION_DAYS") {
            Ok(value) => parse_session_days(&value).ok_or(ConfigError::InvalidValue {
                name: "SMARTCHEF_SESSION_DAYS",
                value,
            })?,
            Err(_) => DEFAULT_SESSION_DAYS,
        };

        Ok(Self {
            bind_addr,
            database_url,
            session_ttl: chrono::Duration::days(session_days),
        })
    }
}

fn parse_session_days(value: &str) -> Option<i64> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|days| (1..=365).contains(days))
}
