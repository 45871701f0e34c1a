use std::env;
use std::str::FromStr;

use super::AppConfig;
use crate::core::enrollment::DASHSCOPE_CUSTOMIZATION_URL;
use crate::core::enrollment::config::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_POLL_MAX_ATTEMPTS,
    DEFAULT_TIMEOUT_SECS,
};

pub const ENV_API_KEY: &str = "DASHSCOPE_API_KEY";
pub const ENV_ENDPOINT: &str = "DASHSCOPE_ENDPOINT";
pub const ENV_TIMEOUT: &str = "ENROLLMENT_TIMEOUT_SECONDS";
pub const ENV_CONNECT_TIMEOUT: &str = "ENROLLMENT_CONNECT_TIMEOUT_SECONDS";
pub const ENV_POLL_INTERVAL: &str = "ENROLLMENT_POLL_INTERVAL_SECONDS";
pub const ENV_POLL_MAX_ATTEMPTS: &str = "ENROLLMENT_POLL_MAX_ATTEMPTS";

/// Read a non-empty environment variable
fn env_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an optional environment variable
fn env_parse<T>(name: &str) -> Result<Option<T>, Box<dyn std::error::Error>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_string(name) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid value for {name}: '{raw}' ({e})").into()),
        None => Ok(None),
    }
}

/// Build configuration from environment variables and defaults
pub fn load_from_env() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig {
        api_key: env_string(ENV_API_KEY),
        endpoint: env_string(ENV_ENDPOINT)
            .unwrap_or_else(|| DASHSCOPE_CUSTOMIZATION_URL.to_string()),
        timeout_seconds: env_parse(ENV_TIMEOUT)?.unwrap_or(DEFAULT_TIMEOUT_SECS),
        connect_timeout_seconds: env_parse(ENV_CONNECT_TIMEOUT)?
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        poll_interval_seconds: env_parse(ENV_POLL_INTERVAL)?
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
        poll_max_attempts: env_parse(ENV_POLL_MAX_ATTEMPTS)?.unwrap_or(DEFAULT_POLL_MAX_ATTEMPTS),
    })
}
