//! Configuration module for the voice enrollment client
//!
//! This module handles configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//!
//! The API credential is only ever sourced here. It is never compiled in.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//!
//! # Example
//! ```rust,no_run
//! use voice_enrollment::config::AppConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = AppConfig::from_env()?;
//!
//! // Load from YAML file with environment variable base
//! let config_path = PathBuf::from("config.yaml");
//! let config = AppConfig::from_file(&config_path)?;
//!
//! println!("Posting to {}", config.endpoint);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use zeroize::Zeroize;

use crate::core::enrollment::{EnrollmentClientConfig, PollOptions};

mod env;
mod yaml;

pub use env::{
    ENV_API_KEY, ENV_CONNECT_TIMEOUT, ENV_ENDPOINT, ENV_POLL_INTERVAL, ENV_POLL_MAX_ATTEMPTS,
    ENV_TIMEOUT,
};
pub use yaml::YamlConfig;

/// Process configuration
///
/// Contains everything needed to talk to the voice enrollment service:
/// - DashScope credential and endpoint
/// - Transport timeouts
/// - Status polling cadence
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// DashScope API key (`DASHSCOPE_API_KEY`)
    pub api_key: Option<String>,
    /// Customization endpoint (`DASHSCOPE_ENDPOINT`)
    pub endpoint: String,

    /// Total request timeout in seconds
    /// Default: 120
    pub timeout_seconds: u64,
    /// Connect timeout in seconds
    /// Default: 60
    pub connect_timeout_seconds: u64,

    /// Seconds between status queries while waiting for deployment
    /// Default: 5
    pub poll_interval_seconds: u64,
    /// Maximum status queries while waiting for deployment
    /// Default: 60
    pub poll_max_attempts: u32,
}

/// Zeroize the API key when the configuration is dropped.
impl Drop for AppConfig {
    fn drop(&mut self) {
        if let Some(ref mut key) = self.api_key {
            key.zeroize();
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("endpoint", &self.endpoint)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .field("poll_interval_seconds", &self.poll_interval_seconds)
            .field("poll_max_attempts", &self.poll_max_attempts)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// The .env file is loaded by `main` before this is called, so actual
    /// environment variables override .env values.
    ///
    /// # Errors
    /// Returns an error if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        env::load_from_env()
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = YamlConfig::from_file(path)?;
        let mut config = env::load_from_env()?;
        config.apply_yaml(yaml_config);
        Ok(config)
    }

    fn apply_yaml(&mut self, yaml: YamlConfig) {
        if let Some(dashscope) = yaml.dashscope {
            if let Some(api_key) = dashscope.api_key.filter(|k| !k.trim().is_empty()) {
                if let Some(ref mut old) = self.api_key {
                    old.zeroize();
                }
                self.api_key = Some(api_key);
            }
            if let Some(endpoint) = dashscope.endpoint {
                self.endpoint = endpoint;
            }
        }
        if let Some(transport) = yaml.transport {
            if let Some(timeout) = transport.timeout_seconds {
                self.timeout_seconds = timeout;
            }
            if let Some(connect_timeout) = transport.connect_timeout_seconds {
                self.connect_timeout_seconds = connect_timeout;
            }
        }
        if let Some(polling) = yaml.polling {
            if let Some(interval) = polling.interval_seconds {
                self.poll_interval_seconds = interval;
            }
            if let Some(max_attempts) = polling.max_attempts {
                self.poll_max_attempts = max_attempts;
            }
        }
    }

    /// Build the client configuration
    ///
    /// Values are validated when the client is constructed from it.
    ///
    /// # Errors
    /// Returns an error if no API key is configured.
    pub fn client_config(&self) -> Result<EnrollmentClientConfig, Box<dyn std::error::Error>> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            format!("DashScope API key not configured (set {ENV_API_KEY} or dashscope.api_key)")
        })?;

        Ok(EnrollmentClientConfig::new(api_key.clone())
            .with_endpoint(self.endpoint.clone())
            .with_timeout(Duration::from_secs(self.timeout_seconds))
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_seconds)))
    }

    /// Polling cadence for `wait_until_ready`
    pub fn poll_options(&self) -> PollOptions {
        PollOptions {
            interval: Duration::from_secs(self.poll_interval_seconds),
            max_attempts: self.poll_max_attempts,
        }
    }
}
