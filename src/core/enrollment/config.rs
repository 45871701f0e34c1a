//! Configuration types for the DashScope voice-enrollment API.
//!
//! This module contains:
//! - Wire constants (endpoint, enrollment model, action discriminators)
//! - Client options (credential, endpoint, transport timeouts)
//! - Polling defaults and the voice prefix helper
//!
//! # Voice Enrollment API Overview
//!
//! Every operation is a JSON `POST` to a single customization endpoint. The
//! `input.action` field selects what the service does:
//!
//! | Action | Purpose |
//! |--------|---------|
//! | `create_voice` | Derive a cloned voice from a remote audio sample |
//! | `query_voice` | Read the deployment status of a cloned voice |
//! | `list_voice` | Page through the account's cloned voices |
//! | `delete_voice` | Remove a cloned voice |

use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::errors::{EnrollmentError, EnrollmentResult};
use crate::utils::url_validation::validate_endpoint_url;

// =============================================================================
// Constants
// =============================================================================

/// DashScope customization endpoint shared by every enrollment action.
pub const DASHSCOPE_CUSTOMIZATION_URL: &str =
    "https://dashscope.aliyuncs.com/api/v1/services/audio/tts/customization";

/// Top-level `model` value identifying the enrollment service.
pub const ENROLLMENT_MODEL: &str = "voice-enrollment";

/// Speech-synthesis model family cloned voices are created for by default.
pub const DEFAULT_TARGET_MODEL: &str = "cosyvoice-v3-plus";

/// Language hints sent with a creation request when the caller gives none.
pub const DEFAULT_LANGUAGE_HINTS: &[&str] = &["zh"];

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 60;

/// Default delay between two status queries while polling (seconds).
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Default number of status queries before polling gives up.
pub const DEFAULT_POLL_MAX_ATTEMPTS: u32 = 60;

/// Maximum voice prefix length accepted by the service.
pub const MAX_PREFIX_LEN: usize = 10;

/// Prefix used when sanitizing leaves nothing behind.
pub const FALLBACK_PREFIX: &str = "voice";

/// User-Agent header value for API requests.
pub const USER_AGENT: &str = concat!("voice-enrollment/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Actions
// =============================================================================

/// Action discriminator carried in `input.action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceAction {
    /// Create a cloned voice from an audio sample
    CreateVoice,
    /// Query the deployment status of a cloned voice
    QueryVoice,
    /// List cloned voices
    ListVoice,
    /// Delete a cloned voice
    DeleteVoice,
}

impl VoiceAction {
    /// Convert to the API parameter value.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateVoice => "create_voice",
            Self::QueryVoice => "query_voice",
            Self::ListVoice => "list_voice",
            Self::DeleteVoice => "delete_voice",
        }
    }
}

impl fmt::Display for VoiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Options for [`VoiceCloningClient`](super::VoiceCloningClient).
///
/// The API key is cleared from memory when the config is dropped and is
/// redacted from `Debug` output.
#[derive(Clone)]
pub struct EnrollmentClientConfig {
    /// DashScope API key sent as a bearer token
    pub api_key: String,
    /// Endpoint every request is posted to
    pub endpoint: String,
    /// Total request timeout
    pub timeout: Duration,
    /// TCP/TLS connect timeout
    pub connect_timeout: Duration,
}

impl EnrollmentClientConfig {
    /// Create a config for the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.api_key = api_key.into();
        config
    }

    /// Set the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the total request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> EnrollmentResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(EnrollmentError::Configuration(
                "API key is required".to_string(),
            ));
        }
        if HeaderValue::from_str(&format!("Bearer {}", self.api_key)).is_err() {
            return Err(EnrollmentError::Configuration(
                "API key contains characters not allowed in an HTTP header".to_string(),
            ));
        }

        validate_endpoint_url(&self.endpoint).map_err(|e| {
            EnrollmentError::Configuration(format!("Invalid endpoint '{}': {e}", self.endpoint))
        })?;

        if self.timeout.is_zero() {
            return Err(EnrollmentError::Configuration(
                "Request timeout must be greater than zero".to_string(),
            ));
        }
        if self.connect_timeout.is_zero() {
            return Err(EnrollmentError::Configuration(
                "Connect timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for EnrollmentClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DASHSCOPE_CUSTOMIZATION_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for EnrollmentClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnrollmentClientConfig")
            .field("api_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl Drop for EnrollmentClientConfig {
    fn drop(&mut self) {
        self.api_key.zeroize();
    }
}

// =============================================================================
// Prefix Sanitizing
// =============================================================================

/// Reduce a user-chosen name to a prefix the service accepts.
///
/// Keeps ASCII letters and digits, truncates to [`MAX_PREFIX_LEN`] characters
/// and falls back to [`FALLBACK_PREFIX`] when nothing is left. Callers opt in;
/// [`VoiceCloningClient::submit`](super::VoiceCloningClient::submit) sends the
/// prefix it is given untouched.
pub fn sanitize_prefix(prefix: &str) -> String {
    let cleaned: String = prefix
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_PREFIX_LEN)
        .collect();

    if cleaned.is_empty() {
        FALLBACK_PREFIX.to_string()
    } else {
        cleaned
    }
}
