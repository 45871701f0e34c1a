//! Voice-cloning client implementation.
//!
//! # Architecture
//!
//! The voice-enrollment service is a plain REST API. Each operation:
//!
//! 1. Builds the JSON body for its action
//! 2. Posts it to the configured endpoint with bearer authentication
//! 3. Decodes the body as JSON and returns it with the HTTP status
//!
//! The client holds no state besides its configuration. Calls are
//! independent, never retried, and non-2xx statuses are returned as data.

use std::fmt;

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, info, warn};
use zeroize::Zeroize;

use super::config::{EnrollmentClientConfig, USER_AGENT};
use super::messages::{
    CreationRequest, DeleteRequest, EnrollmentRequest, ListQuery, StatusQuery, StatusReport,
    TaskResponse,
};
use crate::errors::{EnrollmentError, EnrollmentResult};

/// Thin client for the voice-enrollment API.
///
/// # Example
///
/// ```rust,no_run
/// use voice_enrollment::core::enrollment::{
///     CreationRequest, StatusQuery, VoiceCloningClient, DASHSCOPE_CUSTOMIZATION_URL,
/// };
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = VoiceCloningClient::new(
///     std::env::var("DASHSCOPE_API_KEY")?,
///     DASHSCOPE_CUSTOMIZATION_URL,
/// )?;
///
/// let created = client
///     .submit(CreationRequest::new("grandma", "https://cdn.example.com/sample.m4a"))
///     .await?;
/// println!("HTTP {}: {}", created.status_code, created.pretty_body());
///
/// if let Some(voice_id) = created.voice_id() {
///     let report = client.query_status(StatusQuery::new(voice_id)).await?;
///     println!("Voice status: {}", report.status);
/// }
/// # Ok(())
/// # }
/// ```
pub struct VoiceCloningClient {
    http_client: Client,
    api_key: String,
    endpoint: String,
}

impl VoiceCloningClient {
    /// Create a client for `endpoint` with default timeouts.
    ///
    /// No network activity happens here.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> EnrollmentResult<Self> {
        Self::from_config(EnrollmentClientConfig::new(api_key).with_endpoint(endpoint))
    }

    /// Create a client from a full configuration.
    pub fn from_config(config: EnrollmentClientConfig) -> EnrollmentResult<Self> {
        config.validate()?;

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                EnrollmentError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        debug!(
            endpoint = %config.endpoint,
            timeout_secs = config.timeout.as_secs(),
            connect_timeout_secs = config.connect_timeout.as_secs(),
            "Created voice enrollment client"
        );

        Ok(Self {
            http_client,
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.trim().to_string(),
        })
    }

    /// Build a client without validating the credential or endpoint.
    #[cfg(test)]
    pub(crate) fn unchecked(api_key: &str, endpoint: &str) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.to_string(),
            endpoint: endpoint.to_string(),
        }
    }

    /// The endpoint every request is posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit a voice creation task.
    ///
    /// Returns the raw response; `voice_id()` on it yields the new voice
    /// identifier when the service accepted the task. Submitting twice creates
    /// two distinct remote voices.
    pub async fn submit(&self, request: CreationRequest) -> EnrollmentResult<TaskResponse> {
        info!(
            target_model = %request.target_model,
            prefix = %request.prefix,
            "Submitting voice creation task"
        );
        debug!(audio_url = %request.url, language_hints = ?request.language_hints);

        let response = self.execute(&EnrollmentRequest::create(&request)).await?;

        match response.voice_id() {
            Some(voice_id) => info!(voice_id, "Voice creation task accepted"),
            None => warn!(
                status_code = response.status_code,
                error_code = response.error_code(),
                "Voice creation response carries no voice_id"
            ),
        }

        Ok(response)
    }

    /// Query the deployment status of a voice and classify it.
    ///
    /// A missing or unrecognised `output.status` is not an error; it is
    /// reported as [`VoiceStatus::Unknown`](super::VoiceStatus::Unknown).
    pub async fn query_status(&self, query: StatusQuery) -> EnrollmentResult<StatusReport> {
        let response = self.execute(&EnrollmentRequest::query(&query)).await?;
        let report = StatusReport::from(response);

        info!(voice_id = %query.voice_id, status = %report.status, "Queried voice status");

        Ok(report)
    }

    /// List cloned voices, optionally filtered by prefix.
    pub async fn list_voices(&self, query: ListQuery) -> EnrollmentResult<TaskResponse> {
        let response = self.execute(&EnrollmentRequest::list(&query)).await?;

        info!(
            prefix = query.prefix.as_deref(),
            page_index = query.page_index,
            count = response.voices().len(),
            "Listed cloned voices"
        );

        Ok(response)
    }

    /// Delete a cloned voice.
    pub async fn delete_voice(&self, request: DeleteRequest) -> EnrollmentResult<TaskResponse> {
        let response = self.execute(&EnrollmentRequest::delete(&request)).await?;

        if response.is_success() {
            info!(voice_id = %request.voice_id, "Deleted cloned voice");
        }

        Ok(response)
    }

    /// Build the HTTP request for a body.
    pub(crate) fn build_http_request(&self, body: &EnrollmentRequest<'_>) -> reqwest::RequestBuilder {
        self.http_client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(body)
    }

    async fn execute(&self, body: &EnrollmentRequest<'_>) -> EnrollmentResult<TaskResponse> {
        let action = body.action();

        if tracing::enabled!(tracing::Level::DEBUG) {
            match serde_json::to_string(body) {
                Ok(json) => debug!(%action, endpoint = %self.endpoint, body = %json, "Sending enrollment request"),
                Err(e) => debug!(%action, "Failed to render request body for logging: {e}"),
            }
        }

        let response = self
            .build_http_request(body)
            .send()
            .await
            .map_err(|e| {
                warn!(%action, "Enrollment request failed: {e}");
                EnrollmentError::from(e)
            })?;

        let status_code = response.status().as_u16();

        let bytes = response.bytes().await.map_err(|e| {
            EnrollmentError::Transport(format!("Failed to read response: {e}"))
        })?;

        let body: Value = serde_json::from_slice(&bytes).map_err(|e| {
            warn!(%action, status_code, "Enrollment response is not JSON");
            EnrollmentError::Transport(format!(
                "Response body is not valid JSON (HTTP {status_code}): {e}"
            ))
        })?;

        let response = TaskResponse::new(status_code, body);

        if response.is_success() {
            debug!(%action, status_code, request_id = response.request_id(), "Enrollment response received");
        } else {
            warn!(
                %action,
                status_code,
                error_code = response.error_code(),
                error_message = response.error_message(),
                "Enrollment request returned non-success status"
            );
        }

        Ok(response)
    }
}

impl fmt::Debug for VoiceCloningClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceCloningClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl Drop for VoiceCloningClient {
    fn drop(&mut self) {
        self.api_key.zeroize();
    }
}
