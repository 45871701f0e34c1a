//! Bounded status polling.
//!
//! [`VoiceCloningClient::query_status`] never waits. Callers that want to
//! block until a fresh voice is deployed use [`wait_until_ready`], which
//! queries on a fixed interval for a bounded number of attempts.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::client::VoiceCloningClient;
use super::config::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_POLL_MAX_ATTEMPTS};
use super::messages::{StatusQuery, StatusReport, VoiceStatus};
use crate::errors::{EnrollmentError, EnrollmentResult};

/// Polling cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Delay between two consecutive queries
    pub interval: Duration,
    /// Maximum number of queries
    pub max_attempts: u32,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_attempts: DEFAULT_POLL_MAX_ATTEMPTS,
        }
    }
}

/// How polling ended.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The voice reached `OK`
    Ready(StatusReport),
    /// The remote gave up on deploying the voice
    Undeployed(StatusReport),
    /// Attempts ran out before a terminal status was seen
    TimedOut {
        attempts: u32,
        last: Option<VoiceStatus>,
    },
}

impl PollOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Query `query` until the voice is usable, undeployed, or attempts run out.
///
/// Pending and unknown statuses keep polling. Transport errors are logged and
/// count as an attempt; the last one is returned only when no attempt
/// produced a response at all. Any other error is returned immediately.
pub async fn wait_until_ready(
    client: &VoiceCloningClient,
    query: &StatusQuery,
    options: PollOptions,
) -> EnrollmentResult<PollOutcome> {
    let mut last_status: Option<VoiceStatus> = None;
    let mut last_error: Option<EnrollmentError> = None;

    for attempt in 1..=options.max_attempts {
        match client.query_status(query.clone()).await {
            Ok(report) if report.status.is_usable() => {
                info!(voice_id = %query.voice_id, attempt, "Voice is ready");
                return Ok(PollOutcome::Ready(report));
            }
            Ok(report) if report.status.is_undeployed() => {
                warn!(voice_id = %query.voice_id, attempt, "Voice deployment failed");
                return Ok(PollOutcome::Undeployed(report));
            }
            Ok(report) => {
                debug!(
                    voice_id = %query.voice_id,
                    attempt,
                    max_attempts = options.max_attempts,
                    status = %report.status,
                    "Voice not ready yet"
                );
                last_status = Some(report.status);
            }
            Err(e) if !e.is_transport() => {
                warn!(voice_id = %query.voice_id, attempt, "Status query cannot be sent: {e}");
                return Err(e);
            }
            Err(e) => {
                warn!(voice_id = %query.voice_id, attempt, "Status query failed: {e}");
                last_error = Some(e);
            }
        }

        if attempt < options.max_attempts {
            tokio::time::sleep(options.interval).await;
        }
    }

    match (last_status, last_error) {
        (None, Some(e)) => Err(e),
        (last, _) => {
            warn!(
                voice_id = %query.voice_id,
                attempts = options.max_attempts,
                "Gave up waiting for voice deployment"
            );
            Ok(PollOutcome::TimedOut {
                attempts: options.max_attempts,
                last,
            })
        }
    }
}
