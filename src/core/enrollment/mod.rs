//! DashScope voice-enrollment (CosyVoice voice cloning) client.
//!
//! This module submits voice-cloning tasks and reads back their deployment
//! status over the DashScope customization REST API.
//!
//! # Workflow
//!
//! 1. Upload a 10-20 second clean speech sample somewhere publicly reachable
//! 2. `submit` a [`CreationRequest`] pointing at that URL
//! 3. Read the new voice identifier from [`TaskResponse::voice_id`]
//! 4. Call `query_status` (or [`wait_until_ready`]) until the voice is
//!    [`VoiceStatus::Usable`]
//! 5. Use the voice identifier for synthesis with the target model
//!
//! # Wire Format
//!
//! ```json
//! {"model": "voice-enrollment",
//!  "input": {"action": "create_voice", "target_model": "cosyvoice-v3-plus",
//!            "prefix": "testvoice", "url": "https://...", "language_hints": ["zh"]}}
//! ```
//!
//! ```json
//! {"model": "voice-enrollment",
//!  "input": {"action": "query_voice", "voice_id": "cosyvoice-v3-plus-testvoice-..."}}
//! ```
//!
//! # Configuration
//!
//! ```bash
//! export DASHSCOPE_API_KEY="sk-..."
//! ```
//!
//! # References
//!
//! - [CosyVoice voice cloning](https://help.aliyun.com/zh/model-studio/developer-reference/cosyvoice-voice-cloning)

mod client;
pub mod config;
pub mod messages;
mod poll;

#[cfg(test)]
mod tests;

pub use client::VoiceCloningClient;
pub use config::{
    DASHSCOPE_CUSTOMIZATION_URL, DEFAULT_LANGUAGE_HINTS, DEFAULT_TARGET_MODEL, ENROLLMENT_MODEL,
    EnrollmentClientConfig, VoiceAction, sanitize_prefix,
};
pub use messages::{
    ClonedVoice, CreationRequest, DeleteRequest, EnrollmentInput, EnrollmentRequest, ListQuery,
    StatusQuery, StatusReport, TaskResponse, VoiceStatus,
};
pub use poll::{PollOptions, PollOutcome, wait_until_ready};
