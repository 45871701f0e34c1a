//! Message types for the voice-enrollment API.
//!
//! This module contains:
//! - Caller-facing request values (`CreationRequest`, `StatusQuery`, ...)
//! - The wire body (`EnrollmentRequest`) with the exact field order the
//!   service documents
//! - The opaque `TaskResponse` and the `VoiceStatus` classification

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::{DEFAULT_LANGUAGE_HINTS, DEFAULT_TARGET_MODEL, ENROLLMENT_MODEL, VoiceAction};

/// Default page size for `list_voice`.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Remote status value for a voice that finished deploying.
pub const STATUS_OK: &str = "OK";

/// Remote status value for a voice that is still deploying.
pub const STATUS_DEPLOYING: &str = "DEPLOYING";

/// Remote status value for a voice whose deployment failed.
pub const STATUS_UNDEPLOYED: &str = "UNDEPLOYED";

// =============================================================================
// Caller-facing Requests
// =============================================================================

/// Request to derive a cloned voice from a remote audio sample.
///
/// Every field is sent exactly as given: no trimming, sanitizing or encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationRequest {
    /// Speech-synthesis model the cloned voice will be usable with
    pub target_model: String,
    /// Naming prefix for the generated voice identifier
    pub prefix: String,
    /// Publicly reachable URL of the sample recording
    pub url: String,
    /// Language hint codes, in order
    pub language_hints: Vec<String>,
}

impl CreationRequest {
    /// Creates a request for the default target model and language hints.
    pub fn new(prefix: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            target_model: DEFAULT_TARGET_MODEL.to_string(),
            prefix: prefix.into(),
            url: url.into(),
            language_hints: DEFAULT_LANGUAGE_HINTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Sets the target model.
    pub fn with_target_model(mut self, target_model: impl Into<String>) -> Self {
        self.target_model = target_model.into();
        self
    }

    /// Replaces the language hints.
    pub fn with_language_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.language_hints = hints.into_iter().map(Into::into).collect();
        self
    }
}

/// Status lookup for a voice returned by a prior creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusQuery {
    pub voice_id: String,
}

impl StatusQuery {
    pub fn new(voice_id: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
        }
    }
}

/// Page request for the account's cloned voices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Only list voices created with this prefix
    pub prefix: Option<String>,
    /// Zero-based page index
    pub page_index: u32,
    /// Number of voices per page
    pub page_size: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            prefix: None,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Request to remove a cloned voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub voice_id: String,
}

impl DeleteRequest {
    pub fn new(voice_id: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
        }
    }
}

// =============================================================================
// Wire Body
// =============================================================================

/// JSON body posted to the customization endpoint.
///
/// Serializes as `{"model": "voice-enrollment", "input": {"action": ..., ...}}`
/// with `input` fields in declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentRequest<'a> {
    pub model: &'static str,
    pub input: EnrollmentInput<'a>,
}

/// The `input` object, tagged by `action`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EnrollmentInput<'a> {
    CreateVoice {
        target_model: &'a str,
        prefix: &'a str,
        url: &'a str,
        language_hints: &'a [String],
    },
    QueryVoice {
        voice_id: &'a str,
    },
    ListVoice {
        #[serde(skip_serializing_if = "Option::is_none")]
        prefix: Option<&'a str>,
        page_index: u32,
        page_size: u32,
    },
    DeleteVoice {
        voice_id: &'a str,
    },
}

impl EnrollmentInput<'_> {
    /// The action discriminator this input serializes with.
    pub fn action(&self) -> VoiceAction {
        match self {
            Self::CreateVoice { .. } => VoiceAction::CreateVoice,
            Self::QueryVoice { .. } => VoiceAction::QueryVoice,
            Self::ListVoice { .. } => VoiceAction::ListVoice,
            Self::DeleteVoice { .. } => VoiceAction::DeleteVoice,
        }
    }
}

impl<'a> EnrollmentRequest<'a> {
    fn with_input(input: EnrollmentInput<'a>) -> Self {
        Self {
            model: ENROLLMENT_MODEL,
            input,
        }
    }

    /// Body for `create_voice`.
    pub fn create(request: &'a CreationRequest) -> Self {
        Self::with_input(EnrollmentInput::CreateVoice {
            target_model: &request.target_model,
            prefix: &request.prefix,
            url: &request.url,
            language_hints: &request.language_hints,
        })
    }

    /// Body for `query_voice`.
    pub fn query(query: &'a StatusQuery) -> Self {
        Self::with_input(EnrollmentInput::QueryVoice {
            voice_id: &query.voice_id,
        })
    }

    /// Body for `list_voice`.
    pub fn list(query: &'a ListQuery) -> Self {
        Self::with_input(EnrollmentInput::ListVoice {
            prefix: query.prefix.as_deref(),
            page_index: query.page_index,
            page_size: query.page_size,
        })
    }

    /// Body for `delete_voice`.
    pub fn delete(request: &'a DeleteRequest) -> Self {
        Self::with_input(EnrollmentInput::DeleteVoice {
            voice_id: &request.voice_id,
        })
    }

    /// The action discriminator of this body.
    pub fn action(&self) -> VoiceAction {
        self.input.action()
    }
}

// =============================================================================
// Response
// =============================================================================

/// Raw outcome of one enrollment call: HTTP status plus decoded JSON body.
///
/// No schema is enforced. The accessors read well-known fields and return
/// `None` when they are missing or of another type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub status_code: u16,
    pub body: Value,
}

impl TaskResponse {
    pub fn new(status_code: u16, body: Value) -> Self {
        Self { status_code, body }
    }

    /// Whether the HTTP status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    fn output_str(&self, field: &str) -> Option<&str> {
        self.body.get("output")?.get(field)?.as_str()
    }

    /// `output.status`, if present and a string.
    pub fn output_status(&self) -> Option<&str> {
        self.output_str("status")
    }

    /// `output.voice_id`, set by a successful `create_voice`.
    pub fn voice_id(&self) -> Option<&str> {
        self.output_str("voice_id")
    }

    /// Top-level `request_id` assigned by the service.
    pub fn request_id(&self) -> Option<&str> {
        self.body.get("request_id")?.as_str()
    }

    /// Top-level error `code`. An empty code or `Success` is not an error.
    pub fn error_code(&self) -> Option<&str> {
        self.body
            .get("code")?
            .as_str()
            .filter(|code| !code.is_empty() && *code != "Success")
    }

    /// Top-level error `message`, reported only alongside an error code.
    pub fn error_message(&self) -> Option<&str> {
        self.error_code()?;
        self.body.get("message")?.as_str()
    }

    /// Entries of `output.voices` from a `list_voice` response.
    pub fn voices(&self) -> Vec<ClonedVoice> {
        self.body
            .get("output")
            .and_then(|output| output.get("voices"))
            .and_then(Value::as_array)
            .map(|voices| {
                voices
                    .iter()
                    .filter_map(|v| serde_json::from_value(v.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Pretty-printed body for display.
    pub fn pretty_body(&self) -> String {
        serde_json::to_string_pretty(&self.body).unwrap_or_else(|_| self.body.to_string())
    }
}

/// One entry of a `list_voice` response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClonedVoice {
    pub voice_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, rename = "gmt_create")]
    pub created_at: String,
}

// =============================================================================
// Status Classification
// =============================================================================

/// Deployment status of a cloned voice.
///
/// Only `OK` and `DEPLOYING` are interpreted. Anything else, including a
/// missing field, is carried through as `Unknown` so new remote values never
/// break callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoiceStatus {
    /// Deployment finished, the voice can be used for synthesis
    Usable,
    /// Deployment in progress, query again later
    Pending,
    /// Unrecognised or absent status value
    Unknown(Option<String>),
}

impl VoiceStatus {
    /// Classify a raw `output.status` value. Total and deterministic.
    pub fn classify(raw: Option<&str>) -> Self {
        match raw {
            Some(STATUS_OK) => Self::Usable,
            Some(STATUS_DEPLOYING) => Self::Pending,
            other => Self::Unknown(other.map(str::to_string)),
        }
    }

    /// Classify the status carried by a response.
    pub fn from_response(response: &TaskResponse) -> Self {
        Self::classify(response.output_status())
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Usable)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the remote reported the terminal `UNDEPLOYED` value.
    pub fn is_undeployed(&self) -> bool {
        matches!(self, Self::Unknown(Some(raw)) if raw == STATUS_UNDEPLOYED)
    }

    /// The raw remote value this status was classified from.
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Usable => Some(STATUS_OK),
            Self::Pending => Some(STATUS_DEPLOYING),
            Self::Unknown(raw) => raw.as_deref(),
        }
    }
}

impl fmt::Display for VoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usable => write!(f, "OK - ready to use"),
            Self::Pending => write!(f, "DEPLOYING - wait a few minutes and retry"),
            Self::Unknown(Some(raw)) => write!(f, "{raw}"),
            Self::Unknown(None) => write!(f, "absent"),
        }
    }
}

/// A status query's raw response together with its classification.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub response: TaskResponse,
    pub status: VoiceStatus,
}

impl From<TaskResponse> for StatusReport {
    fn from(response: TaskResponse) -> Self {
        let status = VoiceStatus::from_response(&response);
        Self { response, status }
    }
}
