pub mod enrollment;

// Re-export commonly used types for convenience
pub use enrollment::{
    CreationRequest, DeleteRequest, EnrollmentClientConfig, ListQuery, PollOptions, PollOutcome,
    StatusQuery, StatusReport, TaskResponse, VoiceCloningClient, VoiceStatus, wait_until_ready,
};
