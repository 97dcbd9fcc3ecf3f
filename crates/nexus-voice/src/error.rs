//! Error types for the voice session.

use nexus_core::error::NexusError;
use nexus_core::SessionStatus;

/// Errors from the voice session and its speech collaborators.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("Invalid status transition: {0} -> {1}")]
    InvalidTransition(SessionStatus, SessionStatus),
    #[error("Speech input error: {0}")]
    Input(String),
    #[error("Speech output error: {0}")]
    Output(String),
}

/// Errors from the remote generation collaborator.
///
/// The dispatcher always turns these into a local fallback reply.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation provider unavailable")]
    Unavailable,
    #[error("generation request failed: {0}")]
    Request(String),
    #[error("generation timed out after {0}s")]
    Timeout(u64),
    #[error("generation returned no content")]
    Empty,
}

impl From<VoiceError> for NexusError {
    fn from(err: VoiceError) -> Self {
        NexusError::Voice(err.to_string())
    }
}

impl From<GenerationError> for NexusError {
    fn from(err: GenerationError) -> Self {
        NexusError::Generation(err.to_string())
    }
}
