//! Error types for the macro engine and scheduler.

use nexus_core::error::NexusError;

/// Errors from the schedule persistence collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Schedule store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Schedule store contents invalid: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from the schedule list.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("Invalid schedule time: {0}")]
    InvalidTime(String),
    #[error("Failed to persist schedules: {0}")]
    Persistence(#[from] StoreError),
}

impl From<StoreError> for NexusError {
    fn from(err: StoreError) -> Self {
        NexusError::Persistence(err.to_string())
    }
}

impl From<SchedulerError> for NexusError {
    fn from(err: SchedulerError) -> Self {
        NexusError::Scheduler(err.to_string())
    }
}
