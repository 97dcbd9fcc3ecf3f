//! Session status state machine with thread-safe transitions.
//!
//! Valid transitions:
//! - any -> Idle, Listening or Alert (stop, resume, anomaly)
//! - Idle / Listening / Executing / Alert -> Thinking (wake phrase confirmed)
//! - Idle / Listening / Thinking -> Executing (intent resolved, direct run)
//!
//! An active alert must be cleared or interrupted by a wake phrase before
//! anything executes.
//!
//! Transitioning to the current status is a no-op and publishes nothing.

use std::sync::{Arc, Mutex, MutexGuard};

use nexus_core::{EventBus, NexusEvent, SessionStatus};

use crate::error::VoiceError;

/// Returns whether a transition from `from` to `to` is valid.
pub fn can_transition(from: SessionStatus, to: SessionStatus) -> bool {
    use SessionStatus::*;
    from == to
        || matches!(
            (from, to),
            (_, Idle)
                | (_, Listening)
                | (_, Alert)
                | (Idle | Listening | Executing | Alert, Thinking)
                | (Idle | Listening | Thinking, Executing)
        )
}

/// Shared session status.
///
/// Clones observe the same status. Only this crate can move it; everything
/// else reads it or subscribes to `StatusChanged` events.
#[derive(Debug, Clone)]
pub struct StateMachine {
    status: Arc<Mutex<SessionStatus>>,
    events: EventBus,
}

impl StateMachine {
    /// Create a state machine in `Idle`.
    pub fn new(events: EventBus) -> Self {
        Self {
            status: Arc::new(Mutex::new(SessionStatus::Idle)),
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionStatus> {
        match self.status.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn current(&self) -> SessionStatus {
        *self.lock()
    }

    /// Move to `target`. Returns whether the status actually changed.
    pub(crate) fn transition(&self, target: SessionStatus) -> Result<bool, VoiceError> {
        self.apply(|_| true, target)
    }

    /// Move to `target` only if the current status is `expected`.
    pub(crate) fn transition_from(
        &self,
        expected: SessionStatus,
        target: SessionStatus,
    ) -> Result<bool, VoiceError> {
        self.apply(|from| from == expected, target)
    }

    /// Move to `target` only if the current status is one of `expected`.
    pub(crate) fn transition_from_any(
        &self,
        expected: &[SessionStatus],
        target: SessionStatus,
    ) -> Result<bool, VoiceError> {
        self.apply(|from| expected.contains(&from), target)
    }

    fn apply(
        &self,
        accepts: impl FnOnce(SessionStatus) -> bool,
        target: SessionStatus,
    ) -> Result<bool, VoiceError> {
        let mut status = self.lock();
        let from = *status;
        if from == target || !accepts(from) {
            return Ok(false);
        }
        if !can_transition(from, target) {
            return Err(VoiceError::InvalidTransition(from, target));
        }

        *status = target;
        drop(status);

        tracing::debug!(%from, to = %target, "Session status changed");
        self.events
            .publish(NexusEvent::StatusChanged { from, to: target });
        Ok(true)
    }
}

// =============================================================================
// Tests
// =============================================================================
