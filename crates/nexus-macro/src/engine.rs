//! Simulated macro execution.
//!
//! A macro run is a fixed-duration delay bracketed by two log lines. It
//! always succeeds. Session status is owned by the caller; the engine only
//! logs and publishes.

use std::time::Duration;

use nexus_core::{ActivityLog, EventBus, NexusEvent};

use crate::types::{IntentTag, MacroInvocation};

/// Runs local macros for the dispatcher and the scheduler.
#[derive(Debug, Clone)]
pub struct MacroEngine {
    execution_time: Duration,
    log: ActivityLog,
    events: EventBus,
}

impl MacroEngine {
    pub fn new(execution_time: Duration, log: ActivityLog, events: EventBus) -> Self {
        Self {
            execution_time,
            log,
            events,
        }
    }

    pub fn execution_time(&self) -> Duration {
        self.execution_time
    }

    /// Run the macro named `macro_type` to completion.
    pub async fn run(&self, macro_type: &str) -> MacroInvocation {
        let invocation = MacroInvocation::new(macro_type);
        tracing::debug!(id = %invocation.id, macro_type, "Macro run started");

        self.log
            .nexus(format!("Engine: Deploying {}...", invocation.macro_type));
        tokio::time::sleep(self.execution_time).await;
        self.log.info(format!(
            "Engine: {} finalized. System state: STABLE.",
            invocation.macro_type
        ));

        self.events.publish(NexusEvent::MacroExecuted {
            invocation_id: invocation.id,
            macro_type: invocation.macro_type.clone(),
        });
        invocation
    }

    /// Run the macro bound to an intent tag.
    pub async fn run_intent(&self, tag: IntentTag) -> MacroInvocation {
        self.run(tag.as_str()).await
    }
}
