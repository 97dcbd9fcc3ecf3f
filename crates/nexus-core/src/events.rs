use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::types::SessionStatus;

/// Default buffer size of the event channel.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Domain events emitted by the dispatcher and scheduler.
///
/// Consumed by the console and by tests that need to observe the exact
/// sequence of status transitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum NexusEvent {
    /// The session status changed.
    StatusChanged {
        from: SessionStatus,
        to: SessionStatus,
    },

    /// A wake phrase was found in a transcript.
    WakePhraseDetected { phrase: String },

    /// A local macro finished its simulated run.
    MacroExecuted { invocation_id: Uuid, macro_type: String },

    /// A schedule entry was stored.
    ScheduleSaved { macro_id: String, time: String },

    /// A schedule entry fired and was deactivated.
    ScheduleTriggered { macro_id: String, time: String },
}

/// Broadcast fan-out for `NexusEvent`s.
///
/// Publishing never fails: events sent while nobody is subscribed are dropped.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<NexusEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn publish(&self, event: NexusEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NexusEvent> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(NexusEvent::WakePhraseDetected {
            phrase: "nexus".to_string(),
        });
    }

    #[test]
    fn test_subscriber_receives_in_order() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish(NexusEvent::StatusChanged {
            from: SessionStatus::Idle,
            to: SessionStatus::Listening,
        });
        bus.publish(NexusEvent::ScheduleSaved {
            macro_id: "M1".to_string(),
            time: "14:30".to_string(),
        });

        assert_eq!(
            rx.try_recv().unwrap(),
            NexusEvent::StatusChanged {
                from: SessionStatus::Idle,
                to: SessionStatus::Listening,
            }
        );
        assert!(matches!(
            rx.try_recv().unwrap(),
            NexusEvent::ScheduleSaved { .. }
        ));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_clones_share_channel() {
        let bus = EventBus::new();
        let clone = bus.clone();
        let mut rx = bus.subscribe();
        clone.publish(NexusEvent::ScheduleTriggered {
            macro_id: "M1".to_string(),
            time: "09:15".to_string(),
        });
        assert!(rx.try_recv().is_ok());
    }
}
