//! Time-of-day schedule list with a polling check.
//!
//! Entries fire when their `HH:MM` equals the current wall-clock minute at
//! the moment of a check. A fired entry is deactivated, never deleted, so it
//! fires at most once. Minutes during which no check runs are not caught up.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{Local, Timelike};
use nexus_core::{ActivityLog, EventBus, NexusEvent};
use tokio::sync::Notify;

use crate::error::SchedulerError;
use crate::intent::time_parser::{format_clock, parse_clock_time};
use crate::store::ScheduleStore;
use crate::types::ScheduleEntry;

/// Schedule list backed by a [`ScheduleStore`].
pub struct Scheduler {
    entries: Mutex<Vec<ScheduleEntry>>,
    store: Arc<dyn ScheduleStore>,
    log: ActivityLog,
    events: EventBus,
    shutdown: Arc<Notify>,
}

impl Scheduler {
    /// Create a scheduler, loading the persisted list once.
    ///
    /// A store that cannot be read leaves the list empty.
    pub fn new(store: Arc<dyn ScheduleStore>, log: ActivityLog, events: EventBus) -> Self {
        let entries = match store.load() {
            Ok(entries) => {
                tracing::debug!(count = entries.len(), "Schedules loaded");
                entries
            }
            Err(e) => {
                log.warn(format!(
                    "Scheduler: stored schedules unreadable ({}). Starting empty.",
                    e
                ));
                Vec::new()
            }
        };

        Self {
            entries: Mutex::new(entries),
            store,
            log,
            events,
            shutdown: Arc::new(Notify::new()),
        }
    }

    fn lock_entries(&self) -> MutexGuard<'_, Vec<ScheduleEntry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Append an active entry and persist the full list.
    ///
    /// `time` may be `H:MM` or `HH:MM`; it is stored zero-padded. When the
    /// store write fails the entry stays in memory and the error is returned.
    pub fn save_schedule(&self, macro_id: &str, time: &str) -> Result<ScheduleEntry, SchedulerError> {
        let time = parse_clock_time(time).ok_or_else(|| SchedulerError::InvalidTime(time.to_string()))?;
        let entry = ScheduleEntry::new(macro_id, time);

        let snapshot = {
            let mut entries = self.lock_entries();
            entries.push(entry.clone());
            entries.clone()
        };

        self.log.info(format!(
            "Scheduler: Macro [{}] scheduled for {}.",
            entry.macro_id, entry.time
        ));
        self.events.publish(NexusEvent::ScheduleSaved {
            macro_id: entry.macro_id.clone(),
            time: entry.time.clone(),
        });

        self.store.save(&snapshot)?;
        Ok(entry)
    }

    /// Fire every active entry whose time equals the minute of `now`.
    ///
    /// Entries are visited in list order. Returns the entries that fired.
    pub fn check_schedules<T: Timelike>(&self, now: &T) -> Vec<ScheduleEntry> {
        let current = format_clock(now);

        let (fired, snapshot) = {
            let mut entries = self.lock_entries();
            let mut fired = Vec::new();
            for entry in entries.iter_mut() {
                if entry.active && entry.time == current {
                    entry.active = false;
                    fired.push(entry.clone());
                }
            }
            (fired, entries.clone())
        };

        for entry in &fired {
            self.log.nexus(format!(
                "Scheduler: Triggering scheduled macro [{}]",
                entry.macro_id
            ));
            self.events.publish(NexusEvent::ScheduleTriggered {
                macro_id: entry.macro_id.clone(),
                time: entry.time.clone(),
            });
        }

        if !fired.is_empty() {
            if let Err(e) = self.store.save(&snapshot) {
                self.log
                    .warn(format!("Scheduler: failed to persist fired schedules: {}", e));
            }
        }

        fired
    }

    /// Copy of the current list.
    pub fn entries(&self) -> Vec<ScheduleEntry> {
        self.lock_entries().clone()
    }

    /// Number of entries that have not fired yet.
    pub fn active_count(&self) -> usize {
        self.lock_entries().iter().filter(|e| e.active).count()
    }

    /// Description of the backing store.
    pub fn store_description(&self) -> String {
        self.store.describe()
    }

    /// Poll the list against the local clock every `period` until shutdown.
    pub async fn run(&self, period: Duration) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        tracing::info!(period_secs = period.as_secs(), "Schedule check loop started");

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.notified() => {
                    tracing::info!("Schedule check loop stopped");
                    return;
                }
                _ = interval.tick() => {
                    let fired = self.check_schedules(&Local::now());
                    if !fired.is_empty() {
                        tracing::debug!(count = fired.len(), "Schedules fired");
                    }
                }
            }
        }
    }

    /// Signal [`run`](Self::run) to return.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }
}
