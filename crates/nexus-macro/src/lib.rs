//! Local macro layer for Nexus.
//!
//! Classifies transcripts into intent tags, runs simulated macros and keeps
//! the time-of-day schedule list.

pub mod engine;
pub mod error;
pub mod intent;
pub mod scheduler;
pub mod store;
pub mod types;

pub use engine::MacroEngine;
pub use error::{SchedulerError, StoreError};
pub use intent::{extract_clock_time, IntentClassifier, IntentMatch, KeywordRule};
pub use scheduler::Scheduler;
pub use store::{JsonFileStore, MemoryStore, ScheduleStore};
pub use types::{IntentTag, MacroInvocation, ScheduleEntry};
