pub mod config;
pub mod error;
pub mod events;
pub mod log;
pub mod types;

pub use config::NexusConfig;
pub use error::{NexusError, Result};
pub use events::{EventBus, NexusEvent};
pub use log::ActivityLog;
pub use types::*;
