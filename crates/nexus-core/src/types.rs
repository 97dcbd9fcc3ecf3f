use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Enums
// =============================================================================

/// Single current state of the voice-driven session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// Resting state; no command in flight.
    #[default]
    Idle,
    /// Session active, waiting for a wake phrase.
    Listening,
    /// Wake phrase confirmed, intent not yet resolved.
    Thinking,
    /// A local macro or remote reply is being acted on.
    Executing,
    /// Anomaly raised outside the voice flow.
    Alert,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Idle => write!(f, "IDLE"),
            SessionStatus::Listening => write!(f, "LISTENING"),
            SessionStatus::Thinking => write!(f, "THINKING"),
            SessionStatus::Executing => write!(f, "EXECUTING"),
            SessionStatus::Alert => write!(f, "ALERT"),
        }
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IDLE" => Ok(SessionStatus::Idle),
            "LISTENING" => Ok(SessionStatus::Listening),
            "THINKING" => Ok(SessionStatus::Thinking),
            "EXECUTING" => Ok(SessionStatus::Executing),
            "ALERT" => Ok(SessionStatus::Alert),
            _ => Err(format!("Unknown session status: {}", s)),
        }
    }
}

/// Severity tag attached to every activity log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogSeverity {
    Info,
    Warn,
    Error,
    /// Assistant-voiced events (wake confirmations, triggers, replies).
    Nexus,
}

impl fmt::Display for LogSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSeverity::Info => write!(f, "info"),
            LogSeverity::Warn => write!(f, "warn"),
            LogSeverity::Error => write!(f, "error"),
            LogSeverity::Nexus => write!(f, "nexus"),
        }
    }
}

// =============================================================================
// Structs
// =============================================================================

/// One line of the activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: DateTime<Local>,
    pub message: String,
    pub severity: LogSeverity,
}

impl LogEntry {
    pub fn new(message: impl Into<String>, severity: LogSeverity) -> Self {
        Self {
            time: Local::now(),
            message: message.into(),
            severity,
        }
    }
}
