//! Core types for the macro engine.
//!
//! Defines intent tags, schedule entries and macro invocation records.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Fixed vocabulary of local macros a transcript can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentTag {
    #[serde(rename = "LOGIN_SEQUENCE")]
    Login,
    #[serde(rename = "HARVEST_SEQUENCE")]
    Harvest,
    #[serde(rename = "SEARCH_SEQUENCE")]
    Search,
    #[serde(rename = "ROTATE_SEQUENCE")]
    Rotate,
    #[serde(rename = "LOCKDOWN_SEQUENCE")]
    Lockdown,
    #[serde(rename = "RECORD_SEQUENCE")]
    Record,
    #[serde(rename = "VM_BRIDGE_SEQUENCE")]
    VmBridge,
    #[serde(rename = "DRAFT_SEQUENCE")]
    Draft,
    #[serde(rename = "SUMMARIZE_SEQUENCE")]
    Summarize,
    #[serde(rename = "SCHEDULE_SEQUENCE")]
    Schedule,
}

impl IntentTag {
    pub const ALL: [IntentTag; 10] = [
        IntentTag::Login,
        IntentTag::Harvest,
        IntentTag::Search,
        IntentTag::Rotate,
        IntentTag::Lockdown,
        IntentTag::Record,
        IntentTag::VmBridge,
        IntentTag::Draft,
        IntentTag::Summarize,
        IntentTag::Schedule,
    ];

    /// Wire name of the tag, e.g. `LOGIN_SEQUENCE`.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentTag::Login => "LOGIN_SEQUENCE",
            IntentTag::Harvest => "HARVEST_SEQUENCE",
            IntentTag::Search => "SEARCH_SEQUENCE",
            IntentTag::Rotate => "ROTATE_SEQUENCE",
            IntentTag::Lockdown => "LOCKDOWN_SEQUENCE",
            IntentTag::Record => "RECORD_SEQUENCE",
            IntentTag::VmBridge => "VM_BRIDGE_SEQUENCE",
            IntentTag::Draft => "DRAFT_SEQUENCE",
            IntentTag::Summarize => "SUMMARIZE_SEQUENCE",
            IntentTag::Schedule => "SCHEDULE_SEQUENCE",
        }
    }

    /// Spoken form: the first underscore becomes a space
    /// (`VM_BRIDGE_SEQUENCE` -> `VM BRIDGE_SEQUENCE`).
    pub fn spoken(&self) -> String {
        self.as_str().replacen('_', " ", 1)
    }
}

impl fmt::Display for IntentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IntentTag {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IntentTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| format!("Unknown intent tag: {}", s))
    }
}

// =============================================================================
// Domain Structs
// =============================================================================

/// A persisted (macro, time-of-day) pair, fired at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub macro_id: String,
    /// Zero-padded 24h `HH:MM`.
    pub time: String,
    pub active: bool,
}

impl ScheduleEntry {
    pub fn new(macro_id: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            macro_id: macro_id.into(),
            time: time.into(),
            active: true,
        }
    }
}

/// Ephemeral record of one simulated macro run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroInvocation {
    pub id: Uuid,
    pub macro_type: String,
}

impl MacroInvocation {
    pub fn new(macro_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            macro_type: macro_type.into(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_tag_display() {
        assert_eq!(IntentTag::Login.to_string(), "LOGIN_SEQUENCE");
        assert_eq!(IntentTag::VmBridge.to_string(), "VM_BRIDGE_SEQUENCE");
        assert_eq!(IntentTag::Schedule.to_string(), "SCHEDULE_SEQUENCE");
    }

    #[test]
    fn test_intent_tag_from_str() {
        for tag in IntentTag::ALL {
            assert_eq!(tag.as_str().parse::<IntentTag>().unwrap(), tag);
        }
        assert!("login_sequence".parse::<IntentTag>().is_err());
        assert!("".parse::<IntentTag>().is_err());
    }

    #[test]
    fn test_intent_tag_serde_matches_display() {
        for tag in IntentTag::ALL {
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{}\"", tag));
        }
    }

    #[test]
    fn test_spoken_replaces_first_underscore_only() {
        assert_eq!(IntentTag::Login.spoken(), "LOGIN SEQUENCE");
        assert_eq!(IntentTag::VmBridge.spoken(), "VM BRIDGE_SEQUENCE");
    }

    #[test]
    fn test_schedule_entry_json_shape() {
        let entry = ScheduleEntry::new("M1", "14:30");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"macroId": "M1", "time": "14:30", "active": true})
        );
    }

    #[test]
    fn test_macro_invocation_ids_are_unique() {
        let a = MacroInvocation::new("LOGIN_SEQUENCE");
        let b = MacroInvocation::new("LOGIN_SEQUENCE");
        assert_ne!(a.id, b.id);
        assert_eq!(a.macro_type, b.macro_type);
    }
}
