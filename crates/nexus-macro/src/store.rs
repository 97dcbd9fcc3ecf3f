//! Persistence collaborator for the schedule list.
//!
//! The whole list is loaded once at startup and rewritten on every change.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StoreError;
use crate::types::ScheduleEntry;

/// Key-value style storage for the schedule list.
pub trait ScheduleStore: Send + Sync {
    /// Read the stored list. A store with nothing saved yet returns an empty list.
    fn load(&self) -> Result<Vec<ScheduleEntry>, StoreError>;

    /// Replace the stored list.
    fn save(&self, entries: &[ScheduleEntry]) -> Result<(), StoreError>;

    /// Short description used in audit output.
    fn describe(&self) -> String;
}

/// Stores the list as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScheduleStore for JsonFileStore {
    fn load(&self) -> Result<Vec<ScheduleEntry>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, entries: &[ScheduleEntry]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        tracing::debug!(path = %self.path.display(), count = entries.len(), "Schedules written");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// In-memory store, used by tests and when persistence is disabled.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<ScheduleEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `entries`.
    pub fn with_entries(entries: Vec<ScheduleEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl ScheduleStore for MemoryStore {
    fn load(&self) -> Result<Vec<ScheduleEntry>, StoreError> {
        Ok(match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        })
    }

    fn save(&self, entries: &[ScheduleEntry]) -> Result<(), StoreError> {
        let mut guard = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = entries.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("schedules.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("schedules.json"));

        let mut fired = ScheduleEntry::new("M2", "08:00");
        fired.active = false;
        let entries = vec![ScheduleEntry::new("M1", "14:30"), fired];
        store.save(&entries).unwrap();

        assert_eq!(store.load().unwrap(), entries);
    }

    #[test]
    fn test_file_store_reads_camel_case_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedules.json");
        std::fs::write(
            &path,
            r#"[{"macroId":"VOICE_MACRO","time":"09:15","active":true}]"#,
        )
        .unwrap();

        let entries = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(entries, vec![ScheduleEntry::new("VOICE_MACRO", "09:15")]);
    }

    #[test]
    fn test_file_store_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedules.json");
        std::fs::write(&path, "{ not a list").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn test_file_store_blank_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedules.json");
        std::fs::write(&path, "  \n").unwrap();
        assert!(JsonFileStore::new(&path).load().unwrap().is_empty());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::with_entries(vec![ScheduleEntry::new("A", "01:00")]);
        assert_eq!(store.load().unwrap().len(), 1);
        store.save(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.describe(), "memory");
    }
}
