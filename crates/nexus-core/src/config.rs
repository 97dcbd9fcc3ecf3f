use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{NexusError, Result};

/// Wake phrases accepted before any command processing, checked in order.
pub const DEFAULT_WAKE_PHRASES: [&str; 7] = [
    "nexus core",
    "nexus",
    "hey nexus",
    "hi nexus",
    "wake nexus",
    "ok nexus",
    "hey nexus core",
];

/// Top-level configuration for the Nexus assistant.
///
/// Loaded from `~/.nexus/config.toml` by default. Each section corresponds
/// to one crate of the workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NexusConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub dispatcher: DispatcherConfig,
    #[serde(default)]
    pub macros: MacroConfig,
    #[serde(default)]
    pub persona: PersonaConfig,
}

impl NexusConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: NexusConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| NexusError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Absolute path of the schedule list, with `~` in `data_dir` expanded.
    pub fn schedule_path(&self) -> PathBuf {
        expand_home(&self.general.data_dir).join(&self.macros.schedule_file)
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory for the schedule list.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.nexus/data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Speech input/output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Wake phrases, matched as lower-case substrings in declaration order.
    pub wake_phrases: Vec<String>,
    /// Delay before restarting speech input after an engine error.
    pub restart_delay_ms: u64,
    /// Spoken when the session is activated.
    pub greeting: String,
    /// Spoken when the session is deactivated.
    pub farewell: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            wake_phrases: DEFAULT_WAKE_PHRASES.iter().map(|p| p.to_string()).collect(),
            restart_delay_ms: 1000,
            greeting: "Nexus Core Online. I am listening.".to_string(),
            farewell: "Nexus Core entering standby.".to_string(),
        }
    }
}

/// Voice command dispatcher timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Upper bound on a single remote generation call.
    pub remote_timeout_secs: u64,
    /// Delay after a remote reply before returning to Listening or Idle.
    pub reply_settle_ms: u64,
    /// Delay before the anomaly payload completion is logged.
    pub alert_report_delay_ms: u64,
    /// Automatically clear an alert after this many seconds (0 = never).
    pub alert_clear_secs: u64,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            remote_timeout_secs: 30,
            reply_settle_ms: 3000,
            alert_report_delay_ms: 1500,
            alert_clear_secs: 0,
        }
    }
}

/// Macro engine and scheduler settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroConfig {
    /// Simulated duration of one macro execution.
    pub execution_ms: u64,
    /// Polling cadence of the schedule check.
    pub schedule_check_secs: u64,
    /// File name of the persisted schedule list, relative to `data_dir`.
    pub schedule_file: String,
}

impl Default for MacroConfig {
    fn default() -> Self {
        Self {
            execution_ms: 1500,
            schedule_check_secs: 60,
            schedule_file: "schedules.json".to_string(),
        }
    }
}

/// Persona handed to the remote generation provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    pub name: String,
    /// Model label handed to the generator with the persona.
    pub model: String,
    pub system_instruction: String,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: "Nexus Core".to_string(),
            model: "default".to_string(),
            system_instruction: "You are Nexus Core, a local-first macro automation core. \
                You are the user's voice and hands. Speak authoritatively but warmly. \
                Never ask the user to type or click."
                .to_string(),
        }
    }
}
