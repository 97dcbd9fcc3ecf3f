//! CLI argument definitions for the `nexus` console.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use nexus_core::NexusConfig;
use std::path::PathBuf;

/// Nexus: a hands-free voice command console.
///
/// Each line on stdin is one finalized transcript. Lines starting with `:`
/// are console commands (`:start`, `:stop`, `:anomaly`, `:clear`, `:audit`,
/// `:status`, `:log`, `:quit`).
#[derive(Parser, Debug)]
#[command(name = "nexus", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Data directory for the schedule list.
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Start asleep instead of engaging the listener with a greeting.
    #[arg(long = "no-greeting")]
    pub no_greeting: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > NEXUS_CONFIG env var > ~/.nexus/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("NEXUS_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Overlay flag values onto a loaded configuration.
    pub fn apply_overrides(&self, config: &mut NexusConfig) {
        if let Some(ref dir) = self.data_dir {
            config.general.data_dir = dir.to_string_lossy().to_string();
        }
        if let Some(ref level) = self.log_level {
            config.general.log_level = level.clone();
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".nexus").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".nexus").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_flag_wins() {
        let args = CliArgs::parse_from(["nexus", "--config", "/tmp/nexus.toml"]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/nexus.toml"));
    }

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["nexus"]);
        assert!(args.config.is_none());
        assert!(args.data_dir.is_none());
        assert!(!args.no_greeting);
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let args = CliArgs::parse_from([
            "nexus",
            "-d",
            "/var/lib/nexus",
            "--log-level",
            "debug",
            "--no-greeting",
        ]);
        let mut config = NexusConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.general.data_dir, "/var/lib/nexus");
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(
            config.schedule_path(),
            PathBuf::from("/var/lib/nexus/schedules.json")
        );
        assert!(args.no_greeting);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let args = CliArgs::parse_from(["nexus"]);
        let mut config = NexusConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.general.data_dir, "~/.nexus/data");
        assert_eq!(config.general.log_level, "info");
    }
}
