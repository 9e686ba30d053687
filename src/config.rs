//! Configuration for tierlog

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// Default config file looked up by the binary
pub const DEFAULT_CONFIG_FILE: &str = "tierlog.toml";

/// Settings applied to every logger a registry builds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory the `<name>.log` files are created in (default: current directory)
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Console threshold for new loggers (default: INFO)
    #[serde(default = "default_console_level")]
    pub console_level: Severity,

    /// Lowest severity a new logger considers at all (default: NOTSET)
    #[serde(default = "default_gate")]
    pub gate: Severity,

    /// Attach the `<name>.fitsFormat.log` sink to new loggers
    #[serde(default)]
    pub machine_sink: bool,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_console_level() -> Severity {
    Severity::Info
}

fn default_gate() -> Severity {
    Severity::NotSet
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            console_level: default_console_level(),
            gate: default_gate(),
            machine_sink: false,
        }
    }
}

impl LoggingConfig {
    /// Config that writes log files into `log_dir`
    pub fn with_log_dir(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from file, or return default if not found
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.log_dir, PathBuf::from("."));
        assert_eq!(config.console_level, Severity::Info);
        assert_eq!(config.gate, Severity::NotSet);
        assert!(!config.machine_sink);
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = LoggingConfig::load(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, LoggingConfig::default());
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "console_level = \"primwarning\"\nmachine_sink = true\n").unwrap();

        let config = LoggingConfig::load(&path).unwrap();
        assert_eq!(config.console_level, Severity::PrimWarning);
        assert!(config.machine_sink);
        assert_eq!(config.gate, Severity::NotSet);
    }

    #[test]
    fn test_load_rejects_unknown_level() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "console_level = \"CHATTY\"\n").unwrap();

        let err = LoggingConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("CHATTY"));
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);

        let mut config = LoggingConfig::with_log_dir("/var/log/pipeline");
        config.gate = Severity::Summary;
        config.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("gate = \"SUMMARY\""));

        let parsed = LoggingConfig::load(&path).unwrap();
        assert_eq!(parsed, config);
    }
}
