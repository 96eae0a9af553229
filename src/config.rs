//! Configuration types for the tracker host.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Reminder polling settings.
    pub scheduler: SchedulerConfig,
    /// Activation gate settings.
    pub activation: ActivationConfig,
    /// Durable storage settings.
    pub storage: StorageConfig,
    /// Notification sink selection.
    pub notifications: NotificationConfig,
    /// Log filter settings.
    pub logging: LoggingConfig,
}

/// Reminder polling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds between reminder ticks.
    ///
    /// Must stay below 60 so no minute boundary is ever skipped.
    pub tick_interval_secs: u64,
    /// Seconds between re-reads of storage by `munjiz run`, so changes made
    /// by other commands reach the running scheduler.
    pub reload_interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 10,
            reload_interval_secs: 2,
        }
    }
}

impl SchedulerConfig {
    /// Tick interval clamped to `1..=59` seconds.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs.clamp(1, 59))
    }

    /// Storage reload interval, at least one second.
    #[must_use]
    pub fn reload_interval(&self) -> Duration {
        Duration::from_secs(self.reload_interval_secs.max(1))
    }
}

/// Activation gate configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationConfig {
    /// Shared code compared verbatim against user input.
    pub code: String,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            code: "Ramadan".to_owned(),
        }
    }
}

/// Durable storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for stored keys (None = [`crate::munjiz_dirs::store_dir`]).
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the effective storage directory.
    #[must_use]
    pub fn resolved_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(crate::munjiz_dirs::store_dir)
    }
}

/// Which notification sink to deliver reminders through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifierBackend {
    /// Native desktop notifications.
    #[default]
    Desktop,
    /// Write reminders to the log only.
    Log,
}

/// Notification sink configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Selected sink.
    pub backend: NotifierBackend,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "munjiz=info".to_owned(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::MunjizError::Config(e.to_string()))
    }

    /// Load from `path` when it exists, otherwise return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_or_default(path: &std::path::Path) -> crate::error::Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::MunjizError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> PathBuf {
        crate::munjiz_dirs::config_file()
    }
}
