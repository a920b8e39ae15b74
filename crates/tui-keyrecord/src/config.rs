//! Recorder configuration.

use crate::error::{RecordError, RecordResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default idle timeout between combos, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Construction-time recorder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Idle time after the last combo before the sequence is delivered.
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
    /// Suppress the default action of recorded keydown events.
    #[serde(default)]
    pub prevent_default: bool,
    /// Ignore auto-repeated keydown events.
    #[serde(default)]
    pub no_repeat: bool,
    /// Treat zero/false per-call overrides as absent.
    #[serde(default)]
    pub legacy_falsy_overrides: bool,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            prevent_default: false,
            no_repeat: false,
            legacy_falsy_overrides: false,
        }
    }
}

impl RecorderConfig {
    /// Set the idle timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set default-action suppression.
    pub fn with_prevent_default(mut self, prevent_default: bool) -> Self {
        self.prevent_default = prevent_default;
        self
    }

    /// Set auto-repeat filtering.
    pub fn with_no_repeat(mut self, no_repeat: bool) -> Self {
        self.no_repeat = no_repeat;
        self
    }

    /// Get the idle timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from file.
    pub fn load(path: &Path) -> RecordResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from default location.
    pub fn load_default() -> RecordResult<Self> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::load(&path);
            }
        }
        Ok(Self::default())
    }

    /// Get default config path.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "tui-keyrecord")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> RecordResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| RecordError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Per-call overrides passed when starting a recording.
///
/// Unset fields fall back to the [`RecorderConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordOptions {
    /// Idle timeout override in milliseconds
    pub timeout_ms: Option<u64>,
    /// Default-action suppression override
    pub prevent_default: Option<bool>,
    /// Auto-repeat filtering override
    pub no_repeat: Option<bool>,
}

impl RecordOptions {
    /// Create options with nothing overridden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the idle timeout.
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Override default-action suppression.
    pub fn prevent_default(mut self, prevent_default: bool) -> Self {
        self.prevent_default = Some(prevent_default);
        self
    }

    /// Override auto-repeat filtering.
    pub fn no_repeat(mut self, no_repeat: bool) -> Self {
        self.no_repeat = Some(no_repeat);
        self
    }

    /// Merge with the configuration into effective session settings.
    pub fn resolve(&self, config: &RecorderConfig) -> SessionSettings {
        let legacy = config.legacy_falsy_overrides;

        let timeout_ms = self
            .timeout_ms
            .filter(|&ms| !legacy || ms != 0)
            .unwrap_or(config.timeout_ms);
        let prevent_default = self
            .prevent_default
            .filter(|&flag| !legacy || flag)
            .unwrap_or(config.prevent_default);
        let no_repeat = self
            .no_repeat
            .filter(|&flag| !legacy || flag)
            .unwrap_or(config.no_repeat);

        SessionSettings {
            timeout: Duration::from_millis(timeout_ms),
            prevent_default,
            no_repeat,
        }
    }
}

/// Effective settings of one recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Idle timeout between combos
    pub timeout: Duration,
    /// Suppress default actions of recorded keydowns
    pub prevent_default: bool,
    /// Ignore auto-repeated keydowns
    pub no_repeat: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        RecordOptions::new().resolve(&RecorderConfig::default())
    }
}
