//! Configuration file management.
//!
//! The config lives at `<config dir>/razermon/config.toml`. Every field has a
//! default, so a missing file (or a partial one) is fine; a file that is not
//! valid TOML is an error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use razermon_core::DEFAULT_REQUEST_TIMEOUT;

use crate::gui::ThemeMode;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the host bridge.
    pub host_url: String,

    /// Transport timeout for host calls, in seconds; 0 uses the default.
    pub request_timeout_secs: u64,

    /// Re-resolve the selection every this many seconds; 0 disables.
    pub refresh_interval_secs: u64,

    /// GUI appearance.
    pub gui: GuiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host_url: default_host_url(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            refresh_interval_secs: 0,
            gui: GuiConfig::default(),
        }
    }
}

fn default_host_url() -> String {
    "http://localhost:1420".to_string()
}

/// GUI-specific configuration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Theme preference: "dark" or "light"
    pub theme: ThemeMode,

    /// Initial window width.
    pub window_width: f32,

    /// Initial window height.
    pub window_height: f32,

    /// Height of the charge chart.
    pub chart_height: f32,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Dark,
            window_width: 800.0,
            window_height: 520.0,
            chart_height: 320.0,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("razermon")
            .join("config.toml")
    }

    /// Load the default config file, or the defaults if it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    /// Load config from `path`, or the defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    /// Save config to `path`, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Transport timeout for host calls.
    pub fn request_timeout(&self) -> Duration {
        match self.request_timeout_secs {
            0 => DEFAULT_REQUEST_TIMEOUT,
            secs => Duration::from_secs(secs),
        }
    }

    /// Auto-refresh period, if enabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }
}
