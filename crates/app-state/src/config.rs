//! Start-up configuration
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields a working configuration.

use app_ui::{tokens, DrawerConfig, ThemeName};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Screen width must be a positive, finite number
    #[error("Invalid screen width: {0}")]
    InvalidScreenWidth(f64),

    /// Pinch threshold must lie strictly between 0 and 1
    #[error("Invalid pinch threshold: {0} (expected 0 < threshold < 1)")]
    InvalidThreshold(f64),

    /// Frame interval must be at least one millisecond
    #[error("Frame interval must be at least 1 ms")]
    InvalidFrameInterval,
}

/// Result type for configuration
pub type Result<T> = std::result::Result<T, ConfigError>;

fn default_screen_width() -> f64 {
    tokens::drawer::DEFAULT_SCREEN_WIDTH
}

fn default_frame_interval_ms() -> u64 {
    16
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_open_duration_ms() -> u64 {
    tokens::duration::DRAWER_OPEN
}

fn default_close_duration_ms() -> u64 {
    tokens::duration::DRAWER_CLOSE
}

fn default_pinch_threshold() -> f64 {
    tokens::drawer::PINCH_THRESHOLD
}

/// Drawer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawerSettings {
    /// Open animation length
    #[serde(default = "default_open_duration_ms")]
    pub open_duration_ms: u64,
    /// Close animation length
    #[serde(default = "default_close_duration_ms")]
    pub close_duration_ms: u64,
    /// Pinch scale below which a two-finger pinch opens the drawer
    #[serde(default = "default_pinch_threshold")]
    pub pinch_threshold: f64,
    /// Mount the drawer open
    #[serde(default)]
    pub initially_open: bool,
}

impl Default for DrawerSettings {
    fn default() -> Self {
        Self {
            open_duration_ms: default_open_duration_ms(),
            close_duration_ms: default_close_duration_ms(),
            pinch_threshold: default_pinch_threshold(),
            initially_open: false,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logical screen width in points
    #[serde(default = "default_screen_width")]
    pub screen_width: f64,
    /// Animation tick interval
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    /// `tracing` filter directive; `RUST_LOG` takes precedence
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Color theme
    #[serde(default)]
    pub theme: ThemeName,
    /// Drawer settings
    #[serde(default)]
    pub drawer: DrawerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            screen_width: default_screen_width(),
            frame_interval_ms: default_frame_interval_ms(),
            log_filter: default_log_filter(),
            theme: ThemeName::default(),
            drawer: DrawerSettings::default(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize as pretty JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the drawer cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.screen_width.is_finite() || self.screen_width <= 0.0 {
            return Err(ConfigError::InvalidScreenWidth(self.screen_width));
        }
        let threshold = self.drawer.pinch_threshold;
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(ConfigError::InvalidThreshold(threshold));
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::InvalidFrameInterval);
        }
        Ok(())
    }

    /// Tick interval for the shell runtime
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Drawer machine configuration
    pub fn drawer_config(&self) -> DrawerConfig {
        DrawerConfig::default()
            .with_screen_width(self.screen_width)
            .with_durations(
                Duration::from_millis(self.drawer.open_duration_ms),
                Duration::from_millis(self.drawer.close_duration_ms),
            )
            .with_pinch_threshold(self.drawer.pinch_threshold)
    }
}
