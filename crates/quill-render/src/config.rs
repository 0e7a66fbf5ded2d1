//! Render pipeline configuration.
//!
//! ## Learning: Serde Defaults
//!
//! `#[serde(default)]` fills every missing field from `Default`, so a
//! config file only needs the settings it changes:
//!
//! ```toml
//! cache_capacity = 5000
//! mode_policy = "fixed-on-attach"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cache::DEFAULT_CAPACITY;

/// Documents with at least this many lines render in windowed mode.
pub const DEFAULT_WINDOWING_THRESHOLD: usize = 1000;

/// When the full vs. windowed decision is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModePolicy {
    /// Decide once when the document is attached.
    FixedOnAttach,
    /// Decide again whenever the line count changes.
    #[default]
    FollowLineCount,
}

/// Settings for the render coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum number of cached line renders
    pub cache_capacity: usize,

    /// Cache rendered lines at all
    pub cache_enabled: bool,

    /// Line count at which rendering switches to windowed mode
    pub windowing_threshold: usize,

    /// Height of one line in pixels
    pub line_height: f64,

    /// Viewport height in pixels
    pub container_height: f64,

    /// Extra lines rendered above and below the viewport
    pub buffer_lines: usize,

    /// When the render mode is decided
    pub mode_policy: ModePolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CAPACITY,
            cache_enabled: true,
            windowing_threshold: DEFAULT_WINDOWING_THRESHOLD,
            line_height: 20.0,
            container_height: 600.0,
            buffer_lines: 5,
            mode_policy: ModePolicy::default(),
        }
    }
}

impl RenderConfig {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from_default_path().unwrap_or_else(|err| {
            tracing::warn!("Using default render config: {}", err);
            Self::default()
        })
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("quill").join("render.toml"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
