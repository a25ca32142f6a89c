//! Tool configuration module.
//!
//! Handles loading and validating `imagepath.toml`. The config file is
//! optional and sparse — override just the values you want:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! # Repository root prefixed to encoded paths ("" = none)
//! root_path = ""
//!
//! # Capacity of the batch decode report buffer: only the most recent
//! # events are retained for display
//! report_capacity = 256
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `imagepath.toml`.
///
/// All fields have sensible defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Repository root prefixed to encoded paths. Empty means none.
    pub root_path: String,
    /// Capacity of the batch decode report buffer — only the most recent
    /// events are retained for display.
    pub report_capacity: usize,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            root_path: String::new(),
            report_capacity: 256,
        }
    }
}

impl ToolConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file if it exists, falling back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report_capacity == 0 {
            return Err(ConfigError::Validation(
                "report_capacity must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Stock `imagepath.toml` with every option documented, for `gen-config`.
pub fn stock_config_toml() -> String {
    "\
# imagepath configuration
# All options are optional - defaults shown below

# Repository root prefixed to encoded paths (\"\" = none).
# Example: \"/data/images\" turns img_400x.jpg into /data/images/img_400x.jpg
root_path = \"\"

# Capacity of the batch decode report buffer. Decode workers push one event
# per path; only the most recent `report_capacity` events are retained for
# display, older ones are overwritten.
report_capacity = 256
"
    .to_string()
}
