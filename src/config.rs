//! # Configuration
//!
//! Optional TOML settings for the `stego` binary and the orchestration layer.
//! Every field has a default, so an empty file (or no file at all) is valid.
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [carrier]
//! convert_color = false
//! ```

use log::LevelFilter;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Errors
/// - File I/O error
/// - TOML parse or schema error
pub fn load_config<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: DeserializeOwned,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub carrier: CarrierSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingSettings {
    /// Parsed level, falling back to `Info` for unknown names.
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// How carriers that are not 8-bit RGB/RGBA are handled.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarrierSettings {
    /// Convert grayscale, paletted or 16-bit carriers to 8-bit RGB(A) instead
    /// of rejecting them.
    pub convert_color: bool,
}

impl Default for CarrierSettings {
    fn default() -> Self {
        Self {
            convert_color: true,
        }
    }
}
