//! Reporter configuration loading.
//!
//! A [`ReporterConfig`] is the explicit form of what used to be process-wide
//! knobs: the application version stamped on every report, the depth limit
//! and whether the logged report is colorized. Any serde-deserializable
//! struct can be loaded from TOML through [`ConfigLoader`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use errata::config::{ConfigError, ConfigLoader, ReporterConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = ReporterConfig::load(Path::new("reporter.toml"))?;
//!     config.validate()?;
//!     println!("Reporting as {}", config.version);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::consts::{DEFAULT_APP_VERSION, DEFAULT_MAX_DEPTH};

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub const fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Settings a [`Reporter`](crate::Reporter) is built from.
///
/// # TOML Example
///
/// ```toml
/// [reporter]
/// version = "v1.2.3"
/// max_depth = 20
/// color = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReporterConfig {
    /// Application version printed in every report header.
    #[serde(default = "default_version")]
    pub version: String,

    /// Maximum chain links (or stack frames) walked per echo.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Build the ANSI-styled [`Report::colored`](crate::Report::colored)
    /// variant. The logged report is always plain.
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_version() -> String {
    DEFAULT_APP_VERSION.to_string()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_color() -> bool {
    true
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            max_depth: default_max_depth(),
            color: default_color(),
        }
    }
}

impl ReporterConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `version` is empty
    /// - `max_depth` is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version.is_empty() {
            return Err(ConfigError::ValidationError(
                "version cannot be empty".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ValidationError(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
