use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::file_utils::FileManager;
use crate::validation::DEFAULT_TOLERANCE_SECS;

/// Application configuration module
/// This module handles loading, validating and saving the settings used by the
/// command line front end.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// SRT export settings
    #[serde(default)]
    pub srt: SrtConfig,

    /// Timeline validation settings
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Result file settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Whether to pretty-print the result JSON
    #[serde(default = "default_true")]
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty_json: true }
    }
}

/// Configuration for SRT export
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SrtConfig {
    /// Whether to add the English line under each caption
    #[serde(default = "default_true")]
    pub bilingual: bool,
}

impl Default for SrtConfig {
    fn default() -> Self {
        Self { bilingual: true }
    }
}

/// Configuration for timeline validation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ValidationConfig {
    /// Allowed drift between adjacent entries, in seconds
    #[serde(default = "default_tolerance_secs")]
    pub tolerance_secs: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            tolerance_secs: default_tolerance_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_tolerance_secs() -> f64 {
    DEFAULT_TOLERANCE_SECS
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let tolerance = self.validation.tolerance_secs;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(anyhow!(
                "validation.tolerance_secs must be a non-negative number, got {}",
                tolerance
            ));
        }

        Ok(())
    }

    /// Load a configuration file, or write the default one if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if FileManager::file_exists(path) {
            let content = FileManager::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        FileManager::write_to_file(path, &config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }
}
