use anyhow::{Context, Result};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::ScanError;
use crate::reporting::Severity;
use crate::validation::ValidationConfig;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Which checks run and at what severity
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Which files are scanned
    #[serde(default)]
    pub scan: ScanConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// File discovery and exit policy
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScanConfig {
    // @field: File extensions treated as item or fragment files
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    // @field: Follow symlinks while walking directories
    #[serde(default = "default_true")]
    pub follow_links: bool,

    // @field: Lowest severity that makes the run fail
    #[serde(default)]
    pub fail_on: Severity,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            follow_links: true,
            fail_on: Severity::default(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
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
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["html".to_string(), "htm".to_string(), "xml".to_string()]
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load the configuration at `path`, writing a default one when missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .context(format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!(
            "Config file not found at '{}', creating default config.",
            path.display()
        );
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .context(format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.scan.extensions.is_empty() {
            return Err(ScanError::Config(
                "At least one file extension must be configured for scanning".to_string(),
            )
            .into());
        }

        if let Some(bad) = self
            .scan
            .extensions
            .iter()
            .find(|e| e.trim().trim_start_matches('.').is_empty())
        {
            return Err(ScanError::Config(format!("Invalid file extension in scan config: '{}'", bad)).into());
        }

        if self.validation.term_coverage && !self.validation.glossary_spans {
            return Err(ScanError::Config(
                "Term coverage needs glossary span resolution; enable glossary_spans or disable term_coverage"
                    .to_string(),
            )
            .into());
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            validation: ValidationConfig::default(),
            scan: ScanConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
