//! Configuration management

use crate::job::ContainerVersion;
use crate::pipeline::DEFAULT_JOB_BASE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reading a configuration file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config '{path}': {reason}")]
    Read {
        /// Path of the config file.
        path: String,
        /// Reason of the failure.
        reason: String,
    },

    /// The file is not a valid configuration
    #[error("Invalid config '{path}': {reason}")]
    Parse {
        /// Path of the config file.
        path: String,
        /// Reason of the failure.
        reason: String,
    },
}

/// Application configuration
///
/// Every field is optional in the file; command line flags take
/// precedence over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tag of the CI container images
    pub container_version: Option<ContainerVersion>,
    /// Job template merged into the document
    pub job_base: PathBuf,
    /// Output file of the generated pipeline
    pub output: PathBuf,
    /// Log level
    pub log_level: String,
    /// Run the matrix verification before generating
    pub verify: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            container_version: None,
            job_base: PathBuf::from(DEFAULT_JOB_BASE),
            output: PathBuf::from("jobs.yml"),
            log_level: "info".to_string(),
            verify: true,
        }
    }
}

impl Config {
    /// Loads a YAML configuration file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Parses YAML configuration content
    ///
    /// # Errors
    ///
    /// Returns the parser error if the content is not a valid configuration.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}
