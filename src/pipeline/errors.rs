//! Error types for pipeline generation

use crate::job::JobError;
use thiserror::Error;

/// Errors that abort a generation run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// A job record could not be turned into a job
    #[error("Job {index} of stage{wave} is invalid: {source}")]
    Job {
        /// Index of the wave holding the record.
        wave: usize,
        /// Index of the record inside its wave.
        index: usize,
        /// Underlying record error.
        #[source]
        source: JobError,
    },

    /// The job matrix file could not be read or parsed
    #[error("Failed to read job matrix '{path}': {reason}")]
    Input {
        /// Path of the matrix file.
        path: String,
        /// Reason of the failure.
        reason: String,
    },

    /// The job template could not be read or parsed
    #[error("Failed to read job template '{path}': {reason}")]
    Template {
        /// Path of the template file.
        path: String,
        /// Reason of the failure.
        reason: String,
    },

    /// The pipeline document could not be written
    #[error("Failed to write pipeline '{path}': {reason}")]
    Output {
        /// Path of the output file.
        path: String,
        /// Reason of the failure.
        reason: String,
    },

    /// YAML (de)serialization failed
    #[error("YAML error: {0}")]
    Yaml(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for PipelineError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}
