//! Error types for job record handling

use super::globals::Category;
use thiserror::Error;

/// Errors raised while reading a job record or deriving a job from it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    /// A rule needs a category the record does not carry
    #[error("Job record is missing required category '{0}'")]
    MissingCategory(Category),

    /// The record carries a key outside the known category set
    #[error("Unknown parameter category '{0}'")]
    UnknownCategory(String),

    /// A version string could not be interpreted where a rule needs its value
    #[error("Invalid version '{version}' for category '{category}'")]
    InvalidVersion {
        /// Category holding the version.
        category: Category,
        /// The rejected version string.
        version: String,
    },
}
