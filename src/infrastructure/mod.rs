//! Infrastructure layer
//!
//! This module contains the output backend and the process setup.

mod config;
mod gitlab_ci;
mod logging;

pub use config::{Config, ConfigError};
pub use gitlab_ci::GitLabCIBackend;
pub use logging::init_logging;
