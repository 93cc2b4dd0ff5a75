//! # alpaka-jobgen - GitLab CI jobs from the alpaka build matrix
//!
//! The combination producer enumerates the build/test parameter matrix
//! (compilers, backends, library versions, build type, test mode) and
//! groups the resulting job records into waves. This crate turns those
//! waves into a GitLab CI document: one job per record with a unique name,
//! a container image, environment variables and runner tags, one stage
//! per wave.
//!
//! ## Quick Start
//!
//! ```
//! use alpaka_jobgen::prelude::*;
//!
//! let record = job_record! {
//!     host_compiler => ("gcc", "11"),
//!     device_compiler => ("gcc", "11"),
//!     build_type => ("build_type", "release"),
//!     test_type => ("test_type", "runtime"),
//!     cmake => ("cmake", "3.22"),
//!     boost => ("boost", "1.79"),
//!     ubuntu => ("ubuntu", "20.04"),
//! }
//! .unwrap();
//!
//! let version = ContainerVersion::new(1.0).unwrap();
//! let document = PipelineDocument::assemble(&[wave![record]], version, JobTemplate::empty()).unwrap();
//! let yaml = GitLabCIBackend::new().translate(&document).unwrap();
//! assert!(yaml.contains("linux_gcc11_cmake3.22_boost1.79_ubuntu20.04_release:"));
//! ```
//!
//! ## Layout
//!
//! - [`job`]: from one record to one job (name, image, variables, tags)
//! - [`pipeline`]: waves, global defaults, job template, verification
//! - [`infrastructure`]: YAML output, configuration, logging

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod macros;

pub mod infrastructure;
pub mod job;
pub mod pipeline;

// Prelude module for common imports
pub mod prelude;

// Re-export commonly used types
pub use infrastructure::{Config, ConfigError, GitLabCIBackend, init_logging};
pub use job::{
    ContainerVersion, JobBody, JobDescriptor, JobError, JobRecord, ParameterValue, RunnerClass,
    Variables,
};
pub use pipeline::{JobTemplate, PipelineDocument, PipelineError, Stage, VerifyReport, Wave};

/// Version of the alpaka-jobgen crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
