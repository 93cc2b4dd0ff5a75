//! Job domain: from a matrix record to a GitLab CI job
//!
//! Each submodule derives one part of the job from a [`JobRecord`]:
//! [`naming`] the unique name, [`image`] the container, [`variables`] the
//! environment and [`tags`] the runner. [`JobDescriptor::build`] puts them
//! together.

pub mod descriptor;
pub mod errors;
pub mod globals;
pub mod image;
pub mod naming;
pub mod record;
pub mod tags;
pub mod variables;

#[cfg(test)]
mod properties_tests;

pub use descriptor::{JOB_SCRIPT, JobBody, JobDescriptor};
pub use errors::JobError;
pub use globals::{Backend, Category};
pub use image::{ContainerVersion, InvalidContainerVersion, job_image};
pub use naming::job_name;
pub use record::{JobRecord, ParameterValue};
pub use tags::{RunnerClass, job_tags};
pub use variables::{Variables, job_variables};
