//! Prelude module for common imports

// Re-export macros
pub use crate::{job_record, param, wave};

pub use crate::job::{
    Backend, Category, ContainerVersion, JobBody, JobDescriptor, JobError, JobRecord,
    ParameterValue, RunnerClass, Variables,
};
pub use crate::pipeline::{
    JobTemplate, PipelineDocument, PipelineError, Stage, VerifyReport, Wave,
};

pub use crate::infrastructure::{Config, GitLabCIBackend};
