//! Runner selection

use super::globals::Backend;
use super::record::JobRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Architecture tag shared by all runners
pub const ARCH_TAG: &str = "x86_64";

/// Kind of runner a job needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerClass {
    /// Runner without GPU
    CpuOnly,
    /// Runner with an NVIDIA GPU
    Cuda,
    /// Runner with an AMD GPU
    Rocm,
}

impl RunnerClass {
    /// Capability tag of the runner class
    #[must_use]
    pub const fn capability(self) -> &'static str {
        match self {
            Self::CpuOnly => "cpuonly",
            Self::Cuda => "cuda",
            Self::Rocm => "rocm",
        }
    }

    /// Runner tags, architecture first
    #[must_use]
    pub fn tags(self) -> Vec<String> {
        vec![ARCH_TAG.to_string(), self.capability().to_string()]
    }
}

impl fmt::Display for RunnerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.capability())
    }
}

/// Selects the runner class of a record
///
/// Compile-only jobs never need a GPU.
#[must_use]
pub fn job_tags(job: &JobRecord) -> RunnerClass {
    if job.is_compile_only() {
        RunnerClass::CpuOnly
    } else if job.enabled_backend(Backend::GpuCuda).is_some() {
        RunnerClass::Cuda
    } else if job.enabled_backend(Backend::GpuHip).is_some() {
        RunnerClass::Rocm
    } else {
        RunnerClass::CpuOnly
    }
}
