//! Verification of the job matrix before generation
//!
//! The checks look at the records only; a failing report stops the
//! generation before any file is written.

use super::document::Wave;
use crate::job::globals::Backend;
use crate::job::image::cuda_tag;
use crate::job::{Category, JobError, job_name};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Location of a record in the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct JobPosition {
    /// Wave index
    pub wave: usize,
    /// Index inside the wave
    pub index: usize,
}

impl fmt::Display for JobPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stage{} job {}", self.wave, self.index)
    }
}

/// A problem found in the matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// Two records derive the same job name
    DuplicateName {
        /// The shared name
        name: String,
        /// Earlier record
        first: JobPosition,
        /// Later record
        second: JobPosition,
    },
    /// CUDA and HIP are both enabled
    ConflictingGpuBackends {
        /// Offending record
        position: JobPosition,
    },
    /// A job cannot be derived from the record
    Malformed {
        /// Offending record
        position: JobPosition,
        /// Reason
        reason: String,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName {
                name,
                first,
                second,
            } => write!(f, "{second}: job name '{name}' already used by {first}"),
            Self::ConflictingGpuBackends { position } => {
                write!(f, "{position}: CUDA and HIP backend are both enabled")
            }
            Self::Malformed { position, reason } => write!(f, "{position}: {reason}"),
        }
    }
}

/// Outcome of a verification run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    /// Number of records checked
    pub jobs_checked: usize,
    /// Problems found
    pub findings: Vec<Finding>,
}

impl VerifyReport {
    /// Returns true if no problem was found
    #[must_use]
    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Checks the matrix
#[must_use]
pub fn verify(waves: &[Wave]) -> VerifyReport {
    let mut report = VerifyReport::default();
    let mut names: HashMap<String, JobPosition> = HashMap::new();

    for (wave_index, wave) in waves.iter().enumerate() {
        for (index, job) in wave.jobs().iter().enumerate() {
            let position = JobPosition {
                wave: wave_index,
                index,
            };
            report.jobs_checked += 1;

            if job.enabled_backend(Backend::GpuCuda).is_some()
                && job.enabled_backend(Backend::GpuHip).is_some()
            {
                report
                    .findings
                    .push(Finding::ConflictingGpuBackends { position });
            }

            if let Err(error) = check_categories(job) {
                report.findings.push(Finding::Malformed {
                    position,
                    reason: error.to_string(),
                });
            }

            match job_name(job) {
                Ok(name) => {
                    if let Some(first) = names.get(&name) {
                        report.findings.push(Finding::DuplicateName {
                            name,
                            first: *first,
                            second: position,
                        });
                    } else {
                        names.insert(name, position);
                    }
                }
                Err(error) => report.findings.push(Finding::Malformed {
                    position,
                    reason: error.to_string(),
                }),
            }
        }
    }

    for finding in &report.findings {
        tracing::warn!("verification: {finding}");
    }
    if report.passed() {
        tracing::info!(jobs = report.jobs_checked, "verification passed");
    } else {
        tracing::warn!(
            jobs = report.jobs_checked,
            findings = report.findings.len(),
            "verification failed"
        );
    }
    report
}

/// Categories the image and variable rules need
fn check_categories(job: &crate::job::JobRecord) -> Result<(), JobError> {
    job.require(Category::Ubuntu)?;
    job.require(Category::Cmake)?;
    job.require(Category::Boost)?;
    if let Some(cuda) = job.enabled_backend(Backend::GpuCuda) {
        cuda_tag(cuda)?;
    }
    Ok(())
}
