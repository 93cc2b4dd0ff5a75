//! Waves of job records and the assembled pipeline document

use super::defaults::global_variables;
use super::errors::PipelineError;
use super::template::JobTemplate;
use crate::job::{ContainerVersion, JobDescriptor, JobRecord, Variables};
use serde::{Deserialize, Serialize};

/// Label of the stage holding the wave with the given index
#[must_use]
pub fn stage_label(index: usize) -> String {
    format!("stage{index}")
}

/// Job records executed in the same stage
///
/// The order of the records is kept through generation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wave(Vec<JobRecord>);

impl Wave {
    /// Creates a wave from records
    #[must_use]
    pub fn new(jobs: Vec<JobRecord>) -> Self {
        Self(jobs)
    }

    /// Records of the wave, in input order
    #[must_use]
    pub fn jobs(&self) -> &[JobRecord] {
        &self.0
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the wave has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<JobRecord>> for Wave {
    fn from(jobs: Vec<JobRecord>) -> Self {
        Self(jobs)
    }
}

impl FromIterator<JobRecord> for Wave {
    fn from_iter<I: IntoIterator<Item = JobRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Generated jobs of one stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    /// Stage label, `stage<index>`
    pub label: String,
    /// Jobs in wave order
    pub jobs: Vec<JobDescriptor>,
}

/// Complete GitLab CI document
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineDocument {
    /// Stages in execution order
    pub stages: Vec<Stage>,
    /// Global variables
    pub variables: Variables,
    /// Hand written jobs merged in unchanged
    pub template: JobTemplate,
}

impl PipelineDocument {
    /// Builds the jobs of all waves
    ///
    /// Jobs keep the order of their records. Nothing is sorted or
    /// deduplicated; duplicate names surface in the consuming CI.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Job`] for the first record a job cannot be
    /// derived from.
    pub fn assemble(
        waves: &[Wave],
        container_version: ContainerVersion,
        template: JobTemplate,
    ) -> Result<Self, PipelineError> {
        let mut stages = Vec::with_capacity(waves.len());
        for (wave_index, wave) in waves.iter().enumerate() {
            let label = stage_label(wave_index);
            let mut jobs = Vec::with_capacity(wave.len());
            for (index, record) in wave.jobs().iter().enumerate() {
                let job = JobDescriptor::build(record, container_version, label.as_str())
                    .map_err(|source| PipelineError::Job {
                        wave: wave_index,
                        index,
                        source,
                    })?;
                jobs.push(job);
            }
            tracing::debug!(stage = %label, jobs = jobs.len(), "assembled stage");
            stages.push(Stage { label, jobs });
        }

        let document = Self {
            stages,
            variables: global_variables(),
            template,
        };
        tracing::info!(
            stages = document.stages.len(),
            jobs = document.job_count(),
            "assembled pipeline"
        );
        Ok(document)
    }

    /// Stage labels in execution order
    #[must_use]
    pub fn stage_labels(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.label.as_str()).collect()
    }

    /// Total number of generated jobs
    #[must_use]
    pub fn job_count(&self) -> usize {
        self.stages.iter().map(|stage| stage.jobs.len()).sum()
    }

    /// All generated jobs, stage by stage
    pub fn jobs(&self) -> impl Iterator<Item = &JobDescriptor> {
        self.stages.iter().flat_map(|stage| stage.jobs.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::globals::{CLANG, GCC, NVCC, TEST_RUNTIME};
    use crate::job::{Backend, Category, JobError, ParameterValue};

    fn record(device: (&str, &str), build_type: &str) -> JobRecord {
        JobRecord::new(
            ParameterValue::new(GCC, "11"),
            ParameterValue::new(device.0, device.1),
            ParameterValue::new("build_type", build_type),
            ParameterValue::new("test_type", TEST_RUNTIME),
        )
        .with(Category::Cmake, ParameterValue::new("cmake", "3.22"))
        .with(Category::Boost, ParameterValue::new("boost", "1.79"))
        .with(Category::Ubuntu, ParameterValue::new("ubuntu", "20.04"))
    }

    fn version() -> ContainerVersion {
        ContainerVersion::new(1.0).unwrap()
    }

    #[test]
    fn test_assemble_keeps_wave_and_job_order() {
        let waves = vec![
            Wave::new(vec![record((GCC, "11"), "Release"), record((CLANG, "14"), "Debug")]),
            Wave::new(vec![record((GCC, "10"), "Debug")]),
            Wave::new(vec![record((CLANG, "15"), "Release"), record((GCC, "9"), "Release")]),
        ];
        let document = PipelineDocument::assemble(&waves, version(), JobTemplate::empty()).unwrap();

        assert_eq!(document.stage_labels(), vec!["stage0", "stage1", "stage2"]);
        assert_eq!(document.job_count(), 5);

        let names: Vec<_> = document.jobs().map(|job| job.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "linux_gcc11_cmake3.22_boost1.79_ubuntu20.04_Release",
                "linux_clang14_cmake3.22_boost1.79_ubuntu20.04_Debug",
                "linux_gcc10_cmake3.22_boost1.79_ubuntu20.04_Debug",
                "linux_clang15_cmake3.22_boost1.79_ubuntu20.04_Release",
                "linux_gcc9_cmake3.22_boost1.79_ubuntu20.04_Release",
            ]
        );
        for stage in &document.stages {
            assert!(stage.jobs.iter().all(|job| job.body.stage == stage.label));
        }
    }

    #[test]
    fn test_assemble_does_not_deduplicate() {
        let waves = vec![Wave::new(vec![
            record((GCC, "11"), "Release"),
            record((GCC, "11"), "Release"),
        ])];
        let document = PipelineDocument::assemble(&waves, version(), JobTemplate::empty()).unwrap();
        assert_eq!(document.job_count(), 2);
    }

    #[test]
    fn test_assemble_reports_malformed_record_position() {
        let mut broken = record((NVCC, "11.2"), "Release");
        broken.ubuntu = None;
        let waves = vec![
            Wave::new(vec![record((GCC, "11"), "Release")]),
            Wave::new(vec![record((GCC, "10"), "Release"), broken]),
        ];

        let err = PipelineDocument::assemble(&waves, version(), JobTemplate::empty()).unwrap_err();
        assert_eq!(
            err,
            PipelineError::Job {
                wave: 1,
                index: 1,
                source: JobError::MissingCategory(Category::Ubuntu),
            }
        );
    }

    #[test]
    fn test_assemble_empty_matrix() {
        let document = PipelineDocument::assemble(&[], version(), JobTemplate::empty()).unwrap();
        assert!(document.stages.is_empty());
        assert_eq!(document.variables, global_variables());
    }

    #[test]
    fn test_wave_deserializes_from_list() {
        let yaml = r#"
- host_compiler: [gcc, "11"]
  device_compiler: [nvcc, "11.2"]
  build_type: [build_type, Release]
  test_type: [test_type, runtime]
  alpaka_ACC_GPU_CUDA_ENABLE: [alpaka_ACC_GPU_CUDA_ENABLE, "11.2"]
"#;
        let wave: Wave = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(wave.len(), 1);
        assert_eq!(wave.jobs()[0].enabled_backend(Backend::GpuCuda), Some("11.2"));
    }
}
