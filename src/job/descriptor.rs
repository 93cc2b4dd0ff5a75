//! Complete GitLab CI job built from a record

use super::errors::JobError;
use super::image::{ContainerVersion, job_image};
use super::naming::job_name;
use super::record::JobRecord;
use super::tags::job_tags;
use super::variables::{Variables, job_variables};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Script run by every generated job
pub const JOB_SCRIPT: [&str; 2] = [
    "source ./script/gitlabci/print_env.sh",
    "source ./script/gitlab_ci_run.sh",
];

/// Body of a GitLab CI job
///
/// Fields are declared in key order, so serialized bodies are stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobBody {
    /// Container image
    pub image: String,
    /// Script lines
    pub script: Vec<String>,
    /// Stage the job belongs to
    pub stage: String,
    /// Runner tags
    pub tags: Vec<String>,
    /// Environment variables
    pub variables: Variables,
}

/// A named job, serialized as the single-key mapping `name: body`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    /// Unique job name
    pub name: String,
    /// Job body
    pub body: JobBody,
}

impl JobDescriptor {
    /// Builds the job of a record
    ///
    /// # Errors
    ///
    /// Returns [`JobError`] if the record lacks a category one of the rules
    /// needs, or carries a version a rule cannot interpret.
    pub fn build(
        job: &JobRecord,
        container_version: ContainerVersion,
        stage: impl Into<String>,
    ) -> Result<Self, JobError> {
        let name = job_name(job)?;
        let body = JobBody {
            image: job_image(job, container_version)?,
            script: JOB_SCRIPT.iter().map(ToString::to_string).collect(),
            stage: stage.into(),
            tags: job_tags(job).tags(),
            variables: job_variables(job)?,
        };
        tracing::debug!(job = %name, image = %body.image, stage = %body.stage, "built job");
        Ok(Self { name, body })
    }
}

impl Serialize for JobDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &self.body)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for JobDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, JobBody>::deserialize(deserializer)?;
        if entries.len() != 1 {
            return Err(de::Error::invalid_length(
                entries.len(),
                &"a mapping with exactly one job",
            ));
        }
        let (name, body) = entries
            .into_iter()
            .next()
            .ok_or_else(|| de::Error::custom("empty job mapping"))?;
        Ok(Self { name, body })
    }
}
