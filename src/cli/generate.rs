//! `alpaka-jobgen generate` - Write the GitLab CI jobs for a job matrix
//!
//! ## Usage
//!
//! ```bash
//! alpaka-jobgen generate <matrix.yml> --container-version 3.2 -o jobs.yml
//! ```
//!
//! The matrix is verified first; a failing verification aborts before any
//! file is written unless `--skip-verify` is given.

use alpaka_jobgen::job::ContainerVersion;
use alpaka_jobgen::pipeline::{self, JobTemplate, PipelineDocument};
use alpaka_jobgen::GitLabCIBackend;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Inputs of a generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Job matrix file
    pub matrix: PathBuf,
    /// Tag of the CI container images
    pub container_version: ContainerVersion,
    /// Job template merged into the document
    pub job_base: PathBuf,
    /// Output file
    pub output: PathBuf,
    /// Run the matrix verification first
    pub verify: bool,
}

/// What a generation run wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Number of stages
    pub stages: usize,
    /// Number of jobs
    pub jobs: usize,
}

/// Generates the pipeline document and writes it to the output file
pub fn generate(options: &GenerateOptions) -> Result<GenerateSummary> {
    tracing::debug!(?options, "generating pipeline");

    let waves = pipeline::load_waves(&options.matrix)?;

    if options.verify {
        let report = pipeline::verify(&waves);
        if !report.passed() {
            anyhow::bail!(
                "job matrix verification failed with {} finding(s), nothing written",
                report.findings.len()
            );
        }
    } else {
        tracing::warn!("matrix verification skipped");
    }

    let template = JobTemplate::load(&options.job_base)?;
    let document = PipelineDocument::assemble(&waves, options.container_version, template)
        .context("Failed to assemble pipeline, nothing written")?;

    GitLabCIBackend::new().save(&document, &options.output)?;

    Ok(GenerateSummary {
        stages: document.stages.len(),
        jobs: document.job_count(),
    })
}
