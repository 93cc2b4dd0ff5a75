//! `alpaka-jobgen verify` - Check a job matrix without generating
//!
//! Reports duplicate job names, records enabling CUDA and HIP together and
//! records a job cannot be derived from.

use alpaka_jobgen::pipeline::{self, VerifyReport};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

/// Loads and verifies a job matrix file
pub fn verify_matrix(path: &Path) -> Result<VerifyReport> {
    let waves = pipeline::load_waves(path)?;
    Ok(pipeline::verify(&waves))
}

/// Renders a report as text or JSON
pub fn format_report(report: &VerifyReport, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(report).context("Failed to serialize report");
    }

    let mut output = String::new();
    for finding in &report.findings {
        writeln!(output, "  {finding}")?;
    }
    if report.passed() {
        write!(output, "OK: {} jobs checked", report.jobs_checked)?;
    } else {
        write!(
            output,
            "FAILED: {} finding(s) in {} jobs",
            report.findings.len(),
            report.jobs_checked
        )?;
    }
    Ok(output)
}
