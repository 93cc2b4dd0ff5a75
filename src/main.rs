//! alpaka-jobgen - GitLab CI job generator for the alpaka build matrix
//!
//! Reads the job matrix written by the combination producer and writes
//! the GitLab CI document with one job per matrix entry.
//!
//! ## Commands
//!
//! - `alpaka-jobgen generate` - Write the GitLab CI jobs for a job matrix
//! - `alpaka-jobgen verify` - Check a job matrix without generating
//! - `alpaka-jobgen completions` - Generate shell completions
//!
//! ## Quick Start
//!
//! ```bash
//! # Generate the jobs of a matrix, using container tag 3.2
//! alpaka-jobgen generate jobs_matrix.yml --container-version 3.2 -o jobs.yml
//!
//! # Check the matrix only
//! alpaka-jobgen verify jobs_matrix.yml --json
//!
//! # Generate shell completions
//! alpaka-jobgen completions bash > /etc/bash_completion.d/alpaka-jobgen
//! ```

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            if std::env::var("ALPAKA_JOBGEN_VERBOSE").is_ok() {
                eprintln!("{e:?}");
            }
            ExitCode::FAILURE
        }
    }
}
