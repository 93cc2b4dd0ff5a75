//! Command line interface
//!
//! - `generate`: write the GitLab CI jobs for a job matrix
//! - `verify`: check a job matrix without generating
//! - `completions`: generate shell completions

pub mod completions;
pub mod generate;
pub mod verify;

use alpaka_jobgen::job::ContainerVersion;
use alpaka_jobgen::{Config, init_logging};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for alpaka-jobgen
#[derive(Parser, Debug)]
#[command(name = "alpaka-jobgen")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level, e.g. `debug` (`RUST_LOG` takes precedence)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the GitLab CI jobs for a job matrix
    Generate {
        /// Job matrix: a list of waves of job records (YAML or JSON)
        matrix: PathBuf,
        /// Tag of the CI container images, e.g. 3.2
        #[arg(long)]
        container_version: Option<ContainerVersion>,
        /// Job template merged into the document
        #[arg(long)]
        job_base: Option<PathBuf>,
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Generate even if the matrix verification fails
        #[arg(long)]
        skip_verify: bool,
    },

    /// Check a job matrix without generating
    Verify {
        /// Job matrix: a list of waves of job records (YAML or JSON)
        matrix: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: ShellArg,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Parse and execute CLI arguments
pub fn run() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    init_logging(args.log_level.as_deref().unwrap_or(&config.log_level));

    match args.command {
        Command::Generate {
            matrix,
            container_version,
            job_base,
            output,
            skip_verify,
        } => {
            let options = generate::GenerateOptions {
                matrix,
                container_version: container_version
                    .or(config.container_version)
                    .context("no container version given: pass --container-version or set it in the config")?,
                job_base: job_base.unwrap_or(config.job_base),
                output: output.unwrap_or(config.output),
                verify: config.verify && !skip_verify,
            };
            let summary = generate::generate(&options)?;
            println!(
                "Wrote {} jobs in {} stages to {}",
                summary.jobs,
                summary.stages,
                options.output.display()
            );
        }
        Command::Verify { matrix, json } => {
            let report = verify::verify_matrix(&matrix)?;
            println!("{}", verify::format_report(&report, json)?);
            if !report.passed() {
                anyhow::bail!("job matrix verification failed");
            }
        }
        Command::Completions { shell, output } => {
            use clap_complete::Shell;

            let shell_enum = match shell {
                ShellArg::Bash => Shell::Bash,
                ShellArg::Zsh => Shell::Zsh,
                ShellArg::Fish => Shell::Fish,
                ShellArg::PowerShell => Shell::PowerShell,
            };

            let completions = completions::generate_completions(shell_enum)?;

            if let Some(output_path) = output {
                completions::save_completions(&completions, &output_path)?;
            } else {
                println!("{}", completions);
            }
        }
    }

    Ok(())
}
