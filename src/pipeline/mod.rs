//! Pipeline assembly: waves of job records to a staged document

pub mod defaults;
pub mod document;
pub mod errors;
pub mod input;
pub mod template;
pub mod verify;

pub use defaults::global_variables;
pub use document::{PipelineDocument, Stage, Wave, stage_label};
pub use errors::PipelineError;
pub use input::{load_waves, parse_waves};
pub use template::{DEFAULT_JOB_BASE, JobTemplate};
pub use verify::{Finding, JobPosition, VerifyReport, verify};
