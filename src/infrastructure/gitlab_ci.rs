//! GitLab CI backend
//!
//! Writes a [`PipelineDocument`] as GitLab CI YAML. The layout is fixed:
//! stages, global variables, the job template, then the jobs of each
//! stage behind a separator comment. Jobs are written one by one so their
//! order in the file is the order of the waves.

use crate::job::{JobDescriptor, Variables};
use crate::pipeline::{PipelineDocument, PipelineError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Backend for generating GitLab CI configuration
pub struct GitLabCIBackend;

impl GitLabCIBackend {
    /// Creates a new GitLab CI backend
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Translates a pipeline document to GitLab CI YAML
    #[allow(clippy::missing_errors_doc, clippy::format_push_string)]
    pub fn translate(&self, document: &PipelineDocument) -> Result<String, PipelineError> {
        let mut yaml = String::new();

        // Define stages
        if document.stages.is_empty() {
            yaml.push_str("stages: []\n");
        } else {
            yaml.push_str("stages:\n");
            for label in document.stage_labels() {
                yaml.push_str(&format!("- {}\n", quote(label)));
            }
        }
        yaml.push('\n');

        yaml.push_str(&translate_variables(&document.variables, ""));
        yaml.push('\n');

        if let Some(template) = document.template.value() {
            yaml.push_str(&serde_yaml::to_string(template)?);
        }

        for (index, stage) in document.stages.iter().enumerate() {
            yaml.push_str(&stage_separator(index));
            yaml.push('\n');
            for job in &stage.jobs {
                yaml.push_str(&self.translate_job(job));
                yaml.push('\n');
            }
        }

        Ok(yaml)
    }

    /// Translates one job to a single-key mapping
    #[allow(clippy::format_push_string, clippy::unused_self)]
    fn translate_job(&self, job: &JobDescriptor) -> String {
        let body = &job.body;
        let mut yaml = format!("{}:\n", key(&job.name));

        yaml.push_str(&format!("  image: {}\n", quote(&body.image)));
        yaml.push_str(&translate_list("script", &body.script, "  "));
        yaml.push_str(&format!("  stage: {}\n", quote(&body.stage)));
        yaml.push_str(&translate_list("tags", &body.tags, "  "));
        yaml.push_str(&translate_variables(&body.variables, "  "));

        yaml
    }

    /// Writes the translated document to a writer
    #[allow(clippy::missing_errors_doc)]
    pub fn write<W: Write>(
        &self,
        document: &PipelineDocument,
        out: &mut W,
    ) -> Result<(), PipelineError> {
        out.write_all(self.translate(document)?.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Writes the translated document to a file
    ///
    /// The content goes to a temporary file next to `path` first and is
    /// renamed into place, so a failed run leaves no partial document.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Output`] if the file cannot be written.
    pub fn save(&self, document: &PipelineDocument, path: &Path) -> Result<(), PipelineError> {
        let yaml = self.translate(document)?;
        let failure = |err: std::io::Error| PipelineError::Output {
            path: path.display().to_string(),
            reason: err.to_string(),
        };

        let temp_path = temporary_path(path);
        let written = fs::write(&temp_path, yaml).and_then(|()| fs::rename(&temp_path, path));
        if let Err(err) = written {
            // the rename may not have happened
            let _ = fs::remove_file(&temp_path);
            return Err(failure(err));
        }

        tracing::info!(
            path = %path.display(),
            stages = document.stages.len(),
            jobs = document.job_count(),
            "wrote GitLab CI pipeline"
        );
        Ok(())
    }
}

impl Default for GitLabCIBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Separator comment in front of the jobs of a stage
fn stage_separator(index: usize) -> String {
    format!("# <<<<<<<<<<<<< stage {index} >>>>>>>>>>>>>\n")
}

/// Sibling file the document is written to before the rename
fn temporary_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "pipeline.yml".to_string(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!(".{name}.tmp"))
}

#[allow(clippy::format_push_string)]
fn translate_variables(variables: &Variables, indent: &str) -> String {
    if variables.is_empty() {
        return format!("{indent}variables: {{}}\n");
    }
    let mut yaml = format!("{indent}variables:\n");
    for (name, value) in variables {
        yaml.push_str(&format!("{indent}  {}: {}\n", key(name), quote(value)));
    }
    yaml
}

#[allow(clippy::format_push_string)]
fn translate_list(field: &str, items: &[String], indent: &str) -> String {
    if items.is_empty() {
        return format!("{indent}{field}: []\n");
    }
    let mut yaml = format!("{indent}{field}:\n");
    for item in items {
        yaml.push_str(&format!("{indent}- {}\n", quote(item)));
    }
    yaml
}

/// Mapping key, plain if YAML reads it back as the same string
fn key(name: &str) -> String {
    const RESERVED: [&str; 11] = [
        "true", "false", "null", "yes", "no", "on", "off", "y", "n", "~", "",
    ];
    let plain = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+'))
        && !RESERVED.contains(&name.to_ascii_lowercase().as_str());
    if plain { name.to_string() } else { quote(name) }
}

/// Double-quoted YAML scalar
#[allow(clippy::format_push_string)]
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            // YAML rejects these raw or reads them as line breaks
            c if c.is_control() => quoted.push_str(&format!("\\x{:02X}", u32::from(c))),
            '\u{2028}' | '\u{2029}' | '\u{FEFF}' | '\u{FFFE}' | '\u{FFFF}' => {
                quoted.push_str(&format!("\\u{:04X}", u32::from(c)));
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
