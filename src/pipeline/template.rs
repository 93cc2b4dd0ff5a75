//! Hand written job template merged into the generated document
//!
//! The template holds YAML anchors and jobs the generator does not create
//! itself. It is parsed once and written back unchanged; its content is
//! never interpreted.

use super::errors::PipelineError;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Default location of the job template, relative to the repository root
pub const DEFAULT_JOB_BASE: &str = "script/gitlabci/job_base.yml";

/// Parsed job template
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobTemplate(Option<Value>);

impl JobTemplate {
    /// A template without content
    #[must_use]
    pub fn empty() -> Self {
        Self(None)
    }

    /// Reads and parses a template file
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Template`] if the file cannot be read or is
    /// not valid YAML.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let failure = |reason: String| PipelineError::Template {
            path: path.display().to_string(),
            reason,
        };
        let content = fs::read_to_string(path).map_err(|e| failure(e.to_string()))?;
        let template = Self::parse(&content).map_err(|e| failure(e.to_string()))?;
        tracing::debug!(path = %path.display(), empty = template.is_empty(), "loaded job template");
        Ok(template)
    }

    /// Parses template content
    ///
    /// # Errors
    ///
    /// Returns the parser error if the content is not valid YAML.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::empty());
        }
        let value: Value = serde_yaml::from_str(content)?;
        Ok(if value.is_null() {
            Self::empty()
        } else {
            Self(Some(value))
        })
    }

    /// Parsed content, if any
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.0.as_ref()
    }

    /// Returns true if the template has no content
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl From<Value> for JobTemplate {
    fn from(value: Value) -> Self {
        if value.is_null() {
            Self::empty()
        } else {
            Self(Some(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const TEMPLATE: &str = r#"
.base_cuda:
  image: registry.example.org/cuda:1.0
  tags:
    - cuda
"#;

    #[test]
    fn test_parse_template() {
        let template = JobTemplate::parse(TEMPLATE).unwrap();
        let value = template.value().unwrap();
        assert_eq!(value[".base_cuda"]["tags"][0].as_str(), Some("cuda"));
    }

    #[test]
    fn test_empty_template() {
        assert!(JobTemplate::parse("").unwrap().is_empty());
        assert!(JobTemplate::parse("  \n").unwrap().is_empty());
        assert!(JobTemplate::parse("~\n").unwrap().is_empty());
    }

    #[test]
    fn test_load_template_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("job_base.yml");
        fs::write(&path, TEMPLATE).unwrap();

        let template = JobTemplate::load(&path).unwrap();
        assert!(!template.is_empty());
    }

    #[test]
    fn test_load_missing_template_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.yml");

        let err = JobTemplate::load(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Template { .. }));
    }

    #[test]
    fn test_load_invalid_template_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.yml");
        fs::write(&path, "key: [unclosed\n").unwrap();

        let err = JobTemplate::load(&path).unwrap_err();
        assert!(err.to_string().contains("broken.yml"));
    }
}
