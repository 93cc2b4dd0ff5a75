//! Reading the job matrix written by the combination producer
//!
//! The matrix file is a list of waves, each a list of job records. YAML
//! and JSON are both accepted.

use super::document::Wave;
use super::errors::PipelineError;
use std::fs;
use std::path::Path;

/// Parses a job matrix
///
/// # Errors
///
/// Returns the parser error if the content is not a list of waves of
/// valid job records.
pub fn parse_waves(content: &str) -> Result<Vec<Wave>, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// Reads a job matrix file
///
/// # Errors
///
/// Returns [`PipelineError::Input`] if the file cannot be read or parsed.
pub fn load_waves(path: &Path) -> Result<Vec<Wave>, PipelineError> {
    let failure = |reason: String| PipelineError::Input {
        path: path.display().to_string(),
        reason,
    };
    let content = fs::read_to_string(path).map_err(|e| failure(e.to_string()))?;
    let waves = parse_waves(&content).map_err(|e| failure(e.to_string()))?;
    tracing::debug!(
        path = %path.display(),
        waves = waves.len(),
        jobs = waves.iter().map(Wave::len).sum::<usize>(),
        "loaded job matrix"
    );
    Ok(waves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MATRIX: &str = r#"
- - host_compiler: [gcc, "11"]
    device_compiler: [gcc, "11"]
    build_type: [build_type, Release]
    test_type: [test_type, runtime]
  - host_compiler: [clang, "14"]
    device_compiler: [clang, "14"]
    build_type: [build_type, Debug]
    test_type: [test_type, compile_only]
- - host_compiler: [gcc, "10"]
    device_compiler: [hipcc, "5.3"]
    build_type: [build_type, Release]
    test_type: [test_type, runtime]
"#;

    #[test]
    fn test_parse_yaml_matrix() {
        let waves = parse_waves(MATRIX).unwrap();
        assert_eq!(waves.len(), 2);
        assert_eq!(waves[0].len(), 2);
        assert_eq!(waves[1].jobs()[0].device_compiler.version, "5.3");
    }

    #[test]
    fn test_parse_json_matrix() {
        let json = r#"[[{"host_compiler": ["gcc", "11"], "device_compiler": ["gcc", "11"],
            "build_type": ["build_type", "Release"], "test_type": ["test_type", "runtime"]}]]"#;
        let waves = parse_waves(json).unwrap();
        assert_eq!(waves.len(), 1);
        assert_eq!(waves[0].jobs()[0].host_compiler.name, "gcc");
    }

    #[test]
    fn test_parse_rejects_malformed_record() {
        let yaml = "- - host_compiler: [gcc, \"11\"]\n";
        assert!(parse_waves(yaml).is_err());
    }

    #[test]
    fn test_load_missing_matrix() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_waves(&temp_dir.path().join("jobs.yml")).unwrap_err();
        assert!(matches!(err, PipelineError::Input { .. }));
    }

    #[test]
    fn test_load_matrix_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jobs.yml");
        std::fs::write(&path, MATRIX).unwrap();
        assert_eq!(load_waves(&path).unwrap().len(), 2);
    }
}
