//! Declarative macros for job records
//!
//! Records are written the way the combination producer keys them:
//!
//! ```
//! use alpaka_jobgen::job_record;
//!
//! let record = job_record! {
//!     host_compiler => ("gcc", "11"),
//!     device_compiler => ("nvcc", "11.2"),
//!     build_type => ("build_type", "Release"),
//!     test_type => ("test_type", "runtime"),
//!     alpaka_ACC_GPU_CUDA_ENABLE => ("alpaka_ACC_GPU_CUDA_ENABLE", "11.2"),
//! }
//! .unwrap();
//! assert_eq!(record.device_compiler.name, "nvcc");
//! ```

/// Creates a parameter value
#[macro_export]
macro_rules! param {
    ($name:expr, $version:expr) => {
        $crate::job::ParameterValue::new($name, $version)
    };
}

/// Creates a job record from `category => (name, version)` pairs
///
/// Evaluates to `Result<JobRecord, JobError>`; unknown categories and
/// missing required ones are errors.
#[macro_export]
macro_rules! job_record {
    ($($category:ident => ($name:expr, $version:expr)),* $(,)?) => {{
        let mut parameters = ::std::collections::BTreeMap::new();
        $(
            parameters.insert(
                ::std::string::String::from(stringify!($category)),
                $crate::param!($name, $version),
            );
        )*
        $crate::job::JobRecord::try_from(parameters)
    }};
}

/// Creates a wave from job records
#[macro_export]
macro_rules! wave {
    ($($record:expr),* $(,)?) => {
        $crate::pipeline::Wave::new(vec![$($record),*])
    };
}

#[cfg(test)]
mod tests {
    use crate::job::{Backend, Category, JobError};

    #[test]
    fn test_job_record_macro() {
        let record = job_record! {
            host_compiler => ("gcc", "11"),
            device_compiler => ("hipcc", "5.3"),
            build_type => ("build_type", "Debug"),
            test_type => ("test_type", "runtime"),
            alpaka_ACC_GPU_HIP_ENABLE => ("alpaka_ACC_GPU_HIP_ENABLE", "5.3"),
        }
        .unwrap();
        assert_eq!(record.enabled_backend(Backend::GpuHip), Some("5.3"));
    }

    #[test]
    fn test_job_record_macro_reports_missing_category() {
        let err = job_record! {
            host_compiler => ("gcc", "11"),
            device_compiler => ("gcc", "11"),
            test_type => ("test_type", "runtime"),
        }
        .unwrap_err();
        assert_eq!(err, JobError::MissingCategory(Category::BuildType));
    }

    #[test]
    fn test_wave_macro() {
        let record = job_record! {
            host_compiler => ("gcc", "11"),
            device_compiler => ("gcc", "11"),
            build_type => ("build_type", "Debug"),
            test_type => ("test_type", "runtime"),
        }
        .unwrap();
        let wave = wave![record.clone(), record];
        assert_eq!(wave.len(), 2);
    }
}
