//! Job naming
//!
//! GitLab runs only one job per name, so the name has to encode every
//! parameter that distinguishes two jobs of the matrix.

use super::errors::JobError;
use super::globals::{Backend, CLANG_CUDA, Category, NVCC};
use super::record::JobRecord;

/// Prefix of every job name
pub const JOB_NAME_PREFIX: &str = "linux_";

/// Suffix of jobs which only compile the tests
pub const COMPILE_ONLY_SUFFIX: &str = "_compile_only";

/// Categories encoded into the version suffix, in order
pub const SUFFIX_CATEGORIES: [Category; 5] = [
    Category::Cmake,
    Category::Boost,
    Category::Ubuntu,
    Category::CxxStandard,
    Category::BuildType,
];

/// Derives the job name of a record
///
/// # Errors
///
/// Returns [`JobError::MissingCategory`] if the device compiler is
/// `clang-cuda` and the record has no CUDA backend parameter.
pub fn job_name(job: &JobRecord) -> Result<String, JobError> {
    let device = &job.device_compiler;
    let mut name = format!("{JOB_NAME_PREFIX}{}{}", device.name, device.version);

    if device.name == NVCC {
        name.push('-');
        name.push_str(&job.host_compiler.to_string());
    }

    if device.name == CLANG_CUDA {
        let cuda = job.require(Category::Backend(Backend::GpuCuda))?;
        name.push_str("-cuda");
        name.push_str(&cuda.version);
    }

    if job.is_compile_only() {
        name.push_str(COMPILE_ONLY_SUFFIX);
    }

    name.push_str(&version_suffix(job));
    Ok(name)
}

/// Encodes the software versions of a record
///
/// Absent categories contribute nothing.
#[must_use]
pub fn version_suffix(job: &JobRecord) -> String {
    let mut suffix = String::new();
    for category in SUFFIX_CATEGORIES {
        let Some(value) = job.get(category) else {
            continue;
        };
        suffix.push('_');
        match category {
            Category::CxxStandard => {
                suffix.push_str("cxx");
                suffix.push_str(&value.version);
            }
            Category::BuildType => suffix.push_str(&value.version),
            _ => suffix.push_str(&value.to_string()),
        }
    }
    suffix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::globals::{CLANG, GCC, HIPCC, TEST_COMPILE_ONLY, TEST_RUNTIME};
    use crate::job::record::ParameterValue;
    use std::collections::HashSet;

    fn job(device: (&str, &str), host: (&str, &str)) -> JobRecord {
        JobRecord::new(
            ParameterValue::new(host.0, host.1),
            ParameterValue::new(device.0, device.1),
            ParameterValue::new("build_type", "Release"),
            ParameterValue::new("test_type", TEST_RUNTIME),
        )
    }

    #[test]
    fn test_gcc_job_name() {
        let record = job((GCC, "11"), (GCC, "11"))
            .with(Category::Cmake, ParameterValue::new("cmake", "3.22"))
            .with(Category::Boost, ParameterValue::new("boost", "1.79"))
            .with(Category::Ubuntu, ParameterValue::new("ubuntu", "20.04"));
        assert_eq!(
            job_name(&record).unwrap(),
            "linux_gcc11_cmake3.22_boost1.79_ubuntu20.04_Release"
        );
    }

    #[test]
    fn test_nvcc_adds_host_compiler() {
        let record = job((NVCC, "11.2"), (CLANG, "12"));
        assert_eq!(job_name(&record).unwrap(), "linux_nvcc11.2-clang12_Release");
    }

    #[test]
    fn test_clang_cuda_adds_sdk_version() {
        let record = job((CLANG_CUDA, "14"), (CLANG_CUDA, "14")).with(
            Category::Backend(Backend::GpuCuda),
            ParameterValue::new(Backend::GpuCuda.flag(), "11.5"),
        );
        assert_eq!(job_name(&record).unwrap(), "linux_clang-cuda14-cuda11.5_Release");
    }

    #[test]
    fn test_clang_cuda_without_cuda_parameter_is_malformed() {
        let record = job((CLANG_CUDA, "14"), (CLANG_CUDA, "14"));
        assert_eq!(
            job_name(&record),
            Err(JobError::MissingCategory(Category::Backend(Backend::GpuCuda)))
        );
    }

    #[test]
    fn test_compile_only_suffix_precedes_versions() {
        let mut record = job((HIPCC, "5.3"), (HIPCC, "5.3"))
            .with(Category::CxxStandard, ParameterValue::new("cxx_standard", "20"));
        record.test_type = ParameterValue::new("test_type", TEST_COMPILE_ONLY);
        assert_eq!(
            job_name(&record).unwrap(),
            "linux_hipcc5.3_compile_only_cxx20_Release"
        );
    }

    #[test]
    fn test_suffix_order_is_fixed() {
        let record = job((GCC, "12"), (GCC, "12"))
            .with(Category::CxxStandard, ParameterValue::new("cxx_standard", "17"))
            .with(Category::Ubuntu, ParameterValue::new("ubuntu", "22.04"))
            .with(Category::Cmake, ParameterValue::new("cmake", "3.25"));
        assert_eq!(version_suffix(&record), "_cmake3.25_ubuntu22.04_cxx17_Release");
    }

    #[test]
    fn test_names_differ_across_name_affecting_parameters() {
        let mut names = HashSet::new();
        let mut count = 0;
        for (device, host) in [
            ((GCC, "10"), (GCC, "10")),
            ((GCC, "11"), (GCC, "11")),
            ((CLANG, "14"), (CLANG, "14")),
            ((NVCC, "11.2"), (GCC, "10")),
            ((NVCC, "11.2"), (CLANG, "12")),
            ((HIPCC, "5.2"), (HIPCC, "5.2")),
        ] {
            for cmake in ["3.22", "3.25"] {
                for build_type in ["Release", "Debug"] {
                    for test_type in [TEST_RUNTIME, TEST_COMPILE_ONLY] {
                        let mut record = job(device, host)
                            .with(Category::Cmake, ParameterValue::new("cmake", cmake));
                        record.build_type = ParameterValue::new("build_type", build_type);
                        record.test_type = ParameterValue::new("test_type", test_type);
                        names.insert(job_name(&record).unwrap());
                        count += 1;
                    }
                }
            }
        }
        assert_eq!(names.len(), count);
    }
}
