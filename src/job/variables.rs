//! Job environment variables
//!
//! Variables are computed in two layers: a job independent baseline and a
//! set of overrides derived from the record. [`merge`] lets the overrides
//! win and drops every entry whose value is empty.

use super::errors::JobError;
use super::globals::{Backend, Category, FLAG_OFF, FLAG_ON, HIPCC};
use super::record::JobRecord;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Environment variables of a job, ordered by name
pub type Variables = BTreeMap<String, String>;

/// Clang version shipped with each supported ROCm release
static HIP_CLANG_VERSIONS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([("5.0", "14"), ("5.1", "14"), ("5.2", "14"), ("5.3", "15")])
});

/// Looks up the clang version belonging to a HIP SDK version
#[must_use]
pub fn hip_clang_version(hip_version: &str) -> Option<&'static str> {
    HIP_CLANG_VERSIONS.get(hip_version).copied()
}

/// Variables every job gets, independent of its parameters
#[must_use]
pub fn baseline_variables() -> Variables {
    [
        // only Linux runners are available
        ("ALPAKA_CI_OS_NAME", "Linux"),
        ("ALPAKA_CI_BUILD_JOBS", "$CI_CPUS"),
        ("OMP_NUM_THREADS", "$CI_CPUS"),
        // lets the test scripts detect the CI they run on
        ("alpaka_CI", "GITLAB"),
        ("ALPAKA_CI_ANALYSIS", FLAG_OFF),
        ("ALPAKA_CI_SANITIZERS", ""),
        // install locations, if a version is not already in the container
        ("ALPAKA_CI_CMAKE_DIR", "$HOME/cmake"),
        ("BOOST_ROOT", "$HOME/boost"),
        ("ALPAKA_CI_BOOST_LIB_DIR", "$HOME/boost_libs"),
        ("BOOST_LIBRARYDIR", "/opt/boost/${ALPAKA_BOOST_VERSION}/lib"),
        ("ALPAKA_CI_CUDA_DIR", "$HOME/cuda"),
        ("ALPAKA_CI_HIP_ROOT_DIR", "$HOME/hip"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}

/// Default of a backend flag inside a job, before the record is applied
#[must_use]
pub fn job_backend_default(backend: Backend) -> &'static str {
    match backend {
        Backend::CpuSerial => FLAG_ON,
        _ => FLAG_OFF,
    }
}

/// Variables derived from the parameters of a record
///
/// # Errors
///
/// Returns [`JobError::MissingCategory`] if the record has no CMake or
/// no Boost version.
pub fn job_overrides(job: &JobRecord) -> Result<Variables, JobError> {
    let mut variables = Variables::new();
    let mut set = |name: &str, value: &str| {
        variables.insert(name.to_string(), value.to_string());
    };

    set("CMAKE_BUILD_TYPE", &job.build_type.version);
    set(
        "ALPAKA_CI_RUN_TESTS",
        if job.runs_tests() { FLAG_ON } else { FLAG_OFF },
    );
    set("ALPAKA_CI_CMAKE_VER", &job.require(Category::Cmake)?.version);
    set("ALPAKA_BOOST_VERSION", &job.require(Category::Boost)?.version);

    for backend in Backend::ALL {
        set(backend.flag(), job_backend_default(backend));
    }

    if job.device_compiler.name == HIPCC {
        let hip_version = job.device_compiler.version.as_str();
        set(Backend::GpuHip.flag(), FLAG_ON);
        set("CC", "clang");
        set("CXX", "clang++");
        set("GPU_TARGETS", "${CI_GPU_ARCH}");
        match hip_clang_version(hip_version) {
            Some(clang) => set("ALPAKA_CI_CLANG_VER", clang),
            None => tracing::warn!(
                hip_version,
                "unknown hip version, ALPAKA_CI_CLANG_VER is not set"
            ),
        }
        set("ALPAKA_CI_HIP_VERSION", hip_version);
        set("ALPAKA_CI_STDLIB", "libstdc++");
    }

    Ok(variables)
}

/// Merges two layers, `overrides` taking precedence
///
/// Entries with an empty value are dropped.
#[must_use]
pub fn merge(mut baseline: Variables, overrides: Variables) -> Variables {
    baseline.extend(overrides);
    baseline.retain(|_, value| !value.is_empty());
    baseline
}

/// Derives the complete variable set of a record
///
/// # Errors
///
/// See [`job_overrides`].
pub fn job_variables(job: &JobRecord) -> Result<Variables, JobError> {
    Ok(merge(baseline_variables(), job_overrides(job)?))
}
