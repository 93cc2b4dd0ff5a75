//! Pipeline wide variable defaults
//!
//! These apply to every job of the document, including the hand written
//! ones from the job template. They enable more CPU backends than the
//! generated jobs do; each generated job overrides all backend flags.

use crate::job::Variables;
use crate::job::globals::{Backend, FLAG_OFF, FLAG_ON};

/// Default of a backend flag for the whole pipeline
#[must_use]
pub fn global_backend_default(backend: Backend) -> &'static str {
    match backend {
        Backend::CpuSerial
        | Backend::CpuThreads
        | Backend::CpuOmp2Blocks
        | Backend::CpuOmp2Threads => FLAG_ON,
        _ => FLAG_OFF,
    }
}

/// Global variables of the pipeline document
#[must_use]
pub fn global_variables() -> Variables {
    let mut variables: Variables = [
        ("ALPAKA_CI_OS_NAME", "Linux"),
        // OFF compiles and runs the runtime tests, ON only compiles
        ("ALPAKA_CI_ANALYSIS", FLAG_OFF),
        ("ALPAKA_CI_RUN_TESTS", FLAG_ON),
        ("alpaka_CI", "GITLAB"),
        ("ALPAKA_CI_SANITIZERS", ""),
        ("ALPAKA_CI_INSTALL_CUDA", FLAG_OFF),
        ("ALPAKA_CI_INSTALL_HIP", FLAG_OFF),
        ("ALPAKA_CI_CMAKE_DIR", "$HOME/cmake"),
        ("BOOST_ROOT", "$HOME/boost"),
        ("ALPAKA_CI_BOOST_LIB_DIR", "$HOME/boost_libs"),
        ("ALPAKA_CI_CUDA_DIR", "$HOME/cuda"),
        ("ALPAKA_CI_HIP_ROOT_DIR", "$HOME/hip"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect();

    for backend in Backend::ALL {
        variables.insert(
            backend.flag().to_string(),
            global_backend_default(backend).to_string(),
        );
    }
    variables
}
