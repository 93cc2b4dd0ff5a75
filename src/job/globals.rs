//! Names shared by the job matrix producer and the generator
//!
//! The combination producer writes job records keyed by these category
//! names and fills them with these compiler and test-type values. Every
//! rule in [`crate::job`] refers to them by constant, never by literal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category key of the host compiler
pub const HOST_COMPILER: &str = "host_compiler";
/// Category key of the device compiler
pub const DEVICE_COMPILER: &str = "device_compiler";
/// Category key of the CMake version
pub const CMAKE: &str = "cmake";
/// Category key of the Boost version
pub const BOOST: &str = "boost";
/// Category key of the Ubuntu version
pub const UBUNTU: &str = "ubuntu";
/// Category key of the C++ standard
pub const CXX_STANDARD: &str = "cxx_standard";
/// Category key of the CMake build type
pub const BUILD_TYPE: &str = "build_type";
/// Category key of the test type
pub const TEST_TYPE: &str = "test_type";

/// GNU compiler
pub const GCC: &str = "gcc";
/// Clang compiler
pub const CLANG: &str = "clang";
/// NVIDIA CUDA compiler, needs a host compiler
pub const NVCC: &str = "nvcc";
/// Clang compiling CUDA code directly against the CUDA SDK
pub const CLANG_CUDA: &str = "clang-cuda";
/// ROCm HIP compiler
pub const HIPCC: &str = "hipcc";

/// Backend parameter value of a disabled backend
pub const OFF: &str = "off";

/// Test type: compile and run the tests
pub const TEST_RUNTIME: &str = "runtime";
/// Test type: only compile the tests
pub const TEST_COMPILE_ONLY: &str = "compile_only";

/// CMake-style switch value for enabled options
pub const FLAG_ON: &str = "ON";
/// CMake-style switch value for disabled options
pub const FLAG_OFF: &str = "OFF";

/// Transforms a parameter name into a shape allowed as environment variable
///
/// ```
/// use alpaka_jobgen::job::globals::env_var_name;
/// assert_eq!(env_var_name("clang-cuda"), "CLANG_CUDA");
/// ```
#[must_use]
pub fn env_var_name(name: &str) -> String {
    name.to_uppercase().replace('-', "_")
}

/// Accelerator backends whose enable flag is a job parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Backend {
    /// OpenACC for any target
    #[serde(rename = "alpaka_ACC_ANY_BT_OACC_ENABLE")]
    AnyOacc,
    /// OpenMP 5 for any target
    #[serde(rename = "alpaka_ACC_ANY_BT_OMP5_ENABLE")]
    AnyOmp5,
    /// OpenMP 2 blocks, sequential threads
    #[serde(rename = "alpaka_ACC_CPU_B_OMP2_T_SEQ_ENABLE")]
    CpuOmp2Blocks,
    /// Sequential blocks, fiber threads
    #[serde(rename = "alpaka_ACC_CPU_B_SEQ_T_FIBERS_ENABLE")]
    CpuFibers,
    /// Sequential blocks, OpenMP 2 threads
    #[serde(rename = "alpaka_ACC_CPU_B_SEQ_T_OMP2_ENABLE")]
    CpuOmp2Threads,
    /// Fully sequential CPU backend
    #[serde(rename = "alpaka_ACC_CPU_B_SEQ_T_SEQ_ENABLE")]
    CpuSerial,
    /// Sequential blocks, std::thread threads
    #[serde(rename = "alpaka_ACC_CPU_B_SEQ_T_THREADS_ENABLE")]
    CpuThreads,
    /// TBB blocks, sequential threads
    #[serde(rename = "alpaka_ACC_CPU_B_TBB_T_SEQ_ENABLE")]
    CpuTbbBlocks,
    /// CUDA GPU backend
    #[serde(rename = "alpaka_ACC_GPU_CUDA_ENABLE")]
    GpuCuda,
    /// CUDA as the only enabled backend
    #[serde(rename = "alpaka_ACC_GPU_CUDA_ONLY_MODE")]
    GpuCudaOnly,
    /// HIP GPU backend
    #[serde(rename = "alpaka_ACC_GPU_HIP_ENABLE")]
    GpuHip,
    /// HIP as the only enabled backend
    #[serde(rename = "alpaka_ACC_GPU_HIP_ONLY_MODE")]
    GpuHipOnly,
}

impl Backend {
    /// All backends, ordered by their flag name
    pub const ALL: [Backend; 12] = [
        Self::AnyOacc,
        Self::AnyOmp5,
        Self::CpuOmp2Blocks,
        Self::CpuFibers,
        Self::CpuOmp2Threads,
        Self::CpuSerial,
        Self::CpuThreads,
        Self::CpuTbbBlocks,
        Self::GpuCuda,
        Self::GpuCudaOnly,
        Self::GpuHip,
        Self::GpuHipOnly,
    ];

    /// Flag name, used both as job parameter key and as CMake variable
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::AnyOacc => "alpaka_ACC_ANY_BT_OACC_ENABLE",
            Self::AnyOmp5 => "alpaka_ACC_ANY_BT_OMP5_ENABLE",
            Self::CpuOmp2Blocks => "alpaka_ACC_CPU_B_OMP2_T_SEQ_ENABLE",
            Self::CpuFibers => "alpaka_ACC_CPU_B_SEQ_T_FIBERS_ENABLE",
            Self::CpuOmp2Threads => "alpaka_ACC_CPU_B_SEQ_T_OMP2_ENABLE",
            Self::CpuSerial => "alpaka_ACC_CPU_B_SEQ_T_SEQ_ENABLE",
            Self::CpuThreads => "alpaka_ACC_CPU_B_SEQ_T_THREADS_ENABLE",
            Self::CpuTbbBlocks => "alpaka_ACC_CPU_B_TBB_T_SEQ_ENABLE",
            Self::GpuCuda => "alpaka_ACC_GPU_CUDA_ENABLE",
            Self::GpuCudaOnly => "alpaka_ACC_GPU_CUDA_ONLY_MODE",
            Self::GpuHip => "alpaka_ACC_GPU_HIP_ENABLE",
            Self::GpuHipOnly => "alpaka_ACC_GPU_HIP_ONLY_MODE",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

impl FromStr for Backend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|backend| backend.flag() == s)
            .ok_or(())
    }
}

/// Closed set of parameter categories a job record may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Compiler for host code
    HostCompiler,
    /// Compiler for device code
    DeviceCompiler,
    /// CMake version
    Cmake,
    /// Boost version
    Boost,
    /// Ubuntu version of the container
    Ubuntu,
    /// C++ language standard
    CxxStandard,
    /// CMake build type
    BuildType,
    /// Test type (runtime or compile only)
    TestType,
    /// Enable flag of an accelerator backend
    Backend(Backend),
}

impl Category {
    /// Key of the category inside a serialized job record
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HostCompiler => HOST_COMPILER,
            Self::DeviceCompiler => DEVICE_COMPILER,
            Self::Cmake => CMAKE,
            Self::Boost => BOOST,
            Self::Ubuntu => UBUNTU,
            Self::CxxStandard => CXX_STANDARD,
            Self::BuildType => BUILD_TYPE,
            Self::TestType => TEST_TYPE,
            Self::Backend(backend) => backend.flag(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            HOST_COMPILER => Ok(Self::HostCompiler),
            DEVICE_COMPILER => Ok(Self::DeviceCompiler),
            CMAKE => Ok(Self::Cmake),
            BOOST => Ok(Self::Boost),
            UBUNTU => Ok(Self::Ubuntu),
            CXX_STANDARD => Ok(Self::CxxStandard),
            BUILD_TYPE => Ok(Self::BuildType),
            TEST_TYPE => Ok(Self::TestType),
            other => other.parse().map(Self::Backend),
        }
    }
}
