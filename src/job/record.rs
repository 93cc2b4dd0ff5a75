//! Job records: one point of the build matrix
//!
//! A job record binds a `(name, version)` pair to each parameter category
//! the job uses. The serialized shape is the one the combination producer
//! emits, a mapping from category key to a two-element list:
//!
//! ```yaml
//! host_compiler: [gcc, "11"]
//! device_compiler: [gcc, "11"]
//! build_type: [build_type, Release]
//! test_type: [test_type, runtime]
//! alpaka_ACC_GPU_CUDA_ENABLE: [alpaka_ACC_GPU_CUDA_ENABLE, "off"]
//! ```
//!
//! Host compiler, device compiler, build type and test type are required;
//! every other category is optional.

use super::errors::JobError;
use super::globals::{Backend, Category, OFF, TEST_COMPILE_ONLY, TEST_RUNTIME};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A `(name, version)` pair bound to a category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct ParameterValue {
    /// Parameter name, e.g. the compiler family
    pub name: String,
    /// Free-form version string
    pub version: String,
}

impl ParameterValue {
    /// Creates a new parameter value
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Returns true if the version is the literal `off`
    #[must_use]
    pub fn is_off(&self) -> bool {
        self.version == OFF
    }
}

impl From<(String, String)> for ParameterValue {
    fn from((name, version): (String, String)) -> Self {
        Self { name, version }
    }
}

impl From<ParameterValue> for (String, String) {
    fn from(value: ParameterValue) -> Self {
        (value.name, value.version)
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.version)
    }
}

/// One combination of the build matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, ParameterValue>",
    into = "BTreeMap<String, ParameterValue>"
)]
pub struct JobRecord {
    /// Compiler for host code
    pub host_compiler: ParameterValue,
    /// Compiler for device code
    pub device_compiler: ParameterValue,
    /// CMake build type
    pub build_type: ParameterValue,
    /// Runtime or compile-only testing
    pub test_type: ParameterValue,
    /// CMake version
    pub cmake: Option<ParameterValue>,
    /// Boost version
    pub boost: Option<ParameterValue>,
    /// Ubuntu version of the container
    pub ubuntu: Option<ParameterValue>,
    /// C++ standard
    pub cxx_standard: Option<ParameterValue>,
    /// Backend enable flags present in the record
    pub backends: BTreeMap<Backend, ParameterValue>,
}

impl JobRecord {
    /// Creates a record holding only the required categories
    #[must_use]
    pub fn new(
        host_compiler: ParameterValue,
        device_compiler: ParameterValue,
        build_type: ParameterValue,
        test_type: ParameterValue,
    ) -> Self {
        Self {
            host_compiler,
            device_compiler,
            build_type,
            test_type,
            cmake: None,
            boost: None,
            ubuntu: None,
            cxx_standard: None,
            backends: BTreeMap::new(),
        }
    }

    /// Builds a record from category/value pairs
    ///
    /// # Errors
    ///
    /// Returns [`JobError::MissingCategory`] if one of the required
    /// categories is absent.
    pub fn from_parameters(
        parameters: impl IntoIterator<Item = (Category, ParameterValue)>,
    ) -> Result<Self, JobError> {
        let mut parameters: BTreeMap<Category, ParameterValue> = parameters.into_iter().collect();
        let mut take = |category: Category| {
            parameters
                .remove(&category)
                .ok_or(JobError::MissingCategory(category))
        };

        let host_compiler = take(Category::HostCompiler)?;
        let device_compiler = take(Category::DeviceCompiler)?;
        let build_type = take(Category::BuildType)?;
        let test_type = take(Category::TestType)?;

        let mut record = Self::new(host_compiler, device_compiler, build_type, test_type);
        for (category, value) in parameters {
            record.set(category, value);
        }
        Ok(record)
    }

    /// Sets a category, replacing any previous value
    #[must_use]
    pub fn with(mut self, category: Category, value: ParameterValue) -> Self {
        self.set(category, value);
        self
    }

    fn set(&mut self, category: Category, value: ParameterValue) {
        match category {
            Category::HostCompiler => self.host_compiler = value,
            Category::DeviceCompiler => self.device_compiler = value,
            Category::BuildType => self.build_type = value,
            Category::TestType => self.test_type = value,
            Category::Cmake => self.cmake = Some(value),
            Category::Boost => self.boost = Some(value),
            Category::Ubuntu => self.ubuntu = Some(value),
            Category::CxxStandard => self.cxx_standard = Some(value),
            Category::Backend(backend) => {
                self.backends.insert(backend, value);
            }
        }
    }

    /// Gets the value of a category, if present
    #[must_use]
    pub fn get(&self, category: Category) -> Option<&ParameterValue> {
        match category {
            Category::HostCompiler => Some(&self.host_compiler),
            Category::DeviceCompiler => Some(&self.device_compiler),
            Category::BuildType => Some(&self.build_type),
            Category::TestType => Some(&self.test_type),
            Category::Cmake => self.cmake.as_ref(),
            Category::Boost => self.boost.as_ref(),
            Category::Ubuntu => self.ubuntu.as_ref(),
            Category::CxxStandard => self.cxx_standard.as_ref(),
            Category::Backend(backend) => self.backends.get(&backend),
        }
    }

    /// Gets the value of a category a rule cannot do without
    ///
    /// # Errors
    ///
    /// Returns [`JobError::MissingCategory`] if the category is absent.
    pub fn require(&self, category: Category) -> Result<&ParameterValue, JobError> {
        self.get(category).ok_or(JobError::MissingCategory(category))
    }

    /// Version of a backend if its flag is present and not `off`
    #[must_use]
    pub fn enabled_backend(&self, backend: Backend) -> Option<&str> {
        self.backends
            .get(&backend)
            .filter(|value| !value.is_off())
            .map(|value| value.version.as_str())
    }

    /// Returns true if the tests are only compiled
    #[must_use]
    pub fn is_compile_only(&self) -> bool {
        self.test_type.version == TEST_COMPILE_ONLY
    }

    /// Returns true if the tests are compiled and executed
    #[must_use]
    pub fn runs_tests(&self) -> bool {
        self.test_type.version == TEST_RUNTIME
    }

    /// Iterates over all present categories in category order
    pub fn parameters(&self) -> impl Iterator<Item = (Category, &ParameterValue)> {
        let fixed = [
            Category::HostCompiler,
            Category::DeviceCompiler,
            Category::Cmake,
            Category::Boost,
            Category::Ubuntu,
            Category::CxxStandard,
            Category::BuildType,
            Category::TestType,
        ];
        fixed
            .into_iter()
            .filter_map(move |category| self.get(category).map(|value| (category, value)))
            .chain(
                self.backends
                    .iter()
                    .map(|(backend, value)| (Category::Backend(*backend), value)),
            )
    }
}

impl TryFrom<BTreeMap<String, ParameterValue>> for JobRecord {
    type Error = JobError;

    fn try_from(map: BTreeMap<String, ParameterValue>) -> Result<Self, Self::Error> {
        let mut parameters = Vec::with_capacity(map.len());
        for (key, value) in map {
            let category: Category = key
                .parse()
                .map_err(|()| JobError::UnknownCategory(key.clone()))?;
            parameters.push((category, value));
        }
        Self::from_parameters(parameters)
    }
}

impl From<JobRecord> for BTreeMap<String, ParameterValue> {
    fn from(record: JobRecord) -> Self {
        record
            .parameters()
            .map(|(category, value)| (category.as_str().to_string(), value.clone()))
            .collect()
    }
}
