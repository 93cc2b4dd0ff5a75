//! Container image selection

use super::errors::JobError;
use super::globals::{Backend, Category, GCC};
use super::record::JobRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Registry and repository of the CI containers
pub const CONTAINER_REGISTRY: &str = "registry.hzdr.de/crp/alpaka-group-container/";

/// Image name stem, followed by the Ubuntu version
pub const IMAGE_STEM: &str = "alpaka-ci-ubuntu";

/// Marker of the gcc-only container flavours
pub const GCC_MARKER: &str = "-gcc";

/// Tag of the container images, e.g. `3.2`
///
/// The tag is a decimal number and is always rendered with a fractional
/// part, so `1` is written as `1.0`. Tags are zero or lie in
/// `[0.0001, 1e16)`, the range written in plain decimal notation.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ContainerVersion(f64);

impl ContainerVersion {
    /// Nonzero tags outside this range would need an exponent
    pub const RANGE: std::ops::Range<f64> = 0.0001..1e16;

    /// Creates a container version
    ///
    /// # Errors
    ///
    /// Returns the rejected value if it is neither zero nor inside
    /// [`ContainerVersion::RANGE`].
    #[allow(clippy::float_cmp)]
    pub fn new(version: f64) -> Result<Self, InvalidContainerVersion> {
        if version == 0.0 || Self::RANGE.contains(&version) {
            Ok(Self(version))
        } else {
            Err(InvalidContainerVersion(version.to_string()))
        }
    }

    /// Numeric value of the tag
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Rejected container version
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid container version '{0}': expected 0 or a number in [0.0001, 1e16)")]
pub struct InvalidContainerVersion(pub String);

impl TryFrom<f64> for ContainerVersion {
    type Error = InvalidContainerVersion;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContainerVersion> for f64 {
    fn from(version: ContainerVersion) -> Self {
        version.0
    }
}

impl FromStr for ContainerVersion {
    type Err = InvalidContainerVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| InvalidContainerVersion(s.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for ContainerVersion {
    #[allow(clippy::float_cmp)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Derives the container image of a record
///
/// # Errors
///
/// Returns [`JobError::MissingCategory`] if the record has no Ubuntu
/// version and [`JobError::InvalidVersion`] if an enabled CUDA version is
/// not a number.
pub fn job_image(job: &JobRecord, container_version: ContainerVersion) -> Result<String, JobError> {
    let ubuntu = job.require(Category::Ubuntu)?;
    let mut image = format!("{CONTAINER_REGISTRY}{IMAGE_STEM}{}", ubuntu.version);

    let host_is_gcc = job.host_compiler.name == GCC;
    if host_is_gcc && job.device_compiler.name == GCC {
        image.push_str(GCC_MARKER);
    }

    if let Some(cuda) = job.enabled_backend(Backend::GpuCuda) {
        image.push_str("-cuda");
        image.push_str(&cuda_tag(cuda)?.to_string());
        if host_is_gcc {
            image.push_str(GCC_MARKER);
        }
    } else if let Some(hip) = job.enabled_backend(Backend::GpuHip) {
        image.push_str("-rocm");
        image.push_str(hip);
    }

    image.push(':');
    image.push_str(&container_version.to_string());
    Ok(image)
}

/// Shapes a CUDA version for the image name, e.g. `11.0` becomes `110`
///
/// The version is multiplied by ten and truncated toward zero.
///
/// # Errors
///
/// Returns [`JobError::InvalidVersion`] if the version is not a number
/// or its tag does not fit an `i64`.
#[allow(clippy::cast_possible_truncation)]
pub fn cuda_tag(version: &str) -> Result<i64, JobError> {
    // 2^63, the first value past i64::MAX
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

    let invalid = || JobError::InvalidVersion {
        category: Category::Backend(Backend::GpuCuda),
        version: version.to_string(),
    };
    let value: f64 = version.trim().parse().map_err(|_| invalid())?;
    let scaled = (value * 10.0).trunc();
    if !(-I64_BOUND..I64_BOUND).contains(&scaled) {
        return Err(invalid());
    }
    Ok(scaled as i64)
}
