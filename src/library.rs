//! Shared vocabulary of tags and parameters.
//!
//! Independently written generators agree on these names through the `allow_*` functions, which
//! declare them on [`GeneratorCapacities`], and callers request them through the `request_*`
//! functions, which set them on [`UuidRequirements`].
//!
//! ```rust
//! use uuid_factory::{library, GeneratorCapacities, UuidRequirements};
//!
//! let mut capacities = GeneratorCapacities::new();
//! library::allow_rfc4122(&mut capacities, Some(4))?;
//! library::allow_unguessable(&mut capacities);
//!
//! let mut requirements = UuidRequirements::new();
//! library::request_rfc4122(&mut requirements, Some(4))?;
//! assert!(capacities.fulfill_requirements(&requirements));
//! # Ok::<(), uuid_factory::Error>(())
//! ```

use crate::{Error, GeneratorCapacities, IntegerDescription, StringDescription, UuidRequirements};

pub const TAG_NAME_BASED: &str = "name_based";
pub const TAG_RFC4122: &str = "rfc4122";
pub const TAG_UNGUESSABLE: &str = "unguessable";

pub const PARAMETER_NAME_SIZE: &str = "size";
pub const PARAMETER_NAME_NAME: &str = "name";
pub const PARAMETER_NAME_NAMESPACE: &str = "namespace";

/// Constraints on the `size` parameter accepted by [`allow_size`].
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SizeOptions {
    /// Lower bound; anything below zero is raised to zero.
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub values: Option<Vec<i64>>,
    pub required: bool,
}

impl Default for SizeOptions {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            values: None,
            required: true,
        }
    }
}

/// Declares the integer `size` parameter, never accepting negative sizes.
pub fn allow_size<'a>(
    capacities: &'a mut GeneratorCapacities,
    options: SizeOptions,
) -> Result<&'a mut GeneratorCapacities, Error> {
    let mut pd = IntegerDescription::new();
    pd.set_min_value(options.min.unwrap_or(0).max(0))?;
    if let Some(max) = options.max {
        pd.set_max_value(max)?;
    }
    if let Some(values) = options.values {
        pd.set_values(values);
    }
    Ok(capacities.add_parameter(PARAMETER_NAME_SIZE, pd, options.required))
}

pub fn request_size(requirements: &mut UuidRequirements, size: i64) -> &mut UuidRequirements {
    requirements.add_parameter(PARAMETER_NAME_SIZE, size)
}

/// Returns the requested size, or [`Error::MissingParameter`] if absent or not an integer.
pub fn extract_size(requirements: &UuidRequirements) -> Result<i64, Error> {
    requirements
        .parameter(PARAMETER_NAME_SIZE)
        .and_then(|e| e.as_integer())
        .ok_or_else(|| Error::MissingParameter(PARAMETER_NAME_SIZE.to_owned()))
}

/// Declares the `name_based` tag and the string `name` parameter.
pub fn allow_name(capacities: &mut GeneratorCapacities, required: bool) -> &mut GeneratorCapacities {
    capacities
        .add_tag(TAG_NAME_BASED)
        .add_parameter(PARAMETER_NAME_NAME, StringDescription::new(), required)
}

pub fn request_name<'a>(
    requirements: &'a mut UuidRequirements,
    name: &str,
) -> &'a mut UuidRequirements {
    requirements
        .add_tag(TAG_NAME_BASED)
        .add_parameter(PARAMETER_NAME_NAME, name)
}

pub fn extract_name(requirements: &UuidRequirements) -> Result<&str, Error> {
    extract_string(requirements, PARAMETER_NAME_NAME)
}

/// Declares the string `namespace` parameter that scopes a name.
pub fn allow_namespace(
    capacities: &mut GeneratorCapacities,
    required: bool,
) -> &mut GeneratorCapacities {
    capacities.add_parameter(PARAMETER_NAME_NAMESPACE, StringDescription::new(), required)
}

pub fn request_namespace<'a>(
    requirements: &'a mut UuidRequirements,
    namespace: &str,
) -> &'a mut UuidRequirements {
    requirements.add_parameter(PARAMETER_NAME_NAMESPACE, namespace)
}

pub fn extract_namespace(requirements: &UuidRequirements) -> Result<&str, Error> {
    extract_string(requirements, PARAMETER_NAME_NAMESPACE)
}

/// Declares the `unguessable` tag, a signal without parameter.
pub fn allow_unguessable(capacities: &mut GeneratorCapacities) -> &mut GeneratorCapacities {
    capacities.add_tag(TAG_UNGUESSABLE)
}

pub fn request_unguessable(requirements: &mut UuidRequirements) -> &mut UuidRequirements {
    requirements.add_tag(TAG_UNGUESSABLE)
}

/// Declares the `rfc4122` tag and, given a version, the `rfc4122v{version}` tag.
///
/// Fails with [`Error::Configuration`] if the version is negative.
pub fn allow_rfc4122(
    capacities: &mut GeneratorCapacities,
    version: Option<i64>,
) -> Result<&mut GeneratorCapacities, Error> {
    let version_tag = version.map(rfc4122_version_tag).transpose()?;
    capacities.add_tag(TAG_RFC4122);
    if let Some(tag) = version_tag {
        capacities.add_tag(tag);
    }
    Ok(capacities)
}

/// Requests the `rfc4122` tag and, given a version, the `rfc4122v{version}` tag.
///
/// Fails with [`Error::Configuration`] if the version is negative.
pub fn request_rfc4122(
    requirements: &mut UuidRequirements,
    version: Option<i64>,
) -> Result<&mut UuidRequirements, Error> {
    let version_tag = version.map(rfc4122_version_tag).transpose()?;
    requirements.add_tag(TAG_RFC4122);
    if let Some(tag) = version_tag {
        requirements.add_tag(tag);
    }
    Ok(requirements)
}

fn rfc4122_version_tag(version: i64) -> Result<String, Error> {
    if version < 0 {
        return Err(Error::configuration(format!(
            "the version must not be negative: {}",
            version
        )));
    }
    Ok(format!("{}v{}", TAG_RFC4122, version))
}

fn extract_string<'a>(requirements: &'a UuidRequirements, name: &str) -> Result<&'a str, Error> {
    requirements
        .parameter(name)
        .and_then(|e| e.as_str())
        .ok_or_else(|| Error::MissingParameter(name.to_owned()))
}
