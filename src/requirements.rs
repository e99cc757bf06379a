use crate::{GeneratorCapacities, ParameterValue};
use std::collections::{BTreeMap, BTreeSet};

/// Describes a desired UUID as a set of tags and named parameter values.
///
/// Values are not checked until matched against a generator's [`GeneratorCapacities`]. Use the
/// [`library`](crate::library) functions to set the well-known tags and parameters.
///
/// # Examples
///
/// ```rust
/// use uuid_factory::UuidRequirements;
///
/// let mut requirements = UuidRequirements::new();
/// requirements.add_tag("rfc4122").add_parameter("size", 128);
/// assert!(requirements.tags().contains("rfc4122"));
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct UuidRequirements {
    tags: BTreeSet<String>,
    parameters: BTreeMap<String, ParameterValue>,
}

impl UuidRequirements {
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates requirements from initial parameters and tags; duplicate tags collapse.
    pub fn with<P, T>(parameters: P, tags: T) -> Self
    where
        P: IntoIterator<Item = (String, ParameterValue)>,
        T: IntoIterator<Item = String>,
    {
        Self {
            tags: tags.into_iter().collect(),
            parameters: parameters.into_iter().collect(),
        }
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tags.insert(tag.into());
        self
    }

    /// Sets a parameter value; a later value replaces an earlier one.
    pub fn add_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> &mut Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn parameters(&self) -> &BTreeMap<String, ParameterValue> {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterValue> {
        self.parameters.get(name)
    }

    /// Same as [`GeneratorCapacities::fulfill_requirements`] called with `self`.
    pub fn comply_with_capacities(&self, capacities: &GeneratorCapacities) -> bool {
        capacities.fulfill_requirements(self)
    }
}
