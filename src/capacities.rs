use crate::{ParameterDescription, UuidRequirements};
use std::collections::{BTreeMap, BTreeSet};

/// Declares the tags and parameters a generator supports.
///
/// # Examples
///
/// ```rust
/// use uuid_factory::{GeneratorCapacities, StringDescription, UuidRequirements};
///
/// let mut capacities = GeneratorCapacities::new();
/// capacities
///     .add_tag("name_based")
///     .add_parameter("name", StringDescription::new(), true);
///
/// let mut requirements = UuidRequirements::new();
/// requirements.add_tag("name_based");
/// assert!(!capacities.fulfill_requirements(&requirements));
///
/// requirements.add_parameter("name", "foo");
/// assert!(capacities.fulfill_requirements(&requirements));
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct GeneratorCapacities {
    tags: BTreeSet<String>,
    parameters: BTreeMap<String, ParameterDescription>,
    required: BTreeSet<String>,
}

impl GeneratorCapacities {
    pub fn new() -> Self {
        Default::default()
    }

    /// Declares a tag. Declaring a tag twice has no further effect.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tags.insert(tag.into());
        self
    }

    /// Declares a parameter, replacing any earlier description under the same name.
    ///
    /// A parameter once declared as required stays required even if declared again with
    /// `required` set to `false`.
    pub fn add_parameter(
        &mut self,
        name: impl Into<String>,
        description: impl Into<ParameterDescription>,
        required: bool,
    ) -> &mut Self {
        let name = name.into();
        if required {
            self.required.insert(name.clone());
        }
        self.parameters.insert(name, description.into());
        self
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn parameters(&self) -> impl Iterator<Item = (&str, &ParameterDescription)> {
        self.parameters.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterDescription> {
        self.parameters.get(name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Tells whether a generator with these capacities can satisfy `requirements`.
    ///
    /// This holds when every required parameter is supplied, every supplied parameter is declared
    /// and accepts its value, and every requested tag is declared. Declared tags that are not
    /// requested do not matter.
    pub fn fulfill_requirements(&self, requirements: &UuidRequirements) -> bool {
        let supplied = requirements.parameters();

        self.required.iter().all(|name| supplied.contains_key(name))
            && supplied.iter().all(|(name, value)| {
                self.parameters
                    .get(name)
                    .map_or(false, |description| description.check(value))
            })
            && requirements.tags().iter().all(|tag| self.tags.contains(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::GeneratorCapacities;
    use crate::{IntegerDescription, StringDescription, UuidRequirements};

    fn size_description() -> IntegerDescription {
        let mut pd = IntegerDescription::new();
        pd.set_values([128]);
        pd
    }

    /// Accepts empty requirements when nothing is required
    #[test]
    fn accepts_empty_requirements_when_nothing_is_required() {
        let mut capacities = GeneratorCapacities::new();
        capacities
            .add_tag("rfc4122")
            .add_parameter("size", size_description(), false);
        assert!(capacities.fulfill_requirements(&UuidRequirements::new()));
    }

    /// Rejects undeclared tags until they are declared
    #[test]
    fn rejects_undeclared_tags_until_they_are_declared() {
        let mut capacities = GeneratorCapacities::new();
        capacities.add_tag("rfc4122");

        let mut requirements = UuidRequirements::new();
        requirements.add_tag("rfc4122");
        assert!(capacities.fulfill_requirements(&requirements));

        for tag in ["unguessable", "rfc4122v9", "name_based"] {
            requirements.add_tag(tag);
            assert!(!capacities.fulfill_requirements(&requirements));
            capacities.add_tag(tag);
            assert!(capacities.fulfill_requirements(&requirements));
        }
    }

    /// Rejects requirements missing a required parameter
    #[test]
    fn rejects_requirements_missing_a_required_parameter() {
        let mut capacities = GeneratorCapacities::new();
        capacities.add_parameter("name", StringDescription::new(), true);

        let mut requirements = UuidRequirements::new();
        assert!(!capacities.fulfill_requirements(&requirements));
        requirements.add_parameter("name", "foo");
        assert!(capacities.fulfill_requirements(&requirements));
    }

    /// Rejects undeclared parameters
    #[test]
    fn rejects_undeclared_parameters() {
        let capacities = GeneratorCapacities::new();
        let mut requirements = UuidRequirements::new();
        requirements.add_parameter("size", 128);
        assert!(!capacities.fulfill_requirements(&requirements));
    }

    /// Rejects values the description does not accept
    #[test]
    fn rejects_values_the_description_does_not_accept() {
        let mut capacities = GeneratorCapacities::new();
        capacities.add_parameter("size", size_description(), false);

        let mut requirements = UuidRequirements::new();
        requirements.add_parameter("size", 64);
        assert!(!capacities.fulfill_requirements(&requirements));
        requirements.add_parameter("size", "128");
        assert!(!capacities.fulfill_requirements(&requirements));
        requirements.add_parameter("size", 128);
        assert!(capacities.fulfill_requirements(&requirements));
    }

    /// Keeps a parameter required once declared so
    #[test]
    fn keeps_a_parameter_required_once_declared_so() {
        let mut capacities = GeneratorCapacities::new();
        capacities.add_parameter("name", StringDescription::new(), true);
        capacities.add_parameter("name", StringDescription::new(), false);
        assert!(capacities.is_required("name"));
        assert!(!capacities.fulfill_requirements(&UuidRequirements::new()));

        let mut capacities = GeneratorCapacities::new();
        capacities.add_parameter("name", StringDescription::new(), false);
        assert!(!capacities.is_required("name"));
        capacities.add_parameter("name", StringDescription::new(), true);
        assert!(capacities.is_required("name"));
    }

    /// Replaces the description of a redeclared parameter
    #[test]
    fn replaces_the_description_of_a_redeclared_parameter() {
        let mut capacities = GeneratorCapacities::new();
        capacities.add_parameter("size", size_description(), false);
        capacities.add_parameter("size", IntegerDescription::new(), false);

        let mut requirements = UuidRequirements::new();
        requirements.add_parameter("size", 64);
        assert!(capacities.fulfill_requirements(&requirements));
    }

    /// Lists declared tags once each
    #[test]
    fn lists_declared_tags_once_each() {
        let mut capacities = GeneratorCapacities::new();
        capacities.add_tag("b").add_tag("a").add_tag("b");
        assert_eq!(capacities.tags().collect::<Vec<_>>(), ["a", "b"]);
        assert!(capacities.has_tag("a"));
    }
}
