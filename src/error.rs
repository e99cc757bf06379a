use std::fmt;

/// Errors raised while configuring generators or generating identifiers.
///
/// Capability predicates such as [`GeneratorCapacities::fulfill_requirements`] never produce
/// these; they answer `false` instead.
///
/// [`GeneratorCapacities::fulfill_requirements`]: crate::GeneratorCapacities::fulfill_requirements
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum Error {
    /// A parameter description, tag, or registration was set up inconsistently.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A generator looked for a requirement parameter that is not present.
    #[error("the {0} parameter is not present")]
    MissingParameter(String),

    /// No registered generator could satisfy the requirements.
    #[error("No generator corresponds to the requirements")]
    NoGenerator,

    /// A UUID was built with a version outside of the RFC 4122 set.
    #[error("incorrect version used: {0}")]
    InvalidVersion(u8),
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid string representation")
    }
}

impl std::error::Error for ParseError {}
