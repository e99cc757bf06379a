//! Typed parameter values and the validators generators declare for them.

use crate::Error;
use std::fmt;

/// A value attached to a named requirement parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParameterValue {
    Integer(i64),
    String(String),
}

impl ParameterValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            Self::Integer(_) => None,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{}", value),
            Self::String(value) => write!(f, "{:?}", value),
        }
    }
}

impl From<i64> for ParameterValue {
    fn from(src: i64) -> Self {
        Self::Integer(src)
    }
}

impl From<i32> for ParameterValue {
    fn from(src: i32) -> Self {
        Self::Integer(src.into())
    }
}

impl From<&str> for ParameterValue {
    fn from(src: &str) -> Self {
        Self::String(src.to_owned())
    }
}

impl From<String> for ParameterValue {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

/// Describes the values a generator accepts for one parameter.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ParameterDescription {
    Integer(IntegerDescription),
    String(StringDescription),
}

impl ParameterDescription {
    /// Tells whether `value` is acceptable. A value of the wrong type is simply not acceptable.
    pub fn check(&self, value: &ParameterValue) -> bool {
        match (self, value) {
            (Self::Integer(description), ParameterValue::Integer(value)) => {
                description.check(*value)
            }
            (Self::String(description), ParameterValue::String(value)) => description.check(value),
            _ => false,
        }
    }

    /// Returns a sentence describing the accepted values.
    pub fn human_readable_help(&self) -> String {
        match self {
            Self::Integer(description) => description.human_readable_help(),
            Self::String(description) => description.human_readable_help(),
        }
    }
}

impl From<IntegerDescription> for ParameterDescription {
    fn from(src: IntegerDescription) -> Self {
        Self::Integer(src)
    }
}

impl From<StringDescription> for ParameterDescription {
    fn from(src: StringDescription) -> Self {
        Self::String(src)
    }
}

/// Accepts integers within optional inclusive bounds and an optional set of allowed values.
///
/// # Examples
///
/// ```rust
/// use uuid_factory::IntegerDescription;
///
/// let mut pd = IntegerDescription::new();
/// pd.set_min_value(0)?;
/// pd.set_values(vec![128, 256]);
/// assert!(pd.check(128));
/// assert!(!pd.check(64));
/// # Ok::<(), uuid_factory::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct IntegerDescription {
    min: Option<i64>,
    max: Option<i64>,
    values: Option<Vec<i64>>,
}

impl IntegerDescription {
    pub const fn new() -> Self {
        Self {
            min: None,
            max: None,
            values: None,
        }
    }

    /// Sets the inclusive lower bound; fails if it is greater than the upper bound.
    pub fn set_min_value(&mut self, min: i64) -> Result<&mut Self, Error> {
        if matches!(self.max, Some(max) if min > max) {
            return Err(Error::configuration(
                "value given for min is greater than max",
            ));
        }
        self.min = Some(min);
        Ok(self)
    }

    /// Sets the inclusive upper bound; fails if it is lower than the lower bound.
    pub fn set_max_value(&mut self, max: i64) -> Result<&mut Self, Error> {
        if matches!(self.min, Some(min) if min > max) {
            return Err(Error::configuration("value given for max is lower than min"));
        }
        self.max = Some(max);
        Ok(self)
    }

    /// Restricts the accepted values to `values`.
    pub fn set_values(&mut self, values: impl IntoIterator<Item = i64>) -> &mut Self {
        self.values = Some(values.into_iter().collect());
        self
    }

    pub fn min_value(&self) -> Option<i64> {
        self.min
    }

    pub fn max_value(&self) -> Option<i64> {
        self.max
    }

    pub fn values(&self) -> Option<&[i64]> {
        self.values.as_deref()
    }

    pub fn check(&self, value: i64) -> bool {
        self.min.map_or(true, |min| value >= min)
            && self.max.map_or(true, |max| value <= max)
            && self.values.as_ref().map_or(true, |values| values.contains(&value))
    }

    pub fn human_readable_help(&self) -> String {
        let mut info = Vec::new();
        if let Some(min) = self.min {
            info.push(format!("greater or equal than {}", min));
        }
        if let Some(max) = self.max {
            info.push(format!("lower or equal than {}", max));
        }
        if let Some(values) = &self.values {
            let values: Vec<_> = values.iter().map(i64::to_string).collect();
            info.push(format!("in {{ {} }}", values.join(", ")));
        }
        format!("The value must be an integer {}.", info.join(", "))
    }
}

/// Accepts strings whose byte length lies within optional inclusive bounds and that belong to an
/// optional set of allowed values.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct StringDescription {
    min_length: Option<usize>,
    max_length: Option<usize>,
    values: Option<Vec<String>>,
}

impl StringDescription {
    pub const fn new() -> Self {
        Self {
            min_length: None,
            max_length: None,
            values: None,
        }
    }

    pub fn set_min_length(&mut self, min: usize) -> Result<&mut Self, Error> {
        if matches!(self.max_length, Some(max) if min > max) {
            return Err(Error::configuration("min length cannot be larger than max"));
        }
        self.min_length = Some(min);
        Ok(self)
    }

    pub fn set_max_length(&mut self, max: usize) -> Result<&mut Self, Error> {
        if matches!(self.min_length, Some(min) if min > max) {
            return Err(Error::configuration("max length cannot be shorter than min"));
        }
        self.max_length = Some(max);
        Ok(self)
    }

    pub fn set_values<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn min_length(&self) -> Option<usize> {
        self.min_length
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub fn values(&self) -> Option<&[String]> {
        self.values.as_deref()
    }

    pub fn check(&self, value: &str) -> bool {
        self.min_length.map_or(true, |min| value.len() >= min)
            && self.max_length.map_or(true, |max| value.len() <= max)
            && self
                .values
                .as_ref()
                .map_or(true, |values| values.iter().any(|e| e == value))
    }

    pub fn human_readable_help(&self) -> String {
        let mut info = Vec::new();
        if let Some(min) = self.min_length {
            info.push(format!("at least {} chars long", min));
        }
        if let Some(max) = self.max_length {
            info.push(format!("at most {} chars long", max));
        }
        if let Some(values) = &self.values {
            info.push(format!("in {{ {} }}", values.join(", ")));
        }
        format!("The value must be a string {}.", info.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::{IntegerDescription, ParameterDescription, ParameterValue, StringDescription};

    /// Accepts any integer without constraints
    #[test]
    fn accepts_any_integer_without_constraints() {
        let pd = IntegerDescription::new();
        for e in [i64::MIN, -1, 0, 1, 128, i64::MAX] {
            assert!(pd.check(e));
        }
    }

    /// Compares integer bounds inclusively
    #[test]
    fn compares_integer_bounds_inclusively() {
        let mut pd = IntegerDescription::new();
        pd.set_min_value(-3).unwrap().set_max_value(5).unwrap();
        assert!(!pd.check(-4));
        assert!(pd.check(-3));
        assert!(pd.check(0));
        assert!(pd.check(5));
        assert!(!pd.check(6));
    }

    /// Restricts integers to the allowed set
    #[test]
    fn restricts_integers_to_the_allowed_set() {
        let mut pd = IntegerDescription::new();
        pd.set_values([128, 256]);
        assert!(pd.check(128));
        assert!(pd.check(256));
        assert!(!pd.check(129));

        pd.set_max_value(200).unwrap();
        assert!(!pd.check(256));
    }

    /// Rejects inconsistent integer bounds
    #[test]
    fn rejects_inconsistent_integer_bounds() {
        let mut pd = IntegerDescription::new();
        pd.set_min_value(10).unwrap();
        assert!(pd.set_max_value(9).is_err());
        assert!(pd.set_max_value(10).is_ok());
        assert!(pd.set_min_value(11).is_err());
        assert_eq!(pd.min_value(), Some(10));
        assert_eq!(pd.max_value(), Some(10));
    }

    /// Compares string lengths inclusively
    #[test]
    fn compares_string_lengths_inclusively() {
        let mut pd = StringDescription::new();
        pd.set_min_length(2).unwrap().set_max_length(4).unwrap();
        assert!(!pd.check("a"));
        assert!(pd.check("ab"));
        assert!(pd.check("abcd"));
        assert!(!pd.check("abcde"));
    }

    /// Restricts strings to the allowed set
    #[test]
    fn restricts_strings_to_the_allowed_set() {
        let mut pd = StringDescription::new();
        pd.set_values(["dns", "url"]);
        assert!(pd.check("dns"));
        assert!(!pd.check("oid"));
        assert!(!pd.check(""));
    }

    /// Rejects inconsistent string lengths
    #[test]
    fn rejects_inconsistent_string_lengths() {
        let mut pd = StringDescription::new();
        pd.set_max_length(3).unwrap();
        assert!(pd.set_min_length(4).is_err());
        assert!(pd.set_min_length(3).is_ok());
        assert!(pd.set_max_length(2).is_err());
    }

    /// Answers false to values of the wrong type
    #[test]
    fn answers_false_to_values_of_the_wrong_type() {
        let integer = ParameterDescription::from(IntegerDescription::new());
        let string = ParameterDescription::from(StringDescription::new());
        assert!(integer.check(&ParameterValue::from(128)));
        assert!(!integer.check(&ParameterValue::from("128")));
        assert!(string.check(&ParameterValue::from("foo")));
        assert!(!string.check(&ParameterValue::from(3)));
    }

    /// Describes constraints in plain words
    #[test]
    fn describes_constraints_in_plain_words() {
        let mut pd = IntegerDescription::new();
        pd.set_min_value(0).unwrap().set_values([128]);
        assert_eq!(
            ParameterDescription::from(pd).human_readable_help(),
            "The value must be an integer greater or equal than 0, in { 128 }."
        );
    }
}
