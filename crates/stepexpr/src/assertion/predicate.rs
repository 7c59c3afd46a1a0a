//! Direct, parameterless predicates.

use std::cmp::Ordering;
use std::fmt;

use super::Assertion;
use crate::value::Value;

/// An assertion backed by a plain predicate function.
///
/// # Examples
/// ```
/// use stepexpr::{Assertion, PredicateAssertion, Value};
/// let even = PredicateAssertion::new("is-even", "be even", |value| {
///     value.as_integer().is_some_and(|n| n.rem_euclid(2) == 0)
/// });
/// assert!(even.test(&Value::Integer(4)));
/// assert_eq!(even.describe_failure(&Value::Integer(3)), "expected 3 to be even");
/// ```
#[derive(Clone)]
pub struct PredicateAssertion {
    name: String,
    description: String,
    predicate: fn(&Value) -> bool,
}

impl PredicateAssertion {
    /// Create a predicate; `description` completes "expected <value> to ...".
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        predicate: fn(&Value) -> bool,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            predicate,
        }
    }

    pub(crate) fn standard() -> [Self; 5] {
        [
            Self::new("is-empty", "be empty", |value| {
                value.as_text().is_some_and(str::is_empty)
            }),
            Self::new("is-not-empty", "not be empty", |value| {
                value.as_text().is_some_and(|text| !text.is_empty())
            }),
            Self::new("is-positive", "be positive", |value| {
                value.compare(&Value::Integer(0)) == Some(Ordering::Greater)
            }),
            Self::new("is-negative", "be negative", |value| {
                value.compare(&Value::Integer(0)) == Some(Ordering::Less)
            }),
            Self::new("is-zero", "be zero", |value| {
                value.compare(&Value::Integer(0)) == Some(Ordering::Equal)
            }),
        ]
    }
}

impl fmt::Debug for PredicateAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateAssertion")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl Assertion for PredicateAssertion {
    fn name(&self) -> &str {
        &self.name
    }

    fn test(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }

    fn describe_failure(&self, value: &Value) -> String {
        format!("expected {value} to {}", self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn standard(name: &str) -> PredicateAssertion {
        PredicateAssertion::standard()
            .into_iter()
            .find(|assertion| assertion.name() == name)
            .unwrap_or_else(|| panic!("{name} should be standard"))
    }

    #[rstest]
    #[case("is-empty", Value::Text(String::new()), true)]
    #[case("is-empty", Value::Text("x".into()), false)]
    #[case("is-empty", Value::Integer(0), false)]
    #[case("is-not-empty", Value::Text("x".into()), true)]
    #[case("is-positive", Value::Decimal(0.1), true)]
    #[case("is-positive", Value::Integer(0), false)]
    #[case("is-negative", Value::Integer(-3), true)]
    #[case("is-zero", Value::Decimal(0.0), true)]
    #[case("is-zero", Value::Text("0".into()), false)]
    fn evaluates_standard_predicates(#[case] name: &str, #[case] value: Value, #[case] expected: bool) {
        assert_eq!(standard(name).test(&value), expected);
    }

    #[test]
    fn describes_text_failures_with_quotes() {
        let failure = standard("is-empty").describe_failure(&Value::Text("abc".into()));
        assert_eq!(failure, "expected \"abc\" to be empty");
    }
}
