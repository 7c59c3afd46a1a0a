//! Outcome of applying a compiled expression to a line of text.

use std::sync::Arc;

use crate::assertion::Assertion;
use crate::value::Value;

/// An extracted argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    /// A value parsed by the slot's data type.
    Literal(Value),
    /// A `${name}` reference left for the caller to resolve.
    Variable(String),
}

impl ArgumentValue {
    /// Interpret captured text, treating `${name}` as a variable reference.
    pub(crate) fn variable(text: &str) -> Option<Self> {
        let name = text.strip_prefix("${")?.strip_suffix('}')?;
        Some(Self::Variable(name.to_string()))
    }

    /// The parsed value of a literal argument.
    #[must_use]
    pub const fn as_literal(&self) -> Option<&Value> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Variable(_) => None,
        }
    }

    /// The variable name of a deferred argument.
    #[must_use]
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Self::Variable(name) => Some(name),
            Self::Literal(_) => None,
        }
    }
}

/// Result of one match attempt.
///
/// Arguments keep declaration order; when two slots share a binding name
/// [`argument`](Self::argument) returns the first.
#[derive(Debug, Clone, Default)]
pub struct Match {
    matched: bool,
    arguments: Vec<(String, ArgumentValue)>,
    assertion: Option<Arc<dyn Assertion>>,
}

impl Match {
    pub(crate) const fn unmatched() -> Self {
        Self {
            matched: false,
            arguments: Vec::new(),
            assertion: None,
        }
    }

    pub(crate) const fn matched(
        arguments: Vec<(String, ArgumentValue)>,
        assertion: Option<Arc<dyn Assertion>>,
    ) -> Self {
        Self {
            matched: true,
            arguments,
            assertion,
        }
    }

    /// Whether the text conformed to the expression.
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        self.matched
    }

    /// The argument bound to `name`.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&ArgumentValue> {
        self.arguments
            .iter()
            .find_map(|(binding, value)| (binding == name).then_some(value))
    }

    /// All arguments in declaration order.
    #[must_use]
    pub fn arguments(&self) -> &[(String, ArgumentValue)] {
        &self.arguments
    }

    /// The resolved assertion, if the expression has an assertion slot.
    #[must_use]
    pub fn assertion(&self) -> Option<&Arc<dyn Assertion>> {
        self.assertion.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("${total}", Some("total"))]
    #[case("${a.b}", Some("a.b"))]
    #[case("$total", None)]
    #[case("{total}", None)]
    #[case("42", None)]
    fn recognises_variable_references(#[case] text: &str, #[case] expected: Option<&str>) {
        let value = ArgumentValue::variable(text);
        assert_eq!(value.as_ref().and_then(ArgumentValue::as_variable), expected);
    }

    #[test]
    fn unmatched_results_carry_nothing() {
        let result = Match::unmatched();
        assert!(!result.is_matched());
        assert!(result.arguments().is_empty());
        assert!(result.assertion().is_none());
    }

    #[test]
    fn first_binding_wins() {
        let result = Match::matched(
            vec![
                ("n".into(), ArgumentValue::Literal(Value::Integer(1))),
                ("n".into(), ArgumentValue::Literal(Value::Integer(2))),
            ],
            None,
        );
        assert_eq!(
            result.argument("n").and_then(ArgumentValue::as_literal),
            Some(&Value::Integer(1))
        );
        assert_eq!(result.argument("m"), None);
    }
}
