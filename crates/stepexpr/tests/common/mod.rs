//! Common helpers for matcher integration tests.

use stepexpr::{AssertionFactories, DataTypes, ExpressionMatcher, Locale, Match, compile};

/// Compile `expression` against the standard registries.
pub fn standard_matcher(expression: &str) -> ExpressionMatcher {
    compile(
        expression,
        &DataTypes::standard(),
        &AssertionFactories::standard(),
    )
    .unwrap_or_else(|err| panic!("{expression:?} should compile: {err}"))
}

/// Parse a locale tag used by a test case.
pub fn locale(tag: &str) -> Locale {
    Locale::parse(tag).unwrap_or_else(|err| panic!("tag {tag:?} should parse: {err}"))
}

/// Match `text` and insist the attempt did not error.
pub fn matched(matcher: &ExpressionMatcher, text: &str, locale: &Locale) -> Match {
    matcher
        .matches(text, locale)
        .unwrap_or_else(|err| panic!("matching {text:?} should not fail: {err}"))
}
