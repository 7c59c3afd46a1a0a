//! Text assertions: equality, prefix, suffix, containment and emptiness.

use std::sync::Arc;

use super::{Assertion, AssertionError, AssertionFactory, PhraseSet};
use crate::cache::LocaleCache;
use crate::datatype::{DataType, RegexDataType};
use crate::locale::{Locale, PhraseLanguage};
use crate::value::Value;

const ENGLISH: &[(&str, &str)] = &[
    ("not-empty", "is not empty"),
    ("empty", "is empty"),
    ("not-equal", "is not equal to {value}"),
    ("equal", "is equal to {value}"),
    ("not-equal", "is not {value}"),
    ("equal", "is {value}"),
    ("starts-with", "starts with {value}"),
    ("ends-with", "ends with {value}"),
    ("not-contains", "does not contain {value}"),
    ("contains", "contains {value}"),
];

const SPANISH: &[(&str, &str)] = &[
    ("not-empty", "no está vacío"),
    ("empty", "está vacío"),
    ("not-equal", "no es igual a {value}"),
    ("equal", "es igual a {value}"),
    ("not-equal", "no es {value}"),
    ("equal", "es {value}"),
    ("starts-with", "empieza por {value}"),
    ("ends-with", "termina en {value}"),
    ("not-contains", "no contiene {value}"),
    ("contains", "contiene {value}"),
];

/// Check applied by a [`TextAssertion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextCheck {
    /// Equal to the reference text.
    Equal(String),
    /// Different from the reference text.
    NotEqual(String),
    /// Starts with the reference text.
    StartsWith(String),
    /// Ends with the reference text.
    EndsWith(String),
    /// Contains the reference text.
    Contains(String),
    /// Does not contain the reference text.
    NotContains(String),
    /// Has no characters.
    Empty,
    /// Has at least one character.
    NotEmpty,
}

impl TextCheck {
    fn from_key(key: &str, reference: Option<String>) -> Option<Result<Self, ()>> {
        let needs = move |build: fn(String) -> Self| Some(reference.map(build).ok_or(()));
        match key {
            "equal" => needs(Self::Equal),
            "not-equal" => needs(Self::NotEqual),
            "starts-with" => needs(Self::StartsWith),
            "ends-with" => needs(Self::EndsWith),
            "contains" => needs(Self::Contains),
            "not-contains" => needs(Self::NotContains),
            "empty" => Some(Ok(Self::Empty)),
            "not-empty" => Some(Ok(Self::NotEmpty)),
            _ => None,
        }
    }

    fn holds(&self, text: &str) -> bool {
        match self {
            Self::Equal(reference) => text == reference,
            Self::NotEqual(reference) => text != reference,
            Self::StartsWith(reference) => text.starts_with(reference.as_str()),
            Self::EndsWith(reference) => text.ends_with(reference.as_str()),
            Self::Contains(reference) => text.contains(reference.as_str()),
            Self::NotContains(reference) => !text.contains(reference.as_str()),
            Self::Empty => text.is_empty(),
            Self::NotEmpty => !text.is_empty(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Equal(reference) => format!("be {reference:?}"),
            Self::NotEqual(reference) => format!("not be {reference:?}"),
            Self::StartsWith(reference) => format!("start with {reference:?}"),
            Self::EndsWith(reference) => format!("end with {reference:?}"),
            Self::Contains(reference) => format!("contain {reference:?}"),
            Self::NotContains(reference) => format!("not contain {reference:?}"),
            Self::Empty => "be empty".to_string(),
            Self::NotEmpty => "not be empty".to_string(),
        }
    }
}

/// An assertion over [`Value::Text`] values; other kinds never satisfy it.
#[derive(Debug, Clone)]
pub struct TextAssertion {
    name: String,
    check: TextCheck,
}

impl TextAssertion {
    /// Create an assertion named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, check: TextCheck) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }

    /// The check applied.
    #[must_use]
    pub const fn check(&self) -> &TextCheck {
        &self.check
    }
}

impl Assertion for TextAssertion {
    fn name(&self) -> &str {
        &self.name
    }

    fn test(&self, value: &Value) -> bool {
        value.as_text().is_some_and(|text| self.check.holds(text))
    }

    fn describe_failure(&self, value: &Value) -> String {
        format!("expected {value} to {}", self.check.describe())
    }
}

/// Factory of [`TextAssertion`]s; reference values are written as quoted
/// text, e.g. `starts with "abc"`.
#[derive(Debug)]
pub struct TextAssertionFactory {
    name: String,
    data_type: Arc<dyn DataType>,
    phrases: LocaleCache<PhraseSet>,
}

impl TextAssertionFactory {
    /// Create a factory whose reference values are recognised and parsed by
    /// `data_type`.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: Arc<dyn DataType>) -> Self {
        Self {
            name: name.into(),
            data_type,
            phrases: LocaleCache::new(),
        }
    }

    /// `text-assertion` over quoted text.
    #[must_use]
    pub fn standard() -> Self {
        Self::new("text-assertion", Arc::new(RegexDataType::quoted_text()))
    }
}

impl AssertionFactory for TextAssertionFactory {
    fn name(&self) -> &str {
        &self.name
    }

    fn phrases(&self, locale: &Locale) -> Result<Arc<PhraseSet>, AssertionError> {
        self.phrases.get_or_try_insert_with(locale, || {
            let table = match locale.phrase_language() {
                PhraseLanguage::English => ENGLISH,
                PhraseLanguage::Spanish => SPANISH,
            };
            PhraseSet::new(table.iter().copied(), &self.data_type.regex(locale))
        })
    }

    fn build(
        &self,
        key: &str,
        value: Option<&str>,
        locale: &Locale,
    ) -> Result<Arc<dyn Assertion>, AssertionError> {
        let reference = value
            .map(|text| self.data_type.parse(locale, text))
            .transpose()?
            .map(|parsed| parsed.as_text().map_or_else(|| parsed.to_string(), str::to_string));
        let check = TextCheck::from_key(key, reference)
            .ok_or_else(|| AssertionError::UnknownKey {
                factory: self.name.clone(),
                key: key.to_string(),
            })?
            .map_err(|()| AssertionError::MissingValue {
                factory: self.name.clone(),
                key: key.to_string(),
            })?;
        Ok(Arc::new(TextAssertion::new(self.name.clone(), check)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn resolve(tag: &str, text: &str) -> Arc<dyn Assertion> {
        let locale = Locale::parse(tag).unwrap_or_else(|err| panic!("valid tag: {err}"));
        TextAssertionFactory::standard()
            .resolve(&locale, text)
            .unwrap_or_else(|err| panic!("{text:?} should resolve: {err}"))
    }

    #[rstest]
    #[case("en-US", r#"starts with "abc""#, "abcdef", true)]
    #[case("en-US", r#"ends with 'def'"#, "abcdef", true)]
    #[case("en-US", r#"contains "cd""#, "abcdef", true)]
    #[case("en-US", r#"does not contain "cd""#, "abcdef", false)]
    #[case("en-US", r#"is "abc""#, "abc", true)]
    #[case("en-US", r#"is not "abc""#, "abc", false)]
    #[case("en-US", "is empty", "", true)]
    #[case("en-US", "is not empty", "", false)]
    #[case("es-ES", r#"empieza por "ab""#, "abc", true)]
    #[case("es-ES", "no está vacío", "x", true)]
    fn resolves_text_phrases(
        #[case] tag: &str,
        #[case] phrase: &str,
        #[case] tested: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(resolve(tag, phrase).test(&Value::Text(tested.into())), expected);
    }

    #[test]
    fn non_text_values_never_satisfy() {
        assert!(!resolve("en-US", "is not empty").test(&Value::Integer(1)));
    }

    #[test]
    fn describes_failures_with_the_reference() {
        let assertion = resolve("en-US", r#"starts with "abc""#);
        assert_eq!(
            assertion.describe_failure(&Value::Text("xyz".into())),
            "expected \"xyz\" to start with \"abc\""
        );
    }

    #[test]
    fn valued_keys_require_a_value() {
        let factory = TextAssertionFactory::standard();
        assert!(matches!(
            factory.build("contains", None, &Locale::default()),
            Err(AssertionError::MissingValue { .. })
        ));
        assert!(matches!(
            factory.build("shouts", None, &Locale::default()),
            Err(AssertionError::UnknownKey { .. })
        ));
    }
}
