//! Comparison assertions over any data type with ordered values.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{Assertion, AssertionError, AssertionFactory, PhraseSet};
use crate::cache::LocaleCache;
use crate::datatype::DataType;
use crate::locale::{Locale, PhraseLanguage};
use crate::value::Value;

/// `(key, template)` pairs for one phrase language, longer phrases first.
pub type PhraseTable = fn(PhraseLanguage) -> &'static [(&'static str, &'static str)];

const SYMBOL_PHRASES: &[(&str, &str)] = &[
    ("greater-or-equal", ">= {value}"),
    ("less-or-equal", "<= {value}"),
    ("not-equal", "!= {value}"),
    ("greater", "> {value}"),
    ("less", "< {value}"),
    ("equal", "= {value}"),
];

const ENGLISH_NUMERIC: &[(&str, &str)] = &[
    ("greater-or-equal", "is greater than or equal to {value}"),
    ("less-or-equal", "is less than or equal to {value}"),
    ("not-equal", "is not equal to {value}"),
    ("greater", "is greater than {value}"),
    ("less", "is less than {value}"),
    ("equal", "is equal to {value}"),
    ("not-equal", "is not {value}"),
    ("equal", "is {value}"),
];

const SPANISH_NUMERIC: &[(&str, &str)] = &[
    ("greater-or-equal", "es mayor o igual que {value}"),
    ("less-or-equal", "es menor o igual que {value}"),
    ("not-equal", "no es igual a {value}"),
    ("greater", "es mayor que {value}"),
    ("less", "es menor que {value}"),
    ("equal", "es igual a {value}"),
    ("not-equal", "no es {value}"),
    ("equal", "es {value}"),
];

const ENGLISH_TEMPORAL: &[(&str, &str)] = &[
    ("greater-or-equal", "is on or after {value}"),
    ("less-or-equal", "is on or before {value}"),
    ("greater", "is after {value}"),
    ("less", "is before {value}"),
    ("not-equal", "is not {value}"),
    ("equal", "is {value}"),
];

const SPANISH_TEMPORAL: &[(&str, &str)] = &[
    ("greater-or-equal", "es igual o posterior a {value}"),
    ("less-or-equal", "es igual o anterior a {value}"),
    ("greater", "es posterior a {value}"),
    ("less", "es anterior a {value}"),
    ("not-equal", "no es {value}"),
    ("equal", "es {value}"),
];

fn numeric_phrases(language: PhraseLanguage) -> &'static [(&'static str, &'static str)] {
    match language {
        PhraseLanguage::English => ENGLISH_NUMERIC,
        PhraseLanguage::Spanish => SPANISH_NUMERIC,
    }
}

fn temporal_phrases(language: PhraseLanguage) -> &'static [(&'static str, &'static str)] {
    match language {
        PhraseLanguage::English => ENGLISH_TEMPORAL,
        PhraseLanguage::Spanish => SPANISH_TEMPORAL,
    }
}

/// Relation between a tested value and a reference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// `value == expected`
    Equal,
    /// `value != expected`
    NotEqual,
    /// `value > expected`
    Greater,
    /// `value >= expected`
    GreaterOrEqual,
    /// `value < expected`
    Less,
    /// `value <= expected`
    LessOrEqual,
}

impl Comparison {
    const ALL: [Self; 6] = [
        Self::Equal,
        Self::NotEqual,
        Self::Greater,
        Self::GreaterOrEqual,
        Self::Less,
        Self::LessOrEqual,
    ];

    /// Phrase key selecting this comparison.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::NotEqual => "not-equal",
            Self::Greater => "greater",
            Self::GreaterOrEqual => "greater-or-equal",
            Self::Less => "less",
            Self::LessOrEqual => "less-or-equal",
        }
    }

    /// Comparison for a phrase key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|comparison| comparison.key() == key)
    }

    /// Whether `ordering` (tested value against reference) satisfies the
    /// comparison.
    #[must_use]
    pub const fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Equal => ordering.is_eq(),
            Self::NotEqual => ordering.is_ne(),
            Self::Greater => ordering.is_gt(),
            Self::GreaterOrEqual => ordering.is_ge(),
            Self::Less => ordering.is_lt(),
            Self::LessOrEqual => ordering.is_le(),
        }
    }

    /// Verb phrase used in failure descriptions.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Equal => "be equal to",
            Self::NotEqual => "differ from",
            Self::Greater => "be greater than",
            Self::GreaterOrEqual => "be greater than or equal to",
            Self::Less => "be less than",
            Self::LessOrEqual => "be less than or equal to",
        }
    }
}

/// Compares tested values against a parsed reference value.
///
/// Values of incomparable kinds never satisfy the assertion, not even
/// [`Comparison::NotEqual`].
#[derive(Debug, Clone)]
pub struct ComparisonAssertion {
    name: String,
    comparison: Comparison,
    expected: Value,
}

impl ComparisonAssertion {
    /// Create an assertion named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, comparison: Comparison, expected: Value) -> Self {
        Self {
            name: name.into(),
            comparison,
            expected,
        }
    }

    /// The comparison applied.
    #[must_use]
    pub const fn comparison(&self) -> Comparison {
        self.comparison
    }

    /// The reference value.
    #[must_use]
    pub const fn expected(&self) -> &Value {
        &self.expected
    }
}

impl Assertion for ComparisonAssertion {
    fn name(&self) -> &str {
        &self.name
    }

    fn test(&self, value: &Value) -> bool {
        value
            .compare(&self.expected)
            .is_some_and(|ordering| self.comparison.holds(ordering))
    }

    fn describe_failure(&self, value: &Value) -> String {
        if value.compare(&self.expected).is_none() {
            return format!(
                "cannot compare {} value {value} with {} value {}",
                value.kind(),
                self.expected.kind(),
                self.expected
            );
        }
        format!(
            "expected {value} to {} {}",
            self.comparison.describe(),
            self.expected
        )
    }
}

/// Factory of [`ComparisonAssertion`]s whose reference values are parsed by
/// one data type.
///
/// The `{value}` placeholder of every phrase accepts the data type's regex
/// for the active locale, so `is greater than 1.234,5` resolves under
/// `de-DE` while `is greater than 1,234.5` resolves under `en-US`.
#[derive(Debug)]
pub struct ComparableAssertionFactory {
    name: String,
    data_type: Arc<dyn DataType>,
    table: PhraseTable,
    phrases: LocaleCache<PhraseSet>,
}

impl ComparableAssertionFactory {
    /// Create a factory with a custom phrase table. Symbolic phrases such as
    /// `>= {value}` are appended after the table's entries.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: Arc<dyn DataType>, table: PhraseTable) -> Self {
        Self {
            name: name.into(),
            data_type,
            table,
            phrases: LocaleCache::new(),
        }
    }

    /// Factory using `is greater than {value}` style phrases.
    #[must_use]
    pub fn numeric(name: impl Into<String>, data_type: Arc<dyn DataType>) -> Self {
        Self::new(name, data_type, numeric_phrases)
    }

    /// Factory using `is after {value}` style phrases.
    #[must_use]
    pub fn temporal(name: impl Into<String>, data_type: Arc<dyn DataType>) -> Self {
        Self::new(name, data_type, temporal_phrases)
    }
}

impl AssertionFactory for ComparableAssertionFactory {
    fn name(&self) -> &str {
        &self.name
    }

    fn phrases(&self, locale: &Locale) -> Result<Arc<PhraseSet>, AssertionError> {
        self.phrases.get_or_try_insert_with(locale, || {
            let table = (self.table)(locale.phrase_language());
            PhraseSet::new(
                table.iter().chain(SYMBOL_PHRASES).copied(),
                &self.data_type.regex(locale),
            )
        })
    }

    fn build(
        &self,
        key: &str,
        value: Option<&str>,
        locale: &Locale,
    ) -> Result<Arc<dyn Assertion>, AssertionError> {
        let comparison = Comparison::from_key(key).ok_or_else(|| AssertionError::UnknownKey {
            factory: self.name.clone(),
            key: key.to_string(),
        })?;
        let text = value.ok_or_else(|| AssertionError::MissingValue {
            factory: self.name.clone(),
            key: key.to_string(),
        })?;
        let expected = self.data_type.parse(locale, text)?;
        Ok(Arc::new(ComparisonAssertion::new(
            self.name.clone(),
            comparison,
            expected,
        )))
    }
}
