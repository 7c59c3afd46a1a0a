//! Assertions: named predicates over parsed values, and factories building
//! them from natural-language phrases captured at match time.
//!
//! A factory publishes an ordered [`PhraseSet`] per locale. When an
//! expression's `{{name}}` slot captures text such as `is greater than 3`,
//! the factory resolves the first phrase matching that text and builds an
//! assertion closing over the parsed reference value.

mod comparable;
mod phrase;
mod predicate;
mod text;

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use thiserror::Error;

use crate::datatype::{NumberDataType, ParseError, TemporalDataType};
use crate::locale::Locale;
use crate::value::Value;

pub use comparable::{ComparableAssertionFactory, Comparison, ComparisonAssertion, PhraseTable};
pub use phrase::{Phrase, PhraseSet};
pub use predicate::PredicateAssertion;
pub use text::{TextAssertion, TextAssertionFactory, TextCheck};

/// A testable predicate over one value.
pub trait Assertion: Send + Sync + fmt::Debug {
    /// Name reported in failures.
    fn name(&self) -> &str;

    /// Whether `value` satisfies the assertion.
    fn test(&self, value: &Value) -> bool;

    /// Explain why `value` does not satisfy the assertion.
    fn describe_failure(&self, value: &Value) -> String;

    /// Test `value`, turning a failure into an error.
    ///
    /// # Errors
    /// Returns [`AssertionError::Failed`] when the test does not hold.
    fn verify(&self, value: &Value) -> Result<(), AssertionError> {
        if self.test(value) {
            return Ok(());
        }
        Err(AssertionError::Failed {
            assertion: self.name().to_string(),
            message: self.describe_failure(value),
        })
    }
}

/// Builds assertions from natural-language phrases.
pub trait AssertionFactory: Send + Sync + fmt::Debug {
    /// Registry name, e.g. `number-assertion`.
    fn name(&self) -> &str;

    /// Phrases understood in `locale`, in precedence order.
    ///
    /// # Errors
    /// Returns [`AssertionError::InvalidPhrase`] when a phrase cannot be
    /// compiled for the locale.
    fn phrases(&self, locale: &Locale) -> Result<Arc<PhraseSet>, AssertionError>;

    /// Build the assertion for phrase `key`, given the text captured for its
    /// `{value}` placeholder.
    ///
    /// # Errors
    /// Returns an [`AssertionError`] when the key is unknown, a required
    /// value is missing or the value does not parse.
    fn build(
        &self,
        key: &str,
        value: Option<&str>,
        locale: &Locale,
    ) -> Result<Arc<dyn Assertion>, AssertionError>;

    /// Resolve captured phrase text into an assertion. Phrases are tried in
    /// registration order and the first match is built.
    ///
    /// # Errors
    /// Returns [`AssertionError::UnresolvedPhrase`] when no phrase matches,
    /// or any error from [`build`](Self::build).
    fn resolve(&self, locale: &Locale, text: &str) -> Result<Arc<dyn Assertion>, AssertionError> {
        let phrases = self.phrases(locale)?;
        let Some((key, value)) = phrases.resolve(text) else {
            return Err(AssertionError::UnresolvedPhrase {
                factory: self.name().to_string(),
                locale: locale.clone(),
                text: text.to_string(),
                expected: phrases.templates(),
            });
        };
        self.build(key, value, locale)
    }
}

/// Failures while resolving, building or verifying assertions.
#[derive(Debug, Error)]
pub enum AssertionError {
    /// Captured text matches none of the factory's phrases.
    #[error(
        "`{text}` is not a {factory} phrase in locale {locale}; expected one of: {}",
        .expected.join(", ")
    )]
    UnresolvedPhrase {
        /// Factory name.
        factory: String,
        /// Locale the phrases were taken from.
        locale: Locale,
        /// Captured text.
        text: String,
        /// Phrase templates for the locale.
        expected: Vec<String>,
    },
    /// A phrase key the factory does not build.
    #[error("{factory} has no phrase key `{key}`")]
    UnknownKey {
        /// Factory name.
        factory: String,
        /// Offending key.
        key: String,
    },
    /// The phrase needs a reference value but none was captured.
    #[error("{factory} phrase `{key}` requires a value")]
    MissingValue {
        /// Factory name.
        factory: String,
        /// Phrase key.
        key: String,
    },
    /// The reference value does not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A phrase template produced an invalid regex.
    #[error("invalid assertion phrase `{template}`: {source}")]
    InvalidPhrase {
        /// Template text.
        template: String,
        /// Regex compiler failure.
        #[source]
        source: regex::Error,
    },
    /// An assertion did not hold.
    #[error("assertion {assertion} failed: {message}")]
    Failed {
        /// Assertion name.
        assertion: String,
        /// Failure description.
        message: String,
    },
}

/// Lookup of an assertion or factory that is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown assertion `{name}`; known assertions: {}", .known.join(", "))]
pub struct UnknownAssertion {
    /// Requested name.
    pub name: String,
    /// Registered names, sorted.
    pub known: Vec<String>,
}

/// Name-keyed registry of direct predicates.
///
/// # Examples
/// ```
/// use stepexpr::{Assertions, Value};
/// let assertions = Assertions::standard();
/// let positive = assertions.by_name("is-positive").expect("standard predicate");
/// assert!(positive.test(&Value::Integer(3)));
/// assert!(!positive.test(&Value::Decimal(-0.5)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Assertions {
    assertions: HashMap<String, Arc<dyn Assertion>>,
}

impl Assertions {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `is-empty`, `is-not-empty`, `is-positive`,
    /// `is-negative` and `is-zero`.
    #[must_use]
    pub fn standard() -> Self {
        let mut assertions = Self::new();
        for assertion in PredicateAssertion::standard() {
            assertions.register(assertion);
        }
        assertions
    }

    /// Register `assertion`, replacing any with the same name.
    pub fn register(&mut self, assertion: impl Assertion + 'static) -> &mut Self {
        let name = assertion.name().to_string();
        if self
            .assertions
            .insert(name.clone(), Arc::new(assertion))
            .is_some()
        {
            log::debug!("assertion `{name}` replaced an earlier registration");
        }
        self
    }

    /// Look an assertion up by name.
    ///
    /// # Errors
    /// Returns [`UnknownAssertion`] listing the registered names on a miss.
    pub fn by_name(&self, name: &str) -> Result<Arc<dyn Assertion>, UnknownAssertion> {
        self.assertions
            .get(name)
            .cloned()
            .ok_or_else(|| UnknownAssertion {
                name: name.to_string(),
                known: self.names(),
            })
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        sorted_keys(&self.assertions)
    }
}

/// Name-keyed registry of phrase-driven assertion factories.
///
/// # Examples
/// ```
/// use stepexpr::{AssertionFactories, Locale, Value};
/// let factories = AssertionFactories::standard();
/// let numbers = factories.by_name("number-assertion").expect("standard factory");
/// let assertion = numbers
///     .resolve(&Locale::default(), "is greater than 3")
///     .expect("known phrase");
/// assert!(assertion.test(&Value::Integer(5)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssertionFactories {
    factories: HashMap<String, Arc<dyn AssertionFactory>>,
}

impl AssertionFactories {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the comparison factories for `number`, `integer`,
    /// `decimal`, `date`, `time` and `datetime` values plus
    /// `text-assertion`.
    #[must_use]
    pub fn standard() -> Self {
        let mut factories = Self::new();
        factories
            .register(ComparableAssertionFactory::numeric(
                "number-assertion",
                Arc::new(NumberDataType::long("number")),
            ))
            .register(ComparableAssertionFactory::numeric(
                "integer-assertion",
                Arc::new(NumberDataType::integer()),
            ))
            .register(ComparableAssertionFactory::numeric(
                "decimal-assertion",
                Arc::new(NumberDataType::decimal()),
            ))
            .register(ComparableAssertionFactory::temporal(
                "date-assertion",
                Arc::new(TemporalDataType::date()),
            ))
            .register(ComparableAssertionFactory::temporal(
                "time-assertion",
                Arc::new(TemporalDataType::time()),
            ))
            .register(ComparableAssertionFactory::temporal(
                "datetime-assertion",
                Arc::new(TemporalDataType::date_time()),
            ))
            .register(TextAssertionFactory::standard());
        factories
    }

    /// Register `factory`, replacing any with the same name.
    pub fn register(&mut self, factory: impl AssertionFactory + 'static) -> &mut Self {
        self.register_shared(Arc::new(factory))
    }

    /// Register an already shared factory.
    pub fn register_shared(&mut self, factory: Arc<dyn AssertionFactory>) -> &mut Self {
        let name = factory.name().to_string();
        if self.factories.insert(name.clone(), factory).is_some() {
            log::debug!("assertion factory `{name}` replaced an earlier registration");
        }
        self
    }

    /// Look a factory up by name.
    ///
    /// # Errors
    /// Returns [`UnknownAssertion`] listing the registered names on a miss.
    pub fn by_name(&self, name: &str) -> Result<Arc<dyn AssertionFactory>, UnknownAssertion> {
        self.factories
            .get(name)
            .cloned()
            .ok_or_else(|| UnknownAssertion {
                name: name.to_string(),
                known: self.names(),
            })
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        sorted_keys(&self.factories)
    }

    /// Describe every factory's phrases in `locale`, sorted by name.
    ///
    /// Factories whose phrases fail to compile are logged and skipped.
    #[must_use]
    pub fn describe(&self, locale: &Locale) -> Vec<crate::AssertionDescription> {
        self.names()
            .iter()
            .filter_map(|name| self.factories.get(name))
            .filter_map(|factory| {
                let phrases = factory
                    .phrases(locale)
                    .inspect_err(|err| {
                        log::warn!("skipping {} in diagnostics: {err}", factory.name());
                    })
                    .ok()?;
                Some(crate::AssertionDescription {
                    name: factory.name().to_string(),
                    phrases: phrases.templates(),
                })
            })
            .collect()
    }
}

fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<String> {
    let mut names: Vec<String> = map.keys().cloned().collect();
    names.sort_unstable();
    names
}
