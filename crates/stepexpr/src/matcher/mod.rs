//! Binding compiled expressions to registries and matching text.
//!
//! [`compile`] resolves the argument and assertion slots produced by
//! `stepexpr-patterns` against a [`DataTypes`] and an
//! [`AssertionFactories`] registry. The resulting [`ExpressionMatcher`]
//! builds one anchored regex per locale on demand, caches it, and turns each
//! successful match into a [`Match`].

mod capture;
mod result;

use std::sync::Arc;

use stepexpr_patterns::{Fragment, PatternFragment, SpecificityScore, compile_expression};

use crate::assertion::{AssertionFactories, AssertionFactory};
use crate::cache::LocaleCache;
use crate::config;
use crate::datatype::{DataType, DataTypes};
use crate::error::{ExpressionError, MatchError};
use crate::locale::Locale;

pub use result::{ArgumentValue, Match};

/// Text accepted in an argument slot in place of a literal.
const VARIABLE_REFERENCE: &str = r"\$\{[^{}\s]+\}";

/// One resolved piece of a compiled expression.
#[derive(Debug, Clone)]
pub enum FragmentMatcher {
    /// Plain recognition pattern.
    Pattern(PatternFragment),
    /// Argument slot bound to a data type.
    Argument {
        /// Name the value is reported under.
        binding: String,
        /// Type parsing the captured text.
        data_type: Arc<dyn DataType>,
    },
    /// Assertion slot bound to a factory.
    Assertion {
        /// Factory resolving the captured phrase.
        factory: Arc<dyn AssertionFactory>,
    },
}

impl FragmentMatcher {
    const fn is_slot(&self) -> bool {
        !matches!(self, Self::Pattern(_))
    }
}

/// A compiled, immutable expression shareable across threads.
///
/// # Examples
/// ```
/// use stepexpr::{ArgumentValue, AssertionFactories, DataTypes, Locale, Value, compile};
///
/// let types = DataTypes::standard();
/// let factories = AssertionFactories::standard();
/// let matcher = compile("I have {count:integer} (green) apples", &types, &factories)
///     .expect("valid expression");
///
/// let found = matcher.matches("I have 1,200 apples", &Locale::default()).expect("parses");
/// assert!(found.is_matched());
/// assert_eq!(
///     found.argument("count"),
///     Some(&ArgumentValue::Literal(Value::Integer(1200)))
/// );
///
/// let deferred = matcher.matches("I have ${stock} green apples", &Locale::default()).expect("parses");
/// assert_eq!(deferred.argument("count"), Some(&ArgumentValue::Variable("stock".into())));
/// ```
#[derive(Debug)]
pub struct ExpressionMatcher {
    expression: String,
    fragments: Vec<FragmentMatcher>,
    specificity: SpecificityScore,
    regexes: LocaleCache<fancy_regex::Regex>,
}

/// Compile `expression` against the supplied registries.
///
/// The regex is built once under [`config::default_locale`] so an
/// expression that cannot be matched fails here rather than at first use.
///
/// # Errors
/// Returns [`ExpressionError`] when the expression is malformed, names an
/// unknown data type or assertion, or yields an invalid regex.
pub fn compile(
    expression: &str,
    data_types: &DataTypes,
    assertions: &AssertionFactories,
) -> Result<ExpressionMatcher, ExpressionError> {
    let fragments = compile_expression(expression)?
        .into_iter()
        .map(|fragment| resolve(fragment, data_types, assertions))
        .collect::<Result<Vec<_>, _>>()?;
    let matcher = ExpressionMatcher {
        expression: expression.to_string(),
        fragments,
        specificity: SpecificityScore::calculate(expression)?,
        regexes: LocaleCache::new(),
    };
    let locale = config::default_locale();
    matcher
        .regex(&locale)
        .map_err(|source| ExpressionError::Unmatchable {
            locale,
            source: Box::new(source),
        })?;
    log::debug!(
        "compiled step expression `{expression}` into {} fragments",
        matcher.fragments.len()
    );
    Ok(matcher)
}

fn resolve(
    fragment: Fragment,
    data_types: &DataTypes,
    assertions: &AssertionFactories,
) -> Result<FragmentMatcher, ExpressionError> {
    match fragment {
        Fragment::Pattern(pattern) => Ok(FragmentMatcher::Pattern(pattern)),
        Fragment::Argument(slot) => {
            let data_type = data_types.by_name(&slot.type_name).map_err(|source| {
                ExpressionError::UnknownDataType {
                    source,
                    position: slot.position,
                }
            })?;
            Ok(FragmentMatcher::Argument {
                binding: slot.name,
                data_type,
            })
        }
        Fragment::Assertion(slot) => {
            let factory = assertions.by_name(&slot.name).map_err(|source| {
                ExpressionError::UnknownAssertion {
                    source,
                    position: slot.position,
                }
            })?;
            Ok(FragmentMatcher::Assertion { factory })
        }
    }
}

impl ExpressionMatcher {
    /// Same as [`compile`].
    ///
    /// # Errors
    /// See [`compile`].
    pub fn compile(
        expression: &str,
        data_types: &DataTypes,
        assertions: &AssertionFactories,
    ) -> Result<Self, ExpressionError> {
        compile(expression, data_types, assertions)
    }

    /// The source expression.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Resolved fragments in declaration order.
    #[must_use]
    pub fn fragments(&self) -> &[FragmentMatcher] {
        &self.fragments
    }

    /// Ranking used to prefer the most specific of several matching
    /// expressions.
    #[must_use]
    pub const fn specificity(&self) -> SpecificityScore {
        self.specificity
    }

    /// The anchored regex used in `locale`, built on first use.
    ///
    /// # Errors
    /// Returns [`MatchError`] when an assertion factory's phrases or the
    /// combined regex fail to compile.
    pub fn regex(&self, locale: &Locale) -> Result<Arc<fancy_regex::Regex>, MatchError> {
        self.regexes
            .get_or_try_insert_with(locale, || self.build_regex(locale))
    }

    fn build_regex(&self, locale: &Locale) -> Result<fancy_regex::Regex, MatchError> {
        let mut source = String::from("^");
        let mut slot = 0usize;
        for fragment in &self.fragments {
            let body = match fragment {
                FragmentMatcher::Pattern(pattern) => {
                    source.push_str(&pattern.regex);
                    continue;
                }
                FragmentMatcher::Argument { data_type, .. } => {
                    format!("{VARIABLE_REFERENCE}|(?:{})", data_type.regex(locale))
                }
                FragmentMatcher::Assertion { factory } => {
                    format!("(?:{})", factory.phrases(locale)?.regex())
                }
            };
            source.push_str(&format!("(?P<{}>{body})", capture::slot_group(slot)));
            slot = slot.saturating_add(1);
        }
        source.push('$');
        log::trace!("expression `{}` in {locale}: {source}", self.expression);
        fancy_regex::Regex::new(&source).map_err(|err| MatchError::Regex {
            locale: locale.clone(),
            source: Box::new(err),
        })
    }

    /// Match `text` as written in `locale`.
    ///
    /// Returns an unmatched [`Match`] when the text does not conform.
    ///
    /// # Errors
    /// Returns [`MatchError`] when a captured literal fails to parse, the
    /// captured assertion phrase does not resolve, or the regex engine fails.
    pub fn matches(&self, text: &str, locale: &Locale) -> Result<Match, MatchError> {
        let regex = self.regex(locale)?;
        let slots = self.fragments.iter().filter(|fragment| fragment.is_slot());
        let Some(captured) = capture::extract_slot_values(&regex, text, slots.clone().count())
            .map_err(|err| MatchError::Engine(Box::new(err)))?
        else {
            return Ok(Match::unmatched());
        };

        let mut arguments = Vec::new();
        let mut assertion = None;
        for (fragment, text) in slots.zip(captured) {
            match fragment {
                FragmentMatcher::Argument { binding, data_type } => {
                    let value = argument_value(binding, data_type.as_ref(), locale, text)?;
                    arguments.push((binding.clone(), value));
                }
                FragmentMatcher::Assertion { factory } => {
                    assertion = Some(factory.resolve(locale, text)?);
                }
                FragmentMatcher::Pattern(_) => {}
            }
        }
        Ok(Match::matched(arguments, assertion))
    }

    /// Match `text` in [`config::default_locale`].
    ///
    /// # Errors
    /// See [`matches`](Self::matches).
    pub fn matches_default(&self, text: &str) -> Result<Match, MatchError> {
        self.matches(text, &config::default_locale())
    }
}

fn argument_value(
    binding: &str,
    data_type: &dyn DataType,
    locale: &Locale,
    text: &str,
) -> Result<ArgumentValue, MatchError> {
    if let Some(variable) = ArgumentValue::variable(text) {
        return Ok(variable);
    }
    data_type
        .parse(locale, text)
        .map(ArgumentValue::Literal)
        .map_err(|source| MatchError::Argument {
            binding: binding.to_string(),
            source,
        })
}
