//! Locale-aware step-expression matching.
//!
//! An expression such as `the total is {amount:decimal} {{number-assertion}}`
//! is compiled once against a [`DataTypes`] and an [`AssertionFactories`]
//! registry into an [`ExpressionMatcher`]. Matching a line of text in a
//! [`Locale`] yields a [`Match`] carrying each argument either as a parsed
//! [`Value`] or as a `${variable}` reference, plus the [`Assertion`] built from
//! the captured phrase.
//!
//! ```
//! use stepexpr::{AssertionFactories, DataTypes, Locale, Value, compile};
//!
//! let matcher = compile(
//!     "the number {number} {{number-assertion}}",
//!     &DataTypes::standard(),
//!     &AssertionFactories::standard(),
//! )
//! .expect("valid expression");
//! let found = matcher
//!     .matches("the number 5 is greater than 3", &Locale::default())
//!     .expect("parses");
//! let assertion = found.assertion().expect("assertion slot");
//! assert!(assertion.test(&Value::Integer(5)));
//! ```
//!
//! The syntax layer lives in `stepexpr-patterns`; this crate binds its slots
//! to registries and owns everything locale-dependent.

mod assertion;
mod cache;
pub mod config;
mod datatype;
mod diagnostics;
mod error;
mod locale;
mod matcher;
mod value;

pub use assertion::{
    Assertion, AssertionError, AssertionFactories, AssertionFactory, Assertions,
    ComparableAssertionFactory, Comparison, ComparisonAssertion, Phrase, PhraseSet, PhraseTable,
    PredicateAssertion, TextAssertion, TextAssertionFactory, TextCheck, UnknownAssertion,
};
pub use cache::LocaleCache;
pub use datatype::{
    ConvertFn, DataType, DataTypes, NumberDataType, ParseError, RegexDataType, TemporalDataType,
    UnknownDataType,
};
#[cfg(feature = "diagnostics")]
pub use diagnostics::dump_registries;
pub use diagnostics::{AssertionDescription, DataTypeDescription};
pub use error::{ExpressionError, MatchError};
pub use locale::{
    DatePart, DateStyle, Locale, LocaleError, MonthForm, NumberSymbols, PhraseLanguage, TimeStyle,
};
pub use matcher::{ArgumentValue, ExpressionMatcher, FragmentMatcher, Match, compile};
pub use stepexpr_patterns::{PatternError, SpecificityScore, SyntaxErrorInfo};
pub use value::{Value, ValueKind};
