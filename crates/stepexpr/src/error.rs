//! Errors raised while compiling expressions and matching text.

use stepexpr_patterns::PatternError;
use thiserror::Error;

use crate::assertion::{AssertionError, UnknownAssertion};
use crate::datatype::{ParseError, UnknownDataType};
use crate::locale::Locale;

/// Failures while compiling an expression against the registries.
#[derive(Debug, Error)]
pub enum ExpressionError {
    /// The expression is malformed.
    #[error(transparent)]
    Pattern(#[from] PatternError),
    /// An argument slot names a data type that is not registered.
    #[error("{source} (argument slot at byte {position})")]
    UnknownDataType {
        /// Registry miss naming the known types.
        #[source]
        source: UnknownDataType,
        /// Byte offset of the slot in the expression.
        position: usize,
    },
    /// An assertion slot names a factory that is not registered.
    #[error("{source} (assertion slot at byte {position})")]
    UnknownAssertion {
        /// Registry miss naming the known factories.
        #[source]
        source: UnknownAssertion,
        /// Byte offset of the slot in the expression.
        position: usize,
    },
    /// The synthesised regex could not be built.
    #[error("expression cannot be matched in locale {locale}: {source}")]
    Unmatchable {
        /// Locale the regex was built for.
        locale: Locale,
        /// Underlying failure.
        #[source]
        source: Box<MatchError>,
    },
}

impl ExpressionError {
    /// Name of the unresolved data type or assertion, if that is the cause.
    #[must_use]
    pub fn unknown_identifier(&self) -> Option<&str> {
        match self {
            Self::UnknownDataType { source, .. } => Some(&source.name),
            Self::UnknownAssertion { source, .. } => Some(&source.name),
            Self::Pattern(_) | Self::Unmatchable { .. } => None,
        }
    }

    /// Byte offset of the offending part of the expression, when known.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Pattern(err) => Some(err.position()),
            Self::UnknownDataType { position, .. } | Self::UnknownAssertion { position, .. } => {
                Some(*position)
            }
            Self::Unmatchable { .. } => None,
        }
    }
}

/// Failures while matching text against a compiled expression.
///
/// Matching is all-or-nothing: any of these aborts the attempt.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A captured literal was rejected by its data type.
    #[error("argument `{binding}`: {source}")]
    Argument {
        /// Binding name of the argument.
        binding: String,
        /// Parser failure.
        #[source]
        source: ParseError,
    },
    /// The captured assertion phrase could not be resolved.
    #[error(transparent)]
    Assertion(#[from] AssertionError),
    /// The regex for a locale failed to compile.
    #[error("cannot build the expression regex for {locale}: {source}")]
    Regex {
        /// Locale the regex was built for.
        locale: Locale,
        /// Regex compiler failure.
        #[source]
        source: Box<fancy_regex::Error>,
    },
    /// The regex engine gave up while matching, e.g. on its backtrack limit.
    #[error("regex engine failed: {0}")]
    Engine(#[source] Box<fancy_regex::Error>),
}
