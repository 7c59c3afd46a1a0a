//! Error types shared by the tokenizer, AST builder and regex synthesis.

use std::fmt;
use thiserror::Error;

/// Location and description of a malformed piece of a step expression.
///
/// # Examples
/// ```
/// use stepexpr_patterns::SyntaxErrorInfo;
/// let info = SyntaxErrorInfo::new("unclosed optional", 7, Some("(".into()));
/// assert_eq!(info.fragment.as_deref(), Some("("));
/// assert_eq!(info.position, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// Human-readable reason for the failure.
    pub message: &'static str,
    /// Zero-based byte offset in the expression where the problem starts.
    pub position: usize,
    /// Offending piece of the expression, when known.
    pub fragment: Option<String>,
}

impl SyntaxErrorInfo {
    /// Create a new error description.
    ///
    /// # Examples
    /// ```
    /// use stepexpr_patterns::SyntaxErrorInfo;
    /// let info = SyntaxErrorInfo::new("invalid", 1, None);
    /// assert_eq!(info.message, "invalid");
    /// ```
    #[must_use]
    pub fn new(message: &'static str, position: usize, fragment: Option<String>) -> Self {
        Self {
            message,
            position,
            fragment,
        }
    }
}

impl fmt::Display for SyntaxErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fragment {
            Some(fragment) => write!(
                f,
                "{} near `{}` at byte {} (zero-based)",
                self.message, fragment, self.position
            ),
            None => write!(f, "{} at byte {} (zero-based)", self.message, self.position),
        }
    }
}

/// Errors surfaced while turning an expression into fragments.
///
/// # Examples
/// ```
/// use stepexpr_patterns::{PatternError, SyntaxErrorInfo};
/// let info = SyntaxErrorInfo::new("unclosed argument", 2, Some("{".into()));
/// let err = PatternError::Syntax(info.clone());
/// assert_eq!(err.to_string(), info.to_string());
/// assert_eq!(err.position(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The expression could not be split into tokens.
    #[error("{0}")]
    Tokenize(SyntaxErrorInfo),
    /// The token stream does not follow the expression grammar.
    #[error("{0}")]
    Syntax(SyntaxErrorInfo),
}

impl PatternError {
    /// Details shared by every variant.
    #[must_use]
    pub fn info(&self) -> &SyntaxErrorInfo {
        match self {
            Self::Tokenize(info) | Self::Syntax(info) => info,
        }
    }

    /// Zero-based byte offset of the failure.
    #[must_use]
    pub fn position(&self) -> usize {
        self.info().position
    }
}

pub(crate) fn tokenize_error(
    message: &'static str,
    position: usize,
    fragment: Option<String>,
) -> PatternError {
    PatternError::Tokenize(SyntaxErrorInfo::new(message, position, fragment))
}

pub(crate) fn syntax_error(
    message: &'static str,
    position: usize,
    fragment: Option<String>,
) -> PatternError {
    PatternError::Syntax(SyntaxErrorInfo::new(message, position, fragment))
}
