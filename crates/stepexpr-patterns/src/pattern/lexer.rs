//! Expression lexer converting expression strings into structural tokens.

use crate::errors::{PatternError, tokenize_error};

/// Kind of a lexed token; only [`TokenKind::Text`] carries a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A maximal run of literal characters, escapes already resolved.
    Text(String),
    /// `(`
    StartOptional,
    /// `)`
    EndOptional,
    /// `[`
    StartGroup,
    /// `]`
    EndGroup,
    /// `|`
    ChoiceSeparator,
    /// `^`
    Negation,
    /// `{{`
    StartAssertion,
    /// `}}`
    EndAssertion,
    /// `{`
    StartArgument,
    /// `}`
    EndArgument,
}

impl TokenKind {
    /// Expression text the token was lexed from, used in diagnostics.
    #[must_use]
    pub fn describe(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::StartOptional => "(",
            Self::EndOptional => ")",
            Self::StartGroup => "[",
            Self::EndGroup => "]",
            Self::ChoiceSeparator => "|",
            Self::Negation => "^",
            Self::StartAssertion => "{{",
            Self::EndAssertion => "}}",
            Self::StartArgument => "{",
            Self::EndArgument => "}",
        }
    }
}

/// A token together with its byte span in the source expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What was recognised.
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

/// Whether `ch` has structural meaning and may therefore be escaped.
pub(crate) fn is_structural(ch: char) -> bool {
    matches!(ch, '^' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '\\')
}

/// Split an expression into tokens.
///
/// Tokenization is purely lexical: nesting and balance are checked later by
/// the AST builder.
///
/// # Errors
/// Returns [`PatternError::Tokenize`] when the expression ends with a lone
/// backslash.
///
/// # Examples
/// ```
/// use stepexpr_patterns::{TokenKind, tokenize};
/// let tokens = tokenize("a (b)").expect("expression is well formed");
/// assert_eq!(tokens[0].kind, TokenKind::Text("a ".into()));
/// assert_eq!(tokens[1].kind, TokenKind::StartOptional);
/// ```
pub fn tokenize(expression: &str) -> Result<Vec<Token>, PatternError> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut text_start = 0;
    let mut chars = expression.char_indices().peekable();

    let flush_text = |text: &mut String, start: usize, end: usize, tokens: &mut Vec<Token>| {
        if !text.is_empty() {
            tokens.push(Token {
                kind: TokenKind::Text(std::mem::take(text)),
                start,
                end,
            });
        }
    };

    while let Some((pos, ch)) = chars.next() {
        let (kind, width) = match ch {
            '\\' => {
                let Some((_, escaped)) = chars.next() else {
                    return Err(tokenize_error(
                        "trailing escape character",
                        pos,
                        Some("\\".into()),
                    ));
                };
                if text.is_empty() {
                    text_start = pos;
                }
                if !is_structural(escaped) {
                    text.push('\\');
                }
                text.push(escaped);
                continue;
            }
            '(' => (TokenKind::StartOptional, 1),
            ')' => (TokenKind::EndOptional, 1),
            '[' => (TokenKind::StartGroup, 1),
            ']' => (TokenKind::EndGroup, 1),
            '|' => (TokenKind::ChoiceSeparator, 1),
            '^' => (TokenKind::Negation, 1),
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    (TokenKind::StartAssertion, 2)
                } else {
                    (TokenKind::StartArgument, 1)
                }
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    (TokenKind::EndAssertion, 2)
                } else {
                    (TokenKind::EndArgument, 1)
                }
            }
            _ => {
                if text.is_empty() {
                    text_start = pos;
                }
                text.push(ch);
                continue;
            }
        };
        flush_text(&mut text, text_start, pos, &mut tokens);
        tokens.push(Token {
            kind,
            start: pos,
            end: pos + width,
        });
    }

    flush_text(&mut text, text_start, expression.len(), &mut tokens);
    Ok(tokens)
}
