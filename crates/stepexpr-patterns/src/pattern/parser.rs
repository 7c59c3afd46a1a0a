//! Recursive-descent AST builder consuming the token stream.
//!
//! Brackets are parsed into alternatives: more than one alternative makes a
//! choice, a single one makes an optional (`(...)`) or a plain group
//! (`[...]`). Text tokens are split further at word granularity for the
//! constructs that act on single words: standalone `*` wildcards, `^word`
//! negations and bare `a|b` choices.

use std::iter::Peekable;
use std::vec::IntoIter;

use crate::errors::{PatternError, syntax_error};

use super::ast::{Delimiter, NegationScope, Node};
use super::lexer::{Token, TokenKind, tokenize};

/// Parse an expression into its syntax tree.
///
/// # Errors
/// Returns [`PatternError::Tokenize`] for malformed escapes and
/// [`PatternError::Syntax`] for unbalanced brackets, empty or misplaced
/// slots, misplaced choice separators and dangling negations.
///
/// # Examples
/// ```
/// use stepexpr_patterns::{Node, parse_expression};
/// let ast = parse_expression("a (b)").expect("valid expression");
/// assert_eq!(
///     ast,
///     Node::Sequence(vec![
///         Node::Literal("a ".into()),
///         Node::Optional(Box::new(Node::Literal("b".into()))),
///     ])
/// );
/// ```
pub fn parse_expression(expression: &str) -> Result<Node, PatternError> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser {
        tokens: tokens.into_iter().peekable(),
        assertion_seen: false,
    };
    let nodes = parser.parse_fragments(Scope::TopLevel)?;
    if nodes.is_empty() {
        return Err(syntax_error("expression is empty", 0, None));
    }
    Ok(Node::sequence(nodes))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    TopLevel,
    Nested,
}

struct Parser {
    tokens: Peekable<IntoIter<Token>>,
    assertion_seen: bool,
}

impl Parser {
    fn parse_fragments(&mut self, scope: Scope) -> Result<Vec<Node>, PatternError> {
        let mut nodes = Vec::new();
        loop {
            if scope == Scope::Nested
                && self.tokens.peek().is_some_and(|token| {
                    matches!(
                        token.kind,
                        TokenKind::ChoiceSeparator | TokenKind::EndOptional | TokenKind::EndGroup
                    )
                })
            {
                break;
            }
            let Some(token) = self.tokens.next() else {
                break;
            };
            match &token.kind {
                TokenKind::Text(text) => push_text(&mut nodes, text),
                TokenKind::StartOptional => {
                    nodes.push(self.parse_bracket(&token, Delimiter::Parenthesis)?);
                }
                TokenKind::StartGroup => match self.parse_bracket(&token, Delimiter::Bracket)? {
                    Node::Sequence(children) if scope == Scope::TopLevel => nodes.extend(children),
                    node => nodes.push(node),
                },
                TokenKind::ChoiceSeparator => self.parse_word_choice(&mut nodes, &token)?,
                TokenKind::Negation => self.parse_negation(&mut nodes, &token)?,
                TokenKind::StartArgument | TokenKind::StartAssertion => {
                    if scope == Scope::Nested {
                        return Err(syntax_error(
                            "arguments and assertions are not allowed inside brackets or negations",
                            token.start,
                            Some(token.kind.describe().to_string()),
                        ));
                    }
                    nodes.push(self.parse_slot(&token)?);
                }
                TokenKind::EndOptional
                | TokenKind::EndGroup
                | TokenKind::EndArgument
                | TokenKind::EndAssertion => {
                    return Err(syntax_error(
                        "unbalanced closing symbol",
                        token.start,
                        Some(token.kind.describe().to_string()),
                    ));
                }
            }
        }
        Ok(nodes)
    }

    fn parse_bracket(&mut self, open: &Token, delimiter: Delimiter) -> Result<Node, PatternError> {
        let (closing, unclosed) = match delimiter {
            Delimiter::Parenthesis => (TokenKind::EndOptional, "unclosed optional"),
            Delimiter::Bracket | Delimiter::Bare => (TokenKind::EndGroup, "unclosed group"),
        };
        let mut alternatives = Vec::new();
        loop {
            alternatives.push(self.parse_fragments(Scope::Nested)?);
            match self.tokens.next() {
                Some(Token {
                    kind: TokenKind::ChoiceSeparator,
                    ..
                }) => {}
                Some(token) if token.kind == closing => break,
                Some(token) => {
                    return Err(syntax_error(
                        "mismatched closing symbol",
                        token.start,
                        Some(token.kind.describe().to_string()),
                    ));
                }
                None => {
                    return Err(syntax_error(
                        unclosed,
                        open.start,
                        Some(open.kind.describe().to_string()),
                    ));
                }
            }
        }

        if alternatives.len() > 1 {
            if alternatives.iter().any(Vec::is_empty) {
                return Err(syntax_error(
                    "empty choice alternative",
                    open.start,
                    Some(open.kind.describe().to_string()),
                ));
            }
            return Ok(Node::Choice {
                alternatives: alternatives.into_iter().map(Node::sequence).collect(),
                delimiter,
            });
        }

        let nodes = alternatives.pop().unwrap_or_default();
        if nodes.is_empty() {
            return Err(syntax_error(
                "empty brackets",
                open.start,
                Some(open.kind.describe().to_string()),
            ));
        }
        let inner = Node::sequence(nodes);
        Ok(match delimiter {
            Delimiter::Parenthesis => Node::Optional(Box::new(inner)),
            Delimiter::Bracket | Delimiter::Bare => inner,
        })
    }

    fn parse_word_choice(
        &mut self,
        nodes: &mut Vec<Node>,
        separator: &Token,
    ) -> Result<(), PatternError> {
        let misplaced = || {
            syntax_error(
                "choice separator must sit between two words or inside brackets",
                separator.start,
                Some("|".into()),
            )
        };
        let mut alternatives = match nodes.pop() {
            Some(Node::Choice {
                alternatives,
                delimiter: Delimiter::Bare,
            }) => alternatives,
            Some(Node::Literal(text)) => {
                let (head, word) = split_last_word(&text).ok_or_else(misplaced)?;
                if !head.is_empty() {
                    nodes.push(Node::Literal(head.to_string()));
                }
                vec![Node::Literal(word.to_string())]
            }
            _ => return Err(misplaced()),
        };
        let Some(Token {
            kind: TokenKind::Text(text),
            ..
        }) = self.tokens.next()
        else {
            return Err(misplaced());
        };
        let (word, rest) = split_first_word(&text).ok_or_else(misplaced)?;
        alternatives.push(Node::Literal(word.to_string()));
        nodes.push(Node::Choice {
            alternatives,
            delimiter: Delimiter::Bare,
        });
        push_text(nodes, rest);
        Ok(())
    }

    fn parse_negation(&mut self, nodes: &mut Vec<Node>, caret: &Token) -> Result<(), PatternError> {
        let dangling = || {
            syntax_error(
                "negation must be followed by a word or a [group]",
                caret.start,
                Some("^".into()),
            )
        };
        match self.tokens.next() {
            Some(Token {
                kind: TokenKind::Text(text),
                ..
            }) => {
                let (word, rest) = split_first_word(&text).ok_or_else(dangling)?;
                nodes.push(Node::Negation {
                    child: Box::new(Node::Literal(word.to_string())),
                    scope: NegationScope::Word,
                });
                push_text(nodes, rest);
            }
            Some(
                open @ Token {
                    kind: TokenKind::StartGroup,
                    ..
                },
            ) => {
                let child = self.parse_bracket(&open, Delimiter::Bracket)?;
                let scope = if child.to_expression().chars().any(char::is_whitespace) {
                    NegationScope::Phrase
                } else {
                    NegationScope::Word
                };
                nodes.push(Node::Negation {
                    child: Box::new(child),
                    scope,
                });
            }
            _ => return Err(dangling()),
        }
        Ok(())
    }

    fn parse_slot(&mut self, open: &Token) -> Result<Node, PatternError> {
        let assertion = open.kind == TokenKind::StartAssertion;
        let (closing, empty, unclosed) = if assertion {
            (
                TokenKind::EndAssertion,
                "empty assertion",
                "unclosed assertion",
            )
        } else {
            (TokenKind::EndArgument, "empty argument", "unclosed argument")
        };
        let fragment = || Some(open.kind.describe().to_string());

        let text = match self.tokens.next() {
            Some(Token {
                kind: TokenKind::Text(text),
                ..
            }) => text,
            Some(token) if token.kind == closing => {
                return Err(syntax_error(empty, open.start, fragment()));
            }
            _ => return Err(syntax_error(unclosed, open.start, fragment())),
        };
        if !matches!(self.tokens.next(), Some(token) if token.kind == closing) {
            return Err(syntax_error(unclosed, open.start, fragment()));
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(syntax_error(empty, open.start, fragment()));
        }

        if assertion {
            if self.assertion_seen {
                return Err(syntax_error(
                    "only one assertion is allowed per expression",
                    open.start,
                    Some(text.to_string()),
                ));
            }
            self.assertion_seen = true;
            return Ok(Node::Assertion {
                text: text.to_string(),
                position: open.start,
            });
        }

        if let Some((name, type_name)) = text.split_once(':') {
            if name.trim().is_empty() || type_name.trim().is_empty() {
                return Err(syntax_error(
                    "malformed argument, expected `name:type`",
                    open.start,
                    Some(text.to_string()),
                ));
            }
        }
        Ok(Node::Argument {
            text: text.to_string(),
            position: open.start,
        })
    }
}

/// Push literal text, carving standalone `*` words out as wildcards.
fn push_text(nodes: &mut Vec<Node>, text: &str) {
    let mut literal_start = 0;
    let mut after_boundary = true;
    let mut chars = text.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        let before_boundary = chars.peek().is_none_or(|(_, next)| next.is_whitespace());
        if ch == '*' && after_boundary && before_boundary {
            if let Some(literal) = text.get(literal_start..index).filter(|s| !s.is_empty()) {
                nodes.push(Node::Literal(literal.to_string()));
            }
            nodes.push(Node::Wildcard);
            literal_start = index + ch.len_utf8();
        }
        after_boundary = ch.is_whitespace();
    }
    if let Some(rest) = text.get(literal_start..).filter(|s| !s.is_empty()) {
        nodes.push(Node::Literal(rest.to_string()));
    }
}

/// Split `text` before its last word; `None` when it ends in whitespace.
fn split_last_word(text: &str) -> Option<(&str, &str)> {
    if text.chars().next_back().is_none_or(char::is_whitespace) {
        return None;
    }
    let index = text
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_whitespace())
        .map_or(0, |(index, ch)| index + ch.len_utf8());
    text.split_at_checked(index)
}

/// Split `text` after its first word; `None` when it starts with whitespace.
fn split_first_word(text: &str) -> Option<(&str, &str)> {
    if text.chars().next().is_none_or(char::is_whitespace) {
        return None;
    }
    let index = text.find(char::is_whitespace).unwrap_or(text.len());
    text.split_at_checked(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse_ok(expression: &str) -> Node {
        parse_expression(expression)
            .unwrap_or_else(|err| panic!("expression {expression:?} should parse: {err}"))
    }

    fn parse_err(expression: &str) -> PatternError {
        match parse_expression(expression) {
            Ok(node) => panic!("expression {expression:?} should fail, got {node:?}"),
            Err(err) => err,
        }
    }

    fn literal(text: &str) -> Node {
        Node::Literal(text.into())
    }

    #[test]
    fn literal_only_expression_is_a_single_literal() {
        assert_eq!(parse_ok("this is a word"), literal("this is a word"));
    }

    #[test]
    fn parses_optional_words() {
        assert_eq!(
            parse_ok("this is an (optional) word"),
            Node::Sequence(vec![
                literal("this is an "),
                Node::Optional(Box::new(literal("optional"))),
                literal(" word"),
            ])
        );
    }

    #[test]
    fn negates_only_the_first_following_word() {
        assert_eq!(
            parse_ok("a ^negated word"),
            Node::Sequence(vec![
                literal("a "),
                Node::Negation {
                    child: Box::new(literal("negated")),
                    scope: NegationScope::Word,
                },
                literal(" word"),
            ])
        );
    }

    #[test]
    fn bracketed_negation_with_spaces_is_a_phrase() {
        assert_eq!(
            parse_ok("a ^[negated phrase]"),
            Node::Sequence(vec![
                literal("a "),
                Node::Negation {
                    child: Box::new(literal("negated phrase")),
                    scope: NegationScope::Phrase,
                },
            ])
        );
    }

    #[test]
    fn bare_separator_chooses_between_adjacent_words() {
        assert_eq!(
            parse_ok("this is a word1|word2|word3 choice"),
            Node::Sequence(vec![
                literal("this is a "),
                Node::Choice {
                    alternatives: vec![literal("word1"), literal("word2"), literal("word3")],
                    delimiter: Delimiter::Bare,
                },
                literal(" choice"),
            ])
        );
    }

    #[rstest]
    #[case("[one phrase|another phrase]", Delimiter::Bracket)]
    #[case("(one phrase|another phrase)", Delimiter::Parenthesis)]
    fn bracket_with_separator_is_a_choice(#[case] expression: &str, #[case] delimiter: Delimiter) {
        assert_eq!(
            parse_ok(expression),
            Node::Choice {
                alternatives: vec![literal("one phrase"), literal("another phrase")],
                delimiter,
            }
        );
    }

    #[test]
    fn top_level_plain_group_is_flattened() {
        assert_eq!(
            parse_ok("a [b (c)]"),
            Node::Sequence(vec![
                literal("a "),
                literal("b "),
                Node::Optional(Box::new(literal("c"))),
            ])
        );
    }

    #[test]
    fn standalone_star_is_a_wildcard() {
        assert_eq!(
            parse_ok("this is a wildcard: *"),
            Node::Sequence(vec![literal("this is a wildcard: "), Node::Wildcard])
        );
        assert_eq!(parse_ok("2*3"), literal("2*3"));
    }

    #[test]
    fn parses_argument_and_assertion_slots() {
        assert_eq!(
            parse_ok("the number {n:number} {{number-assertion}}"),
            Node::Sequence(vec![
                literal("the number "),
                Node::Argument {
                    text: "n:number".into(),
                    position: 11,
                },
                literal(" "),
                Node::Assertion {
                    text: "number-assertion".into(),
                    position: 22,
                },
            ])
        );
    }

    #[test]
    fn reconstruction_reproduces_the_expression() {
        for expression in [
            "this is an (optional) word",
            "a ^negated word",
            "a ^[negated phrase]",
            "this is a word1|word2 choice",
            "[one phrase|another phrase] *",
            r"escaped \(paren\) {amount:decimal}",
        ] {
            assert_eq!(parse_ok(expression).to_expression(), expression);
        }
    }

    #[rstest]
    #[case("an (unclosed", "unclosed optional", 3)]
    #[case("a [group", "unclosed group", 2)]
    #[case("stray ) paren", "unbalanced closing symbol", 6)]
    #[case("(a]", "mismatched closing symbol", 2)]
    #[case("value {}", "empty argument", 6)]
    #[case("check {{ }}", "empty assertion", 6)]
    #[case("value {number", "unclosed argument", 6)]
    #[case("value {:number}", "malformed argument, expected `name:type`", 6)]
    #[case("a | b", "choice separator must sit between two words or inside brackets", 2)]
    #[case("|a", "choice separator must sit between two words or inside brackets", 0)]
    #[case("a ^ word", "negation must be followed by a word or a [group]", 2)]
    #[case("(a {n:number})", "arguments and assertions are not allowed inside brackets or negations", 3)]
    #[case("{{a}} and {{b}}", "only one assertion is allowed per expression", 10)]
    #[case("()", "empty brackets", 0)]
    #[case("[a||b]", "empty choice alternative", 0)]
    #[case("", "expression is empty", 0)]
    fn reports_syntax_errors_with_offsets(
        #[case] expression: &str,
        #[case] message: &str,
        #[case] position: usize,
    ) {
        let err = parse_err(expression);
        assert!(matches!(err, PatternError::Syntax(_)), "got {err:?}");
        assert_eq!(err.info().message, message);
        assert_eq!(err.position(), position);
    }

    #[test]
    fn tokenize_errors_surface_unchanged() {
        assert!(matches!(parse_err("bad\\"), PatternError::Tokenize(_)));
    }
}
