//! Abstract syntax tree for step expressions.
//!
//! The tree is transient: it is built from the token stream by the parser
//! and consumed by regex synthesis within one compile call. Every node can
//! render itself back into expression syntax, which drives the fragment
//! merge heuristic and specificity scoring.

use super::lexer::is_structural;

/// Whether a negation excludes a single word or an arbitrary phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NegationScope {
    /// The negated text has no internal whitespace (`^word`).
    Word,
    /// The negated text spans several words (`^[some phrase]`).
    Phrase,
}

/// Brackets that delimited a choice in the source expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// Word-level choice written without brackets (`a|b`).
    Bare,
    /// `(a|b)`
    Parenthesis,
    /// `[a|b]`
    Bracket,
}

/// A node of the expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Ordered run of fragments.
    Sequence(Vec<Node>),
    /// Literal text with escapes resolved.
    Literal(String),
    /// Fragment that may be absent.
    Optional(Box<Node>),
    /// One of several alternatives.
    Choice {
        /// Alternatives in declaration order.
        alternatives: Vec<Node>,
        /// How the choice was written.
        delimiter: Delimiter,
    },
    /// Text that must not appear at this point.
    Negation {
        /// The excluded fragment.
        child: Box<Node>,
        /// Word or phrase negation.
        scope: NegationScope,
    },
    /// Standalone `*`, matching any text.
    Wildcard,
    /// `{name:type}` or `{type}` argument slot.
    Argument {
        /// Text between the braces, trimmed.
        text: String,
        /// Byte offset of the opening brace.
        position: usize,
    },
    /// `{{name}}` assertion slot.
    Assertion {
        /// Text between the double braces, trimmed.
        text: String,
        /// Byte offset of the opening braces.
        position: usize,
    },
}

impl Node {
    /// Collapse a list of fragments: one fragment stands alone, several form a
    /// [`Node::Sequence`].
    #[must_use]
    pub fn sequence(mut nodes: Vec<Self>) -> Self {
        if nodes.len() == 1 {
            if let Some(node) = nodes.pop() {
                return node;
            }
        }
        Self::Sequence(nodes)
    }

    /// Children of a sequence, or the node itself for any other kind.
    #[must_use]
    pub fn fragments(&self) -> &[Self] {
        match self {
            Self::Sequence(children) => children,
            other => std::slice::from_ref(other),
        }
    }

    /// Render the node back into expression syntax, re-escaping structural
    /// characters inside literals.
    ///
    /// # Examples
    /// ```
    /// use stepexpr_patterns::parse_expression;
    /// let ast = parse_expression(r"an (optional) \(word\)").expect("valid expression");
    /// assert_eq!(ast.to_expression(), r"an (optional) \(word\)");
    /// ```
    #[must_use]
    pub fn to_expression(&self) -> String {
        let mut out = String::new();
        self.write_expression(&mut out);
        out
    }

    fn write_expression(&self, out: &mut String) {
        match self {
            Self::Sequence(children) => {
                for child in children {
                    child.write_expression(out);
                }
            }
            Self::Literal(text) => push_escaped(out, text),
            Self::Optional(child) => {
                out.push('(');
                child.write_expression(out);
                out.push(')');
            }
            Self::Choice {
                alternatives,
                delimiter,
            } => {
                let (open, close) = match delimiter {
                    Delimiter::Bare => ("", ""),
                    Delimiter::Parenthesis => ("(", ")"),
                    Delimiter::Bracket => ("[", "]"),
                };
                out.push_str(open);
                for (index, alternative) in alternatives.iter().enumerate() {
                    if index > 0 {
                        out.push('|');
                    }
                    alternative.write_expression(out);
                }
                out.push_str(close);
            }
            Self::Negation { child, scope } => {
                out.push('^');
                match (scope, child.as_ref()) {
                    (NegationScope::Word, Self::Literal(_))
                    | (
                        _,
                        Self::Choice {
                            delimiter: Delimiter::Bracket,
                            ..
                        },
                    ) => child.write_expression(out),
                    _ => {
                        out.push('[');
                        child.write_expression(out);
                        out.push(']');
                    }
                }
            }
            Self::Wildcard => out.push('*'),
            Self::Argument { text, .. } => {
                out.push('{');
                out.push_str(text);
                out.push('}');
            }
            Self::Assertion { text, .. } => {
                out.push_str("{{");
                out.push_str(text);
                out.push_str("}}");
            }
        }
    }

    /// Whether an argument or assertion slot occurs anywhere in this node.
    #[must_use]
    pub fn contains_slot(&self) -> bool {
        match self {
            Self::Argument { .. } | Self::Assertion { .. } => true,
            Self::Sequence(children) => children.iter().any(Self::contains_slot),
            Self::Choice { alternatives, .. } => alternatives.iter().any(Self::contains_slot),
            Self::Optional(child) | Self::Negation { child, .. } => child.contains_slot(),
            Self::Literal(_) | Self::Wildcard => false,
        }
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        if is_structural(ch) {
            out.push('\\');
        }
        out.push(ch);
    }
}
