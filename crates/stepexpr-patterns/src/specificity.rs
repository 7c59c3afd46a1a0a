//! Expression specificity calculation for disambiguation.
//!
//! When several expressions match the same step text, the score picks the
//! most specific one: more literal text, fewer wildcards and fewer slots.

use crate::PatternError;
use crate::pattern::{Node, parse_expression};
use std::cmp::Ordering;

/// Specificity score for a step expression.
///
/// # Ordering
///
/// Expressions are compared by:
/// 1. More literal characters → more specific
/// 2. Fewer wildcards → more specific
/// 3. Fewer argument and assertion slots → more specific
///
/// # Examples
///
/// ```
/// use stepexpr_patterns::SpecificityScore;
///
/// let specific = SpecificityScore::calculate("the output is foo")
///     .expect("valid specific expression");
/// let generic = SpecificityScore::calculate("the output is {value:word}")
///     .expect("valid generic expression");
/// assert!(specific > generic);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecificityScore {
    /// Literal characters anywhere in the expression, optional text included.
    pub literal_chars: usize,
    /// Number of standalone `*` wildcards.
    pub wildcard_count: usize,
    /// Number of argument and assertion slots.
    pub slot_count: usize,
}

impl SpecificityScore {
    /// Calculate the specificity score for an expression string.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the expression contains invalid syntax.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepexpr_patterns::SpecificityScore;
    ///
    /// let score = SpecificityScore::calculate("I have {count:integer} apples")
    ///     .expect("valid expression");
    /// assert_eq!(score.literal_chars, 14); // "I have " + " apples"
    /// assert_eq!(score.slot_count, 1);
    /// ```
    pub fn calculate(expression: &str) -> Result<Self, PatternError> {
        let ast = parse_expression(expression)?;
        Ok(Self::of(&ast))
    }

    /// Score an already parsed expression.
    #[must_use]
    pub fn of(node: &Node) -> Self {
        let mut score = Self::default();
        score.accumulate(node);
        score
    }

    fn accumulate(&mut self, node: &Node) {
        match node {
            Node::Literal(text) => self.literal_chars += text.chars().count(),
            Node::Wildcard => self.wildcard_count += 1,
            Node::Argument { .. } | Node::Assertion { .. } => self.slot_count += 1,
            Node::Sequence(children) | Node::Choice {
                alternatives: children,
                ..
            } => {
                for child in children {
                    self.accumulate(child);
                }
            }
            Node::Optional(child) | Node::Negation { child, .. } => self.accumulate(child),
        }
    }
}

impl Ord for SpecificityScore {
    fn cmp(&self, other: &Self) -> Ordering {
        // More literal characters → more specific
        match self.literal_chars.cmp(&other.literal_chars) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // Fewer wildcards → more specific (reverse comparison)
        match other.wildcard_count.cmp(&self.wildcard_count) {
            Ordering::Equal => {}
            ord => return ord,
        }

        other.slot_count.cmp(&self.slot_count)
    }
}

impl PartialOrd for SpecificityScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unwrap a result with a descriptive panic message on failure.
    fn score(expression: &str) -> SpecificityScore {
        match SpecificityScore::calculate(expression) {
            Ok(s) => s,
            Err(e) => panic!("expression {expression:?} should calculate successfully: {e}"),
        }
    }

    #[test]
    fn literal_only_expression_beats_slots() {
        let literal = score("overlap apples");
        let with_slot = score("overlap {item:word}");

        assert!(literal > with_slot);
        assert_eq!(literal.slot_count, 0);
        assert_eq!(with_slot.slot_count, 1);
    }

    #[test]
    fn fewer_wildcards_wins_with_equal_literals() {
        let a = score("ab {x:word}");
        let b = score("ab *");

        assert_eq!(a.literal_chars, b.literal_chars);
        assert!(a > b, "slots are more specific than wildcards");
    }

    #[test]
    fn fewer_slots_wins_with_equal_literals() {
        let a = score("ab {x:word}");
        let b = score("a {x:word} {y:word}");

        assert_eq!(a.literal_chars, 3); // "ab "
        assert_eq!(b.literal_chars, 3); // "a " + " "
        assert!(a > b);
    }

    #[test]
    fn counts_text_inside_optionals_and_choices() {
        let scored = score("a (big) [red|blue] ^car");
        // "a " + "big" + " " + "red" + "blue" + " " + "car"
        assert_eq!(scored.literal_chars, 17);
    }

    #[test]
    fn multibyte_characters_counted_correctly() {
        let unicode = score("café {value:word}");

        // "café " is 5 characters (not 6 bytes)
        assert_eq!(unicode.literal_chars, 5);
    }

    #[test]
    fn surfaces_syntax_errors() {
        assert!(SpecificityScore::calculate("broken (").is_err());
    }
}
