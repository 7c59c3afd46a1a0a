//! Regex synthesis and fragment merging.
//!
//! Every non-slot node renders to a [`PatternFragment`]: a regex source plus
//! a literal reconstruction. Adjacent pattern fragments are merged by looking
//! at the shape of their text, never at the node kinds that produced them.
//! Argument and assertion slots stay unresolved; the runtime binds them to
//! data types and assertion factories.

use crate::errors::{PatternError, syntax_error};

use super::ast::{NegationScope, Node};
use super::parser::parse_expression;

const MANDATORY_WS_TAIL: &str = r"\s+)";
const RELAXED_WS_TAIL: &str = r"\s*)";
const MANDATORY_WS_HEAD: &str = r"(\s+";
const WS_GAP: &str = r"(\s+)";

/// A compiled run of expression text with no extraction slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFragment {
    /// Unanchored regex source.
    pub regex: String,
    /// Reconstruction of the expression text the regex was built from.
    pub literal: String,
}

impl PatternFragment {
    fn new(regex: impl Into<String>, literal: impl Into<String>) -> Self {
        Self {
            regex: regex.into(),
            literal: literal.into(),
        }
    }

    /// Whether the fragment is a single optional group such as `(word)`.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.regex.ends_with('?') && spans_single_group(&self.literal)
    }

    /// Append `right`, reconciling the whitespace required at the seam.
    ///
    /// A mandatory trailing whitespace run on the left is relaxed when the
    /// right side may match nothing, and the optional side then carries the
    /// separating whitespace itself. The mirrored case, an optional followed
    /// by text that starts with whitespace, moves that whitespace into the
    /// optional group. Two optionals separated only by whitespace fold into
    /// one optional group so that either may be left out.
    ///
    /// # Examples
    /// ```
    /// use stepexpr_patterns::{Fragment, compile_expression};
    /// let fragments = compile_expression("a (b)").expect("valid expression");
    /// let Some(Fragment::Pattern(pattern)) = fragments.first() else {
    ///     panic!("expected a pattern fragment");
    /// };
    /// assert_eq!(pattern.regex, r"(a\s*)(?:\s+(b))?");
    /// ```
    pub fn merge(&mut self, right: &Self) {
        let left_has_ws_tail = self.regex.ends_with(MANDATORY_WS_TAIL);
        let leading_optional = self
            .regex
            .strip_suffix(WS_GAP)
            .and_then(optional_body);
        if let (Some(first), true) = (leading_optional, right.is_optional()) {
            if let Some(second) = right.regex.strip_suffix('?') {
                self.regex = format!(r"(?:{first}(?:\s+{second})?|{second})?");
            }
        } else if left_has_ws_tail && right.is_optional() {
            if let Some(inner) = right.regex.strip_suffix('?') {
                relax_tail(&mut self.regex);
                self.regex.push_str(r"(?:\s+");
                self.regex.push_str(inner);
                self.regex.push_str(")?");
            }
        } else if left_has_ws_tail && right.literal == "*" {
            relax_tail(&mut self.regex);
            self.regex.push_str(&right.regex);
        } else if let (Some(inner), true) = (
            optional_body(&self.regex),
            starts_with_padded_text(&right.regex),
        ) {
            if let Some(rest) = right.regex.strip_prefix(MANDATORY_WS_HEAD) {
                self.regex = format!(r"(?:{inner}\s+)?({rest}");
            }
        } else {
            self.regex.push_str(&right.regex);
        }
        self.literal.push_str(&right.literal);
    }
}

/// An argument slot awaiting its data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSlot {
    /// Binding name under which the value is reported.
    pub name: String,
    /// Name of the data type parsing the captured text.
    pub type_name: String,
    /// Byte offset of the slot in the expression.
    pub position: usize,
}

impl ArgumentSlot {
    /// Interpret the text of a `{name:type}` or `{type}` slot.
    ///
    /// # Examples
    /// ```
    /// use stepexpr_patterns::ArgumentSlot;
    /// let slot = ArgumentSlot::from_slot_text("total : decimal", 4);
    /// assert_eq!(slot.name, "total");
    /// assert_eq!(slot.type_name, "decimal");
    /// let bare = ArgumentSlot::from_slot_text("number", 0);
    /// assert_eq!(bare.name, "number");
    /// ```
    #[must_use]
    pub fn from_slot_text(text: &str, position: usize) -> Self {
        let (name, type_name) = text.split_once(':').unwrap_or((text, text));
        Self {
            name: name.trim().to_string(),
            type_name: type_name.trim().to_string(),
            position,
        }
    }
}

/// An assertion slot awaiting its factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionSlot {
    /// Name of the assertion factory.
    pub name: String,
    /// Byte offset of the slot in the expression.
    pub position: usize,
}

/// One piece of a compiled expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Plain recognition pattern.
    Pattern(PatternFragment),
    /// Typed argument slot.
    Argument(ArgumentSlot),
    /// Assertion phrase slot.
    Assertion(AssertionSlot),
}

/// Compile an expression into ordered fragments with merged patterns.
///
/// # Errors
/// Propagates [`PatternError`] from tokenizing and parsing.
///
/// # Examples
/// ```
/// use stepexpr_patterns::{Fragment, compile_expression};
/// let fragments = compile_expression("the number {n:number}").expect("valid expression");
/// assert_eq!(fragments.len(), 2);
/// assert!(matches!(&fragments[1], Fragment::Argument(slot) if slot.type_name == "number"));
/// ```
pub fn compile_expression(expression: &str) -> Result<Vec<Fragment>, PatternError> {
    let ast = parse_expression(expression)?;
    let mut fragments: Vec<Fragment> = Vec::new();
    for node in ast.fragments() {
        match node {
            Node::Argument { text, position } => {
                fragments.push(Fragment::Argument(ArgumentSlot::from_slot_text(
                    text, *position,
                )));
            }
            Node::Assertion { text, position } => {
                fragments.push(Fragment::Assertion(AssertionSlot {
                    name: text.clone(),
                    position: *position,
                }));
            }
            other => {
                let rendered = render(other)?;
                match fragments.last_mut() {
                    Some(Fragment::Pattern(previous)) => previous.merge(&rendered),
                    _ => fragments.push(Fragment::Pattern(rendered)),
                }
            }
        }
    }
    Ok(fragments)
}

/// Render a slot-free node into a pattern fragment; slots are rejected.
pub(crate) fn render(node: &Node) -> Result<PatternFragment, PatternError> {
    let fragment = match node {
        Node::Sequence(children) => {
            let mut rendered = children.iter().map(render);
            let Some(first) = rendered.next().transpose()? else {
                return Ok(PatternFragment::new("", ""));
            };
            rendered.try_fold(first, |mut merged, next| {
                merged.merge(&next?);
                Ok::<_, PatternError>(merged)
            })?
        }
        Node::Literal(text) => PatternFragment::new(literal_regex(text), node.to_expression()),
        Node::Wildcard => PatternFragment::new("(.*)", "*"),
        Node::Optional(child) => {
            let inner = render(child)?;
            let mut regex = atom(&inner.regex);
            regex.push('?');
            PatternFragment::new(regex, format!("({})", inner.literal))
        }
        Node::Choice { alternatives, .. } => {
            let rendered = alternatives
                .iter()
                .map(|alternative| render(alternative).map(|fragment| fragment.regex))
                .collect::<Result<Vec<_>, _>>()?;
            PatternFragment::new(format!("({})", rendered.join("|")), node.to_expression())
        }
        Node::Negation { child, scope } => {
            let inner = render(child)?;
            let tail = match scope {
                NegationScope::Word => r"\S+",
                NegationScope::Phrase => ".*",
            };
            PatternFragment::new(format!("(?!{}){tail}", inner.regex), node.to_expression())
        }
        Node::Argument { position, .. } | Node::Assertion { position, .. } => {
            return Err(syntax_error(
                "arguments and assertions are not allowed inside brackets or negations",
                *position,
                Some(node.to_expression()),
            ));
        }
    };
    Ok(fragment)
}

/// Escape literal text, generalising each whitespace run to `\s+`.
fn literal_regex(text: &str) -> String {
    let mut regex = String::with_capacity(text.len().saturating_add(8));
    regex.push('(');
    if text.starts_with(char::is_whitespace) {
        regex.push_str(r"\s+");
    }
    let mut words = text.split_whitespace().peekable();
    while let Some(word) = words.next() {
        regex.push_str(&regex::escape(word));
        if words.peek().is_some() {
            regex.push_str(r"\s+");
        }
    }
    let has_words = text.split_whitespace().next().is_some();
    if has_words && text.ends_with(char::is_whitespace) {
        regex.push_str(r"\s+");
    }
    regex.push(')');
    regex
}

/// Wrap `regex` in a non-capturing group unless it already is one group.
fn atom(regex: &str) -> String {
    if spans_single_group(regex) {
        regex.to_string()
    } else {
        format!("(?:{regex})")
    }
}

fn relax_tail(regex: &mut String) {
    if let Some(stem) = regex.strip_suffix(MANDATORY_WS_TAIL) {
        *regex = format!("{stem}{RELAXED_WS_TAIL}");
    }
}

/// A capturing group that opens with whitespace and has text after it.
fn starts_with_padded_text(regex: &str) -> bool {
    regex
        .strip_prefix(MANDATORY_WS_HEAD)
        .is_some_and(|rest| !rest.starts_with(')'))
}

/// The group of a regex that is exactly one optional group, such as `(a)?`.
fn optional_body(regex: &str) -> Option<&str> {
    regex
        .strip_suffix('?')
        .filter(|body| spans_single_group(body))
}

/// Whether the first `(` of `text` is closed by its final character.
///
/// Backslash escapes are skipped, so the same scan serves regex sources and
/// expression reconstructions.
fn spans_single_group(text: &str) -> bool {
    if !text.starts_with('(') {
        return false;
    }
    let mut depth = 0usize;
    let mut chars = text.char_indices();
    while let Some((index, ch)) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '(' => depth = depth.saturating_add(1),
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return index.saturating_add(1) == text.len();
                }
            }
            _ => {}
        }
    }
    false
}
