//! Locale-independent data types defined by a fixed regex.

use std::sync::Arc;

use super::{ConvertFn, DataType, ParseError};
use crate::locale::Locale;
use crate::value::{Value, ValueKind};

/// A data type with one regex, one hint list and one parser for every
/// locale.
///
/// # Examples
/// ```
/// use stepexpr::{DataType, Locale, RegexDataType, Value, ValueKind};
///
/// let colour = RegexDataType::new("colour", ValueKind::Text, "red|green|blue", ["red, green or blue"], |text| {
///     Ok(Value::Text(text.to_uppercase()))
/// });
/// let value = colour.parse(&Locale::default(), "green").expect("known colour");
/// assert_eq!(value, Value::Text("GREEN".into()));
/// ```
#[derive(Debug, Clone)]
pub struct RegexDataType {
    name: String,
    kind: ValueKind,
    regex: Arc<str>,
    hints: Arc<[String]>,
    parser: ConvertFn,
}

impl RegexDataType {
    /// Create a data type from a regex, hints and a parse strategy.
    #[must_use]
    pub fn new<H>(
        name: impl Into<String>,
        kind: ValueKind,
        regex: &str,
        hints: impl IntoIterator<Item = H>,
        parser: ConvertFn,
    ) -> Self
    where
        H: Into<String>,
    {
        Self {
            name: name.into(),
            kind,
            regex: Arc::from(regex),
            hints: hints.into_iter().map(Into::into).collect(),
            parser,
        }
    }

    /// `word`: any run of non-whitespace characters.
    #[must_use]
    pub fn word() -> Self {
        Self::new("word", ValueKind::Text, r"\S+", ["word"], |text| {
            Ok(Value::Text(text.to_string()))
        })
    }

    /// `id`: an identifier such as `order_42` or `api.v2-beta`.
    #[must_use]
    pub fn identifier() -> Self {
        Self::new(
            "id",
            ValueKind::Text,
            r"[A-Za-z_][A-Za-z0-9_.\-]*",
            ["identifier"],
            |text| Ok(Value::Text(text.to_string())),
        )
    }

    /// `text`: single- or double-quoted text, reported without its quotes.
    #[must_use]
    pub fn quoted_text() -> Self {
        Self::new(
            "text",
            ValueKind::Text,
            r#""[^"]*"|'[^']*'"#,
            ["\"text\"", "'text'"],
            unquote,
        )
    }
}

fn unquote(text: &str) -> Result<Value, String> {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| text.strip_prefix(quote)?.strip_suffix(quote))
        .map(|inner| Value::Text(inner.to_string()))
        .ok_or_else(|| "text must be enclosed in matching quotes".to_string())
}

impl DataType for RegexDataType {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ValueKind {
        self.kind
    }

    fn regex(&self, _locale: &Locale) -> Arc<str> {
        Arc::clone(&self.regex)
    }

    fn hints(&self, _locale: &Locale) -> Arc<[String]> {
        Arc::clone(&self.hints)
    }

    fn parse(&self, locale: &Locale, text: &str) -> Result<Value, ParseError> {
        (self.parser)(text).map_err(|reason| ParseError::new(self, locale, text, reason))
    }
}
