//! Locale-dependent numeric data types.

use std::sync::Arc;

use super::{ConvertFn, DataType, ParseError, anchored};
use crate::cache::LocaleCache;
use crate::locale::{Locale, NumberSymbols};
use crate::value::{Value, ValueKind};

/// Per-locale numeric syntax.
#[derive(Debug)]
struct NumberSyntax {
    regex: Arc<str>,
    hints: Arc<[String]>,
    validator: Option<regex::Regex>,
    symbols: NumberSymbols,
}

/// A number written with the locale's grouping and decimal separators.
///
/// The recognised form is an optional sign, digits either in full groups
/// separated by the grouping mark or ungrouped, and, when decimals are
/// enabled, an optional fractional part after the decimal mark.
///
/// # Examples
/// ```
/// use stepexpr::{DataType, Locale, NumberDataType, Value};
///
/// let decimal = NumberDataType::decimal();
/// let de = Locale::parse("de-DE").expect("valid tag");
/// assert_eq!(decimal.parse(&de, "1.234,5").expect("German decimal"), Value::Decimal(1234.5));
/// assert_eq!(decimal.hints(&de).first().map(String::as_str), Some("#.##0,###"));
/// ```
#[derive(Debug)]
pub struct NumberDataType {
    name: String,
    kind: ValueKind,
    decimals: bool,
    convert: ConvertFn,
    syntax: LocaleCache<NumberSyntax>,
}

impl NumberDataType {
    /// Create a numeric type; `convert` receives text normalised to an
    /// optional sign, ASCII digits and at most one `.`.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ValueKind, decimals: bool, convert: ConvertFn) -> Self {
        Self {
            name: name.into(),
            kind,
            decimals,
            convert,
            syntax: LocaleCache::new(),
        }
    }

    /// `integer`: a whole number in the 32-bit range.
    #[must_use]
    pub fn integer() -> Self {
        Self::new("integer", ValueKind::Integer, false, |text| {
            text.parse::<i32>()
                .map(|value| Value::Integer(i64::from(value)))
                .map_err(|err| err.to_string())
        })
    }

    /// A whole number in the 64-bit range, registered under `name`.
    #[must_use]
    pub fn long(name: &str) -> Self {
        Self::new(name, ValueKind::Integer, false, |text| {
            text.parse::<i64>()
                .map(Value::Integer)
                .map_err(|err| err.to_string())
        })
    }

    /// `decimal`: a number with an optional fractional part.
    #[must_use]
    pub fn decimal() -> Self {
        Self::decimal_named("decimal")
    }

    /// A decimal number registered under `name`.
    #[must_use]
    pub fn decimal_named(name: &str) -> Self {
        Self::new(name, ValueKind::Decimal, true, |text| {
            text.parse::<f64>()
                .map(Value::Decimal)
                .map_err(|err| err.to_string())
        })
    }

    fn syntax(&self, locale: &Locale) -> Arc<NumberSyntax> {
        self.syntax.get_or_insert_with(locale, || {
            let symbols = locale.number_symbols();
            let regex = number_regex(symbols, self.decimals);
            NumberSyntax {
                validator: anchored(&regex),
                regex: Arc::from(regex),
                hints: Arc::from([number_hint(symbols, self.decimals)]),
                symbols,
            }
        })
    }
}

fn number_regex(symbols: NumberSymbols, decimals: bool) -> String {
    let grouping = regex::escape(&symbols.grouping.to_string());
    let size = symbols.group_size;
    let mut regex = format!(r"[+-]?(?:\d{{1,{size}}}(?:{grouping}\d{{{size}}})+|\d+)");
    if decimals {
        let decimal = regex::escape(&symbols.decimal.to_string());
        regex.push_str(&format!(r"(?:{decimal}\d+)?"));
    }
    regex
}

fn number_hint(symbols: NumberSymbols, decimals: bool) -> String {
    let NumberSymbols {
        grouping, decimal, ..
    } = symbols;
    if decimals {
        format!("#{grouping}##0{decimal}###")
    } else {
        format!("#{grouping}##0")
    }
}

impl DataType for NumberDataType {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ValueKind {
        self.kind
    }

    fn regex(&self, locale: &Locale) -> Arc<str> {
        Arc::clone(&self.syntax(locale).regex)
    }

    fn hints(&self, locale: &Locale) -> Arc<[String]> {
        Arc::clone(&self.syntax(locale).hints)
    }

    fn parse(&self, locale: &Locale, text: &str) -> Result<Value, ParseError> {
        let syntax = self.syntax(locale);
        let trimmed = text.trim();
        if !syntax
            .validator
            .as_ref()
            .is_none_or(|validator| validator.is_match(trimmed))
        {
            return Err(ParseError::new(
                self,
                locale,
                text,
                "not a number in this locale's format",
            ));
        }
        let NumberSymbols {
            grouping, decimal, ..
        } = syntax.symbols;
        let normalised: String = trimmed
            .chars()
            .filter(|ch| *ch != grouping)
            .map(|ch| if ch == decimal { '.' } else { ch })
            .collect();
        (self.convert)(&normalised).map_err(|reason| ParseError::new(self, locale, text, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap_or_else(|err| panic!("tag {tag:?} should parse: {err}"))
    }

    #[rstest]
    #[case("en-US", "42", 42)]
    #[case("en-US", "-1,234,567", -1_234_567)]
    #[case("en-US", "+7", 7)]
    #[case("es-ES", "1.234", 1234)]
    #[case("fr-FR", "1\u{202f}234", 1234)]
    fn parses_localised_integers(#[case] tag: &str, #[case] text: &str, #[case] expected: i64) {
        let value = NumberDataType::long("number")
            .parse(&locale(tag), text)
            .unwrap_or_else(|err| panic!("{text:?} should parse: {err}"));
        assert_eq!(value, Value::Integer(expected));
    }

    #[rstest]
    #[case("en-US", "1,234.5")]
    #[case("de-DE", "1.234,5")]
    #[case("it-IT", "1234,5")]
    fn parses_localised_decimals(#[case] tag: &str, #[case] text: &str) {
        let value = NumberDataType::decimal()
            .parse(&locale(tag), text)
            .unwrap_or_else(|err| panic!("{text:?} should parse: {err}"));
        assert_eq!(value, Value::Decimal(1234.5));
    }

    #[rstest]
    #[case("en-US", "12,34")]
    #[case("en-US", "1.5")]
    #[case("de-DE", "1,234.5")]
    fn rejects_foreign_separators(#[case] tag: &str, #[case] text: &str) {
        assert!(NumberDataType::long("number").parse(&locale(tag), text).is_err());
    }

    #[test]
    fn integer_rejects_values_outside_32_bits() {
        let Err(err) = NumberDataType::integer().parse(&locale("en-US"), "3,000,000,000") else {
            panic!("value should overflow i32");
        };
        assert_eq!(err.text, "3,000,000,000");
        assert!(err.reason.contains("too large"));
    }

    #[test]
    fn synthesises_grouped_regex() {
        let regex = NumberDataType::decimal().regex(&locale("de-DE"));
        assert_eq!(&*regex, r"[+-]?(?:\d{1,3}(?:\.\d{3})+|\d+)(?:,\d+)?");
    }

    #[test]
    fn caches_artefacts_per_locale() {
        let number = NumberDataType::long("number");
        let en = locale("en-US");
        assert!(Arc::ptr_eq(&number.regex(&en), &number.regex(&en)));
        assert!(Arc::ptr_eq(&number.hints(&en), &number.hints(&en)));
        assert!(!Arc::ptr_eq(&number.regex(&en), &number.regex(&locale("es-ES"))));
    }
}
