//! Data types: named, locale-aware recognisers and parsers for argument
//! slots.
//!
//! A data type supplies, per locale, the regex embedded in compiled
//! expressions, the hints shown when parsing fails, and the parser itself.
//! Locale-dependent adapters memoise their artefacts in a [`LocaleCache`] so
//! repeated calls for one locale return the same `Arc`.
//!
//! [`LocaleCache`]: crate::LocaleCache

mod number;
mod regex_type;
mod temporal;

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use thiserror::Error;

use crate::locale::Locale;
use crate::value::{Value, ValueKind};

pub use number::NumberDataType;
pub use regex_type::RegexDataType;
pub use temporal::TemporalDataType;

/// Strategy turning normalised text into a value.
pub type ConvertFn = fn(&str) -> Result<Value, String>;

/// A named value recogniser pluggable into argument slots.
pub trait DataType: Send + Sync + fmt::Debug {
    /// Registry name, e.g. `number`.
    fn name(&self) -> &str;

    /// Semantic kind of parsed values.
    fn kind(&self) -> ValueKind;

    /// Unanchored regex recognising values in `locale`.
    fn regex(&self, locale: &Locale) -> Arc<str>;

    /// Human-readable formats accepted in `locale`.
    fn hints(&self, locale: &Locale) -> Arc<[String]>;

    /// Parse `text` as written in `locale`.
    ///
    /// # Errors
    /// Returns [`ParseError`] when the text is not a valid value.
    fn parse(&self, locale: &Locale, text: &str) -> Result<Value, ParseError>;
}

/// A captured literal was rejected by its data type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "cannot parse `{text}` as {type_name} in locale {locale}: {reason} (expected {})",
    .hints.join(" or ")
)]
pub struct ParseError {
    /// Name of the data type.
    pub type_name: String,
    /// Locale the text was parsed in.
    pub locale: Locale,
    /// Offending text.
    pub text: String,
    /// Accepted formats for the locale.
    pub hints: Vec<String>,
    /// Why parsing failed.
    pub reason: String,
}

impl ParseError {
    /// Build an error for `data_type`, collecting its hints for `locale`.
    #[must_use]
    pub fn new(
        data_type: &(impl DataType + ?Sized),
        locale: &Locale,
        text: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            type_name: data_type.name().to_string(),
            locale: locale.clone(),
            text: text.to_string(),
            hints: data_type.hints(locale).to_vec(),
            reason: reason.into(),
        }
    }
}

/// Lookup of a data type that is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown data type `{name}`; known types: {}", .known.join(", "))]
pub struct UnknownDataType {
    /// Requested name.
    pub name: String,
    /// Registered names, sorted.
    pub known: Vec<String>,
}

/// Name-keyed registry of data types.
///
/// # Examples
/// ```
/// use stepexpr::{DataTypes, Locale, Value};
///
/// let types = DataTypes::standard();
/// let integer = types.by_name("integer").expect("standard type");
/// let value = integer.parse(&Locale::default(), "1,234").expect("valid integer");
/// assert_eq!(value, Value::Integer(1234));
/// assert!(types.by_name("colour").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataTypes {
    types: HashMap<String, Arc<dyn DataType>>,
}

impl DataTypes {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in types: `word`, `id`, `text`, `integer`,
    /// `number`, `long`, `decimal`, `date`, `time` and `datetime`.
    #[must_use]
    pub fn standard() -> Self {
        let mut types = Self::new();
        types
            .register(RegexDataType::word())
            .register(RegexDataType::identifier())
            .register(RegexDataType::quoted_text())
            .register(NumberDataType::integer())
            .register(NumberDataType::long("number"))
            .register(NumberDataType::long("long"))
            .register(NumberDataType::decimal())
            .register(TemporalDataType::date())
            .register(TemporalDataType::time())
            .register(TemporalDataType::date_time());
        types
    }

    /// Register `data_type`, replacing any type with the same name.
    pub fn register(&mut self, data_type: impl DataType + 'static) -> &mut Self {
        self.register_shared(Arc::new(data_type))
    }

    /// Register an already shared data type.
    pub fn register_shared(&mut self, data_type: Arc<dyn DataType>) -> &mut Self {
        let name = data_type.name().to_string();
        if self.types.insert(name.clone(), data_type).is_some() {
            log::debug!("data type `{name}` replaced an earlier registration");
        }
        self
    }

    /// Look a data type up by name.
    ///
    /// # Errors
    /// Returns [`UnknownDataType`] listing the registered names on a miss.
    pub fn by_name(&self, name: &str) -> Result<Arc<dyn DataType>, UnknownDataType> {
        self.types
            .get(name)
            .cloned()
            .ok_or_else(|| UnknownDataType {
                name: name.to_string(),
                known: self.names(),
            })
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Describe every registered type as seen from `locale`, sorted by name.
    #[must_use]
    pub fn describe(&self, locale: &Locale) -> Vec<crate::DataTypeDescription> {
        self.names()
            .iter()
            .filter_map(|name| self.types.get(name))
            .map(|data_type| crate::DataTypeDescription {
                name: data_type.name().to_string(),
                kind: data_type.kind(),
                regex: data_type.regex(locale).to_string(),
                hints: data_type.hints(locale).to_vec(),
            })
            .collect()
    }
}

/// Anchor an embeddable regex for whole-text validation.
fn anchored(regex: &str) -> Option<regex::Regex> {
    regex::Regex::new(&format!("^(?:{regex})$"))
        .inspect_err(|err| log::warn!("data type regex `{regex}` failed to compile: {err}"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_known_names_on_a_miss() {
        let types = DataTypes::standard();
        let Err(err) = types.by_name("colour") else {
            panic!("lookup should miss");
        };
        assert_eq!(err.name, "colour");
        assert!(err.known.contains(&"decimal".to_string()));
        assert!(err.to_string().starts_with("unknown data type `colour`; known types: date, datetime"));
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let mut types = DataTypes::new();
        types
            .register(NumberDataType::long("amount"))
            .register(NumberDataType::decimal_named("amount"));
        let amount = types
            .by_name("amount")
            .unwrap_or_else(|err| panic!("registered type: {err}"));
        assert_eq!(amount.kind(), ValueKind::Decimal);
        assert_eq!(types.names(), vec!["amount".to_string()]);
    }

    #[test]
    fn parse_errors_carry_hints() {
        let types = DataTypes::standard();
        let integer = types
            .by_name("integer")
            .unwrap_or_else(|err| panic!("standard type: {err}"));
        let Err(err) = integer.parse(&Locale::default(), "twelve") else {
            panic!("text should not parse");
        };
        assert_eq!(err.type_name, "integer");
        assert_eq!(err.hints, vec!["#,##0".to_string()]);
    }
}
