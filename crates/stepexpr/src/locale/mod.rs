//! Locale identifiers and the formatting conventions derived from them.
//!
//! Conventions are built in for a handful of languages; anything else falls
//! back to `en-US` behaviour so matching never fails merely because a locale
//! is unfamiliar.

mod calendar;

use std::fmt;
use std::str::FromStr;

use derive_more::{Deref, From};
use thiserror::Error;
use unic_langid::subtags::Region;
use unic_langid::{LanguageIdentifier, LanguageIdentifierError, langid};

pub use calendar::{DatePart, DateStyle, MonthForm, TimeStyle};

/// A BCP-47 language/region identifier used to key per-locale artefacts.
///
/// # Examples
/// ```
/// use stepexpr::Locale;
/// let locale = Locale::parse("es-ES").expect("valid tag");
/// assert_eq!(locale.language(), "es");
/// assert_eq!(locale.region(), Some("ES"));
/// assert_eq!(Locale::default().to_string(), "en-US");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, From)]
pub struct Locale(LanguageIdentifier);

/// A locale tag could not be parsed.
#[derive(Debug, Error)]
#[error("invalid locale `{tag}`: {source}")]
pub struct LocaleError {
    /// Tag as supplied by the caller.
    pub tag: String,
    /// Underlying parser failure.
    #[source]
    pub source: LanguageIdentifierError,
}

/// Digit grouping and decimal marks for numeric text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberSymbols {
    /// Separator between digit groups.
    pub grouping: char,
    /// Separator before the fractional part.
    pub decimal: char,
    /// Digits per group.
    pub group_size: usize,
}

/// Language used for natural-language assertion phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhraseLanguage {
    /// English phrases, also the fallback.
    English,
    /// Spanish phrases.
    Spanish,
}

impl Locale {
    /// Parse a BCP-47 tag such as `en-GB`.
    ///
    /// # Errors
    /// Returns [`LocaleError`] when the tag is malformed.
    pub fn parse(tag: &str) -> Result<Self, LocaleError> {
        tag.trim()
            .parse::<LanguageIdentifier>()
            .map(Self)
            .map_err(|source| LocaleError {
                tag: tag.to_string(),
                source,
            })
    }

    /// Primary language subtag.
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.language.as_str()
    }

    /// Region subtag, when present.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.0.region.as_ref().map(Region::as_str)
    }

    /// Whether `en` conventions for the United States apply.
    fn is_us_english(&self) -> bool {
        match self.language() {
            "en" => self.region().is_none_or(|region| region == "US"),
            _ => !self.has_conventions(),
        }
    }

    fn has_conventions(&self) -> bool {
        matches!(
            self.language(),
            "en" | "es" | "fr" | "de" | "it" | "pt" | "ja" | "zh"
        )
    }

    /// Numeric separators for this locale.
    #[must_use]
    pub fn number_symbols(&self) -> NumberSymbols {
        let (grouping, decimal) = match self.language() {
            "es" | "de" | "it" | "pt" => ('.', ','),
            "fr" => ('\u{202f}', ','),
            _ => (',', '.'),
        };
        NumberSymbols {
            grouping,
            decimal,
            group_size: 3,
        }
    }

    /// Display styles for dates, most common first.
    #[must_use]
    pub fn date_styles(&self) -> &'static [DateStyle] {
        if self.is_us_english() {
            return calendar::EN_US_DATES;
        }
        match self.language() {
            "es" => calendar::ES_DATES,
            "de" => calendar::DE_DATES,
            "pt" => calendar::PT_DATES,
            "ja" | "zh" => calendar::CJK_DATES,
            _ => calendar::EUROPEAN_DATES,
        }
    }

    /// Display styles for times of day.
    #[must_use]
    pub fn time_styles(&self) -> &'static [TimeStyle] {
        if self.is_us_english() {
            calendar::TWELVE_HOUR_TIMES
        } else {
            calendar::TWENTY_FOUR_HOUR_TIMES
        }
    }

    /// Month names in the given form, January first.
    #[must_use]
    pub fn month_names(&self, form: MonthForm) -> &'static [&'static str; 12] {
        calendar::month_names(self.language(), form)
    }

    /// Language of assertion phrases for this locale.
    #[must_use]
    pub fn phrase_language(&self) -> PhraseLanguage {
        match self.language() {
            "es" => PhraseLanguage::Spanish,
            _ => PhraseLanguage::English,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self(langid!("en-US"))
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
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
    #[case("en-US", ',', '.')]
    #[case("en-GB", ',', '.')]
    #[case("es-ES", '.', ',')]
    #[case("de-DE", '.', ',')]
    #[case("fr-FR", '\u{202f}', ',')]
    #[case("sv-SE", ',', '.')]
    fn derives_number_symbols(#[case] tag: &str, #[case] grouping: char, #[case] decimal: char) {
        let symbols = locale(tag).number_symbols();
        assert_eq!((symbols.grouping, symbols.decimal), (grouping, decimal));
        assert_eq!(symbols.group_size, 3);
    }

    #[rstest]
    #[case("en-US", "MM/dd/yyyy")]
    #[case("en", "MM/dd/yyyy")]
    #[case("en-GB", "dd/MM/yyyy")]
    #[case("de-DE", "dd.MM.yyyy")]
    #[case("ja-JP", "yyyy/MM/dd")]
    #[case("sv-SE", "MM/dd/yyyy")]
    fn picks_numeric_date_style(#[case] tag: &str, #[case] hint: &str) {
        let styles = locale(tag).date_styles();
        assert_eq!(styles.first().map(|style| style.hint), Some(hint));
    }

    #[test]
    fn only_us_english_uses_twelve_hour_times() {
        assert!(locale("en-US").time_styles().iter().any(|style| style.hour12));
        assert!(!locale("en-GB").time_styles().iter().any(|style| style.hour12));
    }

    #[test]
    fn spanish_locales_use_spanish_phrases() {
        assert_eq!(locale("es-MX").phrase_language(), PhraseLanguage::Spanish);
        assert_eq!(locale("fr-FR").phrase_language(), PhraseLanguage::English);
    }

    #[test]
    fn rejects_malformed_tags() {
        let Err(err) = Locale::parse("not a locale!") else {
            panic!("tag should be rejected");
        };
        assert!(err.to_string().starts_with("invalid locale `not a locale!`"));
    }
}
