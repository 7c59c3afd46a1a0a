//! Locale-dependent date, time and date-time data types.
//!
//! Each locale contributes its narrative display styles; every style becomes
//! an unnamed alternative of the embedded regex and a named, anchored regex
//! used for parsing. ISO-8601 text is accepted under every locale after the
//! narrative styles have been tried.

use std::sync::Arc;

use time::macros::format_description;
use time::{Date, Month, PrimitiveDateTime, Time};

use super::{DataType, ParseError};
use crate::cache::LocaleCache;
use crate::locale::{DatePart, DateStyle, Locale, MonthForm, TimeStyle};
use crate::value::{Value, ValueKind};

const ISO_DATE: &str = r"\d{4}-\d{2}-\d{2}";
const ISO_TIME: &str = r"\d{2}:\d{2}(?::\d{2}(?:\.\d{1,9})?)?";
const ISO_DATE_HINT: &str = "yyyy-MM-dd";
const ISO_TIME_HINT: &str = "HH:mm:ss";
const DATE_TIME_SEPARATOR: &str = r"(?:,\s*|\s+)";

#[derive(Debug)]
struct TemporalSyntax {
    regex: Arc<str>,
    hints: Arc<[String]>,
    parsers: Vec<regex::Regex>,
}

/// A date, a time of day, or both, written in a locale's display styles or
/// in ISO-8601.
///
/// # Examples
/// ```
/// use stepexpr::{DataType, Locale, TemporalDataType, Value};
/// use time::macros::date;
///
/// let dates = TemporalDataType::date();
/// let es = Locale::parse("es-ES").expect("valid tag");
/// assert_eq!(dates.parse(&es, "15 de enero de 2024").expect("long style"), Value::Date(date!(2024 - 01 - 15)));
/// assert_eq!(dates.parse(&es, "2024-01-15").expect("ISO fallback"), Value::Date(date!(2024 - 01 - 15)));
/// ```
#[derive(Debug)]
pub struct TemporalDataType {
    name: String,
    date: bool,
    time: bool,
    syntax: LocaleCache<TemporalSyntax>,
}

impl TemporalDataType {
    fn new(name: &str, date: bool, time: bool) -> Self {
        Self {
            name: name.to_string(),
            date,
            time,
            syntax: LocaleCache::new(),
        }
    }

    /// `date`: a calendar date.
    #[must_use]
    pub fn date() -> Self {
        Self::new("date", true, false)
    }

    /// `time`: a time of day.
    #[must_use]
    pub fn time() -> Self {
        Self::new("time", false, true)
    }

    /// `datetime`: a date followed by a time of day.
    #[must_use]
    pub fn date_time() -> Self {
        Self::new("datetime", true, true)
    }

    fn syntax(&self, locale: &Locale) -> Arc<TemporalSyntax> {
        self.syntax.get_or_insert_with(locale, || self.build_syntax(locale))
    }

    fn build_syntax(&self, locale: &Locale) -> TemporalSyntax {
        let dates = locale.date_styles();
        let times = locale.time_styles();
        let mut alternatives = Vec::new();
        let mut hints = Vec::new();
        let mut parsers = Vec::new();
        let mut add = |embedded: String, named: String, hint: String| {
            let Ok(parser) = regex::Regex::new(&format!("^{named}$")) else {
                log::warn!("skipping temporal style `{hint}` for {locale}: regex failed to compile");
                return;
            };
            parsers.push(parser);
            alternatives.push(embedded);
            hints.push(hint);
        };

        match (self.date, self.time) {
            (true, false) => {
                for style in dates {
                    add(
                        date_regex(style, locale, false),
                        date_regex(style, locale, true),
                        style.hint.to_string(),
                    );
                }
            }
            (false, _) => {
                for style in times {
                    add(
                        time_regex(style, false),
                        time_regex(style, true),
                        style.hint.to_string(),
                    );
                }
            }
            (true, true) => {
                for date_style in dates {
                    for time_style in times {
                        add(
                            format!(
                                "{}{DATE_TIME_SEPARATOR}{}",
                                date_regex(date_style, locale, false),
                                time_regex(time_style, false)
                            ),
                            format!(
                                "{}{DATE_TIME_SEPARATOR}{}",
                                date_regex(date_style, locale, true),
                                time_regex(time_style, true)
                            ),
                            format!("{} {}", date_style.hint, time_style.hint),
                        );
                    }
                }
            }
        }

        let (iso_regex, iso_hint) = match (self.date, self.time) {
            (true, false) => (ISO_DATE.to_string(), ISO_DATE_HINT.to_string()),
            (false, _) => (ISO_TIME.to_string(), ISO_TIME_HINT.to_string()),
            (true, true) => (
                format!("{ISO_DATE}[T ]{ISO_TIME}"),
                format!("{ISO_DATE_HINT}'T'{ISO_TIME_HINT}"),
            ),
        };
        alternatives.push(iso_regex);
        hints.push(iso_hint);

        TemporalSyntax {
            regex: Arc::from(alternatives.join("|")),
            hints: Arc::from(hints),
            parsers,
        }
    }

    fn parse_styled(&self, locale: &Locale, captures: &regex::Captures<'_>) -> Option<Value> {
        let date = if self.date {
            Some(date_from(locale, captures)?)
        } else {
            None
        };
        let time = if self.time {
            Some(time_from(captures)?)
        } else {
            None
        };
        value_of(date, time)
    }

    fn parse_iso(&self, text: &str) -> Option<Value> {
        match (self.date, self.time) {
            (true, false) => parse_iso_date(text).map(Value::Date),
            (false, _) => parse_iso_time(text).map(Value::Time),
            (true, true) => {
                let (date, time) = text.split_once(['T', ' '])?;
                value_of(Some(parse_iso_date(date)?), Some(parse_iso_time(time)?))
            }
        }
    }

    fn kind_of(&self) -> ValueKind {
        match (self.date, self.time) {
            (true, false) => ValueKind::Date,
            (false, _) => ValueKind::Time,
            (true, true) => ValueKind::DateTime,
        }
    }
}

fn value_of(date: Option<Date>, time: Option<Time>) -> Option<Value> {
    match (date, time) {
        (Some(date), Some(time)) => Some(Value::DateTime(PrimitiveDateTime::new(date, time))),
        (Some(date), None) => Some(Value::Date(date)),
        (None, Some(time)) => Some(Value::Time(time)),
        (None, None) => None,
    }
}

impl DataType for TemporalDataType {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ValueKind {
        self.kind_of()
    }

    fn regex(&self, locale: &Locale) -> Arc<str> {
        Arc::clone(&self.syntax(locale).regex)
    }

    fn hints(&self, locale: &Locale) -> Arc<[String]> {
        Arc::clone(&self.syntax(locale).hints)
    }

    fn parse(&self, locale: &Locale, text: &str) -> Result<Value, ParseError> {
        let trimmed = text.trim();
        self.syntax(locale)
            .parsers
            .iter()
            .filter_map(|parser| parser.captures(trimmed))
            .find_map(|captures| self.parse_styled(locale, &captures))
            .or_else(|| self.parse_iso(trimmed))
            .ok_or_else(|| {
                ParseError::new(
                    self,
                    locale,
                    text,
                    format!("not a valid {}", self.kind_of()),
                )
            })
    }
}

fn group(name: &str, body: &str, named: bool) -> String {
    if named {
        format!("(?P<{name}>{body})")
    } else {
        format!("(?:{body})")
    }
}

/// Escape literal text, letting any whitespace run match `\s+`.
fn separator_regex(separator: &str) -> String {
    let mut regex = String::new();
    let mut in_whitespace = false;
    for ch in separator.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                regex.push_str(r"\s+");
            }
            in_whitespace = true;
        } else {
            regex.push_str(&regex::escape(&ch.to_string()));
            in_whitespace = false;
        }
    }
    regex
}

fn month_alternation(names: &[&str]) -> String {
    let mut names: Vec<&str> = names.to_vec();
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    names.dedup();
    let escaped: Vec<String> = names.into_iter().map(regex::escape).collect();
    format!("(?i:{})", escaped.join("|"))
}

fn date_regex(style: &DateStyle, locale: &Locale, named: bool) -> String {
    let mut regex = String::new();
    for (index, part) in style.parts.iter().enumerate() {
        if let Some(separator) = index
            .checked_sub(1)
            .and_then(|previous| style.separators.get(previous))
        {
            regex.push_str(&separator_regex(separator));
        }
        let piece = match part {
            DatePart::Day => group("day", r"\d{1,2}", named),
            DatePart::Year => group("year", r"\d{4}", named),
            DatePart::Month(MonthForm::Numeric) => group("month", r"\d{1,2}", named),
            DatePart::Month(form) => {
                group("month", &month_alternation(locale.month_names(*form)), named)
            }
        };
        regex.push_str(&piece);
    }
    regex.push_str(&separator_regex(style.suffix));
    regex
}

fn time_regex(style: &TimeStyle, named: bool) -> String {
    let mut regex = group("hour", r"\d{1,2}", named);
    regex.push(':');
    regex.push_str(&group("minute", r"\d{2}", named));
    if style.seconds {
        regex.push(':');
        regex.push_str(&group("second", r"\d{2}", named));
    }
    if style.hour12 {
        regex.push_str(r"\s*");
        regex.push_str(&group("meridiem", r"(?i:[ap]\.?m\.?)", named));
    }
    regex
}

fn month_from(locale: &Locale, text: &str) -> Option<Month> {
    let number = text
        .parse::<u8>()
        .ok()
        .or_else(|| month_by_name(locale, text))?;
    Month::try_from(number).ok()
}

fn month_by_name(locale: &Locale, text: &str) -> Option<u8> {
    let lower = text.to_lowercase();
    let index = [MonthForm::Long, MonthForm::Short]
        .into_iter()
        .find_map(|form| {
            locale
                .month_names(form)
                .iter()
                .position(|name| name.to_lowercase() == lower)
        })?;
    u8::try_from(index + 1).ok()
}

fn date_from(locale: &Locale, captures: &regex::Captures<'_>) -> Option<Date> {
    let day: u8 = captures.name("day")?.as_str().parse().ok()?;
    let month = month_from(locale, captures.name("month")?.as_str())?;
    let year: i32 = captures.name("year")?.as_str().parse().ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

fn time_from(captures: &regex::Captures<'_>) -> Option<Time> {
    let hour: u8 = captures.name("hour")?.as_str().parse().ok()?;
    let minute: u8 = captures.name("minute")?.as_str().parse().ok()?;
    let second: u8 = captures
        .name("second")
        .map_or(Some(0), |second| second.as_str().parse().ok())?;
    let Some(meridiem) = captures.name("meridiem") else {
        return Time::from_hms(hour, minute, second).ok();
    };
    if !(1..=12).contains(&hour) {
        return None;
    }
    let pm = meridiem.as_str().to_ascii_lowercase().starts_with('p');
    let hour = match (pm, hour) {
        (false, 12) => 0,
        (true, 12) | (false, _) => hour,
        (true, _) => hour + 12,
    };
    Time::from_hms(hour, minute, second).ok()
}

fn parse_iso_date(text: &str) -> Option<Date> {
    Date::parse(text, format_description!("[year]-[month]-[day]")).ok()
}

fn parse_iso_time(text: &str) -> Option<Time> {
    Time::parse(text, format_description!("[hour]:[minute]:[second].[subsecond]"))
        .or_else(|_| Time::parse(text, format_description!("[hour]:[minute]:[second]")))
        .or_else(|_| {
            Time::parse(
                &format!("{text}:00"),
                format_description!("[hour]:[minute]:[second]"),
            )
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::macros::{date, datetime, time};

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap_or_else(|err| panic!("tag {tag:?} should parse: {err}"))
    }

    fn parse(data_type: &TemporalDataType, tag: &str, text: &str) -> Value {
        data_type
            .parse(&locale(tag), text)
            .unwrap_or_else(|err| panic!("{text:?} should parse under {tag}: {err}"))
    }

    #[rstest]
    #[case("en-US", "01/15/2024")]
    #[case("en-US", "Jan 15, 2024")]
    #[case("en-US", "january 15, 2024")]
    #[case("en-GB", "15/01/2024")]
    #[case("en-GB", "15 January 2024")]
    #[case("es-ES", "15/01/2024")]
    #[case("es-ES", "15 de enero de 2024")]
    #[case("fr-FR", "15 janv. 2024")]
    #[case("de-DE", "15.01.2024")]
    #[case("de-DE", "15. Januar 2024")]
    #[case("pt-BR", "15 de janeiro de 2024")]
    #[case("ja-JP", "2024年1月15日")]
    fn parses_narrative_dates(#[case] tag: &str, #[case] text: &str) {
        assert_eq!(
            parse(&TemporalDataType::date(), tag, text),
            Value::Date(date!(2024 - 01 - 15))
        );
    }

    #[rstest]
    fn accepts_iso_dates_under_every_locale(
        #[values("en-US", "en-GB", "es-ES", "fr-FR", "de-DE", "it-IT", "pt-PT", "ja-JP", "zh-CN", "sv-SE")]
        tag: &str,
    ) {
        assert_eq!(
            parse(&TemporalDataType::date(), tag, "2024-01-15"),
            Value::Date(date!(2024 - 01 - 15))
        );
        assert_eq!(
            parse(&TemporalDataType::time(), tag, "13:45:30"),
            Value::Time(time!(13:45:30))
        );
        assert_eq!(
            parse(&TemporalDataType::date_time(), tag, "2024-01-15T13:45:30"),
            Value::DateTime(datetime!(2024-01-15 13:45:30))
        );
    }

    #[rstest]
    #[case("en-US", "1:45 PM", time!(13:45))]
    #[case("en-US", "12:05 am", time!(0:05))]
    #[case("en-US", "12:00:30 p.m.", time!(12:00:30))]
    #[case("en-GB", "13:45", time!(13:45))]
    #[case("es-ES", "08:15:02", time!(8:15:02))]
    fn parses_times(#[case] tag: &str, #[case] text: &str, #[case] expected: Time) {
        assert_eq!(parse(&TemporalDataType::time(), tag, text), Value::Time(expected));
    }

    #[test]
    fn parses_localised_date_times() {
        assert_eq!(
            parse(&TemporalDataType::date_time(), "en-US", "Jan 15, 2024, 1:45 PM"),
            Value::DateTime(datetime!(2024-01-15 13:45))
        );
        assert_eq!(
            parse(&TemporalDataType::date_time(), "de-DE", "15.01.2024 13:45"),
            Value::DateTime(datetime!(2024-01-15 13:45))
        );
    }

    #[rstest]
    #[case("en-US", "02/30/2024")]
    #[case("en-US", "13:45 PM")]
    #[case("en-GB", "Smarch 3, 2024")]
    fn rejects_impossible_values(#[case] tag: &str, #[case] text: &str) {
        let date = TemporalDataType::date().parse(&locale(tag), text);
        let time = TemporalDataType::time().parse(&locale(tag), text);
        assert!(date.is_err() && time.is_err(), "{text:?} should not parse");
    }

    #[test]
    fn hints_list_styles_then_iso() {
        let hints = TemporalDataType::date().hints(&locale("en-US"));
        assert_eq!(
            hints.to_vec(),
            vec![
                "MM/dd/yyyy".to_string(),
                "MMM d, yyyy".to_string(),
                "MMMM d, yyyy".to_string(),
                "yyyy-MM-dd".to_string(),
            ]
        );
    }

    #[test]
    fn embedded_regex_recognises_every_style() {
        let regex = TemporalDataType::date().regex(&locale("en-US"));
        let anchored = regex::Regex::new(&format!("^(?:{regex})$"))
            .unwrap_or_else(|err| panic!("date regex should compile: {err}"));
        for text in ["1/5/2024", "Feb 29, 2024", "March 3, 2024", "2024-03-03"] {
            assert!(anchored.is_match(text), "{text:?}");
        }
    }
}
