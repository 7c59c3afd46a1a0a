//! Date and time display conventions per language.

/// How a month is written in a date style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthForm {
    /// `1` through `12`, optionally zero-padded.
    Numeric,
    /// Abbreviated name such as `Jan`.
    Short,
    /// Full name such as `January`.
    Long,
}

/// One component of a date style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePart {
    /// Day of month.
    Day,
    /// Month in the given form.
    Month(MonthForm),
    /// Four-digit year.
    Year,
}

/// A narrative date layout: three parts joined by two separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateStyle {
    /// Display pattern shown to authors, e.g. `MM/dd/yyyy`.
    pub hint: &'static str,
    /// Component order.
    pub parts: [DatePart; 3],
    /// Text between the first and second, and second and third parts.
    pub separators: [&'static str; 2],
    /// Text following the last part.
    pub suffix: &'static str,
}

/// A time-of-day layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeStyle {
    /// Display pattern shown to authors, e.g. `HH:mm`.
    pub hint: &'static str,
    /// Hours run 1 to 12 followed by an AM/PM marker.
    pub hour12: bool,
    /// Seconds are present.
    pub seconds: bool,
}

const fn date(
    hint: &'static str,
    parts: [DatePart; 3],
    separators: [&'static str; 2],
    suffix: &'static str,
) -> DateStyle {
    DateStyle {
        hint,
        parts,
        separators,
        suffix,
    }
}

use DatePart::{Day, Month, Year};
use MonthForm::{Long, Numeric, Short};

pub(super) const EN_US_DATES: &[DateStyle] = &[
    date("MM/dd/yyyy", [Month(Numeric), Day, Year], ["/", "/"], ""),
    date("MMM d, yyyy", [Month(Short), Day, Year], [" ", ", "], ""),
    date("MMMM d, yyyy", [Month(Long), Day, Year], [" ", ", "], ""),
];

pub(super) const EUROPEAN_DATES: &[DateStyle] = &[
    date("dd/MM/yyyy", [Day, Month(Numeric), Year], ["/", "/"], ""),
    date("d MMM yyyy", [Day, Month(Short), Year], [" ", " "], ""),
    date("d MMMM yyyy", [Day, Month(Long), Year], [" ", " "], ""),
];

pub(super) const ES_DATES: &[DateStyle] = &[
    date("dd/MM/yyyy", [Day, Month(Numeric), Year], ["/", "/"], ""),
    date("d MMM yyyy", [Day, Month(Short), Year], [" ", " "], ""),
    date(
        "d 'de' MMMM 'de' yyyy",
        [Day, Month(Long), Year],
        [" de ", " de "],
        "",
    ),
];

pub(super) const PT_DATES: &[DateStyle] = &[
    date("dd/MM/yyyy", [Day, Month(Numeric), Year], ["/", "/"], ""),
    date(
        "d 'de' MMM 'de' yyyy",
        [Day, Month(Short), Year],
        [" de ", " de "],
        "",
    ),
    date(
        "d 'de' MMMM 'de' yyyy",
        [Day, Month(Long), Year],
        [" de ", " de "],
        "",
    ),
];

pub(super) const DE_DATES: &[DateStyle] = &[
    date("dd.MM.yyyy", [Day, Month(Numeric), Year], [".", "."], ""),
    date("d. MMM yyyy", [Day, Month(Short), Year], [". ", " "], ""),
    date("d. MMMM yyyy", [Day, Month(Long), Year], [". ", " "], ""),
];

pub(super) const CJK_DATES: &[DateStyle] = &[
    date("yyyy/MM/dd", [Year, Month(Numeric), Day], ["/", "/"], ""),
    date("yyyy年M月d日", [Year, Month(Numeric), Day], ["年", "月"], "日"),
];

pub(super) const TWELVE_HOUR_TIMES: &[TimeStyle] = &[
    TimeStyle {
        hint: "h:mm:ss a",
        hour12: true,
        seconds: true,
    },
    TimeStyle {
        hint: "h:mm a",
        hour12: true,
        seconds: false,
    },
    TimeStyle {
        hint: "HH:mm:ss",
        hour12: false,
        seconds: true,
    },
    TimeStyle {
        hint: "HH:mm",
        hour12: false,
        seconds: false,
    },
];

pub(super) const TWENTY_FOUR_HOUR_TIMES: &[TimeStyle] = &[
    TimeStyle {
        hint: "HH:mm:ss",
        hour12: false,
        seconds: true,
    },
    TimeStyle {
        hint: "HH:mm",
        hour12: false,
        seconds: false,
    },
];

type Months = [&'static str; 12];

const EN_LONG: Months = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const EN_SHORT: Months = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const ES_LONG: Months = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];
const ES_SHORT: Months = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];
const FR_LONG: Months = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];
const FR_SHORT: Months = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];
const DE_LONG: Months = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];
const DE_SHORT: Months = [
    "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.",
    "Dez.",
];
const IT_LONG: Months = [
    "gennaio",
    "febbraio",
    "marzo",
    "aprile",
    "maggio",
    "giugno",
    "luglio",
    "agosto",
    "settembre",
    "ottobre",
    "novembre",
    "dicembre",
];
const IT_SHORT: Months = [
    "gen", "feb", "mar", "apr", "mag", "giu", "lug", "ago", "set", "ott", "nov", "dic",
];
const PT_LONG: Months = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];
const PT_SHORT: Months = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.",
    "dez.",
];
const NUMERIC: Months = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12",
];

pub(super) fn month_names(language: &str, form: MonthForm) -> &'static Months {
    match (language, form) {
        (_, Numeric) => &NUMERIC,
        ("es", Long) => &ES_LONG,
        ("es", Short) => &ES_SHORT,
        ("fr", Long) => &FR_LONG,
        ("fr", Short) => &FR_SHORT,
        ("de", Long) => &DE_LONG,
        ("de", Short) => &DE_SHORT,
        ("it", Long) => &IT_LONG,
        ("it", Short) => &IT_SHORT,
        ("pt", Long) => &PT_LONG,
        ("pt", Short) => &PT_SHORT,
        (_, Long) => &EN_LONG,
        (_, Short) => &EN_SHORT,
    }
}
