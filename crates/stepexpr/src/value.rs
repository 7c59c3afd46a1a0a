//! Values produced by data-type parsers.

use std::cmp::Ordering;
use std::fmt;

use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

/// Semantic kind of a data type and of the values it parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize))]
#[cfg_attr(feature = "diagnostics", serde(rename_all = "kebab-case"))]
pub enum ValueKind {
    /// Free text.
    Text,
    /// Whole number.
    Integer,
    /// Number with a fractional part.
    Decimal,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time without offset.
    DateTime,
}

impl ValueKind {
    /// Lower-case name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "date-time",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed argument value.
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use stepexpr::Value;
/// assert_eq!(Value::Integer(2).compare(&Value::Decimal(2.5)), Some(Ordering::Less));
/// assert_eq!(Value::Text("a".into()).compare(&Value::Integer(1)), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Free text.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Number with a fractional part.
    Decimal(f64),
    /// Calendar date.
    Date(Date),
    /// Time of day.
    Time(Time),
    /// Date and time without offset.
    DateTime(PrimitiveDateTime),
}

impl Value {
    /// Kind of the value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Integer(_) => ValueKind::Integer,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::Date(_) => ValueKind::Date,
            Self::Time(_) => ValueKind::Time,
            Self::DateTime(_) => ValueKind::DateTime,
        }
    }

    /// Borrow the text of a [`Value::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The integer of a [`Value::Integer`].
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric values as `f64`; integers are widened.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "comparisons across numeric kinds tolerate rounding beyond 2^53"
    )]
    pub const fn as_decimal(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Decimal(value) => Some(*value),
            _ => None,
        }
    }

    /// Order two values when they are comparable.
    ///
    /// Integers and decimals compare numerically with each other. Text and
    /// each temporal kind compare only within their own kind.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::Time(a), Self::Time(b)) => Some(a.cmp(b)),
            (Self::DateTime(a), Self::DateTime(b)) => Some(a.cmp(b)),
            _ => self
                .as_decimal()
                .zip(other.as_decimal())
                .and_then(|(a, b)| a.partial_cmp(&b)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text:?}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::Date(date) => write!(f, "{date}"),
            Self::Time(time) => {
                let text = time
                    .format(format_description!("[hour]:[minute]:[second]"))
                    .map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
            Self::DateTime(date_time) => {
                let text = date_time
                    .format(format_description!(
                        "[year]-[month]-[day]T[hour]:[minute]:[second]"
                    ))
                    .map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::macros::{date, datetime, time};

    #[rstest]
    #[case(Value::Integer(3), Value::Integer(5), Some(Ordering::Less))]
    #[case(Value::Decimal(3.5), Value::Integer(3), Some(Ordering::Greater))]
    #[case(Value::Date(date!(2024 - 01 - 15)), Value::Date(date!(2024 - 01 - 15)), Some(Ordering::Equal))]
    #[case(Value::Time(time!(10:00)), Value::Date(date!(2024 - 01 - 15)), None)]
    #[case(Value::Decimal(f64::NAN), Value::Integer(1), None)]
    fn compares_values(#[case] left: Value, #[case] right: Value, #[case] expected: Option<Ordering>) {
        assert_eq!(left.compare(&right), expected);
    }

    #[rstest]
    #[case(Value::Text("hi".into()), "\"hi\"")]
    #[case(Value::Integer(-4), "-4")]
    #[case(Value::Decimal(1.25), "1.25")]
    #[case(Value::Date(date!(2024 - 03 - 09)), "2024-03-09")]
    #[case(Value::Time(time!(7:05)), "07:05:00")]
    #[case(Value::DateTime(datetime!(2024-03-09 7:05:30)), "2024-03-09T07:05:30")]
    fn displays_values(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn reports_kinds() {
        assert_eq!(Value::Text(String::new()).kind(), ValueKind::Text);
        assert_eq!(ValueKind::DateTime.to_string(), "date-time");
    }
}
