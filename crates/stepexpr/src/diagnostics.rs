//! Registry descriptions for diagnostics and external tooling.
//!
//! The description types are always available; with the `diagnostics`
//! feature they also serialise, and [`dump_registries`] renders both
//! registries as JSON for one locale.

#[cfg(feature = "diagnostics")]
use serde::Serialize;

#[cfg(feature = "diagnostics")]
use crate::assertion::AssertionFactories;
#[cfg(feature = "diagnostics")]
use crate::datatype::DataTypes;
#[cfg(feature = "diagnostics")]
use crate::locale::Locale;
use crate::value::ValueKind;

/// A data type as seen from one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct DataTypeDescription {
    /// Registry name.
    pub name: String,
    /// Semantic kind of parsed values.
    pub kind: ValueKind,
    /// Embedded recognition regex.
    pub regex: String,
    /// Accepted formats.
    pub hints: Vec<String>,
}

/// An assertion factory's phrases in one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct AssertionDescription {
    /// Registry name.
    pub name: String,
    /// Phrase templates in precedence order.
    pub phrases: Vec<String>,
}

#[cfg(feature = "diagnostics")]
#[derive(Serialize)]
struct RegistryDump {
    locale: String,
    data_types: Vec<DataTypeDescription>,
    assertions: Vec<AssertionDescription>,
}

/// Serialise both registries as seen from `locale`.
///
/// # Errors
///
/// Returns an error if serialisation fails.
///
/// # Examples
///
/// ```
/// use stepexpr::{AssertionFactories, DataTypes, Locale, dump_registries};
///
/// let json = dump_registries(&DataTypes::standard(), &AssertionFactories::standard(), &Locale::default())
///     .expect("serialise registries");
/// assert!(json.contains("\"data_types\""));
/// ```
#[cfg(feature = "diagnostics")]
pub fn dump_registries(
    data_types: &DataTypes,
    assertions: &AssertionFactories,
    locale: &Locale,
) -> serde_json::Result<String> {
    serde_json::to_string(&RegistryDump {
        locale: locale.to_string(),
        data_types: data_types.describe(locale),
        assertions: assertions.describe(locale),
    })
}
