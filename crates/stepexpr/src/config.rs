//! Runtime configuration for stepexpr.
//!
//! The module exposes the default locale used by
//! [`ExpressionMatcher::matches_default`](crate::ExpressionMatcher::matches_default)
//! and by compile-time regex validation. An in-process override takes
//! precedence over the `STEPEXPR_LOCALE` environment variable, which takes
//! precedence over `en-US`.

use std::sync::{PoisonError, RwLock};

use crate::locale::Locale;

/// Environment variable naming the default locale, e.g. `es-ES`.
pub const LOCALE_ENV: &str = "STEPEXPR_LOCALE";

static DEFAULT_LOCALE_OVERRIDE: RwLock<Option<Locale>> = RwLock::new(None);

fn parse_env_locale(value: &str) -> Option<Locale> {
    if value.trim().is_empty() {
        return None;
    }
    Locale::parse(value)
        .inspect_err(|err| log::warn!("ignoring {LOCALE_ENV}: {err}"))
        .ok()
}

fn env_locale() -> Option<Locale> {
    std::env::var(LOCALE_ENV)
        .ok()
        .as_deref()
        .and_then(parse_env_locale)
}

fn override_state() -> Option<Locale> {
    DEFAULT_LOCALE_OVERRIDE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Determine the locale used when callers do not name one.
#[must_use]
pub fn default_locale() -> Locale {
    override_state().or_else(env_locale).unwrap_or_default()
}

/// Override the default locale for the current process.
///
/// Tests may call [`clear_default_locale_override`] to restore environment
/// driven behaviour afterwards.
pub fn set_default_locale(locale: Locale) {
    *DEFAULT_LOCALE_OVERRIDE
        .write()
        .unwrap_or_else(PoisonError::into_inner) = Some(locale);
}

/// Remove any in-process override of the default locale.
pub fn clear_default_locale_override() {
    *DEFAULT_LOCALE_OVERRIDE
        .write()
        .unwrap_or_else(PoisonError::into_inner) = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn es() -> Locale {
        Locale::parse("es-ES").unwrap_or_else(|err| panic!("valid tag: {err}"))
    }

    #[test]
    #[serial]
    fn override_replaces_default() {
        clear_default_locale_override();
        set_default_locale(es());
        assert_eq!(default_locale(), es());
        clear_default_locale_override();
        assert_eq!(override_state(), None);
    }

    #[test]
    #[serial]
    fn falls_back_to_environment_or_us_english() {
        clear_default_locale_override();
        let expected = env_locale().unwrap_or_default();
        assert_eq!(default_locale(), expected);
    }

    #[test]
    fn parse_env_locale_ignores_invalid_tags() {
        assert_eq!(parse_env_locale(" es-ES "), Some(es()));
        assert_eq!(parse_env_locale(""), None);
        assert_eq!(parse_env_locale("not a tag!"), None);
    }
}
