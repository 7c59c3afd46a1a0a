//! Per-locale memoisation shared by data types, assertion factories and
//! compiled expressions.
//!
//! Values are built outside the lock and published with `entry().or_insert`,
//! so racing builders may compute the same artefact twice but every caller
//! observes the first published `Arc`.
//!
//! Lookups take a read lock on a map owned by the caching object, never a
//! process-wide one. Readers do not block each other and a writer holds the
//! lock only to publish an already built value. A poisoned lock is
//! recovered, since entries are immutable once published.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use hashbrown::HashMap;

use crate::locale::Locale;

/// Lazily populated map from locale to a shared artefact.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use stepexpr::{Locale, LocaleCache};
///
/// let cache = LocaleCache::new();
/// let locale = Locale::default();
/// let first = cache.get_or_insert_with(&locale, || String::from("built"));
/// let second = cache.get_or_insert_with(&locale, || String::from("ignored"));
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
pub struct LocaleCache<T> {
    entries: RwLock<HashMap<Locale, Arc<T>>>,
}

impl<T> LocaleCache<T> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the cached artefact for `locale`, building it on first use.
    pub fn get_or_insert_with(&self, locale: &Locale, build: impl FnOnce() -> T) -> Arc<T> {
        if let Some(hit) = self.lookup(locale) {
            return hit;
        }
        log::trace!("per-locale cache miss for {locale}");
        self.publish(locale, Arc::new(build()))
    }

    /// Fallible variant of [`get_or_insert_with`](Self::get_or_insert_with);
    /// failures are not cached.
    ///
    /// # Errors
    /// Propagates the error returned by `build`.
    pub fn get_or_try_insert_with<E>(
        &self,
        locale: &Locale,
        build: impl FnOnce() -> Result<T, E>,
    ) -> Result<Arc<T>, E> {
        if let Some(hit) = self.lookup(locale) {
            return Ok(hit);
        }
        log::trace!("per-locale cache miss for {locale}");
        Ok(self.publish(locale, Arc::new(build()?)))
    }

    /// Number of locales with a published artefact.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been published yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, locale: &Locale) -> Option<Arc<T>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(locale)
            .cloned()
    }

    fn publish(&self, locale: &Locale, built: Arc<T>) -> Arc<T> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(locale.clone()).or_insert(built))
    }
}

impl<T> Default for LocaleCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for LocaleCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleCache")
            .field("locales", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap_or_else(|err| panic!("tag {tag:?} should parse: {err}"))
    }

    #[test]
    fn builds_once_per_locale() {
        let cache = LocaleCache::new();
        let builds = AtomicUsize::new(0);
        let build = || {
            builds.fetch_add(1, Ordering::SeqCst);
            42
        };
        let en = locale("en-US");
        let es = locale("es-ES");
        let first = cache.get_or_insert_with(&en, build);
        let again = cache.get_or_insert_with(&en, build);
        cache.get_or_insert_with(&es, build);

        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(builds.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failed_builds_are_not_cached() {
        let cache: LocaleCache<u8> = LocaleCache::new();
        let en = locale("en-US");
        assert_eq!(cache.get_or_try_insert_with(&en, || Err("boom")), Err("boom"));
        assert!(cache.is_empty());
        let built = cache.get_or_try_insert_with(&en, || Ok::<_, &str>(7));
        assert_eq!(built.map(|value| *value), Ok(7));
    }

    #[test]
    fn concurrent_callers_observe_one_published_value() {
        let cache = LocaleCache::new();
        let en = locale("en-US");
        let values: Vec<Arc<String>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|index| {
                    let cache = &cache;
                    let en = &en;
                    scope.spawn(move || cache.get_or_insert_with(en, || format!("builder {index}")))
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(value) => value,
                    Err(_) => panic!("cache thread panicked"),
                })
                .collect()
        });
        let published = cache.get_or_insert_with(&en, String::new);
        assert!(values.iter().all(|value| Arc::ptr_eq(value, &published)));
    }
}
