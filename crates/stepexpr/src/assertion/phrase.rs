//! Natural-language phrase sets for assertion factories.

use std::sync::Arc;

use super::AssertionError;

const VALUE_PLACEHOLDER: &str = "{value}";

/// One phrase template bound to the key its factory builds from.
#[derive(Debug, Clone)]
pub struct Phrase {
    /// Factory-defined key, e.g. `greater`.
    pub key: String,
    /// Template text, e.g. `is greater than {value}`.
    pub template: String,
    matcher: regex::Regex,
}

/// Ordered phrases for one factory and locale.
///
/// Resolution tries phrases in registration order and uses the first whose
/// anchored pattern matches the captured text, so when two templates could
/// match the same text the one registered first wins.
///
/// # Examples
/// ```
/// use stepexpr::PhraseSet;
/// let phrases = PhraseSet::new(
///     [("greater", "is greater than {value}"), ("equal", "is {value}")],
///     r"\d+",
/// )
/// .expect("valid phrases");
/// let (key, value) = phrases.resolve("is greater than  7").expect("phrase matches");
/// assert_eq!((key, value), ("greater", Some("7")));
/// ```
#[derive(Debug, Clone)]
pub struct PhraseSet {
    phrases: Vec<Phrase>,
    embedded: Arc<str>,
}

impl PhraseSet {
    /// Build phrases from `(key, template)` pairs; `{value}` in a template
    /// stands for text matching `value_regex`.
    ///
    /// # Errors
    /// Returns [`AssertionError::InvalidPhrase`] when a synthesised pattern
    /// fails to compile.
    pub fn new<I, K, T>(entries: I, value_regex: &str) -> Result<Self, AssertionError>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<String>,
    {
        let mut phrases = Vec::new();
        let mut alternatives = Vec::new();
        for (key, template) in entries {
            let template = template.into();
            let named = template_regex(&template, &format!("(?P<value>{value_regex})"));
            let matcher = regex::Regex::new(&format!("^{named}$")).map_err(|source| {
                AssertionError::InvalidPhrase {
                    template: template.clone(),
                    source,
                }
            })?;
            alternatives.push(template_regex(&template, &format!("(?:{value_regex})")));
            phrases.push(Phrase {
                key: key.into(),
                template,
                matcher,
            });
        }
        Ok(Self {
            phrases,
            embedded: Arc::from(alternatives.join("|")),
        })
    }

    /// Unanchored alternation of every phrase, for embedding in expressions.
    #[must_use]
    pub fn regex(&self) -> Arc<str> {
        Arc::clone(&self.embedded)
    }

    /// Phrases in registration order.
    #[must_use]
    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    /// Templates in registration order.
    #[must_use]
    pub fn templates(&self) -> Vec<String> {
        self.phrases
            .iter()
            .map(|phrase| phrase.template.clone())
            .collect()
    }

    /// Find the first phrase matching `text`, returning its key and the
    /// captured value text, if the template has one.
    #[must_use]
    pub fn resolve<'a>(&'a self, text: &'a str) -> Option<(&'a str, Option<&'a str>)> {
        let text = text.trim();
        self.phrases.iter().find_map(|phrase| {
            let captures = phrase.matcher.captures(text)?;
            let value = captures.name("value").map(|value| value.as_str());
            Some((phrase.key.as_str(), value))
        })
    }
}

/// Escape a template, generalising whitespace and substituting `{value}`.
fn template_regex(template: &str, value: &str) -> String {
    let mut regex = String::new();
    for (index, part) in template.split(VALUE_PLACEHOLDER).enumerate() {
        if index > 0 {
            regex.push_str(value);
        }
        let mut words = part.split_whitespace().peekable();
        if part.starts_with(char::is_whitespace) && words.peek().is_some() {
            regex.push_str(r"\s+");
        }
        let mut wrote_word = false;
        while let Some(word) = words.next() {
            regex.push_str(&regex::escape(word));
            wrote_word = true;
            if words.peek().is_some() {
                regex.push_str(r"\s+");
            }
        }
        let trailing = part.ends_with(char::is_whitespace);
        if (wrote_word && trailing) || (!wrote_word && !part.is_empty()) {
            regex.push_str(r"\s+");
        }
    }
    regex
}
