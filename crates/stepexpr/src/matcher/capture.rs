//! Named capture extraction for compiled expressions.

use fancy_regex::Regex;

/// Name of the extraction group for the `index`-th slot.
pub(crate) fn slot_group(index: usize) -> String {
    format!("arg{index}")
}

/// Extract the slot captures when `text` matches `regex`, returning `None`
/// otherwise.
///
/// Only the named `argN` groups contribute, so capturing groups inside
/// pattern fragments never shift the slots. A slot that did not participate
/// yields an empty string to keep positional alignment.
pub(crate) fn extract_slot_values<'t>(
    regex: &Regex,
    text: &'t str,
    slots: usize,
) -> Result<Option<Vec<&'t str>>, fancy_regex::Error> {
    let Some(captures) = regex.captures(text)? else {
        return Ok(None);
    };
    let values = (0..slots)
        .map(|index| {
            captures
                .name(&slot_group(index))
                .map_or("", |capture| capture.as_str())
        })
        .collect();
    Ok(Some(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regex(source: &str) -> Regex {
        Regex::new(source).unwrap_or_else(|err| panic!("test regex must compile: {err}"))
    }

    #[test]
    fn returns_none_when_pattern_does_not_match() {
        let regex = regex(r"^(?P<arg0>\d+)$");
        assert!(matches!(extract_slot_values(&regex, "nope", 1), Ok(None)));
    }

    #[test]
    fn ignores_unnamed_groups() {
        let regex = regex(r"^(a\s+)(?P<arg0>\d+)((x)|(y))(?P<arg1>\w+)?$");
        let Ok(Some(values)) = extract_slot_values(&regex, "a 12x", 2) else {
            panic!("text should match");
        };
        assert_eq!(values, vec!["12", ""]);
    }
}
