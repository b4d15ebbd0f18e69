//! Cleaning, validation and intra-batch deduplication of headline strings.
//!
//! Everything in here works on plain strings; it knows nothing about HTML.
//! The extractors call [`clean_text`] on raw element text, [`is_headline`] to
//! filter candidates, and [`dedup_case_insensitive`] on the final list.

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

/// Headlines must be longer than this many characters.
pub const MIN_HEADLINE_CHARS: usize = 10;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Nothing but digits, punctuation and symbols.
static NON_PROSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d\s\p{P}\p{S}]+$").unwrap());

/// Single-word labels that show up in headline slots but are navigation.
const BOILERPLATE: &[&str] = &[
    "video",
    "live",
    "watch",
    "listen",
    "podcast",
    "newsletter",
    "opinion",
    "trending",
    "more",
    "menu",
    "advertisement",
    "newsletters",
    "subscriptions",
    "sponsored",
];

/// Collapse every whitespace run (newlines included) into one space and trim.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_text("  Storm\n   hits coast "), "Storm hits coast");
/// ```
pub fn clean_text(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned()
}

/// Whether an already cleaned string looks like a headline.
///
/// Rejects empty strings, strings of [`MIN_HEADLINE_CHARS`] characters or
/// fewer, purely numeric/punctuation strings and single boilerplate words.
pub fn is_headline(text: &str) -> bool {
    let text = text.trim();
    if text.chars().count() <= MIN_HEADLINE_CHARS {
        return false;
    }
    if NON_PROSE_RE.is_match(text) {
        return false;
    }
    let single_word = !text.contains(char::is_whitespace);
    !(single_word && BOILERPLATE.contains(&text.to_lowercase().as_str()))
}

/// Whether `text` has between `min` and `max` characters, inclusive.
pub fn char_len_within(text: &str, min: usize, max: usize) -> bool {
    let n = text.chars().count();
    n >= min && n <= max
}

/// Keep the first occurrence of each headline, comparing trimmed lowercase text.
pub fn dedup_case_insensitive(headlines: Vec<String>) -> Vec<String> {
    headlines
        .into_iter()
        .unique_by(|h| h.trim().to_lowercase())
        .collect()
}

/// Clean, filter and deduplicate one extraction pass.
pub fn normalize<I>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let cleaned = candidates
        .into_iter()
        .map(|c| clean_text(&c))
        .filter(|c| is_headline(c))
        .collect();
    dedup_case_insensitive(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Storm\n   hits\tcoast "), "Storm hits coast");
        assert_eq!(clean_text("\n\n"), "");
    }

    #[test]
    fn test_is_headline_length_threshold() {
        assert!(!is_headline(""));
        assert!(!is_headline("   "));
        assert!(!is_headline("Ten chars!"));
        assert!(is_headline("Eleven char"));
    }

    #[test]
    fn test_is_headline_counts_characters_not_bytes() {
        // 9 characters, 18 bytes
        assert!(!is_headline("ééééééééé"));
    }

    #[test]
    fn test_is_headline_rejects_non_prose() {
        assert!(!is_headline("1,234,567,890"));
        assert!(!is_headline("----- ** -----"));
        assert!(is_headline("2024 election results are in"));
    }

    #[test]
    fn test_is_headline_rejects_boilerplate_words() {
        assert!(!is_headline("Advertisement"));
        assert!(!is_headline("NEWSLETTERS"));
        assert!(is_headline("Video shows storm hitting coast"));
        assert!(is_headline("Advertisement spending climbs"));
    }

    #[test]
    fn test_dedup_keeps_first_spelling() {
        let out = dedup_case_insensitive(vec![
            "Storm hits coast".to_string(),
            "STORM HITS COAST".to_string(),
            "New bill passes".to_string(),
            " storm hits coast ".to_string(),
        ]);
        assert_eq!(out, vec!["Storm hits coast", "New bill passes"]);
    }

    #[test]
    fn test_normalize_pipeline() {
        let out = normalize(vec![
            "  Senate passes\n the budget bill ".to_string(),
            "Live".to_string(),
            "".to_string(),
            "senate passes the budget bill".to_string(),
            "Markets rally after rate cut".to_string(),
        ]);
        assert_eq!(
            out,
            vec!["Senate passes the budget bill", "Markets rally after rate cut"]
        );
    }

    #[test]
    fn test_char_len_within() {
        assert!(char_len_within("fifteen chars!!", 15, 200));
        assert!(!char_len_within("short", 15, 200));
        assert!(!char_len_within(&"x".repeat(201), 15, 200));
    }
}
