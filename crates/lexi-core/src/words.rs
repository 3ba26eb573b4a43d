use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Alphabetic runs of three or more ASCII letters
static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z]{3,}\b").expect("Valid word regex"));

const SPLIT_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}'];

/// Candidate check before any difficulty lookup
pub fn is_valid_word(word: &str, min_len: usize) -> bool {
    if word.chars().count() < min_len {
        return false;
    }

    if !word.chars().any(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    if word.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    // all punctuation
    if !word.chars().any(|c| c.is_ascii_alphanumeric()) {
        return false;
    }

    true
}

/// Lowercase form with punctuation stripped, used as the comparison key
pub fn normalize_word(word: &str) -> String {
    word.nfc()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Split free text on whitespace and punctuation into normalised candidate words
pub fn extract_words(text: &str, min_len: usize) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || SPLIT_PUNCTUATION.contains(&c))
        .filter(|w| is_valid_word(w, min_len))
        .map(normalize_word)
        .filter(|w| !w.is_empty())
        .collect()
}

/// Distinct normalised words of a text node, in first-seen order
pub fn extract_unique_words(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    WORD_PATTERN
        .find_iter(text)
        .map(|m| normalize_word(m.as_str()))
        .filter(|w| seen.insert(w.clone()))
        .collect()
}

/// Whitespace-separated token count
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_numeric_and_punctuation_tokens() {
        assert!(!is_valid_word("an", 3));
        assert!(!is_valid_word("2024", 3));
        assert!(!is_valid_word("...", 3));
        assert!(!is_valid_word("€€€", 3));
        assert!(is_valid_word("cat", 3));
        assert!(is_valid_word("covid19", 3));
    }

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize_word("Laureate,"), "laureate");
        assert_eq!(normalize_word("  \"Hello!\" "), "hello");
        assert_eq!(normalize_word("don't"), "dont");
    }

    #[test]
    fn extract_words_splits_on_punctuation() {
        let words = extract_words("Hello, world! (It's) fine; ok", 3);
        assert_eq!(words, vec!["hello", "world", "its", "fine"]);
    }

    #[test]
    fn unique_words_keep_first_seen_order() {
        let words = extract_unique_words("The Cat saw the cat and a dog");
        assert_eq!(words, vec!["the", "cat", "saw", "and", "dog"]);
    }

    #[test]
    fn unique_words_skip_digits_and_short_tokens() {
        let words = extract_unique_words("go to 2024 x42 tea");
        assert_eq!(words, vec!["tea"]);
    }
}
