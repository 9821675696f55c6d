//! Emphasis classification for word tokens.

use crate::token::Emphasis;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Keywords that always render with high emphasis, regardless of length.
static EMPHASIS_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "time", "fire", "money", "truth", "risk", "future", "war", "love", "death",
    ])
});

/// Word length above which a word is considered emphatic on its own.
const LONG_WORD_LEN: usize = 8;

fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '\'')
        .collect()
}

/// Classify a single word's visual emphasis.
///
/// Rules, first match wins: all-caps words (with at least one letter and more
/// than one character), long words, and a fixed keyword set are `High`;
/// everything else is `None`. Punctuation and other non-word characters are
/// stripped before classification.
pub fn classify(word: &str) -> Emphasis {
    let cleaned = clean_word(word);
    if cleaned.is_empty() {
        return Emphasis::None;
    }

    let has_alpha = cleaned.chars().any(|c| c.is_ascii_alphabetic());
    if has_alpha && cleaned == cleaned.to_uppercase() && cleaned.len() > 1 {
        return Emphasis::High;
    }

    if cleaned.len() > LONG_WORD_LEN {
        return Emphasis::High;
    }

    if EMPHASIS_KEYWORDS.contains(cleaned.to_lowercase().as_str()) {
        return Emphasis::High;
    }

    Emphasis::None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_caps_is_high() {
        assert_eq!(classify("TIME"), Emphasis::High);
        assert_eq!(classify("GO"), Emphasis::High);
    }

    #[test]
    fn test_single_capital_letter_is_none() {
        assert_eq!(classify("A"), Emphasis::None);
        assert_eq!(classify("I"), Emphasis::None);
    }

    #[test]
    fn test_common_word_is_none() {
        assert_eq!(classify("the"), Emphasis::None);
        assert_eq!(classify("hello"), Emphasis::None);
    }

    #[test]
    fn test_long_word_is_high() {
        // 13 characters, well past the length threshold
        assert_eq!(classify("extraordinary"), Emphasis::High);
        // exactly 8 characters stays below the threshold
        assert_eq!(classify("ordinary"), Emphasis::None);
    }

    #[test]
    fn test_keyword_is_high_case_insensitive() {
        assert_eq!(classify("fire"), Emphasis::High);
        assert_eq!(classify("Money"), Emphasis::High);
        assert_eq!(classify("love"), Emphasis::High);
    }

    #[test]
    fn test_punctuation_stripped_before_classifying() {
        assert_eq!(classify("HELLO!"), Emphasis::High);
        assert_eq!(classify("fire."), Emphasis::High);
        assert_eq!(classify("the,"), Emphasis::None);
    }

    #[test]
    fn test_empty_and_symbol_only_is_none() {
        assert_eq!(classify(""), Emphasis::None);
        assert_eq!(classify("---"), Emphasis::None);
    }

    #[test]
    fn test_digits_only_is_not_all_caps() {
        // No letters, so the all-caps rule does not apply
        assert_eq!(classify("42"), Emphasis::None);
        assert_eq!(classify("123456789"), Emphasis::High); // but length still counts
    }

    #[test]
    fn test_apostrophe_words() {
        assert_eq!(classify("it's"), Emphasis::None);
        assert_eq!(classify("DON'T"), Emphasis::High);
    }
}
