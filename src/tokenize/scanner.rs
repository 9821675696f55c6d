//! Word/punctuation scanner shared by the allocator and the reconciler.
//!
//! Matches maximal runs of alphanumerics (with one internal apostrophe
//! group) as words and single characters from `. , ! ? ; :` as punctuation.
//! Everything else is a discriminator: it consumes scan position but is
//! never emitted.

use once_cell::sync::Lazy;
use regex::Regex;

// SAFETY: hardcoded pattern, always valid
#[allow(clippy::expect_used)]
static WORD_OR_PUNCT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9]+(?:'[A-Za-z0-9]+)?|[.,!?;:]").expect("hardcoded scanner pattern")
});

/// One scanned unit of transcript text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    Word(&'a str),
    Punct(&'a str),
}

impl<'a> Piece<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Piece::Word(text) | Piece::Punct(text) => text,
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Piece::Word(_))
    }
}

/// Returns true for a single punctuation character the scanner emits.
pub fn is_punctuation(text: &str) -> bool {
    matches!(text, "." | "," | "!" | "?" | ";" | ":")
}

/// Scan `text` into words and punctuation marks, in order.
pub fn scan(text: &str) -> impl Iterator<Item = Piece<'_>> {
    WORD_OR_PUNCT.find_iter(text).map(|m| {
        let matched = m.as_str();
        if is_punctuation(matched) {
            Piece::Punct(matched)
        } else {
            Piece::Word(matched)
        }
    })
}
