//! Sentence grouping over a finalized token stream.

use crate::token::{Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A contiguous run of tokens ending at terminal punctuation (or stream end).
///
/// Holds a range into the token stream it was derived from rather than a
/// copy, so playhead queries can hand out borrowed slices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceGroup {
    /// Index range into the source token stream.
    pub tokens: Range<usize>,
    /// Reconstructed display text.
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
    /// Number of word tokens in the group.
    pub word_count: usize,
}

impl SentenceGroup {
    /// Borrow this sentence's tokens out of the stream it was built from.
    pub fn slice<'a>(&self, tokens: &'a [Token]) -> &'a [Token] {
        &tokens[self.tokens.clone()]
    }
}

/// Reconstruct display text for a run of tokens.
///
/// Words are joined by single spaces; punctuation attaches to the preceding
/// token with no space before it.
fn sentence_text(tokens: &[Token]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        out.push_str(&token.text);
        if let Some(next) = tokens.get(i + 1)
            && next.kind == TokenKind::Word
        {
            out.push(' ');
        }
    }
    out.trim().to_string()
}

/// Partition a finalized token stream into sentence groups.
///
/// A group closes at each terminal punctuation token (`.`, `!`, `?`); any
/// remaining tokens at stream end are flushed as a final unterminated group.
pub fn group_sentences(tokens: &[Token]) -> Vec<SentenceGroup> {
    let mut groups = Vec::new();
    let mut group_start = 0usize;

    let mut close = |groups: &mut Vec<SentenceGroup>, start: usize, end: usize| {
        let slice = &tokens[start..end];
        if slice.is_empty() {
            return;
        }
        groups.push(SentenceGroup {
            tokens: start..end,
            text: sentence_text(slice),
            start_ms: slice[0].start_ms,
            end_ms: slice[slice.len() - 1].end_ms,
            word_count: slice.iter().filter(|t| t.is_word()).count(),
        });
    };

    for (i, token) in tokens.iter().enumerate() {
        if token.ends_sentence() {
            close(&mut groups, group_start, i + 1);
            group_start = i + 1;
        }
    }
    close(&mut groups, group_start, tokens.len());

    groups
}
