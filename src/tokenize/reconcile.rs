//! Punctuation reconciler: re-inserts punctuation into a word-only stream.
//!
//! Some providers deliver word-level timestamps without punctuation tokens
//! but do deliver the full punctuated transcript text. This pass re-scans
//! that text and threads the timed word tokens through it, synthesizing a
//! timestamp for each punctuation mark from its neighboring words.

use crate::config::TimingConfig;
use crate::defaults;
use crate::token::{Emphasis, Token, TokenKind};
use crate::tokenize::scanner::{self, Piece};

/// Merge punctuation from `full_text` into an ordered word-only token stream.
///
/// Word tokens pass through verbatim, consumed in order as the scanner walks
/// the full text. Each punctuation match is synthesized from the previous
/// consumed word's end (or the next word's start when there is no previous
/// word); punctuation with no word on either side is dropped. Word tokens the
/// scanner under-matched are appended at the end in their original order.
///
/// If the full text contains no punctuation at all this is a no-op.
/// The output is unvalidated; run it through [`crate::tokenize::validate`].
pub fn reconcile(words_only: Vec<Token>, full_text: &str, timing: &TimingConfig) -> Vec<Token> {
    let pieces: Vec<Piece<'_>> = scanner::scan(full_text).collect();
    if !pieces.iter().any(|p| !p.is_word()) {
        return words_only;
    }

    let mut mixed = Vec::with_capacity(words_only.len() + 8);
    let mut word_cursor = 0usize;
    let mut last_word: Option<(u64, u64)> = None; // (start_ms, end_ms)

    for piece in pieces {
        match piece {
            Piece::Punct(text) => {
                let next_word = words_only.get(word_cursor);
                if last_word.is_none() && next_word.is_none() {
                    continue;
                }

                let anchor = last_word
                    .map(|(_, end)| end)
                    .or_else(|| next_word.map(|w| w.start_ms))
                    .unwrap_or(0);
                let end_ms = anchor;

                let gap = next_word
                    .map(|w| w.start_ms)
                    .unwrap_or(end_ms)
                    .saturating_sub(anchor);
                let lookback = gap.clamp(timing.reconcile_gap_min_ms, timing.reconcile_gap_max_ms);
                let start_ms = anchor
                    .saturating_sub(lookback)
                    .max(last_word.map(|(start, _)| start).unwrap_or(0));

                mixed.push(Token {
                    text: text.to_string(),
                    start_ms,
                    end_ms: end_ms.max(start_ms),
                    kind: TokenKind::Punctuation,
                    emphasis: Emphasis::None,
                    confidence: defaults::PUNCT_CONFIDENCE,
                    index: 0, // reassigned by validation
                });
            }
            Piece::Word(_) => {
                let Some(token) = words_only.get(word_cursor) else {
                    continue;
                };
                last_word = Some((token.start_ms, token.end_ms));
                mixed.push(token.clone());
                word_cursor += 1;
            }
        }
    }

    // Scanner under-matched relative to the token stream: keep the leftovers.
    mixed.extend(words_only.into_iter().skip(word_cursor));

    mixed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, start_ms: u64, end_ms: u64) -> Token {
        Token {
            text: text.to_string(),
            start_ms,
            end_ms,
            kind: TokenKind::Word,
            emphasis: Emphasis::None,
            confidence: 0.9,
            index: 0,
        }
    }

    fn timing() -> TimingConfig {
        TimingConfig::default()
    }

    #[test]
    fn test_no_punctuation_is_identity() {
        let words = vec![word("hello", 0, 400), word("world", 400, 800)];
        let out = reconcile(words.clone(), "hello world", &timing());
        assert_eq!(out, words);
    }

    #[test]
    fn test_punctuation_anchored_at_previous_word_end() {
        let words = vec![word("hello", 0, 400), word("world", 600, 1000)];
        let out = reconcile(words, "hello, world", &timing());

        assert_eq!(out.len(), 3);
        let comma = &out[1];
        assert_eq!(comma.kind, TokenKind::Punctuation);
        assert_eq!(comma.text, ",");
        assert_eq!(comma.end_ms, 400);
        // gap to next word start = 200, clamped to 90
        assert_eq!(comma.start_ms, 310);
    }

    #[test]
    fn test_small_gap_uses_minimum_lookback() {
        let words = vec![word("a", 0, 100), word("b", 105, 200)];
        let out = reconcile(words, "a. b", &timing());
        let period = &out[1];
        // gap = 5 clamped up to 20
        assert_eq!(period.end_ms, 100);
        assert_eq!(period.start_ms, 80);
    }

    #[test]
    fn test_lookback_never_precedes_previous_word_start() {
        let words = vec![word("hi", 90, 100), word("there", 400, 600)];
        let out = reconcile(words, "hi! there", &timing());
        let bang = &out[1];
        assert_eq!(bang.start_ms, 90);
        assert_eq!(bang.end_ms, 100);
    }

    #[test]
    fn test_trailing_punctuation_uses_last_word() {
        let words = vec![word("done", 100, 500)];
        let out = reconcile(words, "done.", &timing());
        assert_eq!(out.len(), 2);
        let period = &out[1];
        assert_eq!(period.end_ms, 500);
        // gap to a nonexistent next word is 0, clamped up to 20
        assert_eq!(period.start_ms, 480);
    }

    #[test]
    fn test_leading_punctuation_anchors_on_next_word() {
        let words = vec![word("start", 1000, 1400)];
        let out = reconcile(words, "... start", &timing());
        // Three leading periods, each anchored at the next word's start
        assert_eq!(out.len(), 4);
        for period in &out[..3] {
            assert_eq!(period.kind, TokenKind::Punctuation);
            assert_eq!(period.end_ms, 1000);
            assert_eq!(period.start_ms, 980);
        }
        assert_eq!(out[3].text, "start");
    }

    #[test]
    fn test_punctuation_with_no_words_at_all_is_dropped() {
        let out = reconcile(Vec::new(), "...", &timing());
        assert!(out.is_empty());
    }

    #[test]
    fn test_leftover_word_tokens_appended_in_order() {
        // Full text scanner sees fewer words than the stream carries
        let words = vec![
            word("one", 0, 100),
            word("two", 100, 200),
            word("three", 200, 300),
        ];
        let out = reconcile(words, "one.", &timing());
        assert_eq!(out.len(), 4);
        assert_eq!(out[0].text, "one");
        assert_eq!(out[1].text, ".");
        assert_eq!(out[2].text, "two");
        assert_eq!(out[3].text, "three");
    }

    #[test]
    fn test_extra_scanner_words_are_skipped() {
        // Full text has more words than the stream; surplus matches consume
        // nothing and the stream still comes back complete.
        let words = vec![word("hello", 0, 300)];
        let out = reconcile(words, "hello there world.", &timing());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text, "hello");
        assert_eq!(out[1].text, ".");
    }

    #[test]
    fn test_configurable_gap_clamp() {
        let custom = TimingConfig {
            reconcile_gap_min_ms: 5,
            reconcile_gap_max_ms: 10,
            ..TimingConfig::default()
        };
        let words = vec![word("a", 0, 100), word("b", 300, 400)];
        let out = reconcile(words, "a, b", &custom);
        let comma = &out[1];
        assert_eq!(comma.start_ms, 90);
        assert_eq!(comma.end_ms, 100);
    }
}
