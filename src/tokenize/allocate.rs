//! Timing allocator: splits a text span into word/punctuation tokens and
//! synthesizes per-token timestamps within a known `[start, end)` window.
//!
//! Without ground-truth sub-word timestamps, the word budget is distributed
//! linearly across the window. Punctuation is emitted as a short trailing
//! window ending at the time cursor and does not consume narration time.

use crate::config::TimingConfig;
use crate::defaults;
use crate::token::{Emphasis, Token, TokenKind};
use crate::tokenize::emphasis;
use crate::tokenize::scanner::{self, Piece};

/// Tokenize one timed text span.
///
/// Splits `text` with the shared scanner and walks the matches with a time
/// cursor starting at `start_ms`. Words advance the cursor by an equal share
/// of the window; punctuation marks borrow a short look-back window from the
/// cursor position. A degenerate window (`end_ms <= start_ms`) is normalized
/// to 1ms rather than rejected; it represents imprecise upstream data.
///
/// Emitted tokens receive strictly increasing indices starting at
/// `start_index`. Returns an empty list when the text contains no words or
/// punctuation.
pub fn allocate_span(
    text: &str,
    start_ms: u64,
    end_ms: u64,
    confidence: f32,
    start_index: usize,
    timing: &TimingConfig,
) -> Vec<Token> {
    let pieces: Vec<Piece<'_>> = scanner::scan(text).collect();
    if pieces.is_empty() {
        return Vec::new();
    }

    let word_count = pieces.iter().filter(|p| p.is_word()).count();
    let duration_ms = end_ms.saturating_sub(start_ms).max(1);
    let ms_per_word = duration_ms as f64 / word_count.max(1) as f64;

    let window_start = start_ms as f64;
    let window_end = (start_ms + duration_ms) as f64;

    let mut index = start_index;
    let mut cursor = window_start;
    let mut tokens = Vec::with_capacity(pieces.len());

    for piece in pieces {
        match piece {
            Piece::Punct(text) => {
                let lookback =
                    (ms_per_word * timing.punct_lookback_frac).min(timing.punct_lookback_max_ms as f64);
                let punct_start = (cursor - lookback).clamp(window_start, window_end);
                let punct_end = cursor.clamp(punct_start, window_end);

                tokens.push(Token {
                    text: text.to_string(),
                    start_ms: punct_start.round() as u64,
                    end_ms: punct_end.round() as u64,
                    kind: TokenKind::Punctuation,
                    emphasis: Emphasis::None,
                    confidence: defaults::PUNCT_CONFIDENCE,
                    index,
                });
                index += 1;
                // Cursor unchanged: punctuation does not consume word time.
            }
            Piece::Word(text) => {
                let word_start = cursor.clamp(window_start, window_end);
                let next_cursor = (cursor + ms_per_word).clamp(word_start + 1.0, window_end.max(word_start + 1.0));

                tokens.push(Token {
                    text: text.to_string(),
                    start_ms: word_start.round() as u64,
                    end_ms: next_cursor.round() as u64,
                    kind: TokenKind::Word,
                    emphasis: emphasis::classify(text),
                    confidence,
                    index,
                });
                index += 1;
                cursor = next_cursor;
            }
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocate(text: &str, start_ms: u64, end_ms: u64) -> Vec<Token> {
        allocate_span(text, start_ms, end_ms, 0.9, 0, &TimingConfig::default())
    }

    #[test]
    fn test_three_words_split_window_evenly() {
        let tokens = allocate("a b c", 0, 3000);
        assert_eq!(tokens.len(), 3);
        assert_eq!(
            tokens
                .iter()
                .map(|t| (t.start_ms, t.end_ms))
                .collect::<Vec<_>>(),
            vec![(0, 1000), (1000, 2000), (2000, 3000)]
        );
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Word));
    }

    #[test]
    fn test_last_word_ends_exactly_at_window_end() {
        let tokens = allocate("one two three", 500, 2000);
        assert_eq!(tokens.last().unwrap().end_ms, 2000);
    }

    #[test]
    fn test_empty_text_yields_no_tokens() {
        assert!(allocate("", 0, 1000).is_empty());
        assert!(allocate("  @@@  ", 0, 1000).is_empty());
    }

    #[test]
    fn test_degenerate_window_normalized_to_one_ms() {
        let tokens = allocate("word", 1000, 1000);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].start_ms, 1000);
        assert!(tokens[0].end_ms > tokens[0].start_ms);
    }

    #[test]
    fn test_inverted_window_normalized() {
        let tokens = allocate("word", 2000, 500);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].start_ms, 2000);
        assert_eq!(tokens[0].end_ms, 2001);
    }

    #[test]
    fn test_word_spans_are_strictly_positive() {
        // Many words crammed into a tiny window still get >= 1ms each start-to-end
        let tokens = allocate("a b c d e f g h", 0, 4);
        for token in &tokens {
            assert!(token.end_ms > token.start_ms, "token {:?}", token);
        }
    }

    #[test]
    fn test_punctuation_trails_previous_word() {
        let tokens = allocate("Hello, world.", 0, 2000);
        assert_eq!(tokens.len(), 4);

        let comma = &tokens[1];
        assert_eq!(comma.kind, TokenKind::Punctuation);
        // Two words over 2000ms: 1000ms per word, look-back = min(200, 90) = 90
        assert_eq!(comma.end_ms, 1000);
        assert_eq!(comma.start_ms, 910);

        // The next word picks up where the cursor left off, not after the comma
        assert_eq!(tokens[2].start_ms, 1000);
    }

    #[test]
    fn test_punctuation_lookback_capped_by_word_budget_fraction() {
        // One word over 100ms: per-word budget 100, look-back = min(20, 90) = 20
        let tokens = allocate("go.", 0, 100);
        let period = &tokens[1];
        assert_eq!(period.end_ms, 100);
        assert_eq!(period.start_ms, 80);
    }

    #[test]
    fn test_punctuation_does_not_consume_word_time() {
        let with_punct = allocate("a, b", 0, 1000);
        let words: Vec<_> = with_punct.iter().filter(|t| t.is_word()).collect();
        assert_eq!(words[0].end_ms, 500);
        assert_eq!(words[1].start_ms, 500);
    }

    #[test]
    fn test_leading_punctuation_clamped_to_window_start() {
        let tokens = allocate(". hi", 100, 1000);
        let period = &tokens[0];
        assert_eq!(period.kind, TokenKind::Punctuation);
        assert_eq!(period.start_ms, 100);
        assert_eq!(period.end_ms, 100);
    }

    #[test]
    fn test_indices_increase_from_start_index() {
        let tokens = allocate_span("one two. three", 0, 3000, 0.8, 10, &TimingConfig::default());
        let indices: Vec<_> = tokens.iter().map(|t| t.index).collect();
        assert_eq!(indices, vec![10, 11, 12, 13]);
    }

    #[test]
    fn test_word_confidence_passed_through_punct_fixed() {
        let tokens = allocate_span("go!", 0, 500, 0.72, 0, &TimingConfig::default());
        assert!((tokens[0].confidence - 0.72).abs() < f32::EPSILON);
        assert!((tokens[1].confidence - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_emphasis_computed_for_words_only() {
        let tokens = allocate("extraordinary TIME the!", 0, 3000);
        assert_eq!(tokens[0].emphasis, Emphasis::High);
        assert_eq!(tokens[1].emphasis, Emphasis::High);
        assert_eq!(tokens[2].emphasis, Emphasis::None);
        assert_eq!(tokens[3].emphasis, Emphasis::None); // punctuation
    }

    #[test]
    fn test_configurable_lookback_window() {
        let timing = TimingConfig {
            punct_lookback_max_ms: 10,
            ..TimingConfig::default()
        };
        let tokens = allocate_span("Hello, world", 0, 2000, 0.9, 0, &timing);
        let comma = &tokens[1];
        assert_eq!(comma.start_ms, 990);
        assert_eq!(comma.end_ms, 1000);
    }
}
