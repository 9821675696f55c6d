//! Default tuning constants for capstream.
//!
//! Shared across configuration types to keep the tokenizer, playhead queries,
//! and orchestrator in agreement about their defaults.

/// Default confidence assigned when a source provides none.
pub const DEFAULT_CONFIDENCE: f32 = 0.95;

/// Confidence assigned to synthesized punctuation tokens.
///
/// Punctuation timing is derived, not transcribed, so it carries no
/// recognition uncertainty of its own.
pub const PUNCT_CONFIDENCE: f32 = 1.0;

/// Fraction of the per-word budget used for a punctuation look-back window.
///
/// Punctuation is rendered as a short trailing flourish ending at the time
/// cursor; it does not consume narration time. Tuned for visual smoothness.
pub const PUNCT_LOOKBACK_FRAC: f64 = 0.2;

/// Hard cap on the punctuation look-back window in milliseconds.
pub const PUNCT_LOOKBACK_MAX_MS: u64 = 90;

/// Minimum look-back for punctuation reconciled from full transcript text.
pub const RECONCILE_GAP_MIN_MS: u64 = 20;

/// Maximum look-back for punctuation reconciled from full transcript text.
pub const RECONCILE_GAP_MAX_MS: u64 = 90;

/// Fallback span for a word whose end timestamp is missing.
///
/// 220ms approximates one spoken word at a conversational pace.
pub const WORD_FALLBACK_SPAN_MS: u64 = 220;

/// Grace period after a sentence's end during which it stays active.
pub const SENTENCE_GRACE_MS: u64 = 400;

/// Rotation period for the short-sentence hook display.
pub const HOOK_ROTATE_INTERVAL_MS: u64 = 1700;

/// Maximum number of rotating hook candidates.
pub const HOOK_CAPACITY: usize = 6;

/// Maximum word count for a sentence to qualify as a hook.
pub const HOOK_MAX_SENTENCE_WORDS: usize = 4;

/// Maximum word length for the single-word hook fallback.
pub const HOOK_MAX_WORD_LEN: usize = 8;

/// Default time window for tokenizing bare text with no known duration.
pub const PARSE_TEXT_WINDOW_MS: u64 = 30_000;

/// Interval between transcription job polls.
pub const POLL_INTERVAL_MS: u64 = 3_000;

/// Hard deadline for a transcription job before it is abandoned.
pub const POLL_TIMEOUT_MS: u64 = 15 * 60 * 1_000;

/// Default transcription provider API base URL.
pub const PROVIDER_BASE_URL: &str = "https://api.assemblyai.com/v2";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookback_caps_are_consistent() {
        assert!(RECONCILE_GAP_MIN_MS <= RECONCILE_GAP_MAX_MS);
        assert_eq!(PUNCT_LOOKBACK_MAX_MS, RECONCILE_GAP_MAX_MS);
    }

    #[test]
    fn test_poll_timeout_is_fifteen_minutes() {
        assert_eq!(POLL_TIMEOUT_MS, 900_000);
    }

    #[test]
    fn test_default_confidence_in_unit_range() {
        assert!((0.0..=1.0).contains(&DEFAULT_CONFIDENCE));
        assert!((0.0..=1.0).contains(&PUNCT_CONFIDENCE));
    }
}
